//! Claims dashboard controller
//!
//! Owns the single [`DashboardState`] and drives it through the reducer.
//! Every follow-up task a reduction returns is run on its own tokio task:
//! it sleeps for the requested delay and dispatches the resulting action.
//! Stale follow-ups are discarded by the reducer, so nothing here needs to
//! cancel timers.

use std::sync::Arc;

use tokio::sync::Mutex;

use core_kernel::{Clock, DocumentSink, ExportReceipt, ImageStore, ImageUpload};
use domain_claims::{
    ClaimDetails, ClaimStatus, DashboardAction, DashboardSettings, DashboardState,
    OverallConfidence, ScheduledTask, Severity,
};

use crate::error::DashboardError;

/// Handle to one running dashboard
///
/// Cloning is cheap; all clones drive the same state.
#[derive(Clone)]
pub struct ClaimsDashboard {
    state: Arc<Mutex<DashboardState>>,
    clock: Arc<dyn Clock>,
    images: Arc<dyn ImageStore>,
    documents: Arc<dyn DocumentSink>,
}

impl ClaimsDashboard {
    /// Opens a dashboard for `claim` at the clock's current time
    pub fn open(
        claim: ClaimDetails,
        settings: DashboardSettings,
        clock: Arc<dyn Clock>,
        images: Arc<dyn ImageStore>,
        documents: Arc<dyn DocumentSink>,
    ) -> Result<Self, DashboardError> {
        let state = DashboardState::open(claim, settings, clock.now())?;
        tracing::info!(
            policy = %state.claim().policy_number,
            agent = %state.settings().agent_id,
            "dashboard opened"
        );
        Ok(Self {
            state: Arc::new(Mutex::new(state)),
            clock,
            images,
            documents,
        })
    }

    /// Copy of the current state
    pub async fn snapshot(&self) -> DashboardState {
        self.state.lock().await.clone()
    }

    /// Reduces `action` against the current state and schedules its follow-ups
    ///
    /// A rejected action leaves the state as it was.
    pub async fn dispatch(&self, action: DashboardAction) -> Result<DashboardState, DashboardError> {
        let (next, scheduled) = {
            let mut state = self.state.lock().await;
            let reduction = state.reduce(action, self.clock.now())?;
            *state = reduction.state;
            (state.clone(), reduction.scheduled)
        };
        for task in scheduled {
            self.schedule(task);
        }
        Ok(next)
    }

    fn schedule(&self, task: ScheduledTask) {
        let dashboard = self.clone();
        tokio::spawn(async move {
            tokio::time::sleep(task.after).await;
            if let Err(e) = dashboard.dispatch(task.into_action()).await {
                tracing::warn!(task = ?task.kind, error = %e, "scheduled task failed");
            }
        });
    }

    pub async fn change_status(&self, status: ClaimStatus) -> Result<DashboardState, DashboardError> {
        self.dispatch(DashboardAction::ChangeStatus(status)).await
    }

    /// Moves to PENDING and lets the approval cascade run to CLOSED
    pub async fn submit_for_approval(&self) -> Result<DashboardState, DashboardError> {
        self.dispatch(DashboardAction::SubmitForApproval).await
    }

    pub async fn approve(&self) -> Result<DashboardState, DashboardError> {
        self.dispatch(DashboardAction::Approve).await
    }

    pub async fn send_repair_authorization(&self) -> Result<DashboardState, DashboardError> {
        self.dispatch(DashboardAction::SendRepairAuthorization).await
    }

    pub async fn run_assessment(&self) -> Result<DashboardState, DashboardError> {
        self.dispatch(DashboardAction::RunAssessment).await
    }

    /// Stores every upload, then attaches the batch
    ///
    /// The batch is all or nothing: if one upload cannot be stored none are
    /// attached and the assessment is not re-run.
    pub async fn upload_images(
        &self,
        uploads: Vec<ImageUpload>,
    ) -> Result<DashboardState, DashboardError> {
        let mut stored = Vec::with_capacity(uploads.len());
        for upload in uploads {
            let name = upload.file_name.clone();
            let image = self.images.store(upload).await.map_err(|e| {
                tracing::warn!(file = %name, error = %e, "image upload failed");
                e
            })?;
            stored.push(image);
        }
        self.dispatch(DashboardAction::AttachImages(stored)).await
    }

    pub async fn update_severity(
        &self,
        index: usize,
        severity: Severity,
    ) -> Result<DashboardState, DashboardError> {
        self.dispatch(DashboardAction::UpdateSeverity { index, severity }).await
    }

    pub async fn update_type(
        &self,
        index: usize,
        damage_type: impl Into<String>,
    ) -> Result<DashboardState, DashboardError> {
        self.dispatch(DashboardAction::UpdateType {
            index,
            damage_type: damage_type.into(),
        })
        .await
    }

    pub async fn remove_damage(&self, index: usize) -> Result<DashboardState, DashboardError> {
        self.dispatch(DashboardAction::RemoveDamage { index }).await
    }

    pub async fn add_damage(&self) -> Result<DashboardState, DashboardError> {
        self.dispatch(DashboardAction::AddDamage).await
    }

    pub async fn set_final_estimate(
        &self,
        value: impl Into<String>,
    ) -> Result<DashboardState, DashboardError> {
        self.dispatch(DashboardAction::SetFinalEstimate(value.into())).await
    }

    pub async fn set_agent_notes(
        &self,
        notes: impl Into<String>,
    ) -> Result<DashboardState, DashboardError> {
        self.dispatch(DashboardAction::SetAgentNotes(notes.into())).await
    }

    pub async fn override_confidence(
        &self,
        input: impl Into<String>,
    ) -> Result<DashboardState, DashboardError> {
        self.dispatch(DashboardAction::OverrideConfidence(input.into())).await
    }

    /// Like [`override_confidence`](Self::override_confidence), but rejects
    /// anything other than a whole number in 0..=100 instead of clamping
    pub async fn override_confidence_strict(
        &self,
        input: &str,
    ) -> Result<DashboardState, DashboardError> {
        let confidence = OverallConfidence::parse_strict(input)?;
        self.dispatch(DashboardAction::OverrideConfidence(confidence.value().to_string()))
            .await
    }

    /// Renders the repair authorization as of now and exports it
    ///
    /// The download is audited only once the sink has accepted the document.
    pub async fn download_repair_authorization(&self) -> Result<ExportReceipt, DashboardError> {
        let document = {
            let state = self.state.lock().await;
            state
                .repair_authorization(self.clock.now())
                .to_document(&state.settings().timezone)
        };
        let receipt = self.documents.export(document).await?;
        self.dispatch(DashboardAction::RecordRepairAuthorizationDownload)
            .await?;
        Ok(receipt)
    }
}
