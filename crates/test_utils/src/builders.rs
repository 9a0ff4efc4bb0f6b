//! Test Data Builders
//!
//! Builds dashboard states with only the relevant settings spelled out.

use chrono::{DateTime, Utc};
use core_kernel::Timezone;
use domain_claims::{
    ClaimDetails, DashboardAction, DashboardSettings, DashboardState, FinalEstimatePolicy,
    Timings,
};

use crate::fixtures::{ClaimFixtures, TemporalFixtures};

/// Builder for a dashboard state, optionally with actions already applied
pub struct DashboardStateBuilder {
    claim: ClaimDetails,
    settings: DashboardSettings,
    opened_at: DateTime<Utc>,
    actions: Vec<DashboardAction>,
}

impl Default for DashboardStateBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl DashboardStateBuilder {
    /// Creates a new builder with default values
    pub fn new() -> Self {
        Self {
            claim: ClaimFixtures::collision(),
            settings: DashboardSettings::default(),
            opened_at: TemporalFixtures::opened_at(),
            actions: Vec::new(),
        }
    }

    pub fn with_claim(mut self, claim: ClaimDetails) -> Self {
        self.claim = claim;
        self
    }

    pub fn with_agent_id(mut self, agent_id: impl Into<String>) -> Self {
        self.settings.agent_id = agent_id.into();
        self
    }

    pub fn with_timezone(mut self, timezone: Timezone) -> Self {
        self.settings.timezone = timezone;
        self
    }

    pub fn with_timings(mut self, timings: Timings) -> Self {
        self.settings.timings = timings;
        self
    }

    pub fn with_final_estimate_policy(mut self, policy: FinalEstimatePolicy) -> Self {
        self.settings.final_estimate_policy = policy;
        self
    }

    pub fn with_initial_final_estimate(mut self, value: impl Into<String>) -> Self {
        self.settings.initial_final_estimate = Some(value.into());
        self
    }

    /// Turns on audit entries for damage additions and removals
    pub fn auditing_list_changes(mut self) -> Self {
        self.settings.audit_damage_list_changes = true;
        self
    }

    pub fn opened_at(mut self, at: DateTime<Utc>) -> Self {
        self.opened_at = at;
        self
    }

    /// Queues an action to apply, at the opening time, after opening
    pub fn then(mut self, action: DashboardAction) -> Self {
        self.actions.push(action);
        self
    }

    pub fn settings(&self) -> &DashboardSettings {
        &self.settings
    }

    /// Builds the state
    ///
    /// # Panics
    ///
    /// Panics if opening fails or a queued action is rejected.
    pub fn build(self) -> DashboardState {
        let opened_at = self.opened_at;
        let state = DashboardState::open(self.claim, self.settings, opened_at)
            .expect("Failed to open dashboard");
        self.actions.into_iter().fold(state, |state, action| {
            state
                .apply(action.clone(), opened_at)
                .unwrap_or_else(|e| panic!("Action {:?} rejected: {}", action, e))
        })
    }
}
