//! Dashboard configuration

use std::path::PathBuf;
use std::time::Duration;

use serde::Deserialize;

use core_kernel::Timezone;
use domain_claims::{DashboardSettings, FinalEstimatePolicy, Timings, DEFAULT_AGENT_ID};

use crate::error::DashboardError;

/// Dashboard configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Acting user recorded on agent-driven audit entries
    pub agent_id: String,
    /// IANA zone name for displayed times and dates
    pub timezone: String,
    pub assessment_delay_ms: u64,
    pub approval_step_delay_ms: u64,
    pub status_banner_ttl_ms: u64,
    pub final_estimate_policy: FinalEstimatePolicy,
    pub audit_damage_list_changes: bool,
    /// Starting final estimate; derived from the seed assessment when unset
    pub initial_final_estimate: Option<String>,
    /// Where exported documents and uploaded image bytes are written
    pub export_dir: PathBuf,
    /// Log level
    pub log_level: String,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            agent_id: DEFAULT_AGENT_ID.to_string(),
            timezone: "UTC".to_string(),
            assessment_delay_ms: 2000,
            approval_step_delay_ms: 3000,
            status_banner_ttl_ms: 5000,
            final_estimate_policy: FinalEstimatePolicy::default(),
            audit_damage_list_changes: false,
            initial_final_estimate: None,
            export_dir: PathBuf::from("."),
            log_level: "info".to_string(),
        }
    }
}

impl DashboardConfig {
    /// Loads configuration from `DASHBOARD_*` environment variables
    pub fn from_env() -> Result<Self, config::ConfigError> {
        let source = config::Config::builder()
            .add_source(config::Environment::with_prefix("DASHBOARD").try_parsing(true))
            .build()?;
        Self::from_config(source)
    }

    /// Deserializes from an already assembled configuration
    pub fn from_config(source: config::Config) -> Result<Self, config::ConfigError> {
        source.try_deserialize()
    }

    pub fn timings(&self) -> Timings {
        Timings {
            assessment_delay: Duration::from_millis(self.assessment_delay_ms),
            approval_step_delay: Duration::from_millis(self.approval_step_delay_ms),
            status_banner_ttl: Duration::from_millis(self.status_banner_ttl_ms),
        }
    }

    /// Converts into the settings the reducer runs with
    pub fn to_settings(&self) -> Result<DashboardSettings, DashboardError> {
        let agent_id = self.agent_id.trim();
        if agent_id.is_empty() {
            return Err(DashboardError::InvalidConfig(
                "agent_id must not be empty".to_string(),
            ));
        }
        let timezone: Timezone = self.timezone.parse()?;

        Ok(DashboardSettings {
            agent_id: agent_id.to_string(),
            timezone,
            timings: self.timings(),
            final_estimate_policy: self.final_estimate_policy,
            audit_damage_list_changes: self.audit_damage_list_changes,
            initial_final_estimate: self
                .initial_final_estimate
                .as_ref()
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty()),
            ..DashboardSettings::default()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn load(overrides: &[(&str, &str)]) -> DashboardConfig {
        let builder = overrides
            .iter()
            .fold(config::Config::builder(), |builder, (key, value)| {
                builder.set_override(*key, *value).unwrap()
            });
        DashboardConfig::from_config(builder.build().unwrap()).unwrap()
    }

    #[test]
    fn test_defaults_apply_when_unset() {
        let config = load(&[]);
        let settings = config.to_settings().unwrap();

        assert_eq!(settings, DashboardSettings::default());
        assert_eq!(config.export_dir, PathBuf::from("."));
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn test_overrides_flow_into_settings() {
        let config = load(&[
            ("agent_id", "Agent B-1001"),
            ("timezone", "America/Chicago"),
            ("approval_step_delay_ms", "500"),
            ("final_estimate_policy", "seed_once"),
            ("audit_damage_list_changes", "true"),
            ("initial_final_estimate", "3150"),
        ]);
        let settings = config.to_settings().unwrap();

        assert_eq!(settings.agent_id, "Agent B-1001");
        assert_eq!(settings.timezone.to_string(), "America/Chicago");
        assert_eq!(settings.timings.approval_step_delay, Duration::from_millis(500));
        assert_eq!(settings.timings.assessment_delay, Duration::from_secs(2));
        assert_eq!(settings.final_estimate_policy, FinalEstimatePolicy::SeedOnce);
        assert!(settings.audit_damage_list_changes);
        assert_eq!(settings.initial_final_estimate.as_deref(), Some("3150"));
    }

    #[test]
    fn test_unknown_timezone_is_rejected() {
        let config = load(&[("timezone", "Atlantis/Central")]);
        assert!(matches!(
            config.to_settings(),
            Err(DashboardError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_blank_agent_id_is_rejected() {
        let config = load(&[("agent_id", "   ")]);
        assert!(config.to_settings().is_err());
    }
}
