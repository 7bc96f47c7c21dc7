//! Telemetry reporting settings.
//!
//! Telemetry never affects request handling. The license key is held only
//! to report whether reporting is licensed; it is never written to logs.

use crate::config::ObservabilityConfig;

/// What the process reports about itself at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TelemetryStatus {
    pub app_name: String,
    pub licensed: bool,
    pub metrics_address: Option<String>,
}

impl TelemetryStatus {
    pub fn from_config(config: &ObservabilityConfig) -> Self {
        Self {
            app_name: config.app_name.clone(),
            licensed: config.license_key.is_some(),
            metrics_address: config
                .metrics_enabled
                .then(|| config.metrics_address.clone()),
        }
    }

    pub fn log(&self) {
        tracing::info!(
            app_name = %self.app_name,
            licensed = self.licensed,
            metrics_address = self.metrics_address.as_deref().unwrap_or("disabled"),
            "Telemetry configured"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reports_license_presence_only() {
        let mut config = ObservabilityConfig::default();
        config.license_key = Some("nr-key".into());

        let status = TelemetryStatus::from_config(&config);
        assert!(status.licensed);
        assert_eq!(status.app_name, "OpenAlex MCP Server");
        assert_eq!(status.metrics_address, None);
        assert!(!format!("{:?}", status).contains("nr-key"));
    }
}
