use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct AlertingConfig {
    /// Absent when the environment has no rule storage; alerting is then disabled.
    #[serde(default)]
    pub ruler: Option<RulerConfig>,
}

impl AlertingConfig {
    pub fn alerting_enabled(&self) -> bool {
        self.ruler.is_some()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RulerConfig {
    pub url: String,
    #[serde(default = "default_namespace")]
    pub namespace: String,
    #[serde(default = "default_group")]
    pub group: String,
    #[serde(default = "default_save_timeout")]
    pub save_timeout_seconds: u64,
}

impl RulerConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            namespace: default_namespace(),
            group: default_group(),
            save_timeout_seconds: default_save_timeout(),
        }
    }

    pub fn save_timeout(&self) -> Duration {
        Duration::from_secs(self.save_timeout_seconds)
    }
}

fn default_namespace() -> String {
    "syntheticmonitoring".to_string()
}

fn default_group() -> String {
    "default".to_string()
}

fn default_save_timeout() -> u64 {
    30
}
