//! Alert rule-set session management.
//!
//! [`coordinator::RuleSetCoordinator`] owns the working rule collection and
//! mediates between copy-on-edit drafts and a [`storage::RuleStorage`]
//! backend. [`config`] describes where that backend lives.

pub mod config;
pub mod coordinator;
pub mod storage;

use config::AlertingConfig;
use coordinator::RuleSetCoordinator;
use storage::RulerClient;

/// Builds a coordinator and ruler client from configuration, or `None` when
/// alerting is not configured for this environment.
pub fn connect(config: &AlertingConfig) -> Option<(RuleSetCoordinator, RulerClient)> {
    let ruler = config.ruler.as_ref()?;
    let coordinator = RuleSetCoordinator::new().with_save_timeout(ruler.save_timeout());
    Some((coordinator, RulerClient::new(ruler)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use config::RulerConfig;
    use coordinator::SessionState;

    #[test]
    fn connect_needs_a_ruler() {
        assert!(connect(&AlertingConfig::default()).is_none());

        let config = AlertingConfig {
            ruler: Some(RulerConfig::new("http://localhost:9009")),
        };
        let (coordinator, _client) = connect(&config).unwrap();
        assert_eq!(coordinator.state(), &SessionState::Empty);
    }
}
