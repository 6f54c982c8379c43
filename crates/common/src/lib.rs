//! Alert rule templates for synthetic monitoring.
//!
//! Pure building blocks: the default family × sensitivity table, the fixed
//! recording rules, rendering of editable rules into the ruler wire format and
//! the reverse mapping used when rules are fetched back.

pub mod defaults;
pub mod family;
pub mod labels;
pub mod recording;
pub mod render;
pub mod rule;
pub mod template;
pub mod wire;

pub use defaults::{default_alert_rules, default_rule, DEFAULT_TIME_COUNT, DEFAULT_TIME_UNIT};
pub use family::{AlertFamily, AlertSensitivity, Comparison, TimeUnit};
pub use labels::LabelSet;
pub use recording::{recording_rules, RecordingRule};
pub use render::{parse_wire_rule, parse_window, render_rule, validate_rule, ValidationError};
pub use rule::{AlertRule, RuleKey, RuleSource};
pub use wire::{RuleGroup, WireAlertRule, WireRule};

/// The complete default rule set: recording rules followed by the nine alerts.
pub fn default_rule_set() -> Result<Vec<WireRule>, ValidationError> {
    let mut rules: Vec<WireRule> = recording_rules().into_iter().map(WireRule::from).collect();
    for rule in default_alert_rules() {
        rules.push(render_rule(&rule)?.into());
    }
    Ok(rules)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_rule_set_has_recordings_then_alerts() {
        let rules = default_rule_set().unwrap();
        assert_eq!(rules.len(), 12);
        assert!(rules[..3].iter().all(|r| matches!(r, WireRule::Recording(_))));
        assert!(rules[3..].iter().all(|r| matches!(r, WireRule::Alert(_))));
    }
}
