use std::fmt;

use crate::family::{AlertFamily, AlertSensitivity, TimeUnit};
use crate::labels::LabelSet;

pub const NAMESPACE_LABEL: &str = "namespace";
pub const NAMESPACE_VALUE: &str = "synthetic_monitoring";
pub const DESCRIPTION_ANNOTATION: &str = "description";
pub const SUMMARY_ANNOTATION: &str = "summary";

/// Where a rule's expression comes from.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RuleSource {
    /// Expression rebuilt from the family template and the rule's threshold.
    Template {
        family: AlertFamily,
        sensitivity: AlertSensitivity,
    },
    /// Expression that did not match any template; kept verbatim.
    Custom { expr: String },
}

/// Editable alert rule.
///
/// `labels` and `annotations` hold only user entries. The `namespace` label is
/// added at render time, followed by `description`/`summary` when the rule has
/// them. Defaults always carry both; fetched rules keep exactly what was stored.
#[derive(Debug, Clone, PartialEq)]
pub struct AlertRule {
    pub name: String,
    pub source: RuleSource,
    pub threshold: f64,
    pub time_count: u32,
    pub time_unit: TimeUnit,
    pub labels: LabelSet,
    pub annotations: LabelSet,
    pub description: Option<String>,
    pub summary: Option<String>,
}

impl AlertRule {
    /// A rule with a verbatim expression and the default window.
    pub fn custom(name: impl Into<String>, expr: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            source: RuleSource::Custom { expr: expr.into() },
            threshold: 0.0,
            time_count: crate::defaults::DEFAULT_TIME_COUNT,
            time_unit: crate::defaults::DEFAULT_TIME_UNIT,
            labels: LabelSet::new(),
            annotations: LabelSet::new(),
            description: None,
            summary: None,
        }
    }

    pub fn family(&self) -> Option<AlertFamily> {
        match self.source {
            RuleSource::Template { family, .. } => Some(family),
            RuleSource::Custom { .. } => None,
        }
    }

    pub fn sensitivity(&self) -> Option<AlertSensitivity> {
        match self.source {
            RuleSource::Template { sensitivity, .. } => Some(sensitivity),
            RuleSource::Custom { .. } => None,
        }
    }

    pub fn is_custom(&self) -> bool {
        matches!(self.source, RuleSource::Custom { .. })
    }

    /// The `for` duration, e.g. `"5m"`.
    pub fn window(&self) -> String {
        format!("{}{}", self.time_count, self.time_unit)
    }

    pub fn key(&self) -> RuleKey {
        RuleKey {
            name: self.name.clone(),
            family: self.family(),
            sensitivity: self.sensitivity(),
        }
    }

    /// True when both rules were generated for the same family and tier.
    pub fn same_template(&self, other: &AlertRule) -> bool {
        match (&self.source, &other.source) {
            (RuleSource::Template { .. }, RuleSource::Template { .. }) => {
                self.source == other.source
            }
            _ => false,
        }
    }
}

/// Identity used to merge an edited rule back into its collection.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RuleKey {
    pub name: String,
    pub family: Option<AlertFamily>,
    pub sensitivity: Option<AlertSensitivity>,
}

impl RuleKey {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            family: None,
            sensitivity: None,
        }
    }

    pub fn matches(&self, rule: &AlertRule) -> bool {
        rule.name == self.name
            && rule.family() == self.family
            && rule.sensitivity() == self.sensitivity
    }
}

impl fmt::Display for RuleKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.family, self.sensitivity) {
            (Some(family), Some(sensitivity)) => {
                write!(f, "{} ({family}/{sensitivity})", self.name)
            }
            _ => write!(f, "{} (custom)", self.name),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::defaults::default_rule;

    #[test]
    fn window_joins_count_and_unit() {
        let mut rule = default_rule(AlertFamily::ProbeSuccess, AlertSensitivity::High);
        assert_eq!(rule.window(), "5m");
        rule.time_count = 2;
        rule.time_unit = TimeUnit::Seconds;
        assert_eq!(rule.window(), "2s");
    }

    #[test]
    fn key_matches_only_same_origin() {
        let rule = default_rule(AlertFamily::ProbeDuration, AlertSensitivity::Low);
        let key = rule.key();
        assert!(key.matches(&rule));

        let mut renamed = rule.clone();
        renamed.name = "other".into();
        assert!(!key.matches(&renamed));

        let sibling = default_rule(AlertFamily::ProbeDuration, AlertSensitivity::Medium);
        assert!(!key.matches(&sibling));
    }

    #[test]
    fn custom_rules_have_no_template_identity() {
        let mut rule = default_rule(AlertFamily::ProbeSuccess, AlertSensitivity::High);
        rule.source = RuleSource::Custom {
            expr: "up == 0".into(),
        };
        assert!(rule.is_custom());
        assert_eq!(rule.key(), RuleKey::named(rule.name.clone()));
        assert!(!rule.same_template(&rule.clone()));
    }
}
