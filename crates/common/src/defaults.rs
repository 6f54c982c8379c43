use crate::family::{AlertFamily, AlertSensitivity, TimeUnit};
use crate::labels::LabelSet;
use crate::rule::{AlertRule, RuleSource};
use crate::template;

pub const DEFAULT_TIME_COUNT: u32 = 5;
pub const DEFAULT_TIME_UNIT: TimeUnit = TimeUnit::Minutes;

/// One entry of the family × sensitivity default table.
struct DefaultDef {
    family: AlertFamily,
    sensitivity: AlertSensitivity,
    name: &'static str,
    threshold: f64,
}

/// Ordered as the alerts are emitted in a generated rule set.
const DEFAULT_RULES: &[DefaultDef] = &[
    // ---- Probe duration (ms) ----
    DefaultDef {
        family: AlertFamily::ProbeDuration,
        sensitivity: AlertSensitivity::High,
        name: "SyntheticMonitoringProbeDurationAtHighSensitivity",
        threshold: 100.0,
    },
    DefaultDef {
        family: AlertFamily::ProbeDuration,
        sensitivity: AlertSensitivity::Medium,
        name: "SyntheticMonitoringProbeDurationAtMediumSensitivity",
        threshold: 150.0,
    },
    DefaultDef {
        family: AlertFamily::ProbeDuration,
        sensitivity: AlertSensitivity::Low,
        name: "SyntheticMonitoringProbeDurationAtLowSensitivity",
        threshold: 200.0,
    },
    // ---- Probe success (%) ----
    DefaultDef {
        family: AlertFamily::ProbeSuccess,
        sensitivity: AlertSensitivity::High,
        name: "SyntheticMonitoringCheckFailureAtHighSensitivity",
        threshold: 95.0,
    },
    DefaultDef {
        family: AlertFamily::ProbeSuccess,
        sensitivity: AlertSensitivity::Medium,
        name: "SyntheticMonitoringCheckFailureAtMediumSensitivity",
        threshold: 90.0,
    },
    DefaultDef {
        family: AlertFamily::ProbeSuccess,
        sensitivity: AlertSensitivity::Low,
        name: "SyntheticMonitoringCheckFailureAtLowSensitivity",
        threshold: 75.0,
    },
    // ---- SSL certificate validity (days) ----
    DefaultDef {
        family: AlertFamily::SslCertExpiry,
        sensitivity: AlertSensitivity::High,
        name: "SyntheticMonitoringSSLCertExpiryAtHighSensitivity",
        threshold: 90.0,
    },
    DefaultDef {
        family: AlertFamily::SslCertExpiry,
        sensitivity: AlertSensitivity::Medium,
        name: "SyntheticMonitoringSSLCertExpiryAtMediumSensitivity",
        threshold: 60.0,
    },
    DefaultDef {
        family: AlertFamily::SslCertExpiry,
        sensitivity: AlertSensitivity::Low,
        name: "SyntheticMonitoringSSLCertExpiryAtLowSensitivity",
        threshold: 30.0,
    },
];

// Rows are family-major in `AlertFamily::ALL` order, tiers in `AlertSensitivity::ALL` order.
fn lookup(family: AlertFamily, sensitivity: AlertSensitivity) -> &'static DefaultDef {
    let row = match family {
        AlertFamily::ProbeDuration => 0,
        AlertFamily::ProbeSuccess => 1,
        AlertFamily::SslCertExpiry => 2,
    };
    let col = match sensitivity {
        AlertSensitivity::High => 0,
        AlertSensitivity::Medium => 1,
        AlertSensitivity::Low => 2,
    };
    &DEFAULT_RULES[row * 3 + col]
}

pub fn default_name(family: AlertFamily, sensitivity: AlertSensitivity) -> &'static str {
    lookup(family, sensitivity).name
}

pub fn default_threshold(family: AlertFamily, sensitivity: AlertSensitivity) -> f64 {
    lookup(family, sensitivity).threshold
}

fn build(def: &DefaultDef) -> AlertRule {
    AlertRule {
        name: def.name.to_string(),
        source: RuleSource::Template {
            family: def.family,
            sensitivity: def.sensitivity,
        },
        threshold: def.threshold,
        time_count: DEFAULT_TIME_COUNT,
        time_unit: DEFAULT_TIME_UNIT,
        labels: LabelSet::new(),
        annotations: LabelSet::new(),
        description: Some(template::description(def.family).to_string()),
        summary: Some(template::summary(def.family, def.threshold)),
    }
}

/// Default rule for one family and tier.
pub fn default_rule(family: AlertFamily, sensitivity: AlertSensitivity) -> AlertRule {
    build(lookup(family, sensitivity))
}

/// All nine default rules in emission order.
pub fn default_alert_rules() -> Vec<AlertRule> {
    DEFAULT_RULES.iter().map(build).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_high_defaults() {
        let rule = default_rule(AlertFamily::ProbeSuccess, AlertSensitivity::High);
        assert_eq!(rule.threshold, 95.0);
        assert_eq!(rule.family().unwrap().comparison().symbol(), "<");
        assert_eq!(rule.window(), "5m");
        assert_eq!(rule.name, "SyntheticMonitoringCheckFailureAtHighSensitivity");
        assert_eq!(rule.summary.as_deref(), Some("check success below 95%"));
    }

    #[test]
    fn table_is_indexed_by_family_then_sensitivity() {
        for family in AlertFamily::ALL {
            for sensitivity in AlertSensitivity::ALL {
                let def = lookup(family, sensitivity);
                assert_eq!(def.family, family);
                assert_eq!(def.sensitivity, sensitivity);
                let suffix = format!("at{}sensitivity", sensitivity.as_str());
                assert!(def.name.to_lowercase().ends_with(&suffix));
            }
        }
    }

    #[test]
    fn lower_tiers_are_more_lenient() {
        let t = |f, s| default_threshold(f, s);
        use AlertSensitivity::*;
        assert!(t(AlertFamily::ProbeDuration, High) < t(AlertFamily::ProbeDuration, Low));
        assert!(t(AlertFamily::ProbeSuccess, High) > t(AlertFamily::ProbeSuccess, Low));
        assert!(t(AlertFamily::SslCertExpiry, High) > t(AlertFamily::SslCertExpiry, Low));
    }

    #[test]
    fn nine_defaults_in_emission_order() {
        let rules = default_alert_rules();
        assert_eq!(rules.len(), 9);
        let families: Vec<_> = rules.iter().map(|r| r.family().unwrap()).collect();
        assert_eq!(&families[0..3], &[AlertFamily::ProbeDuration; 3]);
        assert_eq!(&families[3..6], &[AlertFamily::ProbeSuccess; 3]);
        assert_eq!(&families[6..9], &[AlertFamily::SslCertExpiry; 3]);
        assert_eq!(rules[4].sensitivity(), Some(AlertSensitivity::Medium));
    }
}
