use serde::{Deserialize, Serialize};

use crate::family::AlertFamily;

pub const PROBE_SUCCESS_RECORDING_METRIC: &str = "instance_job_severity:probe_success:mean5m";
pub const PROBE_DURATION_RECORDING_METRIC: &str =
    "instance_job_probe_severity:probe_all_duration_seconds:mean5m";
pub const SSL_CERT_VALIDITY_RECORDING_METRIC: &str =
    "instance_job_severity:ssl_cert_validity_days:min";

// Each aggregation joins against sm_check_info to carry the check's
// alert_sensitivity label onto the derived series.
pub const PROBE_SUCCESS_RECORDING_EXPR: &str = r#"(sum without(probe, config_version) (rate(probe_all_success_sum[5m]) *
on(instance, job, probe) group_left(alert_sensitivity) max by(instance, job, probe, alert_sensitivity) (sm_check_info{alert_sensitivity!=""})) /
sum without(probe, config_version) (rate(probe_all_success_count[5m]) *
on(instance, job, probe) group_left(alert_sensitivity) max by(instance, job, probe, alert_sensitivity) (sm_check_info{alert_sensitivity!=""}))) * 100"#;

pub const PROBE_DURATION_RECORDING_EXPR: &str = r#"sum without(config_version) (rate(probe_all_duration_seconds_sum[5m]) *
on(instance, job, probe) group_left(alert_sensitivity) max by(instance, job, probe, alert_sensitivity) (sm_check_info{alert_sensitivity!=""})) /
sum without(config_version) (rate(probe_all_duration_seconds_count[5m]) *
on(instance, job, probe) group_left(alert_sensitivity) max by(instance, job, probe, alert_sensitivity) (sm_check_info{alert_sensitivity!=""}))"#;

pub const SSL_CERT_VALIDITY_RECORDING_EXPR: &str = r#"min without(probe, config_version) ((probe_ssl_earliest_cert_expiry - time()) / 86400 *
on(instance, job, probe) group_left(alert_sensitivity) max by(instance, job, probe, alert_sensitivity) (sm_check_info{alert_sensitivity!=""}))"#;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordingRule {
    pub record: String,
    pub expr: String,
}

impl RecordingRule {
    fn new(record: &str, expr: &str) -> Self {
        Self {
            record: record.to_string(),
            expr: expr.to_string(),
        }
    }
}

/// The series an alert family's expression queries.
pub fn recording_metric(family: AlertFamily) -> &'static str {
    match family {
        AlertFamily::ProbeSuccess => PROBE_SUCCESS_RECORDING_METRIC,
        AlertFamily::ProbeDuration => PROBE_DURATION_RECORDING_METRIC,
        AlertFamily::SslCertExpiry => SSL_CERT_VALIDITY_RECORDING_METRIC,
    }
}

/// The fixed recording rules, in the order they are persisted.
pub fn recording_rules() -> [RecordingRule; 3] {
    [
        RecordingRule::new(PROBE_SUCCESS_RECORDING_METRIC, PROBE_SUCCESS_RECORDING_EXPR),
        RecordingRule::new(
            SSL_CERT_VALIDITY_RECORDING_METRIC,
            SSL_CERT_VALIDITY_RECORDING_EXPR,
        ),
        RecordingRule::new(PROBE_DURATION_RECORDING_METRIC, PROBE_DURATION_RECORDING_EXPR),
    ]
}
