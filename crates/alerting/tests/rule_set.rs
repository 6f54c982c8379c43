use std::time::Duration;

use serde_json::json;

use synthalert_alerting::coordinator::{RuleSetCoordinator, SessionState};
use synthalert_alerting::storage::{FetchError, InMemoryRuleStorage, PersistError};
use synthalert_common::recording::{
    PROBE_DURATION_RECORDING_EXPR, PROBE_DURATION_RECORDING_METRIC, PROBE_SUCCESS_RECORDING_EXPR,
    PROBE_SUCCESS_RECORDING_METRIC, SSL_CERT_VALIDITY_RECORDING_EXPR,
    SSL_CERT_VALIDITY_RECORDING_METRIC,
};
use synthalert_common::{AlertFamily, AlertSensitivity, RuleKey};

const DURATION_DESCRIPTION: &str = r#"{{ $labels.check_name }} check, job {{ $labels.job }}, instance {{ $labels.instance }}, on probe {{ $labels.probe }} has a duration of {{ printf "%.3f" $value }} seconds."#;
const SUCCESS_DESCRIPTION: &str = r#"check job {{ $labels.job }} instance {{ $labels.instance }} has a success rate of {{ printf "%.1f" $value }}%."#;
const SSL_DESCRIPTION: &str = r#"SSL certificate for instance {{ $labels.instance }} and job {{ $labels.job }} is expiring in {{ printf "%.1f" $value }} days."#;

fn alert(name: &str, description: &str, summary: &str, expr: &str) -> serde_json::Value {
    json!({
        "alert": name,
        "annotations": { "description": description, "summary": summary },
        "expr": expr,
        "for": "5m",
        "labels": { "namespace": "synthetic_monitoring" },
    })
}

fn success_key() -> RuleKey {
    RuleKey {
        name: "SyntheticMonitoringCheckFailureAtHighSensitivity".into(),
        family: Some(AlertFamily::ProbeSuccess),
        sensitivity: Some(AlertSensitivity::High),
    }
}

#[tokio::test]
async fn populate_edit_and_save_default_rules() {
    let storage = InMemoryRuleStorage::new();
    let mut coordinator = RuleSetCoordinator::new();

    assert_eq!(coordinator.load(&storage).await.unwrap(), 0);
    coordinator.populate_defaults().unwrap();

    let mut draft = coordinator.open_rule(&success_key()).unwrap();
    draft.rename("A different name");
    draft.set_threshold(25.0);
    draft.set_window_str("2s").unwrap();
    draft.set_label("a_label_name", "a_label_value");
    draft.set_annotation("an_annotation_name", "an annotation value");
    coordinator.confirm_edit(draft).unwrap();

    coordinator.submit(&storage).await.unwrap();
    assert_eq!(storage.persist_calls(), 1);

    let saved = serde_json::to_value(storage.rules()).unwrap();
    let expected = json!([
        { "expr": PROBE_SUCCESS_RECORDING_EXPR, "record": PROBE_SUCCESS_RECORDING_METRIC },
        { "expr": SSL_CERT_VALIDITY_RECORDING_EXPR, "record": SSL_CERT_VALIDITY_RECORDING_METRIC },
        { "expr": PROBE_DURATION_RECORDING_EXPR, "record": PROBE_DURATION_RECORDING_METRIC },
        alert(
            "SyntheticMonitoringProbeDurationAtHighSensitivity",
            DURATION_DESCRIPTION,
            "probe duration above 100 ms",
            r#"instance_job_probe_severity:probe_all_duration_seconds:mean5m{alert_sensitivity="high"} * 1000 > 100"#,
        ),
        alert(
            "SyntheticMonitoringProbeDurationAtMediumSensitivity",
            DURATION_DESCRIPTION,
            "probe duration above 150 ms",
            r#"instance_job_probe_severity:probe_all_duration_seconds:mean5m{alert_sensitivity="medium"} * 1000 > 150"#,
        ),
        alert(
            "SyntheticMonitoringProbeDurationAtLowSensitivity",
            DURATION_DESCRIPTION,
            "probe duration above 200 ms",
            r#"instance_job_probe_severity:probe_all_duration_seconds:mean5m{alert_sensitivity="low"} * 1000 > 200"#,
        ),
        {
            "alert": "A different name",
            "annotations": {
                "an_annotation_name": "an annotation value",
                "description": SUCCESS_DESCRIPTION,
                "summary": "check success below 95%",
            },
            "expr": r#"instance_job_severity:probe_success:mean5m{alert_sensitivity="high"} < 25"#,
            "for": "2s",
            "labels": {
                "a_label_name": "a_label_value",
                "namespace": "synthetic_monitoring",
            },
        },
        alert(
            "SyntheticMonitoringCheckFailureAtMediumSensitivity",
            SUCCESS_DESCRIPTION,
            "check success below 90%",
            r#"instance_job_severity:probe_success:mean5m{alert_sensitivity="medium"} < 90"#,
        ),
        alert(
            "SyntheticMonitoringCheckFailureAtLowSensitivity",
            SUCCESS_DESCRIPTION,
            "check success below 75%",
            r#"instance_job_severity:probe_success:mean5m{alert_sensitivity="low"} < 75"#,
        ),
        alert(
            "SyntheticMonitoringSSLCertExpiryAtHighSensitivity",
            SSL_DESCRIPTION,
            "SSL certificate expiration in 90 days",
            r#"instance_job_severity:ssl_cert_validity_days:min{alert_sensitivity="high"} < 90"#,
        ),
        alert(
            "SyntheticMonitoringSSLCertExpiryAtMediumSensitivity",
            SSL_DESCRIPTION,
            "SSL certificate expiration in 60 days",
            r#"instance_job_severity:ssl_cert_validity_days:min{alert_sensitivity="medium"} < 60"#,
        ),
        alert(
            "SyntheticMonitoringSSLCertExpiryAtLowSensitivity",
            SSL_DESCRIPTION,
            "SSL certificate expiration in 30 days",
            r#"instance_job_severity:ssl_cert_validity_days:min{alert_sensitivity="low"} < 30"#,
        ),
    ]);
    assert_eq!(saved, expected);
}

#[tokio::test]
async fn saved_rules_load_back_unchanged() {
    let storage = InMemoryRuleStorage::new();
    let mut first = RuleSetCoordinator::new();
    first.load(&storage).await.unwrap();
    first.populate_defaults().unwrap();
    let mut draft = first.open_rule(&success_key()).unwrap();
    draft.set_threshold(99.5);
    first.confirm_edit(draft).unwrap();
    first.submit(&storage).await.unwrap();

    let mut second = RuleSetCoordinator::new();
    assert_eq!(second.load(&storage).await.unwrap(), 9);
    assert_eq!(second.rules(), first.rules());
    assert_eq!(second.wire_rules().unwrap(), storage.rules());
}

#[tokio::test]
async fn rejected_save_keeps_the_collection() {
    let storage = InMemoryRuleStorage::new();
    let mut coordinator = RuleSetCoordinator::new();
    coordinator.populate_defaults().unwrap();
    let before = coordinator.rules().to_vec();

    storage.reject_with(Some(500));
    let err = coordinator.submit(&storage).await.unwrap_err();
    assert!(matches!(err, PersistError::Rejected(500)));
    assert_eq!(coordinator.state(), &SessionState::Loaded);
    assert_eq!(coordinator.rules(), before.as_slice());
    assert!(storage.rules().is_empty());

    storage.reject_with(None);
    coordinator.submit(&storage).await.unwrap();
    assert_eq!(storage.rules().len(), 12);
    assert_eq!(storage.persist_calls(), 2);
}

#[tokio::test]
async fn slow_save_times_out() {
    let storage = InMemoryRuleStorage::new();
    storage.set_persist_delay(Some(Duration::from_secs(5)));
    let mut coordinator = RuleSetCoordinator::new().with_save_timeout(Duration::from_millis(50));
    coordinator.populate_defaults().unwrap();

    let err = coordinator.submit(&storage).await.unwrap_err();
    assert!(matches!(err, PersistError::Timeout(_)));
    assert_eq!(coordinator.state(), &SessionState::Loaded);
    assert_eq!(coordinator.rules().len(), 9);
}

#[tokio::test]
async fn unavailable_storage_leaves_session_empty() {
    let storage = InMemoryRuleStorage::new();
    storage.set_fetch_unavailable(true);
    let mut coordinator = RuleSetCoordinator::new();

    assert!(coordinator.load(&storage).await.is_err());
    assert_eq!(coordinator.state(), &SessionState::Empty);
    assert!(matches!(
        coordinator.submit(&storage).await,
        Err(PersistError::NotReady)
    ));
}

#[tokio::test]
async fn load_is_refused_mid_edit() {
    let storage = InMemoryRuleStorage::new();
    let mut coordinator = RuleSetCoordinator::new();
    coordinator.populate_defaults().unwrap();
    let _draft = coordinator.open_rule(&success_key()).unwrap();

    assert!(matches!(
        coordinator.load(&storage).await,
        Err(FetchError::Busy)
    ));
}
