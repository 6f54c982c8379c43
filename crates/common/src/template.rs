use crate::family::{AlertFamily, AlertSensitivity};
use crate::recording::recording_metric;

const PROBE_DURATION_DESCRIPTION: &str = r#"{{ $labels.check_name }} check, job {{ $labels.job }}, instance {{ $labels.instance }}, on probe {{ $labels.probe }} has a duration of {{ printf "%.3f" $value }} seconds."#;
const PROBE_SUCCESS_DESCRIPTION: &str = r#"check job {{ $labels.job }} instance {{ $labels.instance }} has a success rate of {{ printf "%.1f" $value }}%."#;
const SSL_CERT_EXPIRY_DESCRIPTION: &str = r#"SSL certificate for instance {{ $labels.instance }} and job {{ $labels.job }} is expiring in {{ printf "%.1f" $value }} days."#;

/// Duration thresholds are in milliseconds; the recording series is in seconds.
const DURATION_SCALE: &str = " * 1000";

/// Shortest decimal form: `95`, `0.5`, `12.25`.
pub fn format_threshold(value: f64) -> String {
    format!("{value}")
}

pub fn description(family: AlertFamily) -> &'static str {
    match family {
        AlertFamily::ProbeDuration => PROBE_DURATION_DESCRIPTION,
        AlertFamily::ProbeSuccess => PROBE_SUCCESS_DESCRIPTION,
        AlertFamily::SslCertExpiry => SSL_CERT_EXPIRY_DESCRIPTION,
    }
}

pub fn summary(family: AlertFamily, threshold: f64) -> String {
    let t = format_threshold(threshold);
    match family {
        AlertFamily::ProbeDuration => format!("probe duration above {t} ms"),
        AlertFamily::ProbeSuccess => format!("check success below {t}%"),
        AlertFamily::SslCertExpiry => format!("SSL certificate expiration in {t} days"),
    }
}

pub fn alert_expr(family: AlertFamily, sensitivity: AlertSensitivity, threshold: f64) -> String {
    let scale = match family {
        AlertFamily::ProbeDuration => DURATION_SCALE,
        _ => "",
    };
    format!(
        "{}{{alert_sensitivity=\"{}\"}}{} {} {}",
        recording_metric(family),
        sensitivity,
        scale,
        family.comparison().symbol(),
        format_threshold(threshold),
    )
}

/// Recovers `(family, sensitivity, threshold)` from an expression built by
/// [`alert_expr`]. Anything else yields `None`.
pub fn parse_alert_expr(expr: &str) -> Option<(AlertFamily, AlertSensitivity, f64)> {
    let expr = expr.trim();
    AlertFamily::ALL.into_iter().find_map(|family| {
        let rest = expr.strip_prefix(recording_metric(family))?;
        let rest = rest.strip_prefix("{alert_sensitivity=\"")?;
        let (sensitivity, rest) = rest.split_once("\"}")?;
        let sensitivity: AlertSensitivity = sensitivity.parse().ok()?;

        let rest = match family {
            AlertFamily::ProbeDuration => rest.strip_prefix(DURATION_SCALE)?,
            _ => rest,
        };
        let rest = rest.strip_prefix(' ')?;
        let rest = rest.strip_prefix(family.comparison().symbol())?;
        let threshold: f64 = rest.strip_prefix(' ')?.parse().ok()?;
        threshold.is_finite().then_some((family, sensitivity, threshold))
    })
}
