use std::collections::HashSet;
use std::fmt;

use crate::defaults::{DEFAULT_TIME_COUNT, DEFAULT_TIME_UNIT};
use crate::family::TimeUnit;
use crate::labels::LabelSet;
use crate::rule::{
    AlertRule, RuleSource, DESCRIPTION_ANNOTATION, NAMESPACE_LABEL, NAMESPACE_VALUE,
    SUMMARY_ANNOTATION,
};
use crate::template;
use crate::wire::WireAlertRule;

/// A single malformed field of an alert rule.
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    EmptyName,
    NonFiniteThreshold,
    InvalidTimeCount,
    InvalidWindow(String),
    EmptyExpr,
    EmptyLabelName,
    DuplicateLabel(String),
    ReservedLabel(String),
    EmptyAnnotationName,
    DuplicateAnnotation(String),
    ReservedAnnotation(String),
}

impl ValidationError {
    /// Form field the error belongs to.
    pub fn field(&self) -> &'static str {
        match self {
            Self::EmptyName => "name",
            Self::NonFiniteThreshold => "threshold",
            Self::InvalidTimeCount | Self::InvalidWindow(_) => "timeCount",
            Self::EmptyExpr => "expr",
            Self::EmptyLabelName | Self::DuplicateLabel(_) | Self::ReservedLabel(_) => "labels",
            Self::EmptyAnnotationName
            | Self::DuplicateAnnotation(_)
            | Self::ReservedAnnotation(_) => "annotations",
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "alert name must not be empty"),
            Self::NonFiniteThreshold => write!(f, "threshold must be a finite number"),
            Self::InvalidTimeCount => write!(f, "time count must be a positive integer"),
            Self::InvalidWindow(w) => write!(f, "invalid evaluation window '{w}'"),
            Self::EmptyExpr => write!(f, "custom rule expression must not be empty"),
            Self::EmptyLabelName => write!(f, "label name must not be empty"),
            Self::DuplicateLabel(name) => write!(f, "duplicate label '{name}'"),
            Self::ReservedLabel(name) => write!(f, "label '{name}' is managed automatically"),
            Self::EmptyAnnotationName => write!(f, "annotation name must not be empty"),
            Self::DuplicateAnnotation(name) => write!(f, "duplicate annotation '{name}'"),
            Self::ReservedAnnotation(name) => {
                write!(f, "annotation '{name}' is managed automatically")
            }
        }
    }
}

impl std::error::Error for ValidationError {}

fn check_entries(
    entries: &LabelSet,
    reserved: &[&str],
    empty: ValidationError,
    duplicate: fn(String) -> ValidationError,
    collides: fn(String) -> ValidationError,
) -> Result<(), ValidationError> {
    let mut seen = HashSet::new();
    for name in entries.keys() {
        if name.trim().is_empty() {
            return Err(empty);
        }
        if reserved.contains(&name) {
            return Err(collides(name.to_string()));
        }
        if !seen.insert(name) {
            return Err(duplicate(name.to_string()));
        }
    }
    Ok(())
}

pub fn validate_rule(rule: &AlertRule) -> Result<(), ValidationError> {
    if rule.name.trim().is_empty() {
        return Err(ValidationError::EmptyName);
    }
    if !rule.threshold.is_finite() {
        return Err(ValidationError::NonFiniteThreshold);
    }
    if rule.time_count == 0 {
        return Err(ValidationError::InvalidTimeCount);
    }
    if let RuleSource::Custom { expr } = &rule.source {
        if expr.trim().is_empty() {
            return Err(ValidationError::EmptyExpr);
        }
    }
    check_entries(
        &rule.labels,
        &[NAMESPACE_LABEL],
        ValidationError::EmptyLabelName,
        ValidationError::DuplicateLabel,
        ValidationError::ReservedLabel,
    )?;
    check_entries(
        &rule.annotations,
        &[DESCRIPTION_ANNOTATION, SUMMARY_ANNOTATION],
        ValidationError::EmptyAnnotationName,
        ValidationError::DuplicateAnnotation,
        ValidationError::ReservedAnnotation,
    )
}

/// Validates `rule` and produces its wire form.
pub fn render_rule(rule: &AlertRule) -> Result<WireAlertRule, ValidationError> {
    validate_rule(rule)?;

    let expr = match &rule.source {
        RuleSource::Template {
            family,
            sensitivity,
        } => template::alert_expr(*family, *sensitivity, rule.threshold),
        RuleSource::Custom { expr } => expr.clone(),
    };

    let mut labels = LabelSet::new();
    labels.push(NAMESPACE_LABEL, NAMESPACE_VALUE);
    for (k, v) in rule.labels.iter() {
        labels.push(k, v);
    }

    let mut annotations = LabelSet::new();
    if let Some(description) = &rule.description {
        annotations.push(DESCRIPTION_ANNOTATION, description.as_str());
    }
    if let Some(summary) = &rule.summary {
        annotations.push(SUMMARY_ANNOTATION, summary.as_str());
    }
    for (k, v) in rule.annotations.iter() {
        annotations.push(k, v);
    }

    Ok(WireAlertRule {
        alert: rule.name.clone(),
        expr,
        for_duration: rule.window(),
        labels,
        annotations,
    })
}

/// Splits a `for` duration such as `"5m"` into count and unit.
pub fn parse_window(window: &str) -> Result<(u32, TimeUnit), ValidationError> {
    let invalid = || ValidationError::InvalidWindow(window.to_string());
    let unit = window
        .chars()
        .last()
        .and_then(TimeUnit::from_suffix)
        .ok_or_else(invalid)?;
    let digits = &window[..window.len() - 1];
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }
    let count: u32 = digits.parse().map_err(|_| invalid())?;
    if count == 0 {
        return Err(ValidationError::InvalidTimeCount);
    }
    Ok((count, unit))
}

/// Rebuilds an editable rule from its stored form.
///
/// Template-shaped expressions recover family, tier and threshold; any other
/// expression becomes a custom rule whose threshold is `0`. A rule stored
/// without `for` gets the default window.
pub fn parse_wire_rule(wire: &WireAlertRule) -> Result<AlertRule, ValidationError> {
    let (time_count, time_unit) = if wire.for_duration.trim().is_empty() {
        (DEFAULT_TIME_COUNT, DEFAULT_TIME_UNIT)
    } else {
        parse_window(&wire.for_duration)?
    };

    let (source, threshold) = match template::parse_alert_expr(&wire.expr) {
        Some((family, sensitivity, threshold)) => (
            RuleSource::Template {
                family,
                sensitivity,
            },
            threshold,
        ),
        None => (
            RuleSource::Custom {
                expr: wire.expr.clone(),
            },
            0.0,
        ),
    };

    let labels = wire
        .labels
        .iter()
        .filter(|(k, _)| *k != NAMESPACE_LABEL)
        .collect();
    let annotations = wire
        .annotations
        .iter()
        .filter(|(k, _)| *k != DESCRIPTION_ANNOTATION && *k != SUMMARY_ANNOTATION)
        .collect();

    Ok(AlertRule {
        name: wire.alert.clone(),
        source,
        threshold,
        time_count,
        time_unit,
        labels,
        annotations,
        description: wire
            .annotations
            .get(DESCRIPTION_ANNOTATION)
            .map(str::to_string),
        summary: wire.annotations.get(SUMMARY_ANNOTATION).map(str::to_string),
    })
}
