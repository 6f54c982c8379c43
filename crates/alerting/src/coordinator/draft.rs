use synthalert_common::{
    parse_window, render_rule, validate_rule, AlertRule, RuleKey, TimeUnit, ValidationError,
    WireAlertRule,
};

/// Detached working copy of one rule.
///
/// Edits never touch the coordinator's collection; the draft is merged back by
/// the identity it was opened with when confirmed.
#[derive(Debug, Clone, PartialEq)]
pub struct RuleDraft {
    origin: Option<RuleKey>,
    /// Position the rule was opened from.
    slot: Option<usize>,
    rule: AlertRule,
}

impl RuleDraft {
    pub(crate) fn new(origin: Option<RuleKey>, rule: AlertRule) -> Self {
        Self {
            origin,
            slot: None,
            rule,
        }
    }

    pub(crate) fn at(slot: usize, rule: AlertRule) -> Self {
        Self {
            origin: Some(rule.key()),
            slot: Some(slot),
            rule,
        }
    }

    pub fn origin(&self) -> Option<&RuleKey> {
        self.origin.as_ref()
    }

    pub fn rule(&self) -> &AlertRule {
        &self.rule
    }

    pub fn rule_mut(&mut self) -> &mut AlertRule {
        &mut self.rule
    }

    pub fn rename(&mut self, name: impl Into<String>) {
        self.rule.name = name.into();
    }

    pub fn set_threshold(&mut self, threshold: f64) {
        self.rule.threshold = threshold;
    }

    pub fn set_window(&mut self, count: u32, unit: TimeUnit) {
        self.rule.time_count = count;
        self.rule.time_unit = unit;
    }

    /// Accepts the wire spelling, e.g. `"2s"`.
    pub fn set_window_str(&mut self, window: &str) -> Result<(), ValidationError> {
        let (count, unit) = parse_window(window)?;
        self.set_window(count, unit);
        Ok(())
    }

    pub fn set_label(&mut self, name: &str, value: impl Into<String>) {
        self.rule.labels.set(name, value);
    }

    pub fn remove_label(&mut self, name: &str) -> bool {
        self.rule.labels.remove(name).is_some()
    }

    pub fn set_annotation(&mut self, name: &str, value: impl Into<String>) {
        self.rule.annotations.set(name, value);
    }

    pub fn remove_annotation(&mut self, name: &str) -> bool {
        self.rule.annotations.remove(name).is_some()
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_rule(&self.rule)
    }

    /// The wire form the rule would be saved as.
    pub fn preview(&self) -> Result<WireAlertRule, ValidationError> {
        render_rule(&self.rule)
    }

    pub(crate) fn into_parts(self) -> (Option<RuleKey>, Option<usize>, AlertRule) {
        (self.origin, self.slot, self.rule)
    }
}
