use std::time::Duration;

use synthalert_common::{
    default_alert_rules, default_rule, parse_wire_rule, recording_rules, render_rule, AlertFamily,
    AlertRule, AlertSensitivity, RuleKey, RuleSource, WireRule,
};

use super::draft::RuleDraft;
use super::error::CoordinatorError;
use super::state::{SessionEvent, SessionState};
use crate::storage::{FetchError, PersistError, RuleStorage};

pub const DEFAULT_SAVE_TIMEOUT: Duration = Duration::from_secs(30);

/// Owns the working rule set of one alerting session.
pub struct RuleSetCoordinator {
    state: SessionState,
    rules: Vec<AlertRule>,
    save_timeout: Duration,
}

impl Default for RuleSetCoordinator {
    fn default() -> Self {
        Self::new()
    }
}

impl RuleSetCoordinator {
    pub fn new() -> Self {
        Self {
            state: SessionState::Empty,
            rules: Vec::new(),
            save_timeout: DEFAULT_SAVE_TIMEOUT,
        }
    }

    pub fn with_save_timeout(mut self, timeout: Duration) -> Self {
        self.save_timeout = timeout;
        self
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn rules(&self) -> &[AlertRule] {
        &self.rules
    }

    pub fn find(&self, key: &RuleKey) -> Option<&AlertRule> {
        self.rules.iter().find(|r| key.matches(r))
    }

    /// Looks a rule up by alert name alone; the first match wins.
    pub fn find_by_name(&self, name: &str) -> Option<&AlertRule> {
        self.rules.iter().find(|r| r.name == name)
    }

    fn apply(&mut self, event: SessionEvent) -> Result<(), CoordinatorError> {
        match self.state.transition(event) {
            Some(next) => {
                self.state = next;
                Ok(())
            }
            None => Err(CoordinatorError::InvalidState(self.state.name())),
        }
    }

    fn rule_at(&self, index: usize) -> Result<&AlertRule, CoordinatorError> {
        self.rules
            .get(index)
            .ok_or(CoordinatorError::NoSuchIndex(index))
    }

    fn position(&self, key: &RuleKey) -> Result<usize, CoordinatorError> {
        self.rules
            .iter()
            .position(|r| key.matches(r))
            .ok_or_else(|| CoordinatorError::UnknownRule(key.clone()))
    }

    // ---- Loading ----

    pub async fn load<S: RuleStorage>(&mut self, storage: &S) -> Result<usize, FetchError> {
        if self.state.is_editing() || self.state.is_saving() {
            return Err(FetchError::Busy);
        }
        let wire = storage.fetch_rules().await.inspect_err(|e| {
            tracing::warn!(error = %e, state = self.state.name(), "failed to fetch alert rules");
        })?;
        self.load_rules(wire)
    }

    /// Seeds the collection from stored rules. Recording rules are not kept;
    /// the fixed set is always emitted on save.
    pub fn load_rules(&mut self, wire: Vec<WireRule>) -> Result<usize, FetchError> {
        if self.state.is_editing() || self.state.is_saving() {
            return Err(FetchError::Busy);
        }

        let mut rules = Vec::new();
        for rule in wire {
            match rule {
                WireRule::Alert(alert) => {
                    let parsed = parse_wire_rule(&alert).map_err(|e| {
                        FetchError::Decode(format!("alert '{}': {e}", alert.alert))
                    })?;
                    rules.push(parsed);
                }
                WireRule::Recording(recording) => {
                    tracing::debug!(record = %recording.record, "skipping stored recording rule");
                }
            }
        }

        self.state = self
            .state
            .transition(SessionEvent::Fetched)
            .ok_or(FetchError::Busy)?;
        self.rules = rules;
        tracing::info!(alert_rules = self.rules.len(), "alert rules loaded");
        Ok(self.rules.len())
    }

    // ---- Defaults ----

    /// Replaces every family/tier rule with its default. Custom rules are kept
    /// after the defaults in their current order.
    pub fn populate_defaults(&mut self) -> Result<(), CoordinatorError> {
        self.apply(SessionEvent::Populated)?;

        let custom: Vec<AlertRule> = self.rules.drain(..).filter(|r| r.is_custom()).collect();
        let mut rules = default_alert_rules();
        let kept = custom.len();
        rules.extend(custom);
        self.rules = rules;

        tracing::info!(defaults = self.rules.len() - kept, custom = kept, "default alert rules populated");
        Ok(())
    }

    /// Restores one family/tier rule to its default, in place.
    pub fn reset_rule(&mut self, key: &RuleKey) -> Result<(), CoordinatorError> {
        let idx = self.position(key)?;
        self.reset_rule_at(idx)
    }

    /// Like [`reset_rule`](Self::reset_rule), addressing the rule by position.
    pub fn reset_rule_at(&mut self, index: usize) -> Result<(), CoordinatorError> {
        if self.state != SessionState::Loaded {
            return Err(CoordinatorError::InvalidState(self.state.name()));
        }
        let rule = self.rule_at(index)?;
        let RuleSource::Template {
            family,
            sensitivity,
        } = rule.source
        else {
            return Err(CoordinatorError::NotTemplated(rule.key()));
        };
        tracing::debug!(rule = %rule.key(), index, "alert rule reset to default");
        self.rules[index] = default_rule(family, sensitivity);
        Ok(())
    }

    // ---- Editing ----

    /// Opens a copy of an existing rule.
    pub fn open_rule(&mut self, key: &RuleKey) -> Result<RuleDraft, CoordinatorError> {
        let idx = self.position(key)?;
        self.open_rule_at(idx)
    }

    /// Opens a copy of the rule at `index`. Reaches rules that share their
    /// identity with an earlier one.
    pub fn open_rule_at(&mut self, index: usize) -> Result<RuleDraft, CoordinatorError> {
        let rule = self.rule_at(index)?.clone();
        self.apply(SessionEvent::Open(Some(rule.key())))?;
        Ok(RuleDraft::at(index, rule))
    }

    /// Opens a draft for a new rule seeded from the family/tier default.
    pub fn new_rule(
        &mut self,
        family: AlertFamily,
        sensitivity: AlertSensitivity,
    ) -> Result<RuleDraft, CoordinatorError> {
        self.new_rule_from(default_rule(family, sensitivity))
    }

    /// Opens a draft for a rule that is not in the collection yet.
    pub fn new_rule_from(&mut self, rule: AlertRule) -> Result<RuleDraft, CoordinatorError> {
        self.apply(SessionEvent::Open(None))?;
        Ok(RuleDraft::new(None, rule))
    }

    /// Validates the draft and merges it: it replaces the rule it was opened
    /// from, or is appended when that rule no longer exists. An invalid draft
    /// leaves the session in `Editing`.
    pub fn confirm_edit(&mut self, draft: RuleDraft) -> Result<(), CoordinatorError> {
        let SessionState::Editing { origin } = &self.state else {
            return Err(CoordinatorError::NotEditing);
        };
        if origin.as_ref() != draft.origin() {
            return Err(CoordinatorError::DraftMismatch);
        }
        draft.validate()?;

        let (origin, slot, rule) = draft.into_parts();
        let slot = origin.as_ref().and_then(|key| {
            slot.filter(|&idx| self.rules.get(idx).is_some_and(|r| key.matches(r)))
                .or_else(|| self.rules.iter().position(|r| key.matches(r)))
        });
        match slot {
            Some(idx) => {
                tracing::debug!(rule = %rule.key(), "alert rule updated");
                self.rules[idx] = rule;
            }
            None => {
                tracing::debug!(rule = %rule.key(), "alert rule added");
                self.rules.push(rule);
            }
        }
        self.apply(SessionEvent::Close)
    }

    pub fn cancel_edit(&mut self) -> Result<(), CoordinatorError> {
        if !self.state.is_editing() {
            return Err(CoordinatorError::NotEditing);
        }
        self.apply(SessionEvent::Close)
    }

    pub fn remove_rule(&mut self, key: &RuleKey) -> Result<AlertRule, CoordinatorError> {
        let idx = self.position(key)?;
        self.remove_rule_at(idx)
    }

    pub fn remove_rule_at(&mut self, index: usize) -> Result<AlertRule, CoordinatorError> {
        if self.state != SessionState::Loaded {
            return Err(CoordinatorError::InvalidState(self.state.name()));
        }
        self.rule_at(index)?;
        let removed = self.rules.remove(index);
        tracing::debug!(rule = %removed.key(), index, "alert rule removed");
        Ok(removed)
    }

    // ---- Saving ----

    /// The array a submit would persist: recording rules, then alert rules.
    pub fn wire_rules(&self) -> Result<Vec<WireRule>, PersistError> {
        let mut wire: Vec<WireRule> = recording_rules().into_iter().map(WireRule::from).collect();
        for rule in &self.rules {
            let rendered = render_rule(rule).map_err(|error| PersistError::Invalid {
                rule: rule.name.clone(),
                error,
            })?;
            wire.push(rendered.into());
        }
        Ok(wire)
    }

    /// Enters `Saving` and returns the payload to persist. Fails without a
    /// state change when a save is already running or a rule is invalid.
    pub fn begin_submit(&mut self) -> Result<Vec<WireRule>, PersistError> {
        match self.state {
            SessionState::Saving => return Err(PersistError::SaveInProgress),
            SessionState::Loaded => {}
            _ => return Err(PersistError::NotReady),
        }
        let wire = self.wire_rules()?;
        self.state = SessionState::Saving;
        tracing::debug!(rules = wire.len(), "save started");
        Ok(wire)
    }

    /// Records the outcome of a save started with [`begin_submit`](Self::begin_submit).
    /// The collection is never rolled back.
    pub fn finish_submit(
        &mut self,
        outcome: Result<(), PersistError>,
    ) -> Result<(), PersistError> {
        if let Some(next) = self.state.transition(SessionEvent::EndSave) {
            self.state = next;
        }
        match &outcome {
            Ok(()) => tracing::info!(alert_rules = self.rules.len(), "alert rules saved"),
            Err(e) => tracing::warn!(error = %e, "failed to save alert rules"),
        }
        outcome
    }

    /// Persists the whole rule set with a single storage call, bounded by the
    /// save timeout.
    pub async fn submit<S: RuleStorage>(&mut self, storage: &S) -> Result<(), PersistError> {
        let wire = self.begin_submit()?;
        let outcome = match tokio::time::timeout(self.save_timeout, storage.persist_rules(&wire)).await
        {
            Ok(result) => result,
            Err(_) => Err(PersistError::Timeout(self.save_timeout)),
        };
        self.finish_submit(outcome)
    }
}
