use synthalert_common::{RuleKey, ValidationError};

/// An edit operation was not allowed in the current session state.
#[derive(Debug, Clone, PartialEq)]
pub enum CoordinatorError {
    /// Operation needs a loaded rule set; carries the current state name.
    InvalidState(&'static str),
    NotEditing,
    UnknownRule(RuleKey),
    NoSuchIndex(usize),
    /// A confirmed draft was not the one currently open.
    DraftMismatch,
    /// Only rules generated from a family template can be reset.
    NotTemplated(RuleKey),
    Invalid(ValidationError),
}

impl std::fmt::Display for CoordinatorError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidState(state) => write!(f, "not allowed while {state}"),
            Self::NotEditing => write!(f, "no rule is open for editing"),
            Self::UnknownRule(key) => write!(f, "unknown rule {key}"),
            Self::NoSuchIndex(index) => write!(f, "no rule at position {index}"),
            Self::DraftMismatch => write!(f, "draft does not belong to the open edit"),
            Self::NotTemplated(key) => write!(f, "rule {key} has no default to restore"),
            Self::Invalid(e) => write!(f, "invalid rule: {e}"),
        }
    }
}

impl std::error::Error for CoordinatorError {}

impl From<ValidationError> for CoordinatorError {
    fn from(e: ValidationError) -> Self {
        Self::Invalid(e)
    }
}
