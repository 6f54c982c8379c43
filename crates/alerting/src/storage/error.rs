use std::time::Duration;

use synthalert_common::ValidationError;

/// Initial load of the rule set failed.
#[derive(Debug)]
pub enum FetchError {
    Transport(String),
    Rejected(u16),
    Decode(String),
    /// Reload attempted while a rule is being edited or saved.
    Busy,
}

impl std::fmt::Display for FetchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Transport(e) => write!(f, "transport: {e}"),
            Self::Rejected(code) => write!(f, "rejected with status {code}"),
            Self::Decode(e) => write!(f, "decode: {e}"),
            Self::Busy => write!(f, "rule set is being edited or saved"),
        }
    }
}

impl std::error::Error for FetchError {}

/// Submitting the rule set failed. The in-memory collection is untouched.
#[derive(Debug)]
pub enum PersistError {
    Transport(String),
    Rejected(u16),
    Encode(String),
    Timeout(Duration),
    SaveInProgress,
    NotReady,
    Invalid {
        rule: String,
        error: ValidationError,
    },
}

impl std::fmt::Display for PersistError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Transport(e) => write!(f, "transport: {e}"),
            Self::Rejected(code) => write!(f, "rejected with status {code}"),
            Self::Encode(e) => write!(f, "encode: {e}"),
            Self::Timeout(d) => write!(f, "save timed out after {}s", d.as_secs()),
            Self::SaveInProgress => write!(f, "a save is already in progress"),
            Self::NotReady => write!(f, "rule set has not been loaded or is being edited"),
            Self::Invalid { rule, error } => write!(f, "rule '{rule}': {error}"),
        }
    }
}

impl std::error::Error for PersistError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        assert!(FetchError::Rejected(503).to_string().contains("503"));
        assert!(PersistError::Timeout(Duration::from_secs(30))
            .to_string()
            .contains("30s"));
        let invalid = PersistError::Invalid {
            rule: "A".into(),
            error: ValidationError::EmptyName,
        };
        assert_eq!(invalid.to_string(), "rule 'A': alert name must not be empty");
    }
}
