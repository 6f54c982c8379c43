use synthalert_common::RuleKey;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    Empty,
    Loaded,
    /// A draft is open. `origin` is the identity of the rule being edited, or
    /// `None` for a new rule.
    Editing { origin: Option<RuleKey> },
    Saving,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    Fetched,
    Populated,
    Open(Option<RuleKey>),
    Close,
    BeginSave,
    EndSave,
}

impl SessionState {
    /// Next state for `event`, or `None` when the event is not allowed here.
    pub fn transition(&self, event: SessionEvent) -> Option<Self> {
        match (self, event) {
            (Self::Empty | Self::Loaded, SessionEvent::Fetched) => Some(Self::Loaded),
            (Self::Empty | Self::Loaded, SessionEvent::Populated) => Some(Self::Loaded),

            (Self::Loaded, SessionEvent::Open(origin)) => Some(Self::Editing { origin }),
            (Self::Editing { .. }, SessionEvent::Close) => Some(Self::Loaded),

            (Self::Loaded, SessionEvent::BeginSave) => Some(Self::Saving),
            (Self::Saving, SessionEvent::EndSave) => Some(Self::Loaded),

            _ => None,
        }
    }

    pub fn is_saving(&self) -> bool {
        matches!(self, Self::Saving)
    }

    pub fn is_editing(&self) -> bool {
        matches!(self, Self::Editing { .. })
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Empty => "empty",
            Self::Loaded => "loaded",
            Self::Editing { .. } => "editing",
            Self::Saving => "saving",
        }
    }
}
