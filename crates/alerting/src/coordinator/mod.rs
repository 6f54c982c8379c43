mod draft;
mod error;
mod session;
mod state;

pub use draft::RuleDraft;
pub use error::CoordinatorError;
pub use session::{RuleSetCoordinator, DEFAULT_SAVE_TIMEOUT};
pub use state::{SessionEvent, SessionState};
