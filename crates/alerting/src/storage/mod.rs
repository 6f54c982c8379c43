mod error;
mod memory;
mod ruler;

use std::future::Future;

use synthalert_common::WireRule;

pub use error::{FetchError, PersistError};
pub use memory::InMemoryRuleStorage;
pub use ruler::RulerClient;

/// Remote owner of the rule set. Saves are wholesale, never incremental.
pub trait RuleStorage: Send + Sync {
    fn fetch_rules(&self) -> impl Future<Output = Result<Vec<WireRule>, FetchError>> + Send;

    fn persist_rules(
        &self,
        rules: &[WireRule],
    ) -> impl Future<Output = Result<(), PersistError>> + Send;
}
