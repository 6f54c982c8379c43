use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use synthalert_common::WireRule;

use super::{FetchError, PersistError, RuleStorage};

#[derive(Default)]
struct Inner {
    rules: Vec<WireRule>,
    persist_calls: usize,
    reject_status: Option<u16>,
    persist_delay: Option<Duration>,
    fetch_unavailable: bool,
}

/// Process-local rule storage. Coordinator and save-path tests run against it,
/// with injectable rejection, delay and unavailability.
#[derive(Clone, Default)]
pub struct InMemoryRuleStorage {
    inner: Arc<Mutex<Inner>>,
}

impl InMemoryRuleStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_rules(rules: Vec<WireRule>) -> Self {
        let storage = Self::new();
        storage.lock().rules = rules;
        storage
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn rules(&self) -> Vec<WireRule> {
        self.lock().rules.clone()
    }

    pub fn persist_calls(&self) -> usize {
        self.lock().persist_calls
    }

    /// Makes every following save fail with `status` (`None` to accept again).
    pub fn reject_with(&self, status: Option<u16>) {
        self.lock().reject_status = status;
    }

    pub fn set_persist_delay(&self, delay: Option<Duration>) {
        self.lock().persist_delay = delay;
    }

    pub fn set_fetch_unavailable(&self, unavailable: bool) {
        self.lock().fetch_unavailable = unavailable;
    }
}

impl RuleStorage for InMemoryRuleStorage {
    async fn fetch_rules(&self) -> Result<Vec<WireRule>, FetchError> {
        let inner = self.lock();
        if inner.fetch_unavailable {
            return Err(FetchError::Transport("storage unavailable".into()));
        }
        Ok(inner.rules.clone())
    }

    async fn persist_rules(&self, rules: &[WireRule]) -> Result<(), PersistError> {
        let delay = {
            let mut inner = self.lock();
            inner.persist_calls += 1;
            inner.persist_delay
        };

        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        let mut inner = self.lock();
        if let Some(status) = inner.reject_status {
            return Err(PersistError::Rejected(status));
        }
        inner.rules = rules.to_vec();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use synthalert_common::recording_rules;

    fn sample() -> Vec<WireRule> {
        recording_rules().into_iter().map(WireRule::from).collect()
    }

    #[tokio::test]
    async fn persist_then_fetch() {
        let storage = InMemoryRuleStorage::new();
        storage.persist_rules(&sample()).await.unwrap();
        assert_eq!(storage.fetch_rules().await.unwrap(), sample());
        assert_eq!(storage.persist_calls(), 1);
    }

    #[tokio::test]
    async fn rejection_keeps_previous_rules() {
        let storage = InMemoryRuleStorage::with_rules(sample());
        storage.reject_with(Some(400));
        let err = storage.persist_rules(&[]).await.unwrap_err();
        assert!(matches!(err, PersistError::Rejected(400)));
        assert_eq!(storage.rules().len(), 3);
    }

    #[tokio::test]
    async fn unavailable_fetch_fails() {
        let storage = InMemoryRuleStorage::new();
        storage.set_fetch_unavailable(true);
        assert!(matches!(
            storage.fetch_rules().await,
            Err(FetchError::Transport(_))
        ));
    }

    #[tokio::test]
    async fn clones_share_state() {
        let storage = InMemoryRuleStorage::new();
        let other = storage.clone();
        other.persist_rules(&sample()).await.unwrap();
        assert_eq!(storage.rules().len(), 3);
    }
}
