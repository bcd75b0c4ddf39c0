//! Per-user preference store over a [`KeyValueStore`]

use chrono::Utc;
use log::{error, warn};
use std::sync::Arc;

use super::pending::PendingAction;
use super::{
    key, DEFAULT_SEPARATOR, DEFAULT_WORD_COUNT, PENDING_ACTION_PREFIX, PENDING_ACTION_TTL,
    PREFERENCE_TTL_DAYS, SEPARATOR_PREFIX, WORDLIST_PREFIX, WORD_COUNT_PREFIX,
};
use crate::features::generator::PassphraseConfig;
use crate::features::wordlists::WordlistId;
use crate::storage::{self, Expiry, KeyValueStore, StoreError};

/// Effective settings for one user with defaults already applied
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserPreferences {
    pub user_id: u64,
    pub wordlist: WordlistId,
    pub word_count: usize,
    pub separator: String,
}

impl UserPreferences {
    pub fn defaults(user_id: u64) -> Self {
        Self {
            user_id,
            wordlist: WordlistId::DEFAULT,
            word_count: DEFAULT_WORD_COUNT,
            separator: DEFAULT_SEPARATOR.to_string(),
        }
    }

    pub fn passphrase_config(&self) -> PassphraseConfig {
        PassphraseConfig::new(self.wordlist, self.word_count, self.separator.clone())
    }
}

#[derive(Clone)]
pub struct UserConfigStore {
    backend: Arc<dyn KeyValueStore>,
}

fn check_user(user_id: u64) -> Result<(), StoreError> {
    if user_id == 0 {
        return Err(StoreError::InvalidArgument("user id must not be zero".to_string()));
    }
    Ok(())
}

fn preference_expiry() -> Expiry {
    Expiry::At(Utc::now() + chrono::Duration::days(PREFERENCE_TTL_DAYS))
}

impl UserConfigStore {
    pub fn new(backend: Arc<dyn KeyValueStore>) -> Self {
        Self { backend }
    }

    async fn read(&self, key: &str) -> Result<String, StoreError> {
        self.backend
            .get(key)
            .await?
            .ok_or_else(|| StoreError::NotFound(key.to_string()))
    }

    /// Store the chosen wordlist; ids outside the catalog are rejected and
    /// leave any previous choice in place.
    pub async fn set_wordlist(&self, user_id: u64, wordlist: i64) -> Result<WordlistId, StoreError> {
        check_user(user_id)?;
        let id = WordlistId::from_index(wordlist).ok_or_else(|| {
            StoreError::InvalidArgument(format!("wordlist id {wordlist} is not in the catalog"))
        })?;

        storage::write(
            self.backend.as_ref(),
            &key(WORDLIST_PREFIX, user_id),
            &id.index().to_string(),
            Expiry::Never,
        )
        .await?;
        Ok(id)
    }

    /// Store the word count. Magnitude is checked by the caller.
    pub async fn set_word_count(&self, user_id: u64, count: usize) -> Result<(), StoreError> {
        check_user(user_id)?;
        storage::write(
            self.backend.as_ref(),
            &key(WORD_COUNT_PREFIX, user_id),
            &count.to_string(),
            preference_expiry(),
        )
        .await
    }

    /// Store the separator. Length is checked by the caller.
    pub async fn set_separator(&self, user_id: u64, separator: &str) -> Result<(), StoreError> {
        check_user(user_id)?;
        storage::write(
            self.backend.as_ref(),
            &key(SEPARATOR_PREFIX, user_id),
            separator,
            preference_expiry(),
        )
        .await
    }

    /// Overwrites any earlier pending action; expires after an hour
    pub async fn set_pending_action(
        &self,
        user_id: u64,
        action: PendingAction,
    ) -> Result<(), StoreError> {
        check_user(user_id)?;
        storage::write(
            self.backend.as_ref(),
            &key(PENDING_ACTION_PREFIX, user_id),
            action.tag(),
            Expiry::In(PENDING_ACTION_TTL),
        )
        .await
    }

    pub async fn clear_pending_action(&self, user_id: u64) -> Result<(), StoreError> {
        check_user(user_id)?;
        self.backend.del(&key(PENDING_ACTION_PREFIX, user_id)).await
    }

    /// Chosen wordlist, falling back to the catalog default on any failure
    pub async fn get_wordlist(&self, user_id: u64) -> WordlistId {
        let key = key(WORDLIST_PREFIX, user_id);
        match self.read(&key).await {
            Ok(raw) => match raw.trim().parse::<i64>().ok().and_then(WordlistId::from_index) {
                Some(id) => id,
                None => {
                    warn!("Stored wordlist '{raw}' for user {user_id} is invalid, using default");
                    WordlistId::DEFAULT
                }
            },
            Err(StoreError::NotFound(_)) => WordlistId::DEFAULT,
            Err(e) => {
                warn!("Can't read wordlist of user {user_id}, using default: {e}");
                WordlistId::DEFAULT
            }
        }
    }

    /// Raw stored word count; may be zero or negative if the data was tampered with
    pub async fn get_word_count(&self, user_id: u64) -> Result<i64, StoreError> {
        let key = key(WORD_COUNT_PREFIX, user_id);
        let raw = self.read(&key).await?;
        raw.trim()
            .parse()
            .map_err(|_| StoreError::Malformed { key, value: raw })
    }

    pub async fn get_separator(&self, user_id: u64) -> Result<String, StoreError> {
        self.read(&key(SEPARATOR_PREFIX, user_id)).await
    }

    /// `Ok(None)` means the user is idle
    pub async fn get_pending_action(
        &self,
        user_id: u64,
    ) -> Result<Option<PendingAction>, StoreError> {
        let key = key(PENDING_ACTION_PREFIX, user_id);
        match self.backend.get(&key).await? {
            None => Ok(None),
            Some(tag) => match PendingAction::from_tag(&tag) {
                Some(action) => Ok(Some(action)),
                None => Err(StoreError::Malformed { key, value: tag }),
            },
        }
    }

    /// All three settings, each defaulted independently when unreadable
    pub async fn preferences(&self, user_id: u64) -> UserPreferences {
        let mut prefs = UserPreferences::defaults(user_id);
        prefs.wordlist = self.get_wordlist(user_id).await;

        match self.get_word_count(user_id).await {
            Ok(n) if n > 0 => prefs.word_count = n as usize,
            Ok(n) => error!("Stored word count {n} of user {user_id} is not positive, using default"),
            Err(StoreError::NotFound(_)) => {}
            Err(e) => warn!("Can't read word count of user {user_id}, using default: {e}"),
        }

        match self.get_separator(user_id).await {
            Ok(separator) => prefs.separator = separator,
            Err(StoreError::NotFound(_)) => {}
            Err(e) => warn!("Can't read separator of user {user_id}, using default: {e}"),
        }

        prefs
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::test_support::FailingStore;
    use crate::storage::MemoryStore;
    use std::time::Duration;

    const USER: u64 = 4242;

    fn store() -> (UserConfigStore, MemoryStore) {
        let backend = MemoryStore::new();
        (UserConfigStore::new(Arc::new(backend.clone())), backend)
    }

    #[tokio::test]
    async fn test_fresh_user_defaults() {
        let (store, _) = store();

        assert_eq!(store.get_wordlist(USER).await, WordlistId::Bip39);
        assert!(store.get_word_count(USER).await.unwrap_err().is_not_found());
        assert!(store.get_separator(USER).await.unwrap_err().is_not_found());
        assert_eq!(store.get_pending_action(USER).await.unwrap(), None);
        assert_eq!(store.preferences(USER).await, UserPreferences::defaults(USER));
    }

    #[tokio::test]
    async fn test_values_use_documented_keys() {
        let (store, backend) = store();
        store.set_wordlist(USER, 2).await.unwrap();
        store.set_word_count(USER, 5).await.unwrap();
        store.set_separator(USER, "=").await.unwrap();
        store
            .set_pending_action(USER, PendingAction::AwaitingSeparator)
            .await
            .unwrap();

        assert_eq!(backend.get("plist:4242").await.unwrap().as_deref(), Some("2"));
        assert_eq!(backend.get("wordsn:4242").await.unwrap().as_deref(), Some("5"));
        assert_eq!(backend.get("sep:4242").await.unwrap().as_deref(), Some("="));
        assert_eq!(
            backend.get("lastact:4242").await.unwrap().as_deref(),
            Some("setseparator")
        );
    }

    #[tokio::test]
    async fn test_out_of_catalog_wordlist_keeps_previous_choice() {
        let (store, _) = store();
        store.set_wordlist(USER, 3).await.unwrap();

        let result = store.set_wordlist(USER, 99).await;

        assert!(matches!(result, Err(StoreError::InvalidArgument(_))));
        assert_eq!(store.get_wordlist(USER).await, WordlistId::DiceShort1);
    }

    #[tokio::test]
    async fn test_zero_user_rejected_everywhere() {
        let (store, _) = store();
        assert!(matches!(
            store.set_wordlist(0, 1).await,
            Err(StoreError::InvalidArgument(_))
        ));
        assert!(store.set_word_count(0, 4).await.is_err());
        assert!(store.set_separator(0, "_").await.is_err());
        assert!(store
            .set_pending_action(0, PendingAction::AwaitingWordCount)
            .await
            .is_err());
        assert!(store.clear_pending_action(0).await.is_err());
    }

    #[tokio::test]
    async fn test_pending_action_overwrites() {
        let (store, _) = store();
        store
            .set_pending_action(USER, PendingAction::AwaitingWordCount)
            .await
            .unwrap();
        store
            .set_pending_action(USER, PendingAction::AwaitingSeparator)
            .await
            .unwrap();

        assert_eq!(
            store.get_pending_action(USER).await.unwrap(),
            Some(PendingAction::AwaitingSeparator)
        );
    }

    #[tokio::test]
    async fn test_clear_pending_action_is_idempotent() {
        let (store, _) = store();
        store.clear_pending_action(USER).await.unwrap();
        store
            .set_pending_action(USER, PendingAction::AwaitingWordCount)
            .await
            .unwrap();
        store.clear_pending_action(USER).await.unwrap();
        store.clear_pending_action(USER).await.unwrap();
        assert_eq!(store.get_pending_action(USER).await.unwrap(), None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_pending_action_expires_after_an_hour() {
        let (store, _) = store();
        store
            .set_pending_action(USER, PendingAction::AwaitingWordCount)
            .await
            .unwrap();

        tokio::time::advance(Duration::from_secs(3599)).await;
        assert!(store.get_pending_action(USER).await.unwrap().is_some());

        tokio::time::advance(Duration::from_secs(2)).await;
        assert_eq!(store.get_pending_action(USER).await.unwrap(), None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_preferences_outlive_pending_action() {
        let (store, _) = store();
        store.set_word_count(USER, 7).await.unwrap();
        store
            .set_pending_action(USER, PendingAction::AwaitingSeparator)
            .await
            .unwrap();

        tokio::time::advance(Duration::from_secs(30 * 24 * 3600)).await;

        assert_eq!(store.get_pending_action(USER).await.unwrap(), None);
        assert_eq!(store.get_word_count(USER).await.unwrap(), 7);
    }

    #[tokio::test]
    async fn test_unknown_pending_tag_is_malformed() {
        let (store, backend) = store();
        backend.set("lastact:4242", "setsomething").await.unwrap();
        assert!(matches!(
            store.get_pending_action(USER).await,
            Err(StoreError::Malformed { .. })
        ));
    }

    #[tokio::test]
    async fn test_garbage_values_fall_back_to_defaults() {
        let (store, backend) = store();
        backend.set("plist:4242", "seven").await.unwrap();
        backend.set("wordsn:4242", "many").await.unwrap();

        assert_eq!(store.get_wordlist(USER).await, WordlistId::Bip39);
        assert!(matches!(
            store.get_word_count(USER).await,
            Err(StoreError::Malformed { .. })
        ));
        assert_eq!(store.preferences(USER).await.word_count, 3);
    }

    #[tokio::test]
    async fn test_non_positive_word_count_defaults() {
        let (store, backend) = store();
        backend.set("wordsn:4242", "0").await.unwrap();
        assert_eq!(store.preferences(USER).await.word_count, 3);

        backend.set("wordsn:4242", "-4").await.unwrap();
        assert_eq!(store.preferences(USER).await.word_count, 3);
    }

    #[tokio::test]
    async fn test_stored_preferences_are_used() {
        let (store, _) = store();
        store.set_wordlist(USER, 1).await.unwrap();
        store.set_word_count(USER, 5).await.unwrap();
        store.set_separator(USER, "\n").await.unwrap();

        let prefs = store.preferences(USER).await;
        assert_eq!(prefs.wordlist, WordlistId::Wordle);
        assert_eq!(prefs.word_count, 5);
        assert_eq!(prefs.separator, "\n");
        assert_eq!(
            prefs.passphrase_config(),
            PassphraseConfig::new(WordlistId::Wordle, 5, "\n")
        );
    }

    #[tokio::test]
    async fn test_transport_failure_on_reads() {
        let store = UserConfigStore::new(Arc::new(FailingStore));

        assert_eq!(store.get_wordlist(USER).await, WordlistId::Bip39);
        assert!(matches!(
            store.get_pending_action(USER).await,
            Err(StoreError::Transport(_))
        ));
        assert_eq!(store.preferences(USER).await, UserPreferences::defaults(USER));
        assert!(matches!(
            store.set_word_count(USER, 4).await,
            Err(StoreError::Transport(_))
        ));
    }
}
