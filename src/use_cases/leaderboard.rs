// Leaderboard workflow: read the whole persisted set, mutate, write it back.
//
// The read-modify-write is deliberately not transactional; two racing
// submissions can interleave and one update can be lost. Last write wins on
// the single key, which is acceptable for a casual-game leaderboard.

use crate::domain::errors::LeaderboardError;
use crate::domain::ports::{Clock, ScoreStore};
use crate::domain::scores::LeaderboardEntry;
use std::sync::Arc;
use tracing::{error, warn};

/// Fixed key the whole leaderboard array is persisted under.
pub const LEADERBOARD_KEY: &str = "karma_katcher_leaderboard";

/// Hard cap on stored entries; truncation drops the lowest scores.
const MAX_ENTRIES: usize = 100;

/// Entries returned to clients.
const LIST_LIMIT: usize = 50;

pub struct Leaderboard {
    store: Arc<dyn ScoreStore>,
    clock: Arc<dyn Clock>,
}

impl Leaderboard {
    pub fn new(store: Arc<dyn ScoreStore>, clock: Arc<dyn Clock>) -> Self {
        Self { store, clock }
    }

    async fn read_entries(&self) -> Result<Vec<LeaderboardEntry>, LeaderboardError> {
        let raw = self.store.read(LEADERBOARD_KEY).await.map_err(|e| {
            error!(error = %e, "leaderboard read failed");
            LeaderboardError::StorageFailure
        })?;

        match raw {
            None => Ok(Vec::new()),
            Some(blob) => serde_json::from_str(&blob).map_err(|e| {
                error!(error = %e, "leaderboard blob is not valid JSON");
                LeaderboardError::StorageFailure
            }),
        }
    }

    /// Top entries by score, best first.
    pub async fn list(&self) -> Result<Vec<LeaderboardEntry>, LeaderboardError> {
        let mut entries = self.read_entries().await?;
        entries.sort_by(|a, b| b.score.cmp(&a.score));
        entries.truncate(LIST_LIMIT);
        Ok(entries)
    }

    /// Appends one entry, re-sorts and truncates to the cap, writes back.
    pub async fn submit(
        &self,
        score: i64,
        user_id: Option<String>,
        username: Option<String>,
    ) -> Result<(), LeaderboardError> {
        // Scores arrive as i64 off the wire; anything outside u32 is bogus.
        let Ok(score) = u32::try_from(score) else {
            warn!(score, "rejected out-of-range score submission");
            return Err(LeaderboardError::InvalidScore);
        };

        let mut entries = self.read_entries().await?;
        entries.push(LeaderboardEntry {
            score,
            timestamp: self.clock.now_epoch_millis(),
            user_id,
            username,
        });
        entries.sort_by(|a, b| b.score.cmp(&a.score));
        entries.truncate(MAX_ENTRIES);

        let blob = serde_json::to_string(&entries).map_err(|e| {
            error!(error = %e, "failed to serialize leaderboard");
            LeaderboardError::StorageFailure
        })?;
        self.store
            .write(LEADERBOARD_KEY, blob)
            .await
            .map_err(|e| {
                error!(error = %e, "leaderboard write failed");
                LeaderboardError::StorageFailure
            })
    }

    /// Best score ever submitted by the given user, 0 when they have none.
    pub async fn best_score(&self, user_id: &str) -> Result<u32, LeaderboardError> {
        let entries = self.read_entries().await?;
        Ok(entries
            .iter()
            .filter(|e| e.user_id.as_deref() == Some(user_id))
            .map(|e| e.score)
            .max()
            .unwrap_or(0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::sync::Mutex;

    #[derive(Default)]
    struct MapStore {
        values: Mutex<HashMap<String, String>>,
        fail_writes: bool,
    }

    #[async_trait]
    impl ScoreStore for MapStore {
        async fn read(&self, key: &str) -> Result<Option<String>, String> {
            Ok(self.values.lock().unwrap().get(key).cloned())
        }

        async fn write(&self, key: &str, value: String) -> Result<(), String> {
            if self.fail_writes {
                return Err("store offline".to_string());
            }
            self.values.lock().unwrap().insert(key.to_string(), value);
            Ok(())
        }
    }

    struct FixedClock(u64);

    impl Clock for FixedClock {
        fn now_epoch_millis(&self) -> u64 {
            self.0
        }
    }

    fn leaderboard_with(store: Arc<MapStore>) -> Leaderboard {
        Leaderboard::new(store, Arc::new(FixedClock(1_700_000_000_000)))
    }

    #[tokio::test]
    async fn submitted_score_shows_up_in_list() {
        let store = Arc::new(MapStore::default());
        let board = leaderboard_with(store);

        board
            .submit(42, Some("u1".to_string()), Some("cat_fan".to_string()))
            .await
            .unwrap();

        let entries = board.list().await.unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].score, 42);
        assert_eq!(entries[0].username.as_deref(), Some("cat_fan"));
        assert_eq!(entries[0].timestamp, 1_700_000_000_000);
    }

    #[tokio::test]
    async fn out_of_range_scores_are_rejected_without_touching_the_store() {
        let store = Arc::new(MapStore::default());
        let board = leaderboard_with(store.clone());

        // Values above u32::MAX must be rejected, not silently truncated.
        for score in [-1, i64::from(u32::MAX) + 1, i64::MAX] {
            let err = board.submit(score, None, None).await.unwrap_err();
            assert_eq!(err, LeaderboardError::InvalidScore);
        }
        assert!(store.values.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn store_caps_at_one_hundred_entries_dropping_the_lowest() {
        let store = Arc::new(MapStore::default());
        let board = leaderboard_with(store.clone());

        for score in 0..101 {
            board.submit(score, None, None).await.unwrap();
        }

        let blob = store
            .values
            .lock()
            .unwrap()
            .get(LEADERBOARD_KEY)
            .cloned()
            .unwrap();
        let persisted: Vec<LeaderboardEntry> = serde_json::from_str(&blob).unwrap();
        assert_eq!(persisted.len(), 100);
        // Score 0 was the lowest of the 101 and must be gone.
        assert!(persisted.iter().all(|e| e.score >= 1));
    }

    #[tokio::test]
    async fn list_returns_top_fifty_sorted_descending() {
        let store = Arc::new(MapStore::default());
        let board = leaderboard_with(store);

        for score in 0..60 {
            board.submit(score, None, None).await.unwrap();
        }

        let entries = board.list().await.unwrap();
        assert_eq!(entries.len(), 50);
        assert_eq!(entries[0].score, 59);
        assert!(entries.windows(2).all(|w| w[0].score >= w[1].score));
    }

    #[tokio::test]
    async fn best_score_picks_the_users_maximum() {
        let store = Arc::new(MapStore::default());
        let board = leaderboard_with(store);

        for score in [5, 9, 3] {
            board
                .submit(score, Some("u1".to_string()), None)
                .await
                .unwrap();
        }
        board
            .submit(100, Some("u2".to_string()), None)
            .await
            .unwrap();

        assert_eq!(board.best_score("u1").await.unwrap(), 9);
        assert_eq!(board.best_score("u2").await.unwrap(), 100);
        assert_eq!(board.best_score("nobody").await.unwrap(), 0);
    }

    #[tokio::test]
    async fn store_failure_surfaces_as_storage_error() {
        let store = Arc::new(MapStore {
            fail_writes: true,
            ..MapStore::default()
        });
        let board = leaderboard_with(store);

        let err = board.submit(10, None, None).await.unwrap_err();
        assert_eq!(err, LeaderboardError::StorageFailure);
    }

    #[tokio::test]
    async fn corrupt_blob_is_a_storage_error_not_a_wipe() {
        let store = Arc::new(MapStore::default());
        store
            .values
            .lock()
            .unwrap()
            .insert(LEADERBOARD_KEY.to_string(), "not json".to_string());
        let board = leaderboard_with(store.clone());

        assert_eq!(
            board.submit(10, None, None).await.unwrap_err(),
            LeaderboardError::StorageFailure
        );
        // The corrupt blob is left in place rather than overwritten.
        assert_eq!(
            store.values.lock().unwrap().get(LEADERBOARD_KEY).unwrap(),
            "not json"
        );
    }
}
