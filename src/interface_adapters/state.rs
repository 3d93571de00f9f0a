use async_trait::async_trait;
use sqlx::PgPool;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};
use tokio::sync::Mutex;

use crate::domain::ports::{Clock, ScoreStore, SharePublisher, WordJudge};
use crate::use_cases::game::SessionSettings;

// Application state shared by all handlers and connections. The store,
// publisher and dictionary are chosen once at startup; handlers never sniff
// the environment at request time.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn ScoreStore>,
    pub publisher: Arc<dyn SharePublisher>,
    pub word_judge: Arc<dyn WordJudge>,
    pub clock: Arc<dyn Clock>,
    /// Today's word-guess solution.
    pub solution_word: Arc<str>,
    pub session_settings: SessionSettings,
}

// In-memory blob store for local development and tests; scores are lost on
// restart, which the degrade-gracefully policy accepts.
#[derive(Clone, Default)]
pub struct InMemoryScoreStore {
    values: Arc<Mutex<HashMap<String, String>>>,
}

#[async_trait]
impl ScoreStore for InMemoryScoreStore {
    async fn read(&self, key: &str) -> Result<Option<String>, String> {
        let values = self.values.lock().await;
        Ok(values.get(key).cloned())
    }

    async fn write(&self, key: &str, value: String) -> Result<(), String> {
        let mut values = self.values.lock().await;
        values.insert(key.to_string(), value);
        Ok(())
    }
}

// PostgreSQL-backed blob store: one row per key, whole value rewritten on
// every write. Last write wins; there is no optimistic concurrency.
#[derive(Clone)]
pub struct PostgresScoreStore {
    pub db: PgPool,
}

#[async_trait]
impl ScoreStore for PostgresScoreStore {
    async fn read(&self, key: &str) -> Result<Option<String>, String> {
        let row: Option<(String,)> =
            sqlx::query_as("SELECT value FROM leaderboard_kv WHERE key = $1")
                .bind(key)
                .fetch_optional(&self.db)
                .await
                .map_err(|e| e.to_string())?;
        Ok(row.map(|(value,)| value))
    }

    async fn write(&self, key: &str, value: String) -> Result<(), String> {
        sqlx::query(
            r#"
            INSERT INTO leaderboard_kv (key, value)
            VALUES ($1, $2)
            ON CONFLICT (key) DO UPDATE SET value = EXCLUDED.value
            "#,
        )
        .bind(key)
        .bind(value)
        .execute(&self.db)
        .await
        .map_err(|e| e.to_string())?;

        Ok(())
    }
}

// Small embedded dictionary used when no remote collaborator is configured.
// Enough for local play; production points at the real dictionary service.
#[derive(Clone)]
pub struct BuiltinWordList;

const BUILTIN_WORDS: &[&str] = &[
    "about", "audio", "beach", "brave", "bread", "cabin", "candy", "catch", "chair", "charm",
    "claim", "clean", "climb", "cloud", "crane", "dream", "drink", "earth", "feast", "field",
    "flame", "fresh", "ghost", "grape", "green", "heart", "house", "karma", "kitty", "laugh",
    "leafy", "light", "lucky", "money", "mouse", "night", "occur", "ocean", "plant", "pouch",
    "purry", "quiet", "robot", "score", "shake", "share", "smile", "stone", "sugar", "sweet",
    "tiger", "trees", "trunk", "water", "whisk", "world",
];

#[async_trait]
impl WordJudge for BuiltinWordList {
    async fn exists(&self, word: &str) -> Result<bool, String> {
        Ok(BUILTIN_WORDS.binary_search(&word).is_ok())
    }
}

// System clock adapter used by the leaderboard workflow.
#[derive(Clone)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_epoch_millis(&self) -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis() as u64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_word_list_is_sorted_for_binary_search() {
        let mut sorted = BUILTIN_WORDS.to_vec();
        sorted.sort_unstable();
        assert_eq!(sorted, BUILTIN_WORDS);
    }

    #[tokio::test]
    async fn in_memory_store_round_trips_blobs() {
        let store = InMemoryScoreStore::default();
        assert_eq!(store.read("k").await.unwrap(), None);

        store.write("k", "[1,2]".to_string()).await.unwrap();
        assert_eq!(store.read("k").await.unwrap().as_deref(), Some("[1,2]"));

        store.write("k", "[]".to_string()).await.unwrap();
        assert_eq!(store.read("k").await.unwrap().as_deref(), Some("[]"));
    }
}
