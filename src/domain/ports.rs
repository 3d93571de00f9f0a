use async_trait::async_trait;

// Port for the key-value collaborator behind the leaderboard. The whole
// entry list travels as one opaque blob per key; there is no per-entry
// access and no optimistic-concurrency protection.
#[async_trait]
pub trait ScoreStore: Send + Sync {
    async fn read(&self, key: &str) -> Result<Option<String>, String>;
    async fn write(&self, key: &str, value: String) -> Result<(), String>;
}

// Port for publishing score shares through the host platform.
#[async_trait]
pub trait SharePublisher: Send + Sync {
    /// Publishes a top-level post; returns the resulting URL.
    async fn publish_post(&self, title: &str, body: &str) -> Result<String, String>;
    /// Publishes a comment under the given post; returns the resulting URL.
    async fn publish_comment(&self, post_id: &str, body: &str) -> Result<String, String>;
}

// Port for the word-validity collaborator of the word-guess game.
#[async_trait]
pub trait WordJudge: Send + Sync {
    async fn exists(&self, word: &str) -> Result<bool, String>;
}

// Port for retrieving the current time.
pub trait Clock: Send + Sync {
    fn now_epoch_millis(&self) -> u64;
}
