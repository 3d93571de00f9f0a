use serde::{Deserialize, Serialize};

// One leaderboard row. Entries are never mutated after creation; only the
// set membership changes when low scores are truncated away.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct LeaderboardEntry {
    pub score: u32,
    /// Epoch millis at submission time.
    pub timestamp: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
}
