// Use cases layer: application workflows for the game server.

pub mod game;
pub mod leaderboard;
pub mod session;
pub mod share;
pub mod types;
pub mod word_check;

pub use game::{SessionSettings, session_task};
pub use session::GameSession;
pub use types::{SessionEvent, SessionUpdate};
