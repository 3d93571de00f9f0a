use std::{env, time::Duration};

use crate::domain::state::Bounds;
use crate::domain::tuning::{GameTuning, SpawnTuning};
use crate::use_cases::SessionSettings;

// Runtime/server constants (not gameplay tuning).

pub const EVENT_CHANNEL_CAPACITY: usize = 256;
pub const SNAPSHOT_BROADCAST_CAPACITY: usize = 64;

pub const TICK_INTERVAL: Duration = Duration::from_millis(1000 / 60);

// Playfield the session simulates when the client reports no dimensions.
pub const DEFAULT_BOUNDS: Bounds = Bounds {
    width: 500.0,
    height: 600.0,
};

pub fn http_port() -> u16 {
    env::var("PORT")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(3000)
}

pub fn database_url() -> Option<String> {
    env::var("DATABASE_URL").ok()
}

/// Which leaderboard backend to run against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreKind {
    Postgres,
    Memory,
}

/// Explicit `LEADERBOARD_STORE` wins; otherwise PostgreSQL when a
/// `DATABASE_URL` is present, in-memory when it is not.
pub fn leaderboard_store() -> StoreKind {
    match env::var("LEADERBOARD_STORE").as_deref() {
        Ok("postgres") => StoreKind::Postgres,
        Ok("memory") => StoreKind::Memory,
        _ if database_url().is_some() => StoreKind::Postgres,
        _ => StoreKind::Memory,
    }
}

pub fn host_api_url() -> String {
    env::var("HOST_API_URL").unwrap_or_else(|_| "http://127.0.0.1:3010".to_string())
}

pub fn host_api_timeout() -> Duration {
    let millis = env::var("HOST_API_TIMEOUT_MS")
        .ok()
        .and_then(|value| value.parse::<u64>().ok())
        .unwrap_or(2000);
    Duration::from_millis(millis)
}

/// Remote dictionary base URL, when set. Absent means the builtin word list.
pub fn dictionary_url() -> Option<String> {
    env::var("DICTIONARY_URL").ok()
}

pub fn word_of_the_day() -> String {
    env::var("WORD_OF_THE_DAY")
        .ok()
        .map(|w| w.trim().to_ascii_lowercase())
        .filter(|w| !w.is_empty())
        .unwrap_or_else(|| "crane".to_string())
}

pub fn default_session_settings() -> SessionSettings {
    SessionSettings {
        tick_interval: TICK_INTERVAL,
        bounds: DEFAULT_BOUNDS,
        tuning: GameTuning::default(),
        spawn: SpawnTuning::default(),
    }
}
