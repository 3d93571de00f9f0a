// Wire payloads for the HTTP API and the session WebSocket. Field naming
// follows the web client (camelCase); domain types stay wire-agnostic and
// are mapped through From impls here.

use crate::domain::scores::LeaderboardEntry;
use crate::domain::state::{
    CatSnapshot, CatState, Direction, GameOverCause, LeafColor, LeafSnapshot, SessionPhase,
    VehicleKind, VehicleSnapshot,
};
use crate::use_cases::types::SessionUpdate;
use crate::use_cases::word_check::{LetterState, WORD_LEN};
use serde::{Deserialize, Serialize};

pub const STATUS_SUCCESS: &str = "success";
pub const STATUS_ERROR: &str = "error";

// Shared error envelope: {"status":"error","message":...}.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub status: &'static str,
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct ScoreDto {
    pub score: u32,
    pub timestamp: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
}

impl From<LeaderboardEntry> for ScoreDto {
    fn from(entry: LeaderboardEntry) -> Self {
        // user_id is deliberately not exposed on the public list.
        Self {
            score: entry.score,
            timestamp: entry.timestamp,
            username: entry.username,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct LeaderboardResponse {
    pub status: &'static str,
    pub scores: Vec<ScoreDto>,
}

#[derive(Debug, Deserialize)]
pub struct SubmitScoreRequest {
    pub score: i64,
}

#[derive(Debug, Serialize)]
pub struct SubmitScoreResponse {
    pub status: &'static str,
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct BestScoreResponse {
    pub status: &'static str,
    #[serde(rename = "bestScore")]
    pub best_score: u32,
}

#[derive(Debug, Deserialize)]
pub struct ShareScoreRequest {
    pub score: i64,
    #[serde(rename = "shareType")]
    pub share_type: String,
    #[serde(rename = "postId", default)]
    pub post_id: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ShareScoreResponse {
    pub status: &'static str,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CheckRequest {
    pub guess: String,
}

#[derive(Debug, Serialize)]
pub struct CheckResponse {
    pub status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exists: Option<bool>,
    pub solved: bool,
    pub correct: [LetterState; WORD_LEN],
    #[serde(skip_serializing_if = "Option::is_none")]
    pub word: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub message: &'static str,
    pub timestamp: u64,
}

// WebSocket protocol for the arcade session.

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DirectionDto {
    Left,
    Right,
}

impl From<DirectionDto> for Direction {
    fn from(d: DirectionDto) -> Self {
        match d {
            DirectionDto::Left => Direction::Left,
            DirectionDto::Right => Direction::Right,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientMessage {
    Start,
    Restart,
    Shake,
    Move { direction: DirectionDto },
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum SessionPhaseDto {
    Ready,
    Playing,
    GameOver,
}

impl From<SessionPhase> for SessionPhaseDto {
    fn from(p: SessionPhase) -> Self {
        match p {
            SessionPhase::Ready => SessionPhaseDto::Ready,
            SessionPhase::Playing => SessionPhaseDto::Playing,
            SessionPhase::GameOver => SessionPhaseDto::GameOver,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum GameOverCauseDto {
    TimeUp,
    TooManyMisses,
}

impl From<GameOverCause> for GameOverCauseDto {
    fn from(c: GameOverCause) -> Self {
        match c {
            GameOverCause::TimeExpired => GameOverCauseDto::TimeUp,
            GameOverCause::TooManyMisses => GameOverCauseDto::TooManyMisses,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum CatStateDto {
    Falling,
    Caught,
    RunningAway,
}

#[derive(Debug, Serialize)]
pub struct CatDto {
    pub id: u64,
    pub x: f32,
    pub y: f32,
    pub variant: u8,
    pub state: CatStateDto,
}

impl From<CatSnapshot> for CatDto {
    fn from(c: CatSnapshot) -> Self {
        Self {
            id: c.id,
            x: c.x,
            y: c.y,
            variant: c.variant,
            state: match c.state {
                CatState::Falling => CatStateDto::Falling,
                CatState::Caught => CatStateDto::Caught,
                CatState::RunningAway => CatStateDto::RunningAway,
            },
        }
    }
}

#[derive(Debug, Serialize)]
pub struct LeafDto {
    pub id: u64,
    pub x: f32,
    pub y: f32,
    pub color: LeafColor,
    pub rotation: f32,
}

impl From<LeafSnapshot> for LeafDto {
    fn from(l: LeafSnapshot) -> Self {
        Self {
            id: l.id,
            x: l.x,
            y: l.y,
            color: l.color,
            rotation: l.rotation,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct VehicleDto {
    pub kind: VehicleKind,
    pub x: f32,
    pub y: f32,
}

impl From<VehicleSnapshot> for VehicleDto {
    fn from(v: VehicleSnapshot) -> Self {
        Self {
            kind: v.kind,
            x: v.x,
            y: v.y,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionUpdateDto {
    pub frame: u64,
    pub phase: SessionPhaseDto,
    pub score: u32,
    pub missed_cats: u32,
    pub time_left: u32,
    pub net_x: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub game_over_cause: Option<GameOverCauseDto>,
    pub cats: Vec<CatDto>,
    pub leaves: Vec<LeafDto>,
    pub vehicles: Vec<VehicleDto>,
}

impl From<SessionUpdate> for SessionUpdateDto {
    fn from(u: SessionUpdate) -> Self {
        Self {
            frame: u.frame,
            phase: u.phase.into(),
            score: u.score,
            missed_cats: u.missed_cats,
            time_left: u.time_left,
            net_x: u.net_x,
            game_over_cause: u.game_over_cause.map(Into::into),
            cats: u.cats.into_iter().map(Into::into).collect(),
            leaves: u.leaves.into_iter().map(Into::into).collect(),
            vehicles: u.vehicles.into_iter().map(Into::into).collect(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerMessage {
    Snapshot(SessionUpdateDto),
}
