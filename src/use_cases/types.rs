// Use-case level inputs/outputs for the arcade session loop.

use crate::domain::{
    CatSnapshot, Direction, GameOverCause, LeafSnapshot, SessionPhase, VehicleSnapshot,
};

/// Discrete player inputs flowing from the connection into the session task.
#[derive(Debug, Clone, Copy)]
pub enum SessionEvent {
    Start,
    Restart,
    Shake,
    Move { direction: Direction },
}

/// One rendered frame's worth of world state, produced after every tick.
#[derive(Debug, Clone)]
pub struct SessionUpdate {
    pub frame: u64,
    pub phase: SessionPhase,
    pub score: u32,
    pub missed_cats: u32,
    pub time_left: u32,
    pub net_x: f32,
    pub game_over_cause: Option<GameOverCause>,
    pub cats: Vec<CatSnapshot>,
    pub leaves: Vec<LeafSnapshot>,
    pub vehicles: Vec<VehicleSnapshot>,
}
