// Domain layer: simulation state, systems and the ports the workflows depend on.

pub mod errors;
pub mod ports;
pub mod scores;
pub mod state;
pub mod systems;
pub mod tuning;

pub use scores::LeaderboardEntry;
pub use state::{
    Bounds, CatPhase, CatSnapshot, Direction, FallingCat, FallingLeaf, GameOverCause, LeafColor,
    LeafSnapshot, Net, SessionPhase, Vehicle, VehicleKind, VehicleSnapshot,
};
