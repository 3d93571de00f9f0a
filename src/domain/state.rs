// Domain-level simulation entities and snapshot types.

/// Playfield dimensions the simulation runs against. Everything else
/// (ground level, spawn ranges, net clamping) derives from these.
#[derive(Debug, Clone, Copy)]
pub struct Bounds {
    pub width: f32,
    pub height: f32,
}

/// Lifecycle state of a falling cat.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatPhase {
    /// Accelerating under gravity toward the catch zone.
    Falling,
    /// Landed in the net; despawns once the animation window elapses.
    Caught { frames_left: u32 },
    /// Hit the ground outside the net and is fleeing toward an edge.
    RunningAway,
}

pub struct FallingCat {
    pub id: u64,
    pub x: f32,
    pub y: f32,
    /// Visual style selector, 0..6.
    pub variant: u8,
    /// Per-frame vertical speed. Only meaningful while falling.
    pub fall_speed: f32,
    pub phase: CatPhase,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LeafColor {
    Green,
    Yellow,
    Orange,
    Red,
    Brown,
}

impl LeafColor {
    pub const PALETTE: [LeafColor; 5] = [
        LeafColor::Green,
        LeafColor::Yellow,
        LeafColor::Orange,
        LeafColor::Red,
        LeafColor::Brown,
    ];
}

pub struct FallingLeaf {
    pub id: u64,
    pub x: f32,
    pub y: f32,
    pub color: LeafColor,
    /// Degrees; purely cosmetic spin.
    pub rotation: f32,
    /// Per-frame fall speed. Leaves drift at constant speed, no gravity.
    pub speed: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum VehicleKind {
    FireTruck,
    Helicopter,
}

/// Decorative background traffic. Never collides, never scores.
pub struct Vehicle {
    pub kind: VehicleKind,
    pub x: f32,
    pub y: f32,
    /// Signed per-frame horizontal speed; the sign is the travel direction.
    pub speed: f32,
}

/// The player-controlled net. A single clamped scalar.
pub struct Net {
    pub x: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Left,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    Ready,
    Playing,
    GameOver,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameOverCause {
    TimeExpired,
    TooManyMisses,
}

// Snapshot types carry only what clients render; movement-internal state
// (fall speed, despawn counters) stays server-side.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatState {
    Falling,
    Caught,
    RunningAway,
}

#[derive(Debug, Clone)]
pub struct CatSnapshot {
    pub id: u64,
    pub x: f32,
    pub y: f32,
    pub variant: u8,
    pub state: CatState,
}

#[derive(Debug, Clone)]
pub struct LeafSnapshot {
    pub id: u64,
    pub x: f32,
    pub y: f32,
    pub color: LeafColor,
    pub rotation: f32,
}

#[derive(Debug, Clone)]
pub struct VehicleSnapshot {
    pub kind: VehicleKind,
    pub x: f32,
    pub y: f32,
}

impl From<&FallingCat> for CatSnapshot {
    fn from(cat: &FallingCat) -> Self {
        Self {
            id: cat.id,
            x: cat.x,
            y: cat.y,
            variant: cat.variant,
            state: match cat.phase {
                CatPhase::Falling => CatState::Falling,
                CatPhase::Caught { .. } => CatState::Caught,
                CatPhase::RunningAway => CatState::RunningAway,
            },
        }
    }
}

impl From<&FallingLeaf> for LeafSnapshot {
    fn from(leaf: &FallingLeaf) -> Self {
        Self {
            id: leaf.id,
            x: leaf.x,
            y: leaf.y,
            color: leaf.color,
            rotation: leaf.rotation,
        }
    }
}

impl From<&Vehicle> for VehicleSnapshot {
    fn from(v: &Vehicle) -> Self {
        Self {
            kind: v.kind,
            x: v.x,
            y: v.y,
        }
    }
}
