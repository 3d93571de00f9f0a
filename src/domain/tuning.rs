/// Gameplay tuning for the catch-the-cat arcade loop.
///
/// All motion values are in per-frame units at the 60 Hz tick rate; keep this
/// separate from runtime/server configuration (ports, channel sizes, etc.).

#[derive(Debug, Clone, Copy)]
pub struct GameTuning {
    /// Added to a falling cat's speed every frame.
    pub gravity: f32,

    /// Fall speed a freshly dropped cat starts with.
    pub initial_fall_speed: f32,

    /// Horizontal pixels the net moves per input event.
    pub net_step: f32,

    /// The net center never leaves `[net_margin, width - net_margin]`.
    pub net_margin: f32,

    /// Half the catch window; a cat is caught when within this of the net center.
    pub half_net_width: f32,

    /// Ground sits this many pixels above the container bottom.
    pub ground_offset: f32,

    /// Catch/miss classification happens once a cat sinks within this of the ground.
    pub catch_zone_height: f32,

    /// A fleeing cat is pinned this far above the ground.
    pub runaway_y_offset: f32,

    /// Horizontal pixels per frame for a fleeing cat.
    pub runaway_speed: f32,

    /// Fleeing cats despawn once this far past either edge.
    pub offscreen_buffer: f32,

    /// Frames a caught cat lingers for its scoop animation (~400 ms at 60 Hz).
    pub caught_despawn_frames: u32,

    /// Leaf sway follows `x += sin(y * freq) * amplitude`.
    pub leaf_sway_freq: f32,
    pub leaf_sway_amplitude: f32,

    /// Degrees of leaf spin per frame.
    pub leaf_spin: f32,

    /// Leaves despawn once this far below ground level.
    pub leaf_ground_margin: f32,

    pub game_duration_secs: u32,
    pub max_misses: u32,
}

impl Default for GameTuning {
    fn default() -> Self {
        Self {
            gravity: 0.3,
            initial_fall_speed: 1.0,
            net_step: 25.0,
            net_margin: 60.0,
            half_net_width: 60.0,
            ground_offset: 80.0,
            catch_zone_height: 60.0,
            runaway_y_offset: 30.0,
            runaway_speed: 4.0,
            offscreen_buffer: 100.0,
            caught_despawn_frames: 24,
            leaf_sway_freq: 0.015,
            leaf_sway_amplitude: 2.5,
            leaf_spin: 4.0,
            leaf_ground_margin: 50.0,
            game_duration_secs: 60,
            max_misses: 3,
        }
    }
}

impl GameTuning {
    /// Ground level for a playfield of the given height.
    pub fn ground_level(&self, height: f32) -> f32 {
        height - self.ground_offset
    }
}

/// Spawn cadence and placement ranges for tree shakes and background traffic.
#[derive(Debug, Clone, Copy)]
pub struct SpawnTuning {
    /// Every shake drops `min_leaves + rand(0..leaf_count_band)` leaves.
    pub min_leaves: u32,
    pub leaf_count_band: u32,

    /// Leaves land at x within `[edge, width - edge]`.
    pub leaf_edge_margin: f32,

    /// Initial leaf y is `leaf_min_y + rand * leaf_y_band`.
    pub leaf_min_y: f32,
    pub leaf_y_band: f32,

    /// Leaf fall speed is `leaf_min_speed + rand * leaf_speed_band`.
    pub leaf_min_speed: f32,
    pub leaf_speed_band: f32,

    /// Cats enter above the visible area.
    pub cat_spawn_y: f32,

    /// Keeps a cat's sprite fully inside the playfield at spawn.
    pub cat_half_width: f32,
    pub cat_edge_buffer: f32,

    /// Number of cat sprite variants.
    pub cat_variants: u8,

    /// A cat drops when `shake_count % (cat_period_min + rand(0..cat_period_band)) == 0`,
    /// i.e. roughly every 2-4 shakes rather than every shake.
    pub cat_period_min: u32,
    pub cat_period_band: u32,

    /// Background traffic timers, randomized per spawn (seconds).
    pub fire_truck_min_secs: u64,
    pub fire_truck_max_secs: u64,
    pub helicopter_min_secs: u64,
    pub helicopter_max_secs: u64,

    /// Per-frame speeds and altitudes for background traffic.
    pub fire_truck_speed: f32,
    pub helicopter_speed: f32,
    /// Fire trucks drive just above the ground line.
    pub fire_truck_y_offset: f32,
    /// Helicopters cross near the top of the playfield.
    pub helicopter_y: f32,
}

impl Default for SpawnTuning {
    fn default() -> Self {
        Self {
            min_leaves: 6,
            leaf_count_band: 8,
            leaf_edge_margin: 20.0,
            leaf_min_y: 60.0,
            leaf_y_band: 140.0,
            leaf_min_speed: 1.2,
            leaf_speed_band: 2.8,
            cat_spawn_y: -50.0,
            cat_half_width: 25.0,
            cat_edge_buffer: 10.0,
            cat_variants: 6,
            cat_period_min: 2,
            cat_period_band: 3,
            fire_truck_min_secs: 15,
            fire_truck_max_secs: 30,
            helicopter_min_secs: 20,
            helicopter_max_secs: 40,
            fire_truck_speed: 2.0,
            helicopter_speed: 1.5,
            fire_truck_y_offset: 40.0,
            helicopter_y: 40.0,
        }
    }
}
