use crate::domain::state::{Bounds, CatPhase, FallingCat, FallingLeaf, Vehicle};
use crate::domain::tuning::GameTuning;

/// Score and miss deltas produced by one simulation frame.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct FrameDeltas {
    pub caught: u32,
    pub missed: u32,
}

/// Advances every cat one frame against the current net position.
///
/// A falling cat integrates gravity (semi-implicit Euler) until it sinks into
/// the catch zone; the catch/miss classification fires exactly once, on the
/// frame the threshold is crossed, because the transition also leaves the
/// `Falling` phase.
pub fn tick_cats(
    cats: &mut Vec<FallingCat>,
    net_x: f32,
    bounds: Bounds,
    tuning: &GameTuning,
) -> FrameDeltas {
    let ground = tuning.ground_level(bounds.height);
    let mid = bounds.width / 2.0;
    let mut deltas = FrameDeltas::default();

    for cat in cats.iter_mut() {
        match cat.phase {
            CatPhase::Falling => {
                cat.fall_speed += tuning.gravity;
                cat.y += cat.fall_speed;

                if cat.y >= ground - tuning.catch_zone_height {
                    if (cat.x - net_x).abs() <= tuning.half_net_width {
                        cat.phase = CatPhase::Caught {
                            frames_left: tuning.caught_despawn_frames,
                        };
                        deltas.caught += 1;
                    } else {
                        cat.phase = CatPhase::RunningAway;
                        cat.y = ground - tuning.runaway_y_offset;
                        cat.fall_speed = 0.0;
                        deltas.missed += 1;
                    }
                }
            }
            CatPhase::Caught { ref mut frames_left } => {
                *frames_left = frames_left.saturating_sub(1);
            }
            CatPhase::RunningAway => {
                // Flee away from the horizontal mid-point, pinned to the ground.
                let dir = if cat.x < mid { -1.0 } else { 1.0 };
                cat.x += dir * tuning.runaway_speed;
                cat.y = ground - tuning.runaway_y_offset;
            }
        }
    }

    cats.retain(|cat| match cat.phase {
        CatPhase::Falling => true,
        CatPhase::Caught { frames_left } => frames_left > 0,
        CatPhase::RunningAway => {
            cat.x > -tuning.offscreen_buffer && cat.x < bounds.width + tuning.offscreen_buffer
        }
    });

    deltas
}

/// Advances the decorative leaves: constant fall, gentle sway, spin.
pub fn tick_leaves(leaves: &mut Vec<FallingLeaf>, bounds: Bounds, tuning: &GameTuning) {
    let ground = tuning.ground_level(bounds.height);

    for leaf in leaves.iter_mut() {
        leaf.y += leaf.speed;
        leaf.rotation += tuning.leaf_spin;
        leaf.x += (leaf.y * tuning.leaf_sway_freq).sin() * tuning.leaf_sway_amplitude;
    }

    leaves.retain(|leaf| leaf.y < ground + tuning.leaf_ground_margin);
}

/// Advances the background traffic and despawns anything fully past the far edge.
pub fn tick_vehicles(vehicles: &mut Vec<Vehicle>, bounds: Bounds, tuning: &GameTuning) {
    for v in vehicles.iter_mut() {
        v.x += v.speed;
    }

    vehicles.retain(|v| {
        v.x > -tuning.offscreen_buffer * 2.0 && v.x < bounds.width + tuning.offscreen_buffer * 2.0
    });
}
