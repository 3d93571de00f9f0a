use crate::domain::state::{
    Bounds, CatPhase, FallingCat, FallingLeaf, LeafColor, Vehicle, VehicleKind,
};
use crate::domain::tuning::{GameTuning, SpawnTuning};
use rand::Rng;

/// Drops a burst of leaves across the playfield for one tree shake.
pub fn shake_leaves<R: Rng>(
    leaves: &mut Vec<FallingLeaf>,
    next_leaf_id: &mut u64,
    bounds: Bounds,
    tuning: &SpawnTuning,
    rng: &mut R,
) {
    let count = tuning.min_leaves + rng.gen_range(0..tuning.leaf_count_band);
    let min_x = tuning.leaf_edge_margin;
    let max_x = bounds.width - tuning.leaf_edge_margin;

    for _ in 0..count {
        leaves.push(FallingLeaf {
            id: *next_leaf_id,
            x: rng.gen_range(min_x..=max_x),
            y: tuning.leaf_min_y + rng.gen_range(0.0..tuning.leaf_y_band),
            color: LeafColor::PALETTE[rng.gen_range(0..LeafColor::PALETTE.len())],
            rotation: rng.gen_range(0.0..360.0),
            speed: tuning.leaf_min_speed + rng.gen_range(0.0..tuning.leaf_speed_band),
        });
        *next_leaf_id = next_leaf_id.wrapping_add(1);
    }
}

/// Drops a cat roughly every 2-4 shakes. Returns true when one spawned.
pub fn maybe_drop_cat<R: Rng>(
    cats: &mut Vec<FallingCat>,
    next_cat_id: &mut u64,
    shake_count: u32,
    bounds: Bounds,
    game: &GameTuning,
    spawn: &SpawnTuning,
    rng: &mut R,
) -> bool {
    let period = spawn.cat_period_min + rng.gen_range(0..spawn.cat_period_band);
    if shake_count % period != 0 {
        return false;
    }

    let min_x = spawn.cat_half_width + spawn.cat_edge_buffer;
    let max_x = bounds.width - spawn.cat_half_width - spawn.cat_edge_buffer;
    cats.push(FallingCat {
        id: *next_cat_id,
        x: rng.gen_range(min_x..=max_x),
        y: spawn.cat_spawn_y,
        variant: rng.gen_range(0..spawn.cat_variants),
        fall_speed: game.initial_fall_speed,
        phase: CatPhase::Falling,
    });
    *next_cat_id = next_cat_id.wrapping_add(1);
    true
}

/// Spawns one background vehicle at its entry edge.
pub fn spawn_vehicle(
    kind: VehicleKind,
    bounds: Bounds,
    game: &GameTuning,
    spawn: &SpawnTuning,
) -> Vehicle {
    match kind {
        // Fire trucks drive left-to-right along the ground.
        VehicleKind::FireTruck => Vehicle {
            kind,
            x: -spawn.cat_half_width * 4.0,
            y: game.ground_level(bounds.height) - spawn.fire_truck_y_offset,
            speed: spawn.fire_truck_speed,
        },
        // Helicopters cross right-to-left through the sky.
        VehicleKind::Helicopter => Vehicle {
            kind,
            x: bounds.width + spawn.cat_half_width * 4.0,
            y: spawn.helicopter_y,
            speed: -spawn.helicopter_speed,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    const BOUNDS: Bounds = Bounds {
        width: 500.0,
        height: 600.0,
    };

    #[test]
    fn shake_drops_between_six_and_thirteen_leaves_within_margins() {
        let tuning = SpawnTuning::default();
        let mut rng = StdRng::seed_from_u64(7);

        for _ in 0..50 {
            let mut leaves = Vec::new();
            let mut next_id = 0;
            shake_leaves(&mut leaves, &mut next_id, BOUNDS, &tuning, &mut rng);

            assert!((6..=13).contains(&leaves.len()));
            for leaf in &leaves {
                assert!(leaf.x >= 20.0 && leaf.x <= 480.0);
                assert!(leaf.y >= 60.0 && leaf.y < 200.0);
                assert!(leaf.speed >= 1.2 && leaf.speed < 4.0);
                assert!(leaf.rotation >= 0.0 && leaf.rotation < 360.0);
            }
        }
    }

    #[test]
    fn leaf_ids_are_unique_across_shakes() {
        let tuning = SpawnTuning::default();
        let mut rng = StdRng::seed_from_u64(3);
        let mut leaves = Vec::new();
        let mut next_id = 0;

        shake_leaves(&mut leaves, &mut next_id, BOUNDS, &tuning, &mut rng);
        shake_leaves(&mut leaves, &mut next_id, BOUNDS, &tuning, &mut rng);

        let mut ids: Vec<u64> = leaves.iter().map(|l| l.id).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), leaves.len());
    }

    #[test]
    fn cats_spawn_above_screen_within_safe_x_range() {
        let game = GameTuning::default();
        let spawn = SpawnTuning::default();
        let mut rng = StdRng::seed_from_u64(11);
        let mut cats = Vec::new();
        let mut next_id = 0;

        let mut dropped = 0;
        for shake in 1..=40 {
            if maybe_drop_cat(
                &mut cats, &mut next_id, shake, BOUNDS, &game, &spawn, &mut rng,
            ) {
                dropped += 1;
            }
        }

        assert!(dropped > 0);
        for cat in &cats {
            assert!(cat.x >= 35.0 && cat.x <= 465.0);
            assert_eq!(cat.y, -50.0);
            assert_eq!(cat.fall_speed, 1.0);
            assert_eq!(cat.phase, CatPhase::Falling);
            assert!(cat.variant < 6);
        }
    }

    #[test]
    fn no_cat_drops_on_odd_prime_shakes_outside_period() {
        // shake_count % period can never be zero for shake 1 since periods are >= 2.
        let game = GameTuning::default();
        let spawn = SpawnTuning::default();
        let mut rng = StdRng::seed_from_u64(5);
        let mut cats = Vec::new();
        let mut next_id = 0;

        for _ in 0..20 {
            assert!(!maybe_drop_cat(
                &mut cats, &mut next_id, 1, BOUNDS, &game, &spawn, &mut rng,
            ));
        }
        assert!(cats.is_empty());
    }

    #[test]
    fn vehicles_enter_from_opposite_edges() {
        let game = GameTuning::default();
        let spawn = SpawnTuning::default();

        let truck = spawn_vehicle(VehicleKind::FireTruck, BOUNDS, &game, &spawn);
        assert!(truck.x < 0.0);
        assert!(truck.speed > 0.0);
        assert_eq!(truck.y, 520.0 - 40.0);

        let heli = spawn_vehicle(VehicleKind::Helicopter, BOUNDS, &game, &spawn);
        assert!(heli.x > BOUNDS.width);
        assert!(heli.speed < 0.0);
    }
}
