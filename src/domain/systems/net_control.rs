use crate::domain::state::{Bounds, Direction, Net};
use crate::domain::tuning::GameTuning;

/// Applies one discrete move to the net and clamps it to the playfield.
/// Pure and synchronous; the session guards the playing-phase check.
pub fn step(net: &mut Net, direction: Direction, bounds: Bounds, tuning: &GameTuning) {
    let delta = match direction {
        Direction::Left => -tuning.net_step,
        Direction::Right => tuning.net_step,
    };
    net.x = (net.x + delta).clamp(tuning.net_margin, bounds.width - tuning.net_margin);
}

#[cfg(test)]
mod tests {
    use super::*;

    const BOUNDS: Bounds = Bounds {
        width: 500.0,
        height: 600.0,
    };

    #[test]
    fn net_moves_by_fixed_step() {
        let tuning = GameTuning::default();
        let mut net = Net { x: 250.0 };

        step(&mut net, Direction::Left, BOUNDS, &tuning);
        assert_eq!(net.x, 225.0);
        step(&mut net, Direction::Right, BOUNDS, &tuning);
        step(&mut net, Direction::Right, BOUNDS, &tuning);
        assert_eq!(net.x, 275.0);
    }

    #[test]
    fn net_stays_within_bounds_after_any_move_sequence() {
        let tuning = GameTuning::default();
        let mut net = Net { x: 250.0 };

        for _ in 0..100 {
            step(&mut net, Direction::Left, BOUNDS, &tuning);
            assert!(net.x >= 60.0);
        }
        assert_eq!(net.x, 60.0);

        for _ in 0..100 {
            step(&mut net, Direction::Right, BOUNDS, &tuning);
            assert!(net.x <= 440.0);
        }
        assert_eq!(net.x, 440.0);
    }
}
