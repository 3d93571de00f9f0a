// The arcade session state machine: Ready -> Playing -> GameOver.
//
// All mutable loop state lives in this one owned context object. It is
// constructed when a client connects, driven by the session task, and dropped
// on teardown; nothing is held in ambient globals.

use crate::domain::state::{
    Bounds, CatSnapshot, Direction, FallingCat, FallingLeaf, GameOverCause, LeafSnapshot, Net,
    SessionPhase, Vehicle, VehicleKind, VehicleSnapshot,
};
use crate::domain::systems::{falling, net_control, spawner};
use crate::domain::tuning::{GameTuning, SpawnTuning};
use crate::use_cases::types::SessionUpdate;
use rand::rngs::StdRng;
use tracing::info;

pub struct GameSession {
    phase: SessionPhase,
    score: u32,
    missed_cats: u32,
    time_left: u32,
    game_over_cause: Option<GameOverCause>,

    net: Net,
    cats: Vec<FallingCat>,
    leaves: Vec<FallingLeaf>,
    vehicles: Vec<Vehicle>,

    shake_count: u32,
    next_cat_id: u64,
    next_leaf_id: u64,
    frame_count: u64,

    bounds: Bounds,
    tuning: GameTuning,
    spawn: SpawnTuning,
    rng: StdRng,
}

impl GameSession {
    pub fn new(bounds: Bounds, tuning: GameTuning, spawn: SpawnTuning, rng: StdRng) -> Self {
        Self {
            phase: SessionPhase::Ready,
            score: 0,
            missed_cats: 0,
            time_left: tuning.game_duration_secs,
            game_over_cause: None,
            net: Net {
                x: bounds.width / 2.0,
            },
            cats: Vec::new(),
            leaves: Vec::new(),
            vehicles: Vec::new(),
            shake_count: 0,
            next_cat_id: 0,
            next_leaf_id: 0,
            frame_count: 0,
            bounds,
            tuning,
            spawn,
            rng,
        }
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn is_playing(&self) -> bool {
        self.phase == SessionPhase::Playing
    }

    /// Ready -> Playing. The only transition out of Ready.
    pub fn start(&mut self) {
        if self.phase == SessionPhase::Ready {
            self.begin();
        }
    }

    /// Rebuilds a fresh Ready -> Playing cycle from any prior state,
    /// re-initializing every counter and entity set.
    pub fn restart(&mut self) {
        self.begin();
    }

    fn begin(&mut self) {
        self.phase = SessionPhase::Playing;
        self.score = 0;
        self.missed_cats = 0;
        self.time_left = self.tuning.game_duration_secs;
        self.game_over_cause = None;
        self.net.x = self.bounds.width / 2.0;
        self.cats.clear();
        self.leaves.clear();
        self.vehicles.clear();
        self.shake_count = 0;
        self.next_cat_id = 0;
        self.next_leaf_id = 0;
        info!("session started");
    }

    /// Terminal transition; the first cause wins and later calls are no-ops.
    fn end(&mut self, cause: GameOverCause) {
        if self.phase == SessionPhase::GameOver {
            return;
        }
        self.phase = SessionPhase::GameOver;
        self.game_over_cause = Some(cause);
        info!(
            score = self.score,
            missed = self.missed_cats,
            cause = ?cause,
            "session ended"
        );
    }

    /// One tree shake: a burst of leaves, and a cat every 2-4 shakes.
    pub fn shake(&mut self) {
        if !self.is_playing() {
            return;
        }
        self.shake_count += 1;
        spawner::shake_leaves(
            &mut self.leaves,
            &mut self.next_leaf_id,
            self.bounds,
            &self.spawn,
            &mut self.rng,
        );
        spawner::maybe_drop_cat(
            &mut self.cats,
            &mut self.next_cat_id,
            self.shake_count,
            self.bounds,
            &self.tuning,
            &self.spawn,
            &mut self.rng,
        );
    }

    pub fn move_net(&mut self, direction: Direction) {
        if !self.is_playing() {
            return;
        }
        net_control::step(&mut self.net, direction, self.bounds, &self.tuning);
    }

    /// Background traffic enters on its own randomized timers.
    pub fn spawn_vehicle(&mut self, kind: VehicleKind) {
        if !self.is_playing() {
            return;
        }
        self.vehicles
            .push(spawner::spawn_vehicle(kind, self.bounds, &self.tuning, &self.spawn));
    }

    /// Advances the world one frame and folds the deltas into the counters.
    pub fn frame(&mut self) {
        if !self.is_playing() {
            return;
        }
        self.frame_count = self.frame_count.wrapping_add(1);

        falling::tick_leaves(&mut self.leaves, self.bounds, &self.tuning);
        falling::tick_vehicles(&mut self.vehicles, self.bounds, &self.tuning);
        let deltas = falling::tick_cats(&mut self.cats, self.net.x, self.bounds, &self.tuning);

        self.score += deltas.caught;
        if deltas.missed > 0 {
            self.missed_cats += deltas.missed;
            if self.missed_cats >= self.tuning.max_misses {
                self.end(GameOverCause::TooManyMisses);
            }
        }
    }

    /// Decrements the countdown once per wall-clock second while playing.
    pub fn countdown_tick(&mut self) {
        if !self.is_playing() {
            return;
        }
        self.time_left = self.time_left.saturating_sub(1);
        if self.time_left == 0 {
            self.end(GameOverCause::TimeExpired);
        }
    }

    pub fn snapshot(&self) -> SessionUpdate {
        SessionUpdate {
            frame: self.frame_count,
            phase: self.phase,
            score: self.score,
            missed_cats: self.missed_cats,
            time_left: self.time_left,
            net_x: self.net.x,
            game_over_cause: self.game_over_cause,
            cats: self.cats.iter().map(CatSnapshot::from).collect(),
            leaves: self.leaves.iter().map(LeafSnapshot::from).collect(),
            vehicles: self.vehicles.iter().map(VehicleSnapshot::from).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::state::CatPhase;
    use rand::SeedableRng;

    fn session() -> GameSession {
        GameSession::new(
            Bounds {
                width: 500.0,
                height: 600.0,
            },
            GameTuning::default(),
            SpawnTuning::default(),
            StdRng::seed_from_u64(42),
        )
    }

    fn playing_session() -> GameSession {
        let mut s = session();
        s.start();
        s
    }

    fn inject_cat(s: &mut GameSession, x: f32, y: f32) {
        s.cats.push(FallingCat {
            id: s.next_cat_id,
            x,
            y,
            variant: 0,
            fall_speed: 1.0,
            phase: CatPhase::Falling,
        });
        s.next_cat_id += 1;
    }

    #[test]
    fn session_starts_ready_and_only_start_begins_play() {
        let mut s = session();
        assert_eq!(s.phase(), SessionPhase::Ready);

        // Inputs before start are no-ops.
        s.shake();
        s.move_net(Direction::Left);
        s.frame();
        let snap = s.snapshot();
        assert_eq!(snap.net_x, 250.0);
        assert!(snap.cats.is_empty() && snap.leaves.is_empty());

        s.start();
        assert_eq!(s.phase(), SessionPhase::Playing);
        assert_eq!(s.snapshot().time_left, 60);
    }

    #[test]
    fn catch_in_net_window_increments_score() {
        let mut s = playing_session();
        // Catch zone threshold is ground(520) - 60 = 460.
        inject_cat(&mut s, 250.0, 459.0);

        s.frame();

        let snap = s.snapshot();
        assert_eq!(snap.score, 1);
        assert_eq!(snap.missed_cats, 0);
    }

    #[test]
    fn miss_outside_net_window_marks_cat_running_away() {
        let mut s = playing_session();
        // 200 px from the net center, well outside the 60 px half-width.
        inject_cat(&mut s, 450.0, 459.0);

        s.frame();

        let snap = s.snapshot();
        assert_eq!(snap.score, 0);
        assert_eq!(snap.missed_cats, 1);
        assert_eq!(s.phase(), SessionPhase::Playing);
    }

    #[test]
    fn third_miss_ends_session_with_too_many_misses() {
        let mut s = playing_session();
        for _ in 0..3 {
            inject_cat(&mut s, 450.0, 459.0);
            s.frame();
            // Let the fleeing cat clear before the next drop.
            for _ in 0..60 {
                s.frame();
            }
        }

        assert_eq!(s.phase(), SessionPhase::GameOver);
        assert_eq!(
            s.snapshot().game_over_cause,
            Some(GameOverCause::TooManyMisses)
        );
        assert_eq!(s.snapshot().missed_cats, 3);
    }

    #[test]
    fn countdown_to_zero_ends_session_with_time_expired() {
        let mut s = playing_session();
        for expected in (0..60).rev() {
            s.countdown_tick();
            assert_eq!(s.snapshot().time_left, expected);
        }

        assert_eq!(s.phase(), SessionPhase::GameOver);
        assert_eq!(
            s.snapshot().game_over_cause,
            Some(GameOverCause::TimeExpired)
        );
    }

    #[test]
    fn first_game_over_cause_wins() {
        let mut s = playing_session();
        for _ in 0..3 {
            inject_cat(&mut s, 450.0, 459.0);
            s.frame();
        }
        assert_eq!(s.phase(), SessionPhase::GameOver);

        // A countdown that would also expire must not overwrite the cause.
        s.time_left = 1;
        s.countdown_tick();
        assert_eq!(
            s.snapshot().game_over_cause,
            Some(GameOverCause::TooManyMisses)
        );
    }

    #[test]
    fn score_and_misses_are_monotonic_within_a_session() {
        let mut s = playing_session();
        let mut last_score = 0;
        let mut last_missed = 0;

        for i in 0..6 {
            let x = if i % 2 == 0 { 250.0 } else { 450.0 };
            inject_cat(&mut s, x, 459.0);
            for _ in 0..80 {
                s.frame();
                let snap = s.snapshot();
                assert!(snap.score >= last_score);
                assert!(snap.missed_cats >= last_missed);
                last_score = snap.score;
                last_missed = snap.missed_cats;
            }
        }
    }

    #[test]
    fn shake_spawns_leaves_and_eventually_cats() {
        let mut s = playing_session();
        for _ in 0..8 {
            s.shake();
        }

        let snap = s.snapshot();
        assert!(snap.leaves.len() >= 6 * 8);
        assert!(!snap.cats.is_empty());
    }

    #[test]
    fn restart_resets_everything_after_game_over() {
        let mut s = playing_session();
        inject_cat(&mut s, 250.0, 459.0);
        s.frame();
        s.shake();
        s.move_net(Direction::Right);
        for _ in 0..60 {
            s.countdown_tick();
        }
        assert_eq!(s.phase(), SessionPhase::GameOver);

        s.restart();

        let snap = s.snapshot();
        assert_eq!(s.phase(), SessionPhase::Playing);
        assert_eq!(snap.score, 0);
        assert_eq!(snap.missed_cats, 0);
        assert_eq!(snap.time_left, 60);
        assert_eq!(snap.net_x, 250.0);
        assert!(snap.cats.is_empty());
        assert!(snap.leaves.is_empty());
        assert!(snap.vehicles.is_empty());
        assert_eq!(snap.game_over_cause, None);
    }

    #[test]
    fn vehicles_only_spawn_while_playing() {
        let mut s = session();
        s.spawn_vehicle(VehicleKind::FireTruck);
        assert!(s.snapshot().vehicles.is_empty());

        s.start();
        s.spawn_vehicle(VehicleKind::FireTruck);
        s.spawn_vehicle(VehicleKind::Helicopter);
        assert_eq!(s.snapshot().vehicles.len(), 2);
    }

    #[test]
    fn inputs_after_game_over_are_ignored() {
        let mut s = playing_session();
        for _ in 0..60 {
            s.countdown_tick();
        }
        let before = s.snapshot();

        s.shake();
        s.move_net(Direction::Left);
        s.frame();
        s.countdown_tick();

        let after = s.snapshot();
        assert_eq!(after.net_x, before.net_x);
        assert_eq!(after.frame, before.frame);
        assert_eq!(after.time_left, before.time_left);
    }
}
