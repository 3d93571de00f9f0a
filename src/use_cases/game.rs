// The per-connection session task: a fixed 60 Hz frame driver, an independent
// one-second countdown, and randomized background-traffic timers, all torn
// down together through one shutdown notification.

use crate::domain::state::{Bounds, VehicleKind};
use crate::domain::tuning::{GameTuning, SpawnTuning};
use crate::use_cases::session::GameSession;
use crate::use_cases::types::{SessionEvent, SessionUpdate};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{Notify, broadcast, mpsc};
use tokio::time::Instant;
use tracing::debug;

/// Shared configuration for spawning session tasks.
#[derive(Debug, Clone)]
pub struct SessionSettings {
    /// Fixed frame interval for the simulation loop.
    pub tick_interval: Duration,
    /// Playfield dimensions the session simulates against.
    pub bounds: Bounds,
    pub tuning: GameTuning,
    pub spawn: SpawnTuning,
}

fn vehicle_deadline<R: Rng>(rng: &mut R, min_secs: u64, max_secs: u64) -> Instant {
    Instant::now() + Duration::from_secs(rng.gen_range(min_secs..=max_secs))
}

/// Drives one arcade session until shutdown is notified.
///
/// Inputs are drained non-blockingly at the top of every frame; a snapshot is
/// broadcast after every frame regardless of phase so clients can render the
/// ready and game-over screens. The frame arm is polled before the countdown
/// arm (biased select), so when a miss-cap and a time-expiry would land in the
/// same instant the session ends with TooManyMisses.
pub async fn session_task(
    mut events_rx: mpsc::Receiver<SessionEvent>,
    snapshot_tx: broadcast::Sender<SessionUpdate>,
    shutdown: Arc<Notify>,
    settings: SessionSettings,
) {
    let mut session = GameSession::new(
        settings.bounds,
        settings.tuning,
        settings.spawn,
        StdRng::from_entropy(),
    );

    let mut frames = tokio::time::interval(settings.tick_interval);
    let mut countdown = tokio::time::interval(Duration::from_secs(1));

    // Scheduling jitter only; simulation randomness stays inside the session.
    let mut timer_rng = StdRng::from_entropy();
    let mut fire_truck_due = vehicle_deadline(
        &mut timer_rng,
        settings.spawn.fire_truck_min_secs,
        settings.spawn.fire_truck_max_secs,
    );
    let mut helicopter_due = vehicle_deadline(
        &mut timer_rng,
        settings.spawn.helicopter_min_secs,
        settings.spawn.helicopter_max_secs,
    );

    loop {
        let mut align_countdown = false;

        tokio::select! {
            biased;

            _ = shutdown.notified() => {
                // Exit cleanly when the connection goes away.
                debug!("session task shutting down");
                break;
            }
            _ = frames.tick() => {
                while let Ok(event) = events_rx.try_recv() {
                    match event {
                        SessionEvent::Start => {
                            session.start();
                            align_countdown = true;
                        }
                        SessionEvent::Restart => {
                            session.restart();
                            align_countdown = true;
                        }
                        SessionEvent::Shake => session.shake(),
                        SessionEvent::Move { direction } => session.move_net(direction),
                    }
                }

                session.frame();
                let _ = snapshot_tx.send(session.snapshot());
            }
            _ = countdown.tick() => {
                session.countdown_tick();
            }
            _ = tokio::time::sleep_until(fire_truck_due) => {
                session.spawn_vehicle(VehicleKind::FireTruck);
                fire_truck_due = vehicle_deadline(
                    &mut timer_rng,
                    settings.spawn.fire_truck_min_secs,
                    settings.spawn.fire_truck_max_secs,
                );
            }
            _ = tokio::time::sleep_until(helicopter_due) => {
                session.spawn_vehicle(VehicleKind::Helicopter);
                helicopter_due = vehicle_deadline(
                    &mut timer_rng,
                    settings.spawn.helicopter_min_secs,
                    settings.spawn.helicopter_max_secs,
                );
            }
        }

        // A (re)start begins a full first second rather than inheriting
        // whatever was left of the previous countdown interval.
        if align_countdown {
            countdown.reset();
        }
    }
}
