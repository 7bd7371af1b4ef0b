//! Per-frame simulation step
//!
//! Called once per rendered frame with the scene clock. Motion is closed-form
//! in elapsed time, so the step never integrates; `delta_time` is only
//! sanitized and reported.

use super::collision::resolve_collisions;
use super::session::GameSession;
use super::state::ShotOutcome;

/// What changed during one `advance`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrameReport {
    /// Balloons popped this frame
    pub popped: Vec<u32>,
    /// The active projectile was spent as a miss this frame
    pub missed: bool,
    /// Score after the frame
    pub score: u32,
    /// Elapsed time actually used (held if the input went backwards)
    pub elapsed_time: f32,
    /// Frame delta after clamping
    pub delta_time: f32,
}

/// Advance the session to `elapsed_time`.
///
/// Negative or non-finite `delta_time` is treated as 0. An `elapsed_time`
/// lower than the last accepted one (or non-finite) is ignored and the
/// previous value is held.
pub fn advance(session: &mut GameSession, elapsed_time: f32, delta_time: f32) -> FrameReport {
    let delta_time = if delta_time.is_finite() && delta_time > 0.0 {
        delta_time
    } else {
        if delta_time != 0.0 {
            log::debug!("clamped delta time {delta_time} to 0");
        }
        0.0
    };

    if elapsed_time.is_finite() && elapsed_time >= session.elapsed {
        session.elapsed = elapsed_time;
    } else {
        log::debug!(
            "elapsed time {elapsed_time} behind clock {}, holding",
            session.elapsed
        );
    }
    session.frames += 1;
    let now = session.elapsed;

    session.hold_idle();
    let since_launch = session
        .round
        .active_projectile_mut()
        .and_then(|projectile| projectile.update_flight(now));

    let hits = resolve_collisions(&mut session.round, &session.samples);

    let mut missed = false;
    if let Some(flight_time) = since_launch {
        let max_flight = session.tuning.max_flight_seconds;
        let ground = session.tuning.basketball.ground_height;
        if let Some(projectile) = session.round.active_projectile_mut() {
            if projectile.is_in_flight() {
                let grounded =
                    projectile.motion.is_ballistic() && projectile.pose().origin().y < ground;
                if flight_time > max_flight || grounded {
                    missed = projectile.retire(ShotOutcome::Missed);
                    log::info!(
                        "projectile {} missed after {:.2}s{}",
                        projectile.id,
                        flight_time,
                        if grounded { " (ground)" } else { "" }
                    );
                }
            }
        }
    }

    FrameReport {
        popped: hits.popped,
        missed,
        score: session.round.score(),
        elapsed_time: now,
        delta_time,
    }
}
