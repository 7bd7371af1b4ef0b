//! Carnival entry point
//!
//! Runs a scripted headless session at 60 Hz: the camera aims at each balloon
//! in turn, a dart is picked up and thrown, and the round ends with a
//! basketball toss. `RUST_LOG=debug` shows every state change.
//!
//! Usage: `carnival [tuning.json]`

#[cfg(not(target_arch = "wasm32"))]
use carnival::{
    GameSession, Tuning,
    consts::{BALLOON_HEIGHT, BALLOON_X, FRAME_DT},
    sim::Transform,
};

/// Give up on a throw after this many frames
#[cfg(not(target_arch = "wasm32"))]
const MAX_FRAMES_PER_THROW: u32 = 600;

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Carnival (native) starting...");

    let path = std::env::args().nth(1).map(std::path::PathBuf::from);
    let tuning = Tuning::load_or_default(path.as_deref());

    let mut session = match GameSession::new(tuning) {
        Ok(session) => session,
        Err(e) => {
            log::error!("Invalid tuning: {e}");
            std::process::exit(1);
        }
    };

    let mut clock = 0.0f32;
    for &x in &BALLOON_X {
        // Eye one unit above the balloons so the held dart lines up with them
        session.set_camera_transform(Transform::translation(x, BALLOON_HEIGHT + 1.0, 25.0));
        press(&mut session, "x");
        press(&mut session, "t");
        run_throw(&mut session, &mut clock);
    }

    session.set_camera_transform(carnival::scene::initial_camera_transform());
    press(&mut session, "n");
    press(&mut session, "=");
    press(&mut session, "b");
    run_throw(&mut session, &mut clock);

    log::info!(
        "Final score: {} / {} after {} frames ({:.2}s)",
        session.current_score(),
        session.round().targets().len(),
        session.frames(),
        session.elapsed()
    );
}

/// Feed one key through the session's key bindings
#[cfg(not(target_arch = "wasm32"))]
fn press(session: &mut GameSession, key: &str) {
    match session.tuning().keys.trigger_for(key) {
        Some(trigger) => session.trigger(trigger),
        None => log::warn!("key {key:?} is not bound"),
    }
}

/// Step frames until the thrown projectile hits, misses or times out
#[cfg(not(target_arch = "wasm32"))]
fn run_throw(session: &mut GameSession, clock: &mut f32) {
    for _ in 0..MAX_FRAMES_PER_THROW {
        *clock += FRAME_DT;
        let report = session.advance(*clock, FRAME_DT);
        if !report.popped.is_empty() || report.missed {
            return;
        }
        let in_flight = session
            .round()
            .active_projectile()
            .is_some_and(|p| p.is_in_flight());
        if !in_flight {
            return;
        }
    }
    log::warn!("throw still in flight after {MAX_FRAMES_PER_THROW} frames");
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // The library is driven by the host page; nothing to run here
}
