//! Top-level game session
//!
//! Owns the tuning, the round, the camera pose and the simulation clock. The
//! application's loop holds one of these and passes it by `&mut` to
//! [`advance`](super::tick::advance) every frame; the input layer calls the
//! trigger methods between frames.

use glam::Vec3;

use super::bounds::unit_sphere_samples;
use super::state::{GameMode, Projectile, ProjectileState, Round};
use super::tick::{FrameReport, advance};
use super::transform::Transform;
use crate::error::ConfigError;
use crate::input::Trigger;
use crate::renderer::{self, DrawItem};
use crate::scene;
use crate::tuning::Tuning;

/// All mutable game state, with no ambient globals
#[derive(Debug, Clone)]
pub struct GameSession {
    pub(super) tuning: Tuning,
    pub(super) round: Round,
    /// Camera world transform from the external camera controls
    pub(super) camera: Transform,
    /// Last accepted elapsed time (seconds since scene start)
    pub(super) elapsed: f32,
    pub(super) frames: u64,
    /// Unit-sphere sample points shared by every collision test
    pub(super) samples: Vec<Vec3>,
    dart_offset: Transform,
    ball_offset: Transform,
}

impl GameSession {
    /// Session over the standard carnival round
    pub fn new(tuning: Tuning) -> Result<Self, ConfigError> {
        let round = scene::carnival_round(&tuning)?;
        Self::with_round(tuning, round)
    }

    /// Session over a caller-built round
    pub fn with_round(tuning: Tuning, round: Round) -> Result<Self, ConfigError> {
        tuning.validate()?;
        let samples = unit_sphere_samples(tuning.bounding_subdivisions)?;
        let dart = tuning.dart_hold_offset()?;
        let ball = tuning.basketball_hold_offset()?;

        let mut session = Self {
            tuning,
            round,
            camera: scene::initial_camera_transform(),
            elapsed: 0.0,
            frames: 0,
            samples,
            dart_offset: Transform::translation(dart.x, dart.y, dart.z),
            ball_offset: Transform::translation(ball.x, ball.y, ball.z),
        };
        session.hold_idle();
        log::info!(
            "Session started: {} balloons, {} darts, {} collision samples",
            session.round.targets().len(),
            session.round.darts().len(),
            session.samples.len()
        );
        Ok(session)
    }

    #[inline]
    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    #[inline]
    pub fn round(&self) -> &Round {
        &self.round
    }

    #[inline]
    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    #[inline]
    pub fn frames(&self) -> u64 {
        self.frames
    }

    #[inline]
    pub fn samples(&self) -> &[Vec3] {
        &self.samples
    }

    #[inline]
    pub fn camera_transform(&self) -> Transform {
        self.camera
    }

    #[inline]
    pub fn current_score(&self) -> u32 {
        self.round.score()
    }

    /// Update the camera pose. Idle projectiles follow it immediately.
    pub fn set_camera_transform(&mut self, camera: Transform) {
        self.camera = camera;
        self.hold_idle();
    }

    /// Resting pose of a dart in hand
    pub fn dart_holster(&self) -> Transform {
        self.camera.times(&self.dart_offset)
    }

    /// Resting pose of the basketball in hand
    pub fn basketball_holster(&self) -> Transform {
        self.camera.times(&self.ball_offset)
    }

    pub(super) fn hold_idle(&mut self) {
        let dart = self.dart_holster();
        let ball = self.basketball_holster();
        self.round.hold_idle(dart, ball);
    }

    /// Advance the simulation; see [`advance`]
    pub fn advance(&mut self, elapsed_time: f32, delta_time: f32) -> FrameReport {
        advance(self, elapsed_time, delta_time)
    }

    /// Dispatch one input trigger
    pub fn trigger(&mut self, trigger: Trigger) {
        match trigger {
            Trigger::ThrowDart => self.arm_and_launch_projectile(),
            Trigger::NextDart => self.select_next_projectile(),
            Trigger::ThrowBasketball => self.arm_and_launch_basketball(),
            Trigger::BasketballMode => self.select_basketball_mode(),
            Trigger::PowerUp => {
                let step = self.tuning.basketball.power_step;
                self.adjust_basketball_power(step);
            }
            Trigger::PowerDown => {
                let step = self.tuning.basketball.power_step;
                self.adjust_basketball_power(-step);
            }
        }
    }

    /// Throw the dart in hand, or pull back one already thrown
    pub fn arm_and_launch_projectile(&mut self) {
        if self.round.mode() != GameMode::Darts {
            log::debug!("throw dart ignored: not in dart mode");
            return;
        }
        let holster = self.dart_holster();
        let now = self.elapsed;
        match self.round.active_projectile_mut() {
            Some(dart) => toggle_throw(dart, holster, now),
            None => log::debug!("throw dart ignored: no dart selected"),
        }
    }

    /// Pick up the next dart (round-robin over the five)
    pub fn select_next_projectile(&mut self) {
        if let Some(index) = self.round.select_next_dart() {
            log::info!("Dart {} in hand", index + 1);
        }
        self.hold_idle();
    }

    /// Throw the basketball with the current power, or pull it back
    pub fn arm_and_launch_basketball(&mut self) {
        if self.round.mode() != GameMode::Basketball {
            log::debug!("throw basketball ignored: not in basketball mode");
            return;
        }
        let holster = self.basketball_holster();
        let now = self.elapsed;
        let power = self.round.basketball_power();
        match self.round.active_projectile_mut() {
            Some(ball) => {
                if ball.state() == ProjectileState::Idle {
                    ball.motion = ball.motion.with_velocity(power);
                }
                toggle_throw(ball, holster, now);
            }
            None => log::debug!("throw basketball ignored: no basketball"),
        }
    }

    /// Switch to the basketball toss with the ball in hand
    pub fn select_basketball_mode(&mut self) {
        if self.round.select_basketball() {
            log::info!("Basketball mode, power {:.1}", self.round.basketball_power());
        }
        self.hold_idle();
    }

    /// Change throw power by `delta`, clamped to the tuning range
    pub fn adjust_basketball_power(&mut self, delta: f32) {
        let ball = &self.tuning.basketball;
        let power = self.round.adjust_power(delta, ball.min_power, ball.max_power);
        log::debug!("basketball power {:.1}", power);
    }

    /// Render handoff for this frame
    pub fn draw_list(&self) -> Vec<DrawItem> {
        renderer::draw_list(self)
    }
}

/// Shared throw key behavior: idle → armed → in flight, in flight → back in hand
fn toggle_throw(projectile: &mut Projectile, holster: Transform, now: f32) {
    match projectile.state() {
        ProjectileState::Idle => {
            projectile.arm(holster);
            projectile.launch(now);
        }
        ProjectileState::Armed { .. } => {
            projectile.launch(now);
        }
        ProjectileState::InFlight { .. } => {
            projectile.recall();
            projectile.hold_at(holster);
        }
        ProjectileState::Spent { .. } => {
            log::debug!("projectile {} is spent, select it again to re-arm", projectile.id);
        }
    }
}
