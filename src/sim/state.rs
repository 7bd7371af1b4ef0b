//! Game entities and round bookkeeping
//!
//! Balloons pop once and stay popped. Projectiles walk
//! Idle → Armed → InFlight → Spent, and only re-arming brings a spent one back.
//! The `Round` owns both sets plus the score; popping and scoring are
//! restricted to the collision resolver.

use serde::{Deserialize, Serialize};

use super::bounds::{BoundingVolume, Collider};
use super::motion::MotionKind;
use super::transform::Transform;

/// Which game the player is currently playing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GameMode {
    #[default]
    Darts,
    Basketball,
}

/// Projectile archetype
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProjectileKind {
    Dart,
    Basketball,
}

/// Why a projectile left play
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ShotOutcome {
    /// Popped at least one balloon
    Hit,
    /// Flew too long or hit the ground
    Missed,
    /// Another projectile was selected while this one was in play
    Retired,
}

/// Projectile lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ProjectileState {
    /// Held at the holster pose, not collision eligible
    Idle,
    /// Launch origin captured, not moving yet
    Armed { origin: Transform },
    /// Pose driven by the motion kind from `origin` since `launch_time`
    InFlight { origin: Transform, launch_time: f32 },
    /// Out of play until re-armed
    Spent { outcome: ShotOutcome },
}

/// A throwable dart or basketball
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Projectile {
    pub id: u32,
    pub kind: ProjectileKind,
    /// Motion used for the next (or current) flight
    pub motion: MotionKind,
    pub collider: Collider,
    /// Render tint, not used by the simulation
    pub color: [f32; 4],
    state: ProjectileState,
    pose: Transform,
    visible: bool,
}

impl Projectile {
    /// New idle projectile, hidden until selected
    pub fn new(
        id: u32,
        kind: ProjectileKind,
        motion: MotionKind,
        collider: Collider,
        color: [f32; 4],
    ) -> Self {
        Self {
            id,
            kind,
            motion,
            collider,
            color,
            state: ProjectileState::Idle,
            pose: Transform::IDENTITY,
            visible: false,
        }
    }

    #[inline]
    pub fn state(&self) -> ProjectileState {
        self.state
    }

    /// Current world transform
    #[inline]
    pub fn pose(&self) -> Transform {
        self.pose
    }

    #[inline]
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    #[inline]
    pub fn is_in_flight(&self) -> bool {
        matches!(self.state, ProjectileState::InFlight { .. })
    }

    #[inline]
    pub fn is_spent(&self) -> bool {
        matches!(self.state, ProjectileState::Spent { .. })
    }

    pub fn launch_time(&self) -> Option<f32> {
        match self.state {
            ProjectileState::InFlight { launch_time, .. } => Some(launch_time),
            _ => None,
        }
    }

    pub fn launch_origin(&self) -> Option<Transform> {
        match self.state {
            ProjectileState::Armed { origin } | ProjectileState::InFlight { origin, .. } => {
                Some(origin)
            }
            _ => None,
        }
    }

    /// Move an idle projectile to its resting pose. Other states keep their pose.
    pub fn hold_at(&mut self, holster: Transform) {
        if self.state == ProjectileState::Idle {
            self.pose = holster;
        }
    }

    /// Idle → Armed, capturing the launch origin
    pub fn arm(&mut self, origin: Transform) -> bool {
        if self.state != ProjectileState::Idle {
            return false;
        }
        self.state = ProjectileState::Armed { origin };
        self.pose = origin;
        log::debug!("projectile {} armed", self.id);
        true
    }

    /// Armed → InFlight at `time`
    pub fn launch(&mut self, time: f32) -> bool {
        let ProjectileState::Armed { origin } = self.state else {
            return false;
        };
        self.state = ProjectileState::InFlight {
            origin,
            launch_time: time,
        };
        log::debug!("projectile {} launched at {:.3}s", self.id, time);
        true
    }

    /// InFlight → Idle (the throw key toggles the dart back into the hand)
    pub fn recall(&mut self) -> bool {
        if !self.is_in_flight() {
            return false;
        }
        self.state = ProjectileState::Idle;
        log::debug!("projectile {} recalled", self.id);
        true
    }

    /// Take the projectile out of play. Spent projectiles keep their first outcome.
    pub fn retire(&mut self, outcome: ShotOutcome) -> bool {
        if self.is_spent() {
            return false;
        }
        self.state = ProjectileState::Spent { outcome };
        self.visible = false;
        log::debug!("projectile {} spent ({:?})", self.id, outcome);
        true
    }

    /// Back to Idle and shown, from any state
    pub fn rearm(&mut self) {
        self.state = ProjectileState::Idle;
        self.visible = true;
    }

    /// Recompute the in-flight pose at `elapsed`.
    /// Returns the time since launch, or `None` when not in flight.
    pub fn update_flight(&mut self, elapsed: f32) -> Option<f32> {
        let ProjectileState::InFlight {
            origin,
            launch_time,
        } = self.state
        else {
            return None;
        };
        let since_launch = (elapsed - launch_time).max(0.0);
        self.pose = self.motion.position(&origin, since_launch);
        Some(since_launch)
    }

    /// Bounding volume at the current pose
    pub fn volume(&self) -> BoundingVolume {
        self.collider.volume(self.id, &self.pose)
    }
}

/// A balloon target, fixed in place
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Balloon {
    pub id: u32,
    location: Transform,
    pub collider: Collider,
    pub color: [f32; 4],
    popped: bool,
}

impl Balloon {
    pub fn new(id: u32, location: Transform, collider: Collider, color: [f32; 4]) -> Self {
        Self {
            id,
            location,
            collider,
            color,
            popped: false,
        }
    }

    #[inline]
    pub fn location(&self) -> Transform {
        self.location
    }

    #[inline]
    pub fn is_popped(&self) -> bool {
        self.popped
    }

    pub fn volume(&self) -> BoundingVolume {
        self.collider.volume(self.id, &self.location)
    }

    /// Intact → Popped. Returns false if it was already popped.
    pub(super) fn pop(&mut self) -> bool {
        if self.popped {
            return false;
        }
        self.popped = true;
        true
    }
}

/// Everything one play-through owns: targets, projectiles, mode and score
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Round {
    targets: Vec<Balloon>,
    darts: Vec<Projectile>,
    basketball: Option<Projectile>,
    mode: GameMode,
    /// None until the first dart is picked up
    active_dart: Option<usize>,
    score: u32,
    basketball_power: f32,
    next_id: u32,
}

impl Round {
    /// Empty round in dart mode
    pub fn new(basketball_power: f32) -> Self {
        Self {
            targets: Vec::new(),
            darts: Vec::new(),
            basketball: None,
            mode: GameMode::Darts,
            active_dart: None,
            score: 0,
            basketball_power,
            next_id: 1,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Add a balloon; targets are tested in the order they were added
    pub fn add_balloon(&mut self, location: Transform, collider: Collider, color: [f32; 4]) -> u32 {
        let id = self.next_entity_id();
        self.targets.push(Balloon::new(id, location, collider, color));
        id
    }

    pub fn add_dart(&mut self, motion: MotionKind, collider: Collider, color: [f32; 4]) -> u32 {
        let id = self.next_entity_id();
        let dart = Projectile::new(id, ProjectileKind::Dart, motion, collider, color);
        self.darts.push(dart);
        id
    }

    pub fn set_basketball(
        &mut self,
        motion: MotionKind,
        collider: Collider,
        color: [f32; 4],
    ) -> u32 {
        let id = self.next_entity_id();
        self.basketball = Some(Projectile::new(
            id,
            ProjectileKind::Basketball,
            motion,
            collider,
            color,
        ));
        id
    }

    #[inline]
    pub fn targets(&self) -> &[Balloon] {
        &self.targets
    }

    #[inline]
    pub fn darts(&self) -> &[Projectile] {
        &self.darts
    }

    #[inline]
    pub fn basketball(&self) -> Option<&Projectile> {
        self.basketball.as_ref()
    }

    #[inline]
    pub fn mode(&self) -> GameMode {
        self.mode
    }

    #[inline]
    pub fn active_dart_index(&self) -> Option<usize> {
        self.active_dart
    }

    #[inline]
    pub fn score(&self) -> u32 {
        self.score
    }

    #[inline]
    pub fn basketball_power(&self) -> f32 {
        self.basketball_power
    }

    /// Balloons still intact
    pub fn remaining_targets(&self) -> usize {
        self.targets.iter().filter(|b| !b.is_popped()).count()
    }

    /// The single projectile eligible for motion and collision in the current mode
    pub fn active_projectile(&self) -> Option<&Projectile> {
        match self.mode {
            GameMode::Darts => self.active_dart.and_then(|i| self.darts.get(i)),
            GameMode::Basketball => self.basketball.as_ref(),
        }
    }

    pub fn active_projectile_mut(&mut self) -> Option<&mut Projectile> {
        match self.mode {
            GameMode::Darts => self.active_dart.and_then(|i| self.darts.get_mut(i)),
            GameMode::Basketball => self.basketball.as_mut(),
        }
    }

    /// Retire whatever is in play (not already spent)
    fn retire_active(&mut self) {
        if let Some(projectile) = self.active_projectile_mut() {
            projectile.retire(ShotOutcome::Retired);
        }
    }

    /// Switch to darts and pick up the next one, round-robin.
    ///
    /// The first pick is dart 0; after that the index advances modulo the
    /// number of darts, wrapping back to 0. Returns the new index.
    pub fn select_next_dart(&mut self) -> Option<usize> {
        if self.darts.is_empty() {
            return None;
        }
        self.retire_active();

        let next = match self.active_dart {
            None => 0,
            Some(i) => (i + 1) % self.darts.len(),
        };
        self.mode = GameMode::Darts;
        self.active_dart = Some(next);
        self.darts[next].rearm();
        log::debug!("dart {} selected", next);
        Some(next)
    }

    /// Switch to basketball and re-arm the ball
    pub fn select_basketball(&mut self) -> bool {
        if self.basketball.is_none() {
            return false;
        }
        self.retire_active();
        self.mode = GameMode::Basketball;
        if let Some(ball) = self.basketball.as_mut() {
            ball.rearm();
        }
        log::debug!("basketball mode");
        true
    }

    /// Change the throw power, clamped to `[min, max]`. Returns the new power.
    ///
    /// An empty range resolves to `max`.
    pub fn adjust_power(&mut self, delta: f32, min: f32, max: f32) -> f32 {
        if delta.is_finite() {
            self.basketball_power = (self.basketball_power + delta).max(min).min(max);
        }
        self.basketball_power
    }

    /// Put every idle projectile at its resting pose
    pub fn hold_idle(&mut self, dart_holster: Transform, ball_holster: Transform) {
        for dart in &mut self.darts {
            dart.hold_at(dart_holster);
        }
        if let Some(ball) = self.basketball.as_mut() {
            ball.hold_at(ball_holster);
        }
    }

    /// Active projectile and the target list, borrowed together for collision
    pub(super) fn collision_view(&mut self) -> (Option<&mut Projectile>, &mut [Balloon]) {
        let projectile = match self.mode {
            GameMode::Darts => self.active_dart.and_then(|i| self.darts.get_mut(i)),
            GameMode::Basketball => self.basketball.as_mut(),
        };
        (projectile, &mut self.targets)
    }

    pub(super) fn add_score(&mut self, points: u32) {
        self.score = self.score.saturating_add(points);
    }
}
