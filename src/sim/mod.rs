//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Time comes in as a parameter, never from a clock
//! - Motion is closed-form in time since launch
//! - Stable iteration order (targets in creation order)
//! - No rendering or platform dependencies

pub mod bounds;
pub mod collision;
pub mod motion;
pub mod session;
pub mod state;
pub mod tick;
pub mod transform;

pub use bounds::{BoundingVolume, Collider, MAX_SUBDIVISIONS, unit_sphere_samples};
pub use collision::{CollisionReport, resolve_collisions};
pub use motion::{MotionKind, Parabolic};
pub use session::GameSession;
pub use state::{
    Balloon, GameMode, Projectile, ProjectileKind, ProjectileState, Round, ShotOutcome,
};
pub use tick::{FrameReport, advance};
pub use transform::{Transform, compose};
