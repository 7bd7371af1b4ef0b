//! Carnival - balloon darts and a basketball toss
//!
//! Core modules:
//! - `sim`: Deterministic simulation (transforms, collisions, motion, game state)
//! - `renderer`: Render handoff (draw list and GPU instance data)
//! - `scene`: The carnival layout
//! - `input`: Key bindings to game triggers
//! - `tuning`: Data-driven game balance

pub mod error;
pub mod input;
pub mod renderer;
pub mod scene;
pub mod sim;
pub mod tuning;

pub use error::ConfigError;
pub use input::{Keymap, Trigger};
pub use renderer::{DrawItem, DrawableKind};
pub use sim::{FrameReport, GameSession, advance};
pub use tuning::Tuning;

/// Scene layout constants
pub mod consts {
    use glam::Vec3;

    /// Frame step used by the headless driver (60 Hz)
    pub const FRAME_DT: f32 = 1.0 / 60.0;

    /// Starting camera
    pub const CAMERA_EYE: Vec3 = Vec3::new(0.0, 3.0, 25.0);
    pub const CAMERA_TARGET: Vec3 = Vec3::new(0.0, 3.0, 0.0);

    /// Balloon x positions along the booth wall, in creation order
    pub const BALLOON_X: [f32; 5] = [-5.0, -3.9, -2.8, -6.1, -7.2];
    pub const BALLOON_HEIGHT: f32 = 3.2;
    pub const BALLOON_DEPTH: f32 = 0.2;

    pub const DART_COUNT: usize = 5;
}
