//! Projectile motion
//!
//! Closed-form kinematics: a projectile's pose is a pure function of its
//! launch origin and the time since launch. Nothing is integrated frame by
//! frame, so replaying the same inputs always lands on the same pose.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::transform::Transform;
use crate::error::{ConfigError, ensure_finite, ensure_positive};

/// Constants for an arcing throw
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Parabolic {
    /// Initial vertical velocity (units/s)
    pub velocity: f32,
    /// Vertical acceleration (units/s², negative)
    pub gravity: f32,
    /// Height offset at launch, relative to the origin
    pub initial_height: f32,
    /// Speed along the origin's -z (units/s)
    pub forward_speed: f32,
    /// Speed along the origin's +x (units/s)
    pub lateral_speed: f32,
    /// Spin about the local z axis (radians/s), visual only
    pub spin_rate: f32,
}

impl Parabolic {
    /// Height above the origin `t` seconds after launch
    #[inline]
    pub fn height_at(&self, t: f32) -> f32 {
        self.initial_height + self.velocity * t + 0.5 * self.gravity * t * t
    }

    /// Time of the arc's peak
    #[inline]
    pub fn apex_time(&self) -> f32 {
        -self.velocity / self.gravity
    }
}

/// How a projectile moves once thrown
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum MotionKind {
    /// Straight flight along the origin's -z
    Linear { speed: f32 },
    /// Ballistic arc
    Parabolic(Parabolic),
}

impl MotionKind {
    pub fn linear(speed: f32) -> Result<Self, ConfigError> {
        let speed = ensure_positive("linear speed", speed)?;
        Ok(MotionKind::Linear { speed })
    }

    pub fn parabolic(params: Parabolic) -> Result<Self, ConfigError> {
        ensure_finite("gravity", params.gravity)?;
        if params.gravity >= 0.0 {
            return Err(ConfigError::NonNegativeGravity(params.gravity));
        }
        ensure_finite("velocity", params.velocity)?;
        ensure_finite("initial height", params.initial_height)?;
        ensure_finite("forward speed", params.forward_speed)?;
        ensure_finite("lateral speed", params.lateral_speed)?;
        ensure_finite("spin rate", params.spin_rate)?;
        Ok(MotionKind::Parabolic(params))
    }

    /// Same motion with a different initial vertical velocity.
    /// Linear motion has no vertical component and is returned unchanged.
    pub fn with_velocity(self, velocity: f32) -> Self {
        match self {
            MotionKind::Linear { .. } => self,
            MotionKind::Parabolic(p) => MotionKind::Parabolic(Parabolic { velocity, ..p }),
        }
    }

    /// Pose `since_launch` seconds after leaving `origin`.
    ///
    /// Negative or NaN times are clamped to zero.
    pub fn position(&self, origin: &Transform, since_launch: f32) -> Transform {
        let t = clamp_time(since_launch);
        match self {
            MotionKind::Linear { speed } => linear_position(origin, *speed, t),
            MotionKind::Parabolic(p) => parabolic_position(origin, p, t),
        }
    }

    /// True for motion that can fall to the ground
    pub fn is_ballistic(&self) -> bool {
        matches!(self, MotionKind::Parabolic(_))
    }
}

#[inline]
fn clamp_time(t: f32) -> f32 {
    if t > 0.0 { t } else { 0.0 }
}

/// `origin × translation(0, 0, -speed·t)`
pub fn linear_position(origin: &Transform, speed: f32, t: f32) -> Transform {
    origin.times(&Transform::translation(0.0, 0.0, -speed * t))
}

/// `translation(0, y(t), 0) × origin × translation(lateral·t, 0, -forward·t)
/// × rotation(spin·t, z)`
///
/// Drift follows the origin's heading; height is world vertical.
pub fn parabolic_position(origin: &Transform, p: &Parabolic, t: f32) -> Transform {
    Transform::translation(0.0, p.height_at(t), 0.0)
        .times(origin)
        .times(&Transform::translation(
            p.lateral_speed * t,
            0.0,
            -p.forward_speed * t,
        ))
        .times(&Transform::rotation(p.spin_rate * t, Vec3::Z))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn arc(velocity: f32, gravity: f32, initial_height: f32) -> Parabolic {
        Parabolic {
            velocity,
            gravity,
            initial_height,
            forward_speed: 3.0,
            lateral_speed: 0.0,
            spin_rate: 0.0,
        }
    }

    #[test]
    fn test_linear_construction() {
        assert!(MotionKind::linear(15.0).is_ok());
        assert!(matches!(
            MotionKind::linear(0.0),
            Err(ConfigError::NonPositive { .. })
        ));
        assert!(MotionKind::linear(-3.0).is_err());
        assert!(MotionKind::linear(f32::INFINITY).is_err());
    }

    #[test]
    fn test_parabolic_construction() {
        assert!(MotionKind::parabolic(arc(4.0, -1.9, 0.0)).is_ok());
        assert!(matches!(
            MotionKind::parabolic(arc(4.0, 0.0, 0.0)),
            Err(ConfigError::NonNegativeGravity(_))
        ));
        assert!(MotionKind::parabolic(arc(4.0, 1.9, 0.0)).is_err());
        assert!(MotionKind::parabolic(arc(f32::NAN, -1.9, 0.0)).is_err());
    }

    #[test]
    fn test_linear_flight() {
        let motion = MotionKind::linear(15.0).unwrap();
        let origin = Transform::translation(0.0, 2.0, 20.0);

        assert_eq!(motion.position(&origin, 0.0), origin);

        let p = motion.position(&origin, 1.0).origin();
        assert!((p - Vec3::new(0.0, 2.0, 5.0)).length() < 1e-5);
    }

    #[test]
    fn test_linear_follows_origin_heading() {
        // Origin turned to face +x: flight goes along world +x
        let origin = Transform::rotation(-std::f32::consts::FRAC_PI_2, Vec3::Y);
        let p = linear_position(&origin, 2.0, 1.0).origin();
        assert!((p - Vec3::new(2.0, 0.0, 0.0)).length() < 1e-5);
    }

    #[test]
    fn test_negative_time_clamped() {
        let motion = MotionKind::linear(15.0).unwrap();
        let origin = Transform::translation(1.0, 2.0, 3.0);
        assert_eq!(motion.position(&origin, -0.5), origin);
        assert_eq!(motion.position(&origin, f32::NAN), origin);
    }

    #[test]
    fn test_parabola_starts_at_initial_height() {
        let p = arc(5.5, -3.9, 3.0);
        assert_eq!(p.height_at(0.0), 3.0);

        let motion = MotionKind::parabolic(p).unwrap();
        let start = motion.position(&Transform::IDENTITY, 0.0).origin();
        assert_eq!(start, Vec3::new(0.0, 3.0, 0.0));
    }

    #[test]
    fn test_parabola_closes() {
        let p = arc(4.0, -1.9, 0.0);
        assert_eq!(p.height_at(0.0), 0.0);

        let landing = 2.0 * 4.0 / 1.9;
        assert!(p.height_at(landing - 0.01) > 0.0);
        assert!(p.height_at(landing + 0.01) < 0.0);
        assert!(p.height_at(4.3) < 0.0);
    }

    #[test]
    fn test_apex() {
        let p = arc(4.0, -1.9, 0.0);
        let apex = p.apex_time();
        assert!((apex - 4.0 / 1.9).abs() < 1e-6);
        assert!(p.height_at(apex) > p.height_at(apex - 0.1));
        assert!(p.height_at(apex) > p.height_at(apex + 0.1));
    }

    #[test]
    fn test_parabolic_forward_drift() {
        let motion = MotionKind::parabolic(arc(4.0, -1.9, 0.0)).unwrap();
        let p = motion.position(&Transform::IDENTITY, 2.0).origin();
        assert!((p.z - (-6.0)).abs() < 1e-5);
        assert!((p.y - (8.0 - 3.8)).abs() < 1e-5);
    }

    #[test]
    fn test_parabola_height_is_world_vertical() {
        let p = arc(4.0, -1.9, 0.0);
        let motion = MotionKind::parabolic(p).unwrap();
        // Rolled onto its side and pitched up: the arc still rises along world y
        for origin in [
            Transform::translation(0.0, 2.0, 0.0)
                .times(&Transform::rotation(std::f32::consts::FRAC_PI_2, Vec3::Z)),
            Transform::translation(0.0, 2.0, 0.0)
                .times(&Transform::rotation(0.6, Vec3::X)),
        ] {
            for t in [0.5, 1.0, 2.0, 3.0] {
                let pose = motion.position(&origin, t);
                let drift = origin
                    .times(&Transform::translation(0.0, 0.0, -3.0 * t))
                    .origin();
                let expected = drift + Vec3::new(0.0, p.height_at(t), 0.0);
                assert!((pose.origin() - expected).length() < 1e-4);
            }
        }
    }

    #[test]
    fn test_with_velocity() {
        let motion = MotionKind::parabolic(arc(4.0, -1.9, 0.0)).unwrap();
        match motion.with_velocity(7.5) {
            MotionKind::Parabolic(p) => {
                assert_eq!(p.velocity, 7.5);
                assert_eq!(p.gravity, -1.9);
            }
            MotionKind::Linear { .. } => panic!("motion kind changed"),
        }

        let dart = MotionKind::linear(15.0).unwrap();
        assert_eq!(dart.with_velocity(7.5), dart);
    }

    proptest! {
        #[test]
        fn prop_position_is_deterministic(
            x in -20.0f32..20.0, z in -20.0f32..20.0,
            t in -1.0f32..10.0,
            speed in 0.1f32..40.0,
        ) {
            let origin = Transform::translation(x, 2.0, z);
            let dart = MotionKind::linear(speed).unwrap();
            prop_assert_eq!(dart.position(&origin, t), dart.position(&origin, t));

            let ball = MotionKind::parabolic(arc(speed, -3.9, 0.0)).unwrap();
            prop_assert_eq!(ball.position(&origin, t), ball.position(&origin, t));
        }

        #[test]
        fn prop_parabola_rises_then_falls(
            velocity in 0.5f32..10.0,
            gravity in -10.0f32..-0.5,
            frac_a in 0.0f32..0.45,
            frac_b in 0.55f32..1.0,
        ) {
            let p = arc(velocity, gravity, 0.0);
            let apex = p.apex_time();

            // Rising before the apex
            let (a, b) = (apex * frac_a, apex * frac_b);
            prop_assert!(p.height_at(a) < p.height_at(b));

            // Falling after it
            let (c, d) = (apex * (1.0 + frac_a), apex * (1.0 + frac_b));
            prop_assert!(p.height_at(c) > p.height_at(d));
        }
    }
}
