//! Carnival layout
//!
//! Five balloons on the dart booth wall, five darts, one basketball, and the
//! starting camera.

use glam::Vec3;

use crate::consts::*;
use crate::error::ConfigError;
use crate::renderer::colors;
use crate::sim::{Collider, Round, Transform};
use crate::tuning::Tuning;

/// Camera world transform at scene start (inverse of the starting view)
pub fn initial_camera_transform() -> Transform {
    Transform::look_at(CAMERA_EYE, CAMERA_TARGET, Vec3::Y).inverse()
}

/// World transform of balloon `index` on the booth wall
pub fn balloon_location(index: usize) -> Option<Transform> {
    BALLOON_X
        .get(index)
        .map(|&x| Transform::translation(x, BALLOON_HEIGHT, BALLOON_DEPTH))
}

/// Build the carnival round: balloons in booth order, darts, basketball
pub fn carnival_round(tuning: &Tuning) -> Result<Round, ConfigError> {
    tuning.validate()?;

    let margin = tuning.collider_margin;
    let [bx, by, bz] = tuning.balloon_collider_scale;
    let balloon_collider = Collider::new(Transform::scale(bx, by, bz), margin)?;
    let [dx, dy, dz] = tuning.dart_collider_scale;
    let dart_collider = Collider::new(Transform::scale(dx, dy, dz), margin)?;
    let ball_collider = Collider::new(
        Transform::uniform_scale(tuning.basketball.radius),
        margin,
    )?;

    let mut round = Round::new(tuning.starting_power());

    for (index, color) in colors::BALLOONS.iter().enumerate() {
        if let Some(location) = balloon_location(index) {
            round.add_balloon(location, balloon_collider, *color);
        }
    }

    let dart_motion = tuning.dart_motion()?;
    for color in colors::DARTS.iter().take(DART_COUNT) {
        round.add_dart(dart_motion, dart_collider, *color);
    }

    round.set_basketball(tuning.basketball_motion()?, ball_collider, colors::BASKETBALL);

    log::debug!(
        "carnival round: {} balloons, {} darts",
        round.targets().len(),
        round.darts().len()
    );
    Ok(round)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_camera_starts_at_eye() {
        let camera = initial_camera_transform();
        assert!((camera.origin() - CAMERA_EYE).length() < 1e-4);
    }

    #[test]
    fn test_carnival_round_layout() {
        let round = carnival_round(&Tuning::default()).unwrap();
        assert_eq!(round.targets().len(), 5);
        assert_eq!(round.darts().len(), DART_COUNT);
        assert!(round.basketball().is_some());
        assert_eq!(round.score(), 0);
        assert_eq!(round.basketball_power(), 5.5);

        let first = round.targets()[0].location().origin();
        assert!((first - Vec3::new(-5.0, 3.2, 0.2)).length() < 1e-6);
    }

    #[test]
    fn test_balloons_do_not_overlap_each_other() {
        let round = carnival_round(&Tuning::default()).unwrap();
        let samples = crate::sim::unit_sphere_samples(2).unwrap();
        for a in round.targets() {
            for b in round.targets() {
                assert!(!a.volume().intersects(&b.volume(), &samples));
            }
        }
    }

    #[test]
    fn test_invalid_tuning_rejected() {
        let tuning = Tuning {
            dart_speed: -1.0,
            ..Default::default()
        };
        assert!(carnival_round(&tuning).is_err());
    }
}
