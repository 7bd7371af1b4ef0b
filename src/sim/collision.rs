//! Projectile vs balloon resolution
//!
//! Once per frame the active in-flight projectile is tested against every
//! intact balloon, in creation order, with no early exit. Every balloon hit
//! this frame pops and scores; the projectile is spent if anything popped.

use glam::Vec3;

use super::state::{Round, ShotOutcome};

/// What one resolution pass changed
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CollisionReport {
    /// Balloons popped this pass, in test order
    pub popped: Vec<u32>,
    /// Projectile that was spent by the hits, if any
    pub spent_projectile: Option<u32>,
}

impl CollisionReport {
    #[inline]
    pub fn is_hit(&self) -> bool {
        !self.popped.is_empty()
    }
}

/// Test the active projectile against all intact balloons and apply the results.
///
/// No active projectile, or one that is not in flight, is a no-op.
pub fn resolve_collisions(round: &mut Round, samples: &[Vec3]) -> CollisionReport {
    let mut report = CollisionReport::default();

    let (projectile, targets) = round.collision_view();
    let Some(projectile) = projectile else {
        return report;
    };
    if !projectile.is_in_flight() {
        return report;
    }

    let shot = projectile.volume();
    for balloon in targets.iter_mut() {
        if balloon.is_popped() {
            continue;
        }
        if balloon.volume().intersects(&shot, samples) && balloon.pop() {
            report.popped.push(balloon.id);
        }
    }

    if report.is_hit() {
        projectile.retire(ShotOutcome::Hit);
        report.spent_projectile = Some(projectile.id);
        round.add_score(report.popped.len() as u32);
        log::info!(
            "projectile {} popped {:?}, score {}",
            shot.id,
            report.popped,
            round.score()
        );
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::bounds::{Collider, unit_sphere_samples};
    use crate::sim::motion::MotionKind;
    use crate::sim::state::ProjectileState;
    use crate::sim::transform::Transform;

    fn unit() -> Collider {
        Collider::new(Transform::IDENTITY, 0.1).unwrap()
    }

    /// Round with balloons at the given x positions and one dart in flight
    /// launched from `dart_origin` at time 0
    fn setup(balloon_xs: &[f32], dart_origin: Transform) -> Round {
        let mut round = Round::new(5.5);
        for &x in balloon_xs {
            round.add_balloon(Transform::translation(x, 0.0, 0.0), unit(), [1.0; 4]);
        }
        round.add_dart(MotionKind::linear(15.0).unwrap(), unit(), [1.0; 4]);
        round.select_next_dart();
        let dart = round.active_projectile_mut().unwrap();
        dart.arm(dart_origin);
        dart.launch(0.0);
        dart.update_flight(0.0);
        round
    }

    #[test]
    fn test_no_active_projectile_is_noop() {
        let samples = unit_sphere_samples(2).unwrap();
        let mut round = Round::new(5.5);
        round.add_balloon(Transform::IDENTITY, unit(), [1.0; 4]);

        let report = resolve_collisions(&mut round, &samples);
        assert_eq!(report, CollisionReport::default());
        assert_eq!(round.score(), 0);
    }

    #[test]
    fn test_idle_projectile_is_not_tested() {
        let samples = unit_sphere_samples(2).unwrap();
        let mut round = Round::new(5.5);
        round.add_balloon(Transform::IDENTITY, unit(), [1.0; 4]);
        round.add_dart(MotionKind::linear(15.0).unwrap(), unit(), [1.0; 4]);
        round.select_next_dart();
        // Idle dart sitting right on the balloon
        round.hold_idle(Transform::IDENTITY, Transform::IDENTITY);

        let report = resolve_collisions(&mut round, &samples);
        assert!(!report.is_hit());
        assert!(!round.targets()[0].is_popped());
    }

    #[test]
    fn test_hit_pops_and_scores() {
        let samples = unit_sphere_samples(2).unwrap();
        let mut round = setup(&[0.0, 10.0], Transform::IDENTITY);

        let report = resolve_collisions(&mut round, &samples);
        let first = round.targets()[0].id;
        let dart_id = round.darts()[0].id;
        assert_eq!(report.popped, vec![first]);
        assert_eq!(report.spent_projectile, Some(dart_id));
        assert_eq!(round.score(), 1);
        assert!(round.targets()[0].is_popped());
        assert!(!round.targets()[1].is_popped());
        assert_eq!(
            round.darts()[0].state(),
            ProjectileState::Spent {
                outcome: ShotOutcome::Hit
            }
        );

        // Spent projectile is no longer tested
        let report = resolve_collisions(&mut round, &samples);
        assert!(!report.is_hit());
        assert_eq!(round.score(), 1);
    }

    #[test]
    fn test_simultaneous_hits_all_count() {
        let samples = unit_sphere_samples(2).unwrap();
        // Two overlapping balloons either side of the dart
        let mut round = setup(&[-0.5, 0.5, 8.0], Transform::IDENTITY);

        let report = resolve_collisions(&mut round, &samples);
        assert_eq!(report.popped.len(), 2);
        assert_eq!(round.score(), 2);
        assert_eq!(round.remaining_targets(), 1);
    }

    #[test]
    fn test_popped_balloons_are_skipped() {
        let samples = unit_sphere_samples(2).unwrap();
        let mut round = setup(&[0.0], Transform::IDENTITY);
        resolve_collisions(&mut round, &samples);
        assert_eq!(round.score(), 1);

        // Next dart through the same spot finds nothing to pop
        round.add_dart(MotionKind::linear(15.0).unwrap(), unit(), [1.0; 4]);
        round.select_next_dart();
        let dart = round.active_projectile_mut().unwrap();
        dart.arm(Transform::IDENTITY);
        dart.launch(0.0);
        dart.update_flight(0.0);

        let report = resolve_collisions(&mut round, &samples);
        assert!(!report.is_hit());
        assert_eq!(round.score(), 1);
        assert!(round.targets()[0].is_popped());
        assert!(round.active_projectile().unwrap().is_in_flight());
    }

    #[test]
    fn test_miss_leaves_everything_alone() {
        let samples = unit_sphere_samples(2).unwrap();
        let mut round = setup(&[0.0], Transform::translation(0.0, 5.0, 0.0));

        let report = resolve_collisions(&mut round, &samples);
        assert!(!report.is_hit());
        assert!(round.active_projectile().unwrap().is_in_flight());
        assert_eq!(round.score(), 0);
    }
}
