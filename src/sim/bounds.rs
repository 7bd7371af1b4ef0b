//! Sphere bounding volumes
//!
//! Every collider is a unit sphere in its own local frame, stretched and placed
//! by its world transform. Two volumes are tested by mapping one sphere's
//! sample points into the other's local frame and checking whether any of them
//! lands inside (with a margin).
//!
//! This is point sampling, not an exact sphere-sphere test. Two coarse
//! volumes whose surfaces cross between sample points can be reported as
//! missing each other. That approximation is accepted.

use std::collections::HashMap;

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::transform::Transform;
use crate::error::{ConfigError, ensure_positive};

/// Highest icosphere subdivision level accepted (10 242 points)
pub const MAX_SUBDIVISIONS: u32 = 5;

/// Collider attached to an entity: local offset from the entity's transform
/// plus a forgiving margin on the unit radius
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawCollider")]
pub struct Collider {
    pub local_offset: Transform,
    margin: f32,
}

/// Unchecked serialized form; goes through `Collider::new` on load
#[derive(Deserialize)]
struct RawCollider {
    local_offset: Transform,
    margin: f32,
}

impl TryFrom<RawCollider> for Collider {
    type Error = ConfigError;

    fn try_from(raw: RawCollider) -> Result<Self, Self::Error> {
        Collider::new(raw.local_offset, raw.margin)
    }
}

impl Collider {
    pub fn new(local_offset: Transform, margin: f32) -> Result<Self, ConfigError> {
        let margin = ensure_positive("collider margin", margin)?;
        Ok(Self {
            local_offset,
            margin,
        })
    }

    #[inline]
    pub fn margin(&self) -> f32 {
        self.margin
    }

    /// World transform of the collider for an entity at `entity_transform`
    #[inline]
    pub fn world_transform(&self, entity_transform: &Transform) -> Transform {
        entity_transform.times(&self.local_offset)
    }

    /// Snapshot a bounding volume for the owning entity
    pub fn volume(&self, id: u32, entity_transform: &Transform) -> BoundingVolume {
        BoundingVolume {
            id,
            world: self.world_transform(entity_transform),
            margin: self.margin,
        }
    }
}

/// World-space collider snapshot used for one intersection test
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingVolume {
    /// Owning entity; equal ids never collide
    pub id: u32,
    pub world: Transform,
    pub margin: f32,
}

impl BoundingVolume {
    /// Does any sample point of `other`'s sphere fall inside this sphere?
    ///
    /// `samples` are points on the unit sphere. The margin used is this
    /// volume's, so the test is not symmetric when margins differ.
    pub fn intersects(&self, other: &BoundingVolume, samples: &[Vec3]) -> bool {
        if self.id == other.id {
            return false;
        }

        let Some(inverse) = self.world.try_inverse() else {
            log::warn!("collider {} has a singular transform, skipping test", self.id);
            return false;
        };
        let relative = inverse.times(&other.world);
        let limit = 1.0 + self.margin;

        samples.iter().any(|&p| {
            let q = relative.apply(p);
            q.dot(q) < limit
        })
    }

    /// Transform for drawing this volume's wireframe (unit sphere grown by the margin)
    pub fn wireframe_transform(&self) -> Transform {
        self.world.times(&Transform::uniform_scale(1.0 + self.margin))
    }
}

/// Vertices of an icosphere with `subdivisions` levels of refinement.
///
/// Level 0 is the icosahedron (12 points); each level quadruples the faces
/// (42, 162, 642, ... points). All points have unit length.
pub fn unit_sphere_samples(subdivisions: u32) -> Result<Vec<Vec3>, ConfigError> {
    if subdivisions > MAX_SUBDIVISIONS {
        return Err(ConfigError::TooManySubdivisions {
            got: subdivisions,
            max: MAX_SUBDIVISIONS,
        });
    }

    let phi = (1.0 + 5.0_f32.sqrt()) / 2.0;
    let mut vertices: Vec<Vec3> = [
        (-1.0, phi, 0.0),
        (1.0, phi, 0.0),
        (-1.0, -phi, 0.0),
        (1.0, -phi, 0.0),
        (0.0, -1.0, phi),
        (0.0, 1.0, phi),
        (0.0, -1.0, -phi),
        (0.0, 1.0, -phi),
        (phi, 0.0, -1.0),
        (phi, 0.0, 1.0),
        (-phi, 0.0, -1.0),
        (-phi, 0.0, 1.0),
    ]
    .iter()
    .map(|&(x, y, z)| Vec3::new(x, y, z).normalize())
    .collect();

    let mut faces: Vec<[u32; 3]> = vec![
        [0, 11, 5],
        [0, 5, 1],
        [0, 1, 7],
        [0, 7, 10],
        [0, 10, 11],
        [1, 5, 9],
        [5, 11, 4],
        [11, 10, 2],
        [10, 7, 6],
        [7, 1, 8],
        [3, 9, 4],
        [3, 4, 2],
        [3, 2, 6],
        [3, 6, 8],
        [3, 8, 9],
        [4, 9, 5],
        [2, 4, 11],
        [6, 2, 10],
        [8, 6, 7],
        [9, 8, 1],
    ];

    for _ in 0..subdivisions {
        let mut midpoints: HashMap<(u32, u32), u32> = HashMap::new();
        let mut next_faces = Vec::with_capacity(faces.len() * 4);

        let mut midpoint = |a: u32, b: u32, vertices: &mut Vec<Vec3>| -> u32 {
            let key = (a.min(b), a.max(b));
            *midpoints.entry(key).or_insert_with(|| {
                let mid = (vertices[a as usize] + vertices[b as usize]).normalize();
                vertices.push(mid);
                (vertices.len() - 1) as u32
            })
        };

        for &[a, b, c] in &faces {
            let ab = midpoint(a, b, &mut vertices);
            let bc = midpoint(b, c, &mut vertices);
            let ca = midpoint(c, a, &mut vertices);
            next_faces.push([a, ab, ca]);
            next_faces.push([b, bc, ab]);
            next_faces.push([c, ca, bc]);
            next_faces.push([ab, bc, ca]);
        }
        faces = next_faces;
    }

    Ok(vertices)
}
