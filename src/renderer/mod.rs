//! Render handoff
//!
//! The simulation never draws. Each frame it publishes a flat list of
//! `(id, kind, transform, visible)` items; the external renderer picks meshes
//! by kind and uploads the instance data.

pub mod instance;

pub use instance::{InstanceRaw, as_bytes, colors, hex_color};

use crate::sim::{GameSession, ProjectileKind, Transform};

/// What mesh/material a draw item needs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DrawableKind {
    Balloon,
    Dart,
    Basketball,
    /// Collider wireframe (debug)
    BoundingVolume,
}

/// One entity as the renderer should see it this frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawItem {
    /// Entity ID
    pub id: u32,
    pub kind: DrawableKind,
    pub transform: Transform,
    pub color: [f32; 4],
    pub visible: bool,
}

impl DrawItem {
    pub fn to_raw(&self) -> InstanceRaw {
        InstanceRaw::new(self.transform.to_cols_array_2d(), self.color)
    }
}

/// Draw items for every balloon, dart and the basketball, plus collider
/// wireframes for intact balloons when bounds display is on
pub fn draw_list(session: &GameSession) -> Vec<DrawItem> {
    let round = session.round();
    let mut items = Vec::with_capacity(round.targets().len() * 2 + round.darts().len() + 1);

    for balloon in round.targets() {
        items.push(DrawItem {
            id: balloon.id,
            kind: DrawableKind::Balloon,
            transform: balloon.location(),
            color: balloon.color,
            visible: !balloon.is_popped(),
        });
    }

    let projectiles = round.darts().iter().chain(round.basketball());
    for projectile in projectiles {
        let kind = match projectile.kind {
            ProjectileKind::Dart => DrawableKind::Dart,
            ProjectileKind::Basketball => DrawableKind::Basketball,
        };
        items.push(DrawItem {
            id: projectile.id,
            kind,
            transform: projectile.pose(),
            color: projectile.color,
            visible: projectile.is_visible(),
        });
    }

    if session.tuning().show_bounds {
        for balloon in round.targets().iter().filter(|b| !b.is_popped()) {
            items.push(DrawItem {
                id: balloon.id,
                kind: DrawableKind::BoundingVolume,
                transform: balloon.volume().wireframe_transform(),
                color: colors::WIREFRAME,
                visible: true,
            });
        }
    }

    items
}

/// Pack the visible items for an instance buffer
pub fn instance_data(items: &[DrawItem]) -> Vec<InstanceRaw> {
    items
        .iter()
        .filter(|item| item.visible)
        .map(DrawItem::to_raw)
        .collect()
}
