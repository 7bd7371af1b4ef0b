//! Per-instance GPU data for the draw list

use bytemuck::{Pod, Zeroable};

/// One drawable's model matrix and tint, laid out for an instance buffer
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct InstanceRaw {
    /// Column-major model matrix
    pub model: [[f32; 4]; 4],
    pub color: [f32; 4],
}

impl InstanceRaw {
    pub const fn new(model: [[f32; 4]; 4], color: [f32; 4]) -> Self {
        Self { model, color }
    }

    /// Byte stride of one instance
    pub const STRIDE: usize = std::mem::size_of::<InstanceRaw>();
}

/// View a slice of instances as raw bytes for upload
pub fn as_bytes(instances: &[InstanceRaw]) -> &[u8] {
    bytemuck::cast_slice(instances)
}

/// `0xRRGGBB` to linear-ish RGBA floats (alpha 1)
pub const fn hex_color(rgb: u32) -> [f32; 4] {
    [
        ((rgb >> 16) & 0xff) as f32 / 255.0,
        ((rgb >> 8) & 0xff) as f32 / 255.0,
        (rgb & 0xff) as f32 / 255.0,
        1.0,
    ]
}

/// Colors for carnival props
pub mod colors {
    use super::hex_color;

    pub const BALLOONS: [[f32; 4]; 5] = [
        hex_color(0x006400),
        hex_color(0xffff00),
        hex_color(0xa020f0),
        hex_color(0xffa500),
        hex_color(0xff69b4),
    ];
    pub const DARTS: [[f32; 4]; 5] = [
        hex_color(0xff0000),
        hex_color(0xcfbfaf),
        hex_color(0x077ddf),
        hex_color(0xf6d003),
        hex_color(0xf2337b),
    ];
    pub const BASKETBALL: [f32; 4] = hex_color(0xee6730);
    pub const WIREFRAME: [f32; 4] = hex_color(0xffffff);
}
