//! # Vertex — Per-Corner Data Sent to the GPU
//!
//! Every sprite is a quad of four vertices. Each vertex carries a 2D
//! position (already in world space — the batch applies rotation, origin,
//! and scale on the CPU), a texture coordinate, and a tint color. That is
//! a fixed stride of 8 floats (32 bytes) per vertex.
//!
//! ```text
//! SpriteVertex (32 bytes per vertex)
//! ┌──────────────┬──────────────┬────────────────────────┐
//! │ position     │ uv           │ color                  │
//! │ [f32; 2]     │ [f32; 2]     │ [f32; 4]               │
//! │ offset 0     │ offset 8     │ offset 16              │
//! │ location(0)  │ location(1)  │ location(2)            │
//! └──────────────┴──────────────┴────────────────────────┘
//! ```
//!
//! `#[repr(C)]` pins the layout and the `bytemuck` traits let the backend
//! cast `&[SpriteVertex]` to `&[u8]` for upload without copies.
//!
//! ## Index Pattern
//!
//! Quads are drawn as two triangles through a constant index pattern
//! `{0, 1, 2, 2, 3, 0}`, offset by 4 per sprite slot. [`quad_indices`]
//! builds the pattern once for the maximum batch capacity; the index
//! buffer never changes afterwards — only the *count* of indices drawn
//! varies per flush.

use bytemuck::{Pod, Zeroable};

/// Number of vertices per sprite quad.
pub const VERTICES_PER_SPRITE: usize = 4;

/// Number of indices per sprite quad (two triangles).
pub const INDICES_PER_SPRITE: usize = 6;

/// Per-vertex data for sprite quads. Positions are in world space; the
/// shader only applies the camera view and projection.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct SpriteVertex {
    pub position: [f32; 2],
    pub uv: [f32; 2],
    pub color: [f32; 4],
}

impl SpriteVertex {
    pub(crate) const LAYOUT: wgpu::VertexBufferLayout<'static> = wgpu::VertexBufferLayout {
        array_stride: std::mem::size_of::<SpriteVertex>() as wgpu::BufferAddress,
        step_mode: wgpu::VertexStepMode::Vertex,
        attributes: &[
            // position
            wgpu::VertexAttribute {
                offset: 0,
                shader_location: 0,
                format: wgpu::VertexFormat::Float32x2,
            },
            // uv
            wgpu::VertexAttribute {
                offset: 8,
                shader_location: 1,
                format: wgpu::VertexFormat::Float32x2,
            },
            // color
            wgpu::VertexAttribute {
                offset: 16,
                shader_location: 2,
                format: wgpu::VertexFormat::Float32x4,
            },
        ],
    };
}

/// Camera view and projection matrices uploaded as one uniform buffer.
/// The shader computes `projection * view * position`.
#[repr(C)]
#[derive(Clone, Copy, Pod, Zeroable)]
pub(crate) struct CameraUniform {
    pub view: [[f32; 4]; 4],
    pub projection: [[f32; 4]; 4],
}

/// Build the static `{0,1,2, 2,3,0}` index pattern for `max_quads` sprite
/// slots, each offset by 4 vertices.
pub(crate) fn quad_indices(max_quads: usize) -> Vec<u32> {
    let mut indices = Vec::with_capacity(max_quads * INDICES_PER_SPRITE);
    for quad in 0..max_quads as u32 {
        let base = quad * VERTICES_PER_SPRITE as u32;
        indices.extend_from_slice(&[base, base + 1, base + 2, base + 2, base + 3, base]);
    }
    indices
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vertex_stride_is_eight_floats() {
        assert_eq!(std::mem::size_of::<SpriteVertex>(), 8 * 4);
    }

    #[test]
    fn quad_indices_follow_fixed_pattern() {
        let idx = quad_indices(3);
        assert_eq!(idx.len(), 18);
        assert_eq!(&idx[0..6], &[0, 1, 2, 2, 3, 0]);
        assert_eq!(&idx[6..12], &[4, 5, 6, 6, 7, 4]);
        assert_eq!(&idx[12..18], &[8, 9, 10, 10, 11, 8]);
    }

    #[test]
    fn quad_indices_stay_in_vertex_range() {
        let max = 2048;
        let idx = quad_indices(max);
        assert_eq!(idx.len(), max * INDICES_PER_SPRITE);
        for &i in &idx {
            assert!((i as usize) < max * VERTICES_PER_SPRITE);
        }
    }
}
