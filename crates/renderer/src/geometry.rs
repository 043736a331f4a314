//! Static screen-quad geometry.
//!
//! The quad is fan-triangulated around a center vertex: four triangles that
//! all share vertex 0. Both buffers are uploaded once at startup and never
//! touched again.

use bytemuck::{Pod, Zeroable};
use wgpu::util::DeviceExt;

#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
}

pub const QUAD_VERTICES: [Vertex; 5] = [
    Vertex { position: [0.0, 0.0, 0.0] },   // center
    Vertex { position: [-1.0, -1.0, 0.0] }, // bottom left
    Vertex { position: [1.0, -1.0, 0.0] },  // bottom right
    Vertex { position: [1.0, 1.0, 0.0] },   // top right
    Vertex { position: [-1.0, 1.0, 0.0] },  // top left
];

pub const QUAD_INDICES: [u16; 12] = [
    0, 1, 2, // bottom
    0, 2, 3, // right
    0, 3, 4, // top
    0, 4, 1, // left
];

pub const INDEX_COUNT: u32 = QUAD_INDICES.len() as u32;

/// GPU-resident vertex and index buffers for the screen quad.
pub(crate) struct QuadGeometry {
    pub vertex_buffer: wgpu::Buffer,
    pub index_buffer: wgpu::Buffer,
}

impl QuadGeometry {
    pub fn new(device: &wgpu::Device) -> Self {
        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("quad vertices"),
            contents: bytemuck::cast_slice(&QUAD_VERTICES),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("quad indices"),
            contents: bytemuck::cast_slice(&QUAD_INDICES),
            usage: wgpu::BufferUsages::INDEX,
        });

        Self {
            vertex_buffer,
            index_buffer,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    #[test]
    fn index_buffer_forms_four_triangles() {
        assert_eq!(QUAD_INDICES.len(), 12);
        assert_eq!(QUAD_INDICES.len() % 3, 0);
        assert_eq!(QUAD_INDICES.len() / 3, 4);
    }

    #[test]
    fn every_triangle_shares_the_center_vertex() {
        for triangle in QUAD_INDICES.chunks_exact(3) {
            assert!(triangle.contains(&0), "triangle {triangle:?} misses vertex 0");
        }
    }

    #[test]
    fn indices_reference_exactly_five_distinct_vertices() {
        let distinct: BTreeSet<u16> = QUAD_INDICES.iter().copied().collect();
        assert_eq!(distinct.len(), QUAD_VERTICES.len());
        assert_eq!(distinct, (0..5).collect::<BTreeSet<u16>>());
    }

    #[test]
    fn triangles_are_degenerate_free() {
        for triangle in QUAD_INDICES.chunks_exact(3) {
            let distinct: BTreeSet<u16> = triangle.iter().copied().collect();
            assert_eq!(distinct.len(), 3);
        }
    }

    #[test]
    fn quad_corners_cover_clip_space() {
        for corner in &QUAD_VERTICES[1..] {
            assert_eq!(corner.position[0].abs(), 1.0);
            assert_eq!(corner.position[1].abs(), 1.0);
            assert_eq!(corner.position[2], 0.0);
        }
        assert_eq!(QUAD_VERTICES[0].position, [0.0, 0.0, 0.0]);
    }
}
