//! Static vertex data and buffer layouts shared by the cube samples.
//!
//! One interleaved table serves both cube pipelines: the rotating cube reads
//! position + color, the two-cube sample reads position + uv. Offsets are in
//! bytes into the 40-byte per-vertex record.

/// Vertices per cube (12 triangles, unindexed).
pub const CUBE_VERTEX_COUNT: u32 = 36;

/// Bytes per vertex: float4 position, float4 color, float2 uv.
pub const CUBE_VERTEX_STRIDE: u64 = 4 * 10;

pub const CUBE_POSITION_OFFSET: u64 = 0;
pub const CUBE_COLOR_OFFSET: u64 = 4 * 4;
pub const CUBE_UV_OFFSET: u64 = 4 * 8;

/// Unit cube centered on the origin. Colors encode the corner position
/// remapped from [-1, 1] to [0, 1].
#[rustfmt::skip]
pub const CUBE_VERTICES: [f32; 360] = [
    // position            color            uv
    // bottom (y = -1)
     1.0, -1.0,  1.0, 1.0,  1.0, 0.0, 1.0, 1.0,  0.0, 1.0,
    -1.0, -1.0,  1.0, 1.0,  0.0, 0.0, 1.0, 1.0,  1.0, 1.0,
    -1.0, -1.0, -1.0, 1.0,  0.0, 0.0, 0.0, 1.0,  1.0, 0.0,
     1.0, -1.0, -1.0, 1.0,  1.0, 0.0, 0.0, 1.0,  0.0, 0.0,
     1.0, -1.0,  1.0, 1.0,  1.0, 0.0, 1.0, 1.0,  0.0, 1.0,
    -1.0, -1.0, -1.0, 1.0,  0.0, 0.0, 0.0, 1.0,  1.0, 0.0,

    // right (x = 1)
     1.0,  1.0,  1.0, 1.0,  1.0, 1.0, 1.0, 1.0,  0.0, 1.0,
     1.0, -1.0,  1.0, 1.0,  1.0, 0.0, 1.0, 1.0,  1.0, 1.0,
     1.0, -1.0, -1.0, 1.0,  1.0, 0.0, 0.0, 1.0,  1.0, 0.0,
     1.0,  1.0, -1.0, 1.0,  1.0, 1.0, 0.0, 1.0,  0.0, 0.0,
     1.0,  1.0,  1.0, 1.0,  1.0, 1.0, 1.0, 1.0,  0.0, 1.0,
     1.0, -1.0, -1.0, 1.0,  1.0, 0.0, 0.0, 1.0,  1.0, 0.0,

    // top (y = 1)
    -1.0,  1.0,  1.0, 1.0,  0.0, 1.0, 1.0, 1.0,  0.0, 1.0,
     1.0,  1.0,  1.0, 1.0,  1.0, 1.0, 1.0, 1.0,  1.0, 1.0,
     1.0,  1.0, -1.0, 1.0,  1.0, 1.0, 0.0, 1.0,  1.0, 0.0,
    -1.0,  1.0, -1.0, 1.0,  0.0, 1.0, 0.0, 1.0,  0.0, 0.0,
    -1.0,  1.0,  1.0, 1.0,  0.0, 1.0, 1.0, 1.0,  0.0, 1.0,
     1.0,  1.0, -1.0, 1.0,  1.0, 1.0, 0.0, 1.0,  1.0, 0.0,

    // left (x = -1)
    -1.0, -1.0,  1.0, 1.0,  0.0, 0.0, 1.0, 1.0,  0.0, 1.0,
    -1.0,  1.0,  1.0, 1.0,  0.0, 1.0, 1.0, 1.0,  1.0, 1.0,
    -1.0,  1.0, -1.0, 1.0,  0.0, 1.0, 0.0, 1.0,  1.0, 0.0,
    -1.0, -1.0, -1.0, 1.0,  0.0, 0.0, 0.0, 1.0,  0.0, 0.0,
    -1.0, -1.0,  1.0, 1.0,  0.0, 0.0, 1.0, 1.0,  0.0, 1.0,
    -1.0,  1.0, -1.0, 1.0,  0.0, 1.0, 0.0, 1.0,  1.0, 0.0,

    // front (z = 1)
     1.0,  1.0,  1.0, 1.0,  1.0, 1.0, 1.0, 1.0,  0.0, 1.0,
    -1.0,  1.0,  1.0, 1.0,  0.0, 1.0, 1.0, 1.0,  1.0, 1.0,
    -1.0, -1.0,  1.0, 1.0,  0.0, 0.0, 1.0, 1.0,  1.0, 0.0,
    -1.0, -1.0,  1.0, 1.0,  0.0, 0.0, 1.0, 1.0,  1.0, 0.0,
     1.0, -1.0,  1.0, 1.0,  1.0, 0.0, 1.0, 1.0,  0.0, 0.0,
     1.0,  1.0,  1.0, 1.0,  1.0, 1.0, 1.0, 1.0,  0.0, 1.0,

    // back (z = -1)
     1.0, -1.0, -1.0, 1.0,  1.0, 0.0, 0.0, 1.0,  0.0, 1.0,
    -1.0, -1.0, -1.0, 1.0,  0.0, 0.0, 0.0, 1.0,  1.0, 1.0,
    -1.0,  1.0, -1.0, 1.0,  0.0, 1.0, 0.0, 1.0,  1.0, 0.0,
     1.0,  1.0, -1.0, 1.0,  1.0, 1.0, 0.0, 1.0,  0.0, 0.0,
     1.0, -1.0, -1.0, 1.0,  1.0, 0.0, 0.0, 1.0,  0.0, 1.0,
    -1.0,  1.0, -1.0, 1.0,  0.0, 1.0, 0.0, 1.0,  1.0, 0.0,
];

const POSITION_COLOR_ATTRS: [wgpu::VertexAttribute; 2] = [
    wgpu::VertexAttribute {
        format: wgpu::VertexFormat::Float32x4,
        offset: CUBE_POSITION_OFFSET,
        shader_location: 0,
    },
    wgpu::VertexAttribute {
        format: wgpu::VertexFormat::Float32x4,
        offset: CUBE_COLOR_OFFSET,
        shader_location: 1,
    },
];

const POSITION_UV_ATTRS: [wgpu::VertexAttribute; 2] = [
    wgpu::VertexAttribute {
        format: wgpu::VertexFormat::Float32x4,
        offset: CUBE_POSITION_OFFSET,
        shader_location: 0,
    },
    wgpu::VertexAttribute {
        format: wgpu::VertexFormat::Float32x2,
        offset: CUBE_UV_OFFSET,
        shader_location: 1,
    },
];

/// Layout for the rotating-cube pipeline (position + per-vertex color).
pub fn position_color_layout() -> wgpu::VertexBufferLayout<'static> {
    wgpu::VertexBufferLayout {
        array_stride: CUBE_VERTEX_STRIDE,
        step_mode: wgpu::VertexStepMode::Vertex,
        attributes: &POSITION_COLOR_ATTRS,
    }
}

/// Layout for the two-cube pipeline (position + uv).
pub fn position_uv_layout() -> wgpu::VertexBufferLayout<'static> {
    wgpu::VertexBufferLayout {
        array_stride: CUBE_VERTEX_STRIDE,
        step_mode: wgpu::VertexStepMode::Vertex,
        attributes: &POSITION_UV_ATTRS,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_matches_declared_stride_and_count() {
        let floats_per_vertex = (CUBE_VERTEX_STRIDE / 4) as usize;
        assert_eq!(
            CUBE_VERTICES.len(),
            CUBE_VERTEX_COUNT as usize * floats_per_vertex
        );
    }

    #[test]
    fn colors_encode_corner_positions() {
        let stride = (CUBE_VERTEX_STRIDE / 4) as usize;
        for vertex in CUBE_VERTICES.chunks_exact(stride) {
            let position = &vertex[0..4];
            let color = &vertex[4..8];
            for axis in 0..3 {
                assert_eq!(color[axis], (position[axis] + 1.0) / 2.0);
            }
            assert_eq!(position[3], 1.0);
            assert_eq!(color[3], 1.0);
        }
    }

    #[test]
    fn uvs_stay_in_unit_square() {
        let stride = (CUBE_VERTEX_STRIDE / 4) as usize;
        for vertex in CUBE_VERTICES.chunks_exact(stride) {
            let uv = &vertex[8..10];
            assert!(uv.iter().all(|c| (0.0..=1.0).contains(c)));
        }
    }

    #[test]
    fn attribute_offsets_fit_the_stride() {
        assert!(CUBE_COLOR_OFFSET + 16 <= CUBE_VERTEX_STRIDE);
        assert!(CUBE_UV_OFFSET + 8 <= CUBE_VERTEX_STRIDE);
    }
}
