//! CPU-side geometry for the scene primitives.

use std::f32::consts::PI;

use glam::Vec3;

/// Position + normal vertex for lit meshes.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct MeshVertex {
    /// Object-space position.
    pub position: [f32; 3],
    /// Object-space normal.
    pub normal: [f32; 3],
}

const POSITION_AND_VEC3: [wgpu::VertexAttribute; 2] =
    wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x3];

impl MeshVertex {
    /// Vertex buffer layout (locations 0 and 1).
    pub const LAYOUT: wgpu::VertexBufferLayout<'static> = wgpu::VertexBufferLayout {
        array_stride: size_of::<Self>() as wgpu::BufferAddress,
        step_mode: wgpu::VertexStepMode::Vertex,
        attributes: &POSITION_AND_VEC3,
    };
}

/// Position + colour vertex for line lists.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct LineVertex {
    /// Object-space position.
    pub position: [f32; 3],
    /// Linear RGB.
    pub color: [f32; 3],
}

impl LineVertex {
    /// Vertex buffer layout (locations 0 and 1).
    pub const LAYOUT: wgpu::VertexBufferLayout<'static> = wgpu::VertexBufferLayout {
        array_stride: size_of::<Self>() as wgpu::BufferAddress,
        step_mode: wgpu::VertexStepMode::Vertex,
        attributes: &POSITION_AND_VEC3,
    };
}

// ---------------------------------------------------------------------------
// Dodecahedron
// ---------------------------------------------------------------------------

#[rustfmt::skip]
const DODECAHEDRON_FACES: [[usize; 3]; 36] = [
    [3, 11, 7], [3, 7, 15], [3, 15, 13],
    [7, 19, 17], [7, 17, 6], [7, 6, 15],
    [17, 4, 8], [17, 8, 10], [17, 10, 6],
    [8, 0, 16], [8, 16, 2], [8, 2, 10],
    [0, 12, 1], [0, 1, 18], [0, 18, 16],
    [6, 10, 2], [6, 2, 13], [6, 13, 15],
    [2, 16, 18], [2, 18, 3], [2, 3, 13],
    [18, 1, 9], [18, 9, 11], [18, 11, 3],
    [4, 14, 12], [4, 12, 0], [4, 0, 8],
    [11, 9, 5], [11, 5, 19], [11, 19, 7],
    [19, 5, 14], [19, 14, 4], [19, 4, 17],
    [1, 12, 14], [1, 14, 5], [1, 5, 9],
];

fn dodecahedron_corners() -> [Vec3; 20] {
    let t = (1.0 + 5.0_f32.sqrt()) / 2.0;
    let r = 1.0 / t;
    [
        Vec3::new(-1.0, -1.0, -1.0),
        Vec3::new(-1.0, -1.0, 1.0),
        Vec3::new(-1.0, 1.0, -1.0),
        Vec3::new(-1.0, 1.0, 1.0),
        Vec3::new(1.0, -1.0, -1.0),
        Vec3::new(1.0, -1.0, 1.0),
        Vec3::new(1.0, 1.0, -1.0),
        Vec3::new(1.0, 1.0, 1.0),
        Vec3::new(0.0, -r, -t),
        Vec3::new(0.0, -r, t),
        Vec3::new(0.0, r, -t),
        Vec3::new(0.0, r, t),
        Vec3::new(-r, -t, 0.0),
        Vec3::new(-r, t, 0.0),
        Vec3::new(r, -t, 0.0),
        Vec3::new(r, t, 0.0),
        Vec3::new(-t, 0.0, -r),
        Vec3::new(t, 0.0, -r),
        Vec3::new(-t, 0.0, r),
        Vec3::new(t, 0.0, r),
    ]
    .map(Vec3::normalize)
}

/// Flat-shaded dodecahedron of `radius`: 36 triangles, un-indexed, each
/// carrying its face normal (pointing outward).
#[must_use]
pub fn dodecahedron(radius: f32) -> Vec<MeshVertex> {
    let corners = dodecahedron_corners().map(|v| v * radius);
    DODECAHEDRON_FACES
        .iter()
        .flat_map(|&[a, b, c]| flat_triangle(corners[a], corners[b], corners[c]))
        .collect()
}

/// One triangle with an outward face normal, wound counter-clockwise
/// seen from outside.
fn flat_triangle(a: Vec3, b: Vec3, c: Vec3) -> [MeshVertex; 3] {
    let mut normal = (b - a).cross(c - a).normalize_or_zero();
    let (b, c) = if normal.dot(a + b + c) < 0.0 {
        normal = -normal;
        (c, b)
    } else {
        (b, c)
    };
    let n = normal.to_array();
    [a, b, c].map(|p| MeshVertex {
        position: p.to_array(),
        normal: n,
    })
}

// ---------------------------------------------------------------------------
// Sphere
// ---------------------------------------------------------------------------

/// UV sphere of `radius` with smooth normals, as an indexed triangle list.
#[must_use]
pub fn uv_sphere(
    radius: f32,
    width_segments: u32,
    height_segments: u32,
) -> (Vec<MeshVertex>, Vec<u16>) {
    let ws = width_segments.max(3);
    let hs = height_segments.max(2);
    let mut vertices = Vec::with_capacity(((ws + 1) * (hs + 1)) as usize);
    for iy in 0..=hs {
        let v = iy as f32 / hs as f32;
        for ix in 0..=ws {
            let u = ix as f32 / ws as f32;
            let normal = Vec3::new(
                -(u * 2.0 * PI).cos() * (v * PI).sin(),
                (v * PI).cos(),
                (u * 2.0 * PI).sin() * (v * PI).sin(),
            );
            vertices.push(MeshVertex {
                position: (normal * radius).to_array(),
                normal: normal.to_array(),
            });
        }
    }

    let row = ws + 1;
    let mut indices = Vec::with_capacity((ws * hs * 6) as usize);
    for iy in 0..hs {
        for ix in 0..ws {
            let a = (iy * row + ix + 1) as u16;
            let b = (iy * row + ix) as u16;
            let c = ((iy + 1) * row + ix) as u16;
            let d = ((iy + 1) * row + ix + 1) as u16;
            // Pole rows collapse to a single triangle.
            if iy != 0 {
                indices.extend_from_slice(&[a, b, d]);
            }
            if iy != hs - 1 {
                indices.extend_from_slice(&[b, c, d]);
            }
        }
    }
    (vertices, indices)
}

// ---------------------------------------------------------------------------
// Grid
// ---------------------------------------------------------------------------

/// Square grid of `size` with `divisions` cells per side in the XZ plane,
/// as a line list. The two centre lines (when `divisions` is even) use
/// `center_color`.
#[must_use]
pub fn grid_lines(
    size: f32,
    divisions: u32,
    center_color: [f32; 3],
    line_color: [f32; 3],
) -> Vec<LineVertex> {
    let divisions = divisions.max(1);
    let half = size / 2.0;
    let step = size / divisions as f32;
    let center = divisions / 2;
    let mut lines = Vec::with_capacity(((divisions + 1) * 4) as usize);
    for i in 0..=divisions {
        let k = -half + i as f32 * step;
        let color = if i == center && divisions % 2 == 0 {
            center_color
        } else {
            line_color
        };
        for position in [[-half, 0.0, k], [half, 0.0, k], [k, 0.0, -half], [k, 0.0, half]] {
            lines.push(LineVertex { position, color });
        }
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dodecahedron_is_closed_and_outward() {
        let verts = dodecahedron(1.0);
        assert_eq!(verts.len(), 36 * 3);
        for tri in verts.chunks(3) {
            let centroid = tri
                .iter()
                .map(|v| Vec3::from_array(v.position))
                .sum::<Vec3>()
                / 3.0;
            let normal = Vec3::from_array(tri[0].normal);
            assert!((normal.length() - 1.0).abs() < 1e-5);
            assert!(normal.dot(centroid) > 0.0);
            for v in tri {
                assert!((Vec3::from_array(v.position).length() - 1.0).abs() < 1e-5);
            }
        }
    }

    #[test]
    fn twelve_pentagons() {
        // Three coplanar triangles per face: 12 distinct normals.
        let verts = dodecahedron(1.0);
        let mut normals: Vec<Vec3> = Vec::new();
        for tri in verts.chunks(3) {
            let n = Vec3::from_array(tri[0].normal);
            if !normals.iter().any(|m| m.distance(n) < 1e-4) {
                normals.push(n);
            }
        }
        assert_eq!(normals.len(), 12);
    }

    #[test]
    fn sphere_counts_and_radius() {
        let (verts, indices) = uv_sphere(0.15, 8, 8);
        assert_eq!(verts.len(), 81);
        // 8 * 8 quads minus the degenerate pole halves.
        assert_eq!(indices.len(), (8 * 8 * 2 - 16) * 3);
        for v in &verts {
            assert!((Vec3::from_array(v.position).length() - 0.15).abs() < 1e-5);
        }
        assert!(indices.iter().all(|&i| (i as usize) < verts.len()));
    }

    #[test]
    fn grid_has_coloured_centre() {
        let center = [1.0, 0.0, 1.0];
        let line = [0.1, 0.1, 0.1];
        let lines = grid_lines(40.0, 40, center, line);
        assert_eq!(lines.len(), 41 * 4);
        assert_eq!(lines.iter().filter(|v| v.color == center).count(), 4);
        for v in &lines {
            assert!(v.position[0].abs() <= 20.0 && v.position[2].abs() <= 20.0);
            assert_eq!(v.position[1], 0.0);
        }
    }
}
