//! CPU-side triangle meshes and the derived wireframe overlays.
//!
//! Vertex layout is interleaved `[pos.x, pos.y, pos.z, norm.x, norm.y,
//! norm.z, r, g, b]`, nine floats per vertex. Meshes are generated in local
//! space; transforms are applied by the consumer.

use std::collections::HashMap;

use glam::Vec3;

use crate::geometry::Segment;

/// Interleaved triangle mesh: 9 floats per vertex (position + normal + color)
#[derive(Clone, Debug, Default)]
pub struct MeshData {
    pub vertices: Vec<f32>,
    pub indices: Vec<u32>,
}

pub const STRIDE: usize = 9;

impl MeshData {
    pub fn vertex_count(&self) -> usize {
        self.vertices.len() / STRIDE
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    pub fn position(&self, vertex: usize) -> Vec3 {
        let base = vertex * STRIDE;
        Vec3::new(
            self.vertices[base],
            self.vertices[base + 1],
            self.vertices[base + 2],
        )
    }

    pub fn normal(&self, vertex: usize) -> Vec3 {
        let base = vertex * STRIDE;
        Vec3::new(
            self.vertices[base + 3],
            self.vertices[base + 4],
            self.vertices[base + 5],
        )
    }

    pub fn positions(&self) -> impl Iterator<Item = Vec3> + '_ {
        (0..self.vertex_count()).map(|i| self.position(i))
    }

    /// Corner positions of a triangle by triangle index
    pub fn triangle(&self, tri: usize) -> [Vec3; 3] {
        [
            self.position(self.indices[tri * 3] as usize),
            self.position(self.indices[tri * 3 + 1] as usize),
            self.position(self.indices[tri * 3 + 2] as usize),
        ]
    }

    /// Stored normal of a triangle (taken from its first vertex)
    pub fn triangle_normal(&self, tri: usize) -> Vec3 {
        self.normal(self.indices[tri * 3] as usize)
    }
}

/// Unpack a 0xRRGGBB color into linear-ish float RGB
pub fn unpack_color(color: u32) -> [f32; 3] {
    [
        ((color >> 16) & 0xFF) as f32 / 255.0,
        ((color >> 8) & 0xFF) as f32 / 255.0,
        (color & 0xFF) as f32 / 255.0,
    ]
}

fn push_vert(vertices: &mut Vec<f32>, x: f32, y: f32, z: f32, n: Vec3, color: [f32; 3]) {
    vertices.extend_from_slice(&[x, y, z, n.x, n.y, n.z, color[0], color[1], color[2]]);
}

/// Axis-aligned cuboid spanning `min..max`, flat normals, 24 verts / 12 tris
fn cuboid(min: Vec3, max: Vec3, color: [f32; 3]) -> MeshData {
    let (x0, y0, z0) = (min.x, min.y, min.z);
    let (x1, y1, z1) = (max.x, max.y, max.z);

    let faces: [([Vec3; 4], Vec3); 6] = [
        // Front (+Z)
        ([Vec3::new(x0, y0, z1), Vec3::new(x1, y0, z1), Vec3::new(x1, y1, z1), Vec3::new(x0, y1, z1)], Vec3::Z),
        // Back (-Z)
        ([Vec3::new(x1, y0, z0), Vec3::new(x0, y0, z0), Vec3::new(x0, y1, z0), Vec3::new(x1, y1, z0)], Vec3::NEG_Z),
        // Right (+X)
        ([Vec3::new(x1, y0, z1), Vec3::new(x1, y0, z0), Vec3::new(x1, y1, z0), Vec3::new(x1, y1, z1)], Vec3::X),
        // Left (-X)
        ([Vec3::new(x0, y0, z0), Vec3::new(x0, y0, z1), Vec3::new(x0, y1, z1), Vec3::new(x0, y1, z0)], Vec3::NEG_X),
        // Top (+Y)
        ([Vec3::new(x0, y1, z1), Vec3::new(x1, y1, z1), Vec3::new(x1, y1, z0), Vec3::new(x0, y1, z0)], Vec3::Y),
        // Bottom (-Y)
        ([Vec3::new(x0, y0, z0), Vec3::new(x1, y0, z0), Vec3::new(x1, y0, z1), Vec3::new(x0, y0, z1)], Vec3::NEG_Y),
    ];

    let mut vertices = Vec::with_capacity(24 * STRIDE);
    let mut indices = Vec::with_capacity(36);

    for (quad, normal) in &faces {
        let base = (vertices.len() / STRIDE) as u32;
        for v in quad {
            push_vert(&mut vertices, v.x, v.y, v.z, *normal, color);
        }
        indices.extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
    }

    MeshData { vertices, indices }
}

/// Origin-centered box
pub fn cube(w: f32, h: f32, d: f32, color: [f32; 3]) -> MeshData {
    let half = Vec3::new(w.abs(), h.abs(), d.abs()) * 0.5;
    cuboid(-half, half, color)
}

/// UV sphere centered at the origin
pub fn sphere(radius: f32, rings: u32, sectors: u32, color: [f32; 3]) -> MeshData {
    let mut vertices = Vec::new();
    let mut indices = Vec::new();

    for r in 0..=rings {
        let phi = std::f32::consts::PI * r as f32 / rings as f32;
        let sp = phi.sin();
        let cp = phi.cos();

        for s in 0..=sectors {
            let theta = std::f32::consts::TAU * s as f32 / sectors as f32;
            let x = sp * theta.cos();
            let y = cp;
            let z = sp * theta.sin();

            let n = Vec3::new(x, y, z);
            push_vert(&mut vertices, radius * x, radius * y, radius * z, n, color);
        }
    }

    let row = sectors + 1;
    for r in 0..rings {
        for s in 0..sectors {
            let i0 = r * row + s;
            let i1 = i0 + 1;
            let i2 = i0 + row;
            let i3 = i2 + 1;
            indices.extend_from_slice(&[i0, i2, i1, i1, i2, i3]);
        }
    }

    MeshData { vertices, indices }
}

/// Open lateral surface between two rings, plus end caps where the radius
/// is non-zero.
fn tube(
    radius_top: f32,
    radius_bottom: f32,
    y_bottom: f32,
    y_top: f32,
    segments: u32,
    color: [f32; 3],
) -> MeshData {
    let mut vertices = Vec::new();
    let mut indices = Vec::new();

    let height = y_top - y_bottom;
    let slope = if height.abs() > f32::EPSILON {
        (radius_bottom - radius_top) / height
    } else {
        0.0
    };

    for i in 0..segments {
        let a0 = (i as f32) * std::f32::consts::TAU / segments as f32;
        let a1 = ((i + 1) as f32) * std::f32::consts::TAU / segments as f32;

        let (c0, s0) = (a0.cos(), a0.sin());
        let (c1, s1) = (a1.cos(), a1.sin());

        let n0 = Vec3::new(c0, slope, s0).normalize();
        let n1 = Vec3::new(c1, slope, s1).normalize();

        let base = (vertices.len() / STRIDE) as u32;
        push_vert(&mut vertices, radius_bottom * c0, y_bottom, radius_bottom * s0, n0, color);
        push_vert(&mut vertices, radius_bottom * c1, y_bottom, radius_bottom * s1, n1, color);
        push_vert(&mut vertices, radius_top * c1, y_top, radius_top * s1, n1, color);
        push_vert(&mut vertices, radius_top * c0, y_top, radius_top * s0, n0, color);

        indices.extend_from_slice(&[base, base + 2, base + 1, base, base + 3, base + 2]);
    }

    if radius_top > f32::EPSILON {
        add_cap(&mut vertices, &mut indices, radius_top, y_top, segments, Vec3::Y, color);
    }
    if radius_bottom > f32::EPSILON {
        add_cap(&mut vertices, &mut indices, radius_bottom, y_bottom, segments, Vec3::NEG_Y, color);
    }

    MeshData { vertices, indices }
}

/// Triangle-fan disc at height `y`, wound to face along `normal`
fn add_cap(
    vertices: &mut Vec<f32>,
    indices: &mut Vec<u32>,
    radius: f32,
    y: f32,
    segments: u32,
    normal: Vec3,
    color: [f32; 3],
) {
    let center = (vertices.len() / STRIDE) as u32;
    push_vert(vertices, 0.0, y, 0.0, normal, color);

    for i in 0..=segments {
        let a = (i as f32) * std::f32::consts::TAU / segments as f32;
        push_vert(vertices, radius * a.cos(), y, radius * a.sin(), normal, color);
    }

    for i in 0..segments {
        let rim0 = center + 1 + i;
        let rim1 = center + 2 + i;
        if normal.y >= 0.0 {
            indices.extend_from_slice(&[center, rim1, rim0]);
        } else {
            indices.extend_from_slice(&[center, rim0, rim1]);
        }
    }
}

/// Origin-centered cylinder/frustum with independent end radii
pub fn cylinder(
    radius_top: f32,
    radius_bottom: f32,
    height: f32,
    segments: u32,
    color: [f32; 3],
) -> MeshData {
    let hh = height * 0.5;
    tube(radius_top, radius_bottom, -hh, hh, segments, color)
}

/// Sketch-rectangle extrusion: signed `w`x`h` quad on the ground plane from
/// the local origin, extruded up by `depth`.
pub fn rect_prism(w: f32, h: f32, depth: f32, color: [f32; 3]) -> MeshData {
    let min = Vec3::new(w.min(0.0), 0.0, h.min(0.0));
    let max = Vec3::new(w.max(0.0), depth.max(f32::EPSILON), h.max(0.0));
    cuboid(min, max, color)
}

/// Sketch-circle extrusion: disc of `radius` centered at the local origin,
/// extruded up by `depth`.
pub fn circle_prism(radius: f32, depth: f32, segments: u32, color: [f32; 3]) -> MeshData {
    tube(radius, radius, 0.0, depth.max(f32::EPSILON), segments, color)
}

// ── Wireframe overlay extraction ──

/// Edge of a triangle mesh with the normals of its adjacent faces
#[derive(Debug, Clone)]
struct MeshEdge {
    start: Vec3,
    end: Vec3,
    normal1: Vec3,
    normal2: Option<Vec3>,
}

impl MeshEdge {
    fn dihedral_angle(&self) -> f32 {
        match self.normal2 {
            Some(n2) => self.normal1.dot(n2).clamp(-1.0, 1.0).abs().acos(),
            None => 0.0,
        }
    }

    /// Boundary edges (one adjacent face) and edges whose faces meet at an
    /// angle both belong to the display wireframe.
    fn is_outline(&self, threshold_degrees: f32) -> bool {
        if self.normal2.is_none() {
            return true;
        }
        let angle = self.dihedral_angle().to_degrees();
        angle > threshold_degrees && angle < (360.0 - threshold_degrees)
    }
}

type QuantizedPos = (i64, i64, i64);

fn quantize_position(pos: Vec3) -> QuantizedPos {
    let scale = 10000.0;
    (
        (pos.x * scale).round() as i64,
        (pos.y * scale).round() as i64,
        (pos.z * scale).round() as i64,
    )
}

fn edge_key(p1: QuantizedPos, p2: QuantizedPos) -> (QuantizedPos, QuantizedPos) {
    if p1 < p2 { (p1, p2) } else { (p2, p1) }
}

/// Collect unique mesh edges with their adjacent face normals. Positions are
/// matched by quantized value, not index, because flat shading duplicates
/// vertices per face.
fn extract_edges(mesh: &MeshData) -> Vec<MeshEdge> {
    let mut edge_map: HashMap<(QuantizedPos, QuantizedPos), MeshEdge> = HashMap::new();

    for tri in 0..mesh.triangle_count() {
        let [v0, v1, v2] = mesh.triangle(tri);
        let normal = mesh.triangle_normal(tri).normalize_or_zero();

        let q0 = quantize_position(v0);
        let q1 = quantize_position(v1);
        let q2 = quantize_position(v2);

        for (qa, qb, va, vb) in [(q0, q1, v0, v1), (q1, q2, v1, v2), (q2, q0, v2, v0)] {
            edge_map
                .entry(edge_key(qa, qb))
                .and_modify(|e| {
                    if e.normal2.is_none() {
                        e.normal2 = Some(normal);
                    }
                })
                .or_insert(MeshEdge {
                    start: va,
                    end: vb,
                    normal1: normal,
                    normal2: None,
                });
        }
    }

    edge_map.into_values().collect()
}

/// Angle above which two adjacent faces produce a visible wireframe edge
const OUTLINE_ANGLE_DEGREES: f32 = 1.0;

/// Derive the wireframe-edge overlay for a mesh: boundary edges plus edges
/// where adjacent faces meet at more than [`OUTLINE_ANGLE_DEGREES`].
pub fn wireframe(mesh: &MeshData) -> Vec<Segment> {
    extract_edges(mesh)
        .into_iter()
        .filter(|e| e.is_outline(OUTLINE_ANGLE_DEGREES))
        .map(|e| Segment::new(e.start, e.end))
        .collect()
}
