//! Ray picking: resolve a world-space ray to a shape, face or edge
//! selection and keep the highlight overlay in the store up to date.
//!
//! Single-selection model: every pick replaces both the selection and the
//! highlight atomically.

use glam::{Mat4, Vec3};

use crate::geometry::{
    ray_aabb, ray_segment_distance, ray_triangle_intersect, triangle_area, Aabb, Ray, Segment,
};
use crate::store::{Helper, HelperKind, SceneStore, Shape, PICK_HIGHLIGHT};

/// Maximum ray-to-segment distance for an edge selection, world units
pub const EDGE_PICK_THRESHOLD: f32 = 0.05;

/// Coarse tolerance for wireframe hits during the intersection sweep.
/// Near misses inside this band still produce an entity hit; the fine
/// [`EDGE_PICK_THRESHOLD`] then decides between edge and shape selection.
const WIREFRAME_PICK_TOLERANCE: f32 = 0.5;

const HIGHLIGHT_COLOR: u32 = 0xFFFF00;

/// The live selection. At most one exists at a time.
#[derive(Clone, Debug, PartialEq)]
pub enum SelectionInfo {
    /// Whole-shape selection
    Shape { name: String },
    /// Face selection with its local-space normal and area
    Face { name: String, normal: Vec3, area: f32 },
    /// Edge selection with the world-space endpoint distance
    Edge { name: String, length: f32 },
}

impl SelectionInfo {
    pub fn shape_name(&self) -> &str {
        match self {
            Self::Shape { name } | Self::Face { name, .. } | Self::Edge { name, .. } => name,
        }
    }
}

/// One entity intersected by the pick ray. The shape is identified by its
/// position in store order, not by name: committed sketches share a name
/// per tool, so a name lookup could resolve to the wrong mesh.
struct EntityHit {
    index: usize,
    /// Ray parameter of the hit (ascending = nearer)
    t: f32,
    /// Triangle index when the ray actually pierced the surface; `None`
    /// for a wireframe near-miss
    triangle: Option<usize>,
}

/// Owns the transient highlight and the current selection
#[derive(Default)]
pub struct Picker {
    selection: Option<SelectionInfo>,
}

impl Picker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selection(&self) -> Option<&SelectionInfo> {
        self.selection.as_ref()
    }

    /// Drop the selection and its highlight overlay.
    pub fn clear(&mut self, store: &mut SceneStore) {
        self.selection = None;
        store.remove_helper(PICK_HIGHLIGHT);
    }

    /// Resolve `ray` against the store. Helpers and lights never intersect.
    /// Returns the new selection, or `None` on a miss (which clears any
    /// previous selection and highlight).
    pub fn pick(&mut self, store: &mut SceneStore, ray: &Ray) -> Option<SelectionInfo> {
        let mut hits: Vec<EntityHit> = store
            .shapes()
            .enumerate()
            .filter_map(|(index, shape)| {
                intersect_shape(shape, ray).map(|(t, triangle)| EntityHit { index, t, triangle })
            })
            .collect();

        // Nearest first; equidistant entities keep sweep order
        hits.sort_by(|a, b| a.t.total_cmp(&b.t));

        let Some(nearest) = hits.into_iter().next() else {
            self.clear(store);
            return None;
        };

        let Some(shape) = store.shapes().nth(nearest.index) else {
            self.clear(store);
            return None;
        };

        let matrix = shape.model_matrix();
        let (selection, highlight) = classify(shape, &matrix, ray, nearest.triangle);

        store.upsert_helper(Helper {
            name: PICK_HIGHLIGHT.to_string(),
            kind: HelperKind::Highlight { lines: highlight, color: HIGHLIGHT_COLOR },
        });
        self.selection = Some(selection.clone());
        Some(selection)
    }
}

/// Entity-level intersection: the nearest surface triangle when the ray
/// pierces the mesh, otherwise the nearest wireframe segment within the
/// coarse tolerance. Returns the ray parameter and the triangle index
/// (`None` for a wireframe near-miss).
fn intersect_shape(shape: &Shape, ray: &Ray) -> Option<(f32, Option<usize>)> {
    let matrix = shape.model_matrix();

    // Coarse cull: the world bounds of the shape, widened by the wireframe
    // band, must be on the ray before any per-triangle work
    let bounds = Aabb::from_points(
        shape
            .local_aabb()
            .corners()
            .map(|c| matrix.transform_point3(c)),
    );
    let cull = Aabb {
        min: bounds.min - Vec3::splat(WIREFRAME_PICK_TOLERANCE),
        max: bounds.max + Vec3::splat(WIREFRAME_PICK_TOLERANCE),
    };
    ray_aabb(ray, &cull)?;

    let mut best_face: Option<(f32, usize)> = None;
    for tri in 0..shape.mesh.triangle_count() {
        let [v0, v1, v2] = shape.mesh.triangle(tri);
        let t = ray_triangle_intersect(
            ray,
            matrix.transform_point3(v0),
            matrix.transform_point3(v1),
            matrix.transform_point3(v2),
        );
        if let Some(t) = t {
            if best_face.is_none_or(|(bt, _)| t < bt) {
                best_face = Some((t, tri));
            }
        }
    }

    if let Some((t, tri)) = best_face {
        return Some((t, Some(tri)));
    }

    let mut best_wire: Option<f32> = None;
    for segment in &shape.wireframe {
        let world = world_segment(&matrix, segment);
        let (dist, t) = ray_segment_distance(ray, &world);
        if dist < WIREFRAME_PICK_TOLERANCE && best_wire.is_none_or(|bt| t < bt) {
            best_wire = Some(t);
        }
    }

    best_wire.map(|t| (t, None))
}

/// Classify the nearest entity hit into a face, edge or shape selection and
/// build its highlight overlay.
fn classify(
    shape: &Shape,
    matrix: &Mat4,
    ray: &Ray,
    triangle: Option<usize>,
) -> (SelectionInfo, Vec<Segment>) {
    // A shape without surface triangles can only select as a whole
    if shape.mesh.triangle_count() == 0 {
        return shape_selection(shape, matrix);
    }

    if let Some(tri) = triangle {
        // Vertex-buffer triangle: area and normal are reported in local
        // space, the outline is drawn in world space
        let [v0, v1, v2] = shape.mesh.triangle(tri);
        let area = triangle_area(v0, v1, v2);
        let normal = shape.mesh.triangle_normal(tri);

        let w0 = matrix.transform_point3(v0);
        let w1 = matrix.transform_point3(v1);
        let w2 = matrix.transform_point3(v2);
        let outline = vec![
            Segment::new(w0, w1),
            Segment::new(w1, w2),
            Segment::new(w2, w0),
        ];

        return (
            SelectionInfo::Face {
                name: shape.name.clone(),
                normal,
                area,
            },
            outline,
        );
    }

    // Boundary-edge classification over the wireframe overlay
    let mut best: Option<(f32, Segment)> = None;
    for segment in &shape.wireframe {
        let world = world_segment(matrix, segment);
        let (dist, _) = ray_segment_distance(ray, &world);
        if best.as_ref().is_none_or(|(bd, _)| dist < *bd) {
            best = Some((dist, world));
        }
    }

    if let Some((dist, segment)) = best {
        if dist < EDGE_PICK_THRESHOLD {
            return (
                SelectionInfo::Edge {
                    name: shape.name.clone(),
                    length: segment.length(),
                },
                vec![segment],
            );
        }
    }

    shape_selection(shape, matrix)
}

/// Whole-shape selection with a bounding-box outline highlight
fn shape_selection(shape: &Shape, matrix: &Mat4) -> (SelectionInfo, Vec<Segment>) {
    let corners = shape.local_aabb().corners().map(|c| matrix.transform_point3(c));

    // Bottom face, top face, verticals
    let box_edges: [(usize, usize); 12] = [
        (0, 1), (1, 2), (2, 3), (3, 0),
        (4, 5), (5, 6), (6, 7), (7, 4),
        (0, 4), (1, 5), (2, 6), (3, 7),
    ];
    let outline = box_edges
        .iter()
        .map(|&(a, b)| Segment::new(corners[a], corners[b]))
        .collect();

    (
        SelectionInfo::Shape {
            name: shape.name.clone(),
        },
        outline,
    )
}

fn world_segment(matrix: &Mat4, segment: &Segment) -> Segment {
    Segment::new(
        matrix.transform_point3(segment.start),
        matrix.transform_point3(segment.end),
    )
}
