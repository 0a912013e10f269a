//! Shape construction: primitives with canonical defaults and sketch
//! extrusions. Pure and deterministic; placement policy stays with the
//! store/editor.

use shared::{GeometryKind, GeometryParams, SketchTool, Transform};

use crate::mesh::{self, MeshData};
use crate::store::Shape;

/// Grid placement for the i-th primitive added
pub const GRID_COLS: usize = 5;
pub const GRID_SPACING: f64 = 2.5;
const GRID_Z_OFFSET: f64 = -5.0;

/// Sketch input snap resolution
pub const SNAP_GRID: f64 = 0.1;

/// Default extrusion depth for committed sketches
pub const DEFAULT_EXTRUDE_DEPTH: f64 = 0.5;

const SPHERE_SUBDIVISIONS: u32 = 16;
const CYLINDER_SEGMENTS: u32 = 16;
const CIRCLE_PRISM_SEGMENTS: u32 = 32;

const BOX_COLOR: u32 = 0x4477FB;
const SPHERE_COLOR: u32 = 0xFF8848;
const CYLINDER_COLOR: u32 = 0x44FFAB;
const RECT_EXTRUDE_COLOR: u32 = 0xFF5533;
const CIRCLE_EXTRUDE_COLOR: u32 = 0xFFAA00;

/// Ground-plane slot for the i-th primitive (0-indexed):
/// `x = (i mod cols)*spacing - ((cols-1)*spacing)/2`,
/// `z = floor(i / cols)*spacing - 5`.
pub fn grid_position(i: usize) -> (f64, f64) {
    let x = (i % GRID_COLS) as f64 * GRID_SPACING - ((GRID_COLS - 1) as f64 * GRID_SPACING) / 2.0;
    let z = (i / GRID_COLS) as f64 * GRID_SPACING + GRID_Z_OFFSET;
    (x, z)
}

/// Snap a sketch coordinate to the 0.1 ground grid
pub fn snap_to_grid(value: f64) -> f64 {
    (value / SNAP_GRID).round() * SNAP_GRID
}

/// Build the triangle mesh for a kind/params pair, applying the documented
/// parameter fallbacks. An `Unknown` kind degrades to a unit box.
pub fn build_mesh(
    kind: GeometryKind,
    params: &GeometryParams,
    tool: Option<SketchTool>,
    color: u32,
) -> MeshData {
    let rgb = mesh::unpack_color(color);
    match kind {
        GeometryKind::Box => mesh::cube(
            params.width.unwrap_or(1.0) as f32,
            params.height.unwrap_or(1.0) as f32,
            params.depth.unwrap_or(1.0) as f32,
            rgb,
        ),
        GeometryKind::Sphere => mesh::sphere(
            params.radius.unwrap_or(0.5) as f32,
            SPHERE_SUBDIVISIONS,
            SPHERE_SUBDIVISIONS,
            rgb,
        ),
        GeometryKind::Cylinder => mesh::cylinder(
            params.radius_top.unwrap_or(0.4) as f32,
            params.radius_bottom.unwrap_or(0.4) as f32,
            params.height.unwrap_or(1.0) as f32,
            CYLINDER_SEGMENTS,
            rgb,
        ),
        GeometryKind::Extrude => {
            let depth = params.depth.unwrap_or(DEFAULT_EXTRUDE_DEPTH) as f32;
            match tool.unwrap_or(SketchTool::Rectangle) {
                SketchTool::Rectangle => mesh::rect_prism(
                    params.width.unwrap_or(1.0) as f32,
                    params.height.unwrap_or(1.0) as f32,
                    depth,
                    rgb,
                ),
                SketchTool::Circle => mesh::circle_prism(
                    params.radius.unwrap_or(1.0) as f32,
                    depth,
                    CIRCLE_PRISM_SEGMENTS,
                    rgb,
                ),
            }
        }
        GeometryKind::Unknown => mesh::cube(1.0, 1.0, 1.0, rgb),
    }
}

/// Create a primitive shape with canonical defaults. Non-primitive kinds
/// fall back to the default box, mirroring the factory this came from.
pub fn create_primitive(name: &str, kind: GeometryKind) -> Shape {
    let (kind, params, color) = match kind {
        GeometryKind::Sphere => (GeometryKind::Sphere, GeometryParams::sphere(0.5), SPHERE_COLOR),
        GeometryKind::Cylinder => (
            GeometryKind::Cylinder,
            GeometryParams::cylinder(0.4, 0.4, 1.0),
            CYLINDER_COLOR,
        ),
        _ => (GeometryKind::Box, GeometryParams::cuboid(1.0, 1.0, 1.0), BOX_COLOR),
    };

    Shape::build(name.to_string(), kind, params, Transform::new(), color, None)
}

/// Create a sketch extrusion between two ground-plane points.
///
/// Rectangle: signed width/height from `end - start`. Circle: radius is the
/// planar distance between the points, centered at the shape's local
/// origin. The shape is positioned at `start` and never grid-placed.
pub fn create_extrusion(
    name: &str,
    tool: SketchTool,
    start: (f64, f64),
    end: (f64, f64),
    depth: f64,
) -> Shape {
    let (params, color) = match tool {
        SketchTool::Rectangle => {
            let w = end.0 - start.0;
            let h = end.1 - start.1;
            (GeometryParams::extruded_rect(w, h, depth), RECT_EXTRUDE_COLOR)
        }
        SketchTool::Circle => {
            let radius = ((end.0 - start.0).powi(2) + (end.1 - start.1).powi(2)).sqrt();
            (GeometryParams::extruded_circle(radius, depth), CIRCLE_EXTRUDE_COLOR)
        }
    };

    Shape::build(
        name.to_string(),
        GeometryKind::Extrude,
        params,
        Transform::at(start.0, 0.0, start.1),
        color,
        Some(tool),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Aabb;

    #[test]
    fn test_grid_position_first_row() {
        assert_eq!(grid_position(0), (-5.0, -5.0));
        assert_eq!(grid_position(1), (-2.5, -5.0));
        assert_eq!(grid_position(4), (5.0, -5.0));
    }

    #[test]
    fn test_grid_position_wraps_rows() {
        assert_eq!(grid_position(5), (-5.0, -2.5));
        assert_eq!(grid_position(12), (0.0, 0.0));
    }

    #[test]
    fn test_snap_to_grid() {
        assert!((snap_to_grid(2.03) - 2.0).abs() < 1e-9);
        assert!((snap_to_grid(1.48) - 1.5).abs() < 1e-9);
        assert!((snap_to_grid(-0.26) + 0.3).abs() < 1e-9);
    }

    #[test]
    fn test_primitive_defaults() {
        let s = create_primitive("box-1", GeometryKind::Box);
        assert_eq!(s.color, 0x4477FB);
        assert_eq!(s.params.width, Some(1.0));

        let s = create_primitive("sphere-1", GeometryKind::Sphere);
        assert_eq!(s.color, 0xFF8848);
        assert_eq!(s.params.radius, Some(0.5));

        let s = create_primitive("cylinder-1", GeometryKind::Cylinder);
        assert_eq!(s.color, 0x44FFAB);
        assert_eq!(s.params.radius_top, Some(0.4));
        assert_eq!(s.params.height, Some(1.0));
    }

    #[test]
    fn test_non_primitive_kind_falls_back_to_box() {
        let s = create_primitive("x", GeometryKind::Unknown);
        assert_eq!(s.kind, GeometryKind::Box);
        let s = create_primitive("x", GeometryKind::Extrude);
        assert_eq!(s.kind, GeometryKind::Box);
    }

    #[test]
    fn test_every_shape_gets_a_wireframe() {
        let s = create_primitive("box-1", GeometryKind::Box);
        assert!(!s.wireframe.is_empty());
        let s = create_extrusion("e", SketchTool::Circle, (0.0, 0.0), (1.0, 0.0), 0.5);
        assert!(!s.wireframe.is_empty());
    }

    #[test]
    fn test_rectangle_extrusion_signed_params() {
        let s = create_extrusion("e", SketchTool::Rectangle, (2.0, 1.0), (0.5, 3.0), 0.5);
        assert_eq!(s.params.width, Some(-1.5));
        assert_eq!(s.params.height, Some(2.0));
        assert_eq!(s.params.depth, Some(0.5));
        assert_eq!(s.transform.position, [2.0, 0.0, 1.0]);
        assert_eq!(s.sketch_tool, Some(SketchTool::Rectangle));
    }

    #[test]
    fn test_circle_extrusion_radius_is_planar_distance() {
        let s = create_extrusion("e", SketchTool::Circle, (1.0, 1.0), (4.0, 5.0), 0.5);
        assert_eq!(s.params.radius, Some(5.0));
        assert_eq!(s.transform.position, [1.0, 0.0, 1.0]);
    }

    #[test]
    fn test_unknown_kind_mesh_is_unit_box() {
        let m = build_mesh(GeometryKind::Unknown, &GeometryParams::default(), None, 0xFFFFFF);
        let aabb = Aabb::from_points(m.positions());
        assert!((aabb.height() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_build_mesh_applies_fallbacks() {
        // Empty params still reconstruct every kind
        let empty = GeometryParams::default();
        assert!(build_mesh(GeometryKind::Box, &empty, None, 0).triangle_count() > 0);
        assert!(build_mesh(GeometryKind::Sphere, &empty, None, 0).triangle_count() > 0);
        assert!(build_mesh(GeometryKind::Cylinder, &empty, None, 0).triangle_count() > 0);
        assert!(build_mesh(GeometryKind::Extrude, &empty, None, 0).triangle_count() > 0);
    }
}
