use serde::{Deserialize, Serialize};

/// Geometry kind tag of a shape record.
///
/// The wire spellings follow the renderer-library geometry class names the
/// format was born with; any unrecognized value deserializes to `Unknown`
/// so old and new documents keep loading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GeometryKind {
    #[serde(rename = "BoxGeometry")]
    Box,
    #[serde(rename = "SphereGeometry")]
    Sphere,
    #[serde(rename = "CylinderGeometry")]
    Cylinder,
    #[serde(rename = "ExtrudeGeometry")]
    Extrude,
    #[serde(rename = "UnknownGeometry", other)]
    Unknown,
}

impl GeometryKind {
    /// Primitives are grid-placed; extrusions and unknowns are not.
    pub fn is_primitive(&self) -> bool {
        matches!(self, Self::Box | Self::Sphere | Self::Cylinder)
    }
}

/// Sketch tool that produced an extrusion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SketchTool {
    Rectangle,
    Circle,
}

/// Kind-specific numeric geometry parameters.
///
/// Serialized sparsely: only the fields meaningful to the record's kind are
/// present. Readers apply per-kind fallbacks instead of requiring fields, so
/// a partially populated record still reconstructs.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct GeometryParams {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub depth: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub radius: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none", rename = "radiusTop")]
    pub radius_top: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none", rename = "radiusBottom")]
    pub radius_bottom: Option<f64>,
}

impl GeometryParams {
    pub fn cuboid(width: f64, height: f64, depth: f64) -> Self {
        Self {
            width: Some(width),
            height: Some(height),
            depth: Some(depth),
            ..Self::default()
        }
    }

    pub fn sphere(radius: f64) -> Self {
        Self {
            radius: Some(radius),
            ..Self::default()
        }
    }

    pub fn cylinder(radius_top: f64, radius_bottom: f64, height: f64) -> Self {
        Self {
            radius_top: Some(radius_top),
            radius_bottom: Some(radius_bottom),
            height: Some(height),
            ..Self::default()
        }
    }

    pub fn extruded_rect(width: f64, height: f64, depth: f64) -> Self {
        Self {
            width: Some(width),
            height: Some(height),
            depth: Some(depth),
            ..Self::default()
        }
    }

    pub fn extruded_circle(radius: f64, depth: f64) -> Self {
        Self {
            radius: Some(radius),
            depth: Some(depth),
            ..Self::default()
        }
    }
}

/// Object transform: position, XYZ Euler rotation in radians, scale
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    pub position: [f64; 3],
    pub rotation: [f64; 3],
    pub scale: [f64; 3],
}

impl Transform {
    pub fn new() -> Self {
        Self {
            position: [0.0, 0.0, 0.0],
            rotation: [0.0, 0.0, 0.0],
            scale: [1.0, 1.0, 1.0],
        }
    }

    pub fn at(x: f64, y: f64, z: f64) -> Self {
        Self {
            position: [x, y, z],
            ..Self::new()
        }
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::new()
    }
}

fn default_color() -> u32 {
    0xFFFFFF
}

/// One serialized shape.
///
/// Lights and helpers never appear in a document; the engine regenerates
/// them on import.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShapeRecord {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: GeometryKind,
    pub position: [f64; 3],
    /// XYZ Euler angles in radians
    pub rotation: [f64; 3],
    pub scale: [f64; 3],
    /// Packed 0xRRGGBB display color
    #[serde(default = "default_color")]
    pub color: u32,
    #[serde(rename = "geometryParams")]
    pub geometry_params: GeometryParams,
    #[serde(rename = "sketchTool", default, skip_serializing_if = "Option::is_none")]
    pub sketch_tool: Option<SketchTool>,
}

/// The portable document: an ordered sequence of shape records
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct SceneDocument {
    pub objects: Vec<ShapeRecord>,
}
