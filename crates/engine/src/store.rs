//! The live scene: a flat set of entities (shapes, lights, helpers).
//!
//! Shapes are the persisted, pickable payload; lights only illuminate;
//! helpers are UI aids (grid, pick highlight, sketch preview) that never
//! serialize and never pick.

use glam::{EulerRot, Mat4, Quat, Vec3};
use shared::{GeometryKind, GeometryParams, SketchTool, Transform};

use crate::factory;
use crate::geometry::{Aabb, Segment};
use crate::mesh::MeshData;

pub const GRID_HELPER: &str = "grid-helper";
pub const PICK_HIGHLIGHT: &str = "pick-highlight";
pub const SKETCH_PREVIEW: &str = "sketch-preview";

/// A user-created geometric object, the unit of placement, selection and
/// persistence. Mesh and wireframe are derived from kind/params and
/// regenerated on reconstruction, never persisted.
#[derive(Clone, Debug)]
pub struct Shape {
    pub name: String,
    pub kind: GeometryKind,
    pub params: GeometryParams,
    pub transform: Transform,
    /// Packed 0xRRGGBB display color
    pub color: u32,
    pub sketch_tool: Option<SketchTool>,
    pub mesh: MeshData,
    /// Derived wireframe-edge overlay, local space
    pub wireframe: Vec<Segment>,
}

impl Shape {
    /// Construct a shape, deriving its mesh and wireframe overlay.
    pub fn build(
        name: String,
        kind: GeometryKind,
        params: GeometryParams,
        transform: Transform,
        color: u32,
        sketch_tool: Option<SketchTool>,
    ) -> Self {
        let mesh = factory::build_mesh(kind, &params, sketch_tool, color);
        let wireframe = crate::mesh::wireframe(&mesh);
        Self {
            name,
            kind,
            params,
            transform,
            color,
            sketch_tool,
            mesh,
            wireframe,
        }
    }

    /// Local-to-world matrix (scale, then XYZ Euler rotation, then
    /// translation)
    pub fn model_matrix(&self) -> Mat4 {
        let [px, py, pz] = self.transform.position;
        let [rx, ry, rz] = self.transform.rotation;
        let [sx, sy, sz] = self.transform.scale;
        Mat4::from_scale_rotation_translation(
            Vec3::new(sx as f32, sy as f32, sz as f32),
            Quat::from_euler(EulerRot::XYZ, rx as f32, ry as f32, rz as f32),
            Vec3::new(px as f32, py as f32, pz as f32),
        )
    }

    /// Bounding box of the mesh in local (unscaled) space
    pub fn local_aabb(&self) -> Aabb {
        Aabb::from_points(self.mesh.positions())
    }

    /// Drop the shape onto the ground: vertical position becomes half the
    /// local mesh height.
    pub fn center_vertically(&mut self) {
        self.transform.position[1] = (self.local_aabb().height() / 2.0) as f64;
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LightKind {
    Ambient,
    Directional,
}

/// Scene illumination. Never serialized; the codec synthesizes a default
/// pair when an imported store has none.
#[derive(Clone, Debug)]
pub struct Light {
    pub name: String,
    pub kind: LightKind,
    pub color: u32,
    pub intensity: f32,
    pub position: [f64; 3],
}

impl Light {
    pub fn ambient(name: &str, intensity: f32) -> Self {
        Self {
            name: name.to_string(),
            kind: LightKind::Ambient,
            color: 0xFFFFFF,
            intensity,
            position: [0.0, 0.0, 0.0],
        }
    }

    pub fn directional(name: &str, intensity: f32, position: [f64; 3]) -> Self {
        Self {
            name: name.to_string(),
            kind: LightKind::Directional,
            color: 0xFFFFFF,
            intensity,
            position,
        }
    }
}

/// Non-persisted UI aid living in the store
#[derive(Clone, Debug)]
pub struct Helper {
    pub name: String,
    pub kind: HelperKind,
}

#[derive(Clone, Debug)]
pub enum HelperKind {
    Grid { size: f32, divisions: u32 },
    /// Pick feedback: segment overlay in world space
    Highlight { lines: Vec<Segment>, color: u32 },
    /// Sketch-in-progress outline in world space
    SketchPreview { outline: Vec<Segment>, color: u32 },
}

/// Any item in the scene
#[derive(Clone, Debug)]
pub enum Entity {
    Shape(Shape),
    Light(Light),
    Helper(Helper),
}

/// Owns the live entity set and the global running primitive counter used
/// for grid placement.
#[derive(Default)]
pub struct SceneStore {
    entities: Vec<Entity>,
    primitives_added: usize,
}

impl SceneStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fresh editing scene: ground grid plus the default light rig.
    pub fn with_defaults() -> Self {
        let mut store = Self::new();
        store.entities.push(Entity::Helper(Helper {
            name: GRID_HELPER.to_string(),
            kind: HelperKind::Grid { size: 20.0, divisions: 20 },
        }));
        store.entities.push(Entity::Light(Light::ambient("ambient", 0.5)));
        store
            .entities
            .push(Entity::Light(Light::directional("sun", 0.8, [10.0, 10.0, 10.0])));
        store
    }

    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    pub fn add_shape(&mut self, shape: Shape) {
        self.entities.push(Entity::Shape(shape));
    }

    /// Create a primitive, place it on the next grid slot, and insert it.
    /// Returns the generated shape name.
    pub fn add_primitive(&mut self, kind: GeometryKind) -> String {
        let slot = self.primitives_added;
        self.primitives_added += 1;

        let label = match kind {
            GeometryKind::Sphere => "sphere",
            GeometryKind::Cylinder => "cylinder",
            _ => "box",
        };
        let name = format!("{label}-{}", slot + 1);

        let mut shape = factory::create_primitive(&name, kind);
        let (x, z) = factory::grid_position(slot);
        shape.transform.position = [x, 0.0, z];
        shape.center_vertically();
        self.add_shape(shape);
        name
    }

    pub fn shapes(&self) -> impl Iterator<Item = &Shape> {
        self.entities.iter().filter_map(|e| match e {
            Entity::Shape(s) => Some(s),
            _ => None,
        })
    }

    pub fn shape_count(&self) -> usize {
        self.shapes().count()
    }

    pub fn shape(&self, name: &str) -> Option<&Shape> {
        self.shapes().find(|s| s.name == name)
    }

    pub fn shape_mut(&mut self, name: &str) -> Option<&mut Shape> {
        self.entities.iter_mut().find_map(|e| match e {
            Entity::Shape(s) if s.name == name => Some(s),
            _ => None,
        })
    }

    pub fn lights(&self) -> impl Iterator<Item = &Light> {
        self.entities.iter().filter_map(|e| match e {
            Entity::Light(l) => Some(l),
            _ => None,
        })
    }

    pub fn has_lights(&self) -> bool {
        self.lights().next().is_some()
    }

    /// Default illumination synthesized on import when none survived
    pub fn add_default_lights(&mut self) {
        self.entities.push(Entity::Light(Light::ambient("ambient", 0.6)));
        self.entities
            .push(Entity::Light(Light::directional("sun", 0.8, [5.0, 10.0, 5.0])));
    }

    pub fn helper(&self, name: &str) -> Option<&Helper> {
        self.entities.iter().find_map(|e| match e {
            Entity::Helper(h) if h.name == name => Some(h),
            _ => None,
        })
    }

    /// Insert a helper, replacing any existing one with the same name.
    pub fn upsert_helper(&mut self, helper: Helper) {
        self.remove_helper(&helper.name);
        self.entities.push(Entity::Helper(helper));
    }

    pub fn remove_helper(&mut self, name: &str) {
        self.entities
            .retain(|e| !matches!(e, Entity::Helper(h) if h.name == name));
    }

    /// Remove all entities.
    pub fn clear(&mut self) {
        self.entities.clear();
    }

    /// Swap in a new shape set while preserving lights and helpers.
    /// The swap is a single step: callers build the full list first so a
    /// failed reconstruction never leaves a partial store.
    pub fn replace_shapes(&mut self, shapes: Vec<Shape>) {
        let mut next: Vec<Entity> = self
            .entities
            .iter()
            .filter(|e| !matches!(e, Entity::Shape(_)))
            .cloned()
            .collect();
        next.extend(shapes.into_iter().map(Entity::Shape));
        self.entities = next;
    }
}
