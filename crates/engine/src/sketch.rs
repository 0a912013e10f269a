//! Sketch-in-progress state and preview outlines.
//!
//! A sketch stroke lives entirely on the ground plane: the first pointer
//! sample anchors it, subsequent moves reshape the preview, and the commit
//! turns it into a permanent extrusion via the factory.

use glam::Vec3;
use shared::SketchTool;

use crate::geometry::Segment;

pub const RECT_PREVIEW_COLOR: u32 = 0x22CCFF;
pub const CIRCLE_PREVIEW_COLOR: u32 = 0x44FF88;

/// Preview overlays float just above the grid to avoid z-fighting
const PREVIEW_LIFT: f32 = 0.01;

const CIRCLE_PREVIEW_SEGMENTS: usize = 32;

/// Transient sketch-mode state; holds no scene entities itself
#[derive(Default)]
pub struct SketchState {
    tool: Option<SketchTool>,
    anchor: Option<(f64, f64)>,
}

impl SketchState {
    /// Arm sketch mode with a tool, dropping any half-drawn stroke.
    pub fn begin(&mut self, tool: SketchTool) {
        self.tool = Some(tool);
        self.anchor = None;
    }

    pub fn active_tool(&self) -> Option<SketchTool> {
        self.tool
    }

    /// Return the stroke anchor, setting it from `point` on the first call.
    pub fn anchor_or_set(&mut self, point: (f64, f64)) -> (f64, f64) {
        *self.anchor.get_or_insert(point)
    }

    /// Take the finished stroke. The tool stays armed for the next stroke;
    /// returns `None` when no stroke was started.
    pub fn take_stroke(&mut self) -> Option<(SketchTool, (f64, f64))> {
        let start = self.anchor.take()?;
        self.tool.map(|tool| (tool, start))
    }

    /// Leave sketch mode entirely.
    pub fn cancel(&mut self) {
        self.tool = None;
        self.anchor = None;
    }
}

pub fn preview_color(tool: SketchTool) -> u32 {
    match tool {
        SketchTool::Rectangle => RECT_PREVIEW_COLOR,
        SketchTool::Circle => CIRCLE_PREVIEW_COLOR,
    }
}

/// World-space outline of the stroke between `start` and `end`.
pub fn preview_outline(tool: SketchTool, start: (f64, f64), end: (f64, f64)) -> Vec<Segment> {
    match tool {
        SketchTool::Rectangle => {
            let a = Vec3::new(start.0 as f32, PREVIEW_LIFT, start.1 as f32);
            let b = Vec3::new(end.0 as f32, PREVIEW_LIFT, start.1 as f32);
            let c = Vec3::new(end.0 as f32, PREVIEW_LIFT, end.1 as f32);
            let d = Vec3::new(start.0 as f32, PREVIEW_LIFT, end.1 as f32);
            vec![
                Segment::new(a, b),
                Segment::new(b, c),
                Segment::new(c, d),
                Segment::new(d, a),
            ]
        }
        SketchTool::Circle => {
            let radius = ((end.0 - start.0).powi(2) + (end.1 - start.1).powi(2)).sqrt() as f32;
            let center = Vec3::new(start.0 as f32, PREVIEW_LIFT, start.1 as f32);

            (0..CIRCLE_PREVIEW_SEGMENTS)
                .map(|i| {
                    let a0 = std::f32::consts::TAU * i as f32 / CIRCLE_PREVIEW_SEGMENTS as f32;
                    let a1 = std::f32::consts::TAU * (i + 1) as f32 / CIRCLE_PREVIEW_SEGMENTS as f32;
                    Segment::new(
                        center + Vec3::new(a0.cos(), 0.0, a0.sin()) * radius,
                        center + Vec3::new(a1.cos(), 0.0, a1.sin()) * radius,
                    )
                })
                .collect()
        }
    }
}
