use serde::{Deserialize, Serialize};

use crate::geometry::{Point, Rect};

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PathCmd {
    MoveTo([f32; 2]),
    LineTo([f32; 2]),
    QuadTo([f32; 2], [f32; 2]),
    CubicTo([f32; 2], [f32; 2], [f32; 2]),
    Close,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Path {
    pub cmds: Vec<PathCmd>,
}

// Kappa constant for approximating a quarter circle with a cubic bezier.
const KAPPA: f32 = 0.552_284_75;

impl Path {
    pub fn new(cmds: Vec<PathCmd>) -> Self {
        Self { cmds }
    }

    /// A circle approximated by four cubic segments.
    pub fn circle(center: Point, radius: f32) -> Self {
        let (cx, cy, r) = (center.x, center.y, radius);
        let k = KAPPA * r;
        Self {
            cmds: vec![
                PathCmd::MoveTo([cx + r, cy]),
                PathCmd::CubicTo([cx + r, cy + k], [cx + k, cy + r], [cx, cy + r]),
                PathCmd::CubicTo([cx - k, cy + r], [cx - r, cy + k], [cx - r, cy]),
                PathCmd::CubicTo([cx - r, cy - k], [cx - k, cy - r], [cx, cy - r]),
                PathCmd::CubicTo([cx + k, cy - r], [cx + r, cy - k], [cx + r, cy]),
                PathCmd::Close,
            ],
        }
    }

    pub fn rect(r: Rect) -> Self {
        Self {
            cmds: vec![
                PathCmd::MoveTo([r.min_x(), r.min_y()]),
                PathCmd::LineTo([r.max_x(), r.min_y()]),
                PathCmd::LineTo([r.max_x(), r.max_y()]),
                PathCmd::LineTo([r.min_x(), r.max_y()]),
                PathCmd::Close,
            ],
        }
    }

    /// Two paths are congruent when their command lists have the same shape
    /// (same verbs in the same order), so points can be paired off.
    pub fn is_congruent_to(&self, other: &Path) -> bool {
        self.cmds.len() == other.cmds.len()
            && self
                .cmds
                .iter()
                .zip(other.cmds.iter())
                .all(|(a, b)| std::mem::discriminant(a) == std::mem::discriminant(b))
    }
}
