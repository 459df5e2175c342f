use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::ir::EmployeeId;

use super::routing::{EdgePath, EdgeStyle};

/// Top-left corner of a node box.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: f32,
    pub y: f32,
}

impl Position {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned box in layout coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Bounds {
    pub min_x: f32,
    pub min_y: f32,
    pub max_x: f32,
    pub max_y: f32,
}

impl Bounds {
    pub fn width(&self) -> f32 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f32 {
        self.max_y - self.min_y
    }

    pub fn padded(&self, pad: f32) -> Self {
        Self {
            min_x: self.min_x - pad,
            min_y: self.min_y - pad,
            max_x: self.max_x + pad,
            max_y: self.max_y + pad,
        }
    }

    /// Box around node boxes of `width` x `height` placed at `positions`.
    pub fn of_nodes<'a>(
        positions: impl IntoIterator<Item = &'a Position>,
        width: f32,
        height: f32,
    ) -> Option<Self> {
        let mut iter = positions.into_iter();
        let first = iter.next()?;
        let mut bounds = Self {
            min_x: first.x,
            min_y: first.y,
            max_x: first.x + width,
            max_y: first.y + height,
        };
        for pos in iter {
            bounds.min_x = bounds.min_x.min(pos.x);
            bounds.min_y = bounds.min_y.min(pos.y);
            bounds.max_x = bounds.max_x.max(pos.x + width);
            bounds.max_y = bounds.max_y.max(pos.y + height);
        }
        Some(bounds)
    }
}

/// Request for the rendering surface to frame the chart after an organize.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FitViewRequest {
    pub bounds: Bounds,
}

#[derive(Debug, Clone)]
pub struct NodeLayout {
    pub id: EmployeeId,
    pub level: usize,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub name: String,
    pub position: String,
    pub department: String,
}

impl NodeLayout {
    pub fn bottom_center(&self) -> Position {
        Position::new(self.x + self.width / 2.0, self.y + self.height)
    }

    pub fn top_center(&self) -> Position {
        Position::new(self.x + self.width / 2.0, self.y)
    }
}

#[derive(Debug, Clone)]
pub struct EdgeLayout {
    pub manager: EmployeeId,
    pub subordinate: EmployeeId,
    pub style: EdgeStyle,
    pub path: EdgePath,
}

#[derive(Debug, Clone)]
pub struct Layout {
    pub nodes: BTreeMap<EmployeeId, NodeLayout>,
    pub edges: Vec<EdgeLayout>,
    pub bounds: Bounds,
    pub width: f32,
    pub height: f32,
}
