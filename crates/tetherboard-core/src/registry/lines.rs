//! Line registry.

use crate::error::{DiagramError, DiagramResult};
use crate::shapes::{Line, LineId, ShapeId, point_to_segment_dist};
use kurbo::Point;
use std::collections::HashMap;

/// All committed lines, keyed by id, in insertion order.
#[derive(Debug, Clone, Default)]
pub struct LineRegistry {
    lines: HashMap<LineId, Line>,
    order: Vec<LineId>,
}

impl LineRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, line: Line) -> LineId {
        let id = line.id();
        if self.lines.insert(id, line).is_none() {
            self.order.push(id);
        }
        id
    }

    pub fn remove(&mut self, id: LineId) -> Option<Line> {
        self.order.retain(|&line_id| line_id != id);
        self.lines.remove(&id)
    }

    pub fn get(&self, id: LineId) -> Option<&Line> {
        self.lines.get(&id)
    }

    pub fn get_mut(&mut self, id: LineId) -> DiagramResult<&mut Line> {
        self.lines.get_mut(&id).ok_or(DiagramError::LineNotFound(id))
    }

    /// Lines in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Line> {
        self.order.iter().filter_map(|id| self.lines.get(id))
    }

    /// Set every endpoint bound to `shape` to `center`.
    /// Returns the number of endpoints moved.
    pub fn sync_bound(&mut self, shape: ShapeId, center: Point) -> usize {
        let mut moved = 0;
        for line in self.lines.values_mut() {
            for ep in [&mut line.start, &mut line.end] {
                if ep.bound_shape() == Some(shape) {
                    ep.position = center;
                    moved += 1;
                }
            }
        }
        moved
    }

    /// Free every endpoint bound to `shape`, leaving it at its last coordinate.
    /// Returns the number of endpoints detached.
    pub fn detach_all(&mut self, shape: ShapeId) -> usize {
        let mut detached = 0;
        for line in self.lines.values_mut() {
            for ep in [&mut line.start, &mut line.end] {
                if ep.bound_shape() == Some(shape) {
                    let position = ep.position;
                    ep.release(position);
                    detached += 1;
                }
            }
        }
        detached
    }

    /// Topmost (last drawn) line whose body passes within `tolerance` of `point`.
    pub fn line_at(&self, point: Point, tolerance: f64) -> Option<&Line> {
        self.order
            .iter()
            .rev()
            .filter_map(|id| self.lines.get(id))
            .find(|l| point_to_segment_dist(point, l.start.position, l.end.position) <= tolerance)
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }
}
