//! Shape registry.

use crate::error::{DiagramError, DiagramResult};
use crate::shapes::{DEFAULT_SHAPE_SIZE, Shape, ShapeId, ShapeKind};
use kurbo::Point;
use std::collections::HashMap;

/// All placed shapes, keyed by id.
///
/// Iteration follows insertion order so rendering and hit-testing are
/// deterministic.
#[derive(Debug, Clone)]
pub struct ShapeRegistry {
    shapes: HashMap<ShapeId, Shape>,
    order: Vec<ShapeId>,
    shape_size: f64,
}

impl Default for ShapeRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl ShapeRegistry {
    /// Create an empty registry placing shapes of the default size.
    pub fn new() -> Self {
        Self::with_shape_size(DEFAULT_SHAPE_SIZE)
    }

    /// Create an empty registry placing shapes of `size`.
    pub fn with_shape_size(size: f64) -> Self {
        Self {
            shapes: HashMap::new(),
            order: Vec::new(),
            shape_size: size,
        }
    }

    /// Place a new shape with its bounding box origin at `position`.
    pub fn place(&mut self, position: Point, kind: ShapeKind) -> ShapeId {
        self.insert(Shape::new(kind, position, self.shape_size))
    }

    /// Insert an already constructed shape.
    pub fn insert(&mut self, shape: Shape) -> ShapeId {
        let id = shape.id();
        if self.shapes.insert(id, shape).is_none() {
            self.order.push(id);
        }
        id
    }

    /// Move a shape's origin to `(x, y)`. Returns the new center.
    pub fn reposition(&mut self, id: ShapeId, x: f64, y: f64) -> DiagramResult<Point> {
        let shape = self
            .shapes
            .get_mut(&id)
            .ok_or(DiagramError::ShapeNotFound(id))?;
        shape.set_position(Point::new(x, y));
        Ok(shape.center())
    }

    /// Remove a shape.
    pub fn remove(&mut self, id: ShapeId) -> Option<Shape> {
        self.order.retain(|&shape_id| shape_id != id);
        self.shapes.remove(&id)
    }

    pub fn get(&self, id: ShapeId) -> Option<&Shape> {
        self.shapes.get(&id)
    }

    /// Shapes in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Shape> {
        self.order.iter().filter_map(|id| self.shapes.get(id))
    }

    /// Topmost (last placed) shape whose outline contains `point`.
    pub fn shape_at(&self, point: Point) -> Option<&Shape> {
        self.order
            .iter()
            .rev()
            .filter_map(|id| self.shapes.get(id))
            .find(|s| s.hit_test(point, 0.0))
    }

    pub fn shape_size(&self) -> f64 {
        self.shape_size
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }
}
