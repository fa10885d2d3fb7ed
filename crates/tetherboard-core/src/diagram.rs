//! Diagram: the shape and line registries plus the attachment engine behind one surface.

use crate::attachment::{AttachmentEngine, DraftLine};
use crate::config::DiagramConfig;
use crate::registry::{LineRegistry, ShapeRegistry};
use crate::shapes::{EndpointKind, EndpointRef, Line, LineId, Shape, ShapeId, ShapeKind};
use kurbo::Point;

/// A diagram of shapes connected by lines.
///
/// Every operation is total: stale ids and misses produce `None`/`false`
/// and leave the diagram untouched.
#[derive(Debug, Clone)]
pub struct Diagram {
    shapes: ShapeRegistry,
    lines: LineRegistry,
    engine: AttachmentEngine,
    config: DiagramConfig,
}

impl Default for Diagram {
    fn default() -> Self {
        Self::new()
    }
}

impl Diagram {
    /// Create an empty diagram with default tunables.
    pub fn new() -> Self {
        Self::with_config(DiagramConfig::default())
    }

    /// Create an empty diagram. `config` is expected to be validated by the caller.
    pub fn with_config(config: DiagramConfig) -> Self {
        Self {
            shapes: ShapeRegistry::with_shape_size(config.shape_size),
            lines: LineRegistry::new(),
            engine: AttachmentEngine::new(config.radii),
            config,
        }
    }

    pub fn config(&self) -> &DiagramConfig {
        &self.config
    }

    /// Place a shape with its bounding box origin at `point`.
    pub fn place_shape(&mut self, point: Point, kind: ShapeKind) -> ShapeId {
        let id = self.shapes.place(point, kind);
        log::debug!("Placed {:?} {} at ({}, {})", kind, id, point.x, point.y);
        id
    }

    /// Move a shape's origin to `point` and drag bound endpoints along.
    pub fn move_shape(&mut self, shape: ShapeId, point: Point) -> bool {
        match self.shapes.reposition(shape, point.x, point.y) {
            Ok(_) => {
                self.engine.propagate(shape, &self.shapes, &mut self.lines);
                true
            }
            Err(e) => {
                log::debug!("Move ignored: {}", e);
                false
            }
        }
    }

    /// Remove a shape. Endpoints bound to it become free where they are.
    pub fn remove_shape(&mut self, shape: ShapeId) -> Option<Shape> {
        let removed = self.shapes.remove(shape)?;
        let detached = self.lines.detach_all(shape);
        log::debug!("Removed shape {} ({} endpoint(s) detached)", shape, detached);
        Some(removed)
    }

    /// Remove a line.
    pub fn remove_line(&mut self, line: LineId) -> Option<Line> {
        self.engine.forget_line(line);
        self.lines.remove(line)
    }

    pub fn begin_line(&mut self, point: Point) {
        self.engine.begin_draft(point);
    }

    pub fn extend_line(&mut self, point: Point) {
        self.engine.update_draft(point);
    }

    pub fn commit_line(&mut self) -> Option<LineId> {
        self.engine.commit_draft(&self.shapes, &mut self.lines)
    }

    pub fn cancel_line(&mut self) {
        self.engine.cancel_draft();
    }

    /// Grab the endpoint of `line` under `point`. Returns whether one was hit.
    pub fn begin_endpoint_drag(&mut self, point: Point, line: LineId) -> bool {
        self.engine.pick_up(point, line, &self.lines)
    }

    pub fn drag_endpoint(&mut self, point: Point) {
        self.engine.drag(point, &mut self.lines);
    }

    /// Finish an endpoint drag. Returns the shape the endpoint bound to, if any.
    pub fn release_endpoint_drag(&mut self) -> Option<ShapeId> {
        self.engine.release(&self.shapes, &mut self.lines)
    }

    /// Drop the grabbed endpoint where it is, without re-attaching it.
    pub fn cancel_endpoint_drag(&mut self) {
        self.engine.cancel_drag();
    }

    /// Detach the endpoint of `line` clicked at `point`.
    pub fn click_on_line(&mut self, point: Point, line: LineId) -> Option<EndpointKind> {
        self.engine.detach(point, line, &mut self.lines)
    }

    pub fn hover_line(&mut self, point: Point, line: LineId) -> Option<EndpointRef> {
        self.engine.hover(point, line, &self.lines)
    }

    pub fn clear_hover(&mut self) {
        self.engine.clear_hover();
    }

    /// Abandon any draft, drag or hover in progress.
    pub fn reset_gestures(&mut self) {
        self.engine.reset();
    }

    /// Shapes in placement order.
    pub fn shapes(&self) -> impl Iterator<Item = &Shape> {
        self.shapes.iter()
    }

    /// Lines in creation order.
    pub fn lines(&self) -> impl Iterator<Item = &Line> {
        self.lines.iter()
    }

    pub fn shape(&self, id: ShapeId) -> Option<&Shape> {
        self.shapes.get(id)
    }

    pub fn line(&self, id: LineId) -> Option<&Line> {
        self.lines.get(id)
    }

    pub fn current_draft(&self) -> Option<DraftLine> {
        self.engine.draft()
    }

    pub fn current_hover(&self) -> Option<EndpointRef> {
        self.engine.hovered()
    }

    pub fn current_drag(&self) -> Option<EndpointRef> {
        self.engine.dragged()
    }

    /// Topmost shape containing `point`.
    pub fn shape_at(&self, point: Point) -> Option<&Shape> {
        self.shapes.shape_at(point)
    }

    /// Topmost line passing within the configured tolerance of `point`.
    pub fn line_at(&self, point: Point) -> Option<&Line> {
        self.lines.line_at(point, self.config.line_hit_tolerance)
    }
}
