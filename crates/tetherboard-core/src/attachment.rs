//! Attachment engine: line drafting, endpoint binding, and shape-move propagation.
//!
//! The engine owns only transient gesture state (draft, dragged endpoint,
//! hover). Shapes and lines live in the registries, which are passed into
//! each operation.

use crate::config::CaptureRadii;
use crate::proximity::{containing_or_near, endpoint_hit, nearest_within};
use crate::registry::{LineRegistry, ShapeRegistry};
use crate::shapes::{Endpoint, EndpointKind, EndpointRef, Line, LineId, ShapeId};
use kurbo::Point;
use serde::{Deserialize, Serialize};

/// A line being sketched, not yet in the registry.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DraftLine {
    /// Fixed at pointer-down.
    pub start: Point,
    /// Follows the pointer.
    pub end: Point,
}

impl DraftLine {
    /// Raw `(x0, y0, x1, y1)` coordinates.
    pub fn coords(&self) -> (f64, f64, f64, f64) {
        (self.start.x, self.start.y, self.end.x, self.end.y)
    }
}

/// Gesture state for attaching and detaching line endpoints.
#[derive(Debug, Clone, Default)]
pub struct AttachmentEngine {
    radii: CaptureRadii,
    draft: Option<DraftLine>,
    dragged: Option<EndpointRef>,
    hovered: Option<EndpointRef>,
}

impl AttachmentEngine {
    pub fn new(radii: CaptureRadii) -> Self {
        Self {
            radii,
            ..Self::default()
        }
    }

    pub fn radii(&self) -> CaptureRadii {
        self.radii
    }

    // --- Drafting ---

    /// Start a draft with both points at `point`.
    pub fn begin_draft(&mut self, point: Point) {
        self.draft = Some(DraftLine {
            start: point,
            end: point,
        });
    }

    /// Move the draft's free end. No-op when not drafting.
    pub fn update_draft(&mut self, point: Point) {
        if let Some(draft) = &mut self.draft {
            draft.end = point;
        }
    }

    /// Turn the draft into a registered line, binding each end to a nearby shape.
    pub fn commit_draft(
        &mut self,
        shapes: &ShapeRegistry,
        lines: &mut LineRegistry,
    ) -> Option<LineId> {
        let draft = self.draft.take()?;
        let resolve = |point: Point| match containing_or_near(point, shapes.iter(), self.radii.capture) {
            Some(shape) => Endpoint::bound(shape.id(), shape.center()),
            None => Endpoint::free(point),
        };
        let line = Line::new(resolve(draft.start), resolve(draft.end));
        log::debug!(
            "Committed line {} (start: {:?}, end: {:?})",
            line.id(),
            line.start.attachment,
            line.end.attachment
        );
        Some(lines.insert(line))
    }

    /// Drop the draft without creating a line.
    pub fn cancel_draft(&mut self) {
        self.draft = None;
    }

    pub fn draft(&self) -> Option<DraftLine> {
        self.draft
    }

    pub fn is_drafting(&self) -> bool {
        self.draft.is_some()
    }

    // --- Endpoint dragging ---

    /// Grab the endpoint of `line` under `point`. Returns whether one was hit.
    pub fn pick_up(&mut self, point: Point, line: LineId, lines: &LineRegistry) -> bool {
        let Some(target) = lines.get(line) else {
            log::debug!("Ignoring pick-up on missing line {}", line);
            return false;
        };
        match endpoint_hit(target, point, self.radii.hit) {
            Some(which) => {
                self.dragged = Some(EndpointRef::new(line, which));
                true
            }
            None => false,
        }
    }

    /// Move the grabbed endpoint to `point` if it is free.
    ///
    /// Bound endpoints only ever follow their shape.
    pub fn drag(&mut self, point: Point, lines: &mut LineRegistry) {
        let Some(dragged) = self.dragged else { return };
        match lines.get_mut(dragged.line) {
            Ok(line) => {
                let ep = line.endpoint_mut(dragged.which);
                if ep.is_free() {
                    ep.position = point;
                }
            }
            Err(e) => log::debug!("Endpoint drag ignored: {}", e),
        }
    }

    /// Finish an endpoint drag, re-attaching to a shape within the reattach radius.
    ///
    /// Returns the shape bound to, if any. The drag selector is always cleared.
    pub fn release(&mut self, shapes: &ShapeRegistry, lines: &mut LineRegistry) -> Option<ShapeId> {
        let dragged = self.dragged.take()?;
        let line = match lines.get_mut(dragged.line) {
            Ok(line) => line,
            Err(e) => {
                log::debug!("Endpoint release ignored: {}", e);
                return None;
            }
        };
        let ep = line.endpoint_mut(dragged.which);
        let shape = nearest_within(ep.position, shapes.iter(), self.radii.reattach)?;
        ep.bind(shape.id(), shape.center());
        log::debug!(
            "Bound {:?} of line {} to shape {}",
            dragged.which,
            dragged.line,
            shape.id()
        );
        Some(shape.id())
    }

    /// Drop the dragged endpoint without the reattach step.
    pub fn cancel_drag(&mut self) -> Option<EndpointRef> {
        self.dragged.take()
    }

    pub fn dragged(&self) -> Option<EndpointRef> {
        self.dragged
    }

    // --- Detach and hover ---

    /// Free the endpoint of `line` clicked at `point`, relocating it to the click.
    pub fn detach(&mut self, point: Point, line: LineId, lines: &mut LineRegistry) -> Option<EndpointKind> {
        let target = match lines.get_mut(line) {
            Ok(target) => target,
            Err(e) => {
                log::debug!("Detach ignored: {}", e);
                return None;
            }
        };
        let which = endpoint_hit(target, point, self.radii.hit)?;
        let ep = target.endpoint_mut(which);
        if let Some(shape) = ep.bound_shape() {
            log::debug!("Detached {:?} of line {} from shape {}", which, line, shape);
        }
        ep.release(point);
        Some(which)
    }

    /// Update hover for the pointer over `line`.
    pub fn hover(&mut self, point: Point, line: LineId, lines: &LineRegistry) -> Option<EndpointRef> {
        self.hovered = lines
            .get(line)
            .and_then(|l| endpoint_hit(l, point, self.radii.hit))
            .map(|which| EndpointRef::new(line, which));
        self.hovered
    }

    pub fn clear_hover(&mut self) {
        self.hovered = None;
    }

    pub fn hovered(&self) -> Option<EndpointRef> {
        self.hovered
    }

    // --- Propagation ---

    /// Glue every endpoint bound to `shape` to its current center.
    pub fn propagate(&self, shape: ShapeId, shapes: &ShapeRegistry, lines: &mut LineRegistry) -> usize {
        let Some(center) = shapes.get(shape).map(|s| s.center()) else {
            return 0;
        };
        let moved = lines.sync_bound(shape, center);
        log::trace!("Shape {} moved {} bound endpoint(s)", shape, moved);
        moved
    }

    /// Forget gesture state that refers to `line`.
    pub(crate) fn forget_line(&mut self, line: LineId) {
        if self.dragged.is_some_and(|d| d.line == line) {
            self.dragged = None;
        }
        if self.hovered.is_some_and(|h| h.line == line) {
            self.hovered = None;
        }
    }

    /// Drop all transient state.
    pub fn reset(&mut self) {
        self.draft = None;
        self.dragged = None;
        self.hovered = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shapes::{Attachment, ShapeKind};

    fn setup() -> (AttachmentEngine, ShapeRegistry, LineRegistry) {
        (
            AttachmentEngine::new(CaptureRadii::default()),
            ShapeRegistry::new(),
            LineRegistry::new(),
        )
    }

    fn draw(
        engine: &mut AttachmentEngine,
        shapes: &ShapeRegistry,
        lines: &mut LineRegistry,
        from: Point,
        to: Point,
    ) -> LineId {
        engine.begin_draft(from);
        engine.update_draft(to);
        engine.commit_draft(shapes, lines).unwrap()
    }

    #[test]
    fn test_draft_lifecycle() {
        let (mut engine, shapes, mut lines) = setup();
        assert!(engine.draft().is_none());

        engine.begin_draft(Point::new(10.0, 20.0));
        assert_eq!(engine.draft().unwrap().coords(), (10.0, 20.0, 10.0, 20.0));

        engine.update_draft(Point::new(30.0, 40.0));
        engine.update_draft(Point::new(50.0, 60.0));
        assert_eq!(engine.draft().unwrap().coords(), (10.0, 20.0, 50.0, 60.0));

        assert!(engine.commit_draft(&shapes, &mut lines).is_some());
        assert!(engine.draft().is_none());
        assert!(engine.commit_draft(&shapes, &mut lines).is_none());
        assert_eq!(lines.len(), 1);
    }

    #[test]
    fn test_update_without_draft() {
        let (mut engine, _, _) = setup();
        engine.update_draft(Point::new(1.0, 1.0));
        assert!(!engine.is_drafting());
    }

    #[test]
    fn test_commit_far_from_shapes_is_free() {
        let (mut engine, mut shapes, mut lines) = setup();
        shapes.place(Point::new(0.0, 0.0), ShapeKind::Rectangle);

        let id = draw(
            &mut engine,
            &shapes,
            &mut lines,
            Point::new(300.0, 300.0),
            Point::new(500.0, 100.0),
        );
        let line = lines.get(id).unwrap();
        assert_eq!(line.start, Endpoint::free(Point::new(300.0, 300.0)));
        assert_eq!(line.end, Endpoint::free(Point::new(500.0, 100.0)));
    }

    #[test]
    fn test_commit_nan_point_stays_free() {
        let (mut engine, mut shapes, mut lines) = setup();
        shapes.place(Point::new(0.0, 0.0), ShapeKind::Rectangle);

        let id = draw(
            &mut engine,
            &shapes,
            &mut lines,
            Point::new(f64::NAN, f64::NAN),
            Point::new(500.0, 500.0),
        );
        let line = lines.get(id).unwrap();
        assert!(line.start.is_free());
        assert!(line.start.position.x.is_nan());
        assert_eq!(line.end, Endpoint::free(Point::new(500.0, 500.0)));
    }

    #[test]
    fn test_commit_binds_within_capture_radius() {
        let (mut engine, mut shapes, mut lines) = setup();
        let rect = shapes.place(Point::new(100.0, 100.0), ShapeKind::Rectangle);

        let id = draw(
            &mut engine,
            &shapes,
            &mut lines,
            Point::new(100.0, 100.0),
            Point::new(300.0, 300.0),
        );
        let line = lines.get(id).unwrap();
        assert_eq!(line.start.attachment, Attachment::Bound(rect));
        assert_eq!(line.start.position, Point::new(125.0, 125.0));
        assert!(line.end.is_free());
        assert_eq!(line.end.position, Point::new(300.0, 300.0));
    }

    #[test]
    fn test_commit_both_ends_bound() {
        let (mut engine, mut shapes, mut lines) = setup();
        let a = shapes.place(Point::new(0.0, 0.0), ShapeKind::Rectangle);
        let b = shapes.place(Point::new(200.0, 0.0), ShapeKind::HEXAGON);

        let id = draw(
            &mut engine,
            &shapes,
            &mut lines,
            Point::new(40.0, 40.0),
            Point::new(210.0, 10.0),
        );
        let line = lines.get(id).unwrap();
        assert_eq!(line.start.bound_shape(), Some(a));
        assert_eq!(line.end.bound_shape(), Some(b));
        assert_eq!(line.end.position, Point::new(225.0, 25.0));
    }

    #[test]
    fn test_pick_up_requires_hit() {
        let (mut engine, shapes, mut lines) = setup();
        let id = draw(
            &mut engine,
            &shapes,
            &mut lines,
            Point::new(0.0, 0.0),
            Point::new(100.0, 0.0),
        );

        assert!(!engine.pick_up(Point::new(50.0, 0.0), id, &lines));
        assert!(engine.dragged().is_none());

        assert!(engine.pick_up(Point::new(98.0, 2.0), id, &lines));
        assert_eq!(engine.dragged(), Some(EndpointRef::new(id, EndpointKind::End)));
        // Picking up does not move anything.
        assert_eq!(lines.get(id).unwrap().end.position, Point::new(100.0, 0.0));

        assert!(!engine.pick_up(Point::new(0.0, 0.0), LineId::new(), &lines));
    }

    #[test]
    fn test_drag_free_endpoint() {
        let (mut engine, shapes, mut lines) = setup();
        let id = draw(
            &mut engine,
            &shapes,
            &mut lines,
            Point::new(0.0, 0.0),
            Point::new(100.0, 0.0),
        );

        assert!(engine.pick_up(Point::new(0.0, 0.0), id, &lines));
        engine.drag(Point::new(10.0, 10.0), &mut lines);
        engine.drag(Point::new(20.0, 30.0), &mut lines);
        assert_eq!(lines.get(id).unwrap().start.position, Point::new(20.0, 30.0));
        assert_eq!(lines.get(id).unwrap().end.position, Point::new(100.0, 0.0));
    }

    #[test]
    fn test_drag_bound_endpoint_is_ignored() {
        let (mut engine, mut shapes, mut lines) = setup();
        let rect = shapes.place(Point::new(0.0, 0.0), ShapeKind::Rectangle);
        let id = draw(
            &mut engine,
            &shapes,
            &mut lines,
            Point::new(25.0, 25.0),
            Point::new(300.0, 0.0),
        );

        assert!(engine.pick_up(Point::new(25.0, 25.0), id, &lines));
        engine.drag(Point::new(200.0, 200.0), &mut lines);
        let line = lines.get(id).unwrap();
        assert_eq!(line.start.bound_shape(), Some(rect));
        assert_eq!(line.start.position, Point::new(25.0, 25.0));
    }

    #[test]
    fn test_release_within_reattach_radius_binds() {
        let (mut engine, mut shapes, mut lines) = setup();
        let id = draw(
            &mut engine,
            &shapes,
            &mut lines,
            Point::new(0.0, 0.0),
            Point::new(100.0, 0.0),
        );
        let rect = shapes.place(Point::new(300.0, 300.0), ShapeKind::Rectangle);

        assert!(engine.pick_up(Point::new(100.0, 0.0), id, &lines));
        engine.drag(Point::new(330.0, 340.0), &mut lines);
        assert_eq!(engine.release(&shapes, &mut lines), Some(rect));

        let line = lines.get(id).unwrap();
        assert_eq!(line.end.attachment, Attachment::Bound(rect));
        assert_eq!(line.end.position, Point::new(325.0, 325.0));
        assert!(engine.dragged().is_none());
    }

    #[test]
    fn test_release_beyond_reattach_radius_stays_free() {
        let (mut engine, mut shapes, mut lines) = setup();
        let id = draw(
            &mut engine,
            &shapes,
            &mut lines,
            Point::new(0.0, 0.0),
            Point::new(100.0, 0.0),
        );
        shapes.place(Point::new(300.0, 300.0), ShapeKind::Rectangle);

        assert!(engine.pick_up(Point::new(100.0, 0.0), id, &lines));
        // 21 units from the center (325, 325): inside the capture radius, outside reattach.
        engine.drag(Point::new(346.0, 325.0), &mut lines);
        assert_eq!(engine.release(&shapes, &mut lines), None);

        let line = lines.get(id).unwrap();
        assert!(line.end.is_free());
        assert_eq!(line.end.position, Point::new(346.0, 325.0));
        assert!(engine.dragged().is_none());

        // Releasing again is a no-op.
        assert_eq!(engine.release(&shapes, &mut lines), None);
        assert_eq!(lines.get(id).unwrap().end.position, Point::new(346.0, 325.0));
    }

    #[test]
    fn test_cancel_drag_skips_reattach() {
        let (mut engine, mut shapes, mut lines) = setup();
        let id = draw(
            &mut engine,
            &shapes,
            &mut lines,
            Point::new(140.0, 125.0),
            Point::new(400.0, 400.0),
        );
        shapes.place(Point::new(100.0, 100.0), ShapeKind::Rectangle);

        assert!(engine.pick_up(Point::new(140.0, 125.0), id, &lines));
        assert_eq!(engine.cancel_drag(), Some(EndpointRef::new(id, EndpointKind::Start)));
        assert!(engine.dragged().is_none());
        assert_eq!(engine.release(&shapes, &mut lines), None);
        assert_eq!(lines.get(id).unwrap().start, Endpoint::free(Point::new(140.0, 125.0)));
    }

    #[test]
    fn test_detach_bound_endpoint() {
        let (mut engine, mut shapes, mut lines) = setup();
        let rect = shapes.place(Point::new(0.0, 0.0), ShapeKind::Rectangle);
        let id = draw(
            &mut engine,
            &shapes,
            &mut lines,
            Point::new(25.0, 25.0),
            Point::new(300.0, 0.0),
        );

        assert_eq!(engine.detach(Point::new(28.0, 21.0), id, &mut lines), Some(EndpointKind::Start));
        let line = lines.get(id).unwrap();
        assert_eq!(line.start, Endpoint::free(Point::new(28.0, 21.0)));

        // The former shape no longer drags it along.
        shapes.reposition(rect, 100.0, 100.0).unwrap();
        assert_eq!(engine.propagate(rect, &shapes, &mut lines), 0);
        assert_eq!(lines.get(id).unwrap().start.position, Point::new(28.0, 21.0));
    }

    #[test]
    fn test_detach_on_line_body_is_noop() {
        let (mut engine, shapes, mut lines) = setup();
        let id = draw(
            &mut engine,
            &shapes,
            &mut lines,
            Point::new(0.0, 0.0),
            Point::new(100.0, 0.0),
        );
        assert_eq!(engine.detach(Point::new(50.0, 0.0), id, &mut lines), None);
        assert_eq!(lines.get(id).unwrap().points(), [Point::new(0.0, 0.0), Point::new(100.0, 0.0)]);
    }

    #[test]
    fn test_hover() {
        let (mut engine, shapes, mut lines) = setup();
        let id = draw(
            &mut engine,
            &shapes,
            &mut lines,
            Point::new(0.0, 0.0),
            Point::new(100.0, 0.0),
        );

        assert_eq!(
            engine.hover(Point::new(95.0, 0.0), id, &lines),
            Some(EndpointRef::new(id, EndpointKind::End))
        );
        assert_eq!(engine.hovered(), Some(EndpointRef::new(id, EndpointKind::End)));

        assert_eq!(engine.hover(Point::new(50.0, 0.0), id, &lines), None);
        assert!(engine.hovered().is_none());

        engine.hover(Point::new(1.0, 1.0), id, &lines);
        assert!(engine.hovered().is_some());
        engine.clear_hover();
        assert!(engine.hovered().is_none());
    }

    #[test]
    fn test_propagate() {
        let (mut engine, mut shapes, mut lines) = setup();
        let a = shapes.place(Point::new(0.0, 0.0), ShapeKind::Rectangle);
        let bound = draw(
            &mut engine,
            &shapes,
            &mut lines,
            Point::new(25.0, 25.0),
            Point::new(400.0, 400.0),
        );
        let free = draw(
            &mut engine,
            &shapes,
            &mut lines,
            Point::new(200.0, 0.0),
            Point::new(400.0, 0.0),
        );

        shapes.reposition(a, 50.0, 60.0).unwrap();
        assert_eq!(engine.propagate(a, &shapes, &mut lines), 1);
        assert_eq!(lines.get(bound).unwrap().start.position, Point::new(75.0, 85.0));
        assert_eq!(
            lines.get(free).unwrap().points(),
            [Point::new(200.0, 0.0), Point::new(400.0, 0.0)]
        );

        assert_eq!(engine.propagate(ShapeId::new(), &shapes, &mut lines), 0);
    }
}
