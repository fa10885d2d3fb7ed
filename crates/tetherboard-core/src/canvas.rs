//! Canvas: routes pointer events to the diagram according to the active tool.

use crate::config::DiagramConfig;
use crate::diagram::Diagram;
use crate::input::PointerEvent;
use crate::shapes::{EndpointKind, EndpointRef, LineId, ShapeId};
use crate::tools::ToolKind;
use kurbo::{Point, Vec2};

/// In-progress pointer gesture.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
enum Gesture {
    #[default]
    Idle,
    /// Line tool held down.
    Drafting,
    /// A shape follows the pointer, keeping the grab offset from its origin.
    MovingShape { shape: ShapeId, grab: Vec2 },
    /// A line endpoint was grabbed at `press`.
    MovingEndpoint { line: LineId, press: Point, moved: bool },
    /// Pointer is down with nothing grabbed.
    Pressed,
}

/// What a pointer event did to the diagram.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CanvasEvent {
    ShapePlaced(ShapeId),
    DraftStarted,
    LineCommitted(LineId),
    ShapeGrabbed(ShapeId),
    ShapeMoved(ShapeId),
    EndpointGrabbed(EndpointRef),
    /// An endpoint drag ended; `bound` is the shape it attached to.
    EndpointReleased { endpoint: EndpointRef, bound: Option<ShapeId> },
    /// A click on an endpoint freed it at the click point.
    EndpointDetached { line: LineId, which: EndpointKind },
    Hovered(Option<EndpointRef>),
}

/// Runtime editing state: a diagram plus the active tool and gesture.
#[derive(Debug, Clone, Default)]
pub struct Canvas {
    /// The diagram being edited.
    pub diagram: Diagram,
    tool: ToolKind,
    gesture: Gesture,
}

impl Canvas {
    /// Create a canvas with an empty diagram.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: DiagramConfig) -> Self {
        Self {
            diagram: Diagram::with_config(config),
            ..Self::default()
        }
    }

    pub fn tool(&self) -> ToolKind {
        self.tool
    }

    /// Switch tools, abandoning any gesture in progress.
    pub fn set_tool(&mut self, tool: ToolKind) {
        self.tool = tool;
        self.gesture = Gesture::Idle;
        self.diagram.reset_gestures();
    }

    /// Feed one pointer event.
    pub fn handle_pointer(&mut self, event: PointerEvent) -> Option<CanvasEvent> {
        match event {
            PointerEvent::Down { position } => self.pointer_down(position),
            PointerEvent::Move { position } => self.pointer_move(position),
            PointerEvent::Up { position } => self.pointer_up(position),
        }
    }

    fn pointer_down(&mut self, point: Point) -> Option<CanvasEvent> {
        // A new press supersedes anything left over from a lost Up.
        self.finish_gesture(point);

        if let Some(kind) = self.tool.shape_kind() {
            self.gesture = Gesture::Pressed;
            return Some(CanvasEvent::ShapePlaced(self.diagram.place_shape(point, kind)));
        }

        match self.tool {
            ToolKind::Line => {
                self.diagram.begin_line(point);
                self.gesture = Gesture::Drafting;
                Some(CanvasEvent::DraftStarted)
            }
            _ => self.select_down(point),
        }
    }

    fn select_down(&mut self, point: Point) -> Option<CanvasEvent> {
        self.diagram.clear_hover();

        if let Some(line) = self.diagram.line_at(point).map(|l| l.id()) {
            if self.diagram.begin_endpoint_drag(point, line) {
                self.gesture = Gesture::MovingEndpoint {
                    line,
                    press: point,
                    moved: false,
                };
                return self.diagram.current_drag().map(CanvasEvent::EndpointGrabbed);
            }
        }

        if let Some(shape) = self.diagram.shape_at(point) {
            let id = shape.id();
            self.gesture = Gesture::MovingShape {
                shape: id,
                grab: point - shape.position,
            };
            return Some(CanvasEvent::ShapeGrabbed(id));
        }

        self.gesture = Gesture::Pressed;
        None
    }

    fn pointer_move(&mut self, point: Point) -> Option<CanvasEvent> {
        match &mut self.gesture {
            Gesture::Drafting => {
                self.diagram.extend_line(point);
                None
            }
            Gesture::MovingShape { shape, grab } => {
                let (shape, origin) = (*shape, point - *grab);
                self.diagram
                    .move_shape(shape, origin)
                    .then_some(CanvasEvent::ShapeMoved(shape))
            }
            Gesture::MovingEndpoint { press, moved, .. } => {
                if point != *press {
                    *moved = true;
                }
                self.diagram.drag_endpoint(point);
                None
            }
            Gesture::Pressed => None,
            Gesture::Idle => {
                if self.tool != ToolKind::Select {
                    return None;
                }
                let previous = self.diagram.current_hover();
                let hovered = match self.diagram.line_at(point).map(|l| l.id()) {
                    Some(line) => self.diagram.hover_line(point, line),
                    None => {
                        self.diagram.clear_hover();
                        None
                    }
                };
                (hovered != previous).then_some(CanvasEvent::Hovered(hovered))
            }
        }
    }

    fn pointer_up(&mut self, point: Point) -> Option<CanvasEvent> {
        // An Up away from the press is a drag even without Move events.
        if let Gesture::MovingEndpoint { press, moved, .. } = &mut self.gesture {
            if point != *press {
                *moved = true;
                self.diagram.drag_endpoint(point);
            }
        }
        self.finish_gesture(point)
    }

    fn finish_gesture(&mut self, point: Point) -> Option<CanvasEvent> {
        match std::mem::take(&mut self.gesture) {
            Gesture::Drafting => self.diagram.commit_line().map(CanvasEvent::LineCommitted),
            Gesture::MovingEndpoint { line, press, moved } => {
                let endpoint = self.diagram.current_drag();
                if !moved && point == press {
                    // A press and release in place is a click: detach, never reattach.
                    self.diagram.cancel_endpoint_drag();
                    if let Some(which) = self.diagram.click_on_line(point, line) {
                        return Some(CanvasEvent::EndpointDetached { line, which });
                    }
                    return endpoint.map(|endpoint| CanvasEvent::EndpointReleased { endpoint, bound: None });
                }
                let bound = self.diagram.release_endpoint_drag();
                endpoint.map(|endpoint| CanvasEvent::EndpointReleased { endpoint, bound })
            }
            Gesture::MovingShape { .. } | Gesture::Pressed | Gesture::Idle => None,
        }
    }

    pub fn is_idle(&self) -> bool {
        self.gesture == Gesture::Idle
    }
}
