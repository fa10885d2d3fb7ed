//! Connector line with optionally bound endpoints.

use super::ShapeId;
use kurbo::Point;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Unique identifier for lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct LineId(pub Uuid);

impl LineId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for LineId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for LineId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Which end of a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EndpointKind {
    Start,
    End,
}

impl EndpointKind {
    /// The opposite end.
    pub fn other(self) -> Self {
        match self {
            EndpointKind::Start => EndpointKind::End,
            EndpointKind::End => EndpointKind::Start,
        }
    }
}

/// Identifies one endpoint of one line (drag target, hover target).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EndpointRef {
    pub line: LineId,
    pub which: EndpointKind,
}

impl EndpointRef {
    pub fn new(line: LineId, which: EndpointKind) -> Self {
        Self { line, which }
    }
}

/// Binding state of an endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Attachment {
    /// Positioned by its own coordinate.
    #[default]
    Free,
    /// Mirrors the center of the referenced shape.
    Bound(ShapeId),
}

/// One tip of a line.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Endpoint {
    pub position: Point,
    pub attachment: Attachment,
}

impl Endpoint {
    pub fn free(position: Point) -> Self {
        Self {
            position,
            attachment: Attachment::Free,
        }
    }

    pub fn bound(shape: ShapeId, center: Point) -> Self {
        Self {
            position: center,
            attachment: Attachment::Bound(shape),
        }
    }

    pub fn is_free(&self) -> bool {
        self.attachment == Attachment::Free
    }

    /// The shape this endpoint is bound to, if any.
    pub fn bound_shape(&self) -> Option<ShapeId> {
        match self.attachment {
            Attachment::Bound(id) => Some(id),
            Attachment::Free => None,
        }
    }

    /// Detach and pin to `position`.
    pub fn release(&mut self, position: Point) {
        self.position = position;
        self.attachment = Attachment::Free;
    }

    /// Bind to a shape, snapping to its center.
    pub fn bind(&mut self, shape: ShapeId, center: Point) {
        self.position = center;
        self.attachment = Attachment::Bound(shape);
    }
}

/// A straight connector between two endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Line {
    pub(crate) id: LineId,
    /// Start endpoint.
    pub start: Endpoint,
    /// End endpoint.
    pub end: Endpoint,
}

impl Line {
    /// Create a new line with a fresh id.
    pub fn new(start: Endpoint, end: Endpoint) -> Self {
        Self {
            id: LineId::new(),
            start,
            end,
        }
    }

    pub fn id(&self) -> LineId {
        self.id
    }

    pub fn endpoint(&self, which: EndpointKind) -> &Endpoint {
        match which {
            EndpointKind::Start => &self.start,
            EndpointKind::End => &self.end,
        }
    }

    pub fn endpoint_mut(&mut self, which: EndpointKind) -> &mut Endpoint {
        match which {
            EndpointKind::Start => &mut self.start,
            EndpointKind::End => &mut self.end,
        }
    }

    /// Both endpoint coordinates, start first.
    pub fn points(&self) -> [Point; 2] {
        [self.start.position, self.end.position]
    }

    /// Whether either endpoint is bound to `shape`.
    pub fn is_bound_to(&self, shape: ShapeId) -> bool {
        self.start.bound_shape() == Some(shape) || self.end.bound_shape() == Some(shape)
    }

    /// Get the length of the line.
    pub fn length(&self) -> f64 {
        self.start.position.distance(self.end.position)
    }
}
