//! Shape definitions for the diagram.

mod line;
mod polygon;

pub use line::{Attachment, Endpoint, EndpointKind, EndpointRef, Line, LineId};
pub use polygon::regular_polygon_offsets;

use kurbo::{BezPath, Point, Rect, Shape as KurboShape, Vec2};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Default edge length of newly placed shapes.
pub const DEFAULT_SHAPE_SIZE: f64 = 50.0;

/// Unique identifier for shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ShapeId(pub Uuid);

impl ShapeId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ShapeId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ShapeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Geometric kind of a placed shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ShapeKind {
    Rectangle,
    /// Regular polygon with the given number of sides.
    Polygon { sides: u8 },
}

impl ShapeKind {
    pub const PENTAGON: ShapeKind = ShapeKind::Polygon { sides: 5 };
    pub const HEXAGON: ShapeKind = ShapeKind::Polygon { sides: 6 };
}

/// A placed shape with a square bounding box.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Shape {
    pub(crate) id: ShapeId,
    /// Geometric kind.
    pub kind: ShapeKind,
    /// Top-left corner of the bounding box.
    pub position: Point,
    /// Width of the bounding box.
    pub width: f64,
    /// Height of the bounding box (equal to width for current kinds).
    pub height: f64,
    /// Polygon vertices relative to the center, fixed at creation.
    /// Empty for rectangles.
    #[serde(default)]
    vertices: Vec<Vec2>,
}

impl Shape {
    /// Create a shape of edge length `size` with its bounding box origin at `position`.
    pub fn new(kind: ShapeKind, position: Point, size: f64) -> Self {
        let vertices = match kind {
            ShapeKind::Rectangle => Vec::new(),
            ShapeKind::Polygon { sides } => regular_polygon_offsets(sides, size / 2.0),
        };
        Self {
            id: ShapeId::new(),
            kind,
            position,
            width: size,
            height: size,
            vertices,
        }
    }

    pub fn id(&self) -> ShapeId {
        self.id
    }

    /// Center of the bounding box.
    pub fn center(&self) -> Point {
        Point::new(
            self.position.x + self.width / 2.0,
            self.position.y + self.height / 2.0,
        )
    }

    /// Bounding box in canvas coordinates.
    pub fn bounds(&self) -> Rect {
        Rect::new(
            self.position.x,
            self.position.y,
            self.position.x + self.width,
            self.position.y + self.height,
        )
    }

    /// Polygon vertex offsets relative to the center.
    pub fn vertex_offsets(&self) -> &[Vec2] {
        &self.vertices
    }

    /// Outline vertices in canvas coordinates.
    pub fn outline(&self) -> Vec<Point> {
        match self.kind {
            ShapeKind::Rectangle => {
                let b = self.bounds();
                vec![
                    Point::new(b.x0, b.y0),
                    Point::new(b.x1, b.y0),
                    Point::new(b.x1, b.y1),
                    Point::new(b.x0, b.y1),
                ]
            }
            ShapeKind::Polygon { .. } => {
                let center = self.center();
                self.vertices.iter().map(|&v| center + v).collect()
            }
        }
    }

    /// Closed outline path for renderers.
    pub fn to_path(&self) -> BezPath {
        let mut path = BezPath::new();
        let outline = self.outline();
        let Some((&first, rest)) = outline.split_first() else {
            return path;
        };
        path.move_to(first);
        for &p in rest {
            path.line_to(p);
        }
        path.close_path();
        path
    }

    /// Check if a point lies inside the shape's outline (grown by `tolerance` for rectangles).
    pub fn hit_test(&self, point: Point, tolerance: f64) -> bool {
        match self.kind {
            ShapeKind::Rectangle => self.bounds().inflate(tolerance, tolerance).contains(point),
            ShapeKind::Polygon { .. } => {
                self.to_path().contains(point)
                    || (tolerance > 0.0
                        && point_to_polyline_dist(point, &self.closed_outline()) <= tolerance)
            }
        }
    }

    /// Move the bounding box origin, which moves the center with it.
    pub fn set_position(&mut self, position: Point) {
        self.position = position;
    }

    fn closed_outline(&self) -> Vec<Point> {
        let mut pts = self.outline();
        if let Some(&first) = pts.first() {
            pts.push(first);
        }
        pts
    }
}

/// Distance from a point to a line segment (a→b).
pub fn point_to_segment_dist(point: Point, a: Point, b: Point) -> f64 {
    let seg = b - a;
    let pv = point - a;
    let len_sq = seg.hypot2();
    if len_sq < f64::EPSILON {
        return pv.hypot();
    }
    let t = (pv.dot(seg) / len_sq).clamp(0.0, 1.0);
    let proj = a + seg * t;
    point.distance(proj)
}

/// Minimum distance from a point to a polyline (sequence of connected segments).
pub fn point_to_polyline_dist(point: Point, points: &[Point]) -> f64 {
    points
        .windows(2)
        .map(|w| point_to_segment_dist(point, w[0], w[1]))
        .fold(f64::INFINITY, f64::min)
}
