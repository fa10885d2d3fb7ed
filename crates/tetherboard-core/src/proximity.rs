//! Proximity queries: which shape a point attaches to, which endpoint a pointer grabs.
//!
//! All queries measure distance to shape *centers*. Creation-time and
//! release-time attachment share this single policy and differ only in radius.

use crate::shapes::{EndpointKind, Line, Shape};
use kurbo::Point;

/// Shape whose center is closest to `point`, among those within `radius` (inclusive).
///
/// Exact ties go to the first shape in iteration order.
pub fn nearest_within<'a, I>(point: Point, shapes: I, radius: f64) -> Option<&'a Shape>
where
    I: IntoIterator<Item = &'a Shape>,
{
    let mut nearest: Option<(&Shape, f64)> = None;
    for shape in shapes {
        let dist = point.distance(shape.center());
        // Also rejects NaN distances.
        if !(dist <= radius) {
            continue;
        }
        // Strict comparison keeps the earlier shape on ties.
        if nearest.is_none_or(|(_, best)| dist < best) {
            nearest = Some((shape, dist));
        }
    }
    nearest.map(|(shape, _)| shape)
}

/// Attachment target for a freshly committed line endpoint.
///
/// Same center-distance test as [`nearest_within`], so a line drawn onto a
/// shape binds exactly where a dragged tip released at that spot would.
pub fn containing_or_near<'a, I>(point: Point, shapes: I, radius: f64) -> Option<&'a Shape>
where
    I: IntoIterator<Item = &'a Shape>,
{
    nearest_within(point, shapes, radius)
}

/// Endpoint of `line` within `radius` of `point`. Start wins if both qualify.
pub fn endpoint_hit(line: &Line, point: Point, radius: f64) -> Option<EndpointKind> {
    [EndpointKind::Start, EndpointKind::End]
        .into_iter()
        .find(|&which| point.distance(line.endpoint(which).position) <= radius)
}
