//! Tunables for placement and attachment.

use crate::error::ConfigError;
use crate::shapes::DEFAULT_SHAPE_SIZE;
use serde::{Deserialize, Serialize};

/// Distance at which a pointer grabs or hovers a line endpoint.
pub const HIT_RADIUS: f64 = 10.0;
/// Distance at which a released endpoint re-attaches to a shape center.
pub const REATTACH_RADIUS: f64 = 20.0;
/// Distance at which a freshly drawn line attaches to a shape center.
pub const CAPTURE_RADIUS: f64 = 50.0;
/// Distance from a line body at which the pointer counts as "on the line".
pub const LINE_HIT_TOLERANCE: f64 = 5.0;

/// The three capture tiers, smallest first.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CaptureRadii {
    /// Grabbing, clicking or hovering an endpoint.
    pub hit: f64,
    /// Re-attaching a dragged endpoint on release.
    pub reattach: f64,
    /// Attaching the endpoints of a newly committed line.
    pub capture: f64,
}

impl Default for CaptureRadii {
    fn default() -> Self {
        Self {
            hit: HIT_RADIUS,
            reattach: REATTACH_RADIUS,
            capture: CAPTURE_RADIUS,
        }
    }
}

impl CaptureRadii {
    /// Check `0 < hit < reattach < capture`.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.hit > 0.0 && self.hit < self.reattach && self.reattach < self.capture {
            Ok(())
        } else {
            Err(ConfigError::RadiusOrder {
                hit: self.hit,
                reattach: self.reattach,
                capture: self.capture,
            })
        }
    }
}

/// Diagram configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiagramConfig {
    /// Edge length of newly placed shapes.
    pub shape_size: f64,
    pub radii: CaptureRadii,
    /// Pointer distance from a line body that still hits the line.
    pub line_hit_tolerance: f64,
}

impl Default for DiagramConfig {
    fn default() -> Self {
        Self {
            shape_size: DEFAULT_SHAPE_SIZE,
            radii: CaptureRadii::default(),
            line_hit_tolerance: LINE_HIT_TOLERANCE,
        }
    }
}

impl DiagramConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.shape_size > 0.0) {
            return Err(ConfigError::ShapeSize(self.shape_size));
        }
        if !(self.line_hit_tolerance >= 0.0) {
            return Err(ConfigError::LineTolerance(self.line_hit_tolerance));
        }
        self.radii.validate()
    }
}
