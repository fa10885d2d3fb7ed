//! Tetherboard Core Library
//!
//! Shapes, connector lines, and the rules that bind line endpoints to shapes,
//! independent of any rendering or windowing layer.

pub mod attachment;
pub mod canvas;
pub mod config;
pub mod diagram;
pub mod error;
pub mod input;
pub mod proximity;
pub mod registry;
pub mod shapes;
pub mod tools;

pub use attachment::{AttachmentEngine, DraftLine};
pub use canvas::{Canvas, CanvasEvent};
pub use config::{CaptureRadii, DiagramConfig};
pub use diagram::Diagram;
pub use error::{ConfigError, DiagramError};
pub use input::PointerEvent;
pub use registry::{LineRegistry, ShapeRegistry};
pub use shapes::{
    Attachment, Endpoint, EndpointKind, EndpointRef, Line, LineId, Shape, ShapeId, ShapeKind,
};
pub use tools::ToolKind;
