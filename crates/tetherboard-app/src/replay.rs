//! Scripted replay of tool changes and pointer events against a canvas.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt::Write as _;
use std::fs;
use std::path::Path;
use tetherboard_core::{
    Attachment, Canvas, CanvasEvent, ConfigError, DiagramConfig, Endpoint, PointerEvent, ShapeId,
    ToolKind,
};
use thiserror::Error;

/// Replay errors.
#[derive(Debug, Error)]
pub enum ReplayError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid script: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),
}

/// One scripted input.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Step {
    /// Toolbar selection.
    Tool(ToolKind),
    /// Pointer event in canvas coordinates.
    Pointer(PointerEvent),
    /// Delete the n-th placed shape (placement order).
    RemoveShape(usize),
}

/// A replay script.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Script {
    #[serde(default)]
    pub config: Option<DiagramConfig>,
    pub steps: Vec<Step>,
}

impl Script {
    pub fn from_json(json: &str) -> Result<Self, ReplayError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: &Path) -> Result<Self, ReplayError> {
        let json = fs::read_to_string(path)?;
        Self::from_json(&json)
    }
}

/// Run a script to completion and return the resulting canvas.
pub fn run(script: &Script) -> Result<Canvas, ReplayError> {
    let config = script.config.clone().unwrap_or_default();
    config.validate()?;
    let mut canvas = Canvas::with_config(config);

    for (index, step) in script.steps.iter().enumerate() {
        match step {
            Step::Tool(tool) => {
                log::debug!("step {}: tool {:?}", index, tool);
                canvas.set_tool(*tool);
            }
            Step::Pointer(event) => {
                if let Some(outcome) = canvas.handle_pointer(*event) {
                    log_outcome(index, &outcome);
                }
            }
            Step::RemoveShape(n) => {
                let id = canvas.diagram.shapes().nth(*n).map(|s| s.id());
                match id.and_then(|id| canvas.diagram.remove_shape(id)) {
                    Some(shape) => log::info!("step {}: removed shape {}", index, shape.id()),
                    None => log::warn!("step {}: no shape #{} to remove", index, n),
                }
            }
        }
    }
    Ok(canvas)
}

fn log_outcome(index: usize, outcome: &CanvasEvent) {
    match outcome {
        CanvasEvent::ShapePlaced(id) => log::info!("step {}: placed shape {}", index, id),
        CanvasEvent::LineCommitted(id) => log::info!("step {}: committed line {}", index, id),
        CanvasEvent::EndpointReleased {
            endpoint,
            bound: Some(shape),
        } => log::info!(
            "step {}: {:?} of line {} bound to shape {}",
            index,
            endpoint.which,
            endpoint.line,
            shape
        ),
        CanvasEvent::EndpointDetached { line, which } => {
            log::info!("step {}: detached {:?} of line {}", index, which, line)
        }
        other => log::trace!("step {}: {:?}", index, other),
    }
}

/// Plain text listing of shapes and lines, numbered in creation order.
pub fn summarize(canvas: &Canvas) -> String {
    let diagram = &canvas.diagram;
    let numbers: HashMap<ShapeId, usize> = diagram
        .shapes()
        .enumerate()
        .map(|(i, s)| (s.id(), i))
        .collect();
    let mut out = String::new();

    for (i, shape) in diagram.shapes().enumerate() {
        let c = shape.center();
        let _ = writeln!(
            out,
            "shape #{} {:?} at ({}, {}) center ({}, {})",
            i, shape.kind, shape.position.x, shape.position.y, c.x, c.y
        );
    }

    let describe = |ep: &Endpoint| -> String {
        let at = format!("({}, {})", ep.position.x, ep.position.y);
        match ep.attachment {
            Attachment::Free => format!("{} free", at),
            Attachment::Bound(id) => match numbers.get(&id) {
                Some(n) => format!("{} bound to shape #{}", at, n),
                None => format!("{} bound to missing shape {}", at, id),
            },
        }
    };
    for (i, line) in diagram.lines().enumerate() {
        let _ = writeln!(
            out,
            "line #{}: start {}; end {}",
            i,
            describe(&line.start),
            describe(&line.end)
        );
    }
    out
}
