//! Tetherboard Application
//!
//! Headless driver that replays scripted toolbar and pointer input against
//! the diagram core.

mod replay;

pub use replay::{ReplayError, Script, Step, run, summarize};
