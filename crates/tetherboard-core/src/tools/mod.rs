//! Tool modes selected by the toolbar.

use crate::shapes::ShapeKind;
use serde::{Deserialize, Serialize};

/// Available tools.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum ToolKind {
    /// Grab line endpoints, drag shapes, hover.
    #[default]
    Select,
    Rectangle,
    Pentagon,
    Hexagon,
    Line,
}

impl ToolKind {
    /// Shape placed by this tool, if it is a shape tool.
    pub fn shape_kind(self) -> Option<ShapeKind> {
        match self {
            ToolKind::Rectangle => Some(ShapeKind::Rectangle),
            ToolKind::Pentagon => Some(ShapeKind::PENTAGON),
            ToolKind::Hexagon => Some(ShapeKind::HEXAGON),
            ToolKind::Select | ToolKind::Line => None,
        }
    }

    pub fn is_shape_tool(self) -> bool {
        self.shape_kind().is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_tool() {
        assert_eq!(ToolKind::default(), ToolKind::Select);
    }

    #[test]
    fn test_shape_tools() {
        assert_eq!(ToolKind::Rectangle.shape_kind(), Some(ShapeKind::Rectangle));
        assert_eq!(ToolKind::Pentagon.shape_kind(), Some(ShapeKind::Polygon { sides: 5 }));
        assert_eq!(ToolKind::Hexagon.shape_kind(), Some(ShapeKind::Polygon { sides: 6 }));
        assert!(!ToolKind::Line.is_shape_tool());
        assert!(!ToolKind::Select.is_shape_tool());
    }
}
