//! Plain input values shared between hosts and engines.

use serde::{Deserialize, Serialize};

/// Device class behind a pointer event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PointerKind {
    Mouse,
    Touch,
    Pen,
}

impl PointerKind {
    pub fn is_mouse(self) -> bool {
        matches!(self, PointerKind::Mouse)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PointerButton {
    Primary,
    Secondary,
    Middle,
    Other,
}

/// Horizontal arrow keys, the only keyboard input the engines consume.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ArrowKey {
    Left,
    Right,
}
