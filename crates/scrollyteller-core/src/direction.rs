//! Scroll direction.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The direction of the scroll gesture that produced a step event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// The reader is scrolling back towards the top of the page.
    Up,
    /// The reader is scrolling forward through the story.
    Down,
}

impl Direction {
    /// Returns the lowercase name used on the wire.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Up => "up",
            Self::Down => "down",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
