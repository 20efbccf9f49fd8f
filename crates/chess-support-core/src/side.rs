//! Side to move

use serde::{Deserialize, Serialize};
use std::fmt;

/// A player colour
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    White,
    Black,
}

impl Side {
    /// Mover of the given 1-based ply: odd is white, even is black.
    pub fn from_ply(ply: usize) -> Self {
        if ply % 2 == 1 { Side::White } else { Side::Black }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Side::White => "white",
            Side::Black => "black",
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parity() {
        assert_eq!(Side::from_ply(1), Side::White);
        assert_eq!(Side::from_ply(2), Side::Black);
        assert_eq!(Side::from_ply(77), Side::White);
        assert_eq!(Side::from_ply(78), Side::Black);
    }

    #[test]
    fn test_serialized_name() {
        assert_eq!(serde_json::to_string(&Side::White).unwrap(), "\"white\"");
        assert_eq!(Side::Black.to_string(), "black");
    }
}
