//! Device description model and target models for AIE tile arrays.
//!
//! This module provides:
//! - Tile identity (`TileId`) and compass directions (`Direction`)
//! - Architecture variants (`AieArch`) and their memory-map constants
//! - Target models answering neighbor/address queries per architecture
//! - The device description data model consumed by the BCF translator
//!
//! # Memory Windows
//!
//! An AIE core addresses its own data memory and the banks of adjacent
//! tiles through four fixed address windows:
//!
//! ```text
//!                 +---------+
//!                 |  north  |   <- north_base
//!   +---------+   +---------+   +---------+
//!   |  west   |   |  core   |   |  east   |
//!   +---------+   +---------+   +---------+
//!                 |  south  |   <- south_base
//!                 +---------+
//! ```
//!
//! One of the windows is the tile's own bank: on AIE1 the side alternates
//! per row (checkerboard), on AIE2 it is always the east window.

pub mod description;
pub mod memory_map;
pub mod target_model;

pub use description::{BufferDecl, CoreDecl, Description, Device, TileDecl};
pub use memory_map::MemoryLayout;
pub use target_model::{Aie1Model, Aie2Model, TargetModel};

use serde::{Deserialize, Serialize};

/// Coordinate of one tile in the array.
///
/// Unique identity within one device description. Ordered column-major so
/// that indexed lookups have a stable iteration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TileId {
    /// Column index
    pub col: u32,
    /// Row index
    pub row: u32,
}

impl TileId {
    /// Create a tile identity from coordinates.
    #[inline]
    pub fn new(col: u32, row: u32) -> Self {
        Self { col, row }
    }
}

impl std::fmt::Display for TileId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "tile({},{})", self.col, self.row)
    }
}

/// Compass direction of a memory window, seen from the core.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    South,
    West,
    North,
    East,
}

impl Direction {
    /// All directions, in the order the windows are walked during
    /// emission. This order is part of the output contract.
    pub const ALL: [Direction; 4] = [
        Direction::South,
        Direction::West,
        Direction::North,
        Direction::East,
    ];
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Direction::South => write!(f, "south"),
            Direction::West => write!(f, "west"),
            Direction::North => write!(f, "north"),
            Direction::East => write!(f, "east"),
        }
    }
}

/// AIE architecture variant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AieArch {
    /// AIE (first generation) - VC1902 class arrays
    Aie1,
    /// AIE-ML (second generation) - VE2802 class arrays
    Aie2,
}

impl AieArch {
    /// Get the memory-map constants for this architecture.
    #[inline]
    pub const fn layout(self) -> &'static MemoryLayout {
        match self {
            AieArch::Aie1 => &memory_map::AIE1_LAYOUT,
            AieArch::Aie2 => &memory_map::AIE2_LAYOUT,
        }
    }

    /// Get the target model for this architecture.
    pub fn model(self) -> &'static dyn TargetModel {
        match self {
            AieArch::Aie1 => &Aie1Model,
            AieArch::Aie2 => &Aie2Model,
        }
    }
}

impl std::fmt::Display for AieArch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AieArch::Aie1 => write!(f, "AIE1"),
            AieArch::Aie2 => write!(f, "AIE2"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tile_id_display() {
        assert_eq!(TileId::new(1, 3).to_string(), "tile(1,3)");
    }

    #[test]
    fn test_tile_id_ordering() {
        // Column-major: all of column 0 sorts before column 1.
        assert!(TileId::new(0, 5) < TileId::new(1, 0));
        assert!(TileId::new(2, 1) < TileId::new(2, 2));
    }

    #[test]
    fn test_direction_walk_order() {
        let names: Vec<String> = Direction::ALL.iter().map(|d| d.to_string()).collect();
        assert_eq!(names, ["south", "west", "north", "east"]);
    }

    #[test]
    fn test_arch_display() {
        assert_eq!(AieArch::Aie1.to_string(), "AIE1");
        assert_eq!(AieArch::Aie2.to_string(), "AIE2");
    }
}
