//! Target models answering per-architecture address and adjacency queries.
//!
//! The BCF translator never hardcodes array geometry. It asks a
//! [`TargetModel`] which tile (if any) is visible through each memory
//! window, where the windows sit in the address space, and where the
//! tile's own bank appears. This keeps the translator identical across
//! architecture variants and makes absence of a neighbor a typed
//! `Option`, not a sentinel coordinate.

use super::memory_map::MemoryLayout;
use super::{AieArch, Direction, TileId};

/// Architecture queries needed to lay out one core's memory map.
pub trait TargetModel {
    /// The architecture variant this model describes.
    fn arch(&self) -> AieArch;

    /// Number of columns in the array.
    fn columns(&self) -> u32;

    /// Number of rows in the array (including shim and memory-tile rows).
    fn rows(&self) -> u32;

    /// Check whether a coordinate is a core tile with its own data bank.
    /// Shim and memory-tile rows are not core-addressable.
    fn is_core_tile(&self, col: u32, row: u32) -> bool;

    /// Check whether a coordinate lies inside the array at all.
    fn is_valid_tile(&self, col: u32, row: u32) -> bool {
        col < self.columns() && row < self.rows()
    }

    /// Memory-map constants for this architecture.
    fn layout(&self) -> &'static MemoryLayout {
        self.arch().layout()
    }

    /// Size of one tile's local data bank.
    fn local_memory_size(&self) -> u32 {
        self.layout().local_memory_size
    }

    /// Base address of the window in the given direction. Every
    /// (tile, direction) pair has exactly one base, neighbor or not.
    fn window_base(&self, dir: Direction) -> u32 {
        self.layout().window_base(dir)
    }

    /// The tile whose bank is visible through the window in `dir`, seen
    /// from `tile`. `None` at the array edge or when the adjacent row has
    /// no core-addressable bank. May be `tile` itself: one window always
    /// shows the tile's own memory.
    fn neighbor(&self, tile: TileId, dir: Direction) -> Option<TileId>;

    /// Base address of the window holding the tile's own bank. The stack
    /// is placed here.
    fn internal_base(&self, tile: TileId) -> u32;
}

/// Resolve a candidate coordinate to a core tile, or absence.
fn core_tile(model: &dyn TargetModel, col: Option<u32>, row: Option<u32>) -> Option<TileId> {
    let (col, row) = (col?, row?);
    if model.is_core_tile(col, row) {
        Some(TileId::new(col, row))
    } else {
        None
    }
}

// ============================================================================
// AIE1 (VC1902 class)
// ============================================================================

/// AIE1 target model.
///
/// 50x9 array, row 0 is the shim row. Memory sharing is checkerboarded:
/// on even rows the tile's own bank sits in the west window and the east
/// window shows the east neighbor; odd rows mirror this.
#[derive(Debug, Clone, Copy, Default)]
pub struct Aie1Model;

impl Aie1Model {
    #[inline]
    fn is_even_row(row: u32) -> bool {
        row % 2 == 0
    }
}

impl TargetModel for Aie1Model {
    fn arch(&self) -> AieArch {
        AieArch::Aie1
    }

    fn columns(&self) -> u32 {
        50
    }

    fn rows(&self) -> u32 {
        9
    }

    fn is_core_tile(&self, col: u32, row: u32) -> bool {
        self.is_valid_tile(col, row) && row >= 1
    }

    fn neighbor(&self, tile: TileId, dir: Direction) -> Option<TileId> {
        let TileId { col, row } = tile;
        let even = Self::is_even_row(row);
        let (ncol, nrow) = match dir {
            Direction::South => (Some(col), row.checked_sub(1)),
            Direction::North => (Some(col), Some(row + 1)),
            // Checkerboard: even rows own their west window, odd rows own
            // their east window.
            Direction::West if even => (Some(col), Some(row)),
            Direction::West => (col.checked_sub(1), Some(row)),
            Direction::East if even => (Some(col + 1), Some(row)),
            Direction::East => (Some(col), Some(row)),
        };
        core_tile(self, ncol, nrow)
    }

    fn internal_base(&self, tile: TileId) -> u32 {
        if Self::is_even_row(tile.row) {
            self.layout().west_base
        } else {
            self.layout().east_base
        }
    }
}

// ============================================================================
// AIE2 / AIE-ML (VE2802 class)
// ============================================================================

/// AIE2 target model.
///
/// 38x11 array: row 0 shim, rows 1-2 memory tiles, rows 3-10 core tiles.
/// Memory placement is uniform: the east window always shows the tile's
/// own bank, the west window shows the west neighbor.
#[derive(Debug, Clone, Copy, Default)]
pub struct Aie2Model;

impl TargetModel for Aie2Model {
    fn arch(&self) -> AieArch {
        AieArch::Aie2
    }

    fn columns(&self) -> u32 {
        38
    }

    fn rows(&self) -> u32 {
        11
    }

    fn is_core_tile(&self, col: u32, row: u32) -> bool {
        self.is_valid_tile(col, row) && row >= 3
    }

    fn neighbor(&self, tile: TileId, dir: Direction) -> Option<TileId> {
        let TileId { col, row } = tile;
        let (ncol, nrow) = match dir {
            Direction::South => (Some(col), row.checked_sub(1)),
            Direction::North => (Some(col), Some(row + 1)),
            Direction::West => (col.checked_sub(1), Some(row)),
            Direction::East => (Some(col), Some(row)),
        };
        core_tile(self, ncol, nrow)
    }

    fn internal_base(&self, _tile: TileId) -> u32 {
        self.layout().east_base
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aie1_checkerboard_windows() {
        let m = Aie1Model;

        // Even row: west window is the tile's own bank.
        let even = TileId::new(3, 2);
        assert_eq!(m.neighbor(even, Direction::West), Some(even));
        assert_eq!(m.neighbor(even, Direction::East), Some(TileId::new(4, 2)));

        // Odd row: east window is the tile's own bank.
        let odd = TileId::new(3, 3);
        assert_eq!(m.neighbor(odd, Direction::East), Some(odd));
        assert_eq!(m.neighbor(odd, Direction::West), Some(TileId::new(2, 3)));
    }

    #[test]
    fn test_aie1_internal_base_follows_parity() {
        let m = Aie1Model;
        assert_eq!(m.internal_base(TileId::new(3, 2)), 0x28000);
        assert_eq!(m.internal_base(TileId::new(3, 3)), 0x38000);
    }

    #[test]
    fn test_aie1_vertical_neighbors() {
        let m = Aie1Model;
        let t = TileId::new(5, 4);
        assert_eq!(m.neighbor(t, Direction::South), Some(TileId::new(5, 3)));
        assert_eq!(m.neighbor(t, Direction::North), Some(TileId::new(5, 5)));
    }

    #[test]
    fn test_aie1_array_edges() {
        let m = Aie1Model;

        // Row 1 sits above the shim row: nothing with memory to the south.
        assert_eq!(m.neighbor(TileId::new(5, 1), Direction::South), None);
        // Top row has no north neighbor.
        assert_eq!(m.neighbor(TileId::new(5, 8), Direction::North), None);
        // Column 0 on an odd row reaches west off the array.
        assert_eq!(m.neighbor(TileId::new(0, 3), Direction::West), None);
        // Last column on an even row reaches east off the array.
        assert_eq!(m.neighbor(TileId::new(49, 2), Direction::East), None);
    }

    #[test]
    fn test_aie2_uniform_windows() {
        let m = Aie2Model;
        let t = TileId::new(4, 5);
        assert_eq!(m.neighbor(t, Direction::East), Some(t));
        assert_eq!(m.neighbor(t, Direction::West), Some(TileId::new(3, 5)));
        assert_eq!(m.neighbor(t, Direction::South), Some(TileId::new(4, 4)));
        assert_eq!(m.neighbor(t, Direction::North), Some(TileId::new(4, 6)));
        assert_eq!(m.internal_base(t), 0x70000);
    }

    #[test]
    fn test_aie2_memtile_rows_are_not_neighbors() {
        let m = Aie2Model;
        // Row 3 is the first core row; row 2 is a memory tile.
        assert_eq!(m.neighbor(TileId::new(4, 3), Direction::South), None);
        assert!(!m.is_core_tile(4, 2));
        assert!(!m.is_core_tile(4, 0));
    }

    #[test]
    fn test_window_base_total_per_direction() {
        // Even with no neighbor, each direction resolves to one base.
        let m = Aie2Model;
        for dir in Direction::ALL {
            let base = m.window_base(dir);
            assert!(base >= 0x40000 && base < 0x80000);
        }
    }
}
