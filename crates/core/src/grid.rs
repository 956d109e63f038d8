//! Grid module - the static obstacle lattice
//!
//! The grid is a 40x30 lattice where each cell is either free or an obstacle.
//! Uses a flat array for better cache locality and zero-allocation.
//! Coordinates: (x, y) where x ranges 0..39 (left to right), y ranges 0..29 (top to bottom).
//!
//! The mask only changes when a new layout is placed on reset: the full border
//! plus a small random sample of interior cells.

use snek_types::{Cell, GRID_CELLS, GRID_HEIGHT, GRID_WIDTH, INTERIOR_OBSTACLES};

use crate::rng::SimpleRng;

/// Upper bound on random draws when picking a single obstacle or free cell.
pub const PLACEMENT_ATTEMPTS: usize = 4096;

/// Obstacle mask, row-major (y * WIDTH + x)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    obstacles: [bool; GRID_CELLS],
    obstacle_count: usize,
}

impl Grid {
    /// Create a grid with no obstacles at all (not even the border)
    pub fn new() -> Self {
        Self {
            obstacles: [false; GRID_CELLS],
            obstacle_count: 0,
        }
    }

    /// Calculate flat index from (x, y) coordinates
    #[inline(always)]
    fn index(cell: Cell) -> Option<usize> {
        if !cell.in_bounds() {
            return None;
        }
        Some((cell.y as usize) * (GRID_WIDTH as usize) + (cell.x as usize))
    }

    /// Bounds-checked obstacle query; out-of-range cells are never obstacles.
    pub fn is_obstacle(&self, cell: Cell) -> bool {
        Self::index(cell).map(|i| self.obstacles[i]).unwrap_or(false)
    }

    /// Number of obstacle cells currently marked
    pub fn obstacle_count(&self) -> usize {
        self.obstacle_count
    }

    /// Mark or clear one cell. Returns false if out of bounds.
    ///
    /// Gameplay only rebuilds the mask through [`Grid::place_obstacles`]; this is
    /// for restoring save blocks and setting up scenarios.
    pub fn set_obstacle(&mut self, cell: Cell, obstacle: bool) -> bool {
        let Some(i) = Self::index(cell) else {
            return false;
        };
        if self.obstacles[i] != obstacle {
            self.obstacles[i] = obstacle;
            if obstacle {
                self.obstacle_count += 1;
            } else {
                self.obstacle_count -= 1;
            }
        }
        true
    }

    /// Remove every obstacle, border included
    pub fn clear(&mut self) {
        self.obstacles = [false; GRID_CELLS];
        self.obstacle_count = 0;
    }

    /// Iterate all obstacle cells in row-major order
    pub fn obstacles(&self) -> impl Iterator<Item = Cell> + '_ {
        self.obstacles
            .iter()
            .enumerate()
            .filter(|(_, &o)| o)
            .map(|(i, _)| Cell::new(i as i32 % GRID_WIDTH, i as i32 / GRID_WIDTH))
    }

    /// Rebuild the mask: clear, mark the full border, then mark
    /// [`INTERIOR_OBSTACLES`] random interior cells that are not `reserved`.
    pub fn place_obstacles(&mut self, rng: &mut SimpleRng, reserved: impl Fn(Cell) -> bool) {
        self.clear();

        for x in 0..GRID_WIDTH {
            self.set_obstacle(Cell::new(x, 0), true);
            self.set_obstacle(Cell::new(x, GRID_HEIGHT - 1), true);
        }
        for y in 0..GRID_HEIGHT {
            self.set_obstacle(Cell::new(0, y), true);
            self.set_obstacle(Cell::new(GRID_WIDTH - 1, y), true);
        }

        for _ in 0..INTERIOR_OBSTACLES {
            for _ in 0..PLACEMENT_ATTEMPTS {
                let cell = Cell::new(
                    rng.next_range(GRID_WIDTH as u32) as i32,
                    rng.next_range(GRID_HEIGHT as u32) as i32,
                );
                if !self.is_obstacle(cell) && !reserved(cell) {
                    self.set_obstacle(cell, true);
                    break;
                }
            }
        }
    }

    /// Pack the mask into a bitset (bit `i % 8` of byte `i / 8` is cell `i`).
    pub fn write_bits(&self, out: &mut [u8]) {
        for byte in out.iter_mut() {
            *byte = 0;
        }
        for (i, &o) in self.obstacles.iter().enumerate() {
            if o {
                if let Some(byte) = out.get_mut(i / 8) {
                    *byte |= 1 << (i % 8);
                }
            }
        }
    }

    /// Inverse of [`Grid::write_bits`].
    pub fn from_bits(bits: &[u8]) -> Self {
        let mut grid = Self::new();
        for i in 0..GRID_CELLS {
            let set = bits.get(i / 8).map(|b| b & (1 << (i % 8)) != 0).unwrap_or(false);
            if set {
                grid.obstacles[i] = true;
                grid.obstacle_count += 1;
            }
        }
        grid
    }
}

impl Default for Grid {
    fn default() -> Self {
        Self::new()
    }
}

/// Bytes needed by [`Grid::write_bits`]
pub const GRID_BITSET_LEN: usize = GRID_CELLS.div_ceil(8);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_grid_is_empty() {
        let grid = Grid::new();
        assert_eq!(grid.obstacle_count(), 0);
        assert!(!grid.is_obstacle(Cell::new(0, 0)));
    }

    #[test]
    fn test_out_of_bounds_is_not_obstacle() {
        let mut grid = Grid::new();
        grid.place_obstacles(&mut SimpleRng::new(1), |_| false);
        assert!(!grid.is_obstacle(Cell::new(-1, 0)));
        assert!(!grid.is_obstacle(Cell::new(GRID_WIDTH, 3)));
        assert!(!grid.set_obstacle(Cell::new(0, GRID_HEIGHT), true));
    }

    #[test]
    fn test_layout_marks_border_and_interior() {
        let mut grid = Grid::new();
        grid.place_obstacles(&mut SimpleRng::new(3), |_| false);

        for x in 0..GRID_WIDTH {
            assert!(grid.is_obstacle(Cell::new(x, 0)));
            assert!(grid.is_obstacle(Cell::new(x, GRID_HEIGHT - 1)));
        }
        for y in 0..GRID_HEIGHT {
            assert!(grid.is_obstacle(Cell::new(0, y)));
            assert!(grid.is_obstacle(Cell::new(GRID_WIDTH - 1, y)));
        }

        let border = (2 * (GRID_WIDTH + GRID_HEIGHT) - 4) as usize;
        assert_eq!(grid.obstacle_count(), border + INTERIOR_OBSTACLES);
        assert_eq!(grid.obstacles().count(), grid.obstacle_count());
    }

    #[test]
    fn test_layout_skips_reserved_cells() {
        let keep = Cell::new(20, 15);
        for seed in 1..50 {
            let mut grid = Grid::new();
            grid.place_obstacles(&mut SimpleRng::new(seed), |c| c.y == keep.y);
            for x in 1..GRID_WIDTH - 1 {
                assert!(!grid.is_obstacle(Cell::new(x, keep.y)));
            }
        }
    }

    #[test]
    fn test_bitset_round_trip() {
        let mut grid = Grid::new();
        grid.place_obstacles(&mut SimpleRng::new(11), |_| false);
        let mut bits = [0u8; GRID_BITSET_LEN];
        grid.write_bits(&mut bits);
        assert_eq!(Grid::from_bits(&bits), grid);
    }
}
