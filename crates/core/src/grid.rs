//! Grid module - tile storage and coordinate views
//!
//! The board is the set of live tiles. Row, column and cell views are derived
//! on demand rather than stored next to the tile list, so they can never drift
//! apart from it.
//! Coordinates: (row, col) where both range 0..3, row 0 at the top.

use arrayvec::ArrayVec;

use crate::types::{Cell, Position, Tile, TileId, CELL_COUNT, GRID_SIZE, MIN_TILE_VALUE};

const N: usize = GRID_SIZE as usize;

/// Cell view of the board, indexed `[row][col]`
pub type Grid = [[Cell; N]; N];

/// Value view of the board, indexed `[row][col]`, 0 for empty cells
pub type ValueGrid = [[u32; N]; N];

/// Occupied cells as `(row, col, value)`, sorted
pub type Layout = ArrayVec<(u8, u8, u32), CELL_COUNT>;

/// Build the cell view of a tile list.
pub fn to_grid(tiles: &[Tile]) -> Grid {
    let mut grid: Grid = [[None; N]; N];
    for tile in tiles {
        let cell = &mut grid[tile.row as usize][tile.col as usize];
        assert!(
            cell.is_none(),
            "two tiles at ({}, {})",
            tile.row,
            tile.col
        );
        *cell = Some(*tile);
    }
    grid
}

/// Collect the tiles of a cell view, in row-major order.
///
/// Coordinates are taken from the cell each tile sits in, so `from_grid(&to_grid(t))`
/// reproduces `t` up to ordering.
pub fn from_grid(grid: &Grid) -> Vec<Tile> {
    let mut tiles = Vec::with_capacity(CELL_COUNT);
    for (row, cells) in grid.iter().enumerate() {
        for (col, cell) in cells.iter().enumerate() {
            if let Some(tile) = cell {
                tiles.push(Tile {
                    row: row as u8,
                    col: col as u8,
                    ..*tile
                });
            }
        }
    }
    tiles
}

/// List every unoccupied cell, in row-major order.
pub fn empty_cells(tiles: &[Tile]) -> ArrayVec<Position, CELL_COUNT> {
    let mut occupied = [false; CELL_COUNT];
    for tile in tiles {
        occupied[tile.position().index()] = true;
    }
    occupied
        .iter()
        .enumerate()
        .filter(|(_, taken)| !**taken)
        .map(|(index, _)| Position::from_index(index))
        .collect()
}

/// Monotonic tile id source for one session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileIds {
    next: TileId,
}

impl TileIds {
    pub fn new() -> Self {
        Self { next: 1 }
    }

    /// Hand out the next id
    pub fn mint(&mut self) -> TileId {
        let id = self.next;
        self.next += 1;
        id
    }

    /// The id the next `mint` will return
    pub fn peek(&self) -> TileId {
        self.next
    }

    /// Make sure `id` is never handed out again
    pub fn reserve_through(&mut self, id: TileId) {
        self.next = self.next.max(id + 1);
    }
}

impl Default for TileIds {
    fn default() -> Self {
        Self::new()
    }
}

/// The game board - the set of live tiles on a 4x4 grid
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Board {
    tiles: Vec<Tile>,
}

impl Board {
    /// Create a new empty board
    pub fn new() -> Self {
        Self {
            tiles: Vec::with_capacity(CELL_COUNT),
        }
    }

    /// Wrap a tile list, checking that it is a legal board.
    ///
    /// Panics on out-of-range coordinates, shared cells, duplicate ids or
    /// values that are not powers of two; those are engine bugs, not player input.
    pub fn from_tiles(tiles: Vec<Tile>) -> Self {
        assert_valid(&tiles);
        Self { tiles }
    }

    /// Build a board from a value grid (0 = empty), minting ids in row-major order.
    pub fn from_values(values: ValueGrid, ids: &mut TileIds) -> Self {
        let mut tiles = Vec::with_capacity(CELL_COUNT);
        for (row, cells) in values.iter().enumerate() {
            for (col, &value) in cells.iter().enumerate() {
                if value != 0 {
                    tiles.push(Tile::new(
                        ids.mint(),
                        value,
                        Position::new(row as u8, col as u8),
                    ));
                }
            }
        }
        Self::from_tiles(tiles)
    }

    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.tiles.len() == CELL_COUNT
    }

    /// Tile at position, if any
    pub fn get(&self, pos: Position) -> Option<&Tile> {
        self.tiles.iter().find(|t| t.position() == pos)
    }

    /// Place a tile on an empty cell
    pub fn insert(&mut self, tile: Tile) {
        assert!(tile.position().in_bounds(), "tile outside the grid: {:?}", tile);
        assert!(
            self.get(tile.position()).is_none(),
            "cell ({}, {}) already occupied",
            tile.row,
            tile.col
        );
        self.tiles.push(tile);
    }

    pub fn to_grid(&self) -> Grid {
        to_grid(&self.tiles)
    }

    pub fn value_grid(&self) -> ValueGrid {
        let mut values = [[0u32; N]; N];
        for tile in &self.tiles {
            values[tile.row as usize][tile.col as usize] = tile.value;
        }
        values
    }

    pub fn empty_cells(&self) -> ArrayVec<Position, CELL_COUNT> {
        empty_cells(&self.tiles)
    }

    /// Highest tile value on the board (0 when empty)
    pub fn max_value(&self) -> u32 {
        self.tiles.iter().map(|t| t.value).max().unwrap_or(0)
    }

    /// Sum of all tile values
    pub fn value_sum(&self) -> u64 {
        self.tiles.iter().map(|t| t.value as u64).sum()
    }

    /// Whether any two horizontally or vertically adjacent tiles share a value
    /// that can still be doubled
    pub fn has_adjacent_pair(&self) -> bool {
        let values = self.value_grid();
        for row in 0..N {
            for col in 0..N {
                let v = values[row][col];
                if v == 0 || v.checked_mul(2).is_none() {
                    continue;
                }
                if col + 1 < N && values[row][col + 1] == v {
                    return true;
                }
                if row + 1 < N && values[row + 1][col] == v {
                    return true;
                }
            }
        }
        false
    }

    /// Occupied cells as a sorted `(row, col, value)` multiset.
    ///
    /// Two boards with equal layouts look identical to the player regardless of tile ids.
    pub fn layout(&self) -> Layout {
        let mut layout: Layout = self.tiles.iter().map(|t| (t.row, t.col, t.value)).collect();
        layout.sort_unstable();
        layout
    }

    /// Drop transient spawn/merge flags from every tile
    pub fn clear_flags(&mut self) {
        for tile in &mut self.tiles {
            tile.just_spawned = false;
            tile.just_merged = false;
        }
    }
}

fn assert_valid(tiles: &[Tile]) {
    assert!(tiles.len() <= CELL_COUNT, "{} tiles on a 4x4 grid", tiles.len());
    let mut seen = [false; CELL_COUNT];
    for (i, tile) in tiles.iter().enumerate() {
        assert!(tile.position().in_bounds(), "tile outside the grid: {:?}", tile);
        assert!(
            tile.value >= MIN_TILE_VALUE && tile.value.is_power_of_two(),
            "invalid tile value {}",
            tile.value
        );
        let index = tile.position().index();
        assert!(!seen[index], "two tiles at ({}, {})", tile.row, tile.col);
        seen[index] = true;
        debug_assert!(
            tiles[..i].iter().all(|other| other.id != tile.id),
            "duplicate tile id {}",
            tile.id
        );
    }
}
