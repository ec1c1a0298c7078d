//! Resolver module - slide-and-merge for one directional move
//!
//! Every row (Left/Right) or column (Up/Down) is resolved on its own:
//!
//! 1. Read the line in the order that points toward the wall being pushed into
//! 2. Drop empty cells, keeping the relative order of tiles
//! 3. Scan once, pairwise: equal neighbours become one new tile of double value
//!    and the scan skips past both, so a merged tile never merges again this move
//! 4. Write the survivors back from the wall outwards
//!
//! A merge destroys both source tiles and mints a new id for the result. The
//! [`Merge`] record keeps the explicit `(value, positions before/after)` link that
//! ids can no longer provide.

use arrayvec::ArrayVec;

use crate::grid::{Board, TileIds};
use crate::types::{Direction, Position, Tile, TileId, CELL_COUNT, GRID_SIZE, MAX_MERGES_PER_MOVE};

const N: usize = GRID_SIZE as usize;

/// A tile that kept its identity and changed cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileMotion {
    pub id: TileId,
    pub value: u32,
    pub from: Position,
    pub to: Position,
}

/// Two tiles that became one
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Merge {
    /// Fresh id of the resulting tile
    pub id: TileId,
    /// Value of the resulting tile
    pub value: u32,
    /// Ids of the destroyed source tiles, wall-side first
    pub sources: [TileId; 2],
    pub from: [Position; 2],
    pub to: Position,
}

/// Result of resolving one move
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveOutcome {
    /// Board after sliding and merging, before any spawn
    pub board: Board,
    /// Whether the `(row, col, value)` layout differs from the input board
    pub moved: bool,
    /// Sum of the values created by merging (no multipliers)
    pub raw_score: u64,
    pub merges: ArrayVec<Merge, MAX_MERGES_PER_MOVE>,
    pub motions: ArrayVec<TileMotion, CELL_COUNT>,
}

impl MoveOutcome {
    /// Values of the tiles created by merging, in resolution order
    pub fn merged_values(&self) -> ArrayVec<u32, MAX_MERGES_PER_MOVE> {
        self.merges.iter().map(|m| m.value).collect()
    }
}

/// Cells of line `line`, ordered from the wall the tiles slide toward.
///
/// For Left/Right `line` is a row index; for Up/Down it is a column index.
pub fn line_positions(direction: Direction, line: u8) -> [Position; N] {
    let mut positions = [Position::new(0, 0); N];
    for (i, pos) in positions.iter_mut().enumerate() {
        let along = if direction.is_reversed() {
            (N - 1 - i) as u8
        } else {
            i as u8
        };
        *pos = if direction.is_horizontal() {
            Position::new(line, along)
        } else {
            Position::new(along, line)
        };
    }
    positions
}

/// Resolve one move over the whole board.
///
/// Ids are only minted for merges, so a move that changes nothing leaves `ids` untouched.
/// Surviving tiles lose their `just_spawned`/`just_merged` flags; new merge results carry
/// `just_merged`.
pub fn resolve_move(board: &Board, direction: Direction, ids: &mut TileIds) -> MoveOutcome {
    let grid = board.to_grid();
    let mut tiles = Vec::with_capacity(board.len());
    let mut merges = ArrayVec::new();
    let mut motions = ArrayVec::new();
    let mut raw_score: u64 = 0;

    for line in 0..GRID_SIZE {
        let positions = line_positions(direction, line);
        let compacted: ArrayVec<Tile, N> = positions
            .iter()
            .filter_map(|pos| grid[pos.row as usize][pos.col as usize])
            .collect();

        let mut read = 0;
        let mut write = 0;
        while read < compacted.len() {
            let to = positions[write];
            let current = compacted[read];

            // A pair whose double does not fit in u32 stays unmerged.
            match (compacted.get(read + 1), current.value.checked_mul(2)) {
                (Some(next), Some(value)) if next.value == current.value => {
                    let id = ids.mint();
                    tiles.push(Tile::merged(id, value, to));
                    merges.push(Merge {
                        id,
                        value,
                        sources: [current.id, next.id],
                        from: [current.position(), next.position()],
                        to,
                    });
                    raw_score += value as u64;
                    read += 2;
                }
                _ => {
                    tiles.push(Tile::new(current.id, current.value, to));
                    if current.position() != to {
                        motions.push(TileMotion {
                            id: current.id,
                            value: current.value,
                            from: current.position(),
                            to,
                        });
                    }
                    read += 1;
                }
            }
            write += 1;
        }
    }

    let board_after = Board::from_tiles(tiles);
    let moved = board_after.layout() != board.layout();

    MoveOutcome {
        board: board_after,
        moved,
        raw_score,
        merges,
        motions,
    }
}

/// Whether a move in `direction` would change the board
pub fn can_move(board: &Board, direction: Direction) -> bool {
    // Scratch ids: probing must not advance the session counter.
    let mut ids = TileIds::new();
    resolve_move(board, direction, &mut ids).moved
}
