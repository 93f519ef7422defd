//! Dense 8x8 mirror of the bitboard.
//!
//! The dense form walks rays square by square instead of shifting occupancy
//! words, so the two representations make independent legality decisions.
//! They must agree bit-for-bit on every reachable position.

use super::Board;
use crate::othello::prelude::*;

/// One square of the dense grid.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Cell {
    #[default]
    Empty,
    Black,
    White,
}

impl Cell {
    fn side(&self) -> Option<Side> {
        match self {
            Cell::Empty => None,
            Cell::Black => Some(Side::Black),
            Cell::White => Some(Side::White),
        }
    }

    fn of(side: Side) -> Cell {
        match side {
            Side::Black => Cell::Black,
            Side::White => Cell::White,
        }
    }
}

/// Row-and-column offsets of the eight rays.
const RAYS: [(i8, i8); 8] = [
    (0, 1),
    (0, -1),
    (1, 0),
    (-1, 0),
    (1, 1),
    (1, -1),
    (-1, 1),
    (-1, -1),
];

/// The grid of cells on the board.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Cells(pub [[Cell; BOARD_SIZE]; BOARD_SIZE]);

impl Cells {
    /// Projects the bitboard onto a dense grid.
    pub fn from_board(board: &Board) -> Cells {
        let mut cells = Cells::default();
        for row in 0..BOARD_SIZE {
            for col in 0..BOARD_SIZE {
                let coord = Coord::new(row as i8, col as i8);
                cells.0[row][col] = match board.disc_at(coord) {
                    Some(side) => Cell::of(side),
                    None => Cell::Empty,
                };
            }
        }
        cells
    }

    /// Packs the dense grid back into occupancy words.
    pub fn to_board(&self) -> Board {
        let mut black = 0u64;
        let mut white = 0u64;
        for row in 0..BOARD_SIZE {
            for col in 0..BOARD_SIZE {
                let bit = 1u64 << (row * BOARD_SIZE + col);
                match self.0[row][col] {
                    Cell::Black => black |= bit,
                    Cell::White => white |= bit,
                    Cell::Empty => {}
                }
            }
        }
        Board::from_bits(black, white)
    }

    fn at(&self, row: i8, col: i8) -> Option<Cell> {
        if (0..BOARD_SIZE as i8).contains(&row) && (0..BOARD_SIZE as i8).contains(&col) {
            Some(self.0[row as usize][col as usize])
        } else {
            None
        }
    }

    /// The squares flipped by `side` playing `coord`, by walking each ray
    /// until an empty square, the edge, or a bracketing own disc.
    pub fn flips(&self, side: Side, coord: Coord) -> Vec<Coord> {
        if !coord.in_bounds() || self.0[coord.row as usize][coord.col as usize] != Cell::Empty {
            return vec![];
        }

        let mut flipped = vec![];
        for &(dr, dc) in &RAYS {
            let mut run = vec![];
            let (mut row, mut col) = (coord.row + dr, coord.col + dc);
            while self.at(row, col).and_then(|c| c.side()) == Some(-side) {
                run.push(Coord::new(row, col));
                row += dr;
                col += dc;
            }
            if !run.is_empty() && self.at(row, col).and_then(|c| c.side()) == Some(side) {
                flipped.extend(run);
            }
        }
        flipped
    }

    /// Every legal placement for `side`, in ascending square order.
    pub fn valid_moves(&self, side: Side) -> Vec<Coord> {
        let mut moves = vec![];
        for row in 0..BOARD_SIZE as i8 {
            for col in 0..BOARD_SIZE as i8 {
                let coord = Coord::new(row, col);
                if !self.flips(side, coord).is_empty() {
                    moves.push(coord);
                }
            }
        }
        moves
    }

    /// Plays a legal move in place, flipping the bracketed runs.
    pub fn apply(&mut self, side: Side, coord: Coord) -> Result<()> {
        let flipped = self.flips(side, coord);
        if flipped.is_empty() {
            return Err(anyhow!("move {coord} is not valid for {} in this position", side.notate()));
        }
        self.0[coord.row as usize][coord.col as usize] = Cell::of(side);
        for c in flipped {
            self.0[c.row as usize][c.col as usize] = Cell::of(side);
        }
        Ok(())
    }

    /// Disc counts as (black, white).
    pub fn counts(&self) -> (u32, u32) {
        let mut counts = (0, 0);
        for row in &self.0 {
            for cell in row {
                match cell {
                    Cell::Black => counts.0 += 1,
                    Cell::White => counts.1 += 1,
                    Cell::Empty => {}
                }
            }
        }
        counts
    }

    /// True iff neither side has a legal move.
    pub fn is_game_over(&self) -> bool {
        self.valid_moves(Side::Black).is_empty() && self.valid_moves(Side::White).is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{Rng, SeedableRng, rngs::StdRng};

    #[test]
    fn round_trip_through_cells() {
        let board = Board::new();
        assert_eq!(board.to_cells().to_board(), board);
    }

    /// Drives seeded random playouts on the bitboard while checking that the
    /// dense representation reproduces every decision exactly.
    #[test]
    fn dense_and_bitboard_agree_on_random_playouts() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..20 {
            let mut board = Board::new();
            let mut side = Side::Black;
            loop {
                let cells = board.to_cells();
                assert_eq!(cells.to_board(), board);
                assert_eq!(cells.counts(), (board.count(Side::Black), board.count(Side::White)));
                assert_eq!(cells.is_game_over(), board.is_game_over());

                let bit_moves = board.valid_moves(side);
                let dense_moves = cells.valid_moves(side);
                assert_eq!(
                    bit_moves.iter().map(|m| m.coord).collect::<Vec<_>>(),
                    dense_moves
                );

                if board.is_game_over() {
                    break;
                }
                if bit_moves.is_empty() {
                    side = -side;
                    continue;
                }

                let mv = &bit_moves[rng.gen_range(0..bit_moves.len())];
                let dense_flips = cells.flips(side, mv.coord);
                let dense_mask = dense_flips.iter().fold(0u64, |acc, c| acc | c.bit());
                assert_eq!(dense_mask, mv.flipped);

                let mut next_cells = cells;
                next_cells.apply(side, mv.coord).unwrap();
                board = board.apply(side, mv);
                assert_eq!(next_cells.to_board(), board);
                side = -side;
            }
        }
    }
}
