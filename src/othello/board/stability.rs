//! Lower bound on discs that can never be flipped again.
//!
//! A disc anchored to a held corner through a contiguous run of own discs
//! along the corner's row, column, or diagonal is stable: no bracketing line
//! through it can ever terminate on an opponent disc. This undercounts true
//! stability (interior fortresses are missed) but is cheap and deterministic.

use super::Board;
use super::masks::shift;
use crate::othello::prelude::*;

/// The rays leaving each corner: along its row, its column, and the main
/// diagonal into the board interior.
const CORNER_RAYS: [(u32, [i8; 3]); 4] = [
    (0, [1, 8, 9]),    // a1: east, south, south-east
    (7, [-1, 8, 7]),   // h1: west, south, south-west
    (56, [1, -8, -7]), // a8: east, north, north-east
    (63, [-1, -8, -9]),// h8: west, north, north-west
];

/// Guard mask for a single step along a ray starting inside the board.
fn guard(dir: i8) -> u64 {
    match dir {
        1 | 9 | -7 => super::masks::NOT_FILE_H,
        -1 | 7 | -9 => super::masks::NOT_FILE_A,
        _ => u64::MAX,
    }
}

/// The mask of `side` discs stable by the corner-anchored bound.
pub fn stable_discs(board: &Board, side: Side) -> u64 {
    let own = board.bits(side);
    let mut stable = 0u64;

    for &(corner, rays) in &CORNER_RAYS {
        let corner_bit = 1u64 << corner;
        if own & corner_bit == 0 {
            continue;
        }
        stable |= corner_bit;
        for &dir in &rays {
            let mut probe = shift(corner_bit, dir, guard(dir));
            while probe & own != 0 {
                stable |= probe;
                probe = shift(probe, dir, guard(dir));
            }
        }
    }

    stable
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_corner_means_no_stability() {
        let board = Board::new();
        assert_eq!(stable_discs(&board, Side::Black), 0);
        assert_eq!(stable_discs(&board, Side::White), 0);
    }

    #[test]
    fn corner_run_along_the_top_edge() {
        let mut board = Board::empty();
        for col in 0..5 {
            board.place(Side::Black, Coord::new(0, col));
        }
        // a1..e1 are anchored; a gap stops the run even if f1 were black.
        let stable = stable_discs(&board, Side::Black);
        assert_eq!(stable.count_ones(), 5);

        board.place(Side::Black, Coord::new(0, 6));
        assert_eq!(stable_discs(&board, Side::Black).count_ones(), 5);
    }

    #[test]
    fn diagonal_run_from_a_corner() {
        let mut board = Board::empty();
        for i in 0..3 {
            board.place(Side::White, Coord::new(i, i));
        }
        let stable = stable_discs(&board, Side::White);
        assert_eq!(stable.count_ones(), 3);
        assert_eq!(stable_discs(&board, Side::Black), 0);
    }

    #[test]
    fn opponent_disc_breaks_the_run() {
        let mut board = Board::empty();
        board.place(Side::Black, Coord::new(0, 0));
        board.place(Side::White, Coord::new(0, 1));
        board.place(Side::Black, Coord::new(0, 2));
        // Only the corner itself is anchored for black.
        assert_eq!(stable_discs(&board, Side::Black), 1);
    }
}
