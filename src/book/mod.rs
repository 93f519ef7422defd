//! Known-openings book.
//!
//! The book serves two callers: the interactive server answers from it while
//! the game is still on a known line, and the trainer and comparator draw
//! opening diversity from it so that self-play does not collapse onto a
//! single game.

mod table;

use rand::Rng;
use rand::seq::index;

use crate::othello::prelude::*;

/// A named opening line.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Opening {
    pub name: &'static str,
    pub transcript: &'static str,
}

impl Opening {
    /// The parsed move sequence of the transcript, Black first.
    /// Table entries are static and test-enforced, so a parse failure here
    /// is corrupt data and fatal.
    pub fn moves(&self) -> Result<Vec<Coord>> {
        let history = self
            .transcript
            .parse::<HistoryString>()
            .with_context(|| format!("opening {} has a malformed transcript", self.name))?;
        Ok(history.moves)
    }

    /// How many moves the line contains.
    pub fn len(&self) -> usize {
        self.transcript.len() / 2
    }

    pub fn is_empty(&self) -> bool {
        self.transcript.is_empty()
    }
}

/// The full book, in table order.
pub fn openings() -> &'static [Opening] {
    table::OPENINGS
}

/// Every opening whose transcript starts with the given history. An empty
/// history matches the whole book.
pub fn match_opening(history: &str) -> Vec<&'static Opening> {
    table::OPENINGS
        .iter()
        .filter(|opening| opening.transcript.starts_with(history))
        .collect()
}

/// Draws `k` distinct openings; asking for more than the book holds returns
/// the whole book in table order.
pub fn select_random_openings<R: Rng + ?Sized>(rng: &mut R, k: usize) -> Vec<&'static Opening> {
    let book = table::OPENINGS;
    if k >= book.len() {
        return book.iter().collect();
    }
    let mut picks = index::sample(rng, book.len(), k).into_vec();
    picks.sort_unstable();
    picks.into_iter().map(|i| &book[i]).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{SeedableRng, rngs::StdRng};

    /// Replays a transcript from the start position with strict alternation,
    /// Black first. Any illegal move is corrupt book data.
    fn replay(opening: &Opening) -> Board {
        let mut board = Board::new();
        let mut side = Side::Black;
        for coord in opening.moves().unwrap() {
            let (next, _) = board
                .try_apply(side, coord)
                .unwrap_or_else(|e| panic!("{}: {e}", opening.name));
            board = next;
            side = -side;
        }
        board
    }

    #[test]
    fn every_opening_replays_legally() {
        for opening in openings() {
            assert!(opening.len() % 2 == 0, "{} has odd length", opening.name);
            let board = replay(opening);
            assert_eq!(
                board.disc_count() as usize,
                4 + opening.len(),
                "{}",
                opening.name
            );
        }
    }

    #[test]
    fn ten_move_line_reaches_fourteen_discs() {
        let opening = openings()
            .iter()
            .find(|o| o.name == "Raccoon Dog")
            .unwrap();
        let board = replay(opening);
        assert_eq!(board.count(Side::Black) + board.count(Side::White), 14);
    }

    #[test]
    fn prefix_matching_finds_the_book_line() {
        let matched = match_opening("c4c3d3e3e2c5f3c2b6c6");
        assert!(!matched.is_empty());
        assert!(matched.iter().any(|o| o.name == "Inoue"));

        // The empty history is a prefix of everything.
        assert_eq!(match_opening("").len(), openings().len());

        // A history that left the book matches nothing.
        assert!(match_opening("c4c3d3c5f6").is_empty());
    }

    #[test]
    fn selection_is_distinct_and_clamped() {
        let mut rng = StdRng::seed_from_u64(11);
        let picked = select_random_openings(&mut rng, 4);
        assert_eq!(picked.len(), 4);
        let mut names = picked.iter().map(|o| o.name).collect::<Vec<_>>();
        names.dedup();
        assert_eq!(names.len(), 4);

        let everything = select_random_openings(&mut rng, 999);
        assert_eq!(everything.len(), openings().len());
    }
}
