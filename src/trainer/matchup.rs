//! Deterministic two-evaluator match driver.

use crate::book::Opening;
use crate::engine::prelude::*;
use crate::othello::prelude::*;

/// Which colour contestant A holds for one match.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SideAssignment {
    APlaysBlack,
    APlaysWhite,
}

impl SideAssignment {
    /// Both assignments, used to swap colours across paired matches.
    pub fn both() -> [SideAssignment; 2] {
        [SideAssignment::APlaysBlack, SideAssignment::APlaysWhite]
    }

    /// The colour A holds under this assignment.
    pub fn side_of_a(&self) -> Side {
        match self {
            SideAssignment::APlaysBlack => Side::Black,
            SideAssignment::APlaysWhite => Side::White,
        }
    }
}

/// A finished match, from A's perspective.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MatchOutcome {
    AWins,
    BWins,
    Draw,
}

/// Per-match search parameters shared by both contestants.
#[derive(Clone, Copy, Debug)]
pub struct MatchSettings {
    pub depth: u32,
    pub mate_depth: u32,
}

impl Default for MatchSettings {
    fn default() -> Self {
        MatchSettings {
            depth: 5,
            mate_depth: MATE_DEPTH,
        }
    }
}

impl MatchSettings {
    fn search_options(&self) -> SearchOptions {
        SearchOptions::depth(self.depth).with_mate_depth(self.mate_depth)
    }
}

/// Plays one full game: the opening is replayed move for move, then each
/// side's evaluator drives the search until neither side can move.
///
/// There is no randomness anywhere in here; identical inputs give the same
/// outcome bit for bit. An opening that does not replay legally is corrupt
/// data and comes back as an error.
pub fn play_match(
    coeffs_a: &Coefficients,
    coeffs_b: &Coefficients,
    opening: &Opening,
    assignment: SideAssignment,
    settings: &MatchSettings,
) -> Result<MatchOutcome> {
    let mut board = Board::new();
    let mut side = Side::Black;

    for coord in opening.moves()? {
        let (next, _) = board
            .try_apply(side, coord)
            .with_context(|| format!("opening {} is not playable", opening.name))?;
        board = next;
        side = -side;
    }

    let options = settings.search_options();
    let side_of_a = assignment.side_of_a();

    loop {
        if board.is_game_over() {
            break;
        }
        if !board.has_any_move(side) {
            side = -side;
            continue;
        }

        let coeffs = if side == side_of_a { coeffs_a } else { coeffs_b };
        let solution = solve_with(&board, side, options, coeffs);
        let (next, _) = board.try_apply(side, solution.best())?;
        board = next;
        side = -side;
    }

    let a = board.count(side_of_a);
    let b = board.count(-side_of_a);
    Ok(match a.cmp(&b) {
        std::cmp::Ordering::Greater => MatchOutcome::AWins,
        std::cmp::Ordering::Less => MatchOutcome::BWins,
        std::cmp::Ordering::Equal => MatchOutcome::Draw,
    })
}
