use std::ops::Neg;

use crate::utils::prelude::*;

pub const BOARD_SIZE: usize = 8;
pub const NUM_SQUARES: usize = 64;

/// Empties-remaining threshold at or below which the search abandons the
/// heuristic evaluation and solves the endgame exactly.
pub const MATE_DEPTH: u32 = 21;

/// Evaluation score, positive in favour of the side being evaluated.
pub type Score = i32;

/// Saturation bound for alpha-beta windows.
pub const SCORE_INF: Score = 2_000_000_000;

/// Base magnitude of a decided game. Any weighted evaluation stays well
/// below this, so terminal nodes always dominate at the root.
pub const SCORE_WIN: Score = 1_000_000_000;
pub const SCORE_LOSS: Score = -SCORE_WIN;

// A disc colour.
#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Side {
    Black = 0,
    White = 1,
}

impl Side {
    /// Both sides, Black first since Black opens the game.
    pub fn all() -> [Side; 2] {
        [Side::Black, Side::White]
    }

    /// Notates the side.
    pub fn notate(&self) -> String {
        match self {
            Side::Black => "X",
            Side::White => "O",
        }
        .into()
    }

    /// The given side's scoring factor.
    /// Choosing 1 and -1 allows for branchless negamax.
    pub fn perspective(&self) -> Score {
        match self {
            Side::Black => 1,
            Side::White => -1,
        }
    }

    /// Parses into a side.
    pub fn parse(s: &str) -> Result<Option<Side>> {
        match s {
            "x" | "X" | "b" | "B" => Ok(Some(Side::Black)),
            "o" | "O" | "w" | "W" => Ok(Some(Side::White)),
            "_" | "-" | "." => Ok(None),
            _ => Err(anyhow!("invalid notation {s} for side")),
        }
    }
}

impl Neg for Side {
    type Output = Side;
    fn neg(self) -> Self::Output {
        match self {
            Side::Black => Side::White,
            Side::White => Side::Black,
        }
    }
}

/// Game phase, derived from the number of discs on the board.
#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum Phase {
    Early = 0,
    Mid = 1,
    Late = 2,
}

impl Phase {
    /// The boundaries run on discs placed, not on empties.
    pub fn from_disc_count(discs: u32) -> Phase {
        match discs {
            0..=19 => Phase::Early,
            20..=58 => Phase::Mid,
            _ => Phase::Late,
        }
    }

    /// Index into a per-phase weight array.
    pub fn index(&self) -> usize {
        *self as usize
    }
}
