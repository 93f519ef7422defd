/*
 *  An implementation of 8x8 Othello in Rust.
 */

pub(crate) mod board;
pub(crate) mod consts;
pub mod coords;
pub mod notation;

pub mod prelude {
    pub(crate) use crate::utils::prelude::*;

    pub use super::{
        board::{Board, Cell, Cells, FeatureCache, Move, PrecomputedFeatures},
        consts::*,
        coords::Coord,
        notation::HistoryString,
    };
}
