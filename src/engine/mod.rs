pub(crate) mod coeffs;
pub(crate) mod evaluator;
pub(crate) mod search;

use crate::othello::prelude::*;

pub mod prelude {
    pub use super::Engine;
    pub use super::coeffs::{Coefficients, Family};
    pub use super::evaluator::evaluate;
    pub use super::search::{SearchOptions, Solution, solve, solve_with};
}

use coeffs::Coefficients;
use search::{SearchOptions, Solution};

/// A playing agent: one coefficient set plus a search configuration.
pub struct Engine {
    coeffs: Coefficients,
    options: SearchOptions,
}

impl Engine {
    /// Produces an engine for the given coefficients.
    pub fn new(coeffs: Coefficients, options: SearchOptions) -> Engine {
        Engine { coeffs, options }
    }

    /// Generates the best move in the given position.
    pub fn generate_move(&self, board: &Board, side: Side) -> Solution {
        search::solve_with(board, side, self.options, &self.coeffs)
    }

    /// The coefficient set this engine plays with.
    pub fn coeffs(&self) -> &Coefficients {
        &self.coeffs
    }
}
