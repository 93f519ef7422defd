//! Interactive move protocol.
//!
//! One request per line: a concatenated algebraic move history. The reply is
//! a single line holding the engine's next move for the side to move, or
//! `pass` when that side has nothing to play. While the history still lies
//! on a known book line, the reply comes from the book instead of a search.

mod options;

pub use options::ServeOptions;

use crate::book::match_opening;
use crate::engine::Engine;
use crate::engine::prelude::*;
use crate::othello::prelude::*;

pub struct MoveServer {
    engine: Engine,
    use_book: bool,
}

impl MoveServer {
    /// Produces a server for the configured baseline. An unknown baseline
    /// name is fatal at startup.
    pub fn new(options: &ServeOptions) -> Result<MoveServer> {
        let coeffs = Coefficients::baseline(&options.base)?;
        let search = SearchOptions::depth(options.depth).with_mate_depth(options.mate_depth);
        Ok(MoveServer {
            engine: Engine::new(coeffs, search),
            use_book: !options.no_book,
        })
    }

    /// Serves until EOF or the literal command `exit`. Ill-formed input is
    /// reported on the output stream and the loop keeps going.
    pub fn run(&mut self) -> Result<()> {
        loop {
            let mut line = String::new();
            if std::io::stdin().read_line(&mut line)? == 0 {
                return Ok(());
            }
            let input = line.trim();
            if input == "exit" {
                return Ok(());
            }

            match self.respond(input) {
                Ok(reply) => {
                    log::debug!("history {input:?} answered with {reply}");
                    println!("{reply}");
                }
                Err(err) => {
                    log::warn!("encountered recoverable error:\n{err}");
                    println!("err {err}");
                }
            }
        }
    }

    /// Computes the reply for one history line.
    pub fn respond(&self, input: &str) -> Result<String> {
        let history = input.parse::<HistoryString>()?;
        let (board, side) = replay(&history)?;

        if self.use_book {
            if let Some(coord) = book_continuation(input) {
                return Ok(coord.notate());
            }
        }

        let solution = self.engine.generate_move(&board, side);
        Ok(solution.best().notate())
    }
}

/// Replays a history from the starting position, Black first, passing
/// automatically for a side with no legal move. Returns the final board and
/// the side to move next.
pub fn replay(history: &HistoryString) -> Result<(Board, Side)> {
    let mut board = Board::new();
    let mut side = Side::Black;

    for &coord in &history.moves {
        if !board.has_any_move(side) {
            side = -side;
        }
        let (next, _) = board
            .try_apply(side, coord)
            .with_context(|| format!("history {} is not playable", history.repr))?;
        board = next;
        side = -side;
    }

    if !board.has_any_move(side) && !board.is_game_over() {
        side = -side;
    }
    Ok((board, side))
}

/// The next move of the first book line extending this history, if any.
fn book_continuation(history: &str) -> Option<Coord> {
    match_opening(history)
        .into_iter()
        .find(|opening| opening.transcript.len() > history.len())
        .and_then(|opening| opening.transcript[history.len()..][..2].parse::<Coord>().ok())
}
