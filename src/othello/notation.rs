use regex::Regex;

use crate::othello::prelude::*;

/// A parsed move history: concatenated algebraic moves such as `c4c3d3`.
///
/// Caveat: the history need only be syntactically valid; it is possible to
/// receive a history in which some move is not a legal continuation of the
/// position reached by the moves before it. To ensure a history is actually
/// playable, its moves should be tried iteratively against the board.
#[derive(Clone, Debug)]
pub struct HistoryString {
    pub repr: String,
    pub moves: Vec<Coord>,
}

impl std::str::FromStr for HistoryString {
    type Err = Error;
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let pattern = Regex::new("^(?:[a-h][1-8])*$")?;
        if !pattern.is_match(s) {
            return Err(anyhow!("could not parse move history {s}"));
        }

        let mut moves = vec![];
        let chars = s.chars().collect::<Vec<char>>();
        for pair in chars.chunks(2) {
            let token = pair.iter().collect::<String>();
            moves.push(token.parse::<Coord>()?);
        }

        Ok(HistoryString { repr: s.to_owned(), moves })
    }
}
