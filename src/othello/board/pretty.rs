use super::Board;
use crate::othello::prelude::*;

impl std::fmt::Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "  a b c d e f g h")?;
        for row in 0..BOARD_SIZE as i8 {
            write!(f, "{} ", row + 1)?;
            for col in 0..BOARD_SIZE as i8 {
                let glyph = match self.disc_at(Coord::new(row, col)) {
                    Some(side) => side.notate(),
                    None => ".".into(),
                };
                write!(f, "{glyph} ")?;
            }
            writeln!(f)?;
        }
        write!(
            f,
            "X {} - O {}",
            self.count(Side::Black),
            self.count(Side::White)
        )
    }
}
