//! Phase-weighted linear evaluation over the precomputed feature balances.

use super::coeffs::Coefficients;
use crate::othello::prelude::*;

/// Scores a position for `side`: the weighted sum of the six feature
/// balances under the weights of the current phase. Terminal positions
/// collapse to a decisive score that dominates any weighted sum, so a seen
/// game end always outranks a heuristic promise.
///
/// Pure in `(board, side, coeffs)`; the cache only memoizes.
pub fn evaluate(
    board: &Board,
    side: Side,
    coeffs: &Coefficients,
    cache: &mut FeatureCache,
) -> Score {
    let features = cache.fetch(board);

    if features.game_over {
        return terminal_score(&features, side);
    }

    let phase = Phase::from_disc_count(features.black_pieces + features.white_pieces).index();
    let view = side.perspective();

    view * (features.material * coeffs.material_coeffs[phase]
        + features.mobility * coeffs.mobility_coeffs[phase]
        + features.corners * coeffs.corners_coeffs[phase]
        + features.parity * coeffs.parity_coeffs[phase]
        + features.stability * coeffs.stability_coeffs[phase]
        + features.frontier * coeffs.frontier_coeffs[phase])
}

/// The decisive score of a finished game, from `side`'s point of view.
/// Winning by more is better; losing by less is better.
pub fn terminal_score(features: &PrecomputedFeatures, side: Side) -> Score {
    let diff = side.perspective() * (features.black_pieces as Score - features.white_pieces as Score);
    match diff.signum() {
        1 => SCORE_WIN + diff,
        -1 => SCORE_LOSS + diff,
        _ => 0,
    }
}

/// The raw disc difference for `side`; the endgame solver's leaf value.
pub fn disc_difference(board: &Board, side: Side) -> Score {
    side.perspective() * (board.count(Side::Black) as Score - board.count(Side::White) as Score)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn evaluation_is_antisymmetric_at_the_start() {
        let board = Board::new();
        let coeffs = Coefficients::v1();
        let mut cache = FeatureCache::new();
        let black = evaluate(&board, Side::Black, &coeffs, &mut cache);
        let white = evaluate(&board, Side::White, &coeffs, &mut cache);
        assert_eq!(black, -white);
    }

    #[test]
    fn evaluation_is_pure() {
        let board = Board::new();
        let coeffs = Coefficients::v1();
        let mut first_cache = FeatureCache::new();
        let mut second_cache = FeatureCache::new();
        let first = evaluate(&board, Side::Black, &coeffs, &mut first_cache);
        let second = evaluate(&board, Side::Black, &coeffs, &mut second_cache);
        assert_eq!(first, second);
        // A warm cache changes nothing either.
        assert_eq!(evaluate(&board, Side::Black, &coeffs, &mut first_cache), first);
    }

    #[test]
    fn terminal_scores_dominate_heuristics() {
        // Black wins 40-24 on a full board.
        let mut board = Board::empty();
        for index in 0..64u32 {
            let side = if index < 40 { Side::Black } else { Side::White };
            board.place(side, Coord::from_index(index));
        }
        let coeffs = Coefficients::v1();
        let mut cache = FeatureCache::new();
        let score = evaluate(&board, Side::Black, &coeffs, &mut cache);
        assert_eq!(score, SCORE_WIN + 16);
        assert_eq!(evaluate(&board, Side::White, &coeffs, &mut cache), SCORE_LOSS - 16);
        // Any non-terminal linear combination stays far below.
        assert!(score > 6 * 5000 * 64);
    }

    #[test]
    fn drawn_terminal_is_zero() {
        let mut board = Board::empty();
        for index in 0..64u32 {
            let side = if index % 2 == 0 { Side::Black } else { Side::White };
            board.place(side, Coord::from_index(index));
        }
        let coeffs = Coefficients::v1();
        let mut cache = FeatureCache::new();
        assert_eq!(evaluate(&board, Side::Black, &coeffs, &mut cache), 0);
    }

    #[test]
    fn corner_weight_moves_the_score() {
        let mut board = Board::new();
        board.place(Side::Black, "a1".parse().unwrap());
        let mut cache = FeatureCache::new();
        let flat = evaluate(&board, Side::Black, &Coefficients::uniform("flat"), &mut cache);
        let tuned = evaluate(&board, Side::Black, &Coefficients::v1(), &mut cache);
        // v1 weights corners far above the flat baseline.
        assert!(tuned > flat);
    }
}
