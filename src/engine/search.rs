//! Iterative-deepening alpha-beta negamax with an exact endgame solve.

use super::coeffs::Coefficients;
use super::evaluator::{disc_difference, evaluate};
use crate::othello::prelude::*;

/// Search configuration.
///
/// `mate_depth` is the empties threshold at or below which the search
/// escalates to a full-width exact solve; shrinking it trades endgame
/// perfection for speed in bulk self-play.
#[derive(Clone, Copy, Debug)]
pub struct SearchOptions {
    pub max_depth: u32,
    pub mate_depth: u32,
}

impl Default for SearchOptions {
    fn default() -> Self {
        SearchOptions {
            max_depth: 7,
            mate_depth: MATE_DEPTH,
        }
    }
}

impl SearchOptions {
    /// Options for a plain depth-bounded search with the default endgame
    /// escalation threshold.
    pub fn depth(max_depth: u32) -> SearchOptions {
        SearchOptions {
            max_depth,
            ..SearchOptions::default()
        }
    }

    /// Overrides the endgame escalation threshold.
    pub fn with_mate_depth(mut self, mate_depth: u32) -> SearchOptions {
        self.mate_depth = mate_depth;
        self
    }
}

/// The result of a root search: the principal variation (first element is
/// the move to play), its score, and the effective depth actually searched.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Solution {
    pub pv: Vec<Coord>,
    pub score: Score,
    pub depth: u32,
}

impl Solution {
    /// The move to play now.
    pub fn best(&self) -> Coord {
        self.pv[0]
    }
}

/// Search state scoped to one root call; nothing survives the call, so the
/// search is re-entrant by construction.
struct SearchContext<'a> {
    coeffs: &'a Coefficients,
    cache: FeatureCache,
    nodes: u64,
}

/// Solves a position to `max_depth` with the default endgame escalation.
pub fn solve(board: &Board, side: Side, max_depth: u32, coeffs: &Coefficients) -> Solution {
    solve_with(board, side, SearchOptions::depth(max_depth), coeffs)
}

/// Root search. Returns the pass sentinel when there is nothing to play,
/// short-circuits forced moves, and otherwise runs iterative deepening with
/// the previous iteration seeding the root move order. Near the end of the
/// game the depth grows to the empty count and the score becomes the exact
/// final disc difference.
pub fn solve_with(
    board: &Board,
    side: Side,
    options: SearchOptions,
    coeffs: &Coefficients,
) -> Solution {
    let mut ctx = SearchContext {
        coeffs,
        cache: FeatureCache::new(),
        nodes: 0,
    };

    let moves = board.valid_moves(side);
    if moves.is_empty() {
        let score = evaluate(board, side, coeffs, &mut ctx.cache);
        return Solution {
            pv: vec![Coord::PASS],
            score,
            depth: 0,
        };
    }
    if moves.len() == 1 {
        let next = board.apply(side, &moves[0]);
        let score = -evaluate(&next, -side, coeffs, &mut ctx.cache);
        return Solution {
            pv: vec![moves[0].coord],
            score,
            depth: 1,
        };
    }

    let empties = board.empty_count();
    if empties <= options.mate_depth {
        return solve_exact(board, side, moves, empties, &mut ctx);
    }

    // Depth cannot usefully exceed the remaining squares.
    let max_depth = options.max_depth.min(empties).max(1);

    let mut ranked = order_moves(moves)
        .into_iter()
        .map(|mv| (mv, 0 as Score))
        .collect::<Vec<_>>();
    let mut solution = Solution {
        pv: vec![ranked[0].0.coord],
        score: 0,
        depth: 0,
    };

    for depth in 1..=max_depth {
        let mut alpha = -SCORE_INF;
        let mut pv = vec![];

        for (mv, slot) in ranked.iter_mut() {
            let next = board.apply(side, mv);
            let mut child_pv = vec![];
            let value = -negamax(&next, -side, depth - 1, -SCORE_INF, -alpha, &mut ctx, &mut child_pv);
            *slot = value;
            // Strict improvement only: first-discovered wins ties.
            if value > alpha {
                alpha = value;
                pv.clear();
                pv.push(mv.coord);
                pv.extend(child_pv);
            }
        }

        // Seed the next iteration: best move first, the rest by the scores
        // they just achieved. The sort is stable, so ties keep their order.
        ranked.sort_by_key(|(_, score)| std::cmp::Reverse(*score));
        solution = Solution {
            pv,
            score: alpha,
            depth,
        };
    }

    log::debug!(
        "search depth {} visited {} nodes ({} cached positions)",
        solution.depth,
        ctx.nodes,
        ctx.cache.len()
    );
    solution
}

/// Heuristic negamax with fail-hard alpha-beta pruning. A side with no move
/// passes at the same depth; a double pass is terminal and the evaluator
/// supplies the decisive score.
fn negamax(
    board: &Board,
    side: Side,
    depth: u32,
    mut alpha: Score,
    beta: Score,
    ctx: &mut SearchContext<'_>,
    pv: &mut Vec<Coord>,
) -> Score {
    ctx.nodes += 1;

    if depth == 0 {
        return evaluate(board, side, ctx.coeffs, &mut ctx.cache);
    }

    let moves = board.valid_moves(side);
    if moves.is_empty() {
        if !board.has_any_move(-side) {
            return evaluate(board, side, ctx.coeffs, &mut ctx.cache);
        }
        let mut child_pv = vec![];
        let score = -negamax(board, -side, depth, -beta, -alpha, ctx, &mut child_pv);
        pv.clear();
        pv.push(Coord::PASS);
        pv.extend(child_pv);
        return score;
    }

    let mut best = -SCORE_INF;
    for mv in order_moves(moves) {
        let next = board.apply(side, &mv);
        let mut child_pv = vec![];
        let value = -negamax(&next, -side, depth - 1, -beta, -alpha, ctx, &mut child_pv);
        if value > best {
            best = value;
            pv.clear();
            pv.push(mv.coord);
            pv.extend(child_pv);
        }
        alpha = alpha.max(value);
        if alpha >= beta {
            break;
        }
    }
    best
}

/// Exact endgame root: depth equals the empty count, so every line ends at
/// a finished game and the score is the final disc margin itself.
fn solve_exact(
    board: &Board,
    side: Side,
    moves: Vec<Move>,
    empties: u32,
    ctx: &mut SearchContext<'_>,
) -> Solution {
    let mut alpha = -SCORE_INF;
    let mut pv = vec![];

    for mv in order_moves(moves) {
        let next = board.apply(side, &mv);
        let mut child_pv = vec![];
        let value = -negamax_exact(&next, -side, -SCORE_INF, -alpha, ctx, &mut child_pv);
        if value > alpha {
            alpha = value;
            pv.clear();
            pv.push(mv.coord);
            pv.extend(child_pv);
        }
    }

    log::debug!("exact solve of {empties} empties visited {} nodes", ctx.nodes);
    Solution {
        pv,
        score: alpha,
        depth: empties,
    }
}

/// Full-width negamax over disc differences only.
fn negamax_exact(
    board: &Board,
    side: Side,
    mut alpha: Score,
    beta: Score,
    ctx: &mut SearchContext<'_>,
    pv: &mut Vec<Coord>,
) -> Score {
    ctx.nodes += 1;

    let moves = board.valid_moves(side);
    if moves.is_empty() {
        if !board.has_any_move(-side) {
            return disc_difference(board, side);
        }
        let mut child_pv = vec![];
        let score = -negamax_exact(board, -side, -beta, -alpha, ctx, &mut child_pv);
        pv.clear();
        pv.push(Coord::PASS);
        pv.extend(child_pv);
        return score;
    }

    let mut best = -SCORE_INF;
    for mv in order_moves(moves) {
        let next = board.apply(side, &mv);
        let mut child_pv = vec![];
        let value = -negamax_exact(&next, -side, -beta, -alpha, ctx, &mut child_pv);
        if value > best {
            best = value;
            pv.clear();
            pv.push(mv.coord);
            pv.extend(child_pv);
        }
        alpha = alpha.max(value);
        if alpha >= beta {
            break;
        }
    }
    best
}

/// Static move order before any search information exists: corners first,
/// then by flips turned over, then by square. Stable, so tie-breaks are
/// deterministic.
fn order_moves(mut moves: Vec<Move>) -> Vec<Move> {
    moves.sort_by_key(|mv| (!mv.is_corner(), std::cmp::Reverse(mv.flip_count()), mv.coord));
    moves
}
