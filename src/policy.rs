//! Opponent move selection: random, heuristic, and perfect-play strategies.
//!
//! Every strategy is a pure function of the board snapshot and the
//! player it moves for; none holds state between calls. A full board
//! yields `None` rather than an error.

use crate::board::{Board, CENTER, CORNERS, EDGES, Player};
use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// Move-selection strategy for a computer-controlled side.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, strum::EnumIter,
)]
#[serde(rename_all = "camelCase")]
pub enum Strategy {
    /// Uniform choice over the open squares.
    #[default]
    Random,
    /// Ordered rule chain: win, block, center, corner, edge.
    Heuristic,
    /// Exhaustive adversarial search; never loses.
    Optimal,
}

impl Strategy {
    /// Returns the display label for this option.
    pub fn label(self) -> &'static str {
        match self {
            Self::Random => "Random",
            Self::Heuristic => "Heuristic",
            Self::Optimal => "Optimal",
        }
    }
}

/// Selects a move for `player` on `board` using `strategy`.
///
/// Returns `None` when no moves remain. Only [`Strategy::Random`]
/// consumes randomness; the other strategies are deterministic.
#[instrument(skip(board, rng))]
pub fn select_move<R: Rng + ?Sized>(
    strategy: Strategy,
    board: &Board,
    player: Player,
    rng: &mut R,
) -> Option<usize> {
    let chosen = match strategy {
        Strategy::Random => random_move(board, rng),
        Strategy::Heuristic => heuristic_move(board, player),
        Strategy::Optimal => optimal_move(board, player),
    };
    if let Some(position) = chosen {
        debug!(?strategy, %player, position, "computer chose move");
    }
    chosen
}

/// Uniform pick over the open squares.
fn random_move<R: Rng + ?Sized>(board: &Board, rng: &mut R) -> Option<usize> {
    board.available_moves().choose(rng).copied()
}

/// First open square where `player` completes a line, in ascending
/// index order.
fn winning_move(board: &Board, player: Player) -> Option<usize> {
    board.available_moves().into_iter().find(|&pos| {
        board
            .with_move(pos, player)
            .map(|next| next.has_won(player))
            .unwrap_or(false)
    })
}

/// Ordered rule chain; the first matching rule wins.
fn heuristic_move(board: &Board, player: Player) -> Option<usize> {
    let moves = board.available_moves();
    if moves.is_empty() {
        return None;
    }
    // 1. Take an immediate win.
    if let Some(pos) = winning_move(board, player) {
        return Some(pos);
    }
    // 2. Block the opponent's immediate win.
    if let Some(pos) = winning_move(board, player.opponent()) {
        return Some(pos);
    }
    // 3. Center.
    if board.is_empty(CENTER) {
        return Some(CENTER);
    }
    // 4. Lowest open corner.
    if let Some(&pos) = CORNERS.iter().find(|&&pos| board.is_empty(pos)) {
        return Some(pos);
    }
    // 5. Lowest open edge, then whatever is left.
    if let Some(&pos) = EDGES.iter().find(|&&pos| board.is_empty(pos)) {
        return Some(pos);
    }
    moves.first().copied()
}

/// Exhaustive search: scores every candidate move by full adversarial
/// continuation and keeps the best one. Strictly-greater comparisons
/// only, so ties resolve to the lowest index.
fn optimal_move(board: &Board, player: Player) -> Option<usize> {
    let mut best: Option<(usize, i32)> = None;
    for pos in board.available_moves() {
        let Ok(next) = board.with_move(pos, player) else {
            continue;
        };
        let score = minimax(&next, player, player.opponent(), 1);
        match best {
            Some((_, best_score)) if score <= best_score => {}
            _ => best = Some((pos, score)),
        }
    }
    best.map(|(pos, _)| pos)
}

/// Minimax over board copies, alternating the mover each ply.
///
/// Terminal scores are depth-biased: `10 - depth` for a win by the
/// searching player, `depth - 10` for a loss, `0` for a full board.
/// `depth` is counted in plies from the candidate move, starting at 1
/// for the first evaluated position, so faster wins and slower losses
/// score higher. No pruning; the nine-cell state space does not need it.
fn minimax(board: &Board, me: Player, to_move: Player, depth: i32) -> i32 {
    if board.has_won(me) {
        return 10 - depth;
    }
    if board.has_won(me.opponent()) {
        return depth - 10;
    }
    let moves = board.available_moves();
    if moves.is_empty() {
        return 0;
    }

    let maximizing = to_move == me;
    let mut best = if maximizing { i32::MIN } else { i32::MAX };
    for pos in moves {
        let Ok(next) = board.with_move(pos, to_move) else {
            continue;
        };
        let score = minimax(&next, me, to_move.opponent(), depth + 1);
        best = if maximizing {
            best.max(score)
        } else {
            best.min(score)
        };
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board_from(marks: &[(usize, Player)]) -> Board {
        let mut board = Board::new();
        for &(pos, player) in marks {
            board.place(pos, player).unwrap();
        }
        board
    }

    #[test]
    fn test_minimax_prefers_faster_win() {
        // X to move with two winning routes: an immediate win at 2 must
        // outscore lines that win later.
        let board = board_from(&[
            (0, Player::X),
            (1, Player::X),
            (3, Player::O),
            (4, Player::O),
        ]);
        let immediate = board.with_move(2, Player::X).unwrap();
        assert_eq!(minimax(&immediate, Player::X, Player::O, 1), 9);
    }

    #[test]
    fn test_minimax_sees_forced_loss() {
        // O just played to threaten two lines; any X reply loses.
        let board = board_from(&[
            (0, Player::O),
            (4, Player::O),
            (1, Player::X),
            (5, Player::X),
        ]);
        // O to move can reach 8 completing the 0-4-8 diagonal.
        let score = minimax(&board, Player::O, Player::O, 1);
        assert!(score > 0, "O should see a winning continuation");
    }

    #[test]
    fn test_winning_move_finds_lowest_completion() {
        let board = board_from(&[(3, Player::O), (4, Player::O)]);
        assert_eq!(winning_move(&board, Player::O), Some(5));
        assert_eq!(winning_move(&board, Player::X), None);
    }
}
