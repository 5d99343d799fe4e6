//! Perft node counting over push/pop.

use std::thread;

use crate::game_state::chess_types::{Color, GameResult};
use crate::game_state::game_state::ChessGame;
use crate::moves::chess_move::{ChessMove, MoveKind};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PerftCounts {
    pub nodes: usize,
    pub captures: usize,
    pub en_passant: usize,
    pub castles: usize,
    pub promotions: usize,
    pub checks: usize,
    pub checkmates: usize,
}

impl PerftCounts {
    fn merge(&mut self, rhs: PerftCounts) {
        self.nodes += rhs.nodes;
        self.captures += rhs.captures;
        self.en_passant += rhs.en_passant;
        self.castles += rhs.castles;
        self.promotions += rhs.promotions;
        self.checks += rhs.checks;
        self.checkmates += rhs.checkmates;
    }
}

/// Counts leaf nodes `depth` plies below the current position with `to_move`
/// on move. The game is left as it was found.
pub fn perft(game: &mut ChessGame, to_move: Color, depth: u8) -> PerftCounts {
    let mut counts = PerftCounts::default();
    if depth == 0 {
        counts.nodes = 1;
        return counts;
    }
    perft_recurse(game, to_move, depth, &mut counts);
    counts
}

/// Per-root-move node counts, in generation order.
pub fn perft_divide(game: &mut ChessGame, to_move: Color, depth: u8) -> Vec<(ChessMove, usize)> {
    let (_, root_moves) = game.generate_all_legal_moves_for_color(to_move);
    let mut out = Vec::with_capacity(root_moves.len());
    for mv in root_moves {
        game.push_move(mv);
        let nodes = perft(game, to_move.opposite(), depth.saturating_sub(1)).nodes;
        out.push((game.pop_move(), nodes));
    }
    out
}

/// Like `perft`, but each root move is explored on its own thread with a
/// private clone of the game.
pub fn perft_multi_threaded(game: &ChessGame, to_move: Color, depth: u8) -> PerftCounts {
    if depth <= 1 {
        return perft(&mut game.clone(), to_move, depth);
    }
    let (_, root_moves) = game.clone().generate_all_legal_moves_for_color(to_move);

    thread::scope(|scope| {
        let handles: Vec<_> = root_moves
            .into_iter()
            .map(|mv| {
                let mut local_game = game.clone();
                scope.spawn(move || {
                    local_game.push_move(mv);
                    perft(&mut local_game, to_move.opposite(), depth - 1)
                })
            })
            .collect();

        let mut total = PerftCounts::default();
        for handle in handles {
            match handle.join() {
                Ok(local) => total.merge(local),
                Err(panic) => std::panic::resume_unwind(panic),
            }
        }
        total
    })
}

fn perft_recurse(game: &mut ChessGame, to_move: Color, depth: u8, counts: &mut PerftCounts) {
    let (_, moves) = game.generate_all_legal_moves_for_color(to_move);
    if depth == 1 {
        for mv in moves {
            tally_leaf(game, to_move, mv, counts);
        }
        return;
    }
    for mv in moves {
        game.push_move(mv);
        perft_recurse(game, to_move.opposite(), depth - 1, counts);
        game.pop_move();
    }
}

fn tally_leaf(game: &mut ChessGame, mover: Color, mv: ChessMove, counts: &mut PerftCounts) {
    counts.nodes += 1;
    if mv.is_capture() {
        counts.captures += 1;
    }
    match mv.kind {
        MoveKind::EnPassant { .. } => counts.en_passant += 1,
        MoveKind::Castle { .. } => counts.castles += 1,
        MoveKind::Promotion { .. } | MoveKind::CapturePromotion { .. } => counts.promotions += 1,
        _ => {}
    }

    game.push_move(mv);
    let defender = mover.opposite();
    if game.is_color_in_check(defender) {
        counts.checks += 1;
        let (result, _) = game.generate_all_legal_moves_for_color(defender);
        if result == GameResult::CheckMate {
            counts.checkmates += 1;
        }
    }
    game.pop_move();
}
