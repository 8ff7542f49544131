use crate::{Game, GameMove, PieceType};
use std::time::Instant;

#[derive(Debug, Clone, Default)]
pub struct PerftResult {
    pub nodes: u64,
    pub captures: u64,
    pub en_passant: u64,
    pub castles: u64,
    pub promotions: u64,
    pub checks: u64,
    pub checkmates: u64,
    pub time_ms: u128,
}

impl PerftResult {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn nodes_per_second(&self) -> u64 {
        if self.time_ms == 0 {
            return 0;
        }
        (self.nodes * 1000) / (self.time_ms as u64)
    }
}

/// Every position reachable in one full turn, promotions expanded to each
/// choice.
fn successors(game: &Game) -> Vec<(GameMove, Game)> {
    let mut children = Vec::new();

    for (from, to) in game.legal_moves_for_current_player() {
        let mut child = game.clone();
        let mv = match child.commit_move(from, to) {
            Ok(mv) => mv,
            Err(_) => continue,
        };

        if child.pending_promotion().is_none() {
            children.push((mv, child));
            continue;
        }

        for kind in PieceType::PROMOTION_CHOICES {
            let mut promoted = child.clone();
            if let Ok(record) = promoted.promote(kind) {
                children.push((record, promoted));
            }
        }
    }

    children
}

fn quiet(game: &Game) -> Game {
    let mut copy = game.clone();
    copy.silence_logging();
    copy
}

/// Count leaf positions `depth` plies below `game`.
pub fn perft(game: &Game, depth: u32) -> u64 {
    perft_inner(&quiet(game), depth)
}

fn perft_inner(game: &Game, depth: u32) -> u64 {
    if depth == 0 {
        return 1;
    }

    let children = successors(game);
    if depth == 1 {
        return children.len() as u64;
    }

    children.iter().map(|(_, child)| perft_inner(child, depth - 1)).sum()
}

/// Detailed perft that tracks different move types
pub fn perft_detailed(game: &Game, depth: u32) -> PerftResult {
    let start_time = Instant::now();
    let mut result = perft_detailed_inner(&quiet(game), depth);
    result.time_ms = start_time.elapsed().as_millis();
    result
}

fn perft_detailed_inner(game: &Game, depth: u32) -> PerftResult {
    let mut result = PerftResult::new();

    if depth == 0 {
        result.nodes = 1;
        return result;
    }

    for (mv, child) in successors(game) {
        // Count move types at depth 1
        if depth == 1 {
            result.nodes += 1;
            if mv.is_capture() {
                result.captures += 1;
            }
            if mv.is_en_passant {
                result.en_passant += 1;
            }
            if mv.is_castling {
                result.castles += 1;
            }
            if mv.promotion.is_some() {
                result.promotions += 1;
            }
            if child.is_king_in_check(child.current_player()) {
                result.checks += 1;
            }
            if child.board().is_checkmate(child.current_player()) {
                result.checkmates += 1;
            }
        } else {
            let sub_result = perft_detailed_inner(&child, depth - 1);
            result.nodes += sub_result.nodes;
            result.captures += sub_result.captures;
            result.en_passant += sub_result.en_passant;
            result.castles += sub_result.castles;
            result.promotions += sub_result.promotions;
            result.checks += sub_result.checks;
            result.checkmates += sub_result.checkmates;
        }
    }

    result
}

/// Divide perft - per-move breakdown, largest subtree first
pub fn perft_divide(game: &Game, depth: u32) -> Vec<(GameMove, u64)> {
    if depth == 0 {
        return Vec::new();
    }

    let mut results: Vec<(GameMove, u64)> = successors(&quiet(game))
        .into_iter()
        .map(|(mv, child)| {
            let nodes = perft_inner(&child, depth - 1);
            (mv, nodes)
        })
        .collect();

    results.sort_by(|a, b| b.1.cmp(&a.1));
    results
}

/// Run a single perft test, printing the outcome
pub fn run_perft_test(game: &Game, depth: u32, expected: u64) -> bool {
    println!("Running perft depth {} (expected: {})", depth, expected);

    let start_time = Instant::now();
    let nodes = perft(game, depth);
    let elapsed = start_time.elapsed();

    let success = nodes == expected;
    let status = if success { "PASS" } else { "FAIL" };

    println!(
        "{} - Depth {}: {} nodes in {:.3}s ({:.0} nodes/sec)",
        status,
        depth,
        nodes,
        elapsed.as_secs_f64(),
        nodes as f64 / elapsed.as_secs_f64().max(f64::EPSILON)
    );

    if !success {
        println!("Expected: {}, Got: {}", expected, nodes);
    }

    success
}
