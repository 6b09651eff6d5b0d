use std::sync::atomic::{AtomicBool, Ordering};

use rand::prelude::*;
use rayon::prelude::*;

use super::eval::evaluate;
use crate::core::{Board, Coordinate, Disk};
use crate::logic::{apply_move, valid_moves};

/// 評価値をスケールしてからソフトマックスを取る
const SCORE_SCALE: f64 = 10.0;

/// Scores every valid move in parallel and draws one from a softmax over the scores.
///
/// Returns `None` when `side` has no valid move or `cancelled` is raised mid-search.
pub fn choose_move<R: Rng + ?Sized>(
    board: &Board,
    side: Disk,
    temperature: f64,
    cancelled: &AtomicBool,
    rng: &mut R,
) -> Option<Coordinate> {
    let moves = valid_moves(board, side);
    if moves.is_empty() {
        return None;
    }

    let scores: Option<Vec<f64>> = moves
        .par_iter()
        .map(|&at| {
            if cancelled.load(Ordering::Relaxed) {
                return None;
            }
            let next = apply_move(board, side, at)?;
            Some(evaluate(&next, side) as f64)
        })
        .collect();
    let scores = scores?;

    let probs = probabilities(&scores, temperature);
    let mut r = rng.gen::<f64>();
    for (i, &p) in probs.iter().enumerate() {
        if r < p {
            return Some(moves[i]);
        }
        r -= p;
    }
    moves.last().copied()
}

/// Softmax-like probability distribution from scores
fn probabilities(scores: &[f64], temperature: f64) -> Vec<f64> {
    if scores.is_empty() {
        return vec![];
    }

    let max_score = scores.iter().fold(f64::NEG_INFINITY, |a, &b| a.max(b));
    let exps: Vec<f64> = scores
        .iter()
        .map(|&s| ((s - max_score) / SCORE_SCALE / temperature).exp())
        .collect();
    let sum_exp: f64 = exps.iter().sum();

    exps.iter().map(|&e| e / sum_exp).collect()
}
