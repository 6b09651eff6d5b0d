use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::runtime::Handle;
use tracing::debug;

use super::config::AiConfig;
use super::weighted::choose_move;
use crate::core::{Board, Disk};
use crate::game::{Canceller, MoveHandler, StrategyDelegate};

const CANCEL_POLL_INTERVAL: Duration = Duration::from_millis(20);

/// Runs [`choose_move`] on tokio's blocking pool and delivers the result
/// through the controller's [`MoveHandler`].
pub struct ComputerStrategy {
    config: AiConfig,
    runtime: Handle,
}

impl ComputerStrategy {
    pub fn new(config: AiConfig, runtime: Handle) -> Self {
        ComputerStrategy { config, runtime }
    }
}

impl StrategyDelegate for ComputerStrategy {
    fn move_for(&mut self, board: &Board, side: Disk, handler: MoveHandler) -> Canceller {
        let cancelled = Arc::new(AtomicBool::new(false));
        let flag = cancelled.clone();
        let board = board.clone();
        let config = self.config.clone();

        self.runtime.spawn_blocking(move || {
            let started = Instant::now();
            let chosen = choose_move(
                &board,
                side,
                config.temperature,
                &flag,
                &mut rand::thread_rng(),
            );

            // 思考中表示のための待ち時間。取り消されたら即座に抜ける
            let min_think = Duration::from_millis(config.min_think_ms);
            while !flag.load(Ordering::SeqCst) {
                let remaining = min_think.saturating_sub(started.elapsed());
                if remaining.is_zero() {
                    break;
                }
                std::thread::sleep(remaining.min(CANCEL_POLL_INTERVAL));
            }

            if flag.load(Ordering::SeqCst) {
                debug!(side = %side, "search cancelled");
                return;
            }
            match chosen {
                Some(at) => {
                    debug!(
                        side = %side,
                        x = at.x,
                        y = at.y,
                        elapsed_ms = started.elapsed().as_millis() as u64,
                        "move chosen"
                    );
                    handler.deliver(at.x, at.y);
                }
                None => debug!(side = %side, "no valid move to choose"),
            }
        });

        Canceller::new(move || cancelled.store(true, Ordering::SeqCst))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::delegate::{Completed, Outcome};
    use crate::logic::valid_moves;
    use std::sync::mpsc;

    fn strategy(min_think_ms: u64) -> ComputerStrategy {
        ComputerStrategy::new(
            AiConfig {
                min_think_ms,
                temperature: 0.35,
            },
            Handle::current(),
        )
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_delivers_valid_move() {
        let (tx, rx) = mpsc::channel();
        let board = Board::initial();
        let _canceller = strategy(0).move_for(&board, Disk::Dark, MoveHandler::new(tx, 3));

        let Completed { ticket, outcome } = rx.recv_timeout(Duration::from_secs(5)).unwrap();
        assert_eq!(ticket, 3);
        match outcome {
            Outcome::Move(at) => assert!(valid_moves(&board, Disk::Dark).contains(&at)),
            other => panic!("unexpected outcome {:?}", other),
        }
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_cancel_suppresses_delivery() {
        let (tx, rx) = mpsc::channel();
        let mut canceller =
            strategy(200).move_for(&Board::initial(), Disk::Light, MoveHandler::new(tx, 1));
        canceller.cancel();

        assert!(rx.recv_timeout(Duration::from_millis(600)).is_err());
    }
}
