use std::collections::VecDeque;
use std::sync::mpsc::{self, Receiver, Sender};

use tracing::{debug, info, warn};

use super::delegate::{Completed, Outcome};
use super::{
    BoardAnimationDelegate, Canceller, Completion, ConfirmCompletion, GameControllerDelegate,
    GameSaver, GameSaverDelegate, GameState, MoveHandler, StrategyDelegate,
};
use crate::core::{Coordinate, Disk};
use crate::error::GameError;
use crate::logic::{count_disks, has_valid_move, place_disk, valid_moves};
use crate::player::Player;

/// 進行中の非同期処理
enum Phase {
    /// 人間の入力待ち、または終局
    Idle,
    Thinking {
        side: Disk,
        ticket: u64,
        canceller: Canceller,
    },
    Animating {
        side: Disk,
        ticket: u64,
        remaining: VecDeque<Coordinate>,
        canceller: Canceller,
    },
    AlertingPass {
        ticket: u64,
        canceller: Canceller,
    },
}

/// Owns the game state and turn sequencing.
///
/// Every observable change is pushed to the view through the delegate traits.
/// Asynchronous completions come back through an internal queue, which the
/// host drains with [`pump`](Self::pump) on the UI thread.
pub struct GameController<V, S, D> {
    view: V,
    strategy: S,
    saver: GameSaver<D>,
    state: GameState,
    started: bool,
    phase: Phase,
    reset_ticket: Option<u64>,
    next_ticket: u64,
    tx: Sender<Completed>,
    rx: Receiver<Completed>,
}

impl<V, S, D> GameController<V, S, D>
where
    V: GameControllerDelegate + BoardAnimationDelegate,
    S: StrategyDelegate,
    D: GameSaverDelegate,
{
    pub fn new(view: V, strategy: S, saver: GameSaver<D>) -> Self {
        let (tx, rx) = mpsc::channel();
        GameController {
            view,
            strategy,
            saver,
            state: GameState::new(),
            started: false,
            phase: Phase::Idle,
            reset_ticket: None,
            next_ticket: 0,
            tx,
            rx,
        }
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    pub fn strategy(&self) -> &S {
        &self.strategy
    }

    pub fn strategy_mut(&mut self) -> &mut S {
        &mut self.strategy
    }

    pub fn saver(&self) -> &GameSaver<D> {
        &self.saver
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// 保存済みのゲームを読み込んで (なければ新規に) 開始する
    pub fn start(&mut self) -> Result<(), GameError> {
        if self.started {
            return Err(GameError::AlreadyStarted);
        }
        self.started = true;

        self.state = match self.saver.load() {
            Ok(state) => {
                info!(turn = ?state.turn, "restored saved game");
                state
            }
            Err(e) if e.is_not_found() => {
                info!("no saved game, starting a new one");
                GameState::new()
            }
            Err(e) => {
                warn!(error = %e, "failed to load saved game, starting a new one");
                GameState::new()
            }
        };

        self.sync_view();
        self.begin_turn();
        Ok(())
    }

    /// リセット確認を出す。実際のリセットは確認の応答を受けてから
    pub fn reset(&mut self) {
        if !self.started {
            debug!("reset requested before start");
            return;
        }
        let ticket = self.issue_ticket();
        self.reset_ticket = Some(ticket);
        let completion = ConfirmCompletion::new(self.tx.clone(), ticket);
        self.view.confirm_to_reset_game(completion);
    }

    pub fn set_player(&mut self, player: Player, side: Disk) {
        if !self.started {
            debug!("player change requested before start");
            return;
        }
        if self.state.player(side) == player {
            return;
        }
        info!(side = %side, player = %player, "player mode changed");
        self.state.set_player(player, side);
        self.view.update_player(player, side, true);
        self.save();

        if self.state.turn != Some(side) {
            return;
        }
        match &self.phase {
            Phase::Thinking { .. } => {
                self.cancel_in_flight();
                self.wait_for_player();
            }
            Phase::Idle => self.wait_for_player(),
            // アニメーションやパス表示が終われば新しいモードで手番が始まる
            Phase::Animating { .. } | Phase::AlertingPass { .. } => {}
        }
    }

    /// 人間プレイヤーの着手
    pub fn place_disk_at(&mut self, x: usize, y: usize) -> Result<(), GameError> {
        if !self.started {
            return Err(GameError::NotStarted);
        }
        let side = self.state.turn.ok_or(GameError::GameOver)?;
        if self.state.player(side) != Player::Manual {
            return Err(GameError::NotManualTurn(side));
        }
        if !matches!(self.phase, Phase::Idle) || self.reset_ticket.is_some() {
            return Err(GameError::Busy);
        }
        self.place(side, x, y)
    }

    /// キューに溜まった完了通知をすべて処理する。処理した件数を返す
    pub fn pump(&mut self) -> usize {
        let mut handled = 0;
        while let Ok(completed) = self.rx.try_recv() {
            self.handle(completed);
            handled += 1;
        }
        handled
    }

    fn handle(&mut self, completed: Completed) {
        let Completed { ticket, outcome } = completed;
        match outcome {
            Outcome::Confirmed(confirmed) => {
                if self.reset_ticket != Some(ticket) {
                    debug!(ticket, "stale reset confirmation");
                    return;
                }
                self.reset_ticket = None;
                if confirmed {
                    self.reset_game();
                }
            }
            Outcome::Finished => {
                let (animating, alerting) = match &self.phase {
                    Phase::Animating { ticket: t, .. } => (*t == ticket, false),
                    Phase::AlertingPass { ticket: t, .. } => (false, *t == ticket),
                    _ => (false, false),
                };
                if animating {
                    self.animate_next();
                } else if alerting {
                    self.phase = Phase::Idle;
                    self.next_turn();
                }
            }
            Outcome::Move(at) => {
                let side = match &self.phase {
                    Phase::Thinking { side, ticket: t, .. } if *t == ticket => *side,
                    _ => {
                        debug!(ticket, "discarding stale strategy move");
                        return;
                    }
                };
                self.phase = Phase::Idle;
                self.view
                    .update_player_activity_indicator_visibility(false, side, true);

                if let Err(e) = self.place(side, at.x, at.y) {
                    warn!(error = %e, "strategy chose an invalid cell");
                    if let Some(fallback) = valid_moves(&self.state.board, side).first().copied() {
                        if let Err(e) = self.place(side, fallback.x, fallback.y) {
                            warn!(error = %e, at = %fallback, "fallback move failed");
                        }
                    }
                }
            }
        }
    }

    fn issue_ticket(&mut self) -> u64 {
        self.next_ticket += 1;
        self.next_ticket
    }

    fn place(&mut self, side: Disk, x: usize, y: usize) -> Result<(), GameError> {
        let flipped = place_disk(&mut self.state.board, side, x, y)?;
        debug!(side = %side, x, y, flipped = flipped.len(), "disk placed");

        let mut remaining = VecDeque::with_capacity(flipped.len() + 1);
        remaining.push_back(Coordinate::new(x, y));
        remaining.extend(flipped);

        self.phase = Phase::Animating {
            side,
            ticket: 0,
            remaining,
            canceller: Canceller::noop(),
        };
        self.animate_next();
        Ok(())
    }

    /// 置いた石、裏返る石の順に1枚ずつ描画する
    fn animate_next(&mut self) {
        let (side, next) = match &mut self.phase {
            Phase::Animating {
                side, remaining, ..
            } => (*side, remaining.pop_front()),
            _ => return,
        };

        let Some(at) = next else {
            self.phase = Phase::Idle;
            self.update_counts();
            self.next_turn();
            return;
        };

        let ticket = self.issue_ticket();
        let completion = Completion::new(self.tx.clone(), ticket);
        let canceller = self
            .view
            .update_disk(Some(side), at.x, at.y, true, completion);
        if let Phase::Animating {
            ticket: t,
            canceller: c,
            ..
        } = &mut self.phase
        {
            *t = ticket;
            *c = canceller;
        }
    }

    fn next_turn(&mut self) {
        if let Some(side) = self.state.turn {
            self.state.turn = Some(side.flipped());
        }
        self.begin_turn();
    }

    /// 手番のサイドが打てるか調べ、パス・終局を処理してから入力を待つ
    fn begin_turn(&mut self) {
        let Some(side) = self.state.turn else {
            self.phase = Phase::Idle;
            self.view.update_message(self.state.message(), true);
            return;
        };

        if has_valid_move(&self.state.board, side) {
            self.save();
            self.view.update_message(self.state.message(), true);
            self.wait_for_player();
        } else if has_valid_move(&self.state.board, side.flipped()) {
            info!(side = %side, "pass");
            self.save();
            self.view.update_message(self.state.message(), true);
            let ticket = self.issue_ticket();
            let completion = Completion::new(self.tx.clone(), ticket);
            let canceller = self.view.alert_pass(side, completion);
            self.phase = Phase::AlertingPass { ticket, canceller };
        } else {
            self.state.turn = None;
            self.phase = Phase::Idle;
            let message = self.state.message();
            info!(result = ?message, "game over");
            self.save();
            self.view.update_message(message, true);
        }
    }

    fn wait_for_player(&mut self) {
        let Some(side) = self.state.turn else {
            return;
        };
        if self.state.player(side) != Player::Computer {
            self.phase = Phase::Idle;
            return;
        }

        self.view
            .update_player_activity_indicator_visibility(true, side, true);
        let ticket = self.issue_ticket();
        let handler = MoveHandler::new(self.tx.clone(), ticket);
        let canceller = self.strategy.move_for(&self.state.board, side, handler);
        self.phase = Phase::Thinking {
            side,
            ticket,
            canceller,
        };
    }

    fn cancel_in_flight(&mut self) {
        match std::mem::replace(&mut self.phase, Phase::Idle) {
            Phase::Thinking {
                side,
                mut canceller,
                ..
            } => {
                canceller.cancel();
                self.view
                    .update_player_activity_indicator_visibility(false, side, true);
            }
            Phase::Animating { mut canceller, .. }
            | Phase::AlertingPass { mut canceller, .. } => canceller.cancel(),
            Phase::Idle => {}
        }
    }

    fn reset_game(&mut self) {
        info!("game reset");
        self.cancel_in_flight();
        self.state = GameState::new();
        self.sync_view();
        self.begin_turn();
    }

    /// 状態全体をアニメーションなしでビューに反映する
    fn sync_view(&mut self) {
        let cells: Vec<_> = self
            .state
            .board
            .coordinates()
            .map(|c| (c, self.state.board.disk_at(c.x, c.y)))
            .collect();
        for (at, disk) in cells {
            // 完了通知は追跡しない (ticket 0 はどのフェーズにも一致しない)
            let completion = Completion::new(self.tx.clone(), 0);
            self.view.update_disk(disk, at.x, at.y, false, completion);
        }

        self.view.update_message(self.state.message(), false);
        self.update_counts_with(false);
        for side in Disk::SIDES {
            self.view.update_player(self.state.player(side), side, false);
            self.view
                .update_player_activity_indicator_visibility(false, side, false);
        }
    }

    fn update_counts(&mut self) {
        self.update_counts_with(true);
    }

    fn update_counts_with(&mut self, animated: bool) {
        let dark = count_disks(&self.state.board, Disk::Dark);
        let light = count_disks(&self.state.board, Disk::Light);
        self.view.update_disk_counts(dark, light, animated);
    }

    fn save(&mut self) {
        if let Err(e) = self.saver.save(&self.state) {
            warn!(error = %e, "failed to save game");
        }
    }
}
