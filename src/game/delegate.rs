//! Callback surface between the game controller and its collaborators.
//!
//! The controller never calls back into itself from a delegate. Completion
//! handles push onto the controller's queue instead, and the queue is drained
//! on the UI thread by [`GameController::pump`](super::GameController::pump).

use std::sync::mpsc::Sender;

use super::{Canceller, Message};
use crate::core::{Board, Coordinate, Disk};
use crate::error::SaveError;
use crate::player::Player;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Outcome {
    Finished,
    Confirmed(bool),
    Move(Coordinate),
}

/// A completion as it arrives on the controller's queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Completed {
    pub ticket: u64,
    pub outcome: Outcome,
}

/// One-shot handle for "this update or prompt has finished".
#[derive(Debug)]
pub struct Completion {
    tx: Sender<Completed>,
    ticket: u64,
}

impl Completion {
    pub(crate) fn new(tx: Sender<Completed>, ticket: u64) -> Self {
        Completion { tx, ticket }
    }

    pub fn complete(self) {
        // 受信側が既に無い場合 (終了処理中) は捨てる
        let _ = self.tx.send(Completed {
            ticket: self.ticket,
            outcome: Outcome::Finished,
        });
    }
}

/// One-shot handle for the answer to the reset confirmation.
#[derive(Debug)]
pub struct ConfirmCompletion {
    tx: Sender<Completed>,
    ticket: u64,
}

impl ConfirmCompletion {
    pub(crate) fn new(tx: Sender<Completed>, ticket: u64) -> Self {
        ConfirmCompletion { tx, ticket }
    }

    pub fn respond(self, confirmed: bool) {
        let _ = self.tx.send(Completed {
            ticket: self.ticket,
            outcome: Outcome::Confirmed(confirmed),
        });
    }
}

/// One-shot handle a strategy uses to hand back its chosen cell.
///
/// `Send`, so searches running off the UI thread can deliver through it.
#[derive(Debug)]
pub struct MoveHandler {
    tx: Sender<Completed>,
    ticket: u64,
}

impl MoveHandler {
    pub(crate) fn new(tx: Sender<Completed>, ticket: u64) -> Self {
        MoveHandler { tx, ticket }
    }

    pub fn deliver(self, x: usize, y: usize) {
        let _ = self.tx.send(Completed {
            ticket: self.ticket,
            outcome: Outcome::Move(Coordinate::new(x, y)),
        });
    }
}

/// Non-board view updates requested by the controller.
pub trait GameControllerDelegate {
    fn update_message(&mut self, message: Message, animated: bool);
    fn update_disk_counts(&mut self, dark: usize, light: usize, animated: bool);
    fn update_player(&mut self, player: Player, side: Disk, animated: bool);
    fn update_player_activity_indicator_visibility(
        &mut self,
        visible: bool,
        side: Disk,
        animated: bool,
    );
    fn confirm_to_reset_game(&mut self, completion: ConfirmCompletion);
    /// Shows the pass notice. Cancelling the returned token withdraws it.
    fn alert_pass(&mut self, side: Disk, completion: Completion) -> Canceller;
}

/// Per-cell board updates.
pub trait BoardAnimationDelegate {
    /// Sets one cell. `completion` must be invoked once the update is visible.
    fn update_disk(
        &mut self,
        disk: Option<Disk>,
        x: usize,
        y: usize,
        animated: bool,
        completion: Completion,
    ) -> Canceller;
}

/// Move search for computer-controlled sides.
pub trait StrategyDelegate {
    fn move_for(&mut self, board: &Board, side: Disk, handler: MoveHandler) -> Canceller;
}

/// Raw storage for the save blob. The blob's format belongs to [`GameSaver`](super::GameSaver).
pub trait GameSaverDelegate {
    fn write_data(&mut self, data: &[u8]) -> Result<(), SaveError>;
    fn read_data(&self) -> Result<Vec<u8>, SaveError>;
}
