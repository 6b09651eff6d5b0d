//! Terminal widgets bound to the game controller.
//!
//! [`Screen`] is the view: it receives every controller callback and keeps
//! the widget state that [`crate::display`] draws. [`ViewController`] relays
//! user gestures the other way.

pub mod input;
pub mod view_controller;

pub use input::{action_for_key, UiAction};
pub use view_controller::ViewController;

use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::core::{Board, Coordinate, Disk};
use crate::game::{
    BoardAnimationDelegate, Canceller, Completion, ConfirmCompletion, GameControllerDelegate,
    Message,
};
use crate::player::Player;

/// 手番・結果表示 (石アイコン + ラベル)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MessageView {
    pub disk: Option<Disk>,
    pub disk_visible: bool,
    pub text: String,
}

#[derive(Debug)]
pub enum Modal {
    ConfirmReset(ConfirmCompletion),
    Pass {
        side: Disk,
        completion: Completion,
        /// コントローラがパス表示を取り下げたら立つ
        withdrawn: Arc<AtomicBool>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalKind {
    ConfirmReset,
    Pass,
}

impl Modal {
    pub fn kind(&self) -> ModalKind {
        match self {
            Modal::ConfirmReset(_) => ModalKind::ConfirmReset,
            Modal::Pass { .. } => ModalKind::Pass,
        }
    }

    fn is_withdrawn(&self) -> bool {
        match self {
            Modal::ConfirmReset(_) => false,
            Modal::Pass { withdrawn, .. } => withdrawn.load(Ordering::SeqCst),
        }
    }
}

#[derive(Debug)]
struct PendingAnimation {
    disk: Option<Disk>,
    at: Coordinate,
    due: Instant,
    completion: Completion,
}

pub struct Screen {
    pub board: Board,
    pub cursor: Coordinate,
    pub message: MessageView,
    /// `Disk::index` 順、値は `Player::index`
    pub player_controls: [usize; 2],
    pub count_labels: [String; 2],
    pub activity_indicators: [bool; 2],
    modals: VecDeque<Modal>,
    animations: VecDeque<PendingAnimation>,
    flip_interval: Duration,
    revision: u64,
}

impl Screen {
    pub fn new(flip_interval: Duration) -> Self {
        let board = Board::default();
        let cursor = Coordinate::new(board.width / 2 - 1, board.height / 2 - 1);
        Screen {
            board,
            cursor,
            message: MessageView::default(),
            player_controls: [Player::Manual.index(); 2],
            count_labels: [String::new(), String::new()],
            activity_indicators: [false; 2],
            modals: VecDeque::new(),
            animations: VecDeque::new(),
            flip_interval,
            revision: 0,
        }
    }

    /// 描画が必要な変更のたびに増える
    pub fn revision(&self) -> u64 {
        self.revision
    }

    fn touch(&mut self) {
        self.revision = self.revision.wrapping_add(1);
    }

    pub fn modal(&self) -> Option<&Modal> {
        self.modals.iter().find(|m| !m.is_withdrawn())
    }

    /// 取り下げられたダイアログを捨てる (完了通知は送らない)
    fn discard_withdrawn(&mut self) {
        self.modals.retain(|m| !m.is_withdrawn());
    }

    pub fn modal_kind(&self) -> Option<ModalKind> {
        self.modal().map(Modal::kind)
    }

    /// 裏返し中のセル
    pub fn animating_cell(&self) -> Option<Coordinate> {
        self.animations.front().map(|a| a.at)
    }

    pub fn move_cursor(&mut self, dx: i32, dy: i32) {
        let x = (self.cursor.x as i32 + dx).clamp(0, self.board.width as i32 - 1);
        let y = (self.cursor.y as i32 + dy).clamp(0, self.board.height as i32 - 1);
        self.cursor = Coordinate::new(x as usize, y as usize);
        self.touch();
    }

    /// リセット確認への応答。確認ダイアログが出ていなければ false
    pub fn answer_reset(&mut self, confirmed: bool) -> bool {
        self.discard_withdrawn();
        if self.modal_kind() != Some(ModalKind::ConfirmReset) {
            return false;
        }
        if let Some(Modal::ConfirmReset(completion)) = self.modals.pop_front() {
            completion.respond(confirmed);
        }
        self.touch();
        true
    }

    pub fn dismiss_pass(&mut self) -> bool {
        self.discard_withdrawn();
        if self.modal_kind() != Some(ModalKind::Pass) {
            return false;
        }
        if let Some(Modal::Pass { completion, .. }) = self.modals.pop_front() {
            completion.complete();
        }
        self.touch();
        true
    }

    /// 期限の来たアニメーションを確定させる
    pub fn tick(&mut self, now: Instant) {
        while self.animations.front().is_some_and(|a| a.due <= now) {
            if let Some(animation) = self.animations.pop_front() {
                self.board
                    .set_disk(animation.disk, animation.at.x, animation.at.y);
                animation.completion.complete();
                self.touch();
            }
        }
    }

    /// 次のアニメーション期限 (イベント待ちのタイムアウトに使う)
    pub fn next_deadline(&self) -> Option<Instant> {
        self.animations.front().map(|a| a.due)
    }
}

impl GameControllerDelegate for Screen {
    fn update_message(&mut self, message: Message, _animated: bool) {
        match message {
            Message::Turn(side) => {
                self.message.disk = Some(side);
                self.message.disk_visible = true;
                self.message.text = "'s turn".to_string();
            }
            Message::Result {
                winner: Some(winner),
            } => {
                self.message.disk = Some(winner);
                self.message.disk_visible = true;
                self.message.text = " won".to_string();
            }
            Message::Result { winner: None } => {
                self.message.disk_visible = false;
                self.message.text = "Tied".to_string();
            }
        }
        self.touch();
    }

    fn update_disk_counts(&mut self, dark: usize, light: usize, _animated: bool) {
        self.count_labels[Disk::Dark.index()] = dark.to_string();
        self.count_labels[Disk::Light.index()] = light.to_string();
        self.touch();
    }

    fn update_player(&mut self, player: Player, side: Disk, _animated: bool) {
        self.player_controls[side.index()] = player.index();
        self.touch();
    }

    fn update_player_activity_indicator_visibility(
        &mut self,
        visible: bool,
        side: Disk,
        _animated: bool,
    ) {
        self.activity_indicators[side.index()] = visible;
        self.touch();
    }

    fn confirm_to_reset_game(&mut self, completion: ConfirmCompletion) {
        self.modals.push_back(Modal::ConfirmReset(completion));
        self.touch();
    }

    fn alert_pass(&mut self, side: Disk, completion: Completion) -> Canceller {
        let withdrawn = Arc::new(AtomicBool::new(false));
        self.modals.push_back(Modal::Pass {
            side,
            completion,
            withdrawn: withdrawn.clone(),
        });
        self.touch();
        Canceller::new(move || withdrawn.store(true, Ordering::SeqCst))
    }
}

impl BoardAnimationDelegate for Screen {
    fn update_disk(
        &mut self,
        disk: Option<Disk>,
        x: usize,
        y: usize,
        animated: bool,
        completion: Completion,
    ) -> Canceller {
        if animated {
            let due = Instant::now() + self.flip_interval;
            self.animations.push_back(PendingAnimation {
                disk,
                at: Coordinate::new(x, y),
                due,
                completion,
            });
        } else {
            // 同じセルの古いアニメーションは上書きされるので打ち切る
            let at = Coordinate::new(x, y);
            let (stale, kept) = std::mem::take(&mut self.animations)
                .into_iter()
                .partition::<VecDeque<_>, _>(|a| a.at == at);
            self.animations = kept;
            for animation in stale {
                animation.completion.complete();
            }
            self.board.set_disk(disk, x, y);
            completion.complete();
        }
        self.touch();
        // 端末の描画は途中で止められない
        Canceller::noop()
    }
}
