use std::ops::ControlFlow;
use std::time::Instant;

use tracing::debug;

use super::{Screen, UiAction};
use crate::core::Disk;
use crate::game::{GameController, GameSaver, GameSaverDelegate, StrategyDelegate};
use crate::player::Player;

/// Relays user gestures on the [`Screen`] to the game controller.
///
/// No validation happens here: the controller decides what is legal and any
/// error it returns is dropped.
pub struct ViewController<S, D> {
    controller: GameController<Screen, S, D>,
}

impl<S, D> ViewController<S, D>
where
    S: StrategyDelegate,
    D: GameSaverDelegate,
{
    pub fn new(screen: Screen, strategy: S, store: D) -> Self {
        ViewController {
            controller: GameController::new(screen, strategy, GameSaver::new(store)),
        }
    }

    pub fn screen(&self) -> &Screen {
        self.controller.view()
    }

    pub fn controller(&self) -> &GameController<Screen, S, D> {
        &self.controller
    }

    pub fn view_did_appear(&mut self) {
        if let Err(e) = self.controller.start() {
            debug!(error = %e, "start ignored");
        }
    }

    pub fn press_reset_button(&mut self) {
        self.controller.reset();
    }

    pub fn change_player_control_segment(&mut self, control_index: usize, selected_segment: usize) {
        let (side, player) = match (
            Disk::try_from(control_index),
            Player::try_from(selected_segment),
        ) {
            (Ok(side), Ok(player)) => (side, player),
            (Err(e), _) | (_, Err(e)) => {
                debug!(error = %e, "segment change ignored");
                return;
            }
        };
        self.controller.set_player(player, side);
    }

    pub fn board_view_did_select_cell(&mut self, x: usize, y: usize) {
        if let Err(e) = self.controller.place_disk_at(x, y) {
            debug!(x, y, error = %e, "placement ignored");
        }
    }

    pub fn handle(&mut self, action: UiAction) -> ControlFlow<()> {
        match action {
            UiAction::Quit => return ControlFlow::Break(()),
            UiAction::MoveCursor { dx, dy } => self.controller.view_mut().move_cursor(dx, dy),
            UiAction::SelectCursorCell => {
                let cursor = self.screen().cursor;
                self.board_view_did_select_cell(cursor.x, cursor.y);
            }
            UiAction::PressReset => self.press_reset_button(),
            UiAction::CyclePlayerControl(control) => {
                if let Some(&current) = self.screen().player_controls.get(control) {
                    let next = (current + 1) % Player::VALUES.len();
                    self.change_player_control_segment(control, next);
                }
            }
            UiAction::AnswerReset(confirmed) => {
                self.controller.view_mut().answer_reset(confirmed);
            }
            UiAction::DismissPass => {
                self.controller.view_mut().dismiss_pass();
            }
        }
        self.controller.pump();
        ControlFlow::Continue(())
    }

    /// アニメーションを進め、溜まった完了通知を処理する
    pub fn tick(&mut self, now: Instant) {
        self.controller.view_mut().tick(now);
        self.controller.pump();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::serialization::board_from_rows;
    use crate::core::{Board, Coordinate};
    use crate::error::SaveError;
    use crate::game::saver::encode;
    use crate::game::{Canceller, GameState, MoveHandler};
    use crate::logic::valid_moves;
    use crate::ui::ModalKind;
    use std::time::Duration;

    /// 最初の合法手を即座に返す
    struct FirstMove;

    impl StrategyDelegate for FirstMove {
        fn move_for(&mut self, board: &Board, side: Disk, handler: MoveHandler) -> Canceller {
            if let Some(at) = valid_moves(board, side).first() {
                handler.deliver(at.x, at.y);
            }
            Canceller::noop()
        }
    }

    #[derive(Default)]
    struct MemoryStore {
        data: Option<Vec<u8>>,
    }

    impl GameSaverDelegate for MemoryStore {
        fn write_data(&mut self, data: &[u8]) -> Result<(), SaveError> {
            self.data = Some(data.to_vec());
            Ok(())
        }

        fn read_data(&self) -> Result<Vec<u8>, SaveError> {
            self.data.clone().ok_or(SaveError::Io {
                path: "memory".into(),
                source: std::io::Error::from(std::io::ErrorKind::NotFound),
            })
        }
    }

    fn appeared() -> ViewController<FirstMove, MemoryStore> {
        let mut vc = ViewController::new(
            Screen::new(Duration::ZERO),
            FirstMove,
            MemoryStore::default(),
        );
        vc.view_did_appear();
        settle(&mut vc);
        vc
    }

    fn settle(vc: &mut ViewController<FirstMove, MemoryStore>) {
        for _ in 0..200 {
            vc.tick(Instant::now());
        }
    }

    #[test]
    fn test_initial_widgets() {
        let vc = appeared();
        let screen = vc.screen();
        assert_eq!(screen.board, Board::initial());
        assert_eq!(screen.count_labels, ["2".to_string(), "2".to_string()]);
        assert_eq!(screen.message.disk, Some(Disk::Dark));
        assert!(screen.message.disk_visible);
        assert_eq!(screen.message.text, "'s turn");
        assert_eq!(screen.player_controls, [0, 0]);
    }

    #[test]
    fn test_tap_places_disk() {
        let mut vc = appeared();
        vc.board_view_did_select_cell(3, 2);
        settle(&mut vc);

        let screen = vc.screen();
        assert_eq!(screen.board.disk_at(3, 2), Some(Disk::Dark));
        assert_eq!(screen.board.disk_at(3, 3), Some(Disk::Dark));
        assert_eq!(screen.count_labels, ["4".to_string(), "1".to_string()]);
        assert_eq!(screen.message.disk, Some(Disk::Light));
    }

    #[test]
    fn test_illegal_tap_is_swallowed() {
        let mut vc = appeared();
        let revision = vc.screen().revision();
        vc.board_view_did_select_cell(0, 0);
        vc.board_view_did_select_cell(42, 42);
        settle(&mut vc);

        assert_eq!(vc.screen().board, Board::initial());
        assert_eq!(vc.screen().revision(), revision);
    }

    #[test]
    fn test_cursor_tap() {
        let mut vc = appeared();
        // 初期カーソルは (3, 3)
        let _ = vc.handle(UiAction::MoveCursor { dx: 0, dy: -1 });
        assert_eq!(vc.screen().cursor, Coordinate::new(3, 2));
        let _ = vc.handle(UiAction::SelectCursorCell);
        settle(&mut vc);
        assert_eq!(vc.screen().board.disk_at(3, 2), Some(Disk::Dark));
    }

    #[test]
    fn test_segment_change_maps_side_and_player() {
        let mut vc = appeared();
        vc.change_player_control_segment(Disk::Light.index(), Player::Computer.index());

        assert_eq!(vc.controller().state().player(Disk::Light), Player::Computer);
        assert_eq!(vc.controller().state().player(Disk::Dark), Player::Manual);
        assert_eq!(vc.screen().player_controls, [0, 1]);
    }

    #[test]
    fn test_out_of_range_segment_is_ignored() {
        let mut vc = appeared();
        vc.change_player_control_segment(2, 1);
        vc.change_player_control_segment(0, 7);
        assert_eq!(vc.controller().state().players, [Player::Manual, Player::Manual]);
    }

    #[test]
    fn test_computer_plays_its_turn() {
        let mut vc = appeared();
        let _ = vc.handle(UiAction::CyclePlayerControl(1));
        vc.board_view_did_select_cell(3, 2);
        settle(&mut vc);

        assert_eq!(vc.controller().state().turn, Some(Disk::Dark));
        assert_eq!(vc.screen().board.count(Disk::Light), 3);
        assert_eq!(vc.screen().activity_indicators, [false, false]);
    }

    #[test]
    fn test_reset_cancel_keeps_game() {
        let mut vc = appeared();
        vc.board_view_did_select_cell(3, 2);
        settle(&mut vc);

        let _ = vc.handle(UiAction::PressReset);
        assert_eq!(vc.screen().modal_kind(), Some(ModalKind::ConfirmReset));
        let _ = vc.handle(UiAction::AnswerReset(false));
        settle(&mut vc);

        assert_eq!(vc.screen().modal_kind(), None);
        assert_eq!(vc.screen().board.count(Disk::Dark), 4);
    }

    #[test]
    fn test_reset_ok_restores_initial_board() {
        let mut vc = appeared();
        vc.board_view_did_select_cell(3, 2);
        settle(&mut vc);

        let _ = vc.handle(UiAction::PressReset);
        let _ = vc.handle(UiAction::AnswerReset(true));
        settle(&mut vc);

        assert_eq!(vc.screen().board, Board::initial());
        assert_eq!(vc.screen().count_labels, ["2".to_string(), "2".to_string()]);
    }

    #[test]
    fn test_reset_withdraws_queued_pass_alert() {
        // Light (コンピュータ) が (0, 0) に打つと Dark はパスになる
        let mut rows = vec!["-xo-----", "oxx-----"];
        rows.extend(["--------"; 6]);
        let state = GameState {
            board: board_from_rows(&rows).unwrap(),
            turn: Some(Disk::Light),
            players: [Player::Manual, Player::Computer],
        };
        let store = MemoryStore {
            data: Some(encode(&state).unwrap()),
        };
        let mut vc = ViewController::new(Screen::new(Duration::ZERO), FirstMove, store);
        vc.view_did_appear();

        // 着手が処理される前にリセットを押す
        let _ = vc.handle(UiAction::PressReset);
        settle(&mut vc);
        assert_eq!(vc.screen().modal_kind(), Some(ModalKind::ConfirmReset));
        assert_eq!(vc.screen().board.disk_at(0, 0), Some(Disk::Light));

        let _ = vc.handle(UiAction::AnswerReset(true));
        settle(&mut vc);

        assert_eq!(vc.screen().modal_kind(), None);
        assert_eq!(vc.screen().board, Board::initial());
        assert_eq!(vc.controller().state().turn, Some(Disk::Dark));

        vc.board_view_did_select_cell(3, 2);
        settle(&mut vc);
        assert_eq!(vc.screen().board.disk_at(3, 2), Some(Disk::Dark));
    }

    #[test]
    fn test_quit() {
        let mut vc = appeared();
        assert_eq!(vc.handle(UiAction::Quit), ControlFlow::Break(()));
        assert_eq!(
            vc.handle(UiAction::MoveCursor { dx: 1, dy: 0 }),
            ControlFlow::Continue(())
        );
    }
}
