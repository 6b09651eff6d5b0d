use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use super::ModalKind;

/// User gestures, already decoupled from the terminal's key codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiAction {
    MoveCursor { dx: i32, dy: i32 },
    /// カーソル位置のセルをタップ
    SelectCursorCell,
    PressReset,
    /// セグメントを次の値に切り替える
    CyclePlayerControl(usize),
    AnswerReset(bool),
    DismissPass,
    Quit,
}

/// ダイアログ表示中はそのダイアログのキーだけを受け付ける
pub fn action_for_key(key: KeyEvent, modal: Option<ModalKind>) -> Option<UiAction> {
    if key.kind == KeyEventKind::Release {
        return None;
    }
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(UiAction::Quit);
    }

    match modal {
        Some(ModalKind::ConfirmReset) => match key.code {
            KeyCode::Char('y') | KeyCode::Enter => Some(UiAction::AnswerReset(true)),
            KeyCode::Char('n') | KeyCode::Esc => Some(UiAction::AnswerReset(false)),
            _ => None,
        },
        Some(ModalKind::Pass) => match key.code {
            KeyCode::Enter | KeyCode::Char(' ') | KeyCode::Esc => Some(UiAction::DismissPass),
            _ => None,
        },
        None => match key.code {
            KeyCode::Up | KeyCode::Char('k') => Some(UiAction::MoveCursor { dx: 0, dy: -1 }),
            KeyCode::Down | KeyCode::Char('j') => Some(UiAction::MoveCursor { dx: 0, dy: 1 }),
            KeyCode::Left | KeyCode::Char('h') => Some(UiAction::MoveCursor { dx: -1, dy: 0 }),
            KeyCode::Right | KeyCode::Char('l') => Some(UiAction::MoveCursor { dx: 1, dy: 0 }),
            KeyCode::Enter | KeyCode::Char(' ') => Some(UiAction::SelectCursorCell),
            KeyCode::Char('r') => Some(UiAction::PressReset),
            KeyCode::Char('1') => Some(UiAction::CyclePlayerControl(0)),
            KeyCode::Char('2') => Some(UiAction::CyclePlayerControl(1)),
            KeyCode::Char('q') | KeyCode::Esc => Some(UiAction::Quit),
            _ => None,
        },
    }
}
