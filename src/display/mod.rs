use std::io::{self, Write};

use crossterm::style::{StyledContent, Stylize};
use crossterm::{cursor, queue, terminal};

use crate::core::{Coordinate, Disk};
use crate::player::Player;
use crate::ui::{Modal, Screen};

const SPINNER: &str = "(thinking...)";

fn disk_glyph(disk: Disk) -> StyledContent<&'static str> {
    match disk {
        Disk::Dark => "●".white().on_black(),
        Disk::Light => "○".black().on_white(),
    }
}

/// 画面全体を描き直す
pub fn render_screen(screen: &Screen) -> io::Result<()> {
    let mut out = io::stdout();

    // 画面クリア（スクロール防止）
    queue!(
        out,
        terminal::Clear(terminal::ClearType::All),
        cursor::MoveTo(0, 0)
    )?;

    write!(out, "=== Reversi ===\r\n\r\n")?;
    render_message(&mut out, screen)?;
    write!(out, "\r\n")?;
    render_board(&mut out, screen)?;
    write!(out, "\r\n")?;
    render_players(&mut out, screen)?;
    write!(out, "\r\n")?;

    match screen.modal() {
        Some(Modal::ConfirmReset(_)) => {
            write!(out, "{}\r\n", "Confirmation".bold().yellow())?;
            write!(out, "Do you really want to reset the game?\r\n")?;
            write!(out, "[y] OK | [n] Cancel\r\n")?;
        }
        Some(Modal::Pass { side, .. }) => {
            write!(out, "{} ({})\r\n", "Pass".bold().yellow(), side)?;
            write!(out, "Cannot place a disk.\r\n")?;
            write!(out, "[Enter] Dismiss\r\n")?;
        }
        None => {
            write!(
                out,
                "[Arrows/hjkl]: Move | [Enter]: Place | [1]/[2]: Dark/Light player | [r]: Reset | [q]: Quit\r\n"
            )?;
        }
    }

    out.flush()
}

fn render_message(out: &mut impl Write, screen: &Screen) -> io::Result<()> {
    let message = &screen.message;
    match message.disk {
        Some(disk) if message.disk_visible => {
            write!(out, "  {}{}\r\n", disk_glyph(disk), message.text.as_str().bold())
        }
        _ => write!(out, "  {}\r\n", message.text.as_str().bold()),
    }
}

fn render_board(out: &mut impl Write, screen: &Screen) -> io::Result<()> {
    let board = &screen.board;
    let animating = screen.animating_cell();

    // X軸ラベル
    write!(out, "   ")?;
    for x in 0..board.width {
        write!(out, " {} ", (b'a' + x as u8) as char)?;
    }
    write!(out, "\r\n")?;

    for y in 0..board.height {
        write!(out, "{:2} ", y + 1)?;
        for x in 0..board.width {
            let pos = Coordinate::new(x, y);
            let is_cursor = screen.cursor == pos && screen.modal().is_none();
            let (prefix, suffix) = if is_cursor { ("[", "]") } else { (" ", " ") };

            write!(out, "{}", prefix.yellow())?;
            if animating == Some(pos) {
                write!(out, "{}", "*".yellow())?;
            } else {
                match board.disk_at(x, y) {
                    Some(disk) => write!(out, "{}", disk_glyph(disk))?,
                    None => write!(out, "{}", ".".dark_green())?,
                }
            }
            write!(out, "{}", suffix.yellow())?;
        }
        write!(out, "\r\n")?;
    }
    Ok(())
}

fn render_players(out: &mut impl Write, screen: &Screen) -> io::Result<()> {
    for side in Disk::SIDES {
        let i = side.index();
        write!(out, "  {} {:<5} ", disk_glyph(side), side.name())?;

        for player in Player::VALUES {
            let label = format!(" {} ", player.name());
            if screen.player_controls[i] == player.index() {
                write!(out, "{}", label.black().on_cyan())?;
            } else {
                write!(out, "{}", label)?;
            }
        }

        write!(out, "  {:>2}", screen.count_labels[i])?;
        if screen.activity_indicators[i] {
            write!(out, "  {}", SPINNER.magenta())?;
        }
        write!(out, "\r\n")?;
    }
    Ok(())
}
