use std::io;
use std::ops::ControlFlow;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use crossterm::event::{self, Event};
use crossterm::{cursor, execute, terminal};
use tracing::{info, warn};

use reversi_challenge::config::{AppConfig, CONFIG_PATH};
use reversi_challenge::display::render_screen;
use reversi_challenge::logging;
use reversi_challenge::player::ai::ComputerStrategy;
use reversi_challenge::storage::{self, FileStore};
use reversi_challenge::ui::{action_for_key, Screen, ViewController};

/// 入力待ちの最大間隔
const FRAME: Duration = Duration::from_millis(30);

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let (config, config_error) = match AppConfig::load_or_default(Path::new(CONFIG_PATH)) {
        Ok(config) => (config, None),
        Err(e) => (AppConfig::default(), Some(e)),
    };

    let save_path = match &config.save_path {
        Some(path) => path.clone(),
        None => storage::default_save_path()?.to_path_buf(),
    };
    let log_path = config.log_path.clone().unwrap_or_else(|| {
        save_path
            .parent()
            .map(|dir| dir.join(logging::LOG_FILE_NAME))
            .unwrap_or_else(|| PathBuf::from(logging::LOG_FILE_NAME))
    });
    logging::init(&log_path)?;
    if let Some(e) = config_error {
        warn!(error = %e, "invalid config, using defaults");
    }
    info!(save_path = %save_path.display(), "starting");

    // ターミナル初期化
    terminal::enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, terminal::EnterAlternateScreen, cursor::Hide)?;

    let res = run(config, save_path);

    // ターミナル復帰
    execute!(io::stdout(), cursor::Show, terminal::LeaveAlternateScreen)?;
    terminal::disable_raw_mode()?;

    res
}

fn run(config: AppConfig, save_path: PathBuf) -> anyhow::Result<()> {
    let screen = Screen::new(Duration::from_millis(config.animation.flip_interval_ms));
    let strategy = ComputerStrategy::new(config.ai.clone(), tokio::runtime::Handle::current());
    let mut view_controller = ViewController::new(screen, strategy, FileStore::new(save_path));

    view_controller.view_did_appear();
    let mut rendered = None;

    loop {
        if rendered != Some(view_controller.screen().revision()) {
            render_screen(view_controller.screen())?;
            rendered = Some(view_controller.screen().revision());
        }

        let timeout = view_controller
            .screen()
            .next_deadline()
            .map(|due| due.saturating_duration_since(Instant::now()).min(FRAME))
            .unwrap_or(FRAME);

        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                if let Some(action) = action_for_key(key, view_controller.screen().modal_kind()) {
                    if let ControlFlow::Break(()) = view_controller.handle(action) {
                        info!("quit");
                        break;
                    }
                }
            } else {
                // リサイズなどは再描画だけ
                rendered = None;
            }
        }

        view_controller.tick(Instant::now());
    }

    Ok(())
}
