//! fileshelf: a grouped-folder viewer for the terminal.
#![allow(clippy::multiple_crate_versions)]

use clap::Parser;
use fileshelf::app_state::{AppState, View};
use fileshelf::{config, session::SessionController, ui};
use ratatui::crossterm::{
    event::{self, Event, KeyCode, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Parser)]
#[command(name = "fileshelf")]
#[command(about = "Group a folder's files under reorderable headers", long_about = None)]
struct Args {
    /// Folder to open at startup
    #[arg(value_name = "FOLDER")]
    folder: Option<PathBuf>,

    /// Include hidden files in listings
    #[arg(long)]
    show_hidden: bool,
}

fn main() -> io::Result<()> {
    let args = Args::parse();
    let mut cfg = config::Config::load();

    // Override config with command line args
    if args.show_hidden {
        cfg.show_hidden = true;
    }

    let session = SessionController::new(cfg.show_hidden).map_err(io::Error::other)?;
    let mut app = AppState::new(session);
    if let Some(folder) = args.folder {
        app.open_folder(&folder);
    }

    run_tui(app, &cfg)
}

fn run_tui(mut app: AppState, cfg: &config::Config) -> io::Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &mut app, cfg);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(e) = result {
        eprintln!("Error: {e}");
    }

    Ok(())
}

fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut AppState,
    cfg: &config::Config,
) -> io::Result<()> {
    let tick = Duration::from_millis(cfg.poll_interval_ms);
    loop {
        app.tick();
        terminal.draw(|f| ui::draw(f, app))?;

        if !event::poll(tick)? {
            continue;
        }
        let Event::Key(key) = event::read()? else {
            continue;
        };
        match app.view {
            View::FolderPick => match key.code {
                KeyCode::Esc => return Ok(()),
                KeyCode::Enter => {
                    let path = PathBuf::from(app.input_buffer.trim());
                    if path.is_dir() {
                        app.open_folder(&path);
                    } else {
                        app.message = Some(format!("not a folder: {}", path.display()));
                    }
                }
                KeyCode::Backspace => {
                    app.input_buffer.pop();
                }
                KeyCode::Char(c) => app.input_buffer.push(c),
                _ => {}
            },
            View::Files => match key.code {
                KeyCode::Char('q') => app.back_to_pick(),
                KeyCode::Up => {
                    if key.modifiers.contains(KeyModifiers::CONTROL) {
                        app.move_selected_up();
                    } else {
                        app.cursor_up();
                    }
                }
                KeyCode::Down => {
                    if key.modifiers.contains(KeyModifiers::CONTROL) {
                        app.move_selected_down();
                    } else {
                        app.cursor_down();
                    }
                }
                KeyCode::Enter => app.activate(),
                KeyCode::Char('a') => app.start_add_header(),
                KeyCode::Char('r') => app.start_rename(),
                KeyCode::Char('d') => app.delete_selected(),
                KeyCode::Esc => app.message = None,
                _ => {}
            },
            View::Input => match key.code {
                KeyCode::Enter => app.commit_input(),
                KeyCode::Esc => app.cancel_input(),
                KeyCode::Backspace => {
                    app.input_buffer.pop();
                }
                KeyCode::Char(c) => app.input_buffer.push(c),
                _ => {}
            },
        }
    }
}
