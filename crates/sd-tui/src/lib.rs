//! Terminal dashboard for clients, jobs, quotes, services, the calendar and
//! the map.

use std::io::{self, Stdout};
use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;

use sd_fs::{set_config_path, FsStore};

mod app;
mod calendar;
mod dispatch;
mod input;
mod map;
mod modal;
mod sections;
mod ui;
mod upload;

pub use app::App;
pub use sections::Section;

use input::TextInput;

const TICK_RATE: Duration = Duration::from_millis(200);

/// Where to read data from and which section to open first.
#[derive(Debug, Clone)]
pub struct RunOptions {
    pub data_dir: PathBuf,
    pub section: Section,
}

/// Run the dashboard until the user quits.
pub fn run(options: RunOptions) -> Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_dashboard(&mut terminal, options);
    restore_terminal(terminal)?;
    result
}

fn run_dashboard(terminal: &mut Terminal<CrosstermBackend<Stdout>>, options: RunOptions) -> Result<()> {
    let mut store = FsStore::new(options.data_dir);
    if !store.exists() {
        let Some(path) = prompt_init(terminal, &store)? else {
            return Ok(());
        };
        store = FsStore::new(path);
        store.init().context("failed to initialize data directory")?;
        set_config_path(store.path()).context("failed to save data path")?;
    }

    let today = chrono::Local::now().date_naive();
    let mut app = App::new(store, options.section, today);
    tracing::info!(section = options.section.name(), "dashboard started");

    let mut last_tick = Instant::now();
    loop {
        terminal.draw(|frame| ui::render_app(frame, &mut app))?;

        let timeout = TICK_RATE.saturating_sub(last_tick.elapsed());
        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press && app.handle_key(key)? {
                    break;
                }
            }
        }

        if last_tick.elapsed() >= TICK_RATE {
            app.tick();
            last_tick = Instant::now();
        }
    }
    tracing::info!("dashboard closed");
    Ok(())
}

#[derive(Debug, PartialEq, Eq)]
enum InitStep {
    Editing,
    Confirmed(PathBuf),
    Aborted,
}

fn init_key(input: &mut TextInput, key: KeyEvent) -> InitStep {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return InitStep::Aborted;
    }
    match key.code {
        KeyCode::Esc => InitStep::Aborted,
        KeyCode::Enter => {
            let path = input.content.trim();
            if path.is_empty() {
                InitStep::Editing
            } else {
                InitStep::Confirmed(PathBuf::from(path))
            }
        }
        _ => {
            input.handle_key(key);
            InitStep::Editing
        }
    }
}

/// Ask where to create the data directory. `None` when the user declines.
fn prompt_init(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    store: &FsStore,
) -> Result<Option<PathBuf>> {
    let mut input = TextInput::from(store.path().to_string_lossy().to_string());
    loop {
        terminal.draw(|frame| ui::render_init_popup(frame, &input))?;
        if !event::poll(TICK_RATE)? {
            continue;
        }
        let Event::Key(key) = event::read()? else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }
        match init_key(&mut input, key) {
            InitStep::Editing => {}
            InitStep::Confirmed(path) => return Ok(Some(path)),
            InitStep::Aborted => return Ok(None),
        }
    }
}

fn restore_terminal(mut terminal: Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}
