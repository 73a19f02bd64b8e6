pub mod app;
pub mod ui;

use std::io;
use std::time::Duration;

use anyhow::Result;
use burndown_core::{
    AuthService, ExportValue, FileConfigRepository, FileLogRepository, StateStore,
};
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use log::error;
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};

use crate::tui::app::{App, InputMode};

const TICK_RATE: Duration = Duration::from_millis(250);

pub fn run(auth: AuthService, config_repo: FileConfigRepository, log_repo: FileLogRepository) -> Result<()> {
    let config = config_repo.load()?;
    let mut state = StateStore::new(log_repo, config);
    let load_error = state.refresh().err();

    let mut app = App::new(auth, config_repo, state);
    if let Some(e) = load_error {
        app.status = Some(format!("Could not load entries: {:#}", e));
    }

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        error!("event=tui_exit module=tui status=error error={:?}", err);
        println!("{:?}", err);
    }

    Ok(())
}

fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> io::Result<()> {
    loop {
        app.on_tick();
        terminal.draw(|f| ui::draw(f, app))
            .map_err(|e| io::Error::other(e.to_string()))?;

        if !event::poll(TICK_RATE)? {
            continue;
        }
        let Event::Key(key) = event::read()? else { continue };
        if key.kind != KeyEventKind::Press {
            continue;
        }

        match app.input_mode {
            InputMode::Login => match key.code {
                KeyCode::Esc => return Ok(()),
                KeyCode::Enter => app.submit_command(),
                KeyCode::Char(c) => app.input_char(c),
                KeyCode::Backspace => app.delete_char(),
                _ => {}
            },
            InputMode::Normal => match key.code {
                KeyCode::Char('q') | KeyCode::Esc => return Ok(()),
                KeyCode::Down | KeyCode::Char('j') => app.next(),
                KeyCode::Up | KeyCode::Char('k') => app.previous(),
                KeyCode::Right | KeyCode::Char('l') | KeyCode::Tab => app.next_member(),
                KeyCode::Left | KeyCode::Char('h') | KeyCode::BackTab => app.previous_member(),
                KeyCode::Enter | KeyCode::Char('e') => app.enter_edit_mode(),
                KeyCode::Char('f') => app.cycle_filter(),
                KeyCode::Char('c') => app.enter_config_mode(),
                KeyCode::Char('x') => app.export(ExportValue::Logged),
                KeyCode::Char('X') => app.export(ExportValue::Remaining),
                KeyCode::Char('r') => app.reload(),
                KeyCode::Char('D') => app.enter_reset_mode(),
                KeyCode::Char('L') => app.logout(),
                _ => {}
            },
            InputMode::ConfirmReset => match key.code {
                KeyCode::Char('y') | KeyCode::Char('Y') => app.confirm_reset(),
                _ => app.exit_input_mode(),
            },
            InputMode::Editing | InputMode::Configuring => match key.code {
                KeyCode::Enter => app.submit_command(),
                KeyCode::Esc => app.exit_input_mode(),
                KeyCode::Char(c) => app.input_char(c),
                KeyCode::Backspace => app.delete_char(),
                KeyCode::Left => app.move_cursor_left(),
                KeyCode::Right => app.move_cursor_right(),
                _ => {}
            },
        }
    }
}
