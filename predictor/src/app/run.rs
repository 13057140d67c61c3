use std::io;
use std::time::Duration;

use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};

use crate::{
    service::PredictionService,
    state::form::{FormAction, FormState},
    ui,
};

struct TerminalGuard;

impl TerminalGuard {
    fn enter() -> Result<Self> {
        enable_raw_mode()?;
        execute!(io::stdout(), EnterAlternateScreen)?;
        Ok(Self)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
    }
}

/// Runs the prediction form until the user quits.
///
/// # Errors
/// Returns an error if terminal setup or rendering fails.
pub fn run(service: &PredictionService) -> Result<()> {
    let _guard = TerminalGuard::enter()?;

    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    let mut state = FormState::new();

    loop {
        terminal.draw(|f| ui::form::draw(f, &state))?;

        if !event::poll(Duration::from_millis(120))? {
            continue;
        }

        let Event::Key(k) = event::read()? else {
            continue;
        };

        if k.kind != KeyEventKind::Press {
            continue;
        }

        match state.handle_key(k.code) {
            FormAction::Quit => break,
            FormAction::Predict => state.submit(service),
            FormAction::None => {}
        }
    }

    terminal.show_cursor()?;
    Ok(())
}
