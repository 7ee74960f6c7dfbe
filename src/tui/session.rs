//! Terminal ownership for a single dialog.

use super::{Dialog, DialogStatus};
use color_eyre::eyre::WrapErr;
use color_eyre::Result;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use std::io::{self, Stdout};

/// Raw mode plus alternate screen, restored on drop
pub struct DialogSession {
    terminal: Terminal<CrosstermBackend<Stdout>>,
}

impl DialogSession {
    pub fn open() -> Result<Self> {
        enable_raw_mode().wrap_err("Failed to enable raw mode")?;

        let mut stdout = io::stdout();
        if let Err(err) = execute!(stdout, EnterAlternateScreen) {
            let _ = disable_raw_mode();
            return Err(err).wrap_err("Failed to enter alternate screen");
        }

        match Terminal::new(CrosstermBackend::new(stdout)) {
            Ok(terminal) => Ok(Self { terminal }),
            Err(err) => {
                let _ = execute!(io::stdout(), LeaveAlternateScreen);
                let _ = disable_raw_mode();
                Err(err).wrap_err("Failed to set up terminal")
            }
        }
    }

    /// Draw and feed key presses to `dialog` until it closes.
    pub fn run<D: Dialog + ?Sized>(&mut self, dialog: &mut D) -> Result<DialogStatus> {
        drive(&mut self.terminal, event::read, dialog)
    }
}

/// The dialog loop over any backend and event source. Logs nothing.
pub(crate) fn drive<B, E, D>(terminal: &mut Terminal<B>, mut next_event: E, dialog: &mut D) -> Result<DialogStatus>
where
    B: Backend,
    E: FnMut() -> io::Result<Event>,
    D: Dialog + ?Sized,
{
    loop {
        terminal
            .draw(|f| dialog.render(f))
            .wrap_err("Failed to draw dialog")?;

        if let Event::Key(key) = next_event().wrap_err("Failed to read terminal event")? {
            if key.kind != KeyEventKind::Press {
                continue;
            }
            match dialog.handle_key(key) {
                DialogStatus::Open => {}
                closed => return Ok(closed),
            }
        }
    }
}

impl Drop for DialogSession {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(self.terminal.backend_mut(), LeaveAlternateScreen);
        let _ = self.terminal.show_cursor();
    }
}
