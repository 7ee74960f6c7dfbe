//! Terminal dialogs.
//!
//! Every collection step gets its own modal dialog: the terminal is taken
//! over while it is open and handed back once it is confirmed or dismissed.

pub mod form_dialog;
pub mod selection_dialog;
pub mod session;
pub mod widgets;

pub use form_dialog::FormDialog;
pub use selection_dialog::SelectionDialog;
pub use session::DialogSession;

use crate::accumulator::Fragment;
use crate::form::FormSpec;
use crate::stage::{Selection, Stage};
use crate::wizard::Dialogs;
use color_eyre::Result;
use crossterm::event::KeyEvent;
use log::debug;
use ratatui::Frame;

/// State of a dialog after a key press
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogStatus {
    Open,
    Confirmed,
    Cancelled,
}

/// A modal dialog driven by key presses
pub trait Dialog {
    type Output;

    fn title(&self) -> &str;

    /// Draw the whole dialog into the frame
    fn render(&self, f: &mut Frame);

    fn handle_key(&mut self, key: KeyEvent) -> DialogStatus;

    /// The confirmed value; `None` until the dialog was confirmed.
    fn output(&mut self) -> Option<Self::Output>;
}

/// Open `dialog` in its own session and wait for it to close.
///
/// Nothing may be logged while the session is open; the log goes to the
/// same terminal.
pub fn run_dialog<D: Dialog>(mut dialog: D) -> Result<Option<D::Output>> {
    debug!("Opening dialog: {}", dialog.title());
    let status = {
        let mut session = DialogSession::open()?;
        session.run(&mut dialog)?
    };
    Ok(match status {
        DialogStatus::Confirmed => dialog.output(),
        DialogStatus::Open | DialogStatus::Cancelled => None,
    })
}

/// [`Dialogs`] shown on the terminal
#[derive(Debug, Default)]
pub struct TerminalDialogs;

impl Dialogs for TerminalDialogs {
    fn collect_global(&mut self, form: FormSpec) -> Result<Option<Fragment>> {
        run_dialog(FormDialog::new(form))
    }

    fn select_stages(&mut self) -> Result<Option<Selection>> {
        run_dialog(SelectionDialog::new())
    }

    fn collect_stage(&mut self, _stage: Stage, form: FormSpec) -> Result<Option<Fragment>> {
        run_dialog(FormDialog::new(form))
    }
}
