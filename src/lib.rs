//! # prosynar-wizard - argument dialogs for the prosynar read-pair merger
//!
//! Walks the user through a fixed chain of dialogs, collects the arguments
//! for `prosynar` and launches it exactly once.
//!
//! ## Dialog chain
//!
//! 1. The global dialog: input SAM files, reference, output files, threads.
//! 2. The filter/merge selection: any of the three filters, one merger.
//! 3. One argument dialog per selected filter, in order, then the merger's.
//!
//! Dismissing any dialog ends the run without launching anything.
//!
//! ## Argument layout
//!
//! ```text
//! prosynar <global...> -- <filter...> -- <filter...> -- <merger...>
//! ```
//!
//! Every stage fragment starts with the stage command (`Frover`, `Mpear`, ...)
//! and is introduced by a single `--`.
//!
//! ## Architecture
//!
//! - `stage`: filter and merger definitions, the selection
//! - `form`: field descriptions, the built-in forms and editable form state
//! - `accumulator`: joins fragments into the final argument vector
//! - `wizard`: the dialog sequence behind the [`wizard::Dialogs`] trait
//! - `tui`: terminal dialogs (ratatui + crossterm)
//! - `answers`: replays a YAML answers file instead of showing dialogs
//! - `launcher`: runs the tool
//! - `utils`: tool path resolution
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use prosynar_wizard::answers::{load_answers, AnswersDialogs};
//! use prosynar_wizard::wizard::{run_wizard, WizardOutcome};
//! use std::path::Path;
//!
//! let answers = load_answers(Path::new("answers.yaml"))?;
//! let mut dialogs = AnswersDialogs::new(answers);
//! if let WizardOutcome::Launch(vector) = run_wizard("prosynar", &mut dialogs)? {
//!     println!("{}", vector);
//! }
//! # Ok::<(), color_eyre::eyre::Error>(())
//! ```

pub mod accumulator;
pub mod answers;
pub mod form;
pub mod launcher;
pub mod stage;
pub mod tui;
pub mod utils;
pub mod wizard;
