//! Dialog sequencing.
//!
//! Runs the collection steps strictly in order:
//! `CollectGlobal -> SelectStages -> (CollectStage)* -> Launch`.
//! Any step may come back empty, which ends the run in `Aborted` before
//! anything is launched. Exiting the process is left to the caller.

use crate::accumulator::{assemble, ArgumentVector, Fragment};
use crate::form::{global_form, stage_form, FormSpec};
use crate::stage::{Selection, Stage};
use color_eyre::Result;
use log::{debug, info};
use std::fmt;

/// The three kinds of collection step.
///
/// `Ok(None)` means the user dismissed the dialog; `Err` is reserved for
/// failures of the dialog machinery itself.
pub trait Dialogs {
    /// Top-level arguments for every run
    fn collect_global(&mut self, form: FormSpec) -> Result<Option<Fragment>>;

    /// Filters to run and the merge strategy
    fn select_stages(&mut self) -> Result<Option<Selection>>;

    /// Arguments for one selected stage
    fn collect_stage(&mut self, stage: Stage, form: FormSpec) -> Result<Option<Fragment>>;
}

/// Where a run was cancelled
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AbortPoint {
    Global,
    Selection,
    Stage(Stage),
}

impl fmt::Display for AbortPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AbortPoint::Global => f.write_str("global argument dialog"),
            AbortPoint::Selection => f.write_str("filter/merge selection dialog"),
            AbortPoint::Stage(stage) => write!(f, "{} argument dialog", stage),
        }
    }
}

/// Result of walking the dialog chain
#[derive(Debug, Clone, PartialEq)]
pub enum WizardOutcome {
    /// Every dialog was confirmed; the vector is ready to launch
    Launch(ArgumentVector),
    /// A dialog was cancelled; nothing collected so far is used
    Aborted(AbortPoint),
}

/// Walk the dialogs and assemble the argument vector for `program`.
pub fn run_wizard<D: Dialogs + ?Sized>(program: &str, dialogs: &mut D) -> Result<WizardOutcome> {
    let Some(global) = dialogs.collect_global(global_form())? else {
        return Ok(WizardOutcome::Aborted(AbortPoint::Global));
    };
    debug!("Global fragment: {:?}", global);

    let Some(selection) = dialogs.select_stages()? else {
        return Ok(WizardOutcome::Aborted(AbortPoint::Selection));
    };
    let stages = selection.stages();
    info!(
        "Selected stages: {}",
        stages.iter().map(|s| s.command()).collect::<Vec<_>>().join(", ")
    );

    // Fragments are held back until every stage is confirmed
    let mut collected = Vec::with_capacity(stages.len());
    for stage in stages {
        let Some(fragment) = dialogs.collect_stage(stage, stage_form(stage))? else {
            return Ok(WizardOutcome::Aborted(AbortPoint::Stage(stage)));
        };
        debug!("{} fragment: {:?}", stage, fragment);
        collected.push(fragment);
    }

    Ok(WizardOutcome::Launch(assemble(program, global, collected)))
}
