//! Answers files: replaying the dialog chain without a terminal.
//!
//! An answers file fills in the same forms the dialogs show, so a run can be
//! scripted or repeated:
//!
//! ```yaml
//! global:
//!   inputs: [reads.sam]
//!   ref: ref.fa
//!   thread: 4
//! filters: [Frover]
//! merger: Mpear
//! stages:
//!   Frover: { over: 10 }
//!   Mpear: { alpha: 0.05, map: true }
//! ```
//!
//! Keys are field names: the tool's flag without its dashes, or `inputs` for
//! the positional input files. Paths that YAML reads as whole numbers
//! (`ref: 2024`) are taken as written; quote any other path that looks like
//! a number (`out: "1e3"`), since its text is lost once parsed.

use crate::accumulator::Fragment;
use crate::form::{FieldKind, FormError, FormSpec, FormState};
use crate::stage::{Filter, Merger, Selection, Stage};
use crate::wizard::Dialogs;
use color_eyre::eyre::WrapErr;
use color_eyre::Result;
use log::info;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs::File;
use std::path::Path;

/// A single answer as written in YAML
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum AnswerValue {
    Flag(bool),
    Integer(i64),
    Float(f64),
    Text(String),
    List(Vec<AnswerValue>),
}

impl AnswerValue {
    /// The value as a path: text, or a whole number spelled out.
    fn as_path(&self) -> Option<String> {
        match self {
            AnswerValue::Text(text) => Some(text.clone()),
            AnswerValue::Integer(n) => Some(n.to_string()),
            _ => None,
        }
    }
}

/// Answers for one form, keyed by field name
pub type FormAnswers = BTreeMap<String, AnswerValue>;

/// Answers file contents
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Answers {
    #[serde(default)]
    pub global: FormAnswers,
    #[serde(default)]
    pub filters: Vec<Filter>,
    #[serde(default)]
    pub merger: Merger,
    #[serde(default)]
    pub stages: BTreeMap<String, FormAnswers>,
}

/// Problems with an answers file beyond YAML syntax
#[derive(Debug, thiserror::Error)]
pub enum AnswersError {
    #[error("Unknown stage '{0}' (expected Frover, Fprover, Fpprobreg, Malign, Mflash or Mpear)")]
    UnknownStage(String),

    #[error("Answers given for stage '{0}', which is not selected")]
    UnselectedStage(String),

    #[error("Invalid answer in {context}: {source}")]
    Form {
        context: String,
        #[source]
        source: FormError,
    },
}

impl Answers {
    /// The selection these answers describe
    pub fn selection(&self) -> Selection {
        self.filters
            .iter()
            .fold(Selection::new(self.merger), |selection, filter| selection.with_filter(*filter))
    }

    /// Check stage keys against the selection.
    pub fn validate(&self) -> Result<(), AnswersError> {
        let selected = self.selection().stages();
        for command in self.stages.keys() {
            let stage = Stage::from_command(command)
                .ok_or_else(|| AnswersError::UnknownStage(command.clone()))?;
            if !selected.contains(&stage) {
                return Err(AnswersError::UnselectedStage(command.clone()));
            }
        }
        Ok(())
    }

    /// Fill `spec` with the answers for one form and build its fragment.
    pub fn fill(spec: FormSpec, answers: Option<&FormAnswers>) -> Result<Fragment, AnswersError> {
        let context = spec.title.to_string();
        let mut form = FormState::new(spec);
        let wrap = |source| AnswersError::Form {
            context: context.clone(),
            source,
        };

        if let Some(answers) = answers {
            for (name, value) in answers {
                apply_answer(&mut form, name, value).map_err(wrap)?;
            }
        }
        form.fragment().map_err(wrap)
    }
}

/// Load and validate an answers file
pub fn load_answers(path: &Path) -> Result<Answers> {
    info!("Loading answers from: {:?}", path);

    let file = File::open(path).wrap_err_with(|| format!("Failed to open answers file '{}'", path.display()))?;
    let answers: Answers = serde_yaml::from_reader(file)
        .wrap_err_with(|| format!("Failed to parse answers file '{}'", path.display()))?;

    answers.validate()?;
    Ok(answers)
}

fn apply_answer(form: &mut FormState, name: &str, value: &AnswerValue) -> Result<(), FormError> {
    let index = form.index_of(name)?;
    let field = form.spec().fields[index].clone();

    match (&field.kind, value) {
        (FieldKind::Flag, AnswerValue::Flag(on)) => form.set_flag(index, *on),
        (FieldKind::Integer, AnswerValue::Integer(n)) => form.set_text(index, &n.to_string()),
        (FieldKind::Float, AnswerValue::Integer(n)) => form.set_text(index, &n.to_string()),
        (FieldKind::Float, AnswerValue::Float(x)) => form.set_text(index, &x.to_string()),
        (FieldKind::Integer | FieldKind::Float, AnswerValue::Text(text)) => form.set_text(index, text),
        (FieldKind::File { .. }, value) => match value.as_path() {
            Some(path) => form.set_text(index, &path),
            None => Err(FormError::wrong_type(&field)),
        },
        (FieldKind::FileList { .. }, AnswerValue::List(entries)) => {
            for entry in entries {
                let path = entry.as_path().ok_or_else(|| FormError::wrong_type(&field))?;
                form.push_entry(index, &path)?;
            }
            Ok(())
        }
        (FieldKind::FileList { .. }, value) => match value.as_path() {
            Some(path) => form.push_entry(index, &path),
            None => Err(FormError::wrong_type(&field)),
        },
        _ => Err(FormError::wrong_type(&field)),
    }
}

/// [`Dialogs`] backed by an answers file; never cancels.
pub struct AnswersDialogs {
    answers: Answers,
}

impl AnswersDialogs {
    pub fn new(answers: Answers) -> Self {
        Self { answers }
    }
}

impl Dialogs for AnswersDialogs {
    fn collect_global(&mut self, form: FormSpec) -> Result<Option<Fragment>> {
        Ok(Some(Answers::fill(form, Some(&self.answers.global))?))
    }

    fn select_stages(&mut self) -> Result<Option<Selection>> {
        Ok(Some(self.answers.selection()))
    }

    fn collect_stage(&mut self, stage: Stage, form: FormSpec) -> Result<Option<Fragment>> {
        Ok(Some(Answers::fill(form, self.answers.stages.get(stage.command()))?))
    }
}
