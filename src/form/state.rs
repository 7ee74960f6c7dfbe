//! Editable form state and its conversion into an argument fragment.

use super::field::{FieldKind, FieldSpec, FormSpec};
use crate::accumulator::Fragment;

/// Errors raised while turning form input into tokens
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FormError {
    #[error("{label}: '{value}' is not a valid {expected}")]
    InvalidNumber {
        field: &'static str,
        label: &'static str,
        value: String,
        expected: &'static str,
    },

    #[error("'{form}' has no field named '{name}'")]
    UnknownField { form: &'static str, name: String },

    #[error("{label}: expected {expected}")]
    WrongType {
        field: &'static str,
        label: &'static str,
        expected: &'static str,
    },
}

impl FormError {
    /// Name of the offending field, when there is one
    pub fn field(&self) -> Option<&'static str> {
        match self {
            FormError::InvalidNumber { field, .. } | FormError::WrongType { field, .. } => Some(*field),
            FormError::UnknownField { .. } => None,
        }
    }

    pub(crate) fn wrong_type(field: &FieldSpec) -> FormError {
        let expected = match field.kind {
            FieldKind::Integer => "a whole number",
            FieldKind::Float => "a number",
            FieldKind::Flag => "true or false",
            FieldKind::File { .. } => "a path",
            FieldKind::FileList { .. } => "a list of paths",
        };
        FormError::WrongType {
            field: field.name,
            label: field.label,
            expected,
        }
    }
}

/// Current value of one field
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Text(String),
    Flag(bool),
    List { entries: Vec<String>, pending: String },
}

impl FieldValue {
    fn empty_for(kind: &FieldKind) -> Self {
        match kind {
            FieldKind::Flag => FieldValue::Flag(false),
            FieldKind::FileList { .. } => FieldValue::List {
                entries: Vec::new(),
                pending: String::new(),
            },
            _ => FieldValue::Text(String::new()),
        }
    }
}

/// A form description together with the values entered so far.
#[derive(Debug, Clone)]
pub struct FormState {
    spec: FormSpec,
    values: Vec<FieldValue>,
}

impl FormState {
    pub fn new(spec: FormSpec) -> Self {
        let values = spec.fields.iter().map(|f| FieldValue::empty_for(&f.kind)).collect();
        Self { spec, values }
    }

    pub fn spec(&self) -> &FormSpec {
        &self.spec
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn value(&self, index: usize) -> &FieldValue {
        &self.values[index]
    }

    pub fn index_of(&self, name: &str) -> Result<usize, FormError> {
        self.spec
            .field(name)
            .map(|(index, _)| index)
            .ok_or_else(|| FormError::UnknownField {
                form: self.spec.title,
                name: name.to_string(),
            })
    }

    /// The editable text of a field: the value itself, or a list's pending entry.
    pub fn text_mut(&mut self, index: usize) -> Option<&mut String> {
        match &mut self.values[index] {
            FieldValue::Text(text) => Some(text),
            FieldValue::List { pending, .. } => Some(pending),
            FieldValue::Flag(_) => None,
        }
    }

    pub fn set_text(&mut self, index: usize, text: &str) -> Result<(), FormError> {
        let field = &self.spec.fields[index];
        match &mut self.values[index] {
            FieldValue::Text(current) => {
                *current = text.to_string();
                Ok(())
            }
            _ => Err(FormError::wrong_type(field)),
        }
    }

    pub fn set_flag(&mut self, index: usize, on: bool) -> Result<(), FormError> {
        let field = &self.spec.fields[index];
        match &mut self.values[index] {
            FieldValue::Flag(current) => {
                *current = on;
                Ok(())
            }
            _ => Err(FormError::wrong_type(field)),
        }
    }

    /// Flip a switch; no effect on other kinds
    pub fn toggle(&mut self, index: usize) {
        if let FieldValue::Flag(on) = &mut self.values[index] {
            *on = !*on;
        }
    }

    pub fn push_entry(&mut self, index: usize, entry: &str) -> Result<(), FormError> {
        let field = &self.spec.fields[index];
        match &mut self.values[index] {
            FieldValue::List { entries, .. } => {
                entries.push(entry.to_string());
                Ok(())
            }
            _ => Err(FormError::wrong_type(field)),
        }
    }

    /// Move a list's pending text into its entries. Returns whether anything moved.
    pub fn commit_pending(&mut self, index: usize) -> bool {
        if let FieldValue::List { entries, pending } = &mut self.values[index] {
            let entry = pending.trim();
            if !entry.is_empty() {
                entries.push(entry.to_string());
                pending.clear();
                return true;
            }
        }
        false
    }

    pub fn pop_entry(&mut self, index: usize) -> Option<String> {
        match &mut self.values[index] {
            FieldValue::List { entries, .. } => entries.pop(),
            _ => None,
        }
    }

    /// Validate every field and build the fragment.
    ///
    /// Order: command token, options in declaration order, then positional
    /// entries. Empty inputs are left to the tool's defaults.
    pub fn fragment(&self) -> Result<Fragment, FormError> {
        let mut fragment = Vec::new();
        let mut positional = Vec::new();

        if let Some(command) = self.spec.command {
            fragment.push(command.to_string());
        }

        for (field, value) in self.spec.fields.iter().zip(&self.values) {
            match (&field.kind, value) {
                (FieldKind::Integer, FieldValue::Text(text)) => {
                    let text = text.trim();
                    if !text.is_empty() {
                        if text.parse::<i64>().is_err() {
                            return Err(invalid_number(field, text, "whole number"));
                        }
                        push_option(&mut fragment, field, text);
                    }
                }
                (FieldKind::Float, FieldValue::Text(text)) => {
                    let text = text.trim();
                    if !text.is_empty() {
                        match text.parse::<f64>() {
                            Ok(number) if number.is_finite() => {}
                            _ => return Err(invalid_number(field, text, "number")),
                        }
                        push_option(&mut fragment, field, text);
                    }
                }
                (FieldKind::Flag, FieldValue::Flag(on)) => {
                    if *on {
                        fragment.push(field.flag.to_string());
                    }
                }
                (FieldKind::File { .. }, FieldValue::Text(text)) => {
                    let text = text.trim();
                    if !text.is_empty() {
                        push_option(&mut fragment, field, text);
                    }
                }
                (FieldKind::FileList { .. }, FieldValue::List { entries, pending }) => {
                    positional.extend(entries.iter().cloned());
                    let pending = pending.trim();
                    if !pending.is_empty() {
                        positional.push(pending.to_string());
                    }
                }
                // Values are created from the field kind and setters keep them matched
                _ => return Err(FormError::wrong_type(field)),
            }
        }

        fragment.extend(positional);
        Ok(fragment)
    }
}

fn push_option(fragment: &mut Fragment, field: &FieldSpec, value: &str) {
    fragment.push(field.flag.to_string());
    fragment.push(value.to_string());
}

fn invalid_number(field: &FieldSpec, value: &str, expected: &'static str) -> FormError {
    FormError::InvalidNumber {
        field: field.name,
        label: field.label,
        value: value.to_string(),
        expected,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_form() -> FormState {
        FormState::new(FormSpec {
            title: "sample",
            command: Some("Mpear"),
            fields: vec![
                FieldSpec::file_list("inputs", "Input Files", &[".sam"]),
                FieldSpec::integer("--over", "Overlap Threshold", "1"),
                FieldSpec::flag("--unclip", "Reclaim Soft Clipped Bases"),
                FieldSpec::float("--alpha", "Significance Level", "0.01"),
                FieldSpec::read_file("--cost", "Alignment Parameter File", &[".agc"]),
            ],
        })
    }

    #[test]
    fn test_untouched_form_emits_only_command() {
        let form = sample_form();
        assert_eq!(form.fragment().unwrap(), vec!["Mpear".to_string()]);
    }

    #[test]
    fn test_fragment_orders_options_then_positionals() {
        let mut form = sample_form();
        form.push_entry(0, "a.sam").unwrap();
        form.push_entry(0, "b.sam").unwrap();
        form.set_text(1, " 12 ").unwrap();
        form.toggle(2);
        form.set_text(3, "0.05").unwrap();
        form.set_text(4, "costs.agc").unwrap();

        assert_eq!(
            form.fragment().unwrap(),
            vec!["Mpear", "--over", "12", "--unclip", "--alpha", "0.05", "--cost", "costs.agc", "a.sam", "b.sam"]
        );
    }

    #[test]
    fn test_pending_list_entry_is_included() {
        let mut form = sample_form();
        form.text_mut(0).unwrap().push_str("typed.sam");
        assert_eq!(form.fragment().unwrap(), vec!["Mpear", "typed.sam"]);

        assert!(form.commit_pending(0));
        assert!(!form.commit_pending(0));
        assert_eq!(form.pop_entry(0), Some("typed.sam".to_string()));
    }

    #[test]
    fn test_bad_integer_names_the_field() {
        let mut form = sample_form();
        form.set_text(1, "ten").unwrap();
        let err = form.fragment().unwrap_err();
        assert_eq!(err.field(), Some("over"));
        assert_eq!(err.to_string(), "Overlap Threshold: 'ten' is not a valid whole number");
    }

    #[test]
    fn test_non_finite_float_rejected() {
        let mut form = sample_form();
        form.set_text(3, "NaN").unwrap();
        assert!(matches!(form.fragment(), Err(FormError::InvalidNumber { field: "alpha", .. })));
    }

    #[test]
    fn test_setters_reject_mismatched_kinds() {
        let mut form = sample_form();
        assert!(form.set_text(2, "yes").is_err());
        assert!(form.set_flag(1, true).is_err());
        assert!(form.push_entry(4, "x").is_err());
        assert!(form.index_of("nope").is_err());
        assert_eq!(form.index_of("alpha").unwrap(), 3);
    }
}
