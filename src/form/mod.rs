//! Form descriptions and the state behind every dialog.
//!
//! A form is a title, an optional leading command token and a list of typed
//! fields. Both the terminal dialogs and the answers-file replay edit a
//! [`FormState`] and read the resulting fragment from it.

pub mod catalog;
pub mod field;
pub mod state;

pub use catalog::{global_form, stage_form};
pub use field::{FieldKind, FieldSpec, FormSpec};
pub use state::{FieldValue, FormError, FormState};
