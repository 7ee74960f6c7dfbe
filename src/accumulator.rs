//! Argument accumulation.
//!
//! Fragments collected by independent dialog sessions are concatenated into
//! the single argument vector handed to the tool. Fragments are never
//! inspected, only appended.

use std::fmt;

/// Literal token that ends one stage's arguments and starts the next
pub const STAGE_SEPARATOR: &str = "--";

/// Ordered argument tokens contributed by one dialog
pub type Fragment = Vec<String>;

/// The final argument vector, program name token first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArgumentVector {
    tokens: Vec<String>,
}

impl ArgumentVector {
    /// Start a vector holding only the program name token.
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            tokens: vec![program.into()],
        }
    }

    /// Append the global fragment as-is
    pub fn push_global(&mut self, fragment: Fragment) {
        self.tokens.extend(fragment);
    }

    /// Append a separator followed by one stage's fragment
    pub fn push_stage(&mut self, fragment: Fragment) {
        self.tokens.push(STAGE_SEPARATOR.to_string());
        self.tokens.extend(fragment);
    }

    pub fn program(&self) -> &str {
        &self.tokens[0]
    }

    /// Everything after the program name token
    pub fn args(&self) -> &[String] {
        &self.tokens[1..]
    }

    pub fn as_slice(&self) -> &[String] {
        &self.tokens
    }

    pub fn into_vec(self) -> Vec<String> {
        self.tokens
    }
}

impl fmt::Display for ArgumentVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let quoted: Vec<String> = self.tokens.iter().map(|t| shell_quote(t)).collect();
        f.write_str(&quoted.join(" "))
    }
}

/// Quote a token for display in a POSIX shell command line.
fn shell_quote(token: &str) -> String {
    let plain = !token.is_empty()
        && token
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || "-_./=:,+@%".contains(c));
    if plain {
        token.to_string()
    } else {
        format!("'{}'", token.replace('\'', r"'\''"))
    }
}

/// Build the final vector from the global fragment and stage fragments.
///
/// Stage fragments must already be in run order.
pub fn assemble(program: &str, global: Fragment, stages: Vec<Fragment>) -> ArgumentVector {
    let mut vector = ArgumentVector::new(program);
    vector.push_global(global);
    for fragment in stages {
        vector.push_stage(fragment);
    }
    vector
}
