//! Form schema types.

/// How a field is edited and how it turns into argument tokens
#[derive(Debug, Clone, PartialEq)]
pub enum FieldKind {
    /// Whole number, emitted as `flag value`
    Integer,
    /// Real number, emitted as `flag value`
    Float,
    /// On/off switch, emitted as a bare `flag` when on
    Flag,
    /// Single path, emitted as `flag path`
    File {
        extensions: &'static [&'static str],
        write: bool,
    },
    /// Positional paths, emitted after every option
    FileList { extensions: &'static [&'static str] },
}

/// One input of a form.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldSpec {
    /// Answers-file key; the flag without its leading dashes
    pub name: &'static str,
    /// Flag handed to the tool; empty for positional lists
    pub flag: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
    /// The tool's documented example value
    pub hint: &'static str,
}

impl FieldSpec {
    pub fn integer(flag: &'static str, label: &'static str, hint: &'static str) -> Self {
        Self {
            name: strip_dashes(flag),
            flag,
            label,
            kind: FieldKind::Integer,
            hint,
        }
    }

    pub fn float(flag: &'static str, label: &'static str, hint: &'static str) -> Self {
        Self {
            name: strip_dashes(flag),
            flag,
            label,
            kind: FieldKind::Float,
            hint,
        }
    }

    pub fn flag(flag: &'static str, label: &'static str) -> Self {
        Self {
            name: strip_dashes(flag),
            flag,
            label,
            kind: FieldKind::Flag,
            hint: "",
        }
    }

    pub fn read_file(
        flag: &'static str,
        label: &'static str,
        extensions: &'static [&'static str],
    ) -> Self {
        Self {
            name: strip_dashes(flag),
            flag,
            label,
            kind: FieldKind::File { extensions, write: false },
            hint: "",
        }
    }

    pub fn write_file(
        flag: &'static str,
        label: &'static str,
        extensions: &'static [&'static str],
    ) -> Self {
        Self {
            name: strip_dashes(flag),
            flag,
            label,
            kind: FieldKind::File { extensions, write: true },
            hint: "",
        }
    }

    pub fn file_list(
        name: &'static str,
        label: &'static str,
        extensions: &'static [&'static str],
    ) -> Self {
        Self {
            name,
            flag: "",
            label,
            kind: FieldKind::FileList { extensions },
            hint: "",
        }
    }

    /// Short placeholder shown in an empty input
    pub fn placeholder(&self) -> String {
        match &self.kind {
            FieldKind::Integer | FieldKind::Float => format!("default, e.g. {}", self.hint),
            FieldKind::Flag => String::new(),
            FieldKind::File { extensions, write } => {
                let mode = if *write { "output" } else { "input" };
                format!("{} {}", mode, extensions.join(" "))
            }
            FieldKind::FileList { extensions } => format!("add {}", extensions.join(" ")),
        }
    }
}

fn strip_dashes(flag: &'static str) -> &'static str {
    flag.trim_start_matches('-')
}

/// A complete dialog description
#[derive(Debug, Clone, PartialEq)]
pub struct FormSpec {
    pub title: &'static str,
    /// Token emitted ahead of every field, e.g. the stage command
    pub command: Option<&'static str>,
    pub fields: Vec<FieldSpec>,
}

impl FormSpec {
    pub fn field(&self, name: &str) -> Option<(usize, &FieldSpec)> {
        self.fields.iter().enumerate().find(|(_, f)| f.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names_drop_leading_dashes() {
        assert_eq!(FieldSpec::integer("--over", "Overlap Threshold", "10").name, "over");
        assert_eq!(FieldSpec::flag("--unclip", "Reclaim").name, "unclip");
        assert_eq!(FieldSpec::file_list("inputs", "Input Files", &[".sam"]).name, "inputs");
    }

    #[test]
    fn test_placeholders() {
        let over = FieldSpec::integer("--over", "Overlap Threshold", "10");
        assert_eq!(over.placeholder(), "default, e.g. 10");
        let out = FieldSpec::write_file("--out", "Sequence Output File", &[".fq", ".fastq"]);
        assert_eq!(out.placeholder(), "output .fq .fastq");
    }
}
