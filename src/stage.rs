//! Stage definitions.
//!
//! A stage is a filter or merger sub-tool of prosynar whose arguments are
//! collected by its own dialog. Filters are independently optional; exactly
//! one merger runs.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Optional filter stages, in the order they are handed to the tool
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Filter {
    /// Filter on the overlap implied by the initial alignments
    #[serde(rename = "Frover")]
    ReferenceOverlap,
    /// Filter on alignment overlap, weighted by probability
    #[serde(rename = "Fprover")]
    ProbabilisticReferenceOverlap,
    /// Filter pairs landing in problematic repeat regions
    #[serde(rename = "Fpprobreg")]
    ProbabilisticRepeatRegion,
}

impl Filter {
    /// Every filter, in declaration order.
    pub const ALL: [Filter; 3] = [
        Filter::ReferenceOverlap,
        Filter::ProbabilisticReferenceOverlap,
        Filter::ProbabilisticRepeatRegion,
    ];

    /// Command token the tool dispatches on
    pub fn command(&self) -> &'static str {
        match self {
            Filter::ReferenceOverlap => "Frover",
            Filter::ProbabilisticReferenceOverlap => "Fprover",
            Filter::ProbabilisticRepeatRegion => "Fpprobreg",
        }
    }

    /// Checkbox label in the selection dialog
    pub fn label(&self) -> &'static str {
        match self {
            Filter::ReferenceOverlap => "Naive Reference Overlap",
            Filter::ProbabilisticReferenceOverlap => "Probabilistic Reference Overlap",
            Filter::ProbabilisticRepeatRegion => "Probabilistic Reference Repeat",
        }
    }

    /// Title of the filter's own argument dialog
    pub fn title(&self) -> &'static str {
        match self {
            Filter::ReferenceOverlap => "prosynar Reference Overlap Filter",
            Filter::ProbabilisticReferenceOverlap => "prosynar Probabilistic Reference Overlap Filter",
            Filter::ProbabilisticRepeatRegion => "prosynar Probabilistic Repeat Region Filter",
        }
    }

    fn index(&self) -> usize {
        match self {
            Filter::ReferenceOverlap => 0,
            Filter::ProbabilisticReferenceOverlap => 1,
            Filter::ProbabilisticRepeatRegion => 2,
        }
    }
}

/// Merge strategies; exactly one is active per run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Merger {
    /// Merge by aligning the two reads
    #[default]
    #[serde(rename = "Malign")]
    Align,
    /// Merge by sliding the reads past each other (FLASH)
    #[serde(rename = "Mflash")]
    Flash,
    /// Merge by sliding for the highest score (PEAR)
    #[serde(rename = "Mpear")]
    Pear,
}

impl Merger {
    /// Every merger, in the order the selection dialog lists them.
    pub const ALL: [Merger; 3] = [Merger::Align, Merger::Flash, Merger::Pear];

    pub fn command(&self) -> &'static str {
        match self {
            Merger::Align => "Malign",
            Merger::Flash => "Mflash",
            Merger::Pear => "Mpear",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Merger::Align => "Align",
            Merger::Flash => "FLASH",
            Merger::Pear => "PEAR",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Merger::Align => "prosynar Alignment Merger",
            Merger::Flash => "prosynar FLASH Merger",
            Merger::Pear => "prosynar PEAR Merger",
        }
    }
}

/// A filter or merger stage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    Filter(Filter),
    Merger(Merger),
}

impl Stage {
    pub fn command(&self) -> &'static str {
        match self {
            Stage::Filter(filter) => filter.command(),
            Stage::Merger(merger) => merger.command(),
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Stage::Filter(filter) => filter.title(),
            Stage::Merger(merger) => merger.title(),
        }
    }

    /// Look a stage up by its command token.
    pub fn from_command(command: &str) -> Option<Stage> {
        Filter::ALL
            .iter()
            .find(|f| f.command() == command)
            .map(|f| Stage::Filter(*f))
            .or_else(|| {
                Merger::ALL
                    .iter()
                    .find(|m| m.command() == command)
                    .map(|m| Stage::Merger(*m))
            })
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.command())
    }
}

/// Outcome of the filter/merge selection step.
///
/// The merger is a single value, so two active mergers cannot be expressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Selection {
    filters: [bool; 3],
    merger: Merger,
}

impl Selection {
    pub fn new(merger: Merger) -> Self {
        Self {
            filters: [false; 3],
            merger,
        }
    }

    /// Builder-style filter toggle
    pub fn with_filter(mut self, filter: Filter) -> Self {
        self.filters[filter.index()] = true;
        self
    }

    pub fn set_filter(&mut self, filter: Filter, enabled: bool) {
        self.filters[filter.index()] = enabled;
    }

    pub fn set_merger(&mut self, merger: Merger) {
        self.merger = merger;
    }

    pub fn is_selected(&self, filter: Filter) -> bool {
        self.filters[filter.index()]
    }

    pub fn merger(&self) -> Merger {
        self.merger
    }

    /// Selected filters in declaration order
    pub fn filters(&self) -> impl Iterator<Item = Filter> + '_ {
        Filter::ALL.into_iter().filter(|f| self.is_selected(*f))
    }

    /// Stages whose dialogs run, filters first then the merger.
    pub fn stages(&self) -> Vec<Stage> {
        self.filters()
            .map(Stage::Filter)
            .chain(std::iter::once(Stage::Merger(self.merger)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_selection_runs_only_align() {
        let selection = Selection::default();
        assert_eq!(selection.merger(), Merger::Align);
        assert_eq!(selection.stages(), vec![Stage::Merger(Merger::Align)]);
    }

    #[test]
    fn test_stages_follow_declaration_order() {
        // Toggled out of order on purpose
        let selection = Selection::new(Merger::Pear)
            .with_filter(Filter::ProbabilisticRepeatRegion)
            .with_filter(Filter::ReferenceOverlap);

        assert_eq!(
            selection.stages(),
            vec![
                Stage::Filter(Filter::ReferenceOverlap),
                Stage::Filter(Filter::ProbabilisticRepeatRegion),
                Stage::Merger(Merger::Pear),
            ]
        );
    }

    #[test]
    fn test_set_filter_can_clear() {
        let mut selection = Selection::default().with_filter(Filter::ReferenceOverlap);
        selection.set_filter(Filter::ReferenceOverlap, false);
        assert_eq!(selection.filters().count(), 0);
    }

    #[test]
    fn test_from_command() {
        assert_eq!(
            Stage::from_command("Fprover"),
            Some(Stage::Filter(Filter::ProbabilisticReferenceOverlap))
        );
        assert_eq!(Stage::from_command("Mflash"), Some(Stage::Merger(Merger::Flash)));
        assert_eq!(Stage::from_command("Mnope"), None);
    }

    #[test]
    fn test_serde_uses_command_names() {
        let merger: Merger = serde_yaml::from_str("Mpear").unwrap();
        assert_eq!(merger, Merger::Pear);
        let filters: Vec<Filter> = serde_yaml::from_str("[Frover, Fpprobreg]").unwrap();
        assert_eq!(
            filters,
            vec![Filter::ReferenceOverlap, Filter::ProbabilisticRepeatRegion]
        );
    }
}
