//! Built-in forms for prosynar and each of its stages.
//!
//! Flags, labels and example values mirror the tool's own option tables.

use super::field::{FieldSpec, FormSpec};
use crate::stage::{Filter, Merger, Stage};

const SAM: &[&str] = &[".sam", ".sam.gz", ".sam.gzip"];
const FASTA: &[&str] = &[".fa", ".fa.gz", ".fa.gzip"];
const FASTQ: &[&str] = &[".fq", ".fq.gz", ".fq.gzip", ".fastq", ".fastq.gz", ".fastq.gzip"];
const BED: &[&str] = &[".bed"];
const PDC: &[&str] = &[".pdc"];
const QUALM: &[&str] = &[".qualm"];

/// The top-level dialog: arguments applicable to every run.
pub fn global_form() -> FormSpec {
    FormSpec {
        title: "prosynar GUI Helper",
        command: None,
        fields: vec![
            FieldSpec::file_list("inputs", "Input Files", SAM),
            FieldSpec::read_file("--ref", "Reference File", FASTA),
            FieldSpec::read_file("--prob", "Problematic Region File", BED),
            FieldSpec::read_file("--cost", "Alignment Parameter File", PDC),
            FieldSpec::read_file("--qualm", "Quality Mangle File", QUALM),
            FieldSpec::write_file("--faildump", "Filtered Dump File", &[".sam"]),
            FieldSpec::integer("--thread", "Threads", "1"),
            FieldSpec::write_file("--out", "Sequence Output File", FASTQ),
            FieldSpec::write_file("--samze", "Alignment Hint Output File", &[".sam"]),
        ],
    }
}

/// The argument dialog for one stage; its fragment starts with the stage command.
pub fn stage_form(stage: Stage) -> FormSpec {
    let fields = match stage {
        Stage::Filter(Filter::ReferenceOverlap) => {
            vec![FieldSpec::integer("--over", "Overlap Threshold", "10")]
        }
        Stage::Filter(Filter::ProbabilisticReferenceOverlap) => {
            let mut fields = vec![
                FieldSpec::integer("--over", "Overlap Threshold", "10"),
                FieldSpec::read_file("--cost", "Alignment Parameter File", PDC),
            ];
            fields.extend(realign_fields());
            fields
        }
        Stage::Filter(Filter::ProbabilisticRepeatRegion) => {
            let mut fields = vec![
                FieldSpec::read_file("--prob", "Problematic Region File", BED),
                FieldSpec::read_file("--cost", "Alignment Parameter File", PDC),
            ];
            fields.extend(realign_fields());
            fields
        }
        Stage::Merger(Merger::Align) => vec![
            FieldSpec::integer("--over", "Overlap Threshold", "10"),
            FieldSpec::flag("--unclip", "Reclaim Soft Clipped Bases"),
            FieldSpec::read_file("--cost", "Alignment Parameter File", &[".agc"]),
            FieldSpec::read_file("--bqualm", "Biquality Mangle File", &[".bqualm"]),
        ],
        Stage::Merger(Merger::Flash) => vec![
            FieldSpec::integer("--over", "Overlap Threshold", "10"),
            FieldSpec::flag("--unclip", "Reclaim Soft Clipped Bases"),
            FieldSpec::integer("--maxexp", "Max Overlap Expected", "70"),
            FieldSpec::flag("--flashqual", "Original Quality Method"),
            FieldSpec::float("--misrat", "Mismatch Threshold", "1.0"),
        ],
        Stage::Merger(Merger::Pear) => vec![
            FieldSpec::integer("--over", "Overlap Threshold", "1"),
            FieldSpec::flag("--unclip", "Reclaim Soft Clipped Bases"),
            FieldSpec::flag("--pearqual", "Original Quality Method"),
            FieldSpec::float("--alpha", "Significance Level", "0.01"),
            FieldSpec::float("--ms", "Match Score", "1.0"),
            FieldSpec::float("--xs", "Mismatch Score", "-1.0"),
            FieldSpec::flag("--map", "Maximal Accepted Probability"),
        ],
    };

    FormSpec {
        title: stage.title(),
        command: Some(stage.command()),
        fields,
    }
}

/// Realignment settings shared by the probabilistic filters
fn realign_fields() -> Vec<FieldSpec> {
    vec![
        FieldSpec::integer("--overrun", "Realign Region Expansion", "20"),
        FieldSpec::integer("--rank", "Non-optimal Scores", "4"),
        FieldSpec::integer("--count", "Variant Alignment Count", "100"),
        FieldSpec::integer("--reclaimsoft", "Reclaim Soft-clip Compensation", "1"),
        FieldSpec::read_file("--qualm", "Quality Mangle File", QUALM),
        FieldSpec::integer("--hfuzz", "Score Encounter Limit", "1000"),
        FieldSpec::float("--lr", "Likelihood Threshold", "0.0"),
        FieldSpec::float("--gopen", "Gap Open Probability", "-3.0"),
        FieldSpec::float("--gext", "Gap Extend Probability", "-1.0"),
    ]
}
