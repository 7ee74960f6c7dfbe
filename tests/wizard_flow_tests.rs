#[cfg(test)]
mod wizard_flow_tests {
    use std::io::Write;
    use tempfile::NamedTempFile;

    use color_eyre::Result;
    use prosynar_wizard::accumulator::Fragment;
    use prosynar_wizard::answers::{load_answers, AnswersDialogs};
    use prosynar_wizard::form::{FormSpec, FormState};
    use prosynar_wizard::stage::{Filter, Merger, Selection, Stage};
    use prosynar_wizard::wizard::{run_wizard, AbortPoint, Dialogs, WizardOutcome};

    fn answers_file(yaml: &str) -> NamedTempFile {
        let mut temp_file = NamedTempFile::new().unwrap();
        write!(temp_file, "{}", yaml).unwrap();
        temp_file
    }

    /// Confirms every form untouched and cancels the stage named `cancel_at`
    struct Untouched {
        selection: Selection,
        cancel_at: Option<Stage>,
        opened: Vec<String>,
    }

    impl Dialogs for Untouched {
        fn collect_global(&mut self, form: FormSpec) -> Result<Option<Fragment>> {
            self.opened.push(form.title.to_string());
            Ok(Some(FormState::new(form).fragment()?))
        }

        fn select_stages(&mut self) -> Result<Option<Selection>> {
            self.opened.push("selection".to_string());
            Ok(Some(self.selection))
        }

        fn collect_stage(&mut self, stage: Stage, form: FormSpec) -> Result<Option<Fragment>> {
            self.opened.push(form.title.to_string());
            if self.cancel_at == Some(stage) {
                return Ok(None);
            }
            Ok(Some(FormState::new(form).fragment()?))
        }
    }

    #[test]
    fn test_answers_file_to_vector() {
        let temp_file = answers_file(
            r#"
global:
  inputs: [sample_R.sam]
  ref: hg38.fa
  out: merged.fq
filters: [Fprover]
merger: Mflash
stages:
  Fprover:
    over: 15
    lr: -2.5
  Mflash:
    flashqual: true
"#,
        );

        let answers = load_answers(temp_file.path()).unwrap();
        let mut dialogs = AnswersDialogs::new(answers);
        let vector = match run_wizard("prosynar", &mut dialogs).unwrap() {
            WizardOutcome::Launch(vector) => vector,
            other => panic!("expected a launch, got {:?}", other),
        };
        assert_eq!(vector.as_slice().iter().filter(|t| *t == "--").count(), 2);
        assert_eq!(
            vector.into_vec(),
            vec![
                "prosynar", "--ref", "hg38.fa", "--out", "merged.fq", "sample_R.sam",
                "--", "Fprover", "--over", "15", "--lr", "-2.5",
                "--", "Mflash", "--flashqual",
            ]
        );
    }

    #[test]
    fn test_untouched_forms_still_name_every_stage() {
        let mut dialogs = Untouched {
            selection: Selection::new(Merger::Pear)
                .with_filter(Filter::ProbabilisticRepeatRegion)
                .with_filter(Filter::ReferenceOverlap),
            cancel_at: None,
            opened: Vec::new(),
        };

        let WizardOutcome::Launch(vector) = run_wizard("prosynar", &mut dialogs).unwrap() else {
            panic!("nothing was cancelled");
        };
        assert_eq!(
            vector.into_vec(),
            vec!["prosynar", "--", "Frover", "--", "Fpprobreg", "--", "Mpear"]
        );
        assert_eq!(dialogs.opened.len(), 5);
    }

    #[test]
    fn test_cancel_at_merger_stops_the_chain() {
        let mut dialogs = Untouched {
            selection: Selection::new(Merger::Align).with_filter(Filter::ReferenceOverlap),
            cancel_at: Some(Stage::Merger(Merger::Align)),
            opened: Vec::new(),
        };

        let outcome = run_wizard("prosynar", &mut dialogs).unwrap();
        assert_eq!(outcome, WizardOutcome::Aborted(AbortPoint::Stage(Stage::Merger(Merger::Align))));
        assert_eq!(
            dialogs.opened,
            vec![
                "prosynar GUI Helper",
                "selection",
                "prosynar Reference Overlap Filter",
                "prosynar Alignment Merger",
            ]
        );
    }

    #[test]
    fn test_bad_answer_is_an_error_not_an_abort() {
        let temp_file = answers_file("stages:\n  Malign: { over: many }\n");
        let answers = load_answers(temp_file.path()).unwrap();
        let mut dialogs = AnswersDialogs::new(answers);

        let err = run_wizard("prosynar", &mut dialogs).unwrap_err();
        assert!(err.to_string().contains("Overlap Threshold: 'many' is not a valid whole number"));
    }

    #[cfg(unix)]
    #[test]
    fn test_launch_resolved_tool_receives_vector() {
        use prosynar_wizard::launcher::launch;
        use prosynar_wizard::utils::resolve_tool;
        use std::fs;
        use std::os::unix::fs::PermissionsExt;
        use tempfile::TempDir;

        let bin = TempDir::new().unwrap();
        let record = bin.path().join("args.txt");
        let script = format!("#!/bin/sh\nprintf '%s\\n' \"$@\" > '{}'\n", record.display());
        let tool = bin.path().join("prosynar");
        fs::write(&tool, script).unwrap();
        fs::set_permissions(&tool, fs::Permissions::from_mode(0o755)).unwrap();

        let temp_file = answers_file("global: { inputs: [a.sam], thread: 2 }\nmerger: Mpear\n");
        let mut dialogs = AnswersDialogs::new(load_answers(temp_file.path()).unwrap());
        let WizardOutcome::Launch(vector) = run_wizard("prosynar", &mut dialogs).unwrap() else {
            panic!("answers never abort");
        };

        let resolved = resolve_tool("prosynar", Some(bin.path().as_os_str())).unwrap();
        let status = launch(&resolved, &vector).unwrap();
        assert!(status.success());

        let received = fs::read_to_string(&record).unwrap();
        assert_eq!(received.lines().collect::<Vec<_>>(), vec!["--thread", "2", "a.sam", "--", "Mpear"]);
    }
}
