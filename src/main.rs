use clap::Parser;
use color_eyre::eyre::WrapErr;
use color_eyre::Result;
use env_logger::Env;
use log::{info, warn};
use std::env;
use std::path::PathBuf;
use std::process::{ExitCode, ExitStatus};

use prosynar_wizard::answers::{load_answers, AnswersDialogs};
use prosynar_wizard::launcher::launch;
use prosynar_wizard::stage::{Filter, Merger};
use prosynar_wizard::tui::TerminalDialogs;
use prosynar_wizard::utils::resolve_tool;
use prosynar_wizard::wizard::{run_wizard, Dialogs, WizardOutcome};

/// Exit code used when a dialog is dismissed
const ABORT_EXIT_CODE: u8 = 1;

/// Collect prosynar arguments through a chain of dialogs and run it
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Tool to run: a name looked up on PATH or an explicit path
    #[arg(long, default_value = "prosynar")]
    tool: String,

    /// Replay a YAML answers file instead of showing dialogs
    #[arg(short, long)]
    answers: Option<PathBuf>,

    /// Print the argument vector instead of running the tool
    #[arg(long)]
    dry_run: bool,

    /// Print the dry-run vector as a JSON array
    #[arg(long, requires = "dry_run")]
    json: bool,

    /// Exit with the tool's exit code
    #[arg(long, conflicts_with = "dry_run")]
    forward_exit_code: bool,

    /// List the filter and merger stages and exit
    #[arg(long)]
    list_stages: bool,
}

fn main() -> Result<ExitCode> {
    // Initialize error handling
    color_eyre::install()?;

    let args = Args::parse();

    // Initialize logging with default filter level of "info"
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    if args.list_stages {
        print_stages();
        return Ok(ExitCode::SUCCESS);
    }

    // Fail before any dialog if there is nothing to launch
    let executable = if args.dry_run {
        None
    } else {
        let path = resolve_tool(&args.tool, env::var_os("PATH").as_deref())
            .wrap_err_with(|| format!("Cannot run '{}'", args.tool))?;
        info!("Using tool: {:?}", path);
        Some(path)
    };

    let mut dialogs: Box<dyn Dialogs> = match &args.answers {
        Some(path) => Box::new(AnswersDialogs::new(load_answers(path)?)),
        None => Box::new(TerminalDialogs),
    };

    let vector = match run_wizard(program_token(&args.tool), dialogs.as_mut())? {
        WizardOutcome::Launch(vector) => vector,
        WizardOutcome::Aborted(point) => {
            warn!("Cancelled at the {}; nothing was run", point);
            return Ok(ExitCode::from(ABORT_EXIT_CODE));
        }
    };

    let Some(executable) = executable else {
        if args.json {
            println!("{}", serde_json::to_string(vector.as_slice())?);
        } else {
            println!("{}", vector);
        }
        return Ok(ExitCode::SUCCESS);
    };

    let status = launch(&executable, &vector)?;
    Ok(ExitCode::from(exit_code(status, args.forward_exit_code)))
}

/// The program name token: the last component of the tool argument
fn program_token(tool: &str) -> &str {
    tool.rsplit('/').find(|part| !part.is_empty()).unwrap_or(tool)
}

fn exit_code(status: ExitStatus, forward: bool) -> u8 {
    if !forward {
        return 0;
    }
    match status.code() {
        Some(code) => u8::try_from(code).unwrap_or(ABORT_EXIT_CODE),
        // Killed by a signal
        None => ABORT_EXIT_CODE,
    }
}

fn print_stages() {
    println!("Filters:");
    for filter in Filter::ALL {
        println!("  {:<10} {}", filter.command(), filter.label());
    }
    println!("Mergers:");
    for merger in Merger::ALL {
        println!("  {:<10} {}", merger.command(), merger.label());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_defaults() {
        let args = Args::parse_from(["prosynar-wizard"]);

        assert_eq!(args.tool, "prosynar");
        assert_eq!(args.answers, None);
        assert!(!args.dry_run);
        assert!(!args.forward_exit_code);
    }

    #[test]
    fn test_answers_dry_run_args() {
        let args = Args::parse_from([
            "prosynar-wizard",
            "--tool", "~/bin/prosynar",
            "--answers", "run.yaml",
            "--dry-run",
            "--json",
        ]);

        assert_eq!(args.tool, "~/bin/prosynar");
        assert_eq!(args.answers, Some(PathBuf::from("run.yaml")));
        assert!(args.dry_run && args.json);
    }

    #[test]
    fn test_conflicting_args_rejected() {
        assert!(Args::try_parse_from(["prosynar-wizard", "--json"]).is_err());
        assert!(Args::try_parse_from(["prosynar-wizard", "--dry-run", "--forward-exit-code"]).is_err());
    }

    #[test]
    fn test_program_token() {
        assert_eq!(program_token("prosynar"), "prosynar");
        assert_eq!(program_token("/opt/tools/prosynar"), "prosynar");
        assert_eq!(program_token("~/bin/prosynar/"), "prosynar");
    }

    #[cfg(unix)]
    #[test]
    fn test_exit_code_forwarding() {
        use std::os::unix::process::ExitStatusExt;

        let failed = ExitStatus::from_raw(3 << 8);
        assert_eq!(exit_code(failed, false), 0);
        assert_eq!(exit_code(failed, true), 3);
        assert_eq!(exit_code(ExitStatus::from_raw(0), true), 0);
    }
}
