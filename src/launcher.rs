//! Launching the tool.
//!
//! One blocking invocation with inherited environment and standard streams.

use crate::accumulator::ArgumentVector;
use log::{info, warn};
use std::path::Path;
use std::process::{Command, ExitStatus};

#[derive(Debug, thiserror::Error)]
pub enum LaunchError {
    #[error("Failed to start '{program}': {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },
}

/// Run `executable` with the vector's arguments and wait for it to finish.
///
/// The exit status is reported back and logged, never acted on here.
pub fn launch(executable: &Path, vector: &ArgumentVector) -> Result<ExitStatus, LaunchError> {
    info!("Running: {}", vector);

    let mut command = Command::new(executable);
    command.args(vector.args());
    // The child sees the program name token as argv[0], not the resolved path
    #[cfg(unix)]
    {
        use std::os::unix::process::CommandExt;
        command.arg0(vector.program());
    }

    let status = command.status().map_err(|source| LaunchError::Spawn {
        program: executable.display().to_string(),
        source,
    })?;

    if status.success() {
        info!("{} finished successfully", vector.program());
    } else {
        warn!("{} finished with {}", vector.program(), status);
    }
    Ok(status)
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use crate::accumulator::assemble;

    fn frag(tokens: &[&str]) -> Vec<String> {
        tokens.iter().map(|t| t.to_string()).collect()
    }

    #[test]
    fn test_launch_passes_arguments_and_reports_status() {
        // sh -c SCRIPT NAME ARGS...: the script sees the stage arguments as $1..
        let vector = assemble(
            "sh",
            frag(&["-c", r#"[ "$1" = "--" ] && [ "$2" = "Malign" ] && exit 7"#, "sh"]),
            vec![frag(&["Malign"])],
        );
        let status = launch(Path::new("/bin/sh"), &vector).unwrap();
        assert_eq!(status.code(), Some(7));
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn test_launch_sets_program_token_as_argv0() {
        let dir = tempfile::TempDir::new().unwrap();
        let out = dir.path().join("argv0");
        let script = format!("tr '\\0' '\\n' < /proc/$$/cmdline | head -n 1 > '{}'", out.display());
        let vector = assemble("prosynar", frag(&["-c", &script]), vec![]);

        assert!(launch(Path::new("/bin/sh"), &vector).unwrap().success());
        let argv0 = std::fs::read_to_string(&out).unwrap();
        assert_eq!(argv0.trim_end(), vector.program());
    }

    #[test]
    fn test_launch_success() {
        let vector = assemble("sh", frag(&["-c", "exit 0"]), vec![]);
        assert!(launch(Path::new("/bin/sh"), &vector).unwrap().success());
    }

    #[test]
    fn test_launch_missing_binary() {
        let vector = assemble("nope", vec![], vec![]);
        let err = launch(Path::new("/nonexistent/prosynar"), &vector).unwrap_err();
        assert!(err.to_string().starts_with("Failed to start '/nonexistent/prosynar'"));
    }
}
