//! Builds and runs the `aws ecs execute-command` invocation.

use crate::app::Selection;
use crate::error::{Error, Result, EXEC_REMEDIATION_HINT};
use log::{error, info};
use std::process::{Command, ExitStatus, Stdio};

/// Argument vector for `aws ecs execute-command` targeting the selected container.
///
/// `--profile` and `--region` are appended only when set. The `--ssm` flag
/// has no effect here; it only gates the run on the plugin check.
pub fn build_execute_command(selection: &Selection, command: &str) -> Vec<String> {
    let mut argv: Vec<String> = [
        "aws",
        "ecs",
        "execute-command",
        "--cluster",
        selection.cluster.as_str(),
        "--container",
        selection.container.as_str(),
        "--task",
        selection.task.as_str(),
        "--interactive",
        "--command",
        command,
    ]
    .iter()
    .map(|s| s.to_string())
    .collect();

    if let Some(profile) = selection.profile.as_deref().filter(|p| !p.is_empty()) {
        argv.extend(["--profile".to_string(), profile.to_string()]);
    }
    if !selection.region.is_empty() {
        argv.extend(["--region".to_string(), selection.region.clone()]);
    }

    argv
}

/// Runs `argv` with the terminal handed straight to the child and waits for it.
///
/// # Errors
/// Returns [`Error::ExecSpawn`] if the program cannot be started and
/// [`Error::ExecFailed`] carrying the child's exit code if it fails.
pub fn execute(argv: &[String]) -> Result<()> {
    let (program, args) = argv
        .split_first()
        .ok_or_else(|| Error::ExecSpawn(std::io::Error::other("empty command line")))?;

    info!("Executing command: {}", argv.join(" "));

    let mut command = Command::new(program);
    command.args(args);
    run_interactive(command)
}

/// Spawns `command` with inherited stdio and maps a non-zero exit to [`Error::ExecFailed`].
pub fn run_interactive(mut command: Command) -> Result<()> {
    let status = command
        .stdin(Stdio::inherit())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .status()
        .map_err(Error::ExecSpawn)?;

    if status.success() {
        return Ok(());
    }

    let code = exit_code(status);
    error!("ECS Exec command failed: {status}");
    error!("{EXEC_REMEDIATION_HINT}");
    Err(Error::ExecFailed { code })
}

/// Exit code to propagate for a failed child; signal deaths map to `128 + signal` on Unix.
fn exit_code(status: ExitStatus) -> i32 {
    if let Some(code) = status.code() {
        return code;
    }

    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        if let Some(signal) = status.signal() {
            return 128 + signal;
        }
    }

    1
}
