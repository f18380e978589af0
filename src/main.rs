//! ECS Exec - interactive shell access to ECS containers
//!
//! Walks the operator through picking an AWS profile, region, ECS cluster,
//! service, running task and container from numbered menus, then opens an
//! interactive session in that container with `aws ecs execute-command`.

mod app;
mod aws;
mod cli;
mod config;
mod error;
mod exec;
mod plugin;
mod profile;
mod selector;

use app::App;
use clap::Parser;
use cli::{Args, Settings};
use config::Config;
use log::{error, LevelFilter};
use std::io::Write;
use std::process::ExitCode;

/// Application entry point.
///
/// Every fatal condition is returned as an [`error::Error`] and turned into
/// the process exit status here; nothing below this function exits.
#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(args.verbose);

    let config = Config::load();
    let settings = Settings::resolve(args, config);

    match App::new(settings).run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            if !matches!(e, error::Error::ExecFailed { .. }) {
                error!("{e}");
            }
            ExitCode::from(exit_status_byte(e.exit_code()))
        }
    }
}

/// Logs as `LEVEL: message` on stderr; `--verbose` lowers the threshold to debug.
fn init_logging(verbose: bool) {
    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .format(|buf, record| writeln!(buf, "{}: {}", record.level(), record.args()))
        .init();
}

/// Narrows an exit code to the byte a process can actually report.
///
/// Codes that do not fit are reported as a generic failure rather than truncated.
fn exit_status_byte(code: i32) -> u8 {
    u8::try_from(code).unwrap_or(1)
}
