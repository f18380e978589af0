//! Command-line flags and the resolved run settings.
//!
//! Flags are parsed with `clap`; [`Settings`] merges them with the config
//! file once at startup and is then passed to every stage of the run.

use crate::config::Config;
use clap::Parser;

/// Command run inside the container when neither a flag nor the config file sets one.
pub const DEFAULT_COMMAND: &str = "/bin/sh";

/// Command-line arguments for the `ecsexec` binary.
#[derive(Parser, Debug)]
#[command(name = "ecsexec", about = "ECS Exec Interactive Script", version)]
pub struct Args {
    /// AWS region
    #[arg(long)]
    pub region: Option<String>,

    /// AWS profile
    #[arg(long)]
    pub profile: Option<String>,

    /// Command to execute in container [default: /bin/sh]
    #[arg(long)]
    pub command: Option<String>,

    /// Force use of session-manager-plugin
    #[arg(long, action)]
    pub ssm: bool,

    /// Enable verbose logging
    #[arg(long, action)]
    pub verbose: bool,
}

/// Settings for a single run, built once from flags and config file.
///
/// Flags win over the config file, which wins over built-in defaults.
/// `profile` and `region` stay `None` when neither source provides a
/// non-empty value; they are then resolved interactively.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub profile: Option<String>,
    pub region: Option<String>,
    pub command: String,
    pub ssm: bool,
    pub verbose: bool,
}

impl Settings {
    pub fn resolve(args: Args, config: Config) -> Self {
        Self {
            profile: non_empty(args.profile).or(non_empty(config.profile)),
            region: non_empty(args.region).or(non_empty(config.region)),
            command: args
                .command
                .or(config.command)
                .unwrap_or_else(|| DEFAULT_COMMAND.to_string()),
            ssm: args.ssm,
            verbose: args.verbose,
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
