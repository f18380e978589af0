//! Error types for ECS Exec.
//!
//! Every fatal condition in a run is represented here and returned up to
//! `main`, which is the only place the process is terminated.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Hint logged whenever the final `execute-command` invocation fails.
pub const EXEC_REMEDIATION_HINT: &str =
    "Please ensure that ECS Exec is enabled for the task/container and try again.";

#[derive(Error, Debug)]
pub enum Error {
    #[error("Failed to get AWS profiles: {}", .0)]
    ProfileListing(String),

    #[error("No AWS profiles found. Please configure AWS CLI.")]
    NoProfiles,

    #[error("Error {}: {}", .context, .message)]
    Api { context: String, message: String },

    #[error("No ECS clusters found. Ensure your ECS environment is set up and you are logged in.")]
    NoClusters,

    #[error("No services found in cluster {}", .cluster)]
    NoServices { cluster: String },

    #[error("No running tasks found for service {} in cluster {}", .service, .cluster)]
    NoRunningTasks { cluster: String, service: String },

    #[error("No details found for task {}", .task)]
    NoTaskDetails { task: String },

    #[error("No containers found for task {}", .task)]
    NoContainers { task: String },

    #[error("session-manager-plugin is required when using --ssm, but it was not found.")]
    PluginMissing,

    #[error("Input closed before a value was entered.")]
    InputClosed,

    #[error("STDIO error: {}", .0)]
    Stdio(#[from] std::io::Error),

    #[error("Failed to start ECS Exec command: {}", .0)]
    ExecSpawn(std::io::Error),

    #[error("ECS Exec command failed with exit code {}", .code)]
    ExecFailed { code: i32 },
}

impl Error {
    /// Process exit code for this error.
    ///
    /// A failed `execute-command` propagates the child's own code; every
    /// other fatal condition exits with 1.
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::ExecFailed { code } => *code,
            _ => 1,
        }
    }

    /// Wraps an AWS SDK failure with a description of what was being attempted.
    pub fn api(context: impl Into<String>, err: anyhow::Error) -> Self {
        Error::Api {
            context: context.into(),
            message: format!("{err:#}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exec_failure_propagates_exit_code() {
        assert_eq!(Error::ExecFailed { code: 137 }.exit_code(), 137);
        assert_eq!(Error::ExecFailed { code: 2 }.exit_code(), 2);
    }

    #[test]
    fn test_internal_errors_exit_with_one() {
        assert_eq!(Error::NoProfiles.exit_code(), 1);
        assert_eq!(Error::NoClusters.exit_code(), 1);
        assert_eq!(Error::PluginMissing.exit_code(), 1);
        assert_eq!(Error::InputClosed.exit_code(), 1);
        assert_eq!(
            Error::NoContainers {
                task: "t1".to_string()
            }
            .exit_code(),
            1
        );
    }

    #[test]
    fn test_api_error_message_includes_context() {
        let err = Error::api(
            "listing ECS services for cluster c1",
            anyhow::anyhow!("AccessDeniedException"),
        );
        let message = err.to_string();
        assert!(message.contains("listing ECS services for cluster c1"));
        assert!(message.contains("AccessDeniedException"));
        assert_eq!(err.exit_code(), 1);
    }

    #[test]
    fn test_empty_result_messages_name_identifiers() {
        let err = Error::NoRunningTasks {
            cluster: "c1".to_string(),
            service: "web".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "No running tasks found for service web in cluster c1"
        );
    }
}
