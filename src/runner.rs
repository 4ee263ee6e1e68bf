//! Shell command execution with timeout handling.

use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
use tokio::process::Command;
use tracing::debug;

use crate::utils::truncate;

/// Outcome of one shell command.
#[derive(Debug, Clone, PartialEq)]
pub struct CommandOutput {
    pub success: bool,
    /// Combined stdout and stderr, or a failure message when the
    /// command could not run at all.
    pub output: String,
}

impl CommandOutput {
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            output: message.into(),
        }
    }
}

/// Runs shell commands. Failures of any kind come back as an
/// unsuccessful [`CommandOutput`], never as an error.
#[async_trait]
pub trait CommandExecutor: Send + Sync {
    async fn run(&self, command: &str) -> CommandOutput;
}

/// Executor that hands commands to `sh -c` with a per-command timeout.
pub struct ShellRunner {
    shell: String,
    timeout: Duration,
}

impl ShellRunner {
    pub fn new(timeout: Duration) -> Self {
        Self {
            shell: "sh".to_string(),
            timeout,
        }
    }

    #[cfg(test)]
    fn with_shell(shell: &str, timeout: Duration) -> Self {
        Self {
            shell: shell.to_string(),
            timeout,
        }
    }
}

#[async_trait]
impl CommandExecutor for ShellRunner {
    async fn run(&self, command: &str) -> CommandOutput {
        debug!("Running: {}", truncate(command, 120));

        let child = match Command::new(&self.shell)
            .arg("-c")
            .arg(command)
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
        {
            Ok(child) => child,
            Err(e) => return CommandOutput::failure(e.to_string()),
        };

        match tokio::time::timeout(self.timeout, child.wait_with_output()).await {
            Ok(Ok(output)) => {
                let stdout = String::from_utf8_lossy(&output.stdout);
                let stderr = String::from_utf8_lossy(&output.stderr);
                CommandOutput {
                    success: output.status.success(),
                    output: format!("{}{}", stdout, stderr),
                }
            }
            Ok(Err(e)) => CommandOutput::failure(e.to_string()),
            // Dropping the wait future drops the child, and kill_on_drop
            // takes the shell down with it.
            Err(_) => CommandOutput::failure(format!(
                "Command timed out after {}s",
                self.timeout.as_secs()
            )),
        }
    }
}
