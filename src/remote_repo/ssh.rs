// CommandRunner backed by the system ssh client

use super::CommandRunner;
use crate::config::RemoteConfig;
use crate::error::RemoteError;
use std::path::PathBuf;
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;

/// Connect timeout handed to ssh itself.
pub const CONNECT_TIMEOUT_SECS: u64 = 10;
/// Hard bound on one remote command, connection included.
pub const COMMAND_TIMEOUT: Duration = Duration::from_secs(15);

#[derive(Debug, Clone)]
pub struct SshRunner {
    host: String,
    user: String,
    key_path: PathBuf,
    port: u16,
    timeout: Duration,
}

impl SshRunner {
    pub fn new(config: &RemoteConfig) -> Self {
        Self {
            host: config.host.clone(),
            user: config.user.clone(),
            key_path: config.key_path.clone(),
            port: config.port,
            timeout: COMMAND_TIMEOUT,
        }
    }

    /// Arguments passed to `ssh` for `command`. Batch mode so a missing key never prompts.
    pub fn args(&self, command: &str) -> Vec<String> {
        vec![
            "-i".into(),
            self.key_path.display().to_string(),
            "-p".into(),
            self.port.to_string(),
            "-o".into(),
            "BatchMode=yes".into(),
            "-o".into(),
            format!("ConnectTimeout={CONNECT_TIMEOUT_SECS}"),
            "-o".into(),
            "StrictHostKeyChecking=accept-new".into(),
            format!("{}@{}", self.user, self.host),
            command.into(),
        ]
    }
}

impl CommandRunner for SshRunner {
    async fn run(&self, command: &str) -> Result<String, RemoteError> {
        let child = Command::new("ssh")
            .args(self.args(command))
            .stdin(Stdio::null())
            .kill_on_drop(true)
            .output();

        let output = tokio::time::timeout(self.timeout, child)
            .await
            .map_err(|_| RemoteError::Timeout(self.timeout.as_secs()))??;

        if !output.status.success() {
            return Err(RemoteError::Failed {
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }
        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }
}
