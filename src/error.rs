// Error taxonomy for collaborators and startup configuration

use thiserror::Error;

/// Malformed environment configuration. Fatal at startup.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{var} has invalid value {value:?}: {reason}")]
    Invalid {
        var: &'static str,
        value: String,
        reason: String,
    },
}

/// Remote transport, authentication or timeout failure.
#[derive(Debug, Error)]
pub enum RemoteError {
    #[error("failed to start ssh: {0}")]
    Spawn(#[from] std::io::Error),
    #[error("remote command timed out after {0}s")]
    Timeout(u64),
    #[error("remote command exited with {status}: {stderr}")]
    Failed { status: String, stderr: String },
}

/// Per-container stats query failure. The container row is still produced.
#[derive(Debug, Error)]
pub enum MetricsError {
    #[error("stats unavailable: {0}")]
    Unavailable(String),
    #[error("docker stats failed: {0}")]
    Docker(#[from] bollard::errors::Error),
}

/// Failure to list containers from the local Docker daemon.
#[derive(Debug, Error)]
pub enum LocalError {
    #[error("docker list_containers failed: {0}")]
    Docker(#[from] bollard::errors::Error),
}
