// Remote Docker containers over SSH: command runner, hostname cache, output parsing

mod parse;
mod ssh;

pub use parse::{StatsEntry, join_remote, parse_process_list, parse_stats};
pub use ssh::SshRunner;

use crate::error::RemoteError;
use crate::models::Row;
use std::future::Future;
use std::sync::{Arc, OnceLock};
use tracing::{info, instrument, warn};

pub const STATS_COMMAND: &str =
    r#"docker stats --no-stream --format "{{.Name}}|{{.CPUPerc}}|{{.MemUsage}}""#;
pub const PS_COMMAND: &str = r#"docker ps --format "{{.Names}}|{{.Image}}|{{.Status}}""#;
pub const HOSTNAME_COMMAND: &str = "hostname";

/// Runs a shell command on the remote host and returns its trimmed stdout.
pub trait CommandRunner: Send + Sync + 'static {
    fn run(&self, command: &str) -> impl Future<Output = Result<String, RemoteError>> + Send;
}

/// Label of the remote host. Resolved at most once for the process lifetime;
/// until then `fallback` (the configured SSH host) is reported.
#[derive(Debug, Clone)]
pub struct Hostname {
    resolved: Arc<OnceLock<String>>,
    fallback: String,
}

impl Hostname {
    pub fn new(fallback: impl Into<String>) -> Self {
        Self {
            resolved: Arc::new(OnceLock::new()),
            fallback: fallback.into(),
        }
    }

    /// A label that is already known (e.g. from configuration) and never looked up.
    pub fn fixed(name: impl Into<String>) -> Self {
        let name = name.into();
        let hostname = Self::new(name.clone());
        let _ = hostname.resolved.set(name);
        hostname
    }

    pub fn is_resolved(&self) -> bool {
        self.resolved.get().is_some()
    }

    pub fn get(&self) -> &str {
        self.resolved.get().map_or(self.fallback.as_str(), String::as_str)
    }

    fn set(&self, name: String) {
        let _ = self.resolved.set(name);
    }
}

/// Raw output of one remote cycle. `stats` failing alone only loses metrics.
#[derive(Debug)]
pub struct RemoteListing {
    pub stats: Result<String, RemoteError>,
    pub ps: String,
}

pub struct RemoteRepo<R> {
    runner: R,
    hostname: Hostname,
}

impl<R: CommandRunner> RemoteRepo<R> {
    pub fn new(runner: R, hostname: Hostname) -> Self {
        Self { runner, hostname }
    }

    pub fn hostname(&self) -> &Hostname {
        &self.hostname
    }

    pub fn runner(&self) -> &R {
        &self.runner
    }

    /// Resolves the hostname on first success; later calls are free.
    async fn resolve_hostname(&self) {
        if self.hostname.is_resolved() {
            return;
        }
        match self.runner.run(HOSTNAME_COMMAND).await {
            Ok(name) if !name.is_empty() => {
                info!(hostname = %name, "remote hostname resolved");
                self.hostname.set(name);
            }
            Ok(_) => {}
            Err(e) => {
                warn!(error = %e, operation = "resolve_hostname", "SSH error");
            }
        }
    }

    /// Fetches the stats and process listings. Fails only when the process list
    /// cannot be fetched.
    #[instrument(skip(self), fields(repo = "remote", operation = "fetch"))]
    pub async fn fetch(&self) -> Result<RemoteListing, RemoteError> {
        self.resolve_hostname().await;
        let stats = self.runner.run(STATS_COMMAND).await;
        let ps = self.runner.run(PS_COMMAND).await?;
        Ok(RemoteListing { stats, ps })
    }

    /// One remote cycle as rows. Any transport failure yields no rows.
    pub async fn collect(&self) -> Vec<Row> {
        let listing = match self.fetch().await {
            Ok(l) => l,
            Err(e) => {
                warn!(error = %e, operation = "remote_ps", "SSH error; no remote rows this cycle");
                return Vec::new();
            }
        };
        let stats = match listing.stats {
            Ok(raw) => parse_stats(&raw),
            Err(e) => {
                warn!(error = %e, operation = "remote_stats", "SSH error; remote metrics unavailable");
                Default::default()
            }
        };
        join_remote(&stats, &listing.ps, self.hostname.get())
    }
}
