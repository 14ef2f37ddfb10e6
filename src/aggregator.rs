// Merge of remote and local container rows into one snapshot

use crate::docker_repo::ContainerSource;
use crate::models::{LocalContainer, Row, Source};
use crate::remote_repo::{CommandRunner, RemoteRepo};
use tracing::warn;

/// Placeholder metrics for a local container whose stats query failed.
pub const LOCAL_CPU_PLACEHOLDER: &str = "0.0%";
pub const LOCAL_MEM_PLACEHOLDER: &str = "0.0 MB";

/// Remote rows first, then local rows. No deduplication across sources.
pub fn merge(remote: Vec<Row>, local: Vec<Row>) -> Vec<Row> {
    let mut rows = remote;
    rows.extend(local);
    rows
}

/// Stamps a local container as a row, falling back to zero metrics on failure.
pub fn local_row(container: LocalContainer) -> Row {
    let (cpu, mem) = match &container.metrics {
        Ok(m) => (m.cpu_text(), m.mem_text()),
        Err(e) => {
            warn!(
                error = %e,
                container = %container.name,
                operation = "container_stats",
                "metrics unavailable; using zero values"
            );
            (LOCAL_CPU_PLACEHOLDER.into(), LOCAL_MEM_PLACEHOLDER.into())
        }
    };
    Row {
        name: container.name,
        image: container.image,
        status: container.status,
        cpu,
        mem,
        source: Source::Local,
    }
}

pub struct Aggregator<L, R> {
    local: L,
    remote: Option<RemoteRepo<R>>,
}

impl<L: ContainerSource, R: CommandRunner> Aggregator<L, R> {
    /// `remote` is `None` when the remote source is disabled.
    pub fn new(local: L, remote: Option<RemoteRepo<R>>) -> Self {
        Self { local, remote }
    }

    pub fn local(&self) -> &L {
        &self.local
    }

    pub async fn collect_local(&self) -> Vec<Row> {
        match self.local.list().await {
            Ok(containers) => containers.into_iter().map(local_row).collect(),
            Err(e) => {
                warn!(error = %e, operation = "list_local", "Local Docker error");
                Vec::new()
            }
        }
    }

    /// One full poll: remote (if enabled) then local. Never fails.
    pub async fn collect(&self) -> Vec<Row> {
        let remote = match &self.remote {
            Some(repo) => repo.collect().await,
            None => Vec::new(),
        };
        let local = self.collect_local().await;
        merge(remote, local)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MetricsError;
    use crate::models::ContainerMetrics;

    fn row(name: &str, source: Source) -> Row {
        Row {
            name: name.into(),
            image: "img".into(),
            status: "running".into(),
            cpu: "0%".into(),
            mem: "0 MB".into(),
            source,
        }
    }

    #[test]
    fn merge_puts_remote_before_local() {
        let remote = vec![row("z", Source::Remote("nas".into()))];
        let local = vec![row("a", Source::Local), row("b", Source::Local)];
        let merged = merge(remote, local);
        let tags: Vec<_> = merged.iter().map(|r| (r.name.as_str(), r.source_tag())).collect();
        assert_eq!(tags, [("z", "nas"), ("a", "local"), ("b", "local")]);
    }

    #[test]
    fn merge_keeps_name_collisions() {
        let merged = merge(
            vec![row("web", Source::Remote("nas".into()))],
            vec![row("web", Source::Local)],
        );
        assert_eq!(merged.len(), 2);
    }

    #[test]
    fn local_row_uses_placeholders_on_metrics_failure() {
        let r = local_row(LocalContainer {
            name: "db".into(),
            image: "postgres:16".into(),
            status: "exited".into(),
            metrics: Err(MetricsError::Unavailable("boom".into())),
        });
        assert_eq!(r.cpu, LOCAL_CPU_PLACEHOLDER);
        assert_eq!(r.mem, LOCAL_MEM_PLACEHOLDER);
        assert_eq!(r.source_tag(), "local");
    }

    #[test]
    fn local_row_formats_metrics() {
        let r = local_row(LocalContainer {
            name: "web".into(),
            image: "nginx".into(),
            status: "running".into(),
            metrics: Ok(ContainerMetrics {
                cpu_percent: 2.0,
                memory_usage_bytes: 5 * 1024 * 1024,
            }),
        });
        assert_eq!(r.cpu, "2.0%");
        assert_eq!(r.mem, "5.0 MB");
    }
}
