// Local Docker containers via bollard

mod stats;

pub use stats::container_metrics;

use crate::error::{LocalError, MetricsError};
use crate::models::{ContainerMetrics, LocalContainer};
use bollard::Docker;
use bollard::query_parameters::{ListContainersOptions, StatsOptions};
use futures_util::StreamExt;
use futures_util::future::join_all;
use std::future::Future;
use tracing::instrument;

/// Anything that can list the local containers with their metrics.
pub trait ContainerSource: Send + Sync + 'static {
    fn list(&self) -> impl Future<Output = Result<Vec<LocalContainer>, LocalError>> + Send;
}

pub struct DockerRepo {
    docker: Docker,
}

impl DockerRepo {
    pub fn connect() -> anyhow::Result<Self> {
        let docker = Docker::connect_with_unix_defaults()?;
        Ok(Self { docker })
    }

    async fn sample(&self, id: &str) -> Result<ContainerMetrics, MetricsError> {
        let options = StatsOptions {
            stream: false,
            ..Default::default()
        };
        let mut stream = self.docker.stats(id, Some(options));
        match stream.next().await {
            Some(Ok(s)) => container_metrics(&s),
            Some(Err(e)) => Err(MetricsError::Docker(e)),
            None => Err(MetricsError::Unavailable("empty stats stream".into())),
        }
    }
}

impl ContainerSource for DockerRepo {
    /// Lists every container (stopped ones included) and samples stats for all of them
    /// concurrently. A failed sample never drops the container.
    #[instrument(skip(self), fields(repo = "docker", operation = "list"))]
    async fn list(&self) -> Result<Vec<LocalContainer>, LocalError> {
        let options = ListContainersOptions {
            all: true,
            ..Default::default()
        };
        let containers = self.docker.list_containers(Some(options)).await?;

        let samples = join_all(containers.iter().map(|c| async move {
            let id = c.id.as_deref().unwrap_or_default();
            self.sample(id).await
        }))
        .await;

        Ok(containers
            .iter()
            .zip(samples)
            .map(|(c, metrics)| {
                let id = c.id.clone().unwrap_or_default();
                let name = c
                    .names
                    .as_ref()
                    .and_then(|n| n.first())
                    .map(|n| n.trim_start_matches('/').to_string())
                    .unwrap_or(id);
                let image = c
                    .image
                    .clone()
                    .filter(|i| !i.is_empty())
                    .unwrap_or_else(|| "<none>".into());
                let status = c
                    .state
                    .as_ref()
                    .map(|s| s.to_string())
                    .filter(|s| !s.is_empty())
                    .or_else(|| c.status.clone())
                    .unwrap_or_else(|| "unknown".into());
                LocalContainer {
                    name,
                    image,
                    status,
                    metrics,
                }
            })
            .collect())
    }
}
