// Turn one raw Docker stats sample into ContainerMetrics.

use crate::error::MetricsError;
use crate::models::ContainerMetrics;
use bollard::models::ContainerStatsResponse;

/// CPU% = cpu delta / system delta * online CPUs * 100 (0 when the system delta is not positive).
/// Memory is the current usage in bytes.
pub fn container_metrics(s: &ContainerStatsResponse) -> Result<ContainerMetrics, MetricsError> {
    let cpu_stats = s
        .cpu_stats
        .as_ref()
        .ok_or_else(|| MetricsError::Unavailable("missing cpu_stats".into()))?;
    let precpu_stats = s
        .precpu_stats
        .as_ref()
        .ok_or_else(|| MetricsError::Unavailable("missing precpu_stats".into()))?;

    let total = |u: Option<&bollard::models::ContainerCpuUsage>| {
        u.and_then(|u| u.total_usage).unwrap_or(0) as i64
    };
    let cpu_delta = total(cpu_stats.cpu_usage.as_ref()) - total(precpu_stats.cpu_usage.as_ref());
    let system_delta = cpu_stats.system_cpu_usage.unwrap_or(0) as i64
        - precpu_stats.system_cpu_usage.unwrap_or(0) as i64;
    let online = cpu_stats.online_cpus.unwrap_or(1) as f64;

    let cpu_percent = if system_delta > 0 && online > 0.0 {
        (cpu_delta as f64 / system_delta as f64) * online * 100.0
    } else {
        0.0
    };

    let memory_usage_bytes = s.memory_stats.as_ref().and_then(|m| m.usage).unwrap_or(0);

    Ok(ContainerMetrics {
        cpu_percent,
        memory_usage_bytes,
    })
}
