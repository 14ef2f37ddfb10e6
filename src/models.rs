// Domain models: dashboard rows and what the inspectors return

use crate::error::MetricsError;
use std::fmt;

/// Tag value for rows produced by the local Docker daemon.
pub const LOCAL_TAG: &str = "local";

/// Where a row came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    Local,
    /// Resolved remote hostname.
    Remote(String),
}

impl Source {
    pub fn tag(&self) -> &str {
        match self {
            Source::Local => LOCAL_TAG,
            Source::Remote(host) => host,
        }
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// One container line of the dashboard. cpu and mem are already formatted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    pub name: String,
    pub image: String,
    pub status: String,
    pub cpu: String,
    pub mem: String,
    pub source: Source,
}

impl Row {
    pub fn source_tag(&self) -> &str {
        self.source.tag()
    }

    pub fn status_class(&self) -> StatusClass {
        StatusClass::from_status(&self.status)
    }
}

/// Color class of the status column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusClass {
    Success,
    Failure,
    Warning,
}

impl StatusClass {
    /// Case-insensitive substring match: "running" wins, then "exited"/"stopped".
    pub fn from_status(status: &str) -> Self {
        let s = status.to_lowercase();
        if s.contains("running") {
            StatusClass::Success
        } else if s.contains("exited") || s.contains("stopped") {
            StatusClass::Failure
        } else {
            StatusClass::Warning
        }
    }
}

/// CPU and memory sample for one local container.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContainerMetrics {
    pub cpu_percent: f64,
    pub memory_usage_bytes: u64,
}

impl ContainerMetrics {
    pub fn cpu_text(&self) -> String {
        format!("{:.1}%", self.cpu_percent)
    }

    pub fn mem_text(&self) -> String {
        format!("{:.1} MB", self.memory_usage_bytes as f64 / (1024.0 * 1024.0))
    }
}

/// A container listed by the local daemon. Metrics may have failed independently.
#[derive(Debug)]
pub struct LocalContainer {
    pub name: String,
    pub image: String,
    pub status: String,
    pub metrics: Result<ContainerMetrics, MetricsError>,
}
