// Shared test helpers: scripted local source and remote runner

#![allow(dead_code)]

use docker_dashboard::docker_repo::ContainerSource;
use docker_dashboard::error::{LocalError, MetricsError, RemoteError};
use docker_dashboard::models::{ContainerMetrics, LocalContainer};
use docker_dashboard::remote_repo::CommandRunner;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

type ListFn = Box<dyn Fn() -> Result<Vec<LocalContainer>, LocalError> + Send + Sync>;
type RunFn = Box<dyn Fn(&str) -> Result<String, RemoteError> + Send + Sync>;

pub fn container(name: &str, status: &str, cpu_percent: f64, mem_mb: u64) -> LocalContainer {
    LocalContainer {
        name: name.into(),
        image: format!("{name}:latest"),
        status: status.into(),
        metrics: Ok(ContainerMetrics {
            cpu_percent,
            memory_usage_bytes: mem_mb * 1024 * 1024,
        }),
    }
}

pub fn container_without_metrics(name: &str) -> LocalContainer {
    LocalContainer {
        name: name.into(),
        image: "<none>".into(),
        status: "exited".into(),
        metrics: Err(MetricsError::Unavailable("no sample".into())),
    }
}

/// Local source returning whatever `make` builds, optionally after a delay.
pub struct FakeSource {
    make: ListFn,
    delay: Duration,
    pub calls: AtomicUsize,
    in_flight: AtomicUsize,
    pub max_in_flight: AtomicUsize,
}

impl FakeSource {
    pub fn new<F>(make: F) -> Self
    where
        F: Fn() -> Result<Vec<LocalContainer>, LocalError> + Send + Sync + 'static,
    {
        Self {
            make: Box::new(make),
            delay: Duration::ZERO,
            calls: AtomicUsize::new(0),
            in_flight: AtomicUsize::new(0),
            max_in_flight: AtomicUsize::new(0),
        }
    }

    /// The single-row source from the end-to-end scenario.
    pub fn web() -> Self {
        Self::new(|| Ok(vec![container("web", "running", 1.5, 10)]))
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl ContainerSource for FakeSource {
    async fn list(&self) -> Result<Vec<LocalContainer>, LocalError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        (self.make)()
    }
}

/// Remote runner answering from a closure and recording every command.
pub struct FakeRunner {
    respond: RunFn,
    pub commands: Mutex<Vec<String>>,
}

impl FakeRunner {
    pub fn new<F>(respond: F) -> Self
    where
        F: Fn(&str) -> Result<String, RemoteError> + Send + Sync + 'static,
    {
        Self {
            respond: Box::new(respond),
            commands: Mutex::new(Vec::new()),
        }
    }

    /// Answers `hostname`, `docker stats` and `docker ps` with fixed text.
    pub fn scripted(hostname: &str, stats: &str, ps: &str) -> Self {
        let (hostname, stats, ps) = (hostname.to_string(), stats.to_string(), ps.to_string());
        Self::new(move |cmd| {
            if cmd == "hostname" {
                Ok(hostname.clone())
            } else if cmd.starts_with("docker stats") {
                Ok(stats.clone())
            } else if cmd.starts_with("docker ps") {
                Ok(ps.clone())
            } else {
                Ok(String::new())
            }
        })
    }

    pub fn count(&self, prefix: &str) -> usize {
        self.commands
            .lock()
            .unwrap()
            .iter()
            .filter(|c| c.starts_with(prefix))
            .count()
    }
}

impl CommandRunner for FakeRunner {
    async fn run(&self, command: &str) -> Result<String, RemoteError> {
        self.commands.lock().unwrap().push(command.to_string());
        (self.respond)(command)
    }
}

pub fn timeout() -> RemoteError {
    RemoteError::Timeout(15)
}

/// Visible screen rows after feeding `out` to a `cols` x `rows` terminal.
/// A tty in cooked mode turns `\n` into `\r\n`.
pub fn screen(out: &[u8], cols: u16, rows: u16) -> Vec<String> {
    let text = String::from_utf8_lossy(out).replace('\n', "\r\n");
    let mut parser = vt100::Parser::new(rows, cols, 0);
    parser.process(text.as_bytes());
    parser.screen().rows(0, cols).collect()
}
