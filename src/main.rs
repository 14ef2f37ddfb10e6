use anyhow::Result;
use docker_dashboard::*;
use std::io::IsTerminal;
use std::sync::Arc;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::time::FormatTime;
use tracing_subscriber::fmt::writer::BoxMakeWriter;

struct LocalTimer;

impl FormatTime for LocalTimer {
    fn format_time(&self, w: &mut tracing_subscriber::fmt::format::Writer<'_>) -> std::fmt::Result {
        write!(
            w,
            "{}",
            chrono::Local::now().format("%Y-%m-%dT%H:%M:%S%.3f%:z")
        )
    }
}

/// Resolves on Ctrl-C, or SIGTERM on unix.
async fn shutdown_signal() {
    #[cfg(unix)]
    {
        let mut sigterm = match tokio::signal::unix::signal(
            tokio::signal::unix::SignalKind::terminate(),
        ) {
            Ok(s) => s,
            Err(_) => {
                let _ = tokio::signal::ctrl_c().await;
                return;
            }
        };
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {}
            _ = sigterm.recv() => {}
        }
    }
    #[cfg(not(unix))]
    {
        let _ = tokio::signal::ctrl_c().await;
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let started = Instant::now();

    // stdout belongs to the dashboard; logs go to stderr or, when that is the
    // same terminal, to a file.
    let log_target = logging::target(
        std::io::stderr().is_terminal(),
        dirs::cache_dir().as_deref(),
    );
    let (log_target, writer, log_error) = match logging::open(&log_target) {
        Ok(writer) => (log_target, writer, None),
        Err(e) => (
            logging::LogTarget::Stderr,
            BoxMakeWriter::new(std::io::stderr),
            Some(e),
        ),
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_timer(LocalTimer)
        .with_env_filter(filter)
        .with_ansi(log_target.ansi())
        .with_writer(writer)
        .init();
    if let Some(e) = log_error {
        tracing::warn!(error = %e, "log file unavailable; logging to stderr");
    }

    let app_config = config::AppConfig::load()?;
    let refresh_interval = app_config.refresh_interval();
    tracing::info!(
        version = %version::banner(),
        refresh_interval_secs = app_config.refresh_interval_secs,
        remote = app_config.remote.enabled,
        log = ?log_target,
        "starting"
    );

    let hostname = match &app_config.active_hostname {
        Some(name) => remote_repo::Hostname::fixed(name.clone()),
        None => remote_repo::Hostname::new(app_config.remote.host.clone()),
    };
    let remote = app_config.remote.enabled.then(|| {
        remote_repo::RemoteRepo::new(
            remote_repo::SshRunner::new(&app_config.remote),
            hostname.clone(),
        )
    });
    let docker_repo = docker_repo::DockerRepo::connect()?;
    let aggregator = Arc::new(aggregator::Aggregator::new(docker_repo, remote));
    let state = Arc::new(state::SharedState::new());

    let cancel = CancellationToken::new();
    let signal_cancel = cancel.clone();
    tokio::spawn(async move {
        shutdown_signal().await;
        tracing::info!("Received shutdown signal");
        signal_cancel.cancel();
    });

    // First snapshot before anything is drawn.
    tokio::select! {
        biased;
        _ = cancel.cancelled() => {
            println!("\n[+] Dashboard terminated.");
            return Ok(());
        }
        _ = worker::poll_once(&aggregator, &state) => {}
    }

    let poller = worker::spawn(
        worker::PollerDeps {
            aggregator,
            state: state.clone(),
            cancel: cancel.clone(),
        },
        worker::PollerConfig {
            interval: refresh_interval,
        },
    );

    let ui = dashboard::Dashboard::new(
        std::io::stdout(),
        state,
        hostname,
        dashboard::DashboardConfig::new(refresh_interval),
    )
    .with_start(started);
    let result = ui.run(cancel.clone()).await;

    cancel.cancel();
    if let Err(e) = poller.await {
        tracing::warn!(error = %e, "poller task failed");
    }
    result?;

    println!("[+] Dashboard terminated.");
    Ok(())
}
