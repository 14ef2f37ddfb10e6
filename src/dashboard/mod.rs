// Foreground renderer: full redraw on the refresh cadence, status line every tick

pub mod overlay;
pub mod table;
pub mod terminal;

use crate::remote_repo::Hostname;
use crate::state::SharedState;
use crossterm::cursor::MoveTo;
use crossterm::queue;
use crossterm::style::{Color, Print, ResetColor, SetBackgroundColor};
use crossterm::terminal::{Clear, ClearType};
use std::io::{self, Write};
use std::sync::Arc;
use terminal::{ResizeEvents, TermSize, center, wrapped_rows};
use tokio::time::{Duration, Instant, MissedTickBehavior, interval};
use tokio_util::sync::CancellationToken;

pub const TITLE: &str = "🐳 Docker Infrastructure Dashboard";
pub const EMPTY_MESSAGE: &str = "No containers found";
const BANNER_BG: Color = Color::DarkBlue;
/// Banners plus divider above the table.
const HEADER_LINES: u16 = 3;

pub struct DashboardConfig {
    /// Full-redraw cadence; matches the poll interval.
    pub refresh_interval: Duration,
    /// Status-line cadence.
    pub tick: Duration,
}

impl DashboardConfig {
    pub fn new(refresh_interval: Duration) -> Self {
        Self {
            refresh_interval,
            tick: Duration::from_secs(1),
        }
    }
}

pub struct Dashboard<W> {
    out: W,
    state: Arc<SharedState>,
    hostname: Hostname,
    config: DashboardConfig,
    size: TermSize,
    started: Instant,
    last_redraw: Option<Instant>,
    /// Screen row reserved for the status line by the last redraw.
    overlay_row: u16,
}

impl<W: Write> Dashboard<W> {
    pub fn new(
        out: W,
        state: Arc<SharedState>,
        hostname: Hostname,
        config: DashboardConfig,
    ) -> Self {
        Self {
            out,
            state,
            hostname,
            config,
            size: TermSize::current().unwrap_or_default(),
            started: Instant::now(),
            last_redraw: None,
            overlay_row: HEADER_LINES,
        }
    }

    pub fn with_size(mut self, size: TermSize) -> Self {
        self.size = size;
        self
    }

    /// Uptime is measured from `started` (process start).
    pub fn with_start(mut self, started: Instant) -> Self {
        self.started = started;
        self
    }

    pub fn into_writer(self) -> W {
        self.out
    }

    /// Takes effect on the next draw of either kind.
    pub fn resize(&mut self, size: TermSize) {
        self.size = size;
    }

    /// Columns for full-width text. One short of the terminal width so a
    /// line never wraps or leaves the cursor in the last column.
    fn line_width(&self) -> usize {
        (self.size.cols as usize).saturating_sub(1)
    }

    fn banner(&mut self, text: &str) -> io::Result<()> {
        let width = self.line_width();
        queue!(
            self.out,
            SetBackgroundColor(BANNER_BG),
            Print(center(text, width)),
            ResetColor,
            Print("\n")
        )
    }

    /// Clears the screen and draws header, table and the reserved status line.
    pub fn redraw(&mut self) -> io::Result<()> {
        let cols = self.size.cols as usize;
        let width = self.line_width();
        queue!(self.out, Clear(ClearType::All), MoveTo(0, 0))?;

        self.banner(&format!("📡 Connected to: {}", self.hostname.get()))?;
        self.banner(TITLE)?;
        self.banner(&"=".repeat(width))?;

        let snapshot = self.state.snapshot();
        // Screen rows used so far; a table wider than the terminal wraps.
        let mut printed = HEADER_LINES as usize;
        if snapshot.is_empty() {
            queue!(self.out, Print(center(EMPTY_MESSAGE, width)), Print("\n"))?;
            printed += 1;
        } else {
            for line in table::render(snapshot.rows()) {
                let pad = cols.saturating_sub(line.width) / 2;
                queue!(
                    self.out,
                    Print(" ".repeat(pad)),
                    Print(&line.text),
                    Print("\n")
                )?;
                printed += wrapped_rows(pad + line.width, cols);
            }
        }
        queue!(self.out, Print(" ".repeat(width)))?;

        let last_row = self.size.rows.saturating_sub(1) as usize;
        self.overlay_row = printed.min(last_row) as u16;
        self.last_redraw = Some(Instant::now());
        self.out.flush()
    }

    /// Rewrites only the reserved status line.
    pub fn draw_overlay(&mut self) -> io::Result<()> {
        let now = Instant::now();
        let since_redraw = self
            .last_redraw
            .map_or(Duration::ZERO, |t| now.duration_since(t));
        let remaining = overlay::countdown_secs(self.config.refresh_interval, since_redraw);
        let msg = overlay::message(remaining, now.duration_since(self.started));
        let width = self.line_width();
        queue!(
            self.out,
            MoveTo(0, self.overlay_row),
            Clear(ClearType::CurrentLine),
            SetBackgroundColor(BANNER_BG),
            Print(center(&msg, width)),
            ResetColor
        )?;
        self.out.flush()
    }

    /// Runs until `cancel` fires, then hands back the writer.
    pub async fn run(mut self, cancel: CancellationToken) -> io::Result<W> {
        let mut content = interval(self.config.refresh_interval);
        content.set_missed_tick_behavior(MissedTickBehavior::Skip);
        let mut status = interval(self.config.tick);
        status.set_missed_tick_behavior(MissedTickBehavior::Skip);
        let mut resizes = ResizeEvents::new();

        loop {
            tokio::select! {
                biased;
                _ = cancel.cancelled() => break,
                _ = content.tick() => {
                    self.redraw()?;
                    self.draw_overlay()?;
                    status.reset();
                }
                _ = status.tick() => self.draw_overlay()?,
                Some(()) = resizes.recv() => {
                    if let Some(size) = TermSize::current() {
                        tracing::debug!(cols = size.cols, rows = size.rows, "terminal resized");
                        self.resize(size);
                    }
                }
            }
        }
        queue!(self.out, ResetColor, Print("\n"))?;
        self.out.flush()?;
        Ok(self.out)
    }
}
