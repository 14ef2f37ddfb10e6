// Terminal dimensions and resize notifications

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TermSize {
    pub cols: u16,
    pub rows: u16,
}

impl Default for TermSize {
    fn default() -> Self {
        Self { cols: 80, rows: 24 }
    }
}

impl TermSize {
    /// Size of the controlling terminal, if there is one.
    pub fn current() -> Option<Self> {
        crossterm::terminal::size()
            .ok()
            .filter(|(cols, rows)| *cols > 0 && *rows > 0)
            .map(|(cols, rows)| Self { cols, rows })
    }
}

/// Longest prefix of `text` that fits in `width` terminal columns.
pub fn clip(text: &str, width: usize) -> &str {
    let mut used = 0;
    for (i, ch) in text.char_indices() {
        used += UnicodeWidthChar::width(ch).unwrap_or(0);
        if used > width {
            return &text[..i];
        }
    }
    text
}

/// Pads `text` with spaces to exactly `width` columns, text in the middle.
/// Wider text is clipped so the result never wraps.
pub fn center(text: &str, width: usize) -> String {
    let text = clip(text, width);
    let len = UnicodeWidthStr::width(text);
    let left = (width - len) / 2;
    let right = width - len - left;
    format!("{}{}{}", " ".repeat(left), text, " ".repeat(right))
}

/// Screen rows taken by a line `width` columns wide on a `cols`-wide terminal.
pub fn wrapped_rows(width: usize, cols: usize) -> usize {
    width.div_ceil(cols.max(1)).max(1)
}

/// Stream of window-size-change notifications (SIGWINCH). Never fires where
/// unavailable.
pub struct ResizeEvents {
    #[cfg(unix)]
    signal: Option<tokio::signal::unix::Signal>,
}

impl ResizeEvents {
    pub fn new() -> Self {
        #[cfg(unix)]
        {
            let signal = match tokio::signal::unix::signal(
                tokio::signal::unix::SignalKind::window_change(),
            ) {
                Ok(s) => Some(s),
                Err(e) => {
                    tracing::debug!(error = %e, "resize notifications unavailable");
                    None
                }
            };
            Self { signal }
        }
        #[cfg(not(unix))]
        {
            Self {}
        }
    }

    pub async fn recv(&mut self) -> Option<()> {
        #[cfg(unix)]
        {
            if let Some(signal) = self.signal.as_mut() {
                return signal.recv().await;
            }
        }
        std::future::pending().await
    }
}

impl Default for ResizeEvents {
    fn default() -> Self {
        Self::new()
    }
}
