// Box-drawn container table with a colored status column

use super::terminal::center;
use crate::models::{Row, StatusClass};
use crossterm::style::{Color, Stylize};
use unicode_width::UnicodeWidthStr;

pub const HEADERS: [&str; 6] = ["Name", "Image", "Status", "CPU", "Mem", "Source"];
const STATUS_COLUMN: usize = 2;

/// A rendered line and its width in terminal columns (escape codes excluded).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    pub text: String,
    pub width: usize,
}

impl Line {
    fn plain(text: String) -> Self {
        let width = UnicodeWidthStr::width(text.as_str());
        Self { text, width }
    }
}

pub fn status_color(class: StatusClass) -> Color {
    match class {
        StatusClass::Success => Color::Green,
        StatusClass::Failure => Color::Red,
        StatusClass::Warning => Color::Yellow,
    }
}

fn cells(row: &Row) -> [&str; 6] {
    [
        row.name.as_str(),
        row.image.as_str(),
        row.status.as_str(),
        row.cpu.as_str(),
        row.mem.as_str(),
        row.source_tag(),
    ]
}

fn rule(widths: &[usize; 6], left: char, fill: char, mid: char, right: char) -> Line {
    let mut s = String::new();
    s.push(left);
    for (i, w) in widths.iter().enumerate() {
        if i > 0 {
            s.push(mid);
        }
        s.extend(std::iter::repeat_n(fill, w + 2));
    }
    s.push(right);
    Line::plain(s)
}

fn content(widths: &[usize; 6], values: [&str; 6], status: Option<StatusClass>) -> Line {
    let mut text = String::from("│");
    let mut width = 1;
    for (i, (value, w)) in values.iter().zip(widths).enumerate() {
        let cell = format!(" {} ", center(value, *w));
        width += UnicodeWidthStr::width(cell.as_str()) + 1;
        match status {
            Some(class) if i == STATUS_COLUMN => {
                text.push_str(&cell.as_str().with(status_color(class)).to_string());
            }
            _ => text.push_str(&cell),
        }
        text.push('│');
    }
    Line { text, width }
}

/// Renders rows as a grid: double rule under the header, single rules between rows.
pub fn render(rows: &[Row]) -> Vec<Line> {
    let mut widths = HEADERS.map(|h| UnicodeWidthStr::width(h));
    for row in rows {
        for (w, value) in widths.iter_mut().zip(cells(row)) {
            *w = (*w).max(UnicodeWidthStr::width(value));
        }
    }

    let mut lines = Vec::with_capacity(rows.len() * 2 + 3);
    lines.push(rule(&widths, '╒', '═', '╤', '╕'));
    lines.push(content(&widths, HEADERS, None));
    lines.push(rule(&widths, '╞', '═', '╪', '╡'));
    for (i, row) in rows.iter().enumerate() {
        if i > 0 {
            lines.push(rule(&widths, '├', '─', '┼', '┤'));
        }
        lines.push(content(&widths, cells(row), Some(row.status_class())));
    }
    lines.push(rule(&widths, '╘', '═', '╧', '╛'));
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Source;

    fn row(name: &str, status: &str) -> Row {
        Row {
            name: name.into(),
            image: "nginx:latest".into(),
            status: status.into(),
            cpu: "1.5%".into(),
            mem: "10 MB".into(),
            source: Source::Local,
        }
    }

    #[test]
    fn header_only_for_empty_rows() {
        let lines = render(&[]);
        assert_eq!(lines.len(), 4);
        assert!(lines[1].text.contains("Status"));
    }

    #[test]
    fn every_line_has_the_same_width() {
        let rows = vec![row("web", "running"), row("a-much-longer-name", "Up 3 hours")];
        let lines = render(&rows);
        assert_eq!(lines.len(), 2 * rows.len() + 3);
        let w = lines[0].width;
        assert!(lines.iter().all(|l| l.width == w));
        assert!(lines[3].text.contains("web"));
        assert!(lines[5].text.contains("a-much-longer-name"));
    }

    #[test]
    fn only_data_rows_are_colored() {
        let lines = render(&[row("web", "running")]);
        assert!(!lines[1].text.contains('\u{1b}'));
        assert!(lines[3].text.contains('\u{1b}'));
        assert!(lines[3].width < lines[3].text.chars().count());
    }

    #[test]
    fn wide_glyphs_keep_columns_aligned() {
        let rows = vec![row("web", "running"), row("🐳-proxy", "running")];
        let lines = render(&rows);
        let w = lines[0].width;
        assert!(lines.iter().all(|l| l.width == w));
    }

    #[test]
    fn status_colors() {
        assert_eq!(status_color(StatusClass::Success), Color::Green);
        assert_eq!(status_color(StatusClass::Failure), Color::Red);
        assert_eq!(status_color(StatusClass::Warning), Color::Yellow);
    }
}
