use std::io::{self, Write};

use crossterm::cursor::{MoveToColumn, MoveUp};
use crossterm::queue;
use crossterm::style::{Color, Print, PrintStyledContent, Stylize};
use crossterm::terminal::{Clear, ClearType};
use unicode_width::UnicodeWidthChar;

use crate::core::{Category, FeedEntry};

/// How the feed is written to the output
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderMode {
    /// Redraw the window in place, optionally coloured
    Live { color: bool },
    /// Append-only output for pipes and logs
    Plain,
}

/// Terminal window showing the feed
pub struct FeedWindow<W: Write> {
    out: W,
    mode: RenderMode,
    show_timestamp: bool,
    /// Terminal columns; live lines are cut to fit so each takes one row
    width: Option<u16>,
    /// Rows currently on screen in live mode
    drawn: u16,
    /// Last entry written in plain mode
    last_written: Option<FeedEntry>,
}

impl<W: Write> FeedWindow<W> {
    pub fn new(out: W, mode: RenderMode) -> Self {
        Self {
            out,
            mode,
            show_timestamp: true,
            width: None,
            drawn: 0,
            last_written: None,
        }
    }

    pub fn with_timestamps(mut self, show: bool) -> Self {
        self.show_timestamp = show;
        self
    }

    /// Set the terminal width used to cut live lines; `None` disables cutting
    pub fn set_width(&mut self, width: Option<u16>) {
        self.width = width;
    }

    /// Render a snapshot of the feed
    pub fn render(&mut self, entries: &[FeedEntry]) -> io::Result<()> {
        match self.mode {
            RenderMode::Live { color } => self.redraw(entries, color)?,
            RenderMode::Plain => self.append_new(entries)?,
        }
        self.out.flush()
    }

    fn redraw(&mut self, entries: &[FeedEntry], color: bool) -> io::Result<()> {
        if self.drawn > 0 {
            queue!(self.out, MoveUp(self.drawn), MoveToColumn(0), Clear(ClearType::FromCursorDown))?;
        }

        for entry in entries {
            let mut line = self.format_line(entry);
            if let Some(width) = self.width {
                truncate_to_width(&mut line, usize::from(width));
            }
            if color {
                queue!(self.out, PrintStyledContent(line.with(category_color(entry.category))))?;
            } else {
                queue!(self.out, Print(line))?;
            }
            queue!(self.out, Print("\r\n"))?;
        }

        self.drawn = u16::try_from(entries.len()).unwrap_or(u16::MAX);
        Ok(())
    }

    fn append_new(&mut self, entries: &[FeedEntry]) -> io::Result<()> {
        // Everything after the last entry we wrote; all of it if that entry was evicted
        let start = self
            .last_written
            .as_ref()
            .and_then(|last| entries.iter().rposition(|e| e == last))
            .map_or(0, |pos| pos + 1);

        for entry in &entries[start..] {
            let line = self.format_line(entry);
            writeln!(self.out, "{}", line)?;
        }

        if let Some(last) = entries.last() {
            self.last_written = Some(last.clone());
        }
        Ok(())
    }

    pub fn format_line(&self, entry: &FeedEntry) -> String {
        if self.show_timestamp {
            format!("{} {} {}", entry.time_label(), entry.category.tag(), entry.text)
        } else {
            format!("{} {}", entry.category.tag(), entry.text)
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

/// Cut `line` so it occupies at most `width` terminal columns
pub fn truncate_to_width(line: &mut String, width: usize) {
    let mut used = 0;
    let cut = line.char_indices().find_map(|(idx, ch)| {
        used += ch.width().unwrap_or(0);
        (used > width).then_some(idx)
    });
    if let Some(idx) = cut {
        line.truncate(idx);
    }
}

pub fn category_color(category: Category) -> Color {
    match category {
        Category::Warning => Color::Yellow,
        Category::Execution => Color::Cyan,
        Category::Success => Color::Green,
        Category::Info => Color::Grey,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn output(window: FeedWindow<Vec<u8>>) -> String {
        String::from_utf8(window.into_inner()).unwrap()
    }

    #[test]
    fn test_plain_mode_writes_each_line_once() {
        let a = FeedEntry::new("[INFO] a");
        let b = FeedEntry::new("[EXEC] b");
        let c = FeedEntry::new("[FILLED] c");

        let mut window = FeedWindow::new(Vec::new(), RenderMode::Plain).with_timestamps(false);
        window.render(&[a.clone()]).unwrap();
        window.render(&[a.clone(), b.clone()]).unwrap();
        window.render(&[b, c]).unwrap();

        assert_eq!(output(window), "    [INFO] a\nEXE [EXEC] b\nOK  [FILLED] c\n");
    }

    #[test]
    fn test_plain_mode_rewrites_after_full_eviction() {
        let mut window = FeedWindow::new(Vec::new(), RenderMode::Plain).with_timestamps(false);
        window.render(&[FeedEntry::new("x")]).unwrap();
        window.render(&[FeedEntry::new("y")]).unwrap();
        assert_eq!(output(window), "    x\n    y\n");
    }

    #[test]
    fn test_live_mode_without_color() {
        let mut window = FeedWindow::new(Vec::new(), RenderMode::Live { color: false }).with_timestamps(false);
        window.render(&[FeedEntry::new("[WARN] w")]).unwrap();
        let out = output(window);
        assert_eq!(out, "WRN [WARN] w\r\n");
    }

    #[test]
    fn test_live_mode_redraw_moves_cursor_back() {
        let mut window = FeedWindow::new(Vec::new(), RenderMode::Live { color: false });
        window.render(&[FeedEntry::new("a"), FeedEntry::new("b")]).unwrap();
        window.render(&[FeedEntry::new("c")]).unwrap();
        let out = output(window);
        // cursor up two lines before the second frame
        assert!(out.contains("\x1b[2A"));
    }

    #[test]
    fn test_live_mode_keeps_long_lines_on_one_row() {
        let long = "x".repeat(120);
        let mut window = FeedWindow::new(Vec::new(), RenderMode::Live { color: false }).with_timestamps(false);
        window.set_width(Some(80));
        window.render(&[FeedEntry::new("a"), FeedEntry::new(long.as_str())]).unwrap();
        window.render(&[FeedEntry::new("b")]).unwrap();

        let out = output(window);
        let first_frame = out.split("\x1b[").next().unwrap();
        for row in first_frame.split("\r\n").filter(|r| !r.is_empty()) {
            assert!(row.chars().count() <= 80, "row wider than terminal: {}", row.len());
        }
        // two rows drawn, two rows moved back
        assert!(out.contains("\x1b[2A"));
    }

    #[test]
    fn test_truncate_to_width() {
        let mut ascii = "abcdef".to_string();
        truncate_to_width(&mut ascii, 4);
        assert_eq!(ascii, "abcd");

        let mut wide = "€→│xy".to_string();
        truncate_to_width(&mut wide, 3);
        assert_eq!(wide, "€→│");

        let mut short = "ab".to_string();
        truncate_to_width(&mut short, 10);
        assert_eq!(short, "ab");
    }

    #[test]
    fn test_timestamp_prefix() {
        let window = FeedWindow::new(Vec::new(), RenderMode::Plain);
        let entry = FeedEntry::new("[INFO] hello");
        let line = window.format_line(&entry);
        assert!(line.starts_with(&entry.time_label()));
        assert!(line.ends_with("[INFO] hello"));
    }

    #[test]
    fn test_category_colors_are_distinct() {
        let colors = [
            category_color(Category::Warning),
            category_color(Category::Execution),
            category_color(Category::Success),
            category_color(Category::Info),
        ];
        for (i, a) in colors.iter().enumerate() {
            for b in &colors[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }
}
