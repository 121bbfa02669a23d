use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use pixpet_core::logging::{LogEntry, LogLevel};

fn level_color(level: LogLevel) -> Color {
    match level {
        LogLevel::Error => Color::Red,
        LogLevel::Warn => Color::Yellow,
        LogLevel::Info => Color::Green,
        LogLevel::Debug => Color::Cyan,
        LogLevel::Trace => Color::DarkGray,
    }
}

/// Colour-coded log lines, one per entry.
pub fn log_lines(entries: &[LogEntry]) -> Vec<Line<'_>> {
    entries
        .iter()
        .map(|entry| {
            Line::from(vec![
                Span::styled(
                    format!("{:5} ", entry.level),
                    Style::default()
                        .fg(level_color(entry.level))
                        .add_modifier(Modifier::BOLD),
                ),
                Span::raw(&entry.message),
            ])
        })
        .collect()
}

/// Render the verbose log panel, newest entries at the bottom.
///
/// Only the entries that fit are drawn; `entries` is expected oldest first.
pub fn render_log(f: &mut Frame, area: Rect, entries: &[LogEntry]) {
    let block = Block::default().borders(Borders::ALL).title("LOG");
    let visible = block.inner(area).height as usize;
    let start = entries.len().saturating_sub(visible);

    f.render_widget(
        Paragraph::new(log_lines(&entries[start..]))
            .block(block)
            .wrap(Wrap { trim: false }),
        area,
    );
}
