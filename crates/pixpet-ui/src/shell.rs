use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use pixpet_core::logging::LogEntry;

use crate::layout::PetRects;
use crate::logview::render_log;

pub struct ShellView<'a> {
    /// Short mode tag after the app name, e.g. `"RICH"` or `"CLASSIC TEST"`.
    pub mode: &'a str,
    pub status_line: &'a str,
    pub hud_left: Vec<String>,
    pub hud_right: Vec<String>,
    /// Tail of the log buffer; drawn only when the layout has a log panel.
    pub log: &'a [LogEntry],
}

fn hud_panel(lines: Vec<String>, title: &str) -> Paragraph<'_> {
    let text = Text::from(lines.into_iter().map(Line::from).collect::<Vec<_>>());
    Paragraph::new(text).block(Block::default().borders(Borders::ALL).title(title))
}

/// Draw the status bar, HUD and log panel, and hand the stage to `stage`.
pub fn render_shell(
    f: &mut Frame,
    rects: PetRects,
    view: ShellView<'_>,
    stage: impl FnOnce(&mut Frame, Rect),
) {
    let top = Paragraph::new(Line::from(vec![
        Span::styled("PIXPET", Style::default().add_modifier(Modifier::BOLD)),
        Span::raw(format!(" | {} | {}", view.mode, view.status_line)),
    ]));
    f.render_widget(top, rects.top);

    stage(f, rects.stage);

    if let Some(area) = rects.log {
        render_log(f, area, view.log);
    }

    f.render_widget(hud_panel(view.hud_left, "METRICS"), rects.hud_left);
    f.render_widget(hud_panel(view.hud_right, "PET"), rects.hud_right);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::pet_layout;
    use pixpet_core::logging::LogLevel;
    use ratatui::{backend::TestBackend, Terminal};

    fn screen_text(terminal: &Terminal<TestBackend>) -> String {
        terminal
            .backend()
            .buffer()
            .content
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    fn view<'a>(log: &'a [LogEntry]) -> ShellView<'a> {
        ShellView {
            mode: "RICH TEST",
            status_line: "up 2m 5s | 9.8 tps",
            hud_left: vec!["CPU  90.0%".into(), "NET  Connected".into()],
            hud_right: vec!["MOOD ANGRY".into()],
            log,
        }
    }

    #[test]
    fn shell_draws_status_hud_and_stage() {
        let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
        let mut stage_area = None;
        terminal
            .draw(|f| {
                let rects = pet_layout(f.area(), 6, false);
                render_shell(f, rects, view(&[]), |_, area| stage_area = Some(area));
            })
            .unwrap();

        let text = screen_text(&terminal);
        assert!(text.starts_with("PIXPET | RICH TEST | up 2m 5s | 9.8 tps"));
        assert!(text.contains("CPU  90.0%"));
        assert!(text.contains("MOOD ANGRY"));
        assert!(!text.contains("LOG"));
        assert_eq!(stage_area, Some(Rect::new(0, 1, 80, 17)));
    }

    #[test]
    fn shell_draws_log_panel_when_present() {
        let log = [LogEntry {
            level: LogLevel::Info,
            target: "pixpet::snapshot".into(),
            message: "Mood: HAPPY".into(),
        }];
        let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
        terminal
            .draw(|f| {
                let rects = pet_layout(f.area(), 6, true);
                render_shell(f, rects, view(&log), |_, _| {});
            })
            .unwrap();

        let text = screen_text(&terminal);
        assert!(text.contains("LOG"));
        assert!(text.contains("Mood: HAPPY"));
    }
}
