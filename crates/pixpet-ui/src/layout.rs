use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Screen regions: status bar on top, the pet in the middle, HUD at the
/// bottom. The log panel sits beside the pet when present.
#[derive(Debug, Clone, Copy)]
pub struct PetRects {
    pub top: Rect,
    pub stage: Rect,
    pub log: Option<Rect>,
    pub hud: Rect,
    pub hud_left: Rect,
    pub hud_right: Rect,
}

pub fn pet_layout(area: Rect, hud_height: u16, with_log: bool) -> PetRects {
    let hud_height = hud_height.max(3).min(area.height.saturating_sub(2).max(3));
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),          // status bar
            Constraint::Min(1),             // stage
            Constraint::Length(hud_height), // hud
        ])
        .split(area);

    let (stage, log) = if with_log {
        let cols = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
            .split(chunks[1]);
        (cols[0], Some(cols[1]))
    } else {
        (chunks[1], None)
    };

    let hud = chunks[2];
    let hud_cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(hud);

    PetRects {
        top: chunks[0],
        stage,
        log,
        hud,
        hud_left: hud_cols[0],
        hud_right: hud_cols[1],
    }
}
