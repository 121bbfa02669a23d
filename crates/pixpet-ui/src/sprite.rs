use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Color,
    widgets::{Block, Borders, Widget},
};

use pixpet_core::grid::{Rgba, SpriteGrid};

/// Largest integer scale at which an `n`×`n` sprite fits in `area`, and the
/// centred rectangle it occupies.
///
/// Each terminal cell holds one pixel column and two pixel rows, so a sprite
/// at scale `s` needs `n*s` columns and `ceil(n*s/2)` rows. Returns `None`
/// when even scale 1 does not fit.
pub fn fit_sprite(area: Rect, n: usize) -> Option<(Rect, u16)> {
    let n = u16::try_from(n).ok().filter(|&n| n > 0)?;
    let by_width = area.width / n;
    let by_height = area.height.saturating_mul(2) / n;
    let scale = by_width.min(by_height);
    if scale == 0 {
        return None;
    }

    let width = n * scale;
    let height = (n * scale).div_ceil(2);
    let rect = Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    };
    Some((rect, scale))
}

/// Paint a sprite grid into `area` using Unicode half-block characters.
///
/// Draws a border titled `title`, then scales the grid by the largest whole
/// factor that fits and centres it. Every cell whose code maps to an opaque
/// palette entry is painted as a filled block of pixels; transparent and
/// out-of-palette codes leave the terminal cell untouched.
pub fn render_sprite<const N: usize>(
    buf: &mut Buffer,
    area: Rect,
    title: &str,
    grid: &SpriteGrid<N>,
    palette: &[Rgba],
) {
    if area.width == 0 || area.height == 0 {
        return;
    }

    let block = Block::default().borders(Borders::ALL).title(title);
    let inner = block.inner(area);
    block.render(area, buf);

    let Some((rect, scale)) = fit_sprite(inner, N) else {
        return;
    };
    let scale = scale as usize;

    for cy in 0..rect.height {
        for cx in 0..rect.width {
            let col = cx as usize / scale;
            let top_row = (cy as usize * 2) / scale;
            let bot_row = (cy as usize * 2 + 1) / scale;

            let top = pixel(grid, palette, top_row, col);
            let bot = pixel(grid, palette, bot_row, col);

            let Some(cell) = buf.cell_mut((rect.x + cx, rect.y + cy)) else {
                continue;
            };
            match (top, bot) {
                (None, None) => {}
                (Some(t), Some(b)) => {
                    cell.set_char('▀');
                    cell.set_fg(color(t));
                    cell.set_bg(color(b));
                }
                (Some(t), None) => {
                    cell.set_char('▀');
                    cell.set_fg(color(t));
                    cell.set_bg(Color::Reset);
                }
                (None, Some(b)) => {
                    cell.set_char('▄');
                    cell.set_fg(color(b));
                    cell.set_bg(Color::Reset);
                }
            }
        }
    }
}

/// Opaque colour for the grid cell at `(row, col)`, if any.
fn pixel<const N: usize>(
    grid: &SpriteGrid<N>,
    palette: &[Rgba],
    row: usize,
    col: usize,
) -> Option<Rgba> {
    let code = grid.get(row, col)?;
    palette
        .get(code as usize)
        .copied()
        .filter(|c| !c.is_transparent())
}

fn color(c: Rgba) -> Color {
    Color::Rgb(c.r, c.g, c.b)
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED: Rgba = Rgba::opaque(255, 0, 0);
    const BLUE: Rgba = Rgba::opaque(0, 0, 255);
    const PALETTE: [Rgba; 3] = [Rgba::TRANSPARENT, RED, BLUE];

    #[test]
    fn fit_sprite_picks_largest_scale_and_centres() {
        let (rect, scale) = fit_sprite(Rect::new(0, 0, 20, 10), 4).unwrap();
        assert_eq!(scale, 5);
        assert_eq!(rect, Rect::new(0, 0, 20, 10));

        let (rect, scale) = fit_sprite(Rect::new(2, 1, 30, 4), 4).unwrap();
        assert_eq!(scale, 2);
        assert_eq!(rect, Rect::new(2 + 11, 1, 8, 4));
    }

    #[test]
    fn fit_sprite_too_small() {
        assert_eq!(fit_sprite(Rect::new(0, 0, 3, 10), 4), None);
        assert_eq!(fit_sprite(Rect::new(0, 0, 10, 1), 4), None);
        assert_eq!(fit_sprite(Rect::new(0, 0, 10, 10), 0), None);
    }

    #[test]
    fn render_solid_sprite() {
        // 2×2 sprite, inner area 4×2 → scale 2, every cell a full block.
        let grid: SpriteGrid<2> = SpriteGrid::filled(1);
        let area = Rect::new(0, 0, 6, 4);
        let mut buf = Buffer::empty(area);

        render_sprite(&mut buf, area, "PET", &grid, &PALETTE);

        for x in 1..5 {
            for y in 1..3 {
                let cell = buf.cell((x, y)).unwrap();
                assert_eq!(cell.symbol(), "▀");
                assert_eq!(cell.fg, Color::Rgb(255, 0, 0));
                assert_eq!(cell.bg, Color::Rgb(255, 0, 0));
            }
        }
    }

    #[test]
    fn transparent_cells_are_skipped() {
        let grid: SpriteGrid<2> = SpriteGrid::filled(0);
        let area = Rect::new(0, 0, 6, 4);
        let mut buf = Buffer::empty(area);

        render_sprite(&mut buf, area, "PET", &grid, &PALETTE);

        let cell = buf.cell((1, 1)).unwrap();
        assert_eq!(cell.symbol(), " ");
    }

    #[test]
    fn half_cells_use_upper_and_lower_blocks() {
        // Scale 1: row 0 red, row 1 transparent → '▀'; rows 2/3 swap → '▄'.
        let grid = SpriteGrid::from_cells([
            [1, 1, 1, 1],
            [0, 0, 0, 0],
            [0, 0, 0, 0],
            [2, 2, 2, 2],
        ]);
        let area = Rect::new(0, 0, 6, 4);
        let mut buf = Buffer::empty(area);

        render_sprite(&mut buf, area, "PET", &grid, &PALETTE);

        let top = buf.cell((1, 1)).unwrap();
        assert_eq!(top.symbol(), "▀");
        assert_eq!(top.fg, Color::Rgb(255, 0, 0));
        assert_eq!(top.bg, Color::Reset);

        let bottom = buf.cell((1, 2)).unwrap();
        assert_eq!(bottom.symbol(), "▄");
        assert_eq!(bottom.fg, Color::Rgb(0, 0, 255));
    }

    #[test]
    fn unknown_codes_are_skipped() {
        let grid: SpriteGrid<2> = SpriteGrid::filled(9);
        let area = Rect::new(0, 0, 6, 4);
        let mut buf = Buffer::empty(area);
        render_sprite(&mut buf, area, "PET", &grid, &PALETTE);
        assert_eq!(buf.cell((1, 1)).unwrap().symbol(), " ");
    }

    #[test]
    fn empty_area_no_panic() {
        let grid: SpriteGrid<2> = SpriteGrid::filled(1);
        let mut buf = Buffer::empty(Rect::new(0, 0, 10, 10));
        render_sprite(&mut buf, Rect::new(0, 0, 0, 0), "PET", &grid, &PALETTE);
        render_sprite(&mut buf, Rect::new(0, 0, 2, 2), "PET", &grid, &PALETTE);
    }
}
