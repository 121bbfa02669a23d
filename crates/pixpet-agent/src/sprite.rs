//! Rich-variant sprite templates and per-frame assembly.

use pixpet_core::grid::{Rgba, SpriteGrid};

use crate::overlay::Overlays;

/// Side length of the rich-variant sprite.
pub const RICH_SIZE: usize = 25;

/// Cell codes of the rich sprite. The discriminant is the grid code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Cell {
    Transparent = 0,
    Body = 1,
    GreyBody = 2,
    RedEye = 3,
    YellowEye = 4,
    GreenEye = 5,
}

impl Cell {
    pub const fn code(self) -> u8 {
        self as u8
    }
}

/// Colour for each [`Cell`] code, indexed by code.
pub const PALETTE: [Rgba; 6] = [
    Rgba::TRANSPARENT,
    Rgba::opaque(232, 152, 72),
    Rgba::opaque(128, 128, 128),
    Rgba::opaque(220, 40, 40),
    Rgba::opaque(240, 210, 50),
    Rgba::opaque(60, 200, 90),
];

/// `(row, col)` of every eye pixel. Eye colours are only ever painted here.
pub const EYE_PIXELS: [(usize, usize); 8] = [
    (9, 7),
    (9, 8),
    (9, 16),
    (9, 17),
    (10, 7),
    (10, 8),
    (10, 16),
    (10, 17),
];

/// Turn ASCII art into cell codes at compile time.
///
/// `#` is body; `.`, `o` (open eye) and `-` (closed-eye slit) are
/// transparent.
const fn parse_template(rows: [&str; RICH_SIZE]) -> SpriteGrid<RICH_SIZE> {
    let mut cells = [[0u8; RICH_SIZE]; RICH_SIZE];
    let mut r = 0;
    while r < RICH_SIZE {
        let bytes = rows[r].as_bytes();
        assert!(bytes.len() == RICH_SIZE, "template row has the wrong width");
        let mut c = 0;
        while c < RICH_SIZE {
            cells[r][c] = match bytes[c] {
                b'#' => Cell::Body.code(),
                b'.' | b'o' | b'-' => Cell::Transparent.code(),
                _ => panic!("unknown template glyph"),
            };
            c += 1;
        }
        r += 1;
    }
    SpriteGrid::from_cells(cells)
}

const NORMAL: SpriteGrid<RICH_SIZE> = parse_template([
    ".........................",
    "...##...............##...",
    "...###.............###...",
    "...####...........####...",
    "...#####.........#####...",
    "...###################...",
    "..#####################..",
    "..#####################..",
    "..#####################..",
    "..#####oo#######oo#####..",
    "..#####oo#######oo#####..",
    "..#####################..",
    "..##########.##########..",
    "..#########.#.#########..",
    "..#####################..",
    "...###################...",
    "....#################....",
    ".....###############.....",
    "......#############......",
    ".....###############.....",
    "....#################.#..",
    "....#################.#..",
    "....#################.#..",
    "....####.#######.#####...",
    ".........................",
]);

const BLINKING: SpriteGrid<RICH_SIZE> = parse_template([
    ".........................",
    "...##...............##...",
    "...###.............###...",
    "...####...........####...",
    "...#####.........#####...",
    "...###################...",
    "..#####################..",
    "..#####################..",
    "..#####################..",
    "..#####################..",
    "..#####--#######--#####..",
    "..#####################..",
    "..##########.##########..",
    "..#########.#.#########..",
    "..#####################..",
    "...###################...",
    "....#################....",
    ".....###############.....",
    "......#############......",
    ".....###############.....",
    "....#################.#..",
    "....#################.#..",
    "....#################.#..",
    "....####.#######.#####...",
    ".........................",
]);

const SLEEPY: SpriteGrid<RICH_SIZE> = parse_template([
    "..........####...........",
    "...##.......#.......##...",
    "...###.....#.......###...",
    "...####...####....####...",
    "...#####.........#####...",
    "...###################...",
    "..#####################..",
    "..#####################..",
    "..#####################..",
    "..#####################..",
    "..#####--#######--#####..",
    "..#####################..",
    "..##########.##########..",
    "..#####################..",
    "..#####################..",
    "...###################...",
    "....#################....",
    ".....###############.....",
    "......#############......",
    ".....###############.....",
    "....#################.#..",
    "....#################.#..",
    "....#################.#..",
    "....####.#######.#####...",
    ".........................",
]);

/// Which base template a frame starts from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pose {
    Normal,
    Blinking,
    Sleepy,
}

impl Pose {
    pub fn template(self) -> &'static SpriteGrid<RICH_SIZE> {
        match self {
            Pose::Normal => &NORMAL,
            Pose::Blinking => &BLINKING,
            Pose::Sleepy => &SLEEPY,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Pose::Normal => "normal",
            Pose::Blinking => "blinking",
            Pose::Sleepy => "sleepy",
        }
    }
}

/// Assemble one frame from a fresh copy of the pose's template.
///
/// A grey body recolours every body cell and suppresses eye colours. Eye
/// colours are otherwise painted on [`EYE_PIXELS`] only, and only in the
/// open-eyed [`Pose::Normal`].
pub fn build_frame(pose: Pose, overlays: &Overlays) -> SpriteGrid<RICH_SIZE> {
    let mut grid = *pose.template();

    if overlays.grey_body {
        grid.recolor(Cell::Body.code(), Cell::GreyBody.code());
        return grid;
    }

    if pose == Pose::Normal {
        if let Some(eye) = overlays.eye_cell() {
            for (row, col) in EYE_PIXELS {
                grid.set(row, col, eye.code());
            }
        }
    }

    grid
}
