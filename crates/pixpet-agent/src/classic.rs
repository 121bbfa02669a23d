//! The classic variant: an 8×8 cat on a mood-coloured background.

use pixpet_core::grid::{Rgba, SpriteGrid};

use crate::mood::Mood;

pub const CLASSIC_SIZE: usize = 8;

/// Three animation frames; code 1 is the cat, code 0 the background.
pub const CLASSIC_FRAMES: [SpriteGrid<CLASSIC_SIZE>; 3] = [
    SpriteGrid::from_cells([
        [0, 1, 1, 0, 0, 1, 1, 0],
        [1, 0, 0, 1, 1, 0, 0, 1],
        [1, 0, 0, 0, 0, 0, 0, 1],
        [1, 0, 1, 0, 0, 1, 0, 1],
        [1, 1, 0, 0, 0, 0, 1, 1],
        [0, 1, 1, 1, 1, 1, 1, 0],
        [0, 0, 1, 1, 1, 1, 0, 0],
        [0, 0, 0, 0, 0, 0, 0, 0],
    ]),
    SpriteGrid::from_cells([
        [0, 1, 1, 0, 0, 1, 1, 0],
        [1, 0, 0, 1, 1, 0, 0, 1],
        [1, 0, 0, 0, 0, 0, 0, 1],
        [1, 0, 1, 0, 0, 1, 0, 1],
        [1, 1, 0, 0, 0, 0, 1, 1],
        [0, 0, 1, 1, 1, 1, 0, 0],
        [0, 1, 1, 1, 1, 1, 1, 0],
        [0, 0, 0, 0, 0, 0, 0, 0],
    ]),
    SpriteGrid::from_cells([
        [0, 1, 1, 0, 0, 1, 1, 0],
        [1, 0, 0, 1, 1, 0, 0, 1],
        [1, 0, 0, 0, 0, 0, 0, 1],
        [1, 0, 1, 1, 1, 1, 0, 1],
        [1, 1, 0, 0, 0, 0, 1, 1],
        [0, 0, 1, 1, 1, 1, 0, 0],
        [0, 1, 1, 1, 1, 1, 1, 0],
        [0, 0, 0, 0, 0, 0, 0, 0],
    ]),
];

/// Copy of the frame for animation step `index`, wrapping.
pub fn classic_frame(index: u64) -> SpriteGrid<CLASSIC_SIZE> {
    CLASSIC_FRAMES[(index % CLASSIC_FRAMES.len() as u64) as usize]
}

/// Background in the mood colour, cat in black.
pub fn classic_palette(mood: Mood) -> [Rgba; 2] {
    [mood.color(), Rgba::opaque(0, 0, 0)]
}
