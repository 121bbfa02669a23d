//! Fixed-size sprite grids and the colour type the renderer paints with.

/// A straight (non-premultiplied) RGBA colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    /// Fully transparent black; cells painted with it are skipped.
    pub const TRANSPARENT: Rgba = Rgba::new(0, 0, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// An opaque colour.
    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }

    pub fn is_transparent(&self) -> bool {
        self.a == 0
    }
}

/// An `N`×`N` matrix of small integer codes, row-major.
///
/// Codes are meaningless on their own; a palette (`code → Rgba`) supplied at
/// render time gives them colour. Grids are plain values: a frame is built by
/// copying a template grid and overwriting cells of the copy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpriteGrid<const N: usize> {
    cells: [[u8; N]; N],
}

impl<const N: usize> SpriteGrid<N> {
    pub const fn from_cells(cells: [[u8; N]; N]) -> Self {
        Self { cells }
    }

    /// A grid with every cell set to `code`.
    pub const fn filled(code: u8) -> Self {
        Self {
            cells: [[code; N]; N],
        }
    }

    /// Code at `(row, col)`, or `None` outside the grid.
    pub fn get(&self, row: usize, col: usize) -> Option<u8> {
        self.cells.get(row)?.get(col).copied()
    }

    /// Overwrite the code at `(row, col)`. Out-of-range writes are ignored.
    pub fn set(&mut self, row: usize, col: usize, code: u8) {
        if let Some(cell) = self.cells.get_mut(row).and_then(|r| r.get_mut(col)) {
            *cell = code;
        }
    }

    /// Replace every occurrence of `from` with `to`.
    pub fn recolor(&mut self, from: u8, to: u8) {
        for cell in self.cells.iter_mut().flatten() {
            if *cell == from {
                *cell = to;
            }
        }
    }

    /// Number of cells holding `code`.
    pub fn count(&self, code: u8) -> usize {
        self.cells.iter().flatten().filter(|&&c| c == code).count()
    }
}
