//! Convert an image into a square 0/1 grid for hand-drawn sprite templates.
//!
//! The image is scaled to `size`×`size` with nearest-neighbour sampling and
//! each pixel is thresholded on its mean RGB intensity: darker than the
//! threshold becomes `0`, anything else `1`. Alpha is ignored.

use std::path::Path;

use anyhow::{Context, Result};
use clap::ValueEnum;
use image::{imageops::FilterType, DynamicImage};

pub const DEFAULT_SIZE: u32 = 25;
pub const DEFAULT_THRESHOLD: u8 = 128;

/// Literal syntax for the printed grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// `const GRID: [[u8; N]; N] = [...];`
    #[default]
    Rust,
    /// `const int grid[N][N] = {...};`
    C,
    /// Nested JSON arrays
    Json,
}

/// Thresholded square grid, row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BitGrid {
    size: usize,
    cells: Vec<u8>,
}

impl BitGrid {
    pub fn from_image(img: &DynamicImage, size: u32, threshold: u8) -> Self {
        let scaled = img.resize_exact(size, size, FilterType::Nearest).to_rgb8();
        tracing::debug!(
            src_width = img.width(),
            src_height = img.height(),
            size,
            threshold,
            "thresholding image"
        );

        let cells = scaled
            .pixels()
            .map(|p| {
                let [r, g, b] = p.0;
                let intensity = (u16::from(r) + u16::from(g) + u16::from(b)) / 3;
                u8::from(intensity >= u16::from(threshold))
            })
            .collect();

        Self {
            size: size as usize,
            cells,
        }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn get(&self, row: usize, col: usize) -> Option<u8> {
        if row >= self.size || col >= self.size {
            return None;
        }
        self.cells.get(row * self.size + col).copied()
    }

    pub fn rows(&self) -> impl Iterator<Item = &[u8]> + '_ {
        self.cells.chunks(self.size.max(1))
    }

    fn joined_rows(&self, open: &str, close: &str, indent: &str) -> String {
        self.rows()
            .map(|row| {
                let values: Vec<String> = row.iter().map(u8::to_string).collect();
                format!("{indent}{open}{}{close}", values.join(", "))
            })
            .collect::<Vec<_>>()
            .join(",\n")
    }

    /// The grid as a literal array initializer.
    pub fn initializer(&self, format: OutputFormat) -> Result<String> {
        let n = self.size;
        let out = match format {
            OutputFormat::Rust => format!(
                "const GRID: [[u8; {n}]; {n}] = [\n{},\n];",
                self.joined_rows("[", "]", "    ")
            ),
            OutputFormat::C => format!(
                "const int grid[{n}][{n}] = {{\n{}\n}};",
                self.joined_rows("{ ", " }", "    ")
            ),
            OutputFormat::Json => {
                let rows = self
                    .rows()
                    .map(serde_json::to_string)
                    .collect::<Result<Vec<_>, _>>()
                    .context("failed to encode grid as JSON")?;
                format!("[\n  {}\n]", rows.join(",\n  "))
            }
        };
        Ok(out)
    }

    /// ASCII rendering, one line per row.
    ///
    /// `#` marks dark (`0`) cells and a space light ones; `invert` swaps them.
    pub fn ascii(&self, invert: bool) -> String {
        let ink = if invert { 1 } else { 0 };
        let mut out = String::with_capacity(self.cells.len() + self.size);
        for row in self.rows() {
            out.extend(row.iter().map(|&c| if c == ink { '#' } else { ' ' }));
            out.push('\n');
        }
        out
    }

    /// Initializer, blank line, `Pixel Art:` heading, then the ASCII art.
    pub fn report(&self, format: OutputFormat, invert: bool) -> Result<String> {
        let mut out = self.initializer(format)?;
        out.push_str("\n\nPixel Art:\n");
        out.push_str(&self.ascii(invert));
        Ok(out)
    }
}

/// Decode a PNG or JPEG from disk.
pub fn load(path: &Path) -> Result<DynamicImage> {
    image::open(path).with_context(|| format!("failed to load image {}", path.display()))
}
