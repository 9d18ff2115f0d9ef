//! PNG heatmap of a [`ConfusionMatrix`].
//!
//! Rows are true classes and columns predicted classes, both in the
//! declaration order of [`ComplexityClass`]. Each cell is shaded on a
//! white-to-blue scale relative to the largest count and carries its count;
//! counts above half the maximum are drawn in white. Class names label both
//! axes (column names run bottom to top), with axis titles and a title
//! above the grid.

use std::path::Path;

use complexity_common::{ComplexityClass, EvalError, Result};
use image::{Rgb, RgbImage};
use strum::{EnumCount, IntoEnumIterator};
use tracing::info;

use crate::metrics::ConfusionMatrix;

const K: u32 = ComplexityClass::COUNT as u32;
const CELL: u32 = 64;
/// Outer padding around everything.
const PAD: u32 = 16;
/// Space between labels and the grid.
const GAP: u32 = 8;
const TITLE: &str = "Confusion Matrix (Counts)";
const TITLE_SCALE: u32 = 2;
const X_AXIS_TITLE: &str = "Predicted label";
const Y_AXIS_TITLE: &str = "True label";

const GRID: Rgb<u8> = Rgb([200, 200, 200]);
const BACKGROUND: Rgb<u8> = Rgb([255, 255, 255]);
const DARK_TEXT: Rgb<u8> = Rgb([0, 0, 0]);
const LIGHT_TEXT: Rgb<u8> = Rgb([255, 255, 255]);

/// Sequential blue ramp, light to dark.
const BLUES: [[u8; 3]; 5] = [
    [247, 251, 255],
    [198, 219, 239],
    [107, 174, 214],
    [33, 113, 181],
    [8, 48, 107],
];

const GLYPH_W: u32 = 5;
const GLYPH_H: u32 = 7;
/// Glyph width plus one column of spacing.
const ADVANCE: u32 = GLYPH_W + 1;

/// 5x7 bitmap for `c`, one row per byte, bit 4 on the left. Characters
/// without a glyph render as blanks.
fn glyph(c: char) -> [u8; 7] {
    match c {
        '0' => [0x0E, 0x11, 0x13, 0x15, 0x19, 0x11, 0x0E],
        '1' => [0x04, 0x0C, 0x04, 0x04, 0x04, 0x04, 0x0E],
        '2' => [0x0E, 0x11, 0x01, 0x02, 0x04, 0x08, 0x1F],
        '3' => [0x1F, 0x02, 0x04, 0x02, 0x01, 0x11, 0x0E],
        '4' => [0x02, 0x06, 0x0A, 0x12, 0x1F, 0x02, 0x02],
        '5' => [0x1F, 0x10, 0x1E, 0x01, 0x01, 0x11, 0x0E],
        '6' => [0x06, 0x08, 0x10, 0x1E, 0x11, 0x11, 0x0E],
        '7' => [0x1F, 0x01, 0x02, 0x04, 0x08, 0x08, 0x08],
        '8' => [0x0E, 0x11, 0x11, 0x0E, 0x11, 0x11, 0x0E],
        '9' => [0x0E, 0x11, 0x11, 0x0F, 0x01, 0x02, 0x0C],
        '(' => [0x02, 0x04, 0x08, 0x08, 0x08, 0x04, 0x02],
        ')' => [0x08, 0x04, 0x02, 0x02, 0x02, 0x04, 0x08],
        '^' => [0x04, 0x0A, 0x11, 0x00, 0x00, 0x00, 0x00],
        'C' => [0x0E, 0x11, 0x10, 0x10, 0x10, 0x11, 0x0E],
        'M' => [0x11, 0x1B, 0x15, 0x15, 0x11, 0x11, 0x11],
        'O' => [0x0E, 0x11, 0x11, 0x11, 0x11, 0x11, 0x0E],
        'P' => [0x1E, 0x11, 0x11, 0x1E, 0x10, 0x10, 0x10],
        'T' => [0x1F, 0x04, 0x04, 0x04, 0x04, 0x04, 0x04],
        'a' => [0x00, 0x00, 0x0E, 0x01, 0x0F, 0x11, 0x0F],
        'b' => [0x10, 0x10, 0x16, 0x19, 0x11, 0x11, 0x1E],
        'c' => [0x00, 0x00, 0x0E, 0x10, 0x10, 0x11, 0x0E],
        'd' => [0x01, 0x01, 0x0D, 0x13, 0x11, 0x11, 0x0F],
        'e' => [0x00, 0x00, 0x0E, 0x11, 0x1F, 0x10, 0x0E],
        'f' => [0x06, 0x09, 0x08, 0x1C, 0x08, 0x08, 0x08],
        'g' => [0x00, 0x0F, 0x11, 0x11, 0x0F, 0x01, 0x0E],
        'h' => [0x10, 0x10, 0x16, 0x19, 0x11, 0x11, 0x11],
        'i' => [0x04, 0x00, 0x0C, 0x04, 0x04, 0x04, 0x0E],
        'l' => [0x0C, 0x04, 0x04, 0x04, 0x04, 0x04, 0x0E],
        'm' => [0x00, 0x00, 0x1A, 0x15, 0x15, 0x11, 0x11],
        'n' => [0x00, 0x00, 0x16, 0x19, 0x11, 0x11, 0x11],
        'o' => [0x00, 0x00, 0x0E, 0x11, 0x11, 0x11, 0x0E],
        'p' => [0x00, 0x00, 0x1E, 0x11, 0x1E, 0x10, 0x10],
        'r' => [0x00, 0x00, 0x16, 0x19, 0x10, 0x10, 0x10],
        's' => [0x00, 0x00, 0x0E, 0x10, 0x0E, 0x01, 0x1E],
        't' => [0x08, 0x08, 0x1C, 0x08, 0x08, 0x09, 0x06],
        'u' => [0x00, 0x00, 0x11, 0x11, 0x11, 0x13, 0x0D],
        'x' => [0x00, 0x00, 0x11, 0x0A, 0x04, 0x0A, 0x11],
        'y' => [0x00, 0x00, 0x11, 0x11, 0x0F, 0x01, 0x0E],
        _ => [0; 7],
    }
}

/// Pixel width of `text` laid out horizontally.
fn text_width(text: &str, scale: u32) -> u32 {
    let n = text.chars().count() as u32;
    (n * ADVANCE).saturating_sub(1) * scale
}

/// Where each part of the figure goes.
struct Layout {
    grid_x: u32,
    grid_y: u32,
    /// Longest class name, which sizes both label strips.
    tick: u32,
    width: u32,
    height: u32,
}

impl Layout {
    fn new() -> Self {
        let tick = ComplexityClass::iter()
            .map(|c| text_width(c.label(), 1))
            .max()
            .unwrap_or(0);
        let grid_x = PAD + GLYPH_H + GAP + tick + GAP;
        let grid_y = PAD + GLYPH_H * TITLE_SCALE + GAP;
        Self {
            grid_x,
            grid_y,
            tick,
            width: grid_x + K * CELL + PAD,
            height: grid_y + K * CELL + GAP + tick + GAP + GLYPH_H + PAD,
        }
    }

    fn grid_bottom(&self) -> u32 {
        self.grid_y + K * CELL
    }

    fn cell(&self, truth: usize, predicted: usize) -> (u32, u32) {
        (
            self.grid_x + predicted as u32 * CELL,
            self.grid_y + truth as u32 * CELL,
        )
    }

    /// Top-left of a row label, right-aligned against the grid.
    fn row_label(&self, class: ComplexityClass) -> (u32, u32) {
        (
            self.grid_x - GAP - text_width(class.label(), 1),
            self.grid_y + class.index() as u32 * CELL + (CELL - GLYPH_H) / 2,
        )
    }

    /// Left edge and baseline of a column label reading upwards, its last
    /// character just below the grid.
    fn column_label(&self, class: ComplexityClass) -> (u32, u32) {
        (
            self.grid_x + class.index() as u32 * CELL + (CELL - GLYPH_H) / 2,
            self.grid_bottom() + GAP + text_width(class.label(), 1),
        )
    }

    fn title(&self) -> (u32, u32) {
        let width = text_width(TITLE, TITLE_SCALE);
        (self.grid_x + (K * CELL).saturating_sub(width) / 2, PAD)
    }
}

pub fn render_heatmap(cm: &ConfusionMatrix) -> RgbImage {
    let layout = Layout::new();
    let mut img = RgbImage::from_pixel(layout.width, layout.height, BACKGROUND);
    let max = cm.max_count();

    for (row, counts) in cm.rows().iter().enumerate() {
        for (col, &count) in counts.iter().enumerate() {
            let (x0, y0) = layout.cell(row, col);
            let t = if max == 0 { 0.0 } else { count as f64 / max as f64 };
            fill_rect(&mut img, x0, y0, CELL, CELL, shade(t));

            let text = if count * 2 > max { LIGHT_TEXT } else { DARK_TEXT };
            draw_count(&mut img, count, x0, y0, text);
        }
    }

    let grid = K * CELL;
    for i in 0..=K {
        fill_rect(&mut img, layout.grid_x + i * CELL, layout.grid_y, 1, grid + 1, GRID);
        fill_rect(&mut img, layout.grid_x, layout.grid_y + i * CELL, grid + 1, 1, GRID);
    }

    for class in ComplexityClass::iter() {
        let (x, y) = layout.row_label(class);
        draw_text(&mut img, class.label(), x, y, 1, DARK_TEXT);
        let (x, bottom) = layout.column_label(class);
        draw_text_up(&mut img, class.label(), x, bottom, DARK_TEXT);
    }

    let (x, y) = layout.title();
    draw_text(&mut img, TITLE, x, y, TITLE_SCALE, DARK_TEXT);

    let x_title = layout.grid_x + grid.saturating_sub(text_width(X_AXIS_TITLE, 1)) / 2;
    let x_title_y = layout.grid_bottom() + GAP + layout.tick + GAP;
    draw_text(&mut img, X_AXIS_TITLE, x_title, x_title_y, 1, DARK_TEXT);

    let y_title_bottom = layout.grid_y + (grid + text_width(Y_AXIS_TITLE, 1)) / 2;
    draw_text_up(&mut img, Y_AXIS_TITLE, PAD, y_title_bottom, DARK_TEXT);

    img
}

pub fn save_heatmap(cm: &ConfusionMatrix, path: &Path) -> Result<()> {
    render_heatmap(cm)
        .save(path)
        .map_err(|e| EvalError::Render(format!("failed to write {}: {e}", path.display())))?;
    info!("Confusion matrix (counts only) saved as {}", path.display());
    Ok(())
}

fn shade(t: f64) -> Rgb<u8> {
    let t = t.clamp(0.0, 1.0);
    let segments = (BLUES.len() - 1) as f64;
    let pos = t * segments;
    let i = (pos.floor() as usize).min(BLUES.len() - 2);
    let local = pos - i as f64;
    let (a, b) = (BLUES[i], BLUES[i + 1]);
    let mix = |c: usize| (a[c] as f64 + (b[c] as f64 - a[c] as f64) * local).round() as u8;
    Rgb([mix(0), mix(1), mix(2)])
}

fn fill_rect(img: &mut RgbImage, x0: u32, y0: u32, w: u32, h: u32, color: Rgb<u8>) {
    for y in y0..(y0 + h).min(img.height()) {
        for x in x0..(x0 + w).min(img.width()) {
            img.put_pixel(x, y, color);
        }
    }
}

/// Horizontal text with its top-left corner at `(x, y)`.
fn draw_text(img: &mut RgbImage, text: &str, x: u32, y: u32, scale: u32, color: Rgb<u8>) {
    for (i, c) in text.chars().enumerate() {
        let left = x + i as u32 * ADVANCE * scale;
        for (row, bits) in glyph(c).iter().enumerate() {
            for col in 0..GLYPH_W {
                if bits & (0x10 >> col) != 0 {
                    let px = left + col * scale;
                    let py = y + row as u32 * scale;
                    fill_rect(img, px, py, scale, scale, color);
                }
            }
        }
    }
}

/// Text rotated a quarter turn anticlockwise, starting at `bottom` and
/// reading upwards from there.
fn draw_text_up(img: &mut RgbImage, text: &str, x: u32, bottom: u32, color: Rgb<u8>) {
    for (i, c) in text.chars().enumerate() {
        let Some(base) = bottom.checked_sub(i as u32 * ADVANCE) else {
            break;
        };
        for (row, bits) in glyph(c).iter().enumerate() {
            for col in 0..GLYPH_W {
                if bits & (0x10 >> col) != 0 {
                    // Glyph rows become columns; its left edge faces down
                    if let Some(py) = base.checked_sub(col + 1) {
                        fill_rect(img, x + row as u32, py, 1, 1, color);
                    }
                }
            }
        }
    }
}

/// Draw `value` centred in the cell whose top-left corner is `(x0, y0)`.
fn draw_count(img: &mut RgbImage, value: u64, x0: u32, y0: u32, color: Rgb<u8>) {
    let text = value.to_string();
    let n = text.len() as u32;
    let scale = ((CELL - 8) / (n * ADVANCE)).clamp(1, 4);
    let width = text_width(&text, scale);
    let height = GLYPH_H * scale;
    let left = x0 + CELL.saturating_sub(width) / 2;
    let top = y0 + (CELL - height) / 2;
    draw_text(img, &text, left, top, scale, color);
}
