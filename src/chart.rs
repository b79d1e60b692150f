//! Citations-per-year bar chart, encoded as PNG.

use crate::error::{Result, WorksError};
use crate::types::CountByYear;

const WIDTH: u32 = 640;
const HEIGHT: u32 = 480;
const MARGIN_LEFT: u32 = 60;
const MARGIN_RIGHT: u32 = 20;
const MARGIN_TOP: u32 = 20;
const MARGIN_BOTTOM: u32 = 50;

const BACKGROUND: [u8; 3] = [0xff, 0xff, 0xff];
const AXIS: [u8; 3] = [0x00, 0x00, 0x00];
const BAR: [u8; 3] = [0x1f, 0x77, 0xb4];

/// Renders citation counts as a PNG image.
pub trait ChartRenderer {
    fn render_png(&self, counts: &[CountByYear]) -> Result<Vec<u8>>;
}

/// Default renderer: one bar per year, no text.
#[derive(Debug, Clone, Copy, Default)]
pub struct BarChart;

impl ChartRenderer for BarChart {
    fn render_png(&self, counts: &[CountByYear]) -> Result<Vec<u8>> {
        let mut canvas = Canvas::new(WIDTH, HEIGHT);
        let plot_left = MARGIN_LEFT;
        let plot_right = WIDTH - MARGIN_RIGHT;
        let plot_top = MARGIN_TOP;
        let plot_bottom = HEIGHT - MARGIN_BOTTOM;

        let years = counts.iter().map(|c| c.year);
        let max_count = counts.iter().map(|c| c.cited_by_count).max().unwrap_or(0);

        if let (Some(first), Some(last)) = (years.clone().min(), years.max()) {
            if max_count > 0 {
                // Years without an entry keep an empty slot; very wide year
                // ranges collapse to one pixel per slot and overflow is clipped
                let plot_width = u64::from(plot_right - plot_left);
                let span = (i64::from(last) - i64::from(first) + 1) as u64;
                let slot_width = plot_width / span.clamp(1, plot_width);
                let bar_width = (slot_width * 4 / 5).max(1);
                let plot_height = plot_bottom - plot_top;

                for count in counts {
                    let slot = (i64::from(count.year) - i64::from(first)) as u64;
                    let x0 = u64::from(plot_left)
                        + slot * slot_width
                        + slot_width.saturating_sub(bar_width) / 2;
                    if x0 >= u64::from(plot_right) {
                        continue;
                    }
                    let height = (u64::from(count.cited_by_count) * u64::from(plot_height)
                        / u64::from(max_count)) as u32;
                    canvas.fill(x0 as u32, plot_bottom - height, bar_width as u32, height, BAR);
                }
            }
        }

        canvas.fill(plot_left, plot_bottom, plot_right - plot_left, 1, AXIS);
        canvas.fill(plot_left, plot_top, 1, plot_bottom - plot_top + 1, AXIS);
        canvas.encode()
    }
}

/// RGB pixel buffer.
struct Canvas {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl Canvas {
    fn new(width: u32, height: u32) -> Self {
        let pixels = BACKGROUND
            .iter()
            .copied()
            .cycle()
            .take((width * height * 3) as usize)
            .collect();
        Self {
            width,
            height,
            pixels,
        }
    }

    /// Fill a rectangle, clipped to the canvas.
    fn fill(&mut self, x: u32, y: u32, w: u32, h: u32, color: [u8; 3]) {
        let x_end = (x + w).min(self.width);
        let y_end = (y + h).min(self.height);
        for row in y..y_end {
            for col in x..x_end {
                let i = ((row * self.width + col) * 3) as usize;
                self.pixels[i..i + 3].copy_from_slice(&color);
            }
        }
    }

    fn encode(&self) -> Result<Vec<u8>> {
        let mut out = Vec::new();
        {
            let mut encoder = png::Encoder::new(&mut out, self.width, self.height);
            encoder.set_color(png::ColorType::Rgb);
            encoder.set_depth(png::BitDepth::Eight);
            let mut writer = encoder
                .write_header()
                .map_err(|e| WorksError::Chart(e.to_string()))?;
            writer
                .write_image_data(&self.pixels)
                .map_err(|e| WorksError::Chart(e.to_string()))?;
            writer
                .finish()
                .map_err(|e| WorksError::Chart(e.to_string()))?;
        }
        Ok(out)
    }
}
