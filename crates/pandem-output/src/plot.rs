//! The strip plot — a compact RGBA8 history of the whole epidemic.
//!
//! Each call to [`StripPlot::plot`] appends one pixel column: the per-status
//! census stacked bottom-to-top, one pixel per piece.  Over a run the columns
//! accumulate into the familiar banded area chart.  The buffer is plain
//! row-major RGBA8 sized for direct upload into an image surface; the
//! embedding application owns the actual blit.

use pandem_core::{Status, StatusCounts, Tick};
use pandem_sim::SimObserver;

/// Display color per status, RGBA8.
pub const fn status_color(status: Status) -> [u8; 4] {
    match status {
        Status::Healthy   => [0x81, 0xD4, 0xFA, 0xFF],
        Status::Shelter   => [0xB3, 0x9D, 0xDB, 0xFF],
        Status::Infected  => [0xC6, 0x28, 0x28, 0xFF],
        Status::Recovered => [0x81, 0xF4, 0x81, 0xFF],
        Status::Dead      => [0x00, 0x00, 0x00, 0xFF],
    }
}

/// Stacking order, bottom band first.  Infected sits on top so the epidemic
/// front reads as a red edge.
const STACK: [Status; 5] = [
    Status::Healthy,
    Status::Shelter,
    Status::Recovered,
    Status::Dead,
    Status::Infected,
];

/// An append-only pixel buffer charting the per-status counts over time.
///
/// `height` is fixed at the population size; `width` is capacity and doubles
/// whenever the plotted columns fill it, like a `Vec`.  Pixels beyond the
/// stacked total stay transparent.
pub struct StripPlot {
    width:   usize,
    height:  usize,
    columns: usize,
    pixels:  Vec<u8>,
}

impl StripPlot {
    /// A plot `height` pixels tall (one per piece), with initial column
    /// capacity equal to the height.
    pub fn new(height: usize) -> Self {
        let width = height.max(1);
        Self {
            width,
            height,
            columns: 0,
            pixels: vec![0; width * height * 4],
        }
    }

    /// Append one column for `counts`.
    pub fn plot(&mut self, counts: &StatusCounts) {
        if self.columns == self.width {
            self.grow();
        }
        let x = self.columns;
        self.columns += 1;

        let mut y = self.height;
        for status in STACK {
            let color = status_color(status);
            for _ in 0..counts.get(status) {
                if y == 0 {
                    return;
                }
                y -= 1;
                self.put(x, y, color);
            }
        }
    }

    /// Capacity in columns.
    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Columns plotted so far.
    #[inline]
    pub fn columns(&self) -> usize {
        self.columns
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// The backing buffer, row-major RGBA8, `width * height * 4` bytes.
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// The RGBA value at `(x, y)`, y counted from the top row.
    pub fn pixel(&self, x: usize, y: usize) -> [u8; 4] {
        let at = (y * self.width + x) * 4;
        [
            self.pixels[at],
            self.pixels[at + 1],
            self.pixels[at + 2],
            self.pixels[at + 3],
        ]
    }

    #[inline]
    fn put(&mut self, x: usize, y: usize, color: [u8; 4]) {
        let at = (y * self.width + x) * 4;
        self.pixels[at..at + 4].copy_from_slice(&color);
    }

    /// Double the column capacity, re-laying each row into the wider buffer.
    fn grow(&mut self) {
        let new_width = self.width * 2;
        let mut pixels = vec![0; new_width * self.height * 4];
        for y in 0..self.height {
            let src = y * self.width * 4;
            let dst = y * new_width * 4;
            pixels[dst..dst + self.width * 4]
                .copy_from_slice(&self.pixels[src..src + self.width * 4]);
        }
        self.width = new_width;
        self.pixels = pixels;
    }
}

impl SimObserver for StripPlot {
    /// Plotting every tick gives the chart its time axis; the doubling
    /// buffer keeps appends amortized O(1).
    fn on_step_end(&mut self, _turn: Tick, counts: &StatusCounts) {
        self.plot(counts);
    }
}
