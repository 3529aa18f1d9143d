//! Synthetic page builders
//!
//! Rendered chart pages are copyrighted, so the regression tests draw
//! their own: blank pages, plain bordered rectangles, full stitch charts
//! with bold/regular internal lines and page clutter, and a few
//! adversarial layouts.

use crate::TestResult;
use gridcrop_core::{Color, GridBounds, Pix};

/// A white page
pub fn blank_page(width: u32, height: u32) -> TestResult<Pix> {
    Ok(Pix::new_filled(width, height, 3, Color::WHITE)?)
}

/// A uniform gray page with no ink
pub fn gray_page(width: u32, height: u32, level: u8) -> TestResult<Pix> {
    Ok(Pix::new_filled(width, height, 3, Color::gray(level))?)
}

/// A white page with a black rectangle outline of the given stroke
/// thickness, drawn inward from `rect`'s outer edge.
pub fn bordered_page(width: u32, height: u32, rect: GridBounds, thickness: u32) -> TestResult<Pix> {
    let mut pm = blank_page(width, height)?.to_mut();
    pm.render_box(&rect, thickness, Color::BLACK);
    Ok(pm.into())
}

/// A `width` x `height` page with a border covering `fx` x `fy` of the
/// page, centered.
///
/// Returns the page and the outline rectangle.
pub fn centered_border(
    width: u32,
    height: u32,
    fx: f64,
    fy: f64,
    thickness: u32,
) -> TestResult<(Pix, GridBounds)> {
    let rw = (width as f64 * fx).round() as u32;
    let rh = (height as f64 * fy).round() as u32;
    let rect = GridBounds::new((width - rw) / 2, (height - rh) / 2, rw, rh);
    Ok((bordered_page(width, height, rect, thickness)?, rect))
}

/// Punch `gap`-pixel white gaps into the outline of `rect` every
/// `period` pixels along each side.
///
/// Gaps stay clear of the perpendicular strokes, so the extent of each
/// stroke is unchanged.
pub fn punch_border_gaps(
    pix: &Pix,
    rect: &GridBounds,
    thickness: u32,
    period: u32,
    gap: u32,
) -> Pix {
    let mut pm = pix.to_mut();
    let gap = gap.max(1);
    let period = period.max(gap + 1);
    let phase = (period / 2).max(thickness);

    let x_end = rect.right() - thickness;
    let mut x = rect.x + phase;
    while x + gap <= x_end {
        pm.fill_rect(x as i32, rect.y as i32, gap, thickness, Color::WHITE);
        pm.fill_rect(
            x as i32,
            (rect.bottom() - thickness) as i32,
            gap,
            thickness,
            Color::WHITE,
        );
        x += period;
    }
    let y_end = rect.bottom() - thickness;
    let mut y = rect.y + phase;
    while y + gap <= y_end {
        pm.fill_rect(rect.x as i32, y as i32, thickness, gap, Color::WHITE);
        pm.fill_rect(
            (rect.right() - thickness) as i32,
            y as i32,
            thickness,
            gap,
            Color::WHITE,
        );
        y += period;
    }
    pm.into()
}

/// Erase the left stroke of an outline drawn with [`bordered_page`],
/// leaving the horizontal strokes intact.
pub fn erase_left_border(pix: &Pix, rect: &GridBounds, thickness: u32) -> Pix {
    let mut pm = pix.to_mut();
    pm.fill_rect(
        rect.x as i32,
        (rect.y + thickness) as i32,
        thickness,
        rect.height - 2 * thickness,
        Color::WHITE,
    );
    pm.into()
}

/// Two horizontal and two vertical strokes that look like a rectangle
/// from afar but never meet.
///
/// The horizontals are offset against each other and the verticals sit
/// midway between the horizontals' ends, stopping short of them.
pub fn false_rectangle_page(width: u32, height: u32) -> TestResult<Pix> {
    let mut pm = blank_page(width, height)?.to_mut();
    let w = width as f64;
    let h = height as f64;
    let px = |f: f64| (w * f).round() as i32;
    let py = |f: f64| (h * f).round() as i32;

    // Top stroke spans 10%..60%, bottom stroke 40%..90%
    pm.render_hline(px(0.10), px(0.60) - 1, py(0.15), 2, Color::BLACK);
    pm.render_hline(px(0.40), px(0.90) - 1, py(0.85), 2, Color::BLACK);

    // Verticals at the mean of the horizontals' starts and ends
    let left = (px(0.10) + px(0.40)) / 2;
    let right = (px(0.60) - 1 + px(0.90) - 1) / 2;
    pm.render_vline(left, py(0.30), py(0.70), 2, Color::BLACK);
    pm.render_vline(right, py(0.30), py(0.70), 2, Color::BLACK);
    Ok(pm.into())
}

/// A stitch chart page: bordered grid of square cells with thin
/// internal lines, bolder lines every `bold_every` cells, and optional
/// page clutter around it.
#[derive(Debug, Clone)]
pub struct StitchChart {
    /// Page width
    pub page_width: u32,
    /// Page height
    pub page_height: u32,
    /// Top-left corner of the grid's outer border
    pub origin: (u32, u32),
    /// Number of cell columns
    pub columns: u32,
    /// Number of cell rows
    pub rows: u32,
    /// Cell pitch in pixels
    pub cell_size: u32,
    /// Outer border stroke thickness
    pub border_thickness: u32,
    /// Bold line interval in cells (0 disables bold lines)
    pub bold_every: u32,
    /// Draw a title block and axis numbers around the grid
    pub clutter: bool,
    /// Draw an unrelated horizontal rule below the grid
    pub distractor_rule: bool,
    /// Ink color of the grid
    pub ink: Color,
}

impl Default for StitchChart {
    fn default() -> Self {
        Self {
            page_width: 400,
            page_height: 400,
            origin: (40, 40),
            columns: 32,
            rows: 32,
            cell_size: 10,
            border_thickness: 2,
            bold_every: 10,
            clutter: true,
            distractor_rule: false,
            ink: Color::BLACK,
        }
    }
}

impl StitchChart {
    /// Set the page size
    pub fn with_page(mut self, width: u32, height: u32) -> Self {
        self.page_width = width;
        self.page_height = height;
        self
    }

    /// Set the grid origin
    pub fn with_origin(mut self, x: u32, y: u32) -> Self {
        self.origin = (x, y);
        self
    }

    /// Set the cell layout
    pub fn with_cells(mut self, columns: u32, rows: u32, cell_size: u32) -> Self {
        self.columns = columns;
        self.rows = rows;
        self.cell_size = cell_size;
        self
    }

    /// Set the outer border thickness
    pub fn with_border_thickness(mut self, thickness: u32) -> Self {
        self.border_thickness = thickness;
        self
    }

    /// Set the bold line interval
    pub fn with_bold_every(mut self, cells: u32) -> Self {
        self.bold_every = cells;
        self
    }

    /// Enable or disable page clutter
    pub fn with_clutter(mut self, clutter: bool) -> Self {
        self.clutter = clutter;
        self
    }

    /// Enable or disable the distractor rule below the grid
    pub fn with_distractor_rule(mut self, rule: bool) -> Self {
        self.distractor_rule = rule;
        self
    }

    /// Set the grid ink color
    pub fn with_ink(mut self, ink: Color) -> Self {
        self.ink = ink;
        self
    }

    /// Outer rectangle of the grid border
    pub fn grid_bounds(&self) -> GridBounds {
        GridBounds::new(
            self.origin.0,
            self.origin.1,
            self.columns * self.cell_size,
            self.rows * self.cell_size,
        )
    }

    /// Render the page
    pub fn render(&self) -> TestResult<Pix> {
        let mut pm = blank_page(self.page_width, self.page_height)?.to_mut();
        let b = self.grid_bounds();
        let (x0, y0) = (b.x as i32, b.y as i32);
        let right = b.right() as i32 - 1;
        let bottom = b.bottom() as i32 - 1;
        let cell = self.cell_size as i32;

        for i in 1..self.columns {
            let x = x0 + i as i32 * cell;
            let w = self.line_width(i);
            pm.render_vline(x, y0, bottom, w, self.ink);
        }
        for j in 1..self.rows {
            let y = y0 + j as i32 * cell;
            let w = self.line_width(j);
            pm.render_hline(x0, right, y, w, self.ink);
        }
        pm.render_box(&b, self.border_thickness, self.ink);

        if self.clutter {
            // Title: a row of glyph-sized blocks well above the grid
            let title_y = (y0 / 3).max(0);
            let mut x = x0;
            while x < x0 + b.width as i32 / 2 {
                pm.fill_rect(x, title_y, 6, 8, Color::BLACK);
                x += 11;
            }
            // Axis numbers left of the grid and below it, one per bold line
            let step = self.bold_every.max(1);
            for j in (0..=self.rows).step_by(step as usize) {
                let y = y0 + j as i32 * cell - 3;
                pm.fill_rect(x0 - 18, y, 10, 6, Color::BLACK);
            }
            for i in (0..=self.columns).step_by(step as usize) {
                let x = x0 + i as i32 * cell - 5;
                pm.fill_rect(x, bottom + 8, 10, 6, Color::BLACK);
            }
        }

        if self.distractor_rule {
            // Shorter, offset rule near the foot of the page
            let y = (bottom + self.page_height as i32) / 2 + 4;
            let x1 = x0 + b.width as i32 / 4;
            let x2 = right - b.width as i32 / 8;
            pm.render_hline(x1, x2, y, 2, Color::BLACK);
        }

        Ok(pm.into())
    }

    fn line_width(&self, index: u32) -> u32 {
        if self.bold_every > 0 && index % self.bold_every == 0 {
            2
        } else {
            1
        }
    }
}
