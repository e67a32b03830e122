//! Heatmap rasterization.
//!
//! Lays out a plot area with tick labels and axis titles, a vertical colorbar
//! with its own ticks and title, and fills one rectangle per matrix cell
//! (nearest shading). Row 0 sits at the bottom so the y axis grows upward.
use image::{Rgb, RgbImage};
use tracing::{debug, info};

use crate::core::params::PlotParams;
use crate::core::processing::colormap::Normalizer;
use crate::core::processing::font::{ADVANCE, glyph, text_height, text_width};
use crate::error::{Error, Result};
use crate::io::dat::ContactMatrix;

const BACKGROUND: Rgb<u8> = Rgb([255, 255, 255]);
const FOREGROUND: Rgb<u8> = Rgb([0, 0, 0]);
const COLORBAR_TICKS: f64 = 5.0;
const MAX_TICKS: usize = 64;

/// Rendered image plus the color range actually used.
#[derive(Debug, Clone)]
pub struct RenderedHeatmap {
    pub image: RgbImage,
    pub vmin: f64,
    pub vmax: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Rect {
    pub x: u32,
    pub y: u32,
    pub w: u32,
    pub h: u32,
}

impl Rect {
    fn right(&self) -> u32 {
        self.x + self.w
    }

    fn bottom(&self) -> u32 {
        self.y + self.h
    }
}

#[derive(Debug, Clone)]
pub(crate) struct HeatmapLayout {
    pub plot: Rect,
    pub colorbar: Rect,
    pub label_scale: u32,
    pub tick_scale: u32,
    pub tick_len: u32,
    pub pad: u32,
    pub line: u32,
}

/// Half-open pixel span `[a, b)` of item `i` out of `n` sharing `len` pixels from `start`.
fn span(start: u32, len: u32, n: usize, i: usize) -> (u32, u32) {
    let len = len as u64;
    let n = n as u64;
    let i = i as u64;
    let a = start as u64 + i * len / n;
    let b = start as u64 + (i + 1) * len / n;
    (a as u32, b as u32)
}

impl HeatmapLayout {
    /// Horizontal pixel span of column `c`.
    pub fn column_span(&self, c: usize, n_cols: usize) -> (u32, u32) {
        span(self.plot.x, self.plot.w, n_cols, c)
    }

    /// Vertical pixel span of row `r`, counting rows from the bottom.
    pub fn row_span(&self, r: usize, n_rows: usize) -> (u32, u32) {
        let (a, b) = span(0, self.plot.h, n_rows, r);
        (self.plot.bottom() - b, self.plot.bottom() - a)
    }

    pub fn compute(
        width: u32,
        height: u32,
        matrix: &ContactMatrix,
        colorbar_labels: &[String],
    ) -> Result<Self> {
        let label_scale = (height / 170).max(1);
        let tick_scale = (label_scale * 5 / 14).max(1);
        let pad = (height / 120).max(2);
        let tick_len = (height / 200).max(2);
        let line = (height / 1200).max(1);

        let label_h = u64::from(text_height(label_scale));
        let tick_h = u64::from(text_height(tick_scale));
        let widest = |labels: &[String]| {
            labels
                .iter()
                .map(|l| {
                    let n = l.chars().count() as u64;
                    (n * u64::from(ADVANCE)).saturating_sub(1) * u64::from(tick_scale)
                })
                .max()
                .unwrap_or(0)
        };
        let (pad64, tick_len64) = (u64::from(pad), u64::from(tick_len));

        let left = pad64
            + label_h
            + pad64
            + widest(matrix.row_labels.as_slice())
            + pad64
            + tick_len64;
        let bottom = tick_len64 + pad64 + tick_h + pad64 + label_h + pad64;
        let top = 2 * pad64 + tick_h / 2;
        let cb_gap = 2 * pad;
        let cb_w = (width / 40).max(4);
        let right = u64::from(cb_gap + cb_w)
            + tick_len64
            + pad64
            + widest(colorbar_labels)
            + pad64
            + label_h
            + pad64;

        let too_small = Error::CanvasTooSmall {
            width,
            height,
            rows: matrix.n_rows(),
            cols: matrix.n_cols(),
        };
        let plot_w = u64::from(width)
            .checked_sub(left + right)
            .filter(|w| *w >= matrix.n_cols() as u64);
        let plot_h = u64::from(height)
            .checked_sub(top + bottom)
            .filter(|h| *h >= matrix.n_rows() as u64);
        let (plot_w, plot_h) = match (plot_w, plot_h) {
            (Some(w), Some(h)) => (w as u32, h as u32),
            _ => return Err(too_small),
        };
        // both margins are below `width`/`height` past this point
        let (left, top) = (left as u32, top as u32);

        let plot = Rect {
            x: left,
            y: top,
            w: plot_w,
            h: plot_h,
        };
        let colorbar = Rect {
            x: plot.right() + cb_gap,
            y: top,
            w: cb_w,
            h: plot_h,
        };
        debug!("Heatmap layout: plot={:?} colorbar={:?}", plot, colorbar);

        Ok(Self {
            plot,
            colorbar,
            label_scale,
            tick_scale,
            tick_len,
            pad,
            line,
        })
    }
}

struct Canvas {
    img: RgbImage,
}

impl Canvas {
    fn new(width: u32, height: u32) -> Self {
        Self {
            img: RgbImage::from_pixel(width, height, BACKGROUND),
        }
    }

    fn fill_rect(&mut self, x: i64, y: i64, w: u32, h: u32, color: Rgb<u8>) {
        let x0 = x.max(0);
        let y0 = y.max(0);
        let x1 = (x + w as i64).min(self.img.width() as i64);
        let y1 = (y + h as i64).min(self.img.height() as i64);
        for py in y0..y1 {
            for px in x0..x1 {
                self.img.put_pixel(px as u32, py as u32, color);
            }
        }
    }

    /// Outline drawn just outside `rect`.
    fn outline(&mut self, rect: Rect, line: u32) {
        let (x, y, l) = (rect.x as i64, rect.y as i64, line as i64);
        let outer_w = rect.w + 2 * line;
        self.fill_rect(x - l, y - l, outer_w, line, FOREGROUND);
        self.fill_rect(x - l, rect.bottom() as i64, outer_w, line, FOREGROUND);
        self.fill_rect(x - l, y, line, rect.h, FOREGROUND);
        self.fill_rect(rect.right() as i64, y, line, rect.h, FOREGROUND);
    }

    /// Horizontal text with its top-left corner at `(x, y)`.
    fn draw_text(&mut self, text: &str, x: i64, y: i64, scale: u32) {
        let s = scale as i64;
        for (k, c) in text.chars().enumerate() {
            let origin = x + (k as i64) * (ADVANCE as i64) * s;
            for (row, &bits) in glyph(c).iter().enumerate() {
                for col in 0..5 {
                    if (bits >> (4 - col)) & 1 == 1 {
                        self.fill_rect(
                            origin + col as i64 * s,
                            y + row as i64 * s,
                            scale,
                            scale,
                            FOREGROUND,
                        );
                    }
                }
            }
        }
    }

    /// Text rotated 90 degrees counter-clockwise, starting at `(x, y_bottom)`
    /// and reading upward.
    fn draw_text_vertical(&mut self, text: &str, x: i64, y_bottom: i64, scale: u32) {
        let s = scale as i64;
        for (k, c) in text.chars().enumerate() {
            let base = (k as i64) * (ADVANCE as i64);
            for (row, &bits) in glyph(c).iter().enumerate() {
                for col in 0..5i64 {
                    if (bits >> (4 - col)) & 1 == 1 {
                        self.fill_rect(
                            x + row as i64 * s,
                            y_bottom - (base + col + 1) * s,
                            scale,
                            scale,
                            FOREGROUND,
                        );
                    }
                }
            }
        }
    }
}

/// Tick values on a 1-2-5 grid covering `[lo, hi]`, plus the step used.
pub fn nice_ticks(lo: f64, hi: f64, target: f64) -> (Vec<f64>, f64) {
    let range = hi - lo;
    if !range.is_finite() || range <= 0.0 {
        return (vec![lo], 1.0);
    }
    let raw = range / target;
    let magnitude = 10f64.powf(raw.log10().floor());
    let step = match raw / magnitude {
        n if n <= 1.0 => 1.0,
        n if n <= 2.0 => 2.0,
        n if n <= 5.0 => 5.0,
        _ => 10.0,
    } * magnitude;

    // step too fine to move the endpoints
    if lo + step == lo || hi - step == hi {
        return (vec![lo, hi], range);
    }

    let first = (lo / step).ceil();
    let last = (hi / step + 1e-9).floor();
    let count = last - first + 1.0;
    if count < 1.0 {
        return (vec![lo, hi], range);
    }
    let eps = step * 1e-9;
    let ticks = (0..(count as usize).min(MAX_TICKS))
        .map(|i| {
            let v = (first + i as f64) * step;
            // avoid printing "-0"
            if v.abs() < eps { 0.0 } else { v }
        })
        .collect();
    (ticks, step)
}

pub fn format_tick(v: f64, step: f64) -> String {
    let decimals = if step >= 1.0 {
        0
    } else {
        (-step.log10()).ceil() as usize
    };
    format!("{:.*}", decimals, v)
}

/// Color range: explicit overrides first, then the data range.
fn resolve_range(matrix: &ContactMatrix, params: &PlotParams) -> (f64, f64) {
    let (data_lo, data_hi) = matrix.value_range().unwrap_or((0.0, 100.0));
    let lo = params.vmin.unwrap_or(data_lo);
    let hi = params.vmax.unwrap_or(data_hi);
    (lo, hi.max(lo))
}

/// Stride between drawn labels so that labels of `extent` pixels, placed
/// every `cell` pixels, do not collide.
fn label_stride(extent: u32, gap: u32, cell: f64) -> usize {
    if cell <= 0.0 {
        return 1;
    }
    (((extent + gap) as f64 / cell).ceil() as usize).max(1)
}

/// Everything the rasterizer needs to know before touching pixels.
pub(crate) struct Frame {
    pub layout: HeatmapLayout,
    pub vmin: f64,
    pub vmax: f64,
    pub ticks: Vec<f64>,
    pub tick_labels: Vec<String>,
}

impl Frame {
    pub fn new(matrix: &ContactMatrix, params: &PlotParams) -> Result<Self> {
        params.validate()?;
        let (vmin, vmax) = resolve_range(matrix, params);
        let (ticks, step) = nice_ticks(vmin, vmax, COLORBAR_TICKS);
        let tick_labels: Vec<String> = ticks.iter().map(|&v| format_tick(v, step)).collect();
        let layout =
            HeatmapLayout::compute(params.width, params.height, matrix, &tick_labels)?;
        Ok(Self {
            layout,
            vmin,
            vmax,
            ticks,
            tick_labels,
        })
    }
}

fn label_at(labels: &[String], i: usize) -> &str {
    labels.get(i).map(String::as_str).unwrap_or("")
}

pub fn render_heatmap(matrix: &ContactMatrix, params: &PlotParams) -> Result<RenderedHeatmap> {
    let Frame {
        layout,
        vmin,
        vmax,
        ticks,
        tick_labels,
    } = Frame::new(matrix, params)?;
    let (width, height) = (params.width, params.height);
    let mut canvas = Canvas::new(width, height);
    let norm = Normalizer::new(vmin, vmax);
    let (n_rows, n_cols) = matrix.values.dim();

    // cells
    for ((r, c), &v) in matrix.values.indexed_iter() {
        if !v.is_finite() {
            continue;
        }
        let (x0, x1) = layout.column_span(c, n_cols);
        let (y0, y1) = layout.row_span(r, n_rows);
        let color = params.colormap.sample(norm.normalize(v));
        canvas.fill_rect(x0 as i64, y0 as i64, x1 - x0, y1 - y0, color);
    }
    canvas.outline(layout.plot, layout.line);

    let plot = layout.plot;
    let ts = layout.tick_scale;
    let tick_h = text_height(ts);

    // x ticks: column labels
    let widest_col = matrix
        .column_labels
        .iter()
        .map(|l| text_width(l, ts))
        .max()
        .unwrap_or(0);
    let x_stride = label_stride(widest_col, layout.pad, plot.w as f64 / n_cols as f64);
    for c in (0..n_cols).step_by(x_stride) {
        let (a, b) = layout.column_span(c, n_cols);
        let center = ((a + b) / 2) as i64;
        let top = plot.bottom() + layout.line;
        canvas.fill_rect(
            center - (layout.line / 2) as i64,
            top as i64,
            layout.line,
            layout.tick_len,
            FOREGROUND,
        );
        let label = label_at(&matrix.column_labels, c);
        let w = text_width(label, ts) as i64;
        canvas.draw_text(
            label,
            center - w / 2,
            (plot.bottom() + layout.tick_len + layout.pad) as i64,
            ts,
        );
    }

    // y ticks: row labels
    let y_stride = label_stride(tick_h, layout.pad / 2, plot.h as f64 / n_rows as f64);
    for r in (0..n_rows).step_by(y_stride) {
        let (a, b) = layout.row_span(r, n_rows);
        let center = ((a + b) / 2) as i64;
        let tick_x = plot.x as i64 - layout.line as i64 - layout.tick_len as i64;
        canvas.fill_rect(
            tick_x,
            center - (layout.line / 2) as i64,
            layout.tick_len,
            layout.line,
            FOREGROUND,
        );
        let label = label_at(&matrix.row_labels, r);
        let w = text_width(label, ts) as i64;
        canvas.draw_text(
            label,
            tick_x - layout.pad as i64 - w,
            center - (tick_h / 2) as i64,
            ts,
        );
    }

    // axis titles
    let ls = layout.label_scale;
    let x_title_w = text_width(&params.x_label, ls) as i64;
    canvas.draw_text(
        &params.x_label,
        (plot.x + plot.w / 2) as i64 - x_title_w / 2,
        (plot.bottom() + layout.tick_len + 2 * layout.pad + tick_h) as i64,
        ls,
    );
    let y_title_w = text_width(&params.y_label, ls) as i64;
    canvas.draw_text_vertical(
        &params.y_label,
        layout.pad as i64,
        (plot.y + plot.h / 2) as i64 + y_title_w / 2,
        ls,
    );

    // colorbar
    let cb = layout.colorbar;
    for dy in 0..cb.h {
        let t = if cb.h > 1 {
            (cb.h - 1 - dy) as f64 / (cb.h - 1) as f64
        } else {
            0.0
        };
        let color = params.colormap.sample(t);
        canvas.fill_rect(cb.x as i64, (cb.y + dy) as i64, cb.w, 1, color);
    }
    canvas.outline(cb, layout.line);

    let cb_tick_x = (cb.right() + layout.line) as i64;
    for (value, label) in ticks.iter().zip(&tick_labels) {
        let offset = (norm.normalize(*value) * (cb.h.saturating_sub(1)) as f64).round() as i64;
        let y = (cb.bottom() as i64 - 1) - offset;
        canvas.fill_rect(
            cb_tick_x,
            y - (layout.line / 2) as i64,
            layout.tick_len,
            layout.line,
            FOREGROUND,
        );
        canvas.draw_text(
            label,
            cb_tick_x + (layout.tick_len + layout.pad) as i64,
            y - (tick_h / 2) as i64,
            ts,
        );
    }
    let cb_title_w = text_width(&params.colorbar_label, ls) as i64;
    canvas.draw_text_vertical(
        &params.colorbar_label,
        (width - layout.pad - text_height(ls)) as i64,
        (cb.y + cb.h / 2) as i64 + cb_title_w / 2,
        ls,
    );

    info!(
        "Rendered {}x{} heatmap ({} rows x {} cols, range {:.3}..{:.3}, {})",
        width, height, n_rows, n_cols, vmin, vmax, params.colormap
    );

    Ok(RenderedHeatmap {
        image: canvas.img,
        vmin,
        vmax,
    })
}
