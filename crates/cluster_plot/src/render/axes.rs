use crate::{
    constants::{AXIS_PADDING, MARGIN_BOTTOM, MARGIN_LEFT, MARGIN_RIGHT, MARGIN_TOP},
    figure::Bounds,
};

/// Upper bound on generated ticks, guards against tiny steps on huge ranges
const MAX_TICKS: usize = 100;

/// Maps data coordinates onto the plot area of the image (y up)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
    /// plot area in px
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    /// Fits the data bounds (padded) into an image of `width` x `height` px
    pub fn fit(bounds: Option<Bounds>, width: u32, height: u32) -> Self {
        let b = bounds.unwrap_or(Bounds {
            x_min: 0.0,
            x_max: 1.0,
            y_min: 0.0,
            y_max: 1.0,
        });
        let (x_min, x_max) = padded_range(b.x_min, b.x_max);
        let (y_min, y_max) = padded_range(b.y_min, b.y_max);

        Self {
            x_min,
            x_max,
            y_min,
            y_max,
            left: MARGIN_LEFT,
            top: MARGIN_TOP,
            width: (width as f64 - MARGIN_LEFT - MARGIN_RIGHT).max(1.0),
            height: (height as f64 - MARGIN_TOP - MARGIN_BOTTOM).max(1.0),
        }
    }

    /// Data -> px
    #[inline]
    pub fn to_px(&self, x: f64, y: f64) -> (f64, f64) {
        let px_x = self.left + (x - self.x_min) / (self.x_max - self.x_min) * self.width;
        let px_y = self.top + (self.y_max - y) / (self.y_max - self.y_min) * self.height;
        (px_x, px_y)
    }

    pub fn right(&self) -> f64 {
        self.left + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }
}

/// Widens [min, max] by the axis padding; a zero-width range gets ±0.5
fn padded_range(min: f64, max: f64) -> (f64, f64) {
    let span = max - min;
    if span.abs() < f64::EPSILON * min.abs().max(1.0) {
        return (min - 0.5, max + 0.5);
    }
    (min - span * AXIS_PADDING, max + span * AXIS_PADDING)
}

/// 1, 2, 2.5 or 5 times a power of ten, at least `raw`
fn nice_step(raw: f64) -> f64 {
    let magnitude = 10f64.powi(raw.log10().floor() as i32);
    // tolerance keeps 0.2 / 0.1 from rounding up to the next step
    let fraction = raw / magnitude - 1e-9;
    let nice = if fraction <= 1.0 {
        1.0
    } else if fraction <= 2.0 {
        2.0
    } else if fraction <= 2.5 {
        2.5
    } else if fraction <= 5.0 {
        5.0
    } else {
        10.0
    };
    nice * magnitude
}

/// Tick positions inside [min, max], about `target` of them.
/// Returns the ticks and the step between them.
pub fn nice_ticks(min: f64, max: f64, target: usize) -> (Vec<f64>, f64) {
    let span = max - min;
    if !span.is_finite() || span <= 0.0 || target < 2 {
        return (Vec::new(), 0.0);
    }
    let step = nice_step(span / (target - 1) as f64);
    let first = (min / step).ceil();
    let ticks = (0..MAX_TICKS)
        .map(|k| (first + k as f64) * step)
        .take_while(|t| *t <= max + step * 1e-9)
        .map(|t| if t.abs() < step * 1e-9 { 0.0 } else { t })
        .collect();
    (ticks, step)
}

/// Formats a tick with as many decimals as the step needs
pub fn format_tick(value: f64, step: f64) -> String {
    let mut decimals = 0usize;
    let mut scaled = step;
    while decimals < 6 && (scaled - scaled.round()).abs() > 1e-9 * scaled.abs().max(1.0) {
        scaled *= 10.0;
        decimals += 1;
    }
    let text = format!("{:.*}", decimals, value);
    // "-0" / "-0.0"
    if text.trim_start_matches('-').chars().all(|c| c == '0' || c == '.') {
        text.trim_start_matches('-').to_string()
    } else {
        text
    }
}
