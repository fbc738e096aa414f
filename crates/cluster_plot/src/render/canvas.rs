use super::{
    PlotBackend,
    axes::{Viewport, format_tick, nice_ticks},
};
use crate::{
    config::StyleConfig,
    constants::{TARGET_TICKS, TICK_LENGTH},
    error::Result,
    figure::{Figure, Mark},
    palette::Rgb,
};

use ab_glyph::{FontVec, PxScale};
use font_kit::{family_name::FamilyName, properties::Properties, source::SystemSource};
use image::{ImageBuffer, Rgb as Rgb8, RgbImage};
use imageproc::{
    drawing::{draw_filled_circle_mut, draw_hollow_rect_mut, draw_line_segment_mut, draw_text_mut},
    rect::Rect,
};
use std::path::{Path, PathBuf};

/// Raster drawing surface in px coordinates
pub struct Canvas<'f> {
    pub image: RgbImage,
    pub width: u32,
    pub height: u32,
    font: Option<&'f FontVec>,
}

impl<'f> Canvas<'f> {
    /// White canvas. Without a font, text calls are no-ops.
    pub fn new(width: u32, height: u32, font: Option<&'f FontVec>) -> Self {
        let image = ImageBuffer::from_pixel(width, height, Rgb::WHITE.to_rgb8());
        Self {
            image,
            width,
            height,
            font,
        }
    }

    pub fn has_font(&self) -> bool {
        self.font.is_some()
    }

    pub fn draw_line(&mut self, from: (f64, f64), to: (f64, f64), color: Rgb8<u8>) {
        draw_line_segment_mut(
            &mut self.image,
            (from.0 as f32, from.1 as f32),
            (to.0 as f32, to.1 as f32),
            color,
        );
    }

    /// "x" marker of `size` px, two px wide strokes
    pub fn draw_cross(&mut self, cx: f64, cy: f64, size: f64, color: Rgb8<u8>) {
        let h = size / 2.0;
        for dx in [0.0, 1.0] {
            self.draw_line((cx - h + dx, cy - h), (cx + h + dx, cy + h), color);
            self.draw_line((cx - h + dx, cy + h), (cx + h + dx, cy - h), color);
        }
    }

    /// Filled circle of `diameter` px
    pub fn draw_disc(&mut self, cx: f64, cy: f64, diameter: f64, color: Rgb8<u8>) {
        let radius = (diameter / 2.0).round().max(1.0) as i32;
        draw_filled_circle_mut(
            &mut self.image,
            (cx.round() as i32, cy.round() as i32),
            radius,
            color,
        );
    }

    pub fn draw_rect_outline(&mut self, x: f64, y: f64, width: f64, height: f64, color: Rgb8<u8>) {
        let rect = Rect::at(x as i32, y as i32).of_size(width.max(1.0) as u32, height.max(1.0) as u32);
        draw_hollow_rect_mut(&mut self.image, rect, color);
    }

    /// Text with its top-left corner at (x, y)
    pub fn draw_text(&mut self, x: f64, y: f64, text: &str, font_size: f64, color: Rgb8<u8>) {
        let Some(font) = self.font else {
            return;
        };
        let scale = PxScale::from(font_size as f32);
        draw_text_mut(
            &mut self.image,
            color,
            x as i32,
            y as i32,
            scale,
            font,
            text,
        );
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        self.image.save(path)?;
        Ok(())
    }
}

/// Looks up a sans-serif system font for labels
pub fn load_system_font() -> Option<FontVec> {
    let source = SystemSource::new();

    let font_families = [
        FamilyName::Title("DejaVu Sans".to_string()),
        FamilyName::Title("Arial".to_string()),
        FamilyName::Title("Helvetica".to_string()),
        FamilyName::SansSerif,
    ];

    for family in font_families {
        if let Ok(handle) = source.select_best_match(&[family], &Properties::new())
            && let Ok(font_kit_font) = handle.load()
            && let Some(font_bytes) = font_kit_font.copy_font_data()
            && let Ok(font) = FontVec::try_from_vec(font_bytes.to_vec())
        {
            return Some(font);
        }
    }

    log::warn!("no system font found, labels will not be drawn");
    None
}

/// Draws figures into a PNG file
pub struct PngBackend {
    path: PathBuf,
    style: StyleConfig,
    font: Option<FontVec>,
}

impl PngBackend {
    pub fn new<P: Into<PathBuf>>(path: P, style: StyleConfig, font: Option<FontVec>) -> Self {
        Self {
            path: path.into(),
            style,
            font,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Draws the figure onto a fresh canvas
    pub fn draw(&self, figure: &Figure) -> Canvas<'_> {
        let mut canvas = Canvas::new(self.style.width, self.style.height, self.font.as_ref());
        let viewport = Viewport::fit(figure.bounds(), self.style.width, self.style.height);
        log::debug!("viewport: {viewport:?}");

        draw_axes(&mut canvas, &viewport, self.style.font_size * 0.8);
        draw_marks(&mut canvas, &viewport, figure, &self.style);
        canvas
    }
}

impl PlotBackend for PngBackend {
    fn render(&mut self, figure: &Figure) -> Result<()> {
        let canvas = self.draw(figure);
        canvas.save(&self.path)?;
        log::info!("wrote {}", self.path.display());
        Ok(())
    }
}

/// Frame, ticks and tick labels
fn draw_axes(canvas: &mut Canvas, vp: &Viewport, font_size: f64) {
    let black = Rgb::BLACK.to_rgb8();
    canvas.draw_rect_outline(vp.left, vp.top, vp.width, vp.height, black);

    let (x_ticks, x_step) = nice_ticks(vp.x_min, vp.x_max, TARGET_TICKS);
    for x in x_ticks {
        let (px, _) = vp.to_px(x, vp.y_min);
        let bottom = vp.bottom();
        canvas.draw_line((px, bottom), (px, bottom + TICK_LENGTH), black);
        let text = format_tick(x, x_step);
        let text_x = px - font_size * 0.3 * text.chars().count() as f64;
        canvas.draw_text(text_x, bottom + TICK_LENGTH + 2.0, &text, font_size, black);
    }

    let (y_ticks, y_step) = nice_ticks(vp.y_min, vp.y_max, TARGET_TICKS);
    for y in y_ticks {
        let (_, py) = vp.to_px(vp.x_min, y);
        canvas.draw_line((vp.left - TICK_LENGTH, py), (vp.left, py), black);
        let text = format_tick(y, y_step);
        let text_x = vp.left - TICK_LENGTH - 4.0 - font_size * 0.6 * text.chars().count() as f64;
        canvas.draw_text(text_x, py - font_size / 2.0, &text, font_size, black);
    }
}

fn draw_marks(canvas: &mut Canvas, vp: &Viewport, figure: &Figure, style: &StyleConfig) {
    for mark in &figure.marks {
        match mark {
            Mark::Point { x, y, color } => {
                let (px, py) = vp.to_px(*x, *y);
                canvas.draw_cross(px, py, style.point_marker_size, color.to_rgb8());
            }
            Mark::Centroid { x, y, color } => {
                let (px, py) = vp.to_px(*x, *y);
                canvas.draw_disc(px, py, style.centroid_marker_size, color.to_rgb8());
            }
            Mark::Label { x, y, text } => {
                // anchor is the baseline, the canvas wants the top
                let (px, py) = vp.to_px(*x, *y);
                canvas.draw_text(
                    px,
                    py - style.font_size,
                    text,
                    style.font_size,
                    Rgb::BLACK.to_rgb8(),
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        csv_reader::Table,
        figure::{build_figure, records_from_tables},
        palette::Palette,
    };
    use tempfile::TempDir;

    fn two_cluster_figure() -> (Figure, Palette) {
        let points = Table::from_rows(
            "points",
            vec![vec![0.0, 0.0, 1.0, 1.0], vec![1.0, 1.0, 2.0, 2.0]],
        )
        .unwrap();
        let centroids =
            Table::from_rows("centroids", vec![vec![0.0, 1.0, 1.0], vec![1.0, 2.0, 2.0]]).unwrap();
        let palette = Palette::generate(2);
        let (points, centroids) = records_from_tables(&points, &centroids).unwrap();
        let figure = build_figure(&points, &centroids, &palette).unwrap();
        (figure, palette)
    }

    #[test]
    fn test_canvas_starts_white() {
        let canvas = Canvas::new(200, 100, None);
        assert_eq!(canvas.image.dimensions(), (200, 100));
        assert!(canvas.image.pixels().all(|p| *p == Rgb8([255, 255, 255])));
        assert!(!canvas.has_font());
    }

    #[test]
    fn test_text_without_font_is_noop() {
        let mut canvas = Canvas::new(100, 100, None);
        canvas.draw_text(10.0, 10.0, "0", 14.0, Rgb8([0, 0, 0]));
        assert!(canvas.image.pixels().all(|p| *p == Rgb8([255, 255, 255])));
    }

    #[test]
    fn test_cross_center_is_colored() {
        let mut canvas = Canvas::new(50, 50, None);
        let red = Rgb8([200, 0, 0]);
        canvas.draw_cross(25.0, 25.0, 8.0, red);
        assert_eq!(*canvas.image.get_pixel(25, 25), red);
        assert_eq!(*canvas.image.get_pixel(21, 21), red);
        assert_eq!(*canvas.image.get_pixel(25, 21), Rgb8([255, 255, 255]));
    }

    #[test]
    fn test_centroids_drawn_over_points() {
        let (figure, palette) = two_cluster_figure();
        let style = StyleConfig::default();
        let backend = PngBackend::new("unused.png", style.clone(), None);
        let canvas = backend.draw(&figure);

        let vp = Viewport::fit(figure.bounds(), style.width, style.height);
        for (i, (x, y)) in [(1.0, 1.0), (2.0, 2.0)].into_iter().enumerate() {
            let (px, py) = vp.to_px(x, y);
            let pixel = *canvas.image.get_pixel(px.round() as u32, py.round() as u32);
            assert_eq!(pixel, palette.get(i).unwrap().to_rgb8());
        }
    }

    #[test]
    fn test_render_writes_png() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("clusters.png");
        let (figure, _) = two_cluster_figure();

        let mut backend = PngBackend::new(&path, StyleConfig::default(), None);
        backend.render(&figure).unwrap();

        let img = image::open(&path).unwrap().to_rgb8();
        let style = StyleConfig::default();
        assert_eq!(img.dimensions(), (style.width, style.height));
    }

    #[test]
    fn test_render_empty_figure() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("empty.png");
        let mut backend = PngBackend::new(&path, StyleConfig::default(), None);
        backend.render(&Figure::default()).unwrap();
        assert!(path.exists());
    }
}
