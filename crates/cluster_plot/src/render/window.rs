//! Interactive plot window using egui
//!
//! `render` blocks until the window is closed.

use super::PlotBackend;
use crate::{
    config::StyleConfig,
    constants::WINDOW_TITLE,
    error::{PlotError, Result},
    figure::{Figure, Mark},
    palette::Rgb,
};

use eframe::egui;
use egui_plot::{AxisHints, MarkerShape, Plot, PlotPoint, PlotPoints, Points, Text};
use std::collections::BTreeMap;

/// Markers sharing one color
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    pub color: [u8; 3],
    pub coords: Vec<[f64; 2]>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlotLabel {
    pub x: f64,
    pub y: f64,
    pub text: String,
}

/// A figure regrouped into what egui_plot draws: one `Points` item per
/// color, points below centroids, labels on top
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Layers {
    pub points: Vec<Series>,
    pub centroids: Vec<Series>,
    pub labels: Vec<PlotLabel>,
}

impl Layers {
    pub fn from_figure(figure: &Figure) -> Self {
        let mut points: BTreeMap<[u8; 3], Vec<[f64; 2]>> = BTreeMap::new();
        let mut centroids: BTreeMap<[u8; 3], Vec<[f64; 2]>> = BTreeMap::new();
        let mut labels = Vec::new();

        for mark in &figure.marks {
            match mark {
                Mark::Point { x, y, color } => {
                    points.entry(rgb8(*color)).or_default().push([*x, *y]);
                }
                Mark::Centroid { x, y, color } => {
                    centroids.entry(rgb8(*color)).or_default().push([*x, *y]);
                }
                Mark::Label { x, y, text } => labels.push(PlotLabel {
                    x: *x,
                    y: *y,
                    text: text.clone(),
                }),
            }
        }

        let series = |groups: BTreeMap<[u8; 3], Vec<[f64; 2]>>| {
            groups
                .into_iter()
                .map(|(color, coords)| Series { color, coords })
                .collect()
        };

        Self {
            points: series(points),
            centroids: series(centroids),
            labels,
        }
    }
}

fn rgb8(color: Rgb) -> [u8; 3] {
    color.to_rgb8().0
}

fn color32([r, g, b]: [u8; 3]) -> egui::Color32 {
    egui::Color32::from_rgb(r, g, b)
}

/// Opens a native window and blocks until the user closes it
pub struct WindowBackend {
    title: String,
    style: StyleConfig,
}

impl WindowBackend {
    pub fn new(style: StyleConfig) -> Self {
        Self {
            title: WINDOW_TITLE.to_string(),
            style,
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    fn native_options(&self) -> eframe::NativeOptions {
        eframe::NativeOptions {
            viewport: egui::ViewportBuilder::default()
                .with_inner_size([self.style.width as f32, self.style.height as f32])
                .with_title(&self.title),
            ..Default::default()
        }
    }
}

impl PlotBackend for WindowBackend {
    fn render(&mut self, figure: &Figure) -> Result<()> {
        let app = ScatterApp::new(Layers::from_figure(figure), &self.style);
        log::info!("showing plot, close the window to exit");

        eframe::run_native(
            &self.title,
            self.native_options(),
            Box::new(|_cc| Ok(Box::new(app))),
        )
        .map_err(|e| PlotError::Window(e.to_string()))
    }
}

struct ScatterApp {
    layers: Layers,
    point_radius: f32,
    centroid_radius: f32,
    font_size: f32,
}

impl ScatterApp {
    /// Marker sizes are full widths, egui_plot wants radii
    fn new(layers: Layers, style: &StyleConfig) -> Self {
        Self {
            layers,
            point_radius: (style.point_marker_size / 2.0) as f32,
            centroid_radius: (style.centroid_marker_size / 2.0) as f32,
            font_size: style.font_size as f32,
        }
    }
}

impl eframe::App for ScatterApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::CentralPanel::default().show(ctx, |ui| {
            let plot = Plot::new("clusters")
                .custom_x_axes(vec![AxisHints::new_x().label("x")])
                .custom_y_axes(vec![AxisHints::new_y().label("y")])
                .allow_drag(true)
                .allow_zoom(true)
                .allow_scroll(true);

            plot.show(ui, |plot_ui| {
                for series in &self.layers.points {
                    plot_ui.points(
                        Points::new(PlotPoints::from(series.coords.clone()))
                            .shape(MarkerShape::Cross)
                            .radius(self.point_radius)
                            .color(color32(series.color)),
                    );
                }

                for series in &self.layers.centroids {
                    plot_ui.points(
                        Points::new(PlotPoints::from(series.coords.clone()))
                            .shape(MarkerShape::Circle)
                            .filled(true)
                            .radius(self.centroid_radius)
                            .color(color32(series.color)),
                    );
                }

                for label in &self.layers.labels {
                    plot_ui.text(
                        Text::new(
                            PlotPoint::new(label.x, label.y),
                            egui::RichText::new(&label.text).size(self.font_size),
                        )
                        .anchor(egui::Align2::LEFT_BOTTOM),
                    );
                }
            });
        });
    }
}
