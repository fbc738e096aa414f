//! Scatter plots of 2D clustering results.
//!
//! Reads `points.csv` (`id, label, x, y`) and `centroids.csv` (`id, x, y`),
//! gives every cluster a color and draws points as "x" markers and centroids
//! as labeled circles, in a window or into a PNG file.

pub mod config;
pub mod constants;
pub mod csv_reader;
pub mod dimensions;
pub mod error;
pub mod figure;
pub mod palette;
pub mod pipeline;
pub mod render;

pub use config::{Config, OutputTarget, StyleConfig};
pub use csv_reader::{Table, read_table, read_table_from_reader};
pub use dimensions::Dimensions;
pub use error::{PlotError, Result};
pub use figure::{Centroid, Figure, Mark, Point, build_figure, records_from_tables};
pub use palette::{Palette, Rgb};
pub use pipeline::{PlotSummary, plot_files, plot_tables};
pub use render::{PlotBackend, PngBackend, WindowBackend, load_system_font};
