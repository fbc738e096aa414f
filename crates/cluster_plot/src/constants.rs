/// Default input locations (relative to the working directory)
pub const DEFAULT_POINTS_FILE: &str = "points.csv";
pub const DEFAULT_CENTROIDS_FILE: &str = "centroids.csv";

pub const WINDOW_TITLE: &str = "Clusters";

/// Environment variable selecting PNG output instead of the window
pub const ENV_OUTPUT_PATH: &str = "CLUSTER_PLOT_OUTPUT";

/// Leading non-feature columns: points are [id, label, ...], centroids are [id, ...]
pub const POINT_ID_COLUMNS: usize = 2;
pub const CENTROID_ID_COLUMNS: usize = 1;
pub const PLOT_DIMENSIONS: usize = 2;

/// Palette: 0.6 + 0.4 * sin(...)
pub const PALETTE_BASE: f64 = 0.6;
pub const PALETTE_AMPLITUDE: f64 = 0.4;
pub const PALETTE_CHANNELS: usize = 3;

/// Point markers use the cluster color darkened by this factor
pub const POINT_SHADE: f64 = 0.8;

/// Centroid label offset from the centroid, in data units
pub const LABEL_OFFSET: (f64, f64) = (-0.05, -0.08);

/// Image/style defaults [px]
pub const DEFAULT_WIDTH: u32 = 640;
pub const DEFAULT_HEIGHT: u32 = 480;
pub const MIN_IMAGE_SIZE: u32 = 160;
pub const DEFAULT_POINT_MARKER_SIZE: f64 = 8.0;
pub const DEFAULT_CENTROID_MARKER_SIZE: f64 = 17.0;
pub const DEFAULT_FONT_SIZE: f64 = 14.0;

/// Axes layout [px]
pub const MARGIN_LEFT: f64 = 60.0;
pub const MARGIN_RIGHT: f64 = 20.0;
pub const MARGIN_TOP: f64 = 20.0;
pub const MARGIN_BOTTOM: f64 = 40.0;
pub const TICK_LENGTH: f64 = 5.0;
pub const TARGET_TICKS: usize = 6;

/// Fraction of the data range added on each side of the axes
pub const AXIS_PADDING: f64 = 0.05;
