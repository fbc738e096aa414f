use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, PlotError>;

#[derive(Debug, Error)]
pub enum PlotError {
    #[error("failed to open {}: {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV parse error: {0}")]
    Csv(#[from] csv::Error),

    #[error("{name}: table has no rows")]
    EmptyTable { name: String },

    #[error("{name}: row {row} has {got} columns, expected {expected}")]
    RaggedRow {
        name: String,
        row: usize,
        expected: usize,
        got: usize,
    },

    #[error("{name}: invalid number at row {row}, column {column}: {value:?}")]
    CellParse {
        name: String,
        row: usize,
        column: usize,
        value: String,
        #[source]
        source: std::num::ParseFloatError,
    },

    #[error(
        "Plotting only works for 2D feature vectors. \
         (points have {features} features, centroids have {centroid_features})"
    )]
    UnsupportedDimensions {
        features: usize,
        centroid_features: usize,
    },

    #[error("point at row {row} has label {label}, but only {num_centroids} centroids exist")]
    LabelOutOfRange {
        row: usize,
        label: f64,
        num_centroids: usize,
    },

    #[error("no color for centroid {index}, palette has {colors} colors")]
    MissingCentroidColor { index: usize, colors: usize },

    #[error("plot window failed: {0}")]
    Window(String),

    #[error(transparent)]
    Image(#[from] image::ImageError),

    #[error("Configuration error: {0}")]
    Config(String),
}
