use crate::{
    constants::{CENTROID_ID_COLUMNS, PLOT_DIMENSIONS, POINT_ID_COLUMNS},
    csv_reader::Table,
    error::{PlotError, Result},
};

/// Counts derived from the shapes of the points and centroids tables
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dimensions {
    pub num_vectors: usize,
    pub num_features: usize,
    pub num_centroids: usize,
    pub num_centroid_features: usize,
}

impl Dimensions {
    /// Points are [id, label, features...], centroids are [id, features...].
    /// A table narrower than its id columns has 0 features.
    pub fn derive(points: &Table, centroids: &Table) -> Self {
        Self {
            num_vectors: points.rows(),
            num_features: points.columns().saturating_sub(POINT_ID_COLUMNS),
            num_centroids: centroids.rows(),
            num_centroid_features: centroids.columns().saturating_sub(CENTROID_ID_COLUMNS),
        }
    }

    /// Only 2D feature vectors can be plotted.
    ///
    /// # Errors
    /// `UnsupportedDimensions` if either table does not carry exactly 2 features
    pub fn ensure_planar(&self) -> Result<()> {
        if self.num_features != PLOT_DIMENSIONS || self.num_centroid_features != PLOT_DIMENSIONS {
            return Err(PlotError::UnsupportedDimensions {
                features: self.num_features,
                centroid_features: self.num_centroid_features,
            });
        }
        Ok(())
    }
}
