use crate::{
    csv_reader::{Table, read_table},
    dimensions::Dimensions,
    error::Result,
    figure::{build_figure, records_from_tables},
    palette::Palette,
    render::PlotBackend,
};

use std::path::Path;

/// What a successful run drew
#[derive(Debug, Clone, PartialEq)]
pub struct PlotSummary {
    pub dimensions: Dimensions,
    pub palette: Palette,
    pub marks: usize,
}

/// Loads both tables and plots them.
///
/// # Errors
/// Any load error, then everything [`plot_tables`] can return
pub fn plot_files<B: PlotBackend + ?Sized>(
    points_path: &Path,
    centroids_path: &Path,
    backend: &mut B,
) -> Result<PlotSummary> {
    let points = read_table(points_path)?;
    let centroids = read_table(centroids_path)?;
    plot_tables(&points, &centroids, backend)
}

/// derive -> palette -> 2D guard -> figure -> backend.
/// The backend is only called once every check has passed.
pub fn plot_tables<B: PlotBackend + ?Sized>(
    points: &Table,
    centroids: &Table,
    backend: &mut B,
) -> Result<PlotSummary> {
    let dimensions = Dimensions::derive(points, centroids);
    log::debug!("{dimensions:?}");

    let palette = Palette::generate(dimensions.num_centroids);
    log::debug!("palette: {palette:?}");

    dimensions.ensure_planar()?;

    let (points, centroids) = records_from_tables(points, centroids)?;
    let figure = build_figure(&points, &centroids, &palette)?;

    log::info!(
        "plotting {} points in {} clusters",
        dimensions.num_vectors,
        dimensions.num_centroids
    );
    backend.render(&figure)?;

    Ok(PlotSummary {
        dimensions,
        palette,
        marks: figure.marks.len(),
    })
}
