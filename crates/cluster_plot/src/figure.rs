use crate::{
    constants::{LABEL_OFFSET, POINT_SHADE},
    csv_reader::Table,
    dimensions::Dimensions,
    error::{PlotError, Result},
    palette::{Palette, Rgb},
};

/// A data point: [id, label, x, y]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub id: f64,
    pub label: usize,
    pub x: f64,
    pub y: f64,
}

/// A centroid: [id, x, y], its cluster is the row index
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Centroid {
    pub index: usize,
    pub x: f64,
    pub y: f64,
}

/// Something the backend has to draw, in data coordinates
#[derive(Debug, Clone, PartialEq)]
pub enum Mark {
    /// "x" marker
    Point { x: f64, y: f64, color: Rgb },
    /// filled circle, larger than point markers
    Centroid { x: f64, y: f64, color: Rgb },
    /// text anchored at its lower-left corner
    Label { x: f64, y: f64, text: String },
}

/// Axis-aligned bounding box of the data
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
}

impl Bounds {
    fn from_coords(coords: impl Iterator<Item = (f64, f64)>) -> Option<Self> {
        coords.fold(None, |acc, (x, y)| {
            Some(match acc {
                None => Bounds {
                    x_min: x,
                    x_max: x,
                    y_min: y,
                    y_max: y,
                },
                Some(b) => Bounds {
                    x_min: b.x_min.min(x),
                    x_max: b.x_max.max(x),
                    y_min: b.y_min.min(y),
                    y_max: b.y_max.max(y),
                },
            })
        })
    }
}

/// Backend-independent scatter plot: marks in drawing order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Figure {
    pub marks: Vec<Mark>,
}

impl Figure {
    pub fn points(&self) -> impl Iterator<Item = &Mark> {
        self.marks.iter().filter(|m| matches!(m, Mark::Point { .. }))
    }

    pub fn centroids(&self) -> impl Iterator<Item = &Mark> {
        self.marks
            .iter()
            .filter(|m| matches!(m, Mark::Centroid { .. }))
    }

    pub fn labels(&self) -> impl Iterator<Item = &Mark> {
        self.marks.iter().filter(|m| matches!(m, Mark::Label { .. }))
    }

    /// Bounds of every marker and label anchor, `None` for an empty figure
    pub fn bounds(&self) -> Option<Bounds> {
        Bounds::from_coords(self.marks.iter().map(|m| match *m {
            Mark::Point { x, y, .. } | Mark::Centroid { x, y, .. } | Mark::Label { x, y, .. } => {
                (x, y)
            }
        }))
    }
}

/// Points and centroids from the two tables. Points are [id, label, x, y],
/// centroids are [id, x, y] and their cluster is the row index.
/// Fractional labels are truncated.
///
/// # Errors
/// `UnsupportedDimensions` unless both tables carry 2 features,
/// `LabelOutOfRange` for negative, non-finite or too large labels
pub fn records_from_tables(
    points: &Table,
    centroids: &Table,
) -> Result<(Vec<Point>, Vec<Centroid>)> {
    let dims = Dimensions::derive(points, centroids);
    dims.ensure_planar()?;

    let num_centroids = dims.num_centroids;
    let points = points
        .iter_rows()
        .enumerate()
        .map(|(i, row)| {
            let label = row[1];
            let index = label.trunc();
            if !index.is_finite() || index < 0.0 || index >= num_centroids as f64 {
                return Err(PlotError::LabelOutOfRange {
                    row: i + 1,
                    label,
                    num_centroids,
                });
            }
            Ok(Point {
                id: row[0],
                label: index as usize,
                x: row[2],
                y: row[3],
            })
        })
        .collect::<Result<Vec<_>>>()?;

    let centroids = centroids
        .iter_rows()
        .enumerate()
        .map(|(index, row)| Centroid {
            index,
            x: row[1],
            y: row[2],
        })
        .collect();

    Ok((points, centroids))
}

/// Assembles the scatter plot: every point as an "x" in its darkened cluster
/// color, then every centroid as a circle in its cluster color with its index
/// written next to it.
///
/// # Errors
/// `LabelOutOfRange` if a point refers to a color the palette does not have,
/// `MissingCentroidColor` if a centroid does
pub fn build_figure(
    points: &[Point],
    centroids: &[Centroid],
    palette: &Palette,
) -> Result<Figure> {
    let mut marks = Vec::with_capacity(points.len() + centroids.len() * 2);

    for (i, p) in points.iter().enumerate() {
        let color = palette
            .get(p.label)
            .ok_or(PlotError::LabelOutOfRange {
                row: i + 1,
                label: p.label as f64,
                num_centroids: palette.len(),
            })?
            .scaled(POINT_SHADE);
        marks.push(Mark::Point {
            x: p.x,
            y: p.y,
            color,
        });
    }

    for c in centroids {
        let color = palette
            .get(c.index)
            .ok_or(PlotError::MissingCentroidColor {
                index: c.index,
                colors: palette.len(),
            })?;
        marks.push(Mark::Centroid {
            x: c.x,
            y: c.y,
            color,
        });
        marks.push(Mark::Label {
            x: c.x + LABEL_OFFSET.0,
            y: c.y + LABEL_OFFSET.1,
            text: c.index.to_string(),
        });
    }

    Ok(Figure { marks })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_cluster_tables() -> (Table, Table) {
        let points = Table::from_rows(
            "points",
            vec![vec![0.0, 0.0, 1.0, 1.0], vec![1.0, 1.0, 2.0, 2.0]],
        )
        .unwrap();
        let centroids =
            Table::from_rows("centroids", vec![vec![0.0, 1.0, 1.0], vec![1.0, 2.0, 2.0]]).unwrap();
        (points, centroids)
    }

    #[test]
    fn test_two_clusters() {
        let (points, centroids) = two_cluster_tables();
        let palette = Palette::generate(2);
        let (points, centroids) = records_from_tables(&points, &centroids).unwrap();
        let figure = build_figure(&points, &centroids, &palette).unwrap();

        let point_marks: Vec<_> = figure.points().cloned().collect();
        assert_eq!(
            point_marks,
            vec![
                Mark::Point {
                    x: 1.0,
                    y: 1.0,
                    color: palette.get(0).unwrap().scaled(0.8)
                },
                Mark::Point {
                    x: 2.0,
                    y: 2.0,
                    color: palette.get(1).unwrap().scaled(0.8)
                },
            ]
        );

        let centroid_marks: Vec<_> = figure.centroids().cloned().collect();
        assert_eq!(
            centroid_marks,
            vec![
                Mark::Centroid {
                    x: 1.0,
                    y: 1.0,
                    color: palette.get(0).unwrap()
                },
                Mark::Centroid {
                    x: 2.0,
                    y: 2.0,
                    color: palette.get(1).unwrap()
                },
            ]
        );

        let texts: Vec<_> = figure
            .labels()
            .map(|m| match m {
                Mark::Label { text, .. } => text.as_str(),
                _ => unreachable!(),
            })
            .collect();
        assert_eq!(texts, vec!["0", "1"]);
    }

    #[test]
    fn test_label_offset() {
        let centroids = [Centroid {
            index: 0,
            x: 1.0,
            y: 1.0,
        }];
        let figure = build_figure(&[], &centroids, &Palette::generate(1)).unwrap();
        match figure.labels().next() {
            Some(Mark::Label { x, y, .. }) => {
                assert!((x - 0.95).abs() < 1e-12);
                assert!((y - 0.92).abs() < 1e-12);
            }
            other => panic!("unexpected mark: {other:?}"),
        }
    }

    #[test]
    fn test_points_drawn_before_centroids() {
        let (points, centroids) = two_cluster_tables();
        let palette = Palette::generate(2);
        let (points, centroids) = records_from_tables(&points, &centroids).unwrap();
        let figure = build_figure(&points, &centroids, &palette).unwrap();
        assert!(matches!(figure.marks[0], Mark::Point { .. }));
        assert!(matches!(figure.marks[1], Mark::Point { .. }));
        assert!(matches!(figure.marks[2], Mark::Centroid { .. }));
        assert!(matches!(figure.marks[3], Mark::Label { .. }));
    }

    fn one_centroid() -> Table {
        Table::from_rows("centroids", vec![vec![0.0, 1.0, 1.0]]).unwrap()
    }

    #[test]
    fn test_label_out_of_range() {
        let (points, _) = two_cluster_tables();
        let err = records_from_tables(&points, &one_centroid()).unwrap_err();
        assert!(matches!(
            err,
            PlotError::LabelOutOfRange {
                row: 2,
                num_centroids: 1,
                ..
            }
        ));
    }

    #[test]
    fn test_wrong_width_rejected() {
        let points = Table::from_rows("points", vec![vec![0.0, 0.0, 1.0, 1.0, 1.0]]).unwrap();
        assert!(matches!(
            records_from_tables(&points, &one_centroid()),
            Err(PlotError::UnsupportedDimensions {
                features: 3,
                centroid_features: 2
            })
        ));
    }

    #[test]
    fn test_both_tables_malformed_reports_both_counts() {
        let points = Table::from_rows("points", vec![vec![0.0, 0.0, 1.0, 1.0, 1.0]]).unwrap();
        let centroids = Table::from_rows("centroids", vec![vec![0.0, 1.0]]).unwrap();
        let err = records_from_tables(&points, &centroids).unwrap_err();
        assert!(matches!(
            err,
            PlotError::UnsupportedDimensions {
                features: 3,
                centroid_features: 1
            }
        ));
        assert!(err.to_string().contains("centroids have 1"));
    }

    #[test]
    fn test_negative_label_rejected() {
        let points = Table::from_rows("points", vec![vec![0.0, -1.0, 0.0, 0.0]]).unwrap();
        assert!(records_from_tables(&points, &one_centroid()).is_err());
    }

    #[test]
    fn test_fractional_label_truncated() {
        let (_, centroids) = two_cluster_tables();
        let points = Table::from_rows("points", vec![vec![0.0, 1.9, 0.0, 0.0]]).unwrap();
        let (points, _) = records_from_tables(&points, &centroids).unwrap();
        assert_eq!(points[0].label, 1);
    }

    #[test]
    fn test_short_palette_rejects_centroid() {
        let centroids = [
            Centroid {
                index: 0,
                x: 0.0,
                y: 0.0,
            },
            Centroid {
                index: 1,
                x: 1.0,
                y: 1.0,
            },
        ];
        let err = build_figure(&[], &centroids, &Palette::generate(1)).unwrap_err();
        assert!(matches!(
            err,
            PlotError::MissingCentroidColor {
                index: 1,
                colors: 1
            }
        ));
    }

    #[test]
    fn test_build_figure_checks_palette() {
        let point = Point {
            id: 0.0,
            label: 3,
            x: 0.0,
            y: 0.0,
        };
        let err = build_figure(&[point], &[], &Palette::generate(2)).unwrap_err();
        assert!(matches!(err, PlotError::LabelOutOfRange { row: 1, .. }));
    }

    #[test]
    fn test_bounds() {
        let (points, centroids) = two_cluster_tables();
        let palette = Palette::generate(2);
        let (points, centroids) = records_from_tables(&points, &centroids).unwrap();
        let figure = build_figure(&points, &centroids, &palette).unwrap();
        let b = figure.bounds().unwrap();
        assert!((b.x_min - 0.95).abs() < 1e-12);
        assert!((b.y_min - 0.92).abs() < 1e-12);
        assert_eq!(b.x_max, 2.0);
        assert_eq!(b.y_max, 2.0);

        assert_eq!(Figure::default().bounds(), None);
    }
}
