use crate::error::{PlotError, Result};

use csv::{ReaderBuilder, StringRecord, Trim};
use std::io::Read;
use std::path::Path;

/// Headerless numeric table, stored row-major
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    cells: Vec<f64>,
    rows: usize,
    columns: usize,
}

impl Table {
    /// Builds a table from rows of equal length.
    ///
    /// # Errors
    /// `RaggedRow` if a row differs in length from the first one
    pub fn from_rows(name: &str, rows: Vec<Vec<f64>>) -> Result<Self> {
        let columns = rows.first().map_or(0, Vec::len);
        let mut cells = Vec::with_capacity(rows.len() * columns);
        for (i, row) in rows.iter().enumerate() {
            if row.len() != columns {
                return Err(PlotError::RaggedRow {
                    name: name.to_string(),
                    row: i + 1,
                    expected: columns,
                    got: row.len(),
                });
            }
            cells.extend_from_slice(row);
        }
        Ok(Self {
            cells,
            rows: rows.len(),
            columns,
        })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    /// (rows, columns)
    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.columns)
    }

    pub fn row(&self, index: usize) -> Option<&[f64]> {
        if index >= self.rows {
            return None;
        }
        let start = index * self.columns;
        Some(&self.cells[start..start + self.columns])
    }

    pub fn get(&self, row: usize, column: usize) -> Option<f64> {
        if column >= self.columns {
            return None;
        }
        self.row(row).map(|r| r[column])
    }

    pub fn iter_rows(&self) -> impl Iterator<Item = &[f64]> {
        // chunks_exact panics on 0, and a 0-column table has no rows anyway
        self.cells.chunks_exact(self.columns.max(1))
    }

    pub fn is_empty(&self) -> bool {
        self.rows == 0
    }
}

/// Reads a headerless, comma-delimited numeric table from a file
///
/// # Errors
/// Returns error if the file cannot be opened or the table is malformed
pub fn read_table<P: AsRef<Path>>(path: P) -> Result<Table> {
    let path = path.as_ref();
    let file = std::fs::File::open(path).map_err(|e| PlotError::Open {
        path: path.to_path_buf(),
        source: e,
    })?;
    let table = read_table_from_reader(file, &path.display().to_string())?;
    log::info!(
        "loaded {}: {} rows x {} columns",
        path.display(),
        table.rows(),
        table.columns()
    );
    Ok(table)
}

/// Reads a table from any reader. `name` only appears in error messages.
/// - Cells are trimmed, so `0, 1, 2.5` parses the same as `0,1,2.5`
/// - Blank lines are skipped
/// - Every row must have as many columns as the first one
pub fn read_table_from_reader<R: Read>(reader: R, name: &str) -> Result<Table> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(false)
        .trim(Trim::All)
        .flexible(true) // column count is checked below, with row context
        .from_reader(reader);

    let mut rows: Vec<Vec<f64>> = Vec::new();
    let mut expected: Option<usize> = None;

    for (i, result) in rdr.records().enumerate() {
        let rec = result?;
        let row = i + 1;

        if rec.iter().all(str::is_empty) {
            continue;
        }

        let expected = *expected.get_or_insert(rec.len());
        if rec.len() != expected {
            return Err(PlotError::RaggedRow {
                name: name.to_string(),
                row,
                expected,
                got: rec.len(),
            });
        }

        rows.push(parse_record(&rec, row, name)?);
    }

    if rows.is_empty() {
        return Err(PlotError::EmptyTable {
            name: name.to_string(),
        });
    }

    Table::from_rows(name, rows)
}

fn parse_record(rec: &StringRecord, row: usize, name: &str) -> Result<Vec<f64>> {
    rec.iter()
        .enumerate()
        .map(|(column, value)| parse_cell(value, row, column, name))
        .collect()
}

fn parse_cell(value: &str, row: usize, column: usize, name: &str) -> Result<f64> {
    value.parse().map_err(|parse_error| PlotError::CellParse {
        name: name.to_string(),
        row,
        column,
        value: value.to_string(),
        source: parse_error,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_read_plain_table() {
        let data = "0,0,1.0,1.0\n1,1,2.0,2.0\n";
        let table = read_table_from_reader(data.as_bytes(), "points").unwrap();
        assert_eq!(table.shape(), (2, 4));
        assert_eq!(table.row(1), Some(&[1.0, 1.0, 2.0, 2.0][..]));
        assert_eq!(table.get(0, 3), Some(1.0));
        assert_eq!(table.get(0, 4), None);
        assert_eq!(table.row(2), None);
    }

    #[test]
    fn test_read_space_separated_values() {
        // the clustering tool writes "v, label, x, y"
        let data = "0, 2, -0.5, 3.25\n1, 0, 1e-3, 4\n";
        let table = read_table_from_reader(data.as_bytes(), "points").unwrap();
        assert_eq!(table.shape(), (2, 4));
        assert_eq!(table.get(0, 2), Some(-0.5));
        assert_eq!(table.get(1, 2), Some(0.001));
    }

    #[test]
    fn test_first_row_is_data() {
        let table = read_table_from_reader("5,6,7\n".as_bytes(), "centroids").unwrap();
        assert_eq!(table.rows(), 1);
        assert_eq!(table.get(0, 0), Some(5.0));
    }

    #[test]
    fn test_blank_lines_are_skipped() {
        let data = "0,1.0,1.0\n\n1,2.0,2.0\n";
        let table = read_table_from_reader(data.as_bytes(), "centroids").unwrap();
        assert_eq!(table.shape(), (2, 3));
    }

    #[test]
    fn test_non_numeric_cell() {
        let data = "0,0,1.0,1.0\n1,1,abc,2.0\n";
        let err = read_table_from_reader(data.as_bytes(), "points").unwrap_err();
        match err {
            PlotError::CellParse {
                row, column, value, ..
            } => {
                assert_eq!(row, 2);
                assert_eq!(column, 2);
                assert_eq!(value, "abc");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_ragged_rows() {
        let data = "0,0,1.0,1.0\n1,1,2.0\n";
        let err = read_table_from_reader(data.as_bytes(), "points").unwrap_err();
        assert!(matches!(
            err,
            PlotError::RaggedRow {
                row: 2,
                expected: 4,
                got: 3,
                ..
            }
        ));
    }

    #[test]
    fn test_empty_input() {
        let err = read_table_from_reader("".as_bytes(), "points").unwrap_err();
        assert!(matches!(err, PlotError::EmptyTable { .. }));
    }

    #[test]
    fn test_read_table_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "0, 1.5, -2.0").unwrap();
        writeln!(file, "1, 3.0, 4.0").unwrap();

        let table = read_table(file.path()).unwrap();
        assert_eq!(table.shape(), (2, 3));
        assert_eq!(table.iter_rows().count(), 2);
    }

    #[test]
    fn test_read_table_missing_file() {
        let err = read_table("nonexistent_points.csv").unwrap_err();
        match err {
            PlotError::Open { path, source } => {
                assert_eq!(path, std::path::PathBuf::from("nonexistent_points.csv"));
                assert_eq!(source.kind(), std::io::ErrorKind::NotFound);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_from_rows_rejects_ragged() {
        let err = Table::from_rows("t", vec![vec![1.0, 2.0], vec![3.0]]).unwrap_err();
        assert!(matches!(err, PlotError::RaggedRow { row: 2, .. }));
    }
}
