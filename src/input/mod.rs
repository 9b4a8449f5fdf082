//! Line-oriented loaders for the torus description files.
//!
//! All files share one format: blank lines and lines starting with `#` are
//! skipped, every other line carries a fixed number of floating-point
//! fields, comma- or whitespace-delimited. A line that cannot be parsed is
//! a fatal configuration error.

use std::fs;
use std::path::Path;

use crate::error::InputError;
use crate::math::{Point2, Vector2};

/// One row of the toroidal coordinates file.
///
/// The third column of the file exists but carries no meaning for
/// segment generation and is discarded at parse time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ToroidalCoordinate {
    /// Placement of the station's bisection plane about the main axis, degrees.
    pub toroidal_deg: f64,
    /// Angular pitch assigned to the station, degrees.
    pub revolve_deg: f64,
}

/// Reads a boundary point file: two fields per line (radial, axial).
///
/// # Errors
///
/// Returns [`InputError`] if the file cannot be read or a line is malformed.
pub fn read_boundary_points(path: &Path) -> Result<Vec<Point2>, InputError> {
    parse_rows(path, 2, |f| Point2::new(f[0], f[1]))
}

/// Reads the normals file: four fields per line
/// (origin.x, origin.y, normal.x, normal.y).
///
/// The normals are stored as given; they are not normalized here.
///
/// # Errors
///
/// Returns [`InputError`] if the file cannot be read or a line is malformed.
pub fn read_normals(path: &Path) -> Result<Vec<(Point2, Vector2)>, InputError> {
    parse_rows(path, 4, |f| {
        (Point2::new(f[0], f[1]), Vector2::new(f[2], f[3]))
    })
}

/// Reads the toroidal coordinates file: three fields per line
/// (rotation about the axis, revolve angle, unused).
///
/// # Errors
///
/// Returns [`InputError`] if the file cannot be read or a line is malformed.
pub fn read_toroidal_coordinates(path: &Path) -> Result<Vec<ToroidalCoordinate>, InputError> {
    parse_rows(path, 3, |f| ToroidalCoordinate {
        toroidal_deg: f[0],
        revolve_deg: f[1],
    })
}

/// Reads the whole-torus parameter file: two fields per line describing
/// the closed poloidal profile of the plain torus solid.
///
/// # Errors
///
/// Returns [`InputError`] if the file cannot be read or a line is malformed.
pub fn read_torus_parameters(path: &Path) -> Result<Vec<Point2>, InputError> {
    read_boundary_points(path)
}

/// Parses every data row of a file into `T` via `build`, enforcing the
/// expected field count per line.
fn parse_rows<T>(
    path: &Path,
    expected_fields: usize,
    build: impl Fn(&[f64]) -> T,
) -> Result<Vec<T>, InputError> {
    let content = fs::read_to_string(path).map_err(|source| InputError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let mut rows = Vec::new();
    for (idx, raw) in content.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let fields = split_fields(line);
        if fields.len() != expected_fields {
            return Err(InputError::MalformedLine {
                path: path.to_path_buf(),
                line: idx + 1,
                reason: format!(
                    "expected {expected_fields} fields, found {}",
                    fields.len()
                ),
            });
        }
        let mut values = Vec::with_capacity(expected_fields);
        for field in &fields {
            let value: f64 = field.parse().map_err(|_| InputError::MalformedLine {
                path: path.to_path_buf(),
                line: idx + 1,
                reason: format!("field {field:?} is not a number"),
            })?;
            values.push(value);
        }
        rows.push(build(&values));
    }
    Ok(rows)
}

/// Splits a data line on commas when present, otherwise on whitespace.
fn split_fields(line: &str) -> Vec<&str> {
    if line.contains(',') {
        line.split(',').map(str::trim).collect()
    } else {
        line.split_whitespace().collect()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_file(dir: &tempfile::TempDir, name: &str, content: &str) -> std::path::PathBuf {
        let path = dir.path().join(name);
        let mut f = fs::File::create(&path).unwrap();
        f.write_all(content.as_bytes()).unwrap();
        path
    }

    #[test]
    fn boundary_points_comma_delimited() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(&dir, "inner.txt", "# header\n1.0, 2.0\n\n3.5,-4.25\n");
        let pts = read_boundary_points(&path).unwrap();
        assert_eq!(pts.len(), 2);
        assert!((pts[1].x - 3.5).abs() < 1e-12);
        assert!((pts[1].y + 4.25).abs() < 1e-12);
    }

    #[test]
    fn boundary_points_whitespace_delimited() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(&dir, "torus.txt", "5.0 1.0\n6.0 -1.0\n");
        let pts = read_torus_parameters(&path).unwrap();
        assert_eq!(pts.len(), 2);
        assert!((pts[0].x - 5.0).abs() < 1e-12);
    }

    #[test]
    fn normals_four_fields() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(&dir, "normals.txt", "5.0,0.5,0.0,1.0\n");
        let rows = read_normals(&path).unwrap();
        assert_eq!(rows.len(), 1);
        let (origin, normal) = rows[0];
        assert!((origin.x - 5.0).abs() < 1e-12);
        assert!((normal.y - 1.0).abs() < 1e-12);
    }

    #[test]
    fn coordinates_third_field_discarded() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(&dir, "coords.txt", "45.0,7.5,99.0\n");
        let rows = read_toroidal_coordinates(&path).unwrap();
        assert_eq!(
            rows[0],
            ToroidalCoordinate {
                toroidal_deg: 45.0,
                revolve_deg: 7.5
            }
        );
    }

    #[test]
    fn wrong_field_count_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(&dir, "bad.txt", "1.0,2.0\n1.0\n");
        let err = read_boundary_points(&path).unwrap_err();
        match err {
            InputError::MalformedLine { line, .. } => assert_eq!(line, 2),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn non_numeric_field_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(&dir, "bad.txt", "1.0,abc\n");
        let err = read_boundary_points(&path).unwrap_err();
        assert!(matches!(err, InputError::MalformedLine { line: 1, .. }));
    }

    #[test]
    fn missing_file_reports_path() {
        let err = read_boundary_points(Path::new("/nonexistent/inner.txt")).unwrap_err();
        assert!(matches!(err, InputError::Io { .. }));
    }
}
