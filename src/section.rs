//! Stations along the blanket reference curve and the assembled poloidal
//! cross-section.

use crate::error::InputError;
use crate::input::ToroidalCoordinate;
use crate::math::polygon_2d::polyline_length;
use crate::math::{Point2, Vector2};

/// One sampled location along the closed reference curve.
#[derive(Debug, Clone, Copy)]
pub struct Station {
    /// Point on the reference curve, poloidal plane coordinates
    /// (x = distance from the main axis, y = height along it).
    pub origin: Point2,
    /// Outward normal as stored in the input file. Not unit length.
    pub normal: Vector2,
    /// Placement of the station's bisection plane about the main axis, degrees.
    pub toroidal_deg: f64,
    /// Angular pitch assigned to the station, degrees.
    pub revolve_deg: f64,
}

/// Ordered, cyclic set of stations.
///
/// The underlying reference curve is closed, so neighbor lookups wrap
/// modulo the station count in both directions.
#[derive(Debug, Clone, Default)]
pub struct StationSet {
    stations: Vec<Station>,
}

impl StationSet {
    /// Pairs the normals-file rows with the coordinates-file rows.
    ///
    /// The normals define the station count; extra coordinate rows are
    /// ignored.
    ///
    /// # Errors
    ///
    /// Returns [`InputError::StationCountMismatch`] when fewer coordinate
    /// rows than stations are available.
    pub fn from_parts(
        normals: &[(Point2, Vector2)],
        coordinates: &[ToroidalCoordinate],
    ) -> Result<Self, InputError> {
        if coordinates.len() < normals.len() {
            return Err(InputError::StationCountMismatch {
                stations: normals.len(),
                angles: coordinates.len(),
            });
        }
        let stations = normals
            .iter()
            .zip(coordinates)
            .map(|(&(origin, normal), coord)| Station {
                origin,
                normal,
                toroidal_deg: coord.toroidal_deg,
                revolve_deg: coord.revolve_deg,
            })
            .collect();
        Ok(Self { stations })
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.stations.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.stations.is_empty()
    }

    #[must_use]
    pub fn get(&self, index: usize) -> &Station {
        &self.stations[index]
    }

    /// Cyclic predecessor of `index`.
    #[must_use]
    pub fn prev(&self, index: usize) -> &Station {
        let n = self.stations.len();
        &self.stations[(index + n - 1) % n]
    }

    /// Cyclic successor of `index`.
    #[must_use]
    pub fn next(&self, index: usize) -> &Station {
        &self.stations[(index + 1) % self.stations.len()]
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Station> {
        self.stations.iter()
    }
}

impl<'a> IntoIterator for &'a StationSet {
    type Item = &'a Station;
    type IntoIter = std::slice::Iter<'a, Station>;

    fn into_iter(self) -> Self::IntoIter {
        self.stations.iter()
    }
}

/// The closed poloidal cross-section of the blanket ring.
///
/// Assembled once from the inner boundary followed by the reversed outer
/// boundary. The two source boundaries are assumed not to cross; this is
/// not checked.
#[derive(Debug, Clone)]
pub struct CrossSection {
    points: Vec<Point2>,
    inner_length: f64,
}

impl CrossSection {
    /// Builds the profile polygon from the two boundary point lists.
    #[must_use]
    pub fn assemble(inner: &[Point2], outer: &[Point2]) -> Self {
        let inner_length = polyline_length(inner);
        let mut points = inner.to_vec();
        points.extend(outer.iter().rev());
        Self {
            points,
            inner_length,
        }
    }

    /// The closed profile polygon (first and last point implicitly connect).
    #[must_use]
    pub fn points(&self) -> &[Point2] {
        &self.points
    }

    /// Total polyline length of the inner boundary.
    #[must_use]
    pub fn inner_length(&self) -> f64 {
        self.inner_length
    }

    /// Nominal spacing between stations: inner boundary length divided by
    /// the station count. Zero when there are no stations.
    #[must_use]
    pub fn average_spacing(&self, station_count: usize) -> f64 {
        if station_count == 0 {
            return 0.0;
        }
        #[allow(clippy::cast_precision_loss)]
        let n = station_count as f64;
        self.inner_length / n
    }
}
