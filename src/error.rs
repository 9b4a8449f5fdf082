use std::path::PathBuf;

use thiserror::Error;

/// Top-level error type for the Poloidal generator.
#[derive(Debug, Error)]
pub enum PoloidalError {
    #[error(transparent)]
    Input(#[from] InputError),

    #[error(transparent)]
    Geometry(#[from] GeometryError),

    #[error(transparent)]
    Export(#[from] ExportError),

    #[error(transparent)]
    Description(#[from] DescriptionError),
}

/// Errors raised while reading the line-oriented input files.
///
/// All of these are fatal: the geometry pipeline cannot proceed with
/// missing or partial station data.
#[derive(Debug, Error)]
pub enum InputError {
    #[error("{path}:{line}: {reason}")]
    MalformedLine {
        path: PathBuf,
        line: usize,
        reason: String,
    },

    #[error("coordinates file provides {angles} entries for {stations} stations")]
    StationCountMismatch { stations: usize, angles: usize },

    #[error("failed to read {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Errors related to geometric computations.
#[derive(Debug, Error)]
pub enum GeometryError {
    #[error("station {station} has a zero-length normal vector")]
    ZeroNormal { station: usize },

    #[error("station {station}: cutting window does not intersect the cross-section")]
    EmptyIntersection { station: usize },

    #[error("degenerate geometry: {0}")]
    Degenerate(String),

    #[error("entity not found: {0}")]
    EntityNotFound(String),
}

/// Errors raised while writing mesh files.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("failed to write {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot reset output directory {path}")]
    DirectoryReset {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Errors in the robot description record tree.
#[derive(Debug, Error)]
pub enum DescriptionError {
    #[error("duplicate link name: {0}")]
    DuplicateLink(String),

    #[error("duplicate joint name: {0}")]
    DuplicateJoint(String),

    #[error("joint {joint} references unknown link {link}")]
    UnknownLink { joint: String, link: String },

    #[error("failed to serialize description: {0}")]
    Serialize(String),
}

/// Convenience type alias for results using [`PoloidalError`].
pub type Result<T> = std::result::Result<T, PoloidalError>;
