//! Error types for geometry construction and mesh loading

use std::fmt;
use std::io;

/// Errors raised while building geometry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GeometryError {
    /// A vector with zero (or non-finite) length was normalized.
    DegenerateVector,
}

impl fmt::Display for GeometryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GeometryError::DegenerateVector => {
                write!(f, "cannot normalize a zero-length or non-finite vector")
            }
        }
    }
}

impl std::error::Error for GeometryError {}

/// A render configuration that cannot drive the projection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ConfigError {
    /// Canvas width or height is zero.
    EmptyCanvas { width: u32, height: u32 },
    /// `fov` must be finite and strictly between 0 and 180 degrees.
    FieldOfView(f32),
    /// `near` and `far` must be finite and distinct.
    DepthRange { near: f32, far: f32 },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::EmptyCanvas { width, height } => {
                write!(f, "canvas {}x{} has no pixels", width, height)
            }
            ConfigError::FieldOfView(fov) => {
                write!(f, "field of view {} is outside (0, 180) degrees", fov)
            }
            ConfigError::DepthRange { near, far } => {
                write!(f, "depth range near={} far={} is empty or not finite", near, far)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Errors parsing OBJ text.
#[derive(Debug, Clone, PartialEq)]
pub enum ObjError {
    /// A face referenced a vertex that has not been declared.
    IndexOutOfRange {
        line: usize,
        index: i64,
        vertex_count: usize,
    },
    /// A triangular face token is not an integer index.
    MalformedFace { line: usize, token: String },
}

impl fmt::Display for ObjError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ObjError::IndexOutOfRange {
                line,
                index,
                vertex_count,
            } => write!(
                f,
                "line {}: face index {} is outside 1..={}",
                line, index, vertex_count
            ),
            ObjError::MalformedFace { line, token } => {
                write!(f, "line {}: face token {:?} is not a vertex index", line, token)
            }
        }
    }
}

impl std::error::Error for ObjError {}

/// Errors from a one-shot mesh load.
#[derive(Debug)]
pub enum LoadError {
    /// The source text could not be fetched.
    Io(io::Error),
    /// The source text was fetched but is not a usable mesh.
    Parse(ObjError),
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadError::Io(e) => write!(f, "failed to fetch mesh source: {}", e),
            LoadError::Parse(e) => write!(f, "failed to parse mesh: {}", e),
        }
    }
}

impl std::error::Error for LoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LoadError::Io(e) => Some(e),
            LoadError::Parse(e) => Some(e),
        }
    }
}

impl From<io::Error> for LoadError {
    fn from(e: io::Error) -> Self {
        LoadError::Io(e)
    }
}

impl From<ObjError> for LoadError {
    fn from(e: ObjError) -> Self {
        LoadError::Parse(e)
    }
}
