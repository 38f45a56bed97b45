//! Error handling for Floorkit
//!
//! Error types for every layer of the editor:
//! - Model errors (rejected mutations of the floorplan)
//! - Document errors (import/load of serialized projects)
//! - Export errors (vector and volumetric encoders)
//!
//! All error types use `thiserror` for ergonomic error handling.

use thiserror::Error;

/// Model error type
///
/// Raised by mutations of the project aggregate. The interactive editor turns
/// these into silent no-ops; programmatic callers can inspect them.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ModelError {
    /// Both wall endpoints snapped to the same grid point
    #[error("Wall endpoints coincide at ({x}, {y})")]
    ZeroLengthWall {
        /// X coordinate of the coincident endpoints.
        x: f64,
        /// Y coordinate of the coincident endpoints.
        y: f64,
    },

    /// No floor with the given id
    #[error("Unknown floor: {id}")]
    UnknownFloor {
        /// The missing floor id.
        id: String,
    },

    /// No wall with the given id
    #[error("Unknown wall: {id}")]
    UnknownWall {
        /// The missing wall id.
        id: String,
    },

    /// No opening with the given id
    #[error("Unknown opening: {id}")]
    UnknownOpening {
        /// The missing opening id.
        id: String,
    },

    /// The last remaining floor cannot be removed
    #[error("Cannot remove the last floor")]
    LastFloor,

    /// Floor height must be finite and non-negative
    #[error("Invalid floor height: {height}")]
    InvalidFloorHeight {
        /// The rejected height.
        height: f64,
    },

    /// Wall thickness must be finite and positive
    #[error("Invalid wall thickness: {thickness}")]
    InvalidThickness {
        /// The rejected thickness.
        thickness: f64,
    },

    /// Opening dimensions must be finite and positive
    #[error("Invalid opening dimensions: {reason}")]
    InvalidOpening {
        /// Why the dimensions were rejected.
        reason: String,
    },
}

/// Document error type
///
/// Raised when a serialized project cannot be parsed or violates the
/// aggregate's invariants.
#[derive(Error, Debug)]
pub enum DocumentError {
    /// The document is not valid JSON or does not match the schema
    #[error("Failed to parse project document: {0}")]
    Parse(#[from] serde_json::Error),

    /// The document parsed but breaks a structural invariant
    #[error("Invalid project document: {reason}")]
    Invalid {
        /// The violated invariant.
        reason: String,
    },
}

impl DocumentError {
    /// Create an invariant violation error
    pub fn invalid(reason: impl Into<String>) -> Self {
        DocumentError::Invalid {
            reason: reason.into(),
        }
    }
}

/// Export error type
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ExportError {
    /// The requested floor does not exist
    #[error("Unknown floor for export: {id}")]
    UnknownFloor {
        /// The missing floor id.
        id: String,
    },

    /// A wall profile could not be triangulated
    #[error("Triangulation failed for {element}: {reason}")]
    Triangulation {
        /// The element being triangulated.
        element: String,
        /// The triangulator's message.
        reason: String,
    },

    /// The output document could not be encoded
    #[error("Encoding failed: {reason}")]
    Encoding {
        /// The encoder's message.
        reason: String,
    },
}

/// Main error type for Floorkit
///
/// A unified error type that can represent any error from all layers.
#[derive(Error, Debug)]
pub enum Error {
    /// Model error
    #[error(transparent)]
    Model(#[from] ModelError),

    /// Document error
    #[error(transparent)]
    Document(#[from] DocumentError),

    /// Export error
    #[error(transparent)]
    Export(#[from] ExportError),

    /// Standard I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create an error from a string message
    pub fn other(msg: impl Into<String>) -> Self {
        Error::Other(msg.into())
    }

    /// Check if this is a rejected model mutation
    pub fn is_model_error(&self) -> bool {
        matches!(self, Error::Model(_))
    }

    /// Check if this is a document error
    pub fn is_document_error(&self) -> bool {
        matches!(self, Error::Document(_))
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Document(DocumentError::Parse(err))
    }
}

/// Result type alias for Floorkit operations
pub type Result<T> = std::result::Result<T, Error>;
