use thiserror::Error;

/// Main error type for GedGraph
#[derive(Error, Debug)]
pub enum GedgraphError {
    /// File system I/O errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// GEDCOM syntax errors that prevent loading
    #[error("Parse error at line {line}: {message}")]
    Parse { line: usize, message: String },

    /// Individual id does not resolve in the loaded file
    #[error("Individual {0} not found")]
    IndividualNotFound(String),

    /// No connecting path within the search depth
    #[error("No relationship found between {from} and {to}")]
    NoRelationship { from: String, to: String },

    /// Unrecognized chart variant, split mode, or unusable render input
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

/// Convenient Result type using GedgraphError
pub type Result<T> = std::result::Result<T, GedgraphError>;
