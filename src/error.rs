use std::path::PathBuf;

/// Error types for a migration run
#[derive(thiserror::Error, Debug)]
pub enum MigrationError {
    /// A `(line: column)` annotation that does not hold two integers
    #[error("Error parsing position in line {line_number}: {raw}")]
    MalformedPosition { line_number: usize, raw: String },

    /// Two position annotations without a log line between them
    #[error("Position annotation at line {line_number} has no matching log line: {raw}")]
    UnpairedAnnotation { line_number: usize, raw: String },

    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The export stream failed mid-read
    #[error("Failed to read export line {line_number}: {source}")]
    Read {
        line_number: usize,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid configuration in {path}: {reason}")]
    Config { path: PathBuf, reason: String },
}

pub type Result<T> = std::result::Result<T, MigrationError>;
