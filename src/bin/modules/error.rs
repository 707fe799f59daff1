use std::path::PathBuf;

#[derive(thiserror::Error, Debug)]
pub enum CliError {
    /// Errors originating from the core slater library.
    #[error("Calculation error: {0}")]
    Calculation(#[from] slater::SlaterError),

    /// I/O errors associated with a specific file path.
    #[error("I/O error for '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// General I/O errors not tied to a specific file.
    #[error("I/O error: {0}")]
    GenericIo(#[from] std::io::Error),

    /// Errors writing JSON output.
    #[error("Failed to write JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// No atom was selected on the command line.
    #[error("No target given: pass an ELEMENT, -z with --occupancy, or --batch FILE")]
    MissingTarget,
}
