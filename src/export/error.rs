/// Errors that can occur while exporting a graph
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    /// I/O error writing the output file
    #[error("Failed to write export: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON serialization error: {0}")]
    JsonError(#[from] serde_json::Error),
}
