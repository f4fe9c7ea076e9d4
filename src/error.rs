use thiserror::Error;

/// Errors that can occur at the import and CLI boundary.
///
/// Extraction, ingredient parsing and grocery aggregation never fail; these
/// variants only come from fetching pages, reading files and loading config.
#[derive(Error, Debug)]
pub enum ImportError {
    /// Failed to fetch page from URL
    #[error("Failed to fetch URL: {0}")]
    FetchError(#[from] reqwest::Error),

    /// The server answered with a non-success status
    #[error("Fetch of {url} failed with status {status}")]
    HttpStatus { url: String, status: u16 },

    /// The page or ingredient text was empty
    #[error("No text to import from")]
    EmptyInput,

    /// Every fetch and extraction strategy came up empty
    #[error("Could not find a usable recipe at {0}")]
    NoUsableContent(String),

    /// Builder configuration error
    #[error("Builder error: {0}")]
    BuilderError(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(#[from] config::ConfigError),

    /// Reading an input file failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// An input file was not valid JSON for the expected shape
    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
}
