pub mod audio;
pub mod cli;
pub mod external;
pub mod library;
pub mod search;
pub mod sheets;
pub mod utils;
pub mod workflows;

#[derive(Debug, thiserror::Error)]
pub enum SuiteError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("Metadata error: {0}")]
    Metadata(String),
    #[error("Resolver error: {0}")]
    Resolver(String),
    #[error("Downloader error: {0}")]
    Downloader(String),
    #[error("Converter error: {0}")]
    Converter(String),
}

pub type Result<T> = std::result::Result<T, SuiteError>;

// Re-exports for convenience
pub use audio::tags::{SymphoniaTagReader, TagReader};
pub use external::downloader::{Downloader, TrackTags, YtDlpDownloader};
pub use external::resolver::{ResolvedTrack, Resolver, YtDlpResolver};
pub use library::genres::GenreMap;
pub use library::migrate::{MigrationSummary, Migrator};
pub use library::transfer::{TransferEngine, TransferMode};
pub use sheets::workbook::{Sheet, Workbook};
