use std::path::PathBuf;

/// Errors surfaced at the crate's API boundary.
///
/// Nothing inside a frame tick produces one of these; they come from parsing
/// navigation input and loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum TourError {
    /// A navigation target that names no camera mode.
    #[error("unknown camera mode: {0:?}")]
    UnknownMode(String),

    /// A scheduled navigation event not in `FRAME:MODE` form.
    #[error("invalid navigation event {0:?}, expected FRAME:MODE")]
    InvalidNavEvent(String),

    /// Reading or decoding a tour config file failed.
    #[error("failed to load config {}: {source}", .path.display())]
    Config {
        path: PathBuf,
        #[source]
        source: ConfigSource,
    },

    /// The config decoded but describes an unusable tour.
    #[error("invalid config: {0}")]
    Validation(String),
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigSource {
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, TourError>;
