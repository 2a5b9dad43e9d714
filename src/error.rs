use thiserror::Error;

/// Errors raised by the playback engine.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FeedError {
    /// A feed buffer must hold at least one line.
    #[error("Feed capacity must be at least 1, got {0}")]
    InvalidCapacity(usize),

    /// No timer facility (tokio runtime) is reachable from the caller.
    #[error("Timer facility unavailable: {0}")]
    TimerUnavailable(String),

    /// `start` was called on a session that is already playing.
    #[error("Session is already running")]
    AlreadyRunning,

    /// Sessions are single-use; a stopped one cannot be restarted.
    #[error("Session has been stopped and cannot be restarted")]
    SessionStopped,
}

/// A specialized Result type for playback operations.
pub type Result<T> = std::result::Result<T, FeedError>;

/// Errors raised while loading a script file.
#[derive(Error, Debug)]
pub enum ScriptError {
    /// The file is neither JSON nor CSV.
    #[error("Unknown script format")]
    UnknownFormat,

    /// A required CSV column is absent.
    #[error("Could not find column with names: {0:?}")]
    MissingColumn(&'static [&'static str]),

    /// A delay below zero was authored.
    #[error("Negative delay {value} on line {line}")]
    NegativeDelay { line: usize, value: i64 },

    /// A delay that is not an integer number of milliseconds.
    #[error("Invalid delay {value:?} on line {line}")]
    InvalidDelay { line: usize, value: String },

    /// A CSV `kind` value other than `seed` or `entry`.
    #[error("Unknown line kind {value:?} on line {line}")]
    InvalidKind { line: usize, value: String },

    /// A seed row carrying a nonzero delay.
    #[error("Seed line {line} has delay {value}ms; seed lines must have no delay")]
    SeedWithDelay { line: usize, value: u64 },

    /// A seed row placed after a scheduled row.
    #[error("Seed line {line} comes after a scheduled line")]
    SeedAfterEntry { line: usize },

    /// Underlying IO failure.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed JSON script.
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// Malformed CSV script.
    #[error("CSV parse error: {0}")]
    Csv(#[from] csv::Error),
}
