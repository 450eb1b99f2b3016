//! Error types shared across the replayctl core library.
//!
//! Every failure class the pipeline can hit has its own variant so callers
//! can tell a probe failure apart from a composite failure programmatically
//! instead of matching on printed output.

use thiserror::Error;

/// Custom error types for replayctl
#[derive(Error, Debug)]
pub enum CoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid configuration: {0}")]
    Config(String),

    /// ffprobe exited non-zero or could not be started.
    #[error("ffprobe failed ({}): {stderr}", display_exit(.code))]
    Probe { code: Option<i32>, stderr: String },

    /// ffprobe ran but its report was unusable (bad JSON, no video stream,
    /// missing or non-positive width/height).
    #[error("ffprobe returned unusable data: {0}")]
    ProbeOutput(String),

    #[error("font resource error: {0}")]
    FontLoad(String),

    /// The frame geometry cannot carry a caption (e.g. the height yields a
    /// zero font size).
    #[error("caption layout error: {0}")]
    Layout(String),

    #[error("overlay image could not be written: {0}")]
    ImageEncode(String),

    /// ffmpeg exited non-zero or could not be started. Carries the captured
    /// log stream so the failure can be diagnosed without re-running.
    #[error("ffmpeg compositing failed ({}): {output}", display_exit(.code))]
    Composite { code: Option<i32>, output: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for replayctl core operations
pub type CoreResult<T> = std::result::Result<T, CoreError>;

fn display_exit(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("exit code {code}"),
        None => "terminated without exit code".to_string(),
    }
}
