//! Core library for the replayctl replay-archiving toolset.
//!
//! Provides the caption burn-in pipeline (ffprobe dimension probing,
//! transparent overlay rendering, ffmpeg compositing with audio stream copy)
//! and the replay-metadata transforms (indexing, frame counting, date
//! sorting) used by the `replayctl` CLI.
//!
//! ## Usage Example
//!
//! ```rust,no_run
//! use replayctl_core::{burn_in_caption, OverlayConfig};
//! use std::path::{Path, PathBuf};
//!
//! let config = OverlayConfig::new(PathBuf::from("/usr/share/fonts/mono_bold.ttf"));
//! burn_in_caption(
//!     &config,
//!     Path::new("game_001.mp4"),
//!     Path::new("game_001_labeled.mp4"),
//!     "2024-01-01",
//!     Path::new("game_001_overlay.png"),
//! ).unwrap();
//! ```

pub mod config;
pub mod error;
pub mod external;
pub mod overlay;
pub mod replays;
pub mod temp_files;

// Re-exports for public API
pub use config::{OverlayConfig, DEFAULT_FONT_PATH};
pub use error::{CoreError, CoreResult};
pub use external::{composite_overlay, probe_dimensions, VideoDimensions};
pub use overlay::{burn_in_caption, font_size_for_height, BadgeLayout, FontStore, TextSize};
pub use replays::{
    assign_indices, load_replays, save_replays, sort_by_date, total_game_frames, ReplayRecord,
};
