//! Integration with external media tools (ffprobe and ffmpeg).
//!
//! Both tools are invoked as child processes with argument vectors; no part
//! of the command line is ever assembled as a shell string, so caption text
//! and paths containing shell metacharacters are safe to pass through.

mod ffmpeg;
mod ffprobe;

pub use ffmpeg::{composite_overlay, OVERLAY_FILTER_GRAPH};
pub use ffprobe::{probe_dimensions, VideoDimensions};
