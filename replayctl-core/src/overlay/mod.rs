//! The caption burn-in pipeline.
//!
//! Three strictly sequential stages: probe the video's dimensions, render
//! the transparent badge+text overlay image, composite it onto every frame.
//! The first failure aborts the run; nothing loops, retries, or runs
//! concurrently.

pub mod layout;
pub mod render;

pub use layout::{font_size_for_height, BadgeLayout, TextSize};
pub use render::{render_overlay_png, FontStore};

use crate::config::OverlayConfig;
use crate::error::CoreResult;
use crate::external::{composite_overlay, probe_dimensions};
use std::path::Path;

/// Runs the full pipeline: burn `caption` into `video_path`, writing the
/// result to `output_video_path`.
///
/// The overlay image is written to `overlay_image_path` and intentionally
/// left on disk after a successful run.
pub fn burn_in_caption(
    config: &OverlayConfig,
    video_path: &Path,
    output_video_path: &Path,
    caption: &str,
    overlay_image_path: &Path,
) -> CoreResult<()> {
    config.validate()?;
    let mut font = FontStore::load(&config.font_path)?;

    let dims = probe_dimensions(video_path)?;
    render_overlay_png(&mut font, dims, caption, overlay_image_path)?;
    composite_overlay(video_path, overlay_image_path, output_video_path)?;

    log::info!(
        "Caption '{caption}' burned into {}",
        output_video_path.display()
    );
    Ok(())
}
