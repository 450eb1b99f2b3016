//! Configuration for the caption overlay pipeline.
//!
//! The font used for the caption badge is the one piece of ambient state the
//! pipeline needs: it is injected here by the caller instead of being a
//! hardcoded path inside the renderer, and validated before any external
//! tool is started.

use crate::error::{CoreError, CoreResult};
use std::path::PathBuf;

/// Default caption font: a bold monospace face present on most Linux systems.
pub const DEFAULT_FONT_PATH: &str =
    "/usr/share/fonts/truetype/dejavu/DejaVuSansMono-Bold.ttf";

/// Configuration for a single overlay pipeline run.
#[derive(Debug, Clone)]
pub struct OverlayConfig {
    /// Path to the bold monospace font used to render the caption.
    pub font_path: PathBuf,
}

impl OverlayConfig {
    pub fn new(font_path: PathBuf) -> Self {
        Self { font_path }
    }

    /// Fails fast if the configured font resource does not exist, so a
    /// misconfiguration surfaces before ffprobe or ffmpeg are ever invoked.
    pub fn validate(&self) -> CoreResult<()> {
        if !self.font_path.is_file() {
            return Err(CoreError::Config(format!(
                "caption font not found at {}",
                self.font_path.display()
            )));
        }
        Ok(())
    }
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            font_path: PathBuf::from(DEFAULT_FONT_PATH),
        }
    }
}
