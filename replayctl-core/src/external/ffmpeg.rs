//! FFmpeg integration: the compositor.
//!
//! Blends the rendered overlay PNG onto every frame of the input video and
//! stream-copies the audio. The output is written to a unique sibling path
//! and renamed over the destination only after ffmpeg exits cleanly.

use crate::error::{CoreError, CoreResult};
use crate::temp_files;
use ffmpeg_sidecar::command::FfmpegCommand;
use ffmpeg_sidecar::event::FfmpegEvent;
use std::fs;
use std::path::Path;

/// Filter graph applied by the compositor: scale the overlay's reference
/// frame to the video frame, then alpha-composite it at the top-left corner
/// using the overlay's own alpha channel.
pub const OVERLAY_FILTER_GRAPH: &str =
    "[0:v][1:v]scale2ref[vid][ovr];[vid][ovr]overlay=format=auto:0:0";

/// Overlays `overlay_image_path` onto `video_path` for its full duration and
/// writes the result to `output_path`. Audio is copied without re-encoding.
///
/// The overlay image is left on disk afterward. There is no timeout: a hung
/// ffmpeg blocks the caller indefinitely.
pub fn composite_overlay(
    video_path: &Path,
    overlay_image_path: &Path,
    output_path: &Path,
) -> CoreResult<()> {
    log::info!(
        "Overlaying {} onto {}",
        overlay_image_path.display(),
        video_path.display()
    );

    let extension = output_path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("mp4");
    let staging_dir = temp_files::staging_dir_for(output_path);
    let staging_path = temp_files::unique_sibling_path(staging_dir, "composite", extension);

    let mut cmd = FfmpegCommand::new();
    cmd.hide_banner()
        .input(video_path.to_string_lossy().as_ref())
        .input(overlay_image_path.to_string_lossy().as_ref())
        .args(["-filter_complex", OVERLAY_FILTER_GRAPH])
        .args(["-codec:a", "copy"])
        .overwrite()
        .output(staging_path.to_string_lossy().as_ref());

    log::debug!("Running ffmpeg compositor: {cmd:?}");

    let mut child = cmd.spawn().map_err(|e| CoreError::Composite {
        code: None,
        output: format!("failed to start ffmpeg: {e}"),
    })?;

    // Drain the event stream before waiting so the stderr pipe cannot fill
    // up and stall ffmpeg.
    let mut log_buffer = String::new();
    let events = child.iter().map_err(|e| CoreError::Composite {
        code: None,
        output: format!("failed to read ffmpeg output: {e}"),
    })?;
    for event in events {
        match event {
            FfmpegEvent::Log(level, message) => {
                log::trace!("ffmpeg [{level:?}]: {message}");
                log_buffer.push_str(&message);
                log_buffer.push('\n');
            }
            FfmpegEvent::Error(message) => {
                log_buffer.push_str(&message);
                log_buffer.push('\n');
            }
            _ => {}
        }
    }

    let status = child.wait().map_err(|e| CoreError::Composite {
        code: None,
        output: format!("failed to wait for ffmpeg: {e}"),
    })?;

    if !status.success() {
        let _ = fs::remove_file(&staging_path);
        return Err(CoreError::Composite {
            code: status.code(),
            output: log_buffer.trim().to_string(),
        });
    }

    fs::rename(&staging_path, output_path)?;
    log::info!("Composited video saved to {}", output_path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compositing_a_missing_input_is_a_composite_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let output = dir.path().join("out.mp4");

        let err = composite_overlay(
            Path::new("/definitely/not/here.mkv"),
            Path::new("/definitely/not/here.png"),
            &output,
        )
        .unwrap_err();

        // ffmpeg either fails to start or exits non-zero; both are Composite.
        assert!(matches!(err, CoreError::Composite { .. }));

        // Destination untouched and no staging file left behind.
        assert!(!output.exists());
        let leftovers = fs::read_dir(dir.path()).expect("read dir").count();
        assert_eq!(leftovers, 0);
    }
}
