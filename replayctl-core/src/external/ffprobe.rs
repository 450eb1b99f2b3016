//! FFprobe integration: the dimension prober.
//!
//! Asks ffprobe for stream metadata on the input file and extracts the pixel
//! width and height of the first video stream. No files are written.

use crate::error::{CoreError, CoreResult};
use ffprobe::{ffprobe, FfProbeError};
use std::path::Path;

/// Pixel dimensions of a video's primary video stream.
///
/// Both fields are guaranteed positive; a probe that cannot produce that is
/// an error, never a zeroed value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VideoDimensions {
    pub width: u32,
    pub height: u32,
}

/// Returns the dimensions of the first video stream in `input_path`.
pub fn probe_dimensions(input_path: &Path) -> CoreResult<VideoDimensions> {
    log::debug!(
        "Running ffprobe for video dimensions on: {}",
        input_path.display()
    );

    let metadata = ffprobe(input_path).map_err(|err| map_ffprobe_error(err, input_path))?;

    let video_stream = metadata
        .streams
        .iter()
        .find(|s| s.codec_type.as_deref() == Some("video"))
        .ok_or_else(|| {
            CoreError::ProbeOutput(format!(
                "no video stream found in {}",
                input_path.display()
            ))
        })?;

    let width = video_stream.width.ok_or_else(|| {
        CoreError::ProbeOutput(format!(
            "video stream missing width in {}",
            input_path.display()
        ))
    })?;
    let height = video_stream.height.ok_or_else(|| {
        CoreError::ProbeOutput(format!(
            "video stream missing height in {}",
            input_path.display()
        ))
    })?;

    if width <= 0 || height <= 0 {
        return Err(CoreError::ProbeOutput(format!(
            "non-positive dimensions in {}: width={}, height={}",
            input_path.display(),
            width,
            height
        )));
    }

    log::debug!("Video dimensions: {width}x{height}");
    Ok(VideoDimensions {
        width: width as u32,
        height: height as u32,
    })
}

fn map_ffprobe_error(err: FfProbeError, input_path: &Path) -> CoreError {
    match err {
        FfProbeError::Io(io_err) => CoreError::Probe {
            code: None,
            stderr: format!(
                "failed to start ffprobe for {}: {io_err}",
                input_path.display()
            ),
        },
        FfProbeError::Status(output) => CoreError::Probe {
            code: output.status.code(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        },
        FfProbeError::Deserialize(err) => CoreError::ProbeOutput(format!(
            "ffprobe report for {} could not be parsed: {err}",
            input_path.display()
        )),
        _ => CoreError::ProbeOutput(format!(
            "unexpected ffprobe failure on {}: {err:?}",
            input_path.display()
        )),
    }
}
