//! The `overlay` command: the caption burn-in pipeline.

use crate::cli::OverlayArgs;
use log::info;
use replayctl_core::{burn_in_caption, CoreResult, OverlayConfig};

pub fn run_overlay(args: OverlayArgs) -> CoreResult<()> {
    info!(
        "Captioning {} -> {}",
        args.input_video.display(),
        args.output_video.display()
    );

    let config = OverlayConfig::new(args.font);
    burn_in_caption(
        &config,
        &args.input_video,
        &args.output_video,
        &args.text,
        &args.overlay_image,
    )
}
