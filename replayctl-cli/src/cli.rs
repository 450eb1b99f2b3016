// replayctl-cli/src/cli.rs
//
// Defines the command-line argument structures using clap.

use clap::{Parser, Subcommand};
use replayctl_core::DEFAULT_FONT_PATH;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    author,
    version, // Reads from Cargo.toml via "cargo" feature in clap
    about = "replayctl: replay archiving tools",
    long_about = "Burns captions into replay videos via ffprobe/ffmpeg and \
                  maintains the replay metadata JSON files."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Burns a text caption into a video via a transparent overlay image
    Overlay(OverlayArgs),
    /// Rewrites each record's index field to its position in the file
    AddIndices(AddIndicesArgs),
    /// Sums game_length_frames across a replay list and prints the total
    CountFrames(CountFramesArgs),
    /// Sorts a replay list by date (unknown dates last) and re-indexes it
    SortReplays(SortReplaysArgs),
}

#[derive(Parser, Debug)]
pub struct OverlayArgs {
    /// Video to caption
    #[arg(value_name = "INPUT_VIDEO")]
    pub input_video: PathBuf,

    /// Where the captioned video is written
    #[arg(value_name = "OUTPUT_VIDEO")]
    pub output_video: PathBuf,

    /// Caption text (e.g. a timestamp or label)
    #[arg(value_name = "TEXT")]
    pub text: String,

    /// Where the intermediate overlay PNG is written (left on disk)
    #[arg(value_name = "OVERLAY_IMAGE")]
    pub overlay_image: PathBuf,

    /// Bold monospace font used to render the caption
    #[arg(
        long,
        value_name = "FONT_PATH",
        env = "REPLAYCTL_FONT",
        default_value = DEFAULT_FONT_PATH
    )]
    pub font: PathBuf,
}

#[derive(Parser, Debug)]
pub struct AddIndicesArgs {
    /// Replay list to re-index in place
    #[arg(value_name = "JSON_PATH")]
    pub json_path: PathBuf,
}

#[derive(Parser, Debug)]
pub struct CountFramesArgs {
    /// Replay list to tally (not modified)
    #[arg(value_name = "JSON_PATH")]
    pub json_path: PathBuf,
}

#[derive(Parser, Debug)]
pub struct SortReplaysArgs {
    /// Replay list to sort
    #[arg(value_name = "INPUT_JSON")]
    pub input_path: PathBuf,

    /// Where the sorted, re-indexed list is written
    #[arg(value_name = "OUTPUT_JSON")]
    pub output_path: PathBuf,
}
