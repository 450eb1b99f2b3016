//! The replay metadata commands: add-indices, count-frames, sort-replays.

use crate::cli::{AddIndicesArgs, CountFramesArgs, SortReplaysArgs};
use log::info;
use replayctl_core::{
    assign_indices, load_replays, save_replays, sort_by_date, total_game_frames, CoreResult,
};

/// Rewrites the index field of every record to its file position, in place.
pub fn run_add_indices(args: AddIndicesArgs) -> CoreResult<()> {
    let mut replays = load_replays(&args.json_path)?;
    assign_indices(&mut replays);
    save_replays(&args.json_path, &replays)?;
    info!(
        "Added index to {} replays in {}",
        replays.len(),
        args.json_path.display()
    );
    Ok(())
}

/// Prints the total of game_length_frames over all records that carry it.
pub fn run_count_frames(args: CountFramesArgs) -> CoreResult<()> {
    let replays = load_replays(&args.json_path)?;
    let total = total_game_frames(&replays);
    println!("Total frames across {} replays: {total}", replays.len());
    Ok(())
}

/// Sorts by date (unknown dates last), re-indexes, writes to a new file.
pub fn run_sort_replays(args: SortReplaysArgs) -> CoreResult<()> {
    let mut replays = load_replays(&args.input_path)?;
    sort_by_date(&mut replays);
    assign_indices(&mut replays);
    save_replays(&args.output_path, &replays)?;
    info!(
        "Sorted {} replays by date into {}",
        replays.len(),
        args.output_path.display()
    );
    Ok(())
}
