//! Batch conversion of MIDI files into piano rolls.
//!
//! Each file is fully independent, so the batch driver fans out one
//! conversion per rayon worker with no shared state. Per-file failures are
//! logged and returned alongside the path; callers stack the successes
//! into their training corpus however they like.

use std::path::{Path, PathBuf};

use log::warn;
use rayon::prelude::*;
use thiserror::Error;

use crate::{
    events::Event,
    io::{MidiLoadError, MidiSong},
    pipe,
    roll::{
        estimate_volume_threshold, quantize, Anomaly, PianoRoll, RollConfig, ThresholdError,
        VolumeThreshold,
    },
    sequence::{
        event::{collapse_track_ends, filter_events, merge_events_array, Delta},
        threaded_buffer, to_vec_result, wrap_ok,
    },
};

/// Per-file conversion failures a batch caller catches and skips.
#[derive(Debug, Error)]
pub enum ConvertError {
    Load(#[from] MidiLoadError),
    Threshold(#[from] ThresholdError),
}

impl std::fmt::Display for ConvertError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConvertError::Load(e) => write!(f, "{}", e),
            ConvertError::Threshold(e) => write!(f, "{}", e),
        }
    }
}

/// Channel capacity for the per-track read-ahead threads feeding the merge.
const TRACK_BUFFER_SIZE: usize = 1 << 10;

/// Converts one song: merge, collapse end markers, shed uninteresting
/// events, estimate the volume cutoff when configured, quantize.
pub fn convert_song(
    song: MidiSong,
    config: &RollConfig,
) -> Result<(PianoRoll, Vec<Anomaly>), ConvertError> {
    let ppq = song.ppq();

    let tracks = song
        .into_tracks()
        .into_iter()
        .map(|track| wrap_ok(threaded_buffer(track.into_iter(), TRACK_BUFFER_SIZE)))
        .collect();

    // Cached to a vec because the percentile threshold needs a full pass
    // over the stream before quantization reads it again.
    let events = pipe! {
        tracks
        |>merge_events_array()
        |>collapse_track_ends()
        |>filter_events(|e: &Delta<u64, Event>| !matches!(e.event, Event::Other))
        |>to_vec_result()
    }
    .unwrap();

    let threshold = match config.volume_threshold {
        VolumeThreshold::None => None,
        VolumeThreshold::Fixed(ratio) => Some(ratio),
        VolumeThreshold::Percentile(p) => {
            Some(estimate_volume_threshold(events.iter(), config, p)?)
        }
    };

    let mut anomalies = Vec::new();
    let roll = pipe! {
        (events.into_iter())
        |>wrap_ok()
        |>quantize(ppq, config, threshold, &mut anomalies)
    }
    .unwrap();

    Ok((roll, anomalies))
}

/// Loads and converts a single file.
pub fn convert_path(
    path: impl AsRef<Path>,
    config: &RollConfig,
) -> Result<(PianoRoll, Vec<Anomaly>), ConvertError> {
    let song = MidiSong::open(path)?;
    convert_song(song, config)
}

/// Converts a batch of files in parallel, one rayon task per file.
///
/// Failed files are logged and returned as errors in place; they never
/// abort the rest of the batch.
pub fn convert_files(
    paths: &[PathBuf],
    config: &RollConfig,
) -> Vec<(PathBuf, Result<PianoRoll, ConvertError>)> {
    paths
        .par_iter()
        .map(|path| {
            let result = convert_path(path, config).map(|(roll, _)| roll);
            if let Err(e) = &result {
                warn!("skipping {}: {}", path.display(), e);
            }
            (path.clone(), result)
        })
        .collect()
}
