use thiserror::Error;

use super::{note_volume, quantize::ChannelVolumes, RollConfig};
use crate::events::{AsEvent, Event};

/// Rejection raised when a file has no eligible note-on events to take a
/// percentile over. Distinct and catchable so a batch caller can skip the
/// one file without aborting the corpus.
#[derive(Debug, Error)]
pub enum ThresholdError {
    NoEligibleNotes,
}

impl std::fmt::Display for ThresholdError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ThresholdError::NoEligibleNotes => {
                write!(f, "no eligible note-on events to estimate a volume threshold from")
            }
        }
    }
}

/// Computes the volume cutoff for percentile-based note selection.
///
/// Walks the stream with its own channel-volume table, collecting the
/// perceived volume of every note-on off the percussion channel. Channels
/// that have sent no volume control yet use the configured default, without
/// recording an anomaly: this pass is read-only and the quantizer will
/// notice the same gap itself.
///
/// Order matters because control changes apply to subsequent notes only, so
/// the stream should already be merged.
pub fn estimate_volume_threshold<'a, E, I>(
    events: I,
    config: &RollConfig,
    p: f64,
) -> Result<f64, ThresholdError>
where
    E: AsEvent + 'a,
    I: IntoIterator<Item = &'a E>,
{
    let mut channel_volumes = ChannelVolumes::new();
    let mut volumes = Vec::new();

    for event in events {
        match event.as_event() {
            Event::ControlChange(cc) if cc.controller == config.volume_control => {
                channel_volumes.set(cc.channel, cc.value);
            }
            Event::NoteOn(note) if note.channel != config.percussion_channel => {
                let channel_volume = channel_volumes
                    .get(note.channel)
                    .unwrap_or(config.default_channel_volume);
                volumes.push(note_volume(note.velocity, channel_volume));
            }
            _ => {}
        }
    }

    if volumes.is_empty() {
        return Err(ThresholdError::NoEligibleNotes);
    }
    Ok(percentile(&mut volumes, p))
}

/// The p-th percentile of `values` with linear interpolation between ranks.
///
/// `values` must be non-empty; it is sorted in place.
pub fn percentile(values: &mut [f64], p: f64) -> f64 {
    assert!(!values.is_empty());
    values.sort_by(|a, b| a.partial_cmp(b).unwrap());

    let rank = (p / 100.0).clamp(0.0, 1.0) * (values.len() - 1) as f64;
    let lo = rank.floor() as usize;
    let hi = rank.ceil() as usize;
    let frac = rank - lo as f64;
    values[lo] * (1.0 - frac) + values[hi] * frac
}
