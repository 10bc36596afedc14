pub use anomaly::Anomaly;
pub use config::{OutOfRangePolicy, RollConfig, VolumeThreshold};
pub use grid::{ChannelRoll, PianoRoll};
pub use latch::Latch;
pub use quantize::{quantize, ChannelVolumes};
pub use threshold::{estimate_volume_threshold, percentile, ThresholdError};

mod anomaly;
mod config;
mod grid;
mod latch;
mod quantize;
mod threshold;

/// Perceived note loudness: velocity scaled by the channel's current
/// control volume, both normalized to `0.0..=1.0`.
pub(crate) fn note_volume(velocity: u8, channel_volume: u8) -> f64 {
    (velocity as f64 / 127.0) * (channel_volume as f64 / 127.0)
}
