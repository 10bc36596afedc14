/// Note selection by loudness.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum VolumeThreshold {
    /// Accept every note that survives the other filters.
    None,
    /// Keep only notes whose volume reaches the given percentile of all
    /// eligible note volumes in the file.
    Percentile(f64),
    /// Keep only notes whose volume reaches a fixed ratio in `0.0..=1.0`.
    Fixed(f64),
}

/// What to do with a note outside `[note_min, note_max)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutOfRangePolicy {
    /// Record an anomaly and keep going.
    Skip,
    /// End the pass at the first out-of-range note.
    Stop,
}

/// Constructor-time configuration for one piano-roll conversion.
///
/// The grid shape is fixed by the config, never derived from the input:
/// `note_max - note_min` pitch rows by
/// `measures_per_song * ticks_per_measure` time columns.
#[derive(Debug, Clone, PartialEq)]
pub struct RollConfig {
    /// Lowest representable pitch, inclusive.
    pub note_min: u8,
    /// Highest representable pitch, exclusive.
    pub note_max: u8,
    pub measures_per_song: usize,
    /// Output grid resolution: columns per measure.
    pub ticks_per_measure: usize,
    /// Zero-indexed percussion channel; its events never reach the grid.
    pub percussion_channel: u8,
    /// Control-change number carrying channel volume.
    pub volume_control: u8,
    /// Volume assumed for channels that have sent no volume control yet.
    pub default_channel_volume: u8,
    pub volume_threshold: VolumeThreshold,
    pub out_of_range: OutOfRangePolicy,
    /// Accumulate one occupancy plane per channel, collapsed to 2-D after
    /// the pass.
    pub multi_channel: bool,
}

impl Default for RollConfig {
    fn default() -> Self {
        Self {
            note_min: 20,
            note_max: 96,
            measures_per_song: 16,
            ticks_per_measure: 48,
            percussion_channel: 9,
            volume_control: 7,
            default_channel_volume: 127,
            volume_threshold: VolumeThreshold::Percentile(75.0),
            out_of_range: OutOfRangePolicy::Skip,
            multi_channel: false,
        }
    }
}

impl RollConfig {
    /// Pitch rows in the output grid.
    pub fn note_range(&self) -> usize {
        (self.note_max - self.note_min) as usize
    }

    /// Time columns in the output grid.
    pub fn ticks_per_song(&self) -> usize {
        self.measures_per_song * self.ticks_per_measure
    }
}
