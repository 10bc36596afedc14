use thiserror::Error;

/// Failures that reject an input file before any merging or quantization
/// happens. No partial piano roll is ever produced for these.
#[derive(Debug, Error)]
pub enum MidiLoadError {
    /// Format 2 files hold independently timed patterns whose tracks must
    /// not be merged onto one timeline.
    AsynchronousTracks,
    /// SMPTE timecode division (or a zero tick resolution) has no
    /// ticks-per-beat to quantize against.
    UnsupportedTiming,
    CorruptFile(#[from] midly::Error),
    FilesystemError(#[from] std::io::Error),
}

impl std::fmt::Display for MidiLoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MidiLoadError::AsynchronousTracks => {
                write!(f, "cannot merge tracks in a type 2 (asynchronous) file")
            }
            MidiLoadError::UnsupportedTiming => {
                write!(f, "file has no usable ticks-per-beat resolution")
            }
            MidiLoadError::CorruptFile(e) => write!(f, "corrupt MIDI file: {}", e),
            MidiLoadError::FilesystemError(e) => write!(f, "filesystem error: {}", e),
        }
    }
}
