/// A recoverable oddity noticed during a quantization pass.
///
/// Anomalies are recorded and logged but never abort the pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Anomaly {
    /// A note arrived on a channel that never sent a volume control; the
    /// configured default was applied and latched for that channel.
    MissingChannelVolume { channel: u8, default: u8 },
    /// A note arrived before any time signature; 4/4 was latched.
    MissingTimeSignature,
    /// A second time signature appeared; the first one stays latched.
    DuplicateTimeSignature { numerator: u8 },
    NoteBelowRange { key: u8, min: u8 },
    NoteAboveRange { key: u8, max: u8 },
}

impl std::fmt::Display for Anomaly {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Anomaly::MissingChannelVolume { channel, default } => write!(
                f,
                "unknown volume for channel {}, defaulting to {}",
                channel, default
            ),
            Anomaly::MissingTimeSignature => {
                write!(f, "unknown time signature, defaulting to 4/4")
            }
            Anomaly::DuplicateTimeSignature { numerator } => write!(
                f,
                "ignoring duplicate time signature with numerator {}",
                numerator
            ),
            Anomaly::NoteBelowRange { key, min } => {
                write!(f, "ignoring note in lower range: {} < {}", key, min)
            }
            Anomaly::NoteAboveRange { key, max } => {
                write!(f, "ignoring note in upper range: {} >= {}", key, max)
            }
        }
    }
}
