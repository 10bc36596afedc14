use super::{ChannelEvent, KeyEvent};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NoteOnEvent {
    pub channel: u8,
    pub key: u8,
    pub velocity: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NoteOffEvent {
    pub channel: u8,
    pub key: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControlChangeEvent {
    pub channel: u8,
    pub controller: u8,
    pub value: u8,
}

/// A time signature meta event.
///
/// The denominator is kept as the raw power-of-two exponent from the file
/// (2 means a quarter-note beat); the quantizer only reads the numerator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeSignatureEvent {
    pub numerator: u8,
    pub denominator: u8,
}

/// A tempo meta event, in microseconds per beat. Carried through the merge
/// so playback consumers can pace themselves, ignored by the quantizer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TempoEvent {
    pub tempo: u32,
}

macro_rules! impl_channel_event {
    ($event:ident) => {
        impl ChannelEvent for $event {
            fn channel(&self) -> u8 {
                self.channel
            }

            fn channel_mut(&mut self) -> &mut u8 {
                &mut self.channel
            }
        }
    };
}

macro_rules! impl_key_event {
    ($event:ident) => {
        impl KeyEvent for $event {
            fn key(&self) -> u8 {
                self.key
            }

            fn key_mut(&mut self) -> &mut u8 {
                &mut self.key
            }
        }
    };
}

impl_channel_event!(NoteOnEvent);
impl_channel_event!(NoteOffEvent);
impl_channel_event!(ControlChangeEvent);
impl_key_event!(NoteOnEvent);
impl_key_event!(NoteOffEvent);
