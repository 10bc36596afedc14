use std::{fs, path::Path};

use midly::{Format, MetaMessage, MidiMessage, Smf, Timing, TrackEventKind};

use super::errors::MidiLoadError;
use crate::{
    events::Event,
    sequence::{
        event::{merge_events_array, Delta},
        wrap_ok,
    },
};

/// A parsed MIDI file, reduced to the event kinds the quantizer consumes.
///
/// Byte-level decoding is delegated to `midly`; this type owns the
/// converted per-track event lists plus the file's tick resolution.
/// Asynchronous (format 2) files and SMPTE-timed files are rejected at
/// load, before any merging can happen.
#[derive(Debug, Clone, PartialEq)]
pub struct MidiSong {
    ppq: u16,
    tracks: Vec<Vec<Delta<u64, Event>>>,
}

impl MidiSong {
    /// Builds a song directly from converted tracks, for callers that
    /// bring their own parser.
    ///
    /// `ppq` must be non-zero.
    pub fn new(ppq: u16, tracks: Vec<Vec<Delta<u64, Event>>>) -> Self {
        assert!(ppq > 0, "ticks-per-beat must be non-zero");
        Self { ppq, tracks }
    }

    pub fn open(path: impl AsRef<Path>) -> Result<Self, MidiLoadError> {
        let bytes = fs::read(path)?;
        Self::from_bytes(&bytes)
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, MidiLoadError> {
        let smf = Smf::parse(bytes)?;

        if let Format::Sequential = smf.header.format {
            return Err(MidiLoadError::AsynchronousTracks);
        }
        let ppq = match smf.header.timing {
            Timing::Metrical(t) if t.as_int() > 0 => t.as_int(),
            _ => return Err(MidiLoadError::UnsupportedTiming),
        };

        let tracks = smf.tracks.iter().map(|t| convert_track(t)).collect();
        Ok(MidiSong { ppq, tracks })
    }

    /// The file's base tick resolution, in ticks per beat.
    pub fn ppq(&self) -> u16 {
        self.ppq
    }

    pub fn track_count(&self) -> usize {
        self.tracks.len()
    }

    pub fn iter_track(
        &self,
        track: usize,
    ) -> impl Iterator<Item = Result<Delta<u64, Event>, ()>> + '_ {
        wrap_ok(self.tracks[track].iter().copied())
    }

    pub fn iter_all_tracks(
        &self,
    ) -> impl Iterator<Item = impl Iterator<Item = Result<Delta<u64, Event>, ()>> + '_> + '_ {
        (0..self.track_count()).map(move |i| self.iter_track(i))
    }

    /// Iterates all tracks merged into one chronologically ordered stream
    /// with recomputed delta times.
    pub fn iter_events_merged(&self) -> impl Iterator<Item = Result<Delta<u64, Event>, ()>> + '_ {
        merge_events_array(self.iter_all_tracks().collect())
    }

    /// Consumes the song, returning the converted tracks.
    pub fn into_tracks(self) -> Vec<Vec<Delta<u64, Event>>> {
        self.tracks
    }
}

fn convert_track(events: &[midly::TrackEvent<'_>]) -> Vec<Delta<u64, Event>> {
    events
        .iter()
        .map(|ev| {
            let delta = ev.delta.as_int() as u64;
            let event = match ev.kind {
                TrackEventKind::Midi { channel, message } => {
                    let channel = channel.as_int();
                    match message {
                        // Velocity 0 means note off by convention.
                        MidiMessage::NoteOn { key, vel } if vel.as_int() == 0 => {
                            Event::new_note_off(channel, key.as_int())
                        }
                        MidiMessage::NoteOn { key, vel } => {
                            Event::new_note_on(channel, key.as_int(), vel.as_int())
                        }
                        MidiMessage::NoteOff { key, .. } => {
                            Event::new_note_off(channel, key.as_int())
                        }
                        MidiMessage::Controller { controller, value } => {
                            Event::new_control_change(channel, controller.as_int(), value.as_int())
                        }
                        _ => Event::Other,
                    }
                }
                TrackEventKind::Meta(MetaMessage::TimeSignature(numerator, denominator, ..)) => {
                    Event::new_time_signature(numerator, denominator)
                }
                TrackEventKind::Meta(MetaMessage::Tempo(tempo)) => {
                    Event::new_tempo(tempo.as_int())
                }
                TrackEventKind::Meta(MetaMessage::EndOfTrack) => Event::EndOfTrack,
                _ => Event::Other,
            };
            Delta::new(delta, event)
        })
        .collect()
}
