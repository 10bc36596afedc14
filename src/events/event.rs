use super::events::*;
use crate::{num::TickNum, sequence::event::Delta};

/// A single timed musical instruction.
///
/// Only the event kinds the quantizer cares about carry data; everything
/// else collapses into [`Event::Other`], which still contributes its delta
/// time to the playback clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    NoteOn(NoteOnEvent),
    NoteOff(NoteOffEvent),
    ControlChange(ControlChangeEvent),
    TimeSignature(TimeSignatureEvent),
    Tempo(TempoEvent),
    EndOfTrack,
    Other,
}

impl Event {
    /// The channel this event is bound to, if it is a channel event.
    pub fn channel(&self) -> Option<u8> {
        match self {
            Event::NoteOn(e) => Some(e.channel),
            Event::NoteOff(e) => Some(e.channel),
            Event::ControlChange(e) => Some(e.channel),
            _ => None,
        }
    }

    /// The key (pitch number) of this event, if it has one.
    pub fn key(&self) -> Option<u8> {
        match self {
            Event::NoteOn(e) => Some(e.key),
            Event::NoteOff(e) => Some(e.key),
            _ => None,
        }
    }

    pub fn new_note_on(channel: u8, key: u8, velocity: u8) -> Event {
        Event::NoteOn(NoteOnEvent {
            channel,
            key,
            velocity,
        })
    }

    pub fn new_note_off(channel: u8, key: u8) -> Event {
        Event::NoteOff(NoteOffEvent { channel, key })
    }

    pub fn new_control_change(channel: u8, controller: u8, value: u8) -> Event {
        Event::ControlChange(ControlChangeEvent {
            channel,
            controller,
            value,
        })
    }

    pub fn new_time_signature(numerator: u8, denominator: u8) -> Event {
        Event::TimeSignature(TimeSignatureEvent {
            numerator,
            denominator,
        })
    }

    pub fn new_tempo(tempo: u32) -> Event {
        Event::Tempo(TempoEvent { tempo })
    }

    pub fn new_delta_note_on<D: TickNum>(
        delta: D,
        channel: u8,
        key: u8,
        velocity: u8,
    ) -> Delta<D, Event> {
        Delta::new(delta, Event::new_note_on(channel, key, velocity))
    }

    pub fn new_delta_note_off<D: TickNum>(delta: D, channel: u8, key: u8) -> Delta<D, Event> {
        Delta::new(delta, Event::new_note_off(channel, key))
    }

    pub fn new_delta_control_change<D: TickNum>(
        delta: D,
        channel: u8,
        controller: u8,
        value: u8,
    ) -> Delta<D, Event> {
        Delta::new(delta, Event::new_control_change(channel, controller, value))
    }

    pub fn new_delta_time_signature<D: TickNum>(
        delta: D,
        numerator: u8,
        denominator: u8,
    ) -> Delta<D, Event> {
        Delta::new(delta, Event::new_time_signature(numerator, denominator))
    }

    pub fn new_delta_tempo<D: TickNum>(delta: D, tempo: u32) -> Delta<D, Event> {
        Delta::new(delta, Event::new_tempo(tempo))
    }

    pub fn new_delta_end_of_track<D: TickNum>(delta: D) -> Delta<D, Event> {
        Delta::new(delta, Event::EndOfTrack)
    }

    pub fn new_delta_other<D: TickNum>(delta: D) -> Delta<D, Event> {
        Delta::new(delta, Event::Other)
    }
}
