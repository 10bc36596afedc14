pub use event::Event;
pub use events::*;

mod event;
mod events;

use crate::num::TickNum;

/// A type carrying a delta time: ticks elapsed since the previous event in
/// its stream.
pub trait EventDelta<D: TickNum> {
    fn delta(&self) -> D;
    fn delta_mut(&mut self) -> &mut D;

    #[inline(always)]
    fn set_delta(&mut self, delta: D) {
        *self.delta_mut() = delta;
    }
}

/// Borrow the underlying [`Event`] out of wrapper types such as
/// [`Delta`](crate::sequence::event::Delta).
pub trait AsEvent {
    fn as_event(&self) -> &Event;
    fn as_event_mut(&mut self) -> &mut Event;
}

impl AsEvent for Event {
    fn as_event(&self) -> &Event {
        self
    }

    fn as_event_mut(&mut self) -> &mut Event {
        self
    }
}

/// A trait that describes an event that is always connected to a channel
pub trait ChannelEvent {
    fn channel(&self) -> u8;
    fn channel_mut(&mut self) -> &mut u8;
}

/// A trait that describes an event that is always connected to a key
pub trait KeyEvent: ChannelEvent {
    fn key(&self) -> u8;
    fn key_mut(&mut self) -> &mut u8;
}
