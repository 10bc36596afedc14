use std::ops::{Deref, DerefMut};

use crate::{
    events::{AsEvent, Event, EventDelta},
    num::TickNum,
};

/// An event paired with its delta time: ticks since the previous event in
/// the same stream.
///
/// Derefs to the inner event, so wrapped events can be matched and read
/// without unwrapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Delta<D: TickNum, E> {
    pub delta: D,
    pub event: E,
}

impl<D: TickNum, E> Delta<D, E> {
    #[inline(always)]
    pub fn new(delta: D, event: E) -> Self {
        Self { delta, event }
    }

    /// Discards the delta time, returning the inner event.
    #[inline(always)]
    pub fn into_event(self) -> E {
        self.event
    }
}

impl<D: TickNum, E> EventDelta<D> for Delta<D, E> {
    #[inline(always)]
    fn delta(&self) -> D {
        self.delta
    }

    #[inline(always)]
    fn delta_mut(&mut self) -> &mut D {
        &mut self.delta
    }
}

impl<D: TickNum, E: AsEvent> AsEvent for Delta<D, E> {
    #[inline(always)]
    fn as_event(&self) -> &Event {
        self.event.as_event()
    }

    #[inline(always)]
    fn as_event_mut(&mut self) -> &mut Event {
        self.event.as_event_mut()
    }
}

impl<D: TickNum, E> Deref for Delta<D, E> {
    type Target = E;

    fn deref(&self) -> &Self::Target {
        &self.event
    }
}

impl<D: TickNum, E> DerefMut for Delta<D, E> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.event
    }
}
