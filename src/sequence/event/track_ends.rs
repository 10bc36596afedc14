use crate::{events::Event, num::TickNum};

use super::Delta;

/// Collapse the end-of-track markers of a merged stream down to a single
/// trailing one.
///
/// Each source track carries its own end marker, so a merged stream has one
/// per track scattered through it. The interior markers are dropped with
/// their deltas carried forward, and one marker is emitted after the last
/// event, positioned at the latest end time seen. A stream without any
/// markers still gains exactly one.
pub fn collapse_track_ends<D, Err, I>(iter: I) -> CollapseTrackEnds<D, I>
where
    D: TickNum,
    I: Iterator<Item = Result<Delta<D, Event>, Err>> + Sized,
{
    CollapseTrackEnds {
        iter,
        carry: D::zero(),
        done: false,
    }
}

pub struct CollapseTrackEnds<D: TickNum, I> {
    iter: I,
    /// Delta time accumulated from dropped markers since the last emitted
    /// event.
    carry: D,
    done: bool,
}

impl<D, Err, I> Iterator for CollapseTrackEnds<D, I>
where
    D: TickNum,
    I: Iterator<Item = Result<Delta<D, Event>, Err>> + Sized,
{
    type Item = Result<Delta<D, Event>, Err>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        loop {
            match self.iter.next() {
                None => {
                    self.done = true;
                    return Some(Ok(Delta::new(self.carry, Event::EndOfTrack)));
                }
                Some(Err(e)) => {
                    self.done = true;
                    return Some(Err(e));
                }
                Some(Ok(mut e)) => match e.event {
                    Event::EndOfTrack => {
                        self.carry += e.delta;
                    }
                    _ => {
                        e.delta += self.carry;
                        self.carry = D::zero();
                        return Some(Ok(e));
                    }
                },
            }
        }
    }
}
