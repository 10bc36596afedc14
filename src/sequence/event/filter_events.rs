use crate::{events::EventDelta, num::TickNum};

/// Filter the events in a sequence based on a predicate, while carrying
/// over the delta of the removed events.
///
/// Dropping an event must not shift the events after it, so the removed
/// delta is added onto the next surviving event.
///
/// ## Example
///```
/// use pianoroll::{
///     events::Event,
///     pipe,
///     sequence::{event::filter_events, to_vec_result, wrap_ok},
/// };
///
/// let events = vec![
///     Event::new_delta_note_on(100u64, 0, 64, 127),
///     Event::new_delta_tempo(50u64, 500_000),
///     Event::new_delta_note_on(30u64, 0, 66, 127),
/// ];
///
/// let changed = pipe! {
///     (events.into_iter())
///     |>wrap_ok()
///     |>filter_events(|e| matches!(e.event, Event::NoteOn(_)))
///     |>to_vec_result()
/// }
/// .unwrap();
///
/// assert_eq!(
///     changed,
///     vec![
///         Event::new_delta_note_on(100u64, 0, 64, 127),
///         Event::new_delta_note_on(80u64, 0, 66, 127),
///     ]
/// );
///```
pub fn filter_events<D, E, Err, I, F>(iter: I, predicate: F) -> FilterEvents<D, I, F>
where
    D: TickNum,
    E: EventDelta<D>,
    F: Fn(&E) -> bool,
    I: Iterator<Item = Result<E, Err>> + Sized,
{
    FilterEvents {
        iter,
        predicate,
        extra_delta: D::zero(),
    }
}

pub struct FilterEvents<D: TickNum, I, F> {
    iter: I,
    predicate: F,
    extra_delta: D,
}

impl<D, E, Err, I, F> Iterator for FilterEvents<D, I, F>
where
    D: TickNum,
    E: EventDelta<D>,
    F: Fn(&E) -> bool,
    I: Iterator<Item = Result<E, Err>> + Sized,
{
    type Item = Result<E, Err>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            match self.iter.next() {
                None => return None,
                Some(Err(e)) => return Some(Err(e)),
                Some(Ok(mut e)) => {
                    if (self.predicate)(&e) {
                        e.set_delta(e.delta() + self.extra_delta);
                        self.extra_delta = D::zero();
                        return Some(Ok(e));
                    } else {
                        self.extra_delta += e.delta();
                    }
                }
            }
        }
    }
}
