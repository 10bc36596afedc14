use crate::{events::EventDelta, num::TickNum};

struct SeqTime<D: TickNum, E, I> {
    iter: I,
    /// Absolute tick position of `next` within the merged timeline.
    time: D,
    next: Option<E>,
}

/// Merge an array of delta-timed event iterators together into one iterator.
///
/// Events are emitted in ascending absolute-tick order with their delta
/// times recomputed against the merged timeline, so summing deltas over any
/// prefix of the output reproduces the absolute position of its last event.
/// Ties are broken by source order: the lowest-index iterator wins, and the
/// relative order of simultaneous events within one iterator is preserved.
///
/// ## Example
///```
/// use pianoroll::{
///     events::Event,
///     pipe,
///     sequence::{event::merge_events_array, to_vec_result, wrap_ok},
/// };
///
/// let track_a = vec![
///     Event::new_delta_note_on(0u64, 0, 64, 127),
///     Event::new_delta_note_on(100u64, 0, 66, 127),
/// ];
/// let track_b = vec![Event::new_delta_note_on(50u64, 1, 72, 127)];
///
/// let tracks = vec![
///     wrap_ok(track_a.into_iter()),
///     wrap_ok(track_b.into_iter()),
/// ];
///
/// let merged = pipe! { tracks |>merge_events_array() |>to_vec_result() }.unwrap();
///
/// assert_eq!(
///     merged,
///     vec![
///         Event::new_delta_note_on(0u64, 0, 64, 127),
///         Event::new_delta_note_on(50u64, 1, 72, 127),
///         Event::new_delta_note_on(50u64, 0, 66, 127),
///     ]
/// );
///```
pub fn merge_events_array<D, E, Err, I>(array: Vec<I>) -> MergeEventsArray<D, E, Err, I>
where
    D: TickNum,
    E: EventDelta<D>,
    I: Iterator<Item = Result<E, Err>> + Sized,
{
    let mut seqs = Vec::with_capacity(array.len());
    let mut pending_err = None;
    for mut iter in array {
        match iter.next() {
            None => continue,
            Some(Err(e)) => {
                pending_err = Some(e);
                break;
            }
            Some(Ok(e)) => {
                seqs.push(SeqTime {
                    time: e.delta(),
                    next: Some(e),
                    iter,
                });
            }
        }
    }

    MergeEventsArray {
        seqs,
        time: D::zero(),
        pending_err,
    }
}

pub struct MergeEventsArray<D: TickNum, E, Err, I> {
    seqs: Vec<SeqTime<D, E, I>>,
    /// Absolute tick position of the last emitted event.
    time: D,
    pending_err: Option<Err>,
}

impl<D, E, Err, I> Iterator for MergeEventsArray<D, E, Err, I>
where
    D: TickNum,
    E: EventDelta<D>,
    I: Iterator<Item = Result<E, Err>> + Sized,
{
    type Item = Result<E, Err>;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(e) = self.pending_err.take() {
            self.seqs.clear();
            return Some(Err(e));
        }
        if self.seqs.is_empty() {
            return None;
        }

        // Scanning with a strict comparison makes the lowest index win
        // ties, which keeps the merge stable across sources.
        let mut smallest = 0;
        for i in 1..self.seqs.len() {
            if self.seqs[i].time < self.seqs[smallest].time {
                smallest = i;
            }
        }

        let (mut event, next) = {
            let seq = &mut self.seqs[smallest];
            let event = seq.next.take().unwrap();
            (event, seq.iter.next())
        };
        let new_time = self.seqs[smallest].time;
        event.set_delta(new_time - self.time);
        self.time = new_time;

        match next {
            None => {
                // `remove` keeps the relative order of the other sources,
                // preserving the tie-break.
                self.seqs.remove(smallest);
            }
            Some(Err(e)) => {
                self.pending_err = Some(e);
            }
            Some(Ok(next)) => {
                let seq = &mut self.seqs[smallest];
                seq.time += next.delta();
                seq.next = Some(next);
            }
        }

        Some(Ok(event))
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        events::Event,
        pipe,
        sequence::{event::merge_events_array, to_vec_result, wrap_ok},
    };

    fn merge(tracks: Vec<Vec<crate::sequence::event::Delta<u64, Event>>>) -> Vec<crate::sequence::event::Delta<u64, Event>> {
        let iters = tracks
            .into_iter()
            .map(|t| wrap_ok(t.into_iter()))
            .collect::<Vec<_>>();
        pipe! { iters |>merge_events_array() |>to_vec_result() }.unwrap()
    }

    #[test]
    fn simultaneous_events_keep_track_order() {
        let track_a = vec![Event::new_delta_note_on(0u64, 0, 60, 100)];
        let track_b = vec![Event::new_delta_note_on(0u64, 1, 62, 100)];

        let merged = merge(vec![track_a, track_b]);

        assert_eq!(
            merged,
            vec![
                Event::new_delta_note_on(0u64, 0, 60, 100),
                Event::new_delta_note_on(0u64, 1, 62, 100),
            ]
        );
    }

    #[test]
    fn deltas_reproduce_absolute_positions() {
        let track_a = vec![
            Event::new_delta_note_on(10u64, 0, 60, 100),
            Event::new_delta_note_on(30u64, 0, 61, 100),
            Event::new_delta_note_on(5u64, 0, 62, 100),
        ];
        let track_b = vec![
            Event::new_delta_note_on(15u64, 1, 70, 100),
            Event::new_delta_note_on(15u64, 1, 71, 100),
        ];

        // Absolute positions: a = 10, 40, 45; b = 15, 30.
        let merged = merge(vec![track_a, track_b]);

        let mut absolute = 0u64;
        let positions: Vec<u64> = merged
            .iter()
            .map(|e| {
                absolute += e.delta;
                absolute
            })
            .collect();
        assert_eq!(positions, vec![10, 15, 30, 40, 45]);

        let keys: Vec<u8> = merged.iter().map(|e| e.key().unwrap()).collect();
        assert_eq!(keys, vec![60, 70, 71, 61, 62]);
    }

    #[test]
    fn within_track_order_preserved_on_ties() {
        let track = vec![
            Event::new_delta_note_on(20u64, 0, 60, 100),
            Event::new_delta_note_on(0u64, 0, 61, 100),
            Event::new_delta_note_on(0u64, 0, 62, 100),
        ];
        let other = vec![Event::new_delta_note_on(20u64, 1, 70, 100)];

        let merged = merge(vec![track, other]);

        let keys: Vec<u8> = merged.iter().map(|e| e.key().unwrap()).collect();
        assert_eq!(keys, vec![60, 61, 62, 70]);
    }

    #[test]
    fn merge_is_deterministic() {
        let make_tracks = || {
            vec![
                vec![
                    Event::new_delta_note_on(0u64, 0, 60, 100),
                    Event::new_delta_note_on(12u64, 0, 61, 100),
                ],
                vec![
                    Event::new_delta_note_on(0u64, 1, 70, 100),
                    Event::new_delta_note_on(12u64, 1, 71, 100),
                ],
                vec![Event::new_delta_note_on(12u64, 2, 80, 100)],
            ]
        };

        assert_eq!(merge(make_tracks()), merge(make_tracks()));
    }

    #[test]
    fn empty_input_yields_nothing() {
        assert_eq!(merge(vec![]), vec![]);
        assert_eq!(merge(vec![vec![], vec![]]), vec![]);
    }
}
