/// A fixed-shape binary occupancy grid: pitch rows by quantized-time
/// columns.
///
/// The shape comes from the [`RollConfig`](super::RollConfig), never from
/// the input file; cells outside it are unrepresentable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PianoRoll {
    note_range: usize,
    ticks: usize,
    cells: Vec<bool>,
}

impl PianoRoll {
    /// Allocates a zero-filled grid.
    pub fn new(note_range: usize, ticks: usize) -> Self {
        Self {
            note_range,
            ticks,
            cells: vec![false; note_range * ticks],
        }
    }

    pub fn note_range(&self) -> usize {
        self.note_range
    }

    pub fn ticks(&self) -> usize {
        self.ticks
    }

    /// Marks a cell occupied. Idempotent. Panics if out of shape.
    pub fn set(&mut self, note: usize, tick: usize) {
        let idx = self.index(note, tick);
        self.cells[idx] = true;
    }

    pub fn get(&self, note: usize, tick: usize) -> bool {
        self.cells[self.index(note, tick)]
    }

    /// Number of occupied cells.
    pub fn count_set(&self) -> usize {
        self.cells.iter().filter(|c| **c).count()
    }

    /// Iterates pitch rows, lowest pitch first.
    pub fn rows(&self) -> impl Iterator<Item = &[bool]> {
        self.cells.chunks(self.ticks)
    }

    fn index(&self, note: usize, tick: usize) -> usize {
        assert!(note < self.note_range && tick < self.ticks);
        note * self.ticks + tick
    }
}

/// The multi-channel accumulation variant: one occupancy plane per MIDI
/// channel, collapsed to a flat [`PianoRoll`] after the pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelRoll {
    planes: Vec<PianoRoll>,
}

const CHANNEL_COUNT: usize = 16;

impl ChannelRoll {
    pub fn new(note_range: usize, ticks: usize) -> Self {
        Self {
            planes: (0..CHANNEL_COUNT)
                .map(|_| PianoRoll::new(note_range, ticks))
                .collect(),
        }
    }

    pub fn set(&mut self, channel: u8, note: usize, tick: usize) {
        self.planes[channel as usize].set(note, tick);
    }

    pub fn plane(&self, channel: u8) -> &PianoRoll {
        &self.planes[channel as usize]
    }

    /// Collapses the planes to 2-D: a cell is occupied if any channel
    /// occupies it.
    pub fn collapse(self) -> PianoRoll {
        let mut planes = self.planes.into_iter();
        let mut flat = planes.next().unwrap();
        for plane in planes {
            for (cell, other) in flat.cells.iter_mut().zip(plane.cells.iter()) {
                *cell |= *other;
            }
        }
        flat
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cells_start_unset() {
        let roll = PianoRoll::new(4, 8);
        assert_eq!(roll.count_set(), 0);
        assert!(!roll.get(3, 7));
    }

    #[test]
    fn set_is_idempotent() {
        let mut roll = PianoRoll::new(4, 8);
        roll.set(2, 5);
        roll.set(2, 5);
        assert!(roll.get(2, 5));
        assert_eq!(roll.count_set(), 1);
    }

    #[test]
    #[should_panic]
    fn out_of_shape_set_panics() {
        let mut roll = PianoRoll::new(4, 8);
        roll.set(4, 0);
    }

    #[test]
    fn channel_planes_collapse_by_union() {
        let mut roll = ChannelRoll::new(4, 8);
        roll.set(0, 1, 2);
        roll.set(5, 1, 2);
        roll.set(5, 3, 4);

        let flat = roll.collapse();
        assert!(flat.get(1, 2));
        assert!(flat.get(3, 4));
        assert_eq!(flat.count_set(), 2);
    }
}
