use log::warn;

use super::{
    grid::{ChannelRoll, PianoRoll},
    note_volume, Anomaly, Latch, OutOfRangePolicy, RollConfig,
};
use crate::events::{AsEvent, Event, EventDelta};

/// Last-known volume control value per channel, owned by one pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ChannelVolumes {
    volumes: [Option<u8>; 16],
}

impl ChannelVolumes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, channel: u8) -> Option<u8> {
        self.volumes[channel as usize]
    }

    pub fn set(&mut self, channel: u8, value: u8) {
        self.volumes[channel as usize] = Some(value);
    }
}

enum Cells {
    Flat(PianoRoll),
    PerChannel(ChannelRoll),
}

impl Cells {
    fn set(&mut self, channel: u8, note: usize, tick: usize) {
        match self {
            Cells::Flat(roll) => roll.set(note, tick),
            Cells::PerChannel(roll) => roll.set(channel, note, tick),
        }
    }

    fn into_roll(self) -> PianoRoll {
        match self {
            Cells::Flat(roll) => roll,
            Cells::PerChannel(roll) => roll.collapse(),
        }
    }
}

/// Rasterizes a merged event stream onto a fixed pitch × time grid.
///
/// Single forward pass. Every event's delta advances the playback clock
/// first, whatever its kind; time signatures latch `beats_per_measure`
/// once; percussion-channel events are skipped; volume control changes
/// update the channel table; note-ons are thresholded against `threshold`
/// (when given), rescaled from the file's tick resolution onto the grid,
/// and written as binary occupancy.
///
/// The pass ends when the stream is exhausted or when a note-on maps past
/// the end of the grid, whichever comes first. Truncation is expected
/// behavior, not an error. Oddities that do not stop the pass are appended
/// to `anomalies` and logged.
///
/// `threshold` is the already-resolved volume cutoff; the
/// [`VolumeThreshold`](super::VolumeThreshold) policy in `config` is not
/// consulted here. [`corpus::convert_song`](crate::corpus::convert_song)
/// resolves the policy (running the percentile estimator when needed) and
/// passes the result in. Callers invoking `quantize` directly must do the
/// same, or pass `None` for no filtering.
///
/// `ppq` is the file's ticks-per-beat and must be non-zero; the loader
/// guarantees this for files it accepts.
pub fn quantize<E, Err, I>(
    iter: I,
    ppq: u16,
    config: &RollConfig,
    threshold: Option<f64>,
    anomalies: &mut Vec<Anomaly>,
) -> Result<PianoRoll, Err>
where
    E: AsEvent + EventDelta<u64>,
    I: Iterator<Item = Result<E, Err>> + Sized,
{
    debug_assert!(ppq > 0);

    let mut playback_ticks: u64 = 0;
    let mut beats_per_measure: Latch<u8> = Latch::new();
    let mut channel_volumes = ChannelVolumes::new();
    let mut cells = if config.multi_channel {
        Cells::PerChannel(ChannelRoll::new(config.note_range(), config.ticks_per_song()))
    } else {
        Cells::Flat(PianoRoll::new(config.note_range(), config.ticks_per_song()))
    };

    let record = |anomalies: &mut Vec<Anomaly>, anomaly: Anomaly| {
        warn!("{}", anomaly);
        anomalies.push(anomaly);
    };

    'events: for event in iter {
        let event = event?;

        // Time advances for every event kind, ignored ones included.
        let delta = event.delta();
        if delta > 0 {
            playback_ticks += delta;
        }

        if let Event::TimeSignature(ts) = event.as_event() {
            // A zero numerator would make the measure length meaningless.
            if ts.numerator > 0 && !beats_per_measure.set(ts.numerator) {
                record(
                    anomalies,
                    Anomaly::DuplicateTimeSignature {
                        numerator: ts.numerator,
                    },
                );
            }
            continue;
        }

        if event.as_event().channel() == Some(config.percussion_channel) {
            continue;
        }

        match event.as_event() {
            Event::ControlChange(cc) if cc.controller == config.volume_control => {
                channel_volumes.set(cc.channel, cc.value);
            }
            Event::NoteOn(note) => {
                let channel_volume = match channel_volumes.get(note.channel) {
                    Some(volume) => volume,
                    None => {
                        record(
                            anomalies,
                            Anomaly::MissingChannelVolume {
                                channel: note.channel,
                                default: config.default_channel_volume,
                            },
                        );
                        channel_volumes.set(note.channel, config.default_channel_volume);
                        config.default_channel_volume
                    }
                };

                let volume = note_volume(note.velocity, channel_volume);
                if let Some(threshold) = threshold {
                    if volume < threshold {
                        continue;
                    }
                }

                let beats = match beats_per_measure.copied() {
                    Some(beats) => beats,
                    None => {
                        record(anomalies, Anomaly::MissingTimeSignature);
                        beats_per_measure.set(4);
                        4
                    }
                };

                // Rescale the file's native tick position onto the fixed
                // output grid.
                let ticks_per_measure = ppq as u64 * beats as u64;
                let time_index =
                    (playback_ticks * config.ticks_per_measure as u64 / ticks_per_measure) as usize;
                if time_index >= config.ticks_per_song() {
                    // The grid is full; everything later is truncated.
                    break 'events;
                }

                if note.key < config.note_min {
                    record(
                        anomalies,
                        Anomaly::NoteBelowRange {
                            key: note.key,
                            min: config.note_min,
                        },
                    );
                    match config.out_of_range {
                        OutOfRangePolicy::Skip => continue,
                        OutOfRangePolicy::Stop => break 'events,
                    }
                }
                if note.key >= config.note_max {
                    record(
                        anomalies,
                        Anomaly::NoteAboveRange {
                            key: note.key,
                            max: config.note_max,
                        },
                    );
                    match config.out_of_range {
                        OutOfRangePolicy::Skip => continue,
                        OutOfRangePolicy::Stop => break 'events,
                    }
                }

                cells.set(
                    note.channel,
                    (note.key - config.note_min) as usize,
                    time_index,
                );
            }
            _ => {}
        }
    }

    Ok(cells.into_roll())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        pipe,
        sequence::{event::Delta, wrap_ok},
    };

    fn run(
        events: Vec<Delta<u64, Event>>,
        ppq: u16,
        config: &RollConfig,
        threshold: Option<f64>,
    ) -> (PianoRoll, Vec<Anomaly>) {
        let mut anomalies = Vec::new();
        let roll = pipe! {
            (events.into_iter())
            |>wrap_ok()
            |>quantize(ppq, config, threshold, &mut anomalies)
        }
        .unwrap();
        (roll, anomalies)
    }

    fn config() -> RollConfig {
        RollConfig {
            volume_threshold: super::super::VolumeThreshold::None,
            ..RollConfig::default()
        }
    }

    #[test]
    fn missing_time_signature_defaults_to_four_four() {
        let events = vec![Event::new_delta_note_on(96u64, 0, 60, 100)];

        let (roll, anomalies) = run(events, 96, &config(), None);

        // floor(96 * 48 / (96 * 4)) = 12
        assert!(roll.get(40, 12));
        assert_eq!(roll.count_set(), 1);
        assert!(anomalies.contains(&Anomaly::MissingTimeSignature));
    }

    #[test]
    fn time_signature_rescales_grid_position() {
        let events = vec![
            Event::new_delta_time_signature(0u64, 3, 2),
            Event::new_delta_control_change(0u64, 0, 7, 127),
            Event::new_delta_note_on(96u64, 0, 60, 100),
        ];

        let (roll, anomalies) = run(events, 96, &config(), None);

        // floor(96 * 48 / (96 * 3)) = 16
        assert!(roll.get(40, 16));
        assert!(anomalies.is_empty());
    }

    #[test]
    fn duplicate_time_signature_is_ignored() {
        let events = vec![
            Event::new_delta_time_signature(0u64, 3, 2),
            Event::new_delta_time_signature(0u64, 4, 2),
            Event::new_delta_note_on(96u64, 0, 60, 100),
        ];

        let (roll, anomalies) = run(events, 96, &config(), None);

        // Still 3 beats per measure.
        assert!(roll.get(40, 16));
        assert!(anomalies.contains(&Anomaly::DuplicateTimeSignature { numerator: 4 }));
    }

    #[test]
    fn time_signature_delta_still_advances_clock() {
        let events = vec![
            Event::new_delta_time_signature(96u64, 4, 2),
            Event::new_delta_note_on(0u64, 0, 60, 100),
        ];

        let (roll, _) = run(events, 96, &config(), None);

        assert!(roll.get(40, 12));
    }

    #[test]
    fn percussion_channel_never_writes() {
        let events = vec![
            Event::new_delta_note_on(0u64, 9, 60, 127),
            Event::new_delta_note_on(0u64, 9, 35, 127),
        ];

        let (roll, _) = run(events, 96, &config(), None);

        assert_eq!(roll.count_set(), 0);
    }

    #[test]
    fn ignored_events_still_advance_time() {
        let events = vec![
            Event::new_delta_tempo(48u64, 500_000),
            Event::new_delta_note_on(48u64, 0, 60, 100), // absolute tick 96
        ];

        let (roll, _) = run(events, 96, &config(), None);

        assert!(roll.get(40, 12));
    }

    #[test]
    fn grid_overflow_truncates_the_pass() {
        let cfg = config();
        let last_valid = (cfg.ticks_per_song() - 1) as u64; // grid column 767
        let events = vec![
            // 8 native ticks per grid tick at ppq 96, 4/4.
            Event::new_delta_note_on(last_valid * 8, 0, 60, 100),
            Event::new_delta_note_on(8u64, 0, 61, 100),  // first overflowing note
            Event::new_delta_note_on(0u64, 0, 62, 100),  // would be valid, must not be written
        ];

        let (roll, _) = run(events, 96, &cfg, None);

        assert!(roll.get(40, cfg.ticks_per_song() - 1));
        assert_eq!(roll.count_set(), 1);
    }

    #[test]
    fn out_of_range_notes_skip_by_default() {
        let events = vec![
            Event::new_delta_note_on(0u64, 0, 10, 100),
            Event::new_delta_note_on(0u64, 0, 100, 100),
            Event::new_delta_note_on(0u64, 0, 60, 100),
        ];

        let (roll, anomalies) = run(events, 96, &config(), None);

        assert_eq!(roll.count_set(), 1);
        assert!(anomalies.contains(&Anomaly::NoteBelowRange { key: 10, min: 20 }));
        assert!(anomalies.contains(&Anomaly::NoteAboveRange { key: 100, max: 96 }));
    }

    #[test]
    fn out_of_range_stop_policy_ends_the_pass() {
        let cfg = RollConfig {
            out_of_range: OutOfRangePolicy::Stop,
            ..config()
        };
        let events = vec![
            Event::new_delta_note_on(0u64, 0, 10, 100),
            Event::new_delta_note_on(0u64, 0, 60, 100),
        ];

        let (roll, _) = run(events, 96, &cfg, None);

        assert_eq!(roll.count_set(), 0);
    }

    #[test]
    fn threshold_filters_quiet_notes() {
        let events = vec![
            Event::new_delta_control_change(0u64, 0, 7, 127),
            Event::new_delta_note_on(0u64, 0, 60, 127),
            Event::new_delta_note_on(0u64, 0, 61, 20),
        ];

        let (roll, _) = run(events, 96, &config(), Some(0.5));

        assert!(roll.get(40, 0));
        assert_eq!(roll.count_set(), 1);
    }

    #[test]
    fn threshold_policy_in_config_is_not_resolved_here() {
        let events = vec![
            Event::new_delta_control_change(0u64, 0, 7, 127),
            Event::new_delta_note_on(0u64, 0, 60, 127),
            Event::new_delta_note_on(0u64, 0, 61, 20),
        ];
        let config = RollConfig {
            volume_threshold: super::super::VolumeThreshold::Fixed(0.5),
            ..RollConfig::default()
        };

        // The caller owns resolution; with no resolved cutoff both notes land.
        let (roll, _) = run(events, 96, &config, None);

        assert_eq!(roll.count_set(), 2);
    }

    #[test]
    fn raising_threshold_never_adds_cells() {
        let events = vec![
            Event::new_delta_note_on(0u64, 0, 60, 127),
            Event::new_delta_note_on(1u64, 0, 61, 90),
            Event::new_delta_note_on(1u64, 0, 62, 50),
            Event::new_delta_note_on(1u64, 0, 63, 10),
        ];

        let mut previous = usize::MAX;
        for threshold in [0.0, 0.3, 0.6, 0.9, 1.1] {
            let (roll, _) = run(events.clone(), 96, &config(), Some(threshold));
            assert!(roll.count_set() <= previous);
            previous = roll.count_set();
        }
    }

    #[test]
    fn missing_channel_volume_is_defaulted_once() {
        let events = vec![
            Event::new_delta_note_on(0u64, 0, 60, 100),
            Event::new_delta_note_on(0u64, 0, 61, 100),
        ];

        let (_, anomalies) = run(events, 96, &config(), None);

        // The first uncontrolled note-on is the only thing worth reporting.
        assert_eq!(
            anomalies,
            vec![Anomaly::MissingChannelVolume { channel: 0, default: 127 }]
        );
    }

    #[test]
    fn volume_control_on_percussion_channel_is_ignored() {
        let events = vec![
            Event::new_delta_control_change(0u64, 9, 7, 1),
            Event::new_delta_note_on(0u64, 0, 60, 127),
        ];

        let (_, anomalies) = run(events, 96, &config(), None);

        // Channel 0 still has no volume on record.
        assert!(anomalies.contains(&Anomaly::MissingChannelVolume {
            channel: 0,
            default: 127
        }));
    }

    #[test]
    fn multi_channel_planes_collapse_to_union() {
        let cfg = RollConfig {
            multi_channel: true,
            ..config()
        };
        let events = vec![
            Event::new_delta_note_on(0u64, 0, 60, 100),
            Event::new_delta_note_on(0u64, 1, 60, 100),
            Event::new_delta_note_on(0u64, 1, 62, 100),
        ];

        let (roll, _) = run(events, 96, &cfg, None);

        assert!(roll.get(40, 0));
        assert!(roll.get(42, 0));
        assert_eq!(roll.count_set(), 2);
    }

    #[test]
    fn all_cells_stay_inside_the_fixed_shape() {
        let events = vec![
            Event::new_delta_note_on(0u64, 0, 20, 100),
            Event::new_delta_note_on(0u64, 0, 95, 100),
            Event::new_delta_note_on(3000u64, 0, 60, 100),
        ];

        let (roll, _) = run(events, 96, &config(), None);

        assert_eq!(roll.note_range(), 76);
        assert_eq!(roll.ticks(), 768);
        // get() bound-checks internally; walking the full shape proves no
        // write landed outside it.
        let mut set = 0;
        for note in 0..roll.note_range() {
            for tick in 0..roll.ticks() {
                if roll.get(note, tick) {
                    set += 1;
                }
            }
        }
        assert_eq!(set, roll.count_set());
    }
}
