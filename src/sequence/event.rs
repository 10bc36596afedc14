pub use delta::Delta;
pub use filter_events::filter_events;
pub use merge_events::merge_events_array;
pub use track_ends::collapse_track_ends;

mod delta;
mod filter_events;
mod merge_events;
mod track_ends;
