pub use errors::MidiLoadError;
pub use loader::MidiSong;

mod errors;
mod loader;
