use crossbeam_channel::{bounded, IntoIter};
use std::thread;

/// Reads an iterator ahead on a worker thread, buffering up to
/// `max_buffer_size` items in a bounded channel.
///
/// The worker stops as soon as the receiving side is dropped.
pub fn threaded_buffer<T, I>(iter: I, max_buffer_size: usize) -> IntoIter<T>
where
    T: 'static + Send,
    I: 'static + Iterator<Item = T> + Sized + Send,
{
    let (tx, rx) = bounded(max_buffer_size);
    thread::spawn(move || {
        for item in iter {
            if tx.send(item).is_err() {
                break;
            }
        }
    });

    rx.into_iter()
}
