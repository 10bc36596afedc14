pub use threaded_buffer::threaded_buffer;
pub use to_vec::{to_vec, to_vec_result};
pub use wrap_ok::wrap_ok;

mod threaded_buffer;
mod to_vec;
mod wrap_ok;
