pub use common::*;

pub mod event;

mod common;
