use std::{
    fmt::{Debug, Display},
    ops::{AddAssign, SubAssign},
};

use num_traits::Num;

/// Numeric types usable as delta-time values in event sequences.
///
/// Tick arithmetic only needs zero, addition, subtraction and ordering, so
/// any of the common integer widths work, as do floats for streams whose
/// deltas have already been rescaled into seconds.
pub trait TickNum:
    Num + PartialOrd + AddAssign + SubAssign + Copy + Sized + Debug + Display + Send + Sync
{
}

impl TickNum for u32 {}
impl TickNum for u64 {}
impl TickNum for i32 {}
impl TickNum for i64 {}
impl TickNum for f32 {}
impl TickNum for f64 {}
