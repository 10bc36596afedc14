//! Converts symbolic music (MIDI) into fixed-resolution binary piano-roll
//! grids suitable as machine learning training data.
//!
//! The crate is built around two composable pieces:
//!
//! - [`sequence`]: iterator combinators over delta-timed event streams,
//!   most importantly [`merge_events_array`](sequence::event::merge_events_array),
//!   which merges independently timed tracks into one chronologically
//!   ordered stream with recomputed delta times.
//! - [`roll`]: the quantization pass that rasterizes a merged stream onto a
//!   fixed pitch × time grid, with volume-percentile note selection.
//!
//! [`corpus`] wires both together behind a single [`RollConfig`](roll::RollConfig),
//! converting whole batches of files in parallel.

pub mod corpus;
pub mod events;
pub mod io;
pub mod num;
pub mod roll;
pub mod sequence;

#[macro_export]
macro_rules! pipe {
    ($var:tt |> $function: ident($($params: expr),*) $($calls:tt)*) => {
        pipe!({$function($var, $($params),*)} $($calls)*)
    };
    ($var:tt |> $namespace1:ident :: $function: ident($($params: expr),*) $($calls:tt)*) => {
        pipe!({$namespace1::$function($var, $($params),*)} $($calls)*)
    };
    ($var:tt |> $namespace1:ident :: $namespace2:ident :: $function: ident($($params: expr),*) $($calls:tt)*) => {
        pipe!({$namespace1::$namespace2::$function($var, $($params),*)} $($calls)*)
    };
    ($var:tt . $function: ident $( :: < $($types: tt $(< $types2: tt >)? ),* > )? ( $($params: expr),* ) $($calls:tt)*) => {
        pipe!({$var.$function $( :: < $($types $(< $types2 >)?),* > )? ( $($params),* )} $($calls)*)
    };
    ($var:tt . $field: ident $($calls:tt)* ) => {
        pipe!({ $var.$field } $($calls)*)
    };
    ($var:tt) => {
        $var
    };
}
