//! High-level correspondence API for editor hosts.
//!
//! Pure functions over caller-supplied text: the host brings document
//! contents, a cursor position and a way to fetch the partner file; this
//! layer returns plain location data to be converted at the host boundary.

mod goto;

pub use goto::{GotoResult, GotoTarget, Navigator};
