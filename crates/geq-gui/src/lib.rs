//! geq-gui: direct-manipulation layer for the graph EQ
//!
//! Turns pointer, touch and wheel input on a frequency-response chart into
//! filter parameter edits, and derives the handles drawn for each filter.
//! Rendering and the filter list itself belong to the host application,
//! which plugs in through the traits in [`host`].

pub mod config;
pub mod host;
pub mod interaction;

pub use config::*;
pub use host::*;
pub use interaction::*;
