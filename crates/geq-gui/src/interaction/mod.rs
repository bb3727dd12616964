//! Interaction pipeline: hit test → gesture → drag → parameters → handles

mod drag;
mod engine;
mod gesture;
mod handles;
mod mapper;
mod timer;

pub use drag::*;
pub use engine::*;
pub use gesture::*;
pub use handles::*;
pub use mapper::*;
pub use timer::*;
