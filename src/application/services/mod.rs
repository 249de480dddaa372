//! Application services
//!
//! Concrete service implementations that orchestrate domain logic.
//! Services depend on I/O boundary traits (FileSystem)
//! but are themselves concrete structs, not traits.

mod materialize;
mod outline;

pub use materialize::{MaterializeOptions, MaterializeOutput, MaterializeService, PathMap};
pub use outline::OutlineService;
