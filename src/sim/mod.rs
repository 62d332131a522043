//! Simulation engine
//!
//! Everything here is game-agnostic:
//! - Fixed timestep only
//! - Single-threaded, state owned by the system
//! - Time is tracked by the system and passed explicitly to callbacks

pub mod driver;
pub mod dynsys;

pub use driver::{Driver, RunSummary, Terminal, TickOutcome};
pub use dynsys::{DynSys, FnModel, FnModelBuilder, Model, Tick};
