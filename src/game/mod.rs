//! Pursuit-evasion games
//!
//! - `pursuit`: closed-form aim point and headings for one pair
//! - `assignment`: enumeration and search over pursuer/evader bijections
//! - `capture`: termination predicate
//! - `two_on_two`, `npne`, `particle`: game models for the engine

pub mod agent;
pub mod assignment;
pub mod capture;
pub mod npne;
pub mod particle;
pub mod pursuit;
pub mod two_on_two;

pub use agent::Agent;
pub use assignment::{Assignment, AssignmentSet, Pair, factorial};
pub use capture::{all_captured, within_capture};
pub use npne::{Npne, NpneState};
pub use particle::{Particle, ParticleState};
pub use pursuit::{Headings, RatioTable, VelocityRatio, aim_point, aim_value, engage, optimal_headings};
pub use two_on_two::{Pairing, TwoOnTwo, TwoOnTwoState};
