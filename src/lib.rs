//! diffgames - pursuit-evasion differential games
//!
//! Core modules:
//! - `geometry`: 2D/3D vector kernel
//! - `sim`: Dynamic-system stepping engine and fixed-timestep driver
//! - `game`: Pursuit laws, assignment search and the game models
//! - `config`: Serializable game parameters
//! - `error`: Configuration errors

pub mod config;
pub mod error;
pub mod game;
pub mod geometry;
pub mod sim;

pub use config::Config;
pub use error::GameError;

use glam::DVec2;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep in seconds
    pub const TIMESTEP: f64 = 0.01;
    /// Default step budget for a headless run
    pub const MAX_STEPS: u64 = 100_000;

    /// Slack allowed on top of the capture radius
    pub const CAPTURE_TOLERANCE: f64 = 0.08;

    /// Two pursuers vs two evaders
    pub const TWO_ON_TWO_PURSUER_SPEEDS: [f64; 2] = [45.0, 40.0];
    pub const TWO_ON_TWO_EVADER_SPEEDS: [f64; 2] = [25.0, 20.0];
    pub const TWO_ON_TWO_CAPTURE_RADIUS: f64 = 10.0;

    /// N pursuers vs N evaders: random speed ranges
    pub const PURSUER_SPEED_MIN: f64 = 30.0;
    pub const PURSUER_SPEED_MAX: f64 = 40.0;
    pub const EVADER_SPEED_MIN: f64 = 10.0;
    pub const EVADER_SPEED_MAX: f64 = 29.0;

    /// Largest N for which all N! assignments are enumerated
    pub const MAX_AGENTS: usize = 8;

    /// Particle speed
    pub const PARTICLE_SPEED: f64 = 50.0;

    /// Default arena (a 1024x1024 window at scale 4)
    pub const ARENA_WIDTH: f64 = 256.0;
    pub const ARENA_HEIGHT: f64 = 256.0;
}

/// Unit vector pointing along a heading (radians, measured from +x)
#[inline]
pub fn heading_to_unit(heading: f64) -> DVec2 {
    DVec2::new(heading.cos(), heading.sin())
}

/// Heading (radians) of the direction from `from` toward `to`
#[inline]
pub fn heading_toward(from: DVec2, to: DVec2) -> f64 {
    let delta = to - from;
    delta.y.atan2(delta.x)
}
