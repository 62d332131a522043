//! Configuration errors
//!
//! Anything a caller can get wrong at setup time lands here. Programming
//! errors (missing dynamics, mismatched state length) panic instead.

use thiserror::Error;

/// Which side of the game an agent plays
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Pursuer,
    Evader,
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::Pursuer => write!(f, "pursuer"),
            Role::Evader => write!(f, "evader"),
        }
    }
}

#[derive(Debug, Error)]
pub enum GameError {
    #[error("number of agents cannot be 0")]
    NoAgents,

    #[error("{n} agents per side would need {n}! assignments (max {max} agents)")]
    TooManyAgents { n: usize, max: usize },

    #[error("{role} {index} has non-positive speed {speed}")]
    NonPositiveSpeed { role: Role, index: usize, speed: f64 },

    #[error("evader {evader} is not strictly slower than pursuer {pursuer} (ratio {ratio})")]
    DegenerateRatio {
        pursuer: usize,
        evader: usize,
        ratio: f64,
    },

    #[error("evaders may reach {evader_max} but pursuers may be as slow as {pursuer_min}")]
    OverlappingSpeeds { evader_max: f64, pursuer_min: f64 },

    #[error("arena must have positive size, got {width}x{height}")]
    InvalidArena { width: f64, height: f64 },

    #[error("invalid {what} range [{min}, {max})")]
    InvalidRange { what: &'static str, min: f64, max: f64 },

    #[error("timestep must be positive and finite, got {0}")]
    InvalidTimestep(f64),

    #[error("capture radius cannot be negative, got {0}")]
    NegativeRadius(f64),

    #[error("capture tolerance cannot be negative, got {0}")]
    NegativeTolerance(f64),

    #[error("particle speed must be positive, got {0}")]
    InvalidParticleSpeed(f64),

    #[error("invalid configuration: {0}")]
    Config(#[from] serde_json::Error),

    #[error("could not read configuration: {0}")]
    Io(#[from] std::io::Error),
}
