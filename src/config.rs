//! Game parameters
//!
//! Loaded from JSON (or defaulted), validated once, then fixed for the life
//! of a game. Re-seeding a game keeps its configuration.

use std::path::Path;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::GameError;

/// Half-open speed interval `[min, max)` for random agents
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpeedRange {
    pub min: f64,
    pub max: f64,
}

impl SpeedRange {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn validate(&self, what: &'static str) -> Result<(), GameError> {
        if !(self.min.is_finite() && self.max.is_finite() && self.min > 0.0 && self.min < self.max)
        {
            return Err(GameError::InvalidRange {
                what,
                min: self.min,
                max: self.max,
            });
        }
        Ok(())
    }

    /// Draw a speed from the range
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        rng.random_range(self.min..self.max)
    }
}

/// Region where agents are placed at random (window size / scale)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArenaConfig {
    pub width: f64,
    pub height: f64,
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self {
            width: ARENA_WIDTH,
            height: ARENA_HEIGHT,
        }
    }
}

impl ArenaConfig {
    pub fn validate(&self) -> Result<(), GameError> {
        let ok = |v: f64| v.is_finite() && v > 0.0;
        if !(ok(self.width) && ok(self.height)) {
            return Err(GameError::InvalidArena {
                width: self.width,
                height: self.height,
            });
        }
        Ok(())
    }
}

/// Two pursuers vs two evaders
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TwoOnTwoConfig {
    pub pursuer_speeds: [f64; 2],
    pub evader_speeds: [f64; 2],
    pub capture_radius: f64,
    pub capture_tolerance: f64,
}

impl Default for TwoOnTwoConfig {
    fn default() -> Self {
        Self {
            pursuer_speeds: TWO_ON_TWO_PURSUER_SPEEDS,
            evader_speeds: TWO_ON_TWO_EVADER_SPEEDS,
            capture_radius: TWO_ON_TWO_CAPTURE_RADIUS,
            capture_tolerance: CAPTURE_TOLERANCE,
        }
    }
}

/// N pursuers vs N evaders with random speeds
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NpneConfig {
    /// Agents per side (N = M)
    pub agents: usize,
    pub capture_radius: f64,
    pub capture_tolerance: f64,
    pub pursuer_speed: SpeedRange,
    pub evader_speed: SpeedRange,
}

impl Default for NpneConfig {
    fn default() -> Self {
        Self {
            agents: 2,
            capture_radius: 0.0,
            capture_tolerance: CAPTURE_TOLERANCE,
            pursuer_speed: SpeedRange::new(PURSUER_SPEED_MIN, PURSUER_SPEED_MAX),
            evader_speed: SpeedRange::new(EVADER_SPEED_MIN, EVADER_SPEED_MAX),
        }
    }
}

impl NpneConfig {
    pub fn validate(&self) -> Result<(), GameError> {
        if self.agents == 0 {
            return Err(GameError::NoAgents);
        }
        if self.agents > MAX_AGENTS {
            return Err(GameError::TooManyAgents {
                n: self.agents,
                max: MAX_AGENTS,
            });
        }
        validate_capture(self.capture_radius, self.capture_tolerance)?;
        self.pursuer_speed.validate("pursuer speed")?;
        self.evader_speed.validate("evader speed")?;
        // Any evader may be paired with any pursuer, so the fastest evader
        // must stay strictly slower than the slowest pursuer.
        if self.evader_speed.max > self.pursuer_speed.min {
            return Err(GameError::OverlappingSpeeds {
                evader_max: self.evader_speed.max,
                pursuer_min: self.pursuer_speed.min,
            });
        }
        Ok(())
    }
}

/// Target-following particle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParticleConfig {
    pub speed: f64,
}

impl Default for ParticleConfig {
    fn default() -> Self {
        Self {
            speed: PARTICLE_SPEED,
        }
    }
}

impl ParticleConfig {
    pub fn validate(&self) -> Result<(), GameError> {
        if !(self.speed.is_finite() && self.speed > 0.0) {
            return Err(GameError::InvalidParticleSpeed(self.speed));
        }
        Ok(())
    }
}

/// Stepping parameters shared by every game
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    pub timestep: f64,
    pub max_steps: u64,
    /// RNG seed for random initial conditions
    pub seed: u64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            timestep: TIMESTEP,
            max_steps: MAX_STEPS,
            seed: 0,
        }
    }
}

impl SimConfig {
    pub fn validate(&self) -> Result<(), GameError> {
        if !(self.timestep.is_finite() && self.timestep > 0.0) {
            return Err(GameError::InvalidTimestep(self.timestep));
        }
        Ok(())
    }
}

/// Complete configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub sim: SimConfig,
    pub arena: ArenaConfig,
    pub two_on_two: TwoOnTwoConfig,
    pub npne: NpneConfig,
    pub particle: ParticleConfig,
}

impl Config {
    /// Parse and validate a JSON configuration. Missing fields take defaults.
    pub fn from_json(json: &str) -> Result<Self, GameError> {
        let config: Config = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read a JSON configuration file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, GameError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json(&json)?;
        log::info!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String, GameError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Check the sections that don't need a game instance. Speed ratios of
    /// the fixed games are checked when the game is built.
    pub fn validate(&self) -> Result<(), GameError> {
        self.sim.validate()?;
        self.arena.validate()?;
        self.npne.validate()?;
        validate_capture(self.two_on_two.capture_radius, self.two_on_two.capture_tolerance)?;
        self.particle.validate()
    }
}

/// Radius and tolerance shared by both pursuit games
pub(crate) fn validate_capture(radius: f64, tolerance: f64) -> Result<(), GameError> {
    if !(radius >= 0.0) {
        return Err(GameError::NegativeRadius(radius));
    }
    if !(tolerance >= 0.0) {
        return Err(GameError::NegativeTolerance(tolerance));
    }
    Ok(())
}
