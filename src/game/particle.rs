//! A single particle that keeps steering toward a target point
//!
//! The target is an input owned by the driver (the mouse cursor in an
//! interactive front-end). The particle never stops on its own.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use super::agent::Agent;
use crate::config::ParticleConfig;
use crate::sim::{Model, Terminal, Tick};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParticleState {
    pub particle: Agent,
    /// Point the particle is steering toward
    pub target: DVec2,
}

#[derive(Debug, Clone)]
pub struct Particle {
    speed: f64,
}

impl Particle {
    pub fn new(config: &ParticleConfig) -> Self {
        Self {
            speed: config.speed,
        }
    }

    pub fn state_at(&self, pos: DVec2, target: DVec2) -> ParticleState {
        ParticleState {
            particle: Agent::new(pos, self.speed),
            target,
        }
    }
}

impl Model for Particle {
    type State = ParticleState;

    fn apply_dynamics(&self, state: &mut ParticleState, tick: Tick) {
        state.particle.advance(tick.dt);
    }

    fn apply_control(&self, state: &mut ParticleState, _tick: Tick) {
        state.particle.face(state.target);
    }

    fn check_state(&self, state: &ParticleState) {
        assert_eq!(state.particle.speed, self.speed, "particle speed mismatch");
    }
}

impl Terminal for Particle {
    fn is_over(&self, _state: &ParticleState) -> bool {
        false
    }
}
