//! Two pursuers vs two evaders
//!
//! Fixed speeds per agent. Each control step decides between the only two
//! perfect matchings of the 2x2 game (straight: P1-E1/P2-E2, crossed:
//! P1-E2/P2-E1) by comparing their summed aim values, then sends every pair
//! toward its aim point. Running cost is elapsed time, so the total cost of
//! a finished game is its time to capture.

use glam::DVec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::agent::Agent;
use super::assignment::{Assignment, Pair};
use super::capture::all_captured;
use super::pursuit::{RatioTable, aim_value, engage};
use crate::config::{ArenaConfig, TwoOnTwoConfig, validate_capture};
use crate::error::GameError;
use crate::sim::{Model, Terminal, Tick};

/// Which pursuer chases which evader
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Pairing {
    /// P1 chases E1, P2 chases E2
    #[default]
    Straight,
    /// P1 chases E2, P2 chases E1
    Crossed,
}

impl Pairing {
    pub fn pairs(self) -> [Pair; 2] {
        let (e0, e1) = match self {
            Pairing::Straight => (0, 1),
            Pairing::Crossed => (1, 0),
        };
        [
            Pair { pursuer: 0, evader: e0 },
            Pair { pursuer: 1, evader: e1 },
        ]
    }

    pub fn assignment(self) -> Assignment {
        let [a, b] = self.pairs();
        Assignment::from_evaders(&[a.evader, b.evader])
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TwoOnTwoState {
    pub pursuers: [Agent; 2],
    pub evaders: [Agent; 2],
    /// Pairing chosen by the latest control step
    pub pairing: Pairing,
}

impl TwoOnTwoState {
    /// Distance between the two agents of each current pair
    pub fn pair_distances(&self) -> [f64; 2] {
        self.pairing
            .pairs()
            .map(|pair| self.pursuers[pair.pursuer].distance_to(&self.evaders[pair.evader]))
    }
}

#[derive(Debug, Clone)]
pub struct TwoOnTwo {
    pursuer_speeds: [f64; 2],
    evader_speeds: [f64; 2],
    ratios: RatioTable,
    capture_radius: f64,
    capture_tolerance: f64,
}

impl TwoOnTwo {
    /// Fails unless every evader is strictly slower than both pursuers.
    pub fn new(config: &TwoOnTwoConfig) -> Result<Self, GameError> {
        validate_capture(config.capture_radius, config.capture_tolerance)?;
        let ratios = RatioTable::new(&config.pursuer_speeds, &config.evader_speeds)?;
        log::info!(
            "Two-on-two game: pursuers {:?}, evaders {:?}, capture radius {}",
            config.pursuer_speeds,
            config.evader_speeds,
            config.capture_radius
        );
        Ok(Self {
            pursuer_speeds: config.pursuer_speeds,
            evader_speeds: config.evader_speeds,
            ratios,
            capture_radius: config.capture_radius,
            capture_tolerance: config.capture_tolerance,
        })
    }

    /// Initial state with agents at the given positions, headings unset
    pub fn state_at(&self, pursuers: [DVec2; 2], evaders: [DVec2; 2]) -> TwoOnTwoState {
        TwoOnTwoState {
            pursuers: [0, 1].map(|i| Agent::new(pursuers[i], self.pursuer_speeds[i])),
            evaders: [0, 1].map(|j| Agent::new(evaders[j], self.evader_speeds[j])),
            pairing: Pairing::default(),
        }
    }

    /// Initial state with every agent placed at random in the arena
    pub fn random_state<R: Rng + ?Sized>(&self, rng: &mut R, arena: &ArenaConfig) -> TwoOnTwoState {
        let mut point = || {
            DVec2::new(
                rng.random_range(0.0..arena.width),
                rng.random_range(0.0..arena.height),
            )
        };
        let pursuers = [point(), point()];
        let evaders = [point(), point()];
        self.state_at(pursuers, evaders)
    }

    /// Summed aim values `[Y_straight, Y_crossed]`
    pub fn pairing_values(&self, state: &TwoOnTwoState) -> [f64; 2] {
        let y = |pair: Pair| {
            aim_value(
                state.pursuers[pair.pursuer].pos,
                state.evaders[pair.evader].pos,
                self.ratios.get(pair.pursuer, pair.evader),
            )
        };
        [Pairing::Straight, Pairing::Crossed].map(|p| p.pairs().into_iter().map(y).sum())
    }

    /// Crossed only wins if strictly better; ties keep the straight pairing.
    pub fn select_pairing(&self, state: &TwoOnTwoState) -> Pairing {
        let [straight, crossed] = self.pairing_values(state);
        if crossed > straight {
            Pairing::Crossed
        } else {
            Pairing::Straight
        }
    }

    pub fn is_captured(&self, state: &TwoOnTwoState) -> bool {
        all_captured(
            &state.pursuers,
            &state.evaders,
            &state.pairing.assignment(),
            self.capture_radius,
            self.capture_tolerance,
        )
    }
}

impl Model for TwoOnTwo {
    type State = TwoOnTwoState;

    fn apply_dynamics(&self, state: &mut TwoOnTwoState, tick: Tick) {
        for agent in state.pursuers.iter_mut().chain(state.evaders.iter_mut()) {
            agent.advance(tick.dt);
        }
    }

    fn apply_control(&self, state: &mut TwoOnTwoState, tick: Tick) {
        let pairing = self.select_pairing(state);
        if pairing != state.pairing {
            log::debug!("t={:.2}: pairing {:?} -> {:?}", tick.time, state.pairing, pairing);
        }
        state.pairing = pairing;

        for pair in pairing.pairs() {
            let a = self.ratios.get(pair.pursuer, pair.evader);
            engage(
                &mut state.pursuers[pair.pursuer],
                &mut state.evaders[pair.evader],
                a,
            );
        }
    }

    fn running_cost(&self, _state: &TwoOnTwoState, tick: Tick) -> f64 {
        tick.dt
    }

    fn check_state(&self, state: &TwoOnTwoState) {
        let speeds_match = state
            .pursuers
            .iter()
            .zip(&self.pursuer_speeds)
            .chain(state.evaders.iter().zip(&self.evader_speeds))
            .all(|(agent, &speed)| agent.speed == speed);
        assert!(speeds_match, "agent speeds do not match the two-on-two game");
    }
}

impl Terminal for TwoOnTwo {
    fn is_over(&self, state: &TwoOnTwoState) -> bool {
        self.is_captured(state)
    }
}
