//! N pursuers vs N evaders
//!
//! Every control step evaluates all N! assignments, keeps the one with the
//! largest summed aim value, and steers each of its pairs along the
//! pairwise law. The chosen index is stored in the state so the capture
//! check uses exactly the assignment that was used to steer.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::agent::Agent;
use super::assignment::{Assignment, AssignmentSet, Pair};
use super::capture::all_captured;
use super::pursuit::{RatioTable, aim_value, engage};
use crate::config::{ArenaConfig, NpneConfig};
use crate::error::GameError;
use crate::sim::{Model, Terminal, Tick};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NpneState {
    pub pursuers: Vec<Agent>,
    pub evaders: Vec<Agent>,
    /// Index into the game's assignment set chosen by the latest control step
    pub assignment: usize,
    ratios: RatioTable,
}

impl NpneState {
    /// Fails if the sides differ in size or any evader is not strictly
    /// slower than every pursuer.
    pub fn new(pursuers: Vec<Agent>, evaders: Vec<Agent>) -> Result<Self, GameError> {
        if pursuers.is_empty() {
            return Err(GameError::NoAgents);
        }
        assert_eq!(
            pursuers.len(),
            evaders.len(),
            "the assignment game needs as many evaders as pursuers"
        );
        let ratios = RatioTable::for_agents(&pursuers, &evaders)?;
        Ok(Self {
            pursuers,
            evaders,
            assignment: 0,
            ratios,
        })
    }

    pub fn n(&self) -> usize {
        self.pursuers.len()
    }

    pub fn ratios(&self) -> &RatioTable {
        &self.ratios
    }

    /// `y_ij` for one pair at the current positions
    pub fn pair_value(&self, pair: Pair) -> f64 {
        aim_value(
            self.pursuers[pair.pursuer].pos,
            self.evaders[pair.evader].pos,
            self.ratios.get(pair.pursuer, pair.evader),
        )
    }

    pub fn pair_distance(&self, pair: Pair) -> f64 {
        self.pursuers[pair.pursuer].distance_to(&self.evaders[pair.evader])
    }
}

#[derive(Debug, Clone)]
pub struct Npne {
    assignments: AssignmentSet,
    capture_radius: f64,
    capture_tolerance: f64,
    config: NpneConfig,
}

impl Npne {
    pub fn new(config: &NpneConfig) -> Result<Self, GameError> {
        config.validate()?;
        let assignments = AssignmentSet::enumerate(config.agents);
        log::info!(
            "N = {} game: {} assignments, capture radius {}",
            config.agents,
            assignments.len(),
            config.capture_radius
        );
        Ok(Self {
            assignments,
            capture_radius: config.capture_radius,
            capture_tolerance: config.capture_tolerance,
            config: *config,
        })
    }

    pub fn n(&self) -> usize {
        self.assignments.n()
    }

    pub fn assignments(&self) -> &AssignmentSet {
        &self.assignments
    }

    /// Assignment recorded in `state` by the latest control step
    pub fn current_assignment(&self, state: &NpneState) -> &Assignment {
        self.assignments.get(state.assignment)
    }

    /// Random positions in the arena and random speeds from the configured
    /// ranges.
    pub fn random_state<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        arena: &ArenaConfig,
    ) -> Result<NpneState, GameError> {
        let n = self.n();
        let pursuers = (0..n)
            .map(|_| Agent::random(rng, arena, &self.config.pursuer_speed))
            .collect();
        let evaders = (0..n)
            .map(|_| Agent::random(rng, arena, &self.config.evader_speed))
            .collect();
        NpneState::new(pursuers, evaders)
    }

    /// Index and value of the assignment maximizing `Y` for `state`
    pub fn best_assignment(&self, state: &NpneState) -> (usize, f64) {
        self.assignments
            .best_with_value(|pair| state.pair_value(pair))
    }

    pub fn is_captured(&self, state: &NpneState) -> bool {
        all_captured(
            &state.pursuers,
            &state.evaders,
            self.current_assignment(state),
            self.capture_radius,
            self.capture_tolerance,
        )
    }
}

impl Model for Npne {
    type State = NpneState;

    fn apply_dynamics(&self, state: &mut NpneState, tick: Tick) {
        for agent in state.pursuers.iter_mut().chain(state.evaders.iter_mut()) {
            agent.advance(tick.dt);
        }
    }

    fn apply_control(&self, state: &mut NpneState, tick: Tick) {
        let (best, value) = self.best_assignment(state);
        if best != state.assignment {
            log::debug!(
                "t={:.2}: assignment {} -> {} (Y = {:.3})",
                tick.time,
                state.assignment,
                best,
                value
            );
        }
        state.assignment = best;

        for &pair in self.assignments.get(best).pairs() {
            let a = state.ratios.get(pair.pursuer, pair.evader);
            engage(
                &mut state.pursuers[pair.pursuer],
                &mut state.evaders[pair.evader],
                a,
            );
        }
        log::trace!("t={:.2}: Y = {:.3}", tick.time, value);
    }

    fn running_cost(&self, _state: &NpneState, tick: Tick) -> f64 {
        tick.dt
    }

    fn check_state(&self, state: &NpneState) {
        assert_eq!(
            state.n(),
            self.n(),
            "state has {} agents per side, game expects {}",
            state.n(),
            self.n()
        );
        assert!(state.assignment < self.assignments.len());
    }
}

impl Terminal for Npne {
    fn is_over(&self, state: &NpneState) -> bool {
        self.is_captured(state)
    }
}
