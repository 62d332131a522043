//! Fixed timestep driver
//!
//! Steps a [`DynSys`] once per tick until its game reports termination.

use serde::{Deserialize, Serialize};

use super::dynsys::{DynSys, Model};

/// Termination predicate of a game
pub trait Terminal: Model {
    /// True once the game has reached its terminal (capture) condition.
    fn is_over(&self, state: &Self::State) -> bool;
}

/// Result of a single driver tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// The system was stepped and the game goes on
    Running,
    /// The game is over; the system was not stepped
    Captured,
}

/// Summary of a complete run
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RunSummary {
    /// Steps taken during this run
    pub steps: u64,
    /// Simulation time at the end of the run
    pub time: f64,
    /// Total cost at the end of the run
    pub cost: f64,
    /// Whether the run ended in capture
    pub captured: bool,
}

pub struct Driver<M: Terminal> {
    system: DynSys<M>,
    dt: f64,
    steps: u64,
}

impl<M: Terminal> Driver<M> {
    /// Wrap `model` and `state`, priming the control law.
    pub fn new(model: M, state: M::State, dt: f64) -> Self {
        assert!(dt.is_finite() && dt > 0.0, "timestep must be positive, got {dt}");
        let mut system = DynSys::new(model, state);
        system.prime();
        Self {
            system,
            dt,
            steps: 0,
        }
    }

    /// Check termination, then advance one timestep if the game goes on.
    pub fn tick(&mut self) -> TickOutcome {
        if self.is_over() {
            return TickOutcome::Captured;
        }
        self.system.step(self.dt);
        self.steps += 1;
        TickOutcome::Running
    }

    /// Tick until capture or until `max_steps` steps have been taken.
    pub fn run(&mut self, max_steps: u64) -> RunSummary {
        let start = self.steps;
        let mut captured = false;
        while self.steps - start < max_steps {
            if self.tick() == TickOutcome::Captured {
                captured = true;
                break;
            }
        }
        // The budget may run out on the very step that captures
        captured = captured || self.is_over();

        let summary = self.summary(captured);
        if captured {
            log::info!(
                "Capture after {} steps ({:.2}s, cost {:.3})",
                summary.steps,
                summary.time,
                summary.cost
            );
        } else {
            log::info!("No capture within {} steps", max_steps);
        }
        summary
    }

    /// Restart from `state` with zero cost and time.
    pub fn reseed(&mut self, state: M::State) {
        self.system.reseed(state);
        self.system.prime();
        self.steps = 0;
        log::info!("Game reseeded");
    }

    pub fn is_over(&self) -> bool {
        self.system.model().is_over(self.system.state())
    }

    pub fn summary(&self, captured: bool) -> RunSummary {
        RunSummary {
            steps: self.steps,
            time: self.system.time(),
            cost: self.system.cost(),
            captured,
        }
    }

    pub fn system(&self) -> &DynSys<M> {
        &self.system
    }

    pub fn system_mut(&mut self) -> &mut DynSys<M> {
        &mut self.system
    }

    pub fn state(&self) -> &M::State {
        self.system.state()
    }

    pub fn steps(&self) -> u64 {
        self.steps
    }
}
