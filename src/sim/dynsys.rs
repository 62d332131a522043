//! Generic dynamic system
//!
//! A system owns a state and a [`Model`] that knows how to move it forward.
//! One call to [`DynSys::step`] always does, in order:
//! 1. tally the running cost on the pre-step state
//! 2. apply the dynamics (non-control state variables)
//! 3. apply the control law (control variables, from the post-dynamics state)

use std::fmt;

/// Timing information handed to every model callback
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tick {
    /// Time advanced by this step (seconds)
    pub dt: f64,
    /// Simulation time before this step (seconds)
    pub time: f64,
}

/// Behaviour of a dynamic system
///
/// Only the dynamics are mandatory. A model without a control law runs from
/// its initial conditions; missing costs count as zero.
pub trait Model {
    type State;

    /// Integrate the non-control state variables over `tick.dt`.
    fn apply_dynamics(&self, state: &mut Self::State, tick: Tick);

    /// Recompute the control variables. Must not touch dynamics-owned state.
    fn apply_control(&self, _state: &mut Self::State, _tick: Tick) {}

    /// Cost incurred over a step of `tick.dt` starting from `state`.
    fn running_cost(&self, _state: &Self::State, _tick: Tick) -> f64 {
        0.0
    }

    /// Cost of ending the game in `state`.
    fn terminal_cost(&self, _state: &Self::State) -> f64 {
        0.0
    }

    /// Panic if `state` does not have the shape this model expects.
    fn check_state(&self, _state: &Self::State) {}
}

/// A model together with its state, accumulated cost and clock
pub struct DynSys<M: Model> {
    model: M,
    state: M::State,
    cost: f64,
    time: f64,
}

impl<M: Model> DynSys<M> {
    /// Panics if the model rejects the state's shape.
    pub fn new(model: M, state: M::State) -> Self {
        model.check_state(&state);
        Self {
            model,
            state,
            cost: 0.0,
            time: 0.0,
        }
    }

    /// Advance the system by `dt` seconds
    pub fn step(&mut self, dt: f64) {
        assert!(
            dt.is_finite() && dt >= 0.0,
            "timestep must be finite and non-negative, got {dt}"
        );
        let tick = Tick { dt, time: self.time };

        self.cost += self.model.running_cost(&self.state, tick);
        self.model.apply_dynamics(&mut self.state, tick);
        self.model.apply_control(&mut self.state, tick);

        self.time += dt;
    }

    /// Run the control law on the current state without advancing time.
    ///
    /// Used at game start so the first step already moves along the
    /// controlled headings.
    pub fn prime(&mut self) {
        let tick = Tick {
            dt: 0.0,
            time: self.time,
        };
        self.model.apply_control(&mut self.state, tick);
    }

    /// Total cost if the game ended now (running + terminal)
    pub fn cost(&self) -> f64 {
        self.cost + self.model.terminal_cost(&self.state)
    }

    /// Running cost accumulated so far
    pub fn running_cost_total(&self) -> f64 {
        self.cost
    }

    /// Elapsed simulation time
    pub fn time(&self) -> f64 {
        self.time
    }

    pub fn state(&self) -> &M::State {
        &self.state
    }

    /// Mutable access for driver inputs (e.g. a target point).
    pub fn state_mut(&mut self) -> &mut M::State {
        &mut self.state
    }

    pub fn model(&self) -> &M {
        &self.model
    }

    /// Restart from a fresh initial state, keeping the model.
    pub fn reseed(&mut self, state: M::State) {
        self.model.check_state(&state);
        self.state = state;
        self.cost = 0.0;
        self.time = 0.0;
    }
}

impl<M> fmt::Debug for DynSys<M>
where
    M: Model + fmt::Debug,
    M::State: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DynSys")
            .field("model", &self.model)
            .field("state", &self.state)
            .field("cost", &self.cost)
            .field("time", &self.time)
            .finish()
    }
}

type DynamicsFn = Box<dyn Fn(&mut [f64], Tick)>;
type RunCostFn = Box<dyn Fn(&[f64], Tick) -> f64>;
type TermCostFn = Box<dyn Fn(&[f64]) -> f64>;

/// Model over a flat, fixed-length state vector built from closures
pub struct FnModel {
    len: usize,
    dynamics: DynamicsFn,
    control: Option<DynamicsFn>,
    running_cost: Option<RunCostFn>,
    terminal_cost: Option<TermCostFn>,
}

impl FnModel {
    /// Start building a model whose state has exactly `len` entries
    pub fn builder(len: usize) -> FnModelBuilder {
        FnModelBuilder {
            len,
            dynamics: None,
            control: None,
            running_cost: None,
            terminal_cost: None,
        }
    }
}

impl fmt::Debug for FnModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnModel")
            .field("len", &self.len)
            .field("control", &self.control.is_some())
            .field("running_cost", &self.running_cost.is_some())
            .field("terminal_cost", &self.terminal_cost.is_some())
            .finish()
    }
}

impl Model for FnModel {
    type State = Vec<f64>;

    fn apply_dynamics(&self, state: &mut Vec<f64>, tick: Tick) {
        (self.dynamics)(state.as_mut_slice(), tick);
    }

    fn apply_control(&self, state: &mut Vec<f64>, tick: Tick) {
        if let Some(control) = &self.control {
            control(state.as_mut_slice(), tick);
        }
    }

    fn running_cost(&self, state: &Vec<f64>, tick: Tick) -> f64 {
        self.running_cost.as_ref().map_or(0.0, |g| g(state.as_slice(), tick))
    }

    fn terminal_cost(&self, state: &Vec<f64>) -> f64 {
        self.terminal_cost.as_ref().map_or(0.0, |q| q(state.as_slice()))
    }

    fn check_state(&self, state: &Vec<f64>) {
        assert_eq!(
            state.len(),
            self.len,
            "state vector has {} entries, model expects {}",
            state.len(),
            self.len
        );
    }
}

pub struct FnModelBuilder {
    len: usize,
    dynamics: Option<DynamicsFn>,
    control: Option<DynamicsFn>,
    running_cost: Option<RunCostFn>,
    terminal_cost: Option<TermCostFn>,
}

impl FnModelBuilder {
    pub fn dynamics(mut self, f: impl Fn(&mut [f64], Tick) + 'static) -> Self {
        self.dynamics = Some(Box::new(f));
        self
    }

    pub fn control(mut self, u: impl Fn(&mut [f64], Tick) + 'static) -> Self {
        self.control = Some(Box::new(u));
        self
    }

    pub fn running_cost(mut self, g: impl Fn(&[f64], Tick) -> f64 + 'static) -> Self {
        self.running_cost = Some(Box::new(g));
        self
    }

    pub fn terminal_cost(mut self, q: impl Fn(&[f64]) -> f64 + 'static) -> Self {
        self.terminal_cost = Some(Box::new(q));
        self
    }

    /// Panics if no dynamics function was given.
    pub fn build(self) -> FnModel {
        let Some(dynamics) = self.dynamics else {
            panic!("a dynamic system needs a dynamics function");
        };
        FnModel {
            len: self.len,
            dynamics,
            control: self.control,
            running_cost: self.running_cost,
            terminal_cost: self.terminal_cost,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    const X: usize = 0;
    const V: usize = 1;

    /// x' = v, v is the control
    fn integrator() -> FnModelBuilder {
        FnModel::builder(2).dynamics(|x, tick| x[X] += tick.dt * x[V])
    }

    #[test]
    fn test_step_order() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let (l1, l2, l3) = (log.clone(), log.clone(), log.clone());
        let model = FnModel::builder(2)
            .running_cost(move |x, _| {
                l1.borrow_mut().push(("cost", x[X]));
                0.0
            })
            .dynamics(move |x, tick| {
                l2.borrow_mut().push(("dynamics", x[X]));
                x[X] += tick.dt;
            })
            .control(move |x, _| l3.borrow_mut().push(("control", x[X])))
            .build();

        let mut sys = DynSys::new(model, vec![0.0, 0.0]);
        sys.step(1.0);

        // Cost and dynamics see the pre-step state, control sees post-dynamics
        assert_eq!(
            *log.borrow(),
            vec![("cost", 0.0), ("dynamics", 0.0), ("control", 1.0)]
        );
    }

    #[test]
    fn test_no_control_runs_open_loop() {
        let mut sys = DynSys::new(integrator().build(), vec![0.0, 2.0]);
        for _ in 0..10 {
            sys.step(0.5);
        }
        assert!((sys.state()[X] - 10.0).abs() < 1e-12);
        assert_eq!(sys.state()[V], 2.0);
        assert_eq!(sys.cost(), 0.0);
        assert!((sys.time() - 5.0).abs() < 1e-12);
    }

    #[test]
    fn test_control_sees_elapsed_time() {
        // v(t) = t, using the clock instead of hidden static state
        let model = integrator()
            .control(|x, tick| x[V] = tick.time + tick.dt)
            .build();
        let mut sys = DynSys::new(model, vec![0.0, 0.0]);
        sys.step(1.0);
        assert_eq!(sys.state()[V], 1.0);
        sys.step(1.0);
        assert_eq!(sys.state()[V], 2.0);
        assert_eq!(sys.state()[X], 1.0);
    }

    #[test]
    fn test_cost_without_terminal_is_accumulator() {
        let model = integrator().running_cost(|_, tick| tick.dt).build();
        let mut sys = DynSys::new(model, vec![0.0, 1.0]);
        for _ in 0..4 {
            sys.step(0.25);
        }
        assert_eq!(sys.cost(), sys.running_cost_total());
        assert_eq!(sys.cost(), 1.0);
    }

    #[test]
    fn test_terminal_cost_added_on_query() {
        let model = integrator()
            .running_cost(|_, tick| tick.dt)
            .terminal_cost(|x| x[X] * 10.0)
            .build();
        let mut sys = DynSys::new(model, vec![0.0, 1.0]);
        sys.step(0.5);
        assert_eq!(sys.running_cost_total(), 0.5);
        assert_eq!(sys.cost(), 0.5 + 5.0);
    }

    #[test]
    fn test_prime_does_not_advance() {
        let model = integrator()
            .running_cost(|_, _| 1.0)
            .control(|x, _| x[V] = 3.0)
            .build();
        let mut sys = DynSys::new(model, vec![0.0, 0.0]);
        sys.prime();
        assert_eq!(sys.state().as_slice(), &[0.0, 3.0]);
        assert_eq!(sys.cost(), 0.0);
        assert_eq!(sys.time(), 0.0);
    }

    #[test]
    fn test_reseed_clears_cost_and_time() {
        let model = integrator().running_cost(|x, tick| x[X] + tick.dt).build();
        let mut sys = DynSys::new(model, vec![5.0, 1.0]);
        for _ in 0..3 {
            sys.step(1.0);
        }
        assert!(sys.cost() > 0.0);

        sys.reseed(vec![-1.0, 0.0]);
        assert_eq!(sys.cost(), 0.0);
        assert_eq!(sys.time(), 0.0);
        assert_eq!(sys.state().as_slice(), &[-1.0, 0.0]);
    }

    #[test]
    #[should_panic(expected = "dynamics function")]
    fn test_missing_dynamics_panics() {
        let _ = FnModel::builder(2).control(|_, _| {}).build();
    }

    #[test]
    #[should_panic(expected = "model expects 3")]
    fn test_length_mismatch_panics() {
        let model = FnModel::builder(3).dynamics(|_, _| {}).build();
        let _ = DynSys::new(model, vec![0.0; 2]);
    }

    #[test]
    #[should_panic(expected = "timestep")]
    fn test_negative_dt_panics() {
        let mut sys = DynSys::new(integrator().build(), vec![0.0, 0.0]);
        sys.step(-0.1);
    }

    proptest! {
        #[test]
        fn cost_is_sum_of_pre_step_running_costs(
            v in -10.0f64..10.0,
            dts in proptest::collection::vec(0.0f64..0.1, 1..50),
        ) {
            // g(x, dt) = x * dt, evaluated before x moves
            let model = integrator().running_cost(|x, tick| x[X] * tick.dt).build();
            let mut sys = DynSys::new(model, vec![1.0, v]);

            let mut expected = 0.0;
            let mut x = 1.0;
            for &dt in &dts {
                expected += x * dt;
                x += dt * v;
                sys.step(dt);
            }
            prop_assert!((sys.cost() - expected).abs() < 1e-9);
            prop_assert_eq!(sys.cost(), sys.running_cost_total());
        }
    }
}
