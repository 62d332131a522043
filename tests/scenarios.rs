//! End-to-end game runs through the public API

use diffgames::config::{ArenaConfig, NpneConfig, ParticleConfig, TwoOnTwoConfig};
use diffgames::game::{Npne, Pairing, Particle, TwoOnTwo, TwoOnTwoState};
use diffgames::sim::{Driver, DynSys, FnModel, TickOutcome};
use diffgames::{Config, GameError};
use glam::DVec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

const DT: f64 = 0.01;

fn two_on_two() -> (TwoOnTwo, TwoOnTwoState) {
    let game = TwoOnTwo::new(&TwoOnTwoConfig::default()).expect("default config is valid");
    // E1 is equidistant from both pursuers
    let state = game.state_at(
        [DVec2::new(0.0, 0.0), DVec2::new(100.0, 0.0)],
        [DVec2::new(50.0, 50.0), DVec2::new(100.0, 40.0)],
    );
    (game, state)
}

#[test]
fn test_two_on_two_capture() {
    let (game, state) = two_on_two();
    let mut driver = Driver::new(game, state, DT);
    assert_eq!(driver.state().pairing, Pairing::Straight);

    let radius = 10.0;
    let mut last = driver.state().pair_distances();
    let mut captured = false;
    for _ in 0..1_000 {
        if driver.tick() == TickOutcome::Captured {
            captured = true;
            break;
        }
        let state = driver.state();
        assert_eq!(state.pairing, Pairing::Straight);
        let now = state.pair_distances();
        for k in 0..2 {
            if last[k] > radius {
                assert!(now[k] < last[k], "pair {k} distance grew: {} -> {}", last[k], now[k]);
            }
        }
        last = now;
    }

    assert!(captured, "no capture within 1000 steps");
    assert!(driver.is_over());
    // Pair 1 starts ~70.7 apart and closes ~0.43 per step
    assert!(driver.steps() > 100 && driver.steps() < 200, "{} steps", driver.steps());

    let summary = driver.summary(true);
    assert!((summary.time - driver.steps() as f64 * DT).abs() < 1e-9);
    assert!((summary.cost - summary.time).abs() < 1e-9);
}

#[test]
fn test_run_matches_manual_ticks() {
    let (game, state) = two_on_two();
    let mut manual = Driver::new(game.clone(), state.clone(), DT);
    while manual.tick() == TickOutcome::Running {}

    let mut driver = Driver::new(game, state, DT);
    let summary = driver.run(10_000);
    assert!(summary.captured);
    assert_eq!(summary.steps, manual.steps());
    assert_eq!(driver.state(), manual.state());
}

#[test]
fn test_reseed_resets_cost_and_time() {
    let (game, state) = two_on_two();
    let mut sys = DynSys::new(game.clone(), state);
    sys.prime();
    for _ in 0..50 {
        sys.step(DT);
    }
    assert!(sys.cost() > 0.0);

    let fresh = game.random_state(&mut Pcg32::seed_from_u64(3), &ArenaConfig::default());
    sys.reseed(fresh.clone());
    assert_eq!(sys.cost(), 0.0);
    assert_eq!(sys.time(), 0.0);
    assert_eq!(sys.state(), &fresh);
}

#[test]
fn test_driver_reseed_starts_a_new_game() {
    let (game, state) = two_on_two();
    let mut driver = Driver::new(game.clone(), state, DT);
    let first = driver.run(10_000);
    assert!(first.captured);

    let fresh = game.random_state(&mut Pcg32::seed_from_u64(8), &ArenaConfig::default());
    driver.reseed(fresh.clone());
    assert_eq!(driver.steps(), 0);
    assert_eq!(driver.system().cost(), 0.0);
    assert_eq!(driver.system().time(), 0.0);
    for (a, b) in driver.state().pursuers.iter().zip(&fresh.pursuers) {
        assert_eq!(a.pos, b.pos);
    }
    for (a, b) in driver.state().evaders.iter().zip(&fresh.evaders) {
        assert_eq!(a.pos, b.pos);
    }
}

#[test]
fn test_npne_from_json_config() {
    let config = Config::from_json(
        r#"{
            "sim": { "seed": 21 },
            "npne": {
                "agents": 2,
                "capture_radius": 1.0,
                "pursuer_speed": { "min": 35.0, "max": 40.0 },
                "evader_speed": { "min": 10.0, "max": 15.0 }
            }
        }"#,
    )
    .expect("valid config");
    let game = Npne::new(&config.npne).expect("valid game");
    let mut rng = Pcg32::seed_from_u64(config.sim.seed);
    let state = game.random_state(&mut rng, &config.arena).expect("state");

    let mut driver = Driver::new(game, state, config.sim.timestep);
    let summary = driver.run(config.sim.max_steps);
    assert!(summary.captured);

    let state = driver.state();
    let model = driver.system().model();
    for &pair in model.current_assignment(state).pairs() {
        assert!(state.pair_distance(pair) <= 1.0 + config.npne.capture_tolerance);
    }
}

#[test]
fn test_npne_rejects_fast_evaders() {
    let config = NpneConfig {
        evader_speed: diffgames::config::SpeedRange::new(20.0, 35.0),
        ..NpneConfig::default()
    };
    assert!(matches!(
        Npne::new(&config),
        Err(GameError::OverlappingSpeeds { .. })
    ));
}

#[test]
fn test_particle_never_terminates() {
    let game = Particle::new(&ParticleConfig::default());
    let state = game.state_at(DVec2::ZERO, DVec2::new(10.0, 0.0));
    let mut driver = Driver::new(game, state, DT);
    let summary = driver.run(500);
    assert!(!summary.captured);
    assert_eq!(summary.steps, 500);
    // Stays around the target once reached
    assert!((driver.state().particle.pos - DVec2::new(10.0, 0.0)).length() <= 0.5 + 1e-9);
}

#[test]
fn test_flat_state_model() {
    // Point mass with a velocity feedback law: x' = v, v := -x
    let model = FnModel::builder(2)
        .dynamics(|s, tick| s[0] += s[1] * tick.dt)
        .control(|s, _| s[1] = -s[0])
        .running_cost(|s, tick| s[0] * s[0] * tick.dt)
        .build();
    let mut sys = DynSys::new(model, vec![1.0, 0.0]);
    sys.prime();
    for _ in 0..100 {
        sys.step(DT);
    }
    let x = sys.state()[0];
    assert!(x > 0.0 && x < 1.0);
    assert!((x - 0.99f64.powi(100)).abs() < 1e-12);
    assert!(sys.cost() > 0.0);
}
