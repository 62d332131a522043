//! Headless runner for the pursuit-evasion games

use std::path::PathBuf;
use std::process::ExitCode;
use std::time::{SystemTime, UNIX_EPOCH};

use clap::{Args, Parser, Subcommand};
use glam::DVec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::Serialize;

use diffgames::config::SpeedRange;
use diffgames::game::{Npne, Particle, TwoOnTwo};
use diffgames::sim::{Driver, RunSummary, Terminal};
use diffgames::{Config, GameError};

#[derive(Debug, Parser)]
#[command(name = "diffgames", version, about = "Pursuit-evasion differential games")]
struct Cli {
    #[command(flatten)]
    common: CommonArgs,

    #[command(subcommand)]
    game: GameCommand,
}

#[derive(Debug, Args)]
struct CommonArgs {
    /// JSON configuration file; command-line options override it
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// RNG seed for random initial conditions. Without one, the seed comes
    /// from the configuration file, or from the clock if there is no file.
    #[arg(long, global = true)]
    seed: Option<u64>,

    /// Fixed timestep in seconds
    #[arg(long, global = true)]
    timestep: Option<f64>,

    /// Step budget before giving up
    #[arg(long, global = true)]
    max_steps: Option<u64>,

    /// Arena width
    #[arg(long, global = true)]
    width: Option<f64>,

    /// Arena height
    #[arg(long, global = true)]
    height: Option<f64>,

    /// Print the summary and final state as JSON
    #[arg(long, global = true)]
    json: bool,
}

#[derive(Debug, Subcommand)]
enum GameCommand {
    /// Two pursuers vs two evaders with fixed speeds
    TwoOnTwo,
    /// N pursuers vs N evaders with random speeds
    Npne {
        /// Agents per side
        #[arg(short = 'n', long)]
        agents: Option<usize>,

        /// Capture radius
        #[arg(short = 'r', long)]
        radius: Option<f64>,

        /// Pursuer speed range as MIN,MAX
        #[arg(long, value_parser = parse_range)]
        pursuer_speed: Option<SpeedRange>,

        /// Evader speed range as MIN,MAX
        #[arg(long, value_parser = parse_range)]
        evader_speed: Option<SpeedRange>,
    },
    /// A particle steering toward a fixed target
    Particle {
        #[arg(long)]
        speed: Option<f64>,

        #[arg(long, default_value_t = 128.0)]
        target_x: f64,

        #[arg(long, default_value_t = 128.0)]
        target_y: f64,
    },
}

fn parse_range(s: &str) -> Result<SpeedRange, String> {
    let (min, max) = s
        .split_once(',')
        .ok_or_else(|| format!("expected MIN,MAX, got '{s}'"))?;
    let parse = |v: &str| {
        v.trim()
            .parse::<f64>()
            .map_err(|e| format!("invalid speed '{v}': {e}"))
    };
    Ok(SpeedRange::new(parse(min)?, parse(max)?))
}

/// What gets printed with `--json`
#[derive(Serialize)]
struct Report<'a, S: Serialize> {
    game: &'a str,
    seed: u64,
    summary: RunSummary,
    state: &'a S,
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), GameError> {
    let mut config = match &cli.common.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };
    apply_common(&mut config, &cli.common);

    match cli.game {
        GameCommand::TwoOnTwo => {
            config.validate()?;
            let game = TwoOnTwo::new(&config.two_on_two)?;
            let mut rng = Pcg32::seed_from_u64(config.sim.seed);
            let state = game.random_state(&mut rng, &config.arena);
            play("two-on-two", game, state, &config, cli.common.json)
        }
        GameCommand::Npne {
            agents,
            radius,
            pursuer_speed,
            evader_speed,
        } => {
            if let Some(n) = agents {
                config.npne.agents = n;
            }
            if let Some(r) = radius {
                config.npne.capture_radius = r;
            }
            if let Some(range) = pursuer_speed {
                config.npne.pursuer_speed = range;
            }
            if let Some(range) = evader_speed {
                config.npne.evader_speed = range;
            }
            config.validate()?;
            let game = Npne::new(&config.npne)?;
            let mut rng = Pcg32::seed_from_u64(config.sim.seed);
            let state = game.random_state(&mut rng, &config.arena)?;
            play("npne", game, state, &config, cli.common.json)
        }
        GameCommand::Particle {
            speed,
            target_x,
            target_y,
        } => {
            if let Some(speed) = speed {
                config.particle.speed = speed;
            }
            config.validate()?;
            let game = Particle::new(&config.particle);
            let start = DVec2::new(config.arena.width, config.arena.height) * 0.5;
            let state = game.state_at(start, DVec2::new(target_x, target_y));
            play("particle", game, state, &config, cli.common.json)
        }
    }
}

fn apply_common(config: &mut Config, args: &CommonArgs) {
    match (args.seed, &args.config) {
        (Some(seed), _) => config.sim.seed = seed,
        (None, None) => config.sim.seed = clock_seed(),
        (None, Some(_)) => {}
    }
    if let Some(dt) = args.timestep {
        config.sim.timestep = dt;
    }
    if let Some(max_steps) = args.max_steps {
        config.sim.max_steps = max_steps;
    }
    if let Some(width) = args.width {
        config.arena.width = width;
    }
    if let Some(height) = args.height {
        config.arena.height = height;
    }
}

fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

fn play<M>(
    name: &str,
    game: M,
    state: M::State,
    config: &Config,
    json: bool,
) -> Result<(), GameError>
where
    M: Terminal,
    M::State: Serialize,
{
    log::info!("Starting {} with seed {}", name, config.sim.seed);
    let mut driver = Driver::new(game, state, config.sim.timestep);
    let summary = driver.run(config.sim.max_steps);

    if json {
        let report = Report {
            game: name,
            seed: config.sim.seed,
            summary,
            state: driver.state(),
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        let outcome = if summary.captured { "captured" } else { "not captured" };
        println!(
            "{name}: {outcome} after {} steps, t = {:.2}s, cost = {:.3}",
            summary.steps, summary.time, summary.cost
        );
    }
    Ok(())
}
