use actor::clock::{Clock, ManualClock, SystemClock};
use actor::env::{Environment, RemoteEnv, SimEnv, SimSettings};
use actor::training::{Trainer, TrainingReport};
use actor::{ActorSettings, Args, EnvSettings, TrainerSettings};
use anyhow::Context;
use clap::Parser;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::process::ExitCode;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

fn train<E, C>(
    settings: TrainerSettings,
    env: &mut E,
    clock: C,
    rng: StdRng,
) -> anyhow::Result<TrainingReport>
where
    E: Environment,
    C: Clock,
{
    let mut trainer = Trainer::load(settings, clock, rng)?;
    let report = trainer.run(env).context("training stopped early")?;
    Ok(report)
}

fn run(settings: ActorSettings) -> anyhow::Result<TrainingReport> {
    let mut rng = match settings.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    match settings.env {
        // the game and the trainer share one clock, so a manual clock lets
        // the simulation run as fast as the cpu allows
        EnvSettings::Sim { realtime: false } => {
            let clock = ManualClock::new();
            let sim_rng = StdRng::seed_from_u64(rng.gen());
            let mut env = SimEnv::new(SimSettings::default(), clock.clone(), sim_rng);
            train(settings.trainer, &mut env, clock, rng)
        }
        EnvSettings::Sim { realtime: true } => {
            let sim_rng = StdRng::seed_from_u64(rng.gen());
            let mut env = SimEnv::new(SimSettings::default(), SystemClock, sim_rng);
            train(settings.trainer, &mut env, SystemClock, rng)
        }
        EnvSettings::Remote {
            driver_addr,
            timeout,
        } => {
            info!("using browser driver at {driver_addr}");
            let mut env = RemoteEnv::new(driver_addr, timeout);
            train(settings.trainer, &mut env, SystemClock, rng)
        }
    }
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();
    let args = Args::parse();
    match run(args.settings()) {
        Ok(report) => {
            info!(
                "{} episodes played in total, {} obstacles passed, epsilon = {:.3}",
                report.stats.episodes_completed,
                report.stats.total_obstacles_passed,
                report.epsilon
            );
            ExitCode::SUCCESS
        }
        Err(err) => {
            error!("{err:#}");
            ExitCode::FAILURE
        }
    }
}
