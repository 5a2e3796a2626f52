mod action_hold;
mod basic_episode;
pub mod reward;
mod status;
mod tick_limited_wrapper;

pub use action_hold::{ActionHold, HoldDurations};
pub use basic_episode::BasicEpisode;
pub use status::{Done, Status};
pub use tick_limited_wrapper::TickLimitedWrapper;

use crate::clock::Clock;
use crate::env::{EnvError, Environment};
use crate::EpisodeSettings;
use game_state::Command;
use model::{AgentConfig, QTable};
use rand::Rng;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EpisodeOutcome {
    pub reward: f64,
    pub obstacles_passed: u32,
    pub ticks: u32,
    pub end: Done,
    pub bootstrapped_updates: u32,
    pub terminal_updates: u32,
}

/// Plays one episode against `env`, learning into `table` as it goes.
///
/// Updates applied before an `observe` failure stay in the table; the error
/// only means the episode has no outcome.
pub fn run_episode<E, C, R>(
    env: &mut E,
    table: &mut QTable,
    config: &AgentConfig,
    settings: &EpisodeSettings,
    clock: &C,
    rng: &mut R,
) -> Result<EpisodeOutcome, EnvError>
where
    E: Environment + ?Sized,
    C: Clock + ?Sized,
    R: Rng + ?Sized,
{
    env.issue(Command::Start);
    clock.sleep(settings.start_delay);
    let mut episode = TickLimitedWrapper::new(
        BasicEpisode::new(settings.hold_durations),
        settings.max_ticks,
    );
    loop {
        let observation = env.observe()?;
        let (status, command) = episode.step(&observation, table, config, rng, clock.now());
        if let Some(command) = command {
            env.issue(command);
        }
        if let Status::Done(end) = status {
            let basic = episode.episode();
            return Ok(EpisodeOutcome {
                reward: basic.reward(),
                obstacles_passed: basic.obstacles_passed(),
                ticks: episode.ticks(),
                end,
                bootstrapped_updates: basic.bootstrapped_updates(),
                terminal_updates: basic.terminal_updates(),
            });
        }
        clock.sleep(settings.tick_interval);
    }
}
