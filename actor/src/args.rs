use crate::episode::HoldDurations;
use crate::{ActorSettings, EnvSettings, EpisodeSettings, TrainerSettings, DEFAULT_DATA_FILE};
use clap::{Parser, ValueEnum};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum EnvKind {
    /// Built-in simulated runner game.
    Sim,
    /// Browser driver reachable over tcp.
    Remote,
}

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Number of episodes to play in this session.
    #[arg(short, long, default_value_t = 50)]
    pub episodes: u32,
    /// File the table and hyperparameters are loaded from and saved to.
    /// A `.json` extension selects json, anything else bincode.
    #[arg(short, long, default_value = DEFAULT_DATA_FILE)]
    pub data_file: PathBuf,
    /// Which game to play against.
    #[arg(long, value_enum, default_value_t = EnvKind::Sim)]
    pub env: EnvKind,
    /// Address of the browser driver (only used with `--env remote`).
    #[arg(long, default_value = "127.0.0.1:43431")]
    pub driver_addr: SocketAddr,
    /// Seed for exploration and the simulated game. Random when omitted.
    #[arg(long)]
    pub seed: Option<u64>,
    /// Ticks after which an episode is cut off.
    #[arg(long, default_value_t = 10_000)]
    pub max_ticks: u32,
    #[arg(long, default_value_t = 10)]
    pub tick_interval_ms: u64,
    #[arg(long, default_value_t = 120)]
    pub jump_hold_ms: u64,
    #[arg(long, default_value_t = 150)]
    pub duck_hold_ms: u64,
    /// How many times a fresh game is requested before giving up.
    #[arg(long, default_value_t = 3)]
    pub reset_attempts: u32,
    /// Wait after the first failed reset; doubles after each further failure.
    #[arg(long, default_value_t = 2000)]
    pub reset_delay_ms: u64,
    #[arg(long, default_value_t = 500)]
    pub episode_pause_ms: u64,
    #[arg(long, default_value_t = 5000)]
    pub driver_timeout_ms: u64,
    /// Pace the simulated game with the wall clock instead of running it as
    /// fast as possible.
    #[arg(long)]
    pub realtime: bool,
}

impl Args {
    pub fn settings(&self) -> ActorSettings {
        let episode = EpisodeSettings {
            max_ticks: self.max_ticks,
            tick_interval: Duration::from_millis(self.tick_interval_ms),
            hold_durations: HoldDurations {
                jump: Duration::from_millis(self.jump_hold_ms),
                duck: Duration::from_millis(self.duck_hold_ms),
            },
            ..EpisodeSettings::default()
        };
        let trainer = TrainerSettings {
            episodes: self.episodes,
            data_file: self.data_file.clone(),
            reset_attempts: self.reset_attempts.max(1),
            reset_delay: Duration::from_millis(self.reset_delay_ms),
            episode_pause: Duration::from_millis(self.episode_pause_ms),
            episode,
        };
        let env = match self.env {
            EnvKind::Sim => EnvSettings::Sim {
                realtime: self.realtime,
            },
            EnvKind::Remote => EnvSettings::Remote {
                driver_addr: self.driver_addr,
                timeout: Duration::from_millis(self.driver_timeout_ms),
            },
        };
        ActorSettings {
            trainer,
            env,
            seed: self.seed,
        }
    }
}
