use crate::episode::HoldDurations;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_DATA_FILE: &str = "learning_data.bin";

#[derive(Clone, Copy, Debug)]
pub struct EpisodeSettings {
    pub max_ticks: u32,
    pub tick_interval: Duration,
    // time given to the game between the start command and the first
    // observation
    pub start_delay: Duration,
    pub hold_durations: HoldDurations,
}

impl Default for EpisodeSettings {
    fn default() -> Self {
        Self {
            max_ticks: 10_000,
            tick_interval: Duration::from_millis(10),
            start_delay: Duration::from_millis(500),
            hold_durations: HoldDurations::default(),
        }
    }
}

#[derive(Clone, Debug)]
pub struct TrainerSettings {
    pub episodes: u32,
    pub data_file: PathBuf,
    pub reset_attempts: u32,
    // delay before the second attempt, doubled for every further one
    pub reset_delay: Duration,
    pub episode_pause: Duration,
    pub episode: EpisodeSettings,
}

impl Default for TrainerSettings {
    fn default() -> Self {
        Self {
            episodes: 50,
            data_file: PathBuf::from(DEFAULT_DATA_FILE),
            reset_attempts: 3,
            reset_delay: Duration::from_secs(2),
            episode_pause: Duration::from_millis(500),
            episode: EpisodeSettings::default(),
        }
    }
}

#[derive(Clone, Debug)]
pub enum EnvSettings {
    Sim { realtime: bool },
    Remote { driver_addr: SocketAddr, timeout: Duration },
}

pub struct ActorSettings {
    pub trainer: TrainerSettings,
    pub env: EnvSettings,
    pub seed: Option<u64>,
}
