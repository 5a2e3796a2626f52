use super::BasicEpisode;
use super::{Done, Status};
use game_state::{Command, Observation};
use model::{AgentConfig, QTable};
use rand::Rng;
use std::time::Instant;

pub struct TickLimitedWrapper {
    episode: BasicEpisode,
    ticks: u32,
    max_ticks: u32,
}

impl TickLimitedWrapper {
    pub fn new(episode: BasicEpisode, max_ticks: u32) -> Self {
        Self {
            episode,
            ticks: 0,
            max_ticks,
        }
    }
    pub fn step<R: Rng + ?Sized>(
        &mut self,
        observation: &Observation,
        table: &mut QTable,
        config: &AgentConfig,
        rng: &mut R,
        now: Instant,
    ) -> (Status, Option<Command>) {
        self.ticks += 1;
        let (status, command) = self.episode.step(observation, table, config, rng, now);
        match status {
            // the command of the last allowed tick is still sent so a hold
            // that happens to end here gets its release
            Status::Running if self.tick_limit_reached() => {
                (Status::Done(Done::TickLimit), command)
            }
            Status::Running | Status::Done(_) => (status, command),
        }
    }
    fn tick_limit_reached(&self) -> bool {
        self.ticks >= self.max_ticks
    }
    pub fn ticks(&self) -> u32 {
        self.ticks
    }
    pub fn episode(&self) -> &BasicEpisode {
        &self.episode
    }
}
