mod actor_schedule;
mod persisted_state;

pub use actor_schedule::{ActorSchedule, TrainingStats};
pub use persisted_state::{PersistError, PersistedState};

use crate::clock::Clock;
use crate::env::Environment;
use crate::episode::{run_episode, EpisodeOutcome};
use crate::{Error, TrainerSettings};
use model::QTable;
use rand::Rng;
use tracing::{debug, info, warn};

#[derive(Clone, Debug, PartialEq)]
pub struct TrainingReport {
    pub outcomes: Vec<EpisodeOutcome>,
    pub stats: TrainingStats,
    pub epsilon: f64,
}

/// Owns the table and the schedule and lends them to one episode at a time.
pub struct Trainer<C: Clock, R: Rng> {
    settings: TrainerSettings,
    table: QTable,
    schedule: ActorSchedule,
    clock: C,
    rng: R,
}

impl<C: Clock, R: Rng> Trainer<C, R> {
    pub fn new(
        settings: TrainerSettings,
        state: PersistedState,
        clock: C,
        rng: R,
    ) -> Result<Self, Error> {
        state.config().validate()?;
        let (table, schedule) = state.into_parts();
        Ok(Self {
            settings,
            table,
            schedule,
            clock,
            rng,
        })
    }
    /// Picks up where the data file left off, or starts fresh.
    pub fn load(settings: TrainerSettings, clock: C, rng: R) -> Result<Self, Error> {
        let state = PersistedState::load_or_default(&settings.data_file);
        Self::new(settings, state, clock, rng)
    }
    pub fn table(&self) -> &QTable {
        &self.table
    }
    pub fn schedule(&self) -> &ActorSchedule {
        &self.schedule
    }
    pub fn run<E: Environment + ?Sized>(&mut self, env: &mut E) -> Result<TrainingReport, Error> {
        self.establish(env)?;
        let mut outcomes = Vec::new();
        for episode in 0..self.settings.episodes {
            let config = *self.schedule.config();
            let result = run_episode(
                env,
                &mut self.table,
                &config,
                &self.settings.episode,
                &self.clock,
                &mut self.rng,
            );
            match result {
                Ok(outcome) => {
                    self.schedule.complete_episode(outcome.obstacles_passed);
                    info!(
                        "episode {} finished. reward = {:.2}, obstacles = {}, epsilon = {:.3}",
                        self.schedule.stats().episodes_completed,
                        outcome.reward,
                        outcome.obstacles_passed,
                        self.schedule.eps()
                    );
                    outcomes.push(outcome);
                }
                // whatever was learned before the failure is kept and saved
                Err(err) => warn!("episode aborted, not counted: {err}"),
            }
            self.save()?;
            if episode + 1 < self.settings.episodes {
                self.establish(env)?;
                self.clock.sleep(self.settings.episode_pause);
            }
        }
        info!("all {} episodes completed", self.settings.episodes);
        Ok(TrainingReport {
            outcomes,
            stats: *self.schedule.stats(),
            epsilon: self.schedule.eps(),
        })
    }
    fn establish<E: Environment + ?Sized>(&mut self, env: &mut E) -> Result<(), Error> {
        let attempts = self.settings.reset_attempts.max(1);
        let mut delay = self.settings.reset_delay;
        for attempt in 1..=attempts {
            debug!("reset attempt {attempt}/{attempts}");
            if env.reset() {
                return Ok(());
            }
            if attempt < attempts {
                warn!("retry {attempt}/{attempts}: game not ready, trying again in {delay:?}");
                self.clock.sleep(delay);
                delay = delay.saturating_mul(2);
            }
        }
        Err(Error::EnvironmentUnavailable { attempts })
    }
    pub fn save(&self) -> Result<(), Error> {
        PersistedState::from_parts(self.table.clone(), &self.schedule)
            .save(&self.settings.data_file)?;
        Ok(())
    }
}
