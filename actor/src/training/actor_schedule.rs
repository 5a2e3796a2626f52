use model::AgentConfig;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrainingStats {
    pub episodes_completed: u64,
    pub total_obstacles_passed: u64,
}

/// Hyperparameters plus the counters that move once per finished episode.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ActorSchedule {
    config: AgentConfig,
    stats: TrainingStats,
}

impl ActorSchedule {
    pub fn new(config: AgentConfig, stats: TrainingStats) -> Self {
        Self { config, stats }
    }
    pub fn eps(&self) -> f64 {
        self.config.epsilon
    }
    pub fn config(&self) -> &AgentConfig {
        &self.config
    }
    pub fn stats(&self) -> &TrainingStats {
        &self.stats
    }
    pub fn complete_episode(&mut self, obstacles_passed: u32) {
        self.stats.episodes_completed += 1;
        self.stats.total_obstacles_passed += u64::from(obstacles_passed);
        self.config.decay_epsilon();
    }
}
