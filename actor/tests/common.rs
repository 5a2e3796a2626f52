#![allow(dead_code)]

use actor::clock::{Clock, ManualClock};
use actor::env::{EnvError, Environment};
use game_state::{Command, Obstacle, ObstacleKind, Observation};
use std::collections::VecDeque;
use std::io;
use std::time::Instant;

pub fn small_at(x_pos: f64) -> Observation {
    Observation {
        speed: 6.5,
        obstacles: vec![Obstacle::new(ObstacleKind::Small, x_pos, 105.0)],
        ..Observation::default()
    }
}

pub fn clear() -> Observation {
    Observation {
        speed: 6.5,
        ..Observation::default()
    }
}

pub fn crashed() -> Observation {
    Observation {
        crashed: true,
        ..small_at(40.0)
    }
}

/// Plays back one fixed list of observations per episode. Once a script runs
/// dry the last observation is repeated; an empty script makes `observe` fail.
pub struct ScriptedEnv {
    clock: ManualClock,
    script: Vec<Observation>,
    pending: VecDeque<Observation>,
    last: Option<Observation>,
    observed: usize,
    // when set, observe fails after this many successes in an episode
    pub fail_after: Option<usize>,
    pub issued: Vec<(Instant, Command)>,
    pub resets: u32,
    // reset() answers from the front of this list, then `true` forever
    pub reset_answers: VecDeque<bool>,
}

impl ScriptedEnv {
    pub fn new(clock: ManualClock, script: Vec<Observation>) -> Self {
        let pending = script.iter().cloned().collect();
        Self {
            clock,
            script,
            pending,
            last: None,
            observed: 0,
            fail_after: None,
            issued: Vec::new(),
            resets: 0,
            reset_answers: VecDeque::new(),
        }
    }
    pub fn commands(&self) -> Vec<Command> {
        self.issued.iter().map(|(_, command)| *command).collect()
    }
}

impl Environment for ScriptedEnv {
    fn observe(&mut self) -> Result<Observation, EnvError> {
        if self.fail_after.is_some_and(|limit| self.observed >= limit) {
            return Err(EnvError::Io(io::Error::new(
                io::ErrorKind::ConnectionReset,
                "driver went away",
            )));
        }
        self.observed += 1;
        if let Some(next) = self.pending.pop_front() {
            self.last = Some(next);
        }
        self.last.clone().ok_or_else(|| {
            EnvError::Io(io::Error::new(io::ErrorKind::BrokenPipe, "script is empty"))
        })
    }
    fn issue(&mut self, command: Command) {
        self.issued.push((self.clock.now(), command));
    }
    fn reset(&mut self) -> bool {
        self.resets += 1;
        let ready = self.reset_answers.pop_front().unwrap_or(true);
        if ready {
            self.pending = self.script.iter().cloned().collect();
            self.last = None;
            self.observed = 0;
        }
        ready
    }
}
