use super::action_hold::{ActionHold, HoldDurations};
use super::reward::{reward, Reward};
use super::{Done, Status};
use game_state::{encode, Action, Command, EncodedState, Observation};
use model::{select_action, AgentConfig, QTable, Transition};
use rand::Rng;
use std::time::Instant;

/// Per-episode memory of the controller: the previous (state, action) pair,
/// the pass streak, the running totals and the action hold.
///
/// `step` is the whole per-tick state machine. It never touches the
/// environment; it only says what to send, so it can be driven directly
/// with hand-made observations.
pub struct BasicEpisode {
    previous: Option<(EncodedState, Action)>,
    hold: ActionHold,
    hold_durations: HoldDurations,
    consecutive_passes: u32,
    reward: f64,
    obstacles_passed: u32,
    bootstrapped_updates: u32,
    terminal_updates: u32,
}

impl BasicEpisode {
    pub fn new(hold_durations: HoldDurations) -> Self {
        Self {
            previous: None,
            hold: ActionHold::Idle,
            hold_durations,
            consecutive_passes: 0,
            reward: 0.0,
            obstacles_passed: 0,
            bootstrapped_updates: 0,
            terminal_updates: 0,
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
        let state = encode(observation);
        let previous_state = self.previous.map(|(state, _)| state);
        let Reward { value, passed } = reward(
            previous_state.as_ref(),
            &state,
            observation.crashed,
            self.consecutive_passes,
        );
        self.reward += value;
        if passed {
            self.obstacles_passed += 1;
            self.consecutive_passes += 1;
        }
        if let Some((previous_state, previous_action)) = self.previous {
            let transition = Transition {
                state: previous_state,
                action: previous_action,
                reward: value,
                next_state: state,
                terminated: observation.crashed,
            };
            table.learn(&transition, config);
            if observation.crashed {
                self.terminal_updates += 1;
            } else {
                self.bootstrapped_updates += 1;
            }
        }
        if observation.crashed {
            return (Status::Done(Done::Crashed), None);
        }
        // the update above has already landed, so the choice sees this
        // tick's learning
        let action = select_action(table.get(&state), config.epsilon, rng);
        let command = self.hold.next_command(action, now, &self.hold_durations);
        self.previous = Some((state, action));
        (Status::Running, command)
    }
    pub fn reward(&self) -> f64 {
        self.reward
    }
    pub fn obstacles_passed(&self) -> u32 {
        self.obstacles_passed
    }
    pub fn bootstrapped_updates(&self) -> u32 {
        self.bootstrapped_updates
    }
    pub fn terminal_updates(&self) -> u32 {
        self.terminal_updates
    }
    pub fn is_holding(&self) -> bool {
        self.hold.is_holding()
    }
}
