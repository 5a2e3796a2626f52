use game_state::{Action, Command};
use std::time::{Duration, Instant};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HoldDurations {
    pub jump: Duration,
    pub duck: Duration,
}

impl Default for HoldDurations {
    fn default() -> Self {
        Self {
            jump: Duration::from_millis(120),
            duck: Duration::from_millis(150),
        }
    }
}

impl HoldDurations {
    fn of(&self, action: Action) -> Option<Duration> {
        match action {
            Action::None => None,
            Action::Jump => Some(self.jump),
            Action::Duck => Some(self.duck),
        }
    }
}

/// Jump and duck are timed gestures rather than per-tick toggles: once one
/// is issued, nothing else is sent until its timer runs out and the release
/// goes out.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ActionHold {
    Idle,
    Holding { action: Action, release_at: Instant },
}

impl ActionHold {
    pub fn is_holding(&self) -> bool {
        matches!(self, Self::Holding { .. })
    }
    /// Decides what (if anything) to send this tick, given the action the
    /// policy chose and the current time.
    pub fn next_command(
        &mut self,
        chosen: Action,
        now: Instant,
        durations: &HoldDurations,
    ) -> Option<Command> {
        match *self {
            Self::Idle => {
                let command = Command::for_action(chosen)?;
                let duration = durations.of(chosen)?;
                *self = Self::Holding {
                    action: chosen,
                    release_at: now + duration,
                };
                Some(command)
            }
            // the choice made on a releasing tick is not issued, the next
            // tick chooses again from an idle hold
            Self::Holding { release_at, .. } if now >= release_at => {
                *self = Self::Idle;
                Some(Command::Release)
            }
            Self::Holding { .. } => None,
        }
    }
}
