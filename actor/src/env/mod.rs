mod remote;
mod sim;

use game_state::{Command, Observation};
use std::io;
use std::time::Duration;
use thiserror::Error;

pub use remote::RemoteEnv;
pub use sim::{SimEnv, SimSettings};

#[derive(Error, Debug)]
pub enum EnvError {
    #[error("driver i/o failed: {0}")]
    Io(#[from] io::Error),
    #[error("driver did not answer within {0:?}")]
    Timeout(Duration),
    #[error("driver answered {got} where {expected} was expected")]
    UnexpectedReply { expected: &'static str, got: String },
}

/// The game as seen by the learning core.
pub trait Environment {
    /// Reads the current game state.
    fn observe(&mut self) -> Result<Observation, EnvError>;
    /// Sends a command without waiting for any acknowledgement.
    fn issue(&mut self, command: Command);
    /// Tries to bring up a fresh, playable session. The caller decides how
    /// often to retry.
    fn reset(&mut self) -> bool;
}
