mod action;
mod encoded_state;
mod observation;

pub use action::{Action, Command};
pub use encoded_state::{encode, EncodedState, ObstacleSlot, ParseStateError, SpeedBand};
pub use observation::{Observation, Obstacle, ObstacleKind};
