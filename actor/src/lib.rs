mod actor_settings;
pub mod args;
pub mod clock;
pub mod env;
pub mod episode;
mod error;
pub mod training;

pub use actor_settings::{
    ActorSettings, EnvSettings, EpisodeSettings, TrainerSettings, DEFAULT_DATA_FILE,
};
pub use args::Args;
pub use error::Error;
