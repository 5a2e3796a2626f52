use crate::training::PersistError;
use model::ConfigError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("game session could not be established after {attempts} attempts")]
    EnvironmentUnavailable { attempts: u32 },
    #[error("failed to persist learning state: {0}")]
    Persist(#[from] PersistError),
    #[error("invalid agent configuration: {0}")]
    Config(#[from] ConfigError),
}
