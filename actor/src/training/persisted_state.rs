use super::{ActorSchedule, TrainingStats};
use bincode::Options;
use file_io::{has_data_left, open_file_buf_read, replace_file_atomically};
use model::{AgentConfig, ConfigError, QTable};
use serde::{Deserialize, Serialize};
use std::io;
use std::path::Path;
use thiserror::Error;
use tracing::{info, warn};

#[derive(Error, Debug)]
pub enum PersistError {
    #[error("i/o failed: {0}")]
    Io(#[from] io::Error),
    #[error("bincode payload is malformed: {0}")]
    Bincode(#[from] bincode::Error),
    #[error("json payload is malformed: {0}")]
    Json(#[from] serde_json::Error),
    #[error("deserialization of file didn't reach EOF")]
    TrailingData,
    #[error("stored hyperparameters are invalid: {0}")]
    InvalidConfig(#[from] ConfigError),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Format {
    Bincode,
    Json,
}

impl Format {
    fn of(path: &Path) -> Self {
        match path.extension() {
            Some(ext) if ext.eq_ignore_ascii_case("json") => Self::Json,
            _ => Self::Bincode,
        }
    }
}

/// Everything that has to survive between sessions, laid out flat the way the
/// data file stores it.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PersistedState {
    pub q_table: QTable,
    pub alpha: f64,
    pub gamma: f64,
    pub epsilon: f64,
    pub epsilon_decay: f64,
    pub epsilon_min: f64,
    pub episodes: u64,
    pub total_obstacles_passed: u64,
}

impl PersistedState {
    pub fn from_parts(q_table: QTable, schedule: &ActorSchedule) -> Self {
        let config = schedule.config();
        let stats = schedule.stats();
        Self {
            q_table,
            alpha: config.alpha,
            gamma: config.gamma,
            epsilon: config.epsilon,
            epsilon_decay: config.epsilon_decay,
            epsilon_min: config.epsilon_min,
            episodes: stats.episodes_completed,
            total_obstacles_passed: stats.total_obstacles_passed,
        }
    }
    pub fn config(&self) -> AgentConfig {
        AgentConfig {
            alpha: self.alpha,
            gamma: self.gamma,
            epsilon: self.epsilon,
            epsilon_decay: self.epsilon_decay,
            epsilon_min: self.epsilon_min,
        }
    }
    pub fn into_parts(self) -> (QTable, ActorSchedule) {
        let schedule = ActorSchedule::new(
            self.config(),
            TrainingStats {
                episodes_completed: self.episodes,
                total_obstacles_passed: self.total_obstacles_passed,
            },
        );
        (self.q_table, schedule)
    }
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), PersistError> {
        let path = path.as_ref();
        let format = Format::of(path);
        replace_file_atomically(path, |writer| match format {
            Format::Bincode => bincode::serialize_into(writer, self)
                .map_err(|e| io::Error::new(io::ErrorKind::Other, e)),
            Format::Json => {
                serde_json::to_writer_pretty(&mut *writer, self)?;
                Ok(())
            }
        })?;
        Ok(())
    }
    /// `Ok(None)` when there is no file yet.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Option<Self>, PersistError> {
        let path = path.as_ref();
        let mut file = match open_file_buf_read(path) {
            Ok(file) => file,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        let state: Self = match Format::of(path) {
            Format::Bincode => {
                // a corrupt length prefix must not turn into a huge allocation,
                // so nothing may claim more bytes than the file holds
                let limit = file.get_ref().metadata()?.len();
                let state = bincode::DefaultOptions::new()
                    .with_fixint_encoding()
                    .allow_trailing_bytes()
                    .with_limit(limit)
                    .deserialize_from(&mut file)?;
                if has_data_left(&mut file)? {
                    return Err(PersistError::TrailingData);
                }
                state
            }
            // serde_json already rejects anything but whitespace after the value
            Format::Json => serde_json::from_reader(file)?,
        };
        state.config().validate()?;
        Ok(Some(state))
    }
    /// Loads the state, starting over from defaults when the file is missing
    /// or unusable. A bad file is left in place; the next save replaces it.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref();
        match Self::load(path) {
            Ok(Some(state)) => {
                info!(
                    "loaded {} states after {} episodes from {}",
                    state.q_table.len(),
                    state.episodes,
                    path.display()
                );
                state
            }
            Ok(None) => {
                info!("no saved state at {}, starting fresh", path.display());
                Self::fresh()
            }
            Err(err) => {
                warn!("ignoring unreadable state at {}: {err}", path.display());
                Self::fresh()
            }
        }
    }
    fn fresh() -> Self {
        Self::from_parts(QTable::new(), &ActorSchedule::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use game_state::{encode, Action, Obstacle, ObstacleKind, Observation};
    use std::fs;

    fn sample() -> PersistedState {
        let mut table = QTable::new();
        for (i, x_pos) in [15.0, 95.0, 310.0].into_iter().enumerate() {
            let observation = Observation {
                speed: 7.0,
                obstacles: vec![Obstacle::new(ObstacleKind::Large, x_pos, 90.0)],
                ..Observation::default()
            };
            let values = table.get(&encode(&observation));
            values[Action::Jump] = 0.1 * i as f64 - 1.0 / 3.0;
            values[Action::Duck] = -2.5e-7;
        }
        let config = AgentConfig {
            epsilon: 0.42,
            ..AgentConfig::default()
        };
        let stats = TrainingStats {
            episodes_completed: 12,
            total_obstacles_passed: 31,
        };
        PersistedState::from_parts(table, &ActorSchedule::new(config, stats))
    }

    #[test]
    fn fresh_state_has_documented_defaults() {
        let state = PersistedState::fresh();
        assert!(state.q_table.is_empty());
        assert_eq!(state.config(), AgentConfig::default());
        assert_eq!(state.episodes, 0);
        assert_eq!(state.total_obstacles_passed, 0);
    }

    #[test]
    fn bincode_file_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("learning_data.bin");
        let state = sample();
        state.save(&path).unwrap();
        assert_eq!(PersistedState::load(&path).unwrap(), Some(state));
    }

    #[test]
    fn json_file_round_trips_with_documented_field_names() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("learning_data.json");
        let state = sample();
        state.save(&path).unwrap();
        let raw: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        for field in [
            "q_table",
            "alpha",
            "gamma",
            "epsilon",
            "epsilon_decay",
            "epsilon_min",
            "episodes",
            "total_obstacles_passed",
        ] {
            assert!(raw.get(field).is_some(), "missing {field}");
        }
        assert_eq!(raw["q_table"].as_object().unwrap().len(), 3);
        assert_eq!(PersistedState::load(&path).unwrap(), Some(state));
    }

    #[test]
    fn missing_file_is_not_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.bin");
        assert_eq!(PersistedState::load(&path).unwrap(), None);
        assert_eq!(PersistedState::load_or_default(&path), PersistedState::fresh());
    }

    #[test]
    fn trailing_bytes_count_as_corruption() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("learning_data.bin");
        sample().save(&path).unwrap();
        let mut bytes = fs::read(&path).unwrap();
        bytes.push(0);
        fs::write(&path, bytes).unwrap();
        assert!(matches!(
            PersistedState::load(&path),
            Err(PersistError::TrailingData)
        ));
    }

    #[test]
    fn invalid_hyperparameters_count_as_corruption() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("learning_data.json");
        let mut state = sample();
        state.alpha = 0.0;
        state.save(&path).unwrap();
        assert!(matches!(
            PersistedState::load(&path),
            Err(PersistError::InvalidConfig(_))
        ));
        assert_eq!(PersistedState::load_or_default(&path), PersistedState::fresh());
    }

    #[test]
    fn garbage_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("learning_data.bin");
        fs::write(&path, b"\x01\x02not a table").unwrap();
        assert!(PersistedState::load(&path).is_err());
        assert_eq!(PersistedState::load_or_default(&path), PersistedState::fresh());
    }
}
