use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("{name} = {value} is outside {range}")]
    OutOfRange {
        name: &'static str,
        value: f64,
        range: &'static str,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct AgentConfig {
    pub alpha: f64,
    pub gamma: f64,
    pub epsilon: f64,
    pub epsilon_decay: f64,
    pub epsilon_min: f64,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            alpha: 0.1,
            gamma: 0.9,
            epsilon: 1.0,
            epsilon_decay: 0.99,
            epsilon_min: 0.05,
        }
    }
}

fn check(
    name: &'static str,
    value: f64,
    range: &'static str,
    ok: impl Fn(f64) -> bool,
) -> Result<(), ConfigError> {
    // NaN fails every comparison, so it is rejected here too
    if ok(value) {
        Ok(())
    } else {
        Err(ConfigError::OutOfRange { name, value, range })
    }
}

impl AgentConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        check("alpha", self.alpha, "(0, 1]", |v| v > 0.0 && v <= 1.0)?;
        check("gamma", self.gamma, "[0, 1]", |v| (0.0..=1.0).contains(&v))?;
        check("epsilon", self.epsilon, "[0, 1]", |v| (0.0..=1.0).contains(&v))?;
        check("epsilon_decay", self.epsilon_decay, "(0, 1]", |v| {
            v > 0.0 && v <= 1.0
        })?;
        check("epsilon_min", self.epsilon_min, "[0, 1]", |v| {
            (0.0..=1.0).contains(&v)
        })
    }
    /// Multiplicative decay, clamped from below by `epsilon_min`.
    pub fn decay_epsilon(&mut self) {
        self.epsilon = (self.epsilon * self.epsilon_decay).max(self.epsilon_min);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = AgentConfig::default();
        assert_eq!(config.alpha, 0.1);
        assert_eq!(config.gamma, 0.9);
        assert_eq!(config.epsilon, 1.0);
        assert_eq!(config.epsilon_decay, 0.99);
        assert_eq!(config.epsilon_min, 0.05);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn out_of_range_values_are_rejected() {
        let bad = [
            AgentConfig {
                alpha: 0.0,
                ..AgentConfig::default()
            },
            AgentConfig {
                gamma: 1.5,
                ..AgentConfig::default()
            },
            AgentConfig {
                epsilon: f64::NAN,
                ..AgentConfig::default()
            },
            AgentConfig {
                epsilon_decay: 0.0,
                ..AgentConfig::default()
            },
            AgentConfig {
                epsilon_min: -0.1,
                ..AgentConfig::default()
            },
        ];
        for config in bad {
            assert!(config.validate().is_err(), "{config:?}");
        }
    }

    #[test]
    fn epsilon_decays_monotonically_to_the_floor() {
        let mut config = AgentConfig {
            epsilon: 0.1,
            epsilon_decay: 0.5,
            epsilon_min: 0.03,
            ..AgentConfig::default()
        };
        config.decay_epsilon();
        assert!((config.epsilon - 0.05).abs() < 1e-12);
        config.decay_epsilon();
        assert_eq!(config.epsilon, 0.03);
        config.decay_epsilon();
        assert_eq!(config.epsilon, 0.03);
    }
}
