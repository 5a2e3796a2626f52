mod agent_config;
mod policy;
mod q_table;
mod transition;

pub use agent_config::{AgentConfig, ConfigError};
pub use policy::{random_action, select_action};
pub use q_table::{ActionValues, QTable};
pub use transition::Transition;
