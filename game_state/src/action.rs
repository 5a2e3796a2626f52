use serde::{Deserialize, Serialize};

/// The choices available to the policy. The discriminants are the indices
/// into the value vector, and also the tie-break order of greedy selection.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    None = 0,
    Jump = 1,
    Duck = 2,
}

impl Action {
    pub const COUNT: usize = 3;
    pub const ALL: [Action; Action::COUNT] = [Action::None, Action::Jump, Action::Duck];
    pub const fn index(self) -> usize {
        self as usize
    }
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }
}

/// What actually gets sent to the game. `Start` and `Release` have no
/// counterpart in the value table; they are issued by the episode itself.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Command {
    Start,
    Jump,
    Duck,
    Release,
}

impl Command {
    pub fn for_action(action: Action) -> Option<Self> {
        match action {
            Action::None => None,
            Action::Jump => Some(Self::Jump),
            Action::Duck => Some(Self::Duck),
        }
    }
}
