use super::{AgentConfig, Transition};
use game_state::{Action, EncodedState};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::{BTreeMap, HashMap};
use std::ops::{Index, IndexMut};

/// Value estimates for every action in one state, indexed by `Action`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ActionValues([f64; Action::COUNT]);

impl ActionValues {
    pub fn max(&self) -> f64 {
        self.0.iter().copied().fold(f64::NEG_INFINITY, f64::max)
    }
    pub fn best_action(&self) -> Action {
        // strict comparison keeps the first maximum, which makes the
        // scan order (none, jump, duck) the tie-break
        let mut best = Action::None;
        for action in Action::ALL {
            if self[action] > self[best] {
                best = action;
            }
        }
        best
    }
}

impl From<[f64; Action::COUNT]> for ActionValues {
    fn from(values: [f64; Action::COUNT]) -> Self {
        Self(values)
    }
}

impl Index<Action> for ActionValues {
    type Output = f64;
    fn index(&self, action: Action) -> &f64 {
        &self.0[action.index()]
    }
}

impl IndexMut<Action> for ActionValues {
    fn index_mut(&mut self, action: Action) -> &mut f64 {
        &mut self.0[action.index()]
    }
}

/// Sparse map from encoded state to action values. Entries are created
/// lazily as zeros and are never removed.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct QTable {
    values: HashMap<EncodedState, ActionValues>,
}

impl QTable {
    pub fn new() -> Self {
        Self::default()
    }
    /// Returns the values for `state`, inserting zeros if the state is new.
    pub fn get(&mut self, state: &EncodedState) -> &mut ActionValues {
        self.values.entry(*state).or_default()
    }
    pub fn peek(&self, state: &EncodedState) -> Option<&ActionValues> {
        self.values.get(state)
    }
    pub fn len(&self) -> usize {
        self.values.len()
    }
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
    /// One-step Q-learning:
    /// Q(s,a) += alpha * (r + gamma * max_a' Q(s',a') - Q(s,a)),
    /// with the bootstrap term dropped for terminated transitions.
    /// Returns the new value of Q(s,a).
    pub fn learn(&mut self, transition: &Transition, config: &AgentConfig) -> f64 {
        let target = if transition.terminated {
            transition.reward
        } else {
            let future_best = self.get(&transition.next_state).max();
            transition.reward + config.gamma * future_best
        };
        let value = &mut self.get(&transition.state)[transition.action];
        *value += config.alpha * (target - *value);
        *value
    }
}

impl FromIterator<(EncodedState, ActionValues)> for QTable {
    fn from_iter<I: IntoIterator<Item = (EncodedState, ActionValues)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}

// on disk the table is keyed by the text form of the state, which keeps the
// file readable as json and independent of the struct layout. keys are
// written in sorted order so that saving the same table twice produces the
// same bytes
impl Serialize for QTable {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let sorted: BTreeMap<&EncodedState, &ActionValues> = self.values.iter().collect();
        serializer.collect_map(
            sorted
                .into_iter()
                .map(|(state, values)| (state.to_string(), values)),
        )
    }
}

impl<'de> Deserialize<'de> for QTable {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = HashMap::<String, ActionValues>::deserialize(deserializer)?;
        raw.into_iter()
            .map(|(key, values)| {
                key.parse::<EncodedState>()
                    .map(|state| (state, values))
                    .map_err(D::Error::custom)
            })
            .collect()
    }
}
