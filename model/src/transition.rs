use game_state::{Action, EncodedState};

/// One observed step: acting with `action` in `state` yielded `reward` and
/// led to `next_state`. A terminated transition has no successor worth
/// evaluating, so `next_state` is ignored when learning from it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transition {
    pub state: EncodedState,
    pub action: Action,
    pub reward: f64,
    pub next_state: EncodedState,
    pub terminated: bool,
}
