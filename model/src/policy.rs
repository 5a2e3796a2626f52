use super::ActionValues;
use game_state::Action;
use rand::Rng;

pub fn random_action<R: Rng + ?Sized>(rng: &mut R) -> Action {
    Action::ALL[rng.gen_range(0..Action::COUNT)]
}

/// Epsilon-greedy selection. Greedy ties go to the lowest action index.
pub fn select_action<R: Rng + ?Sized>(values: &ActionValues, epsilon: f64, rng: &mut R) -> Action {
    if rng.gen::<f64>() < epsilon {
        random_action(rng)
    } else {
        values.best_action()
    }
}
