use game_state::EncodedState;

pub const CRASH_PENALTY: f64 = -10.0;
pub const ALIVE_BONUS: f64 = 0.01;
pub const PASS_BONUS: f64 = 1.0;
pub const STREAK_BONUS: f64 = 0.5;
pub const STREAK_LENGTH: u32 = 3;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Reward {
    pub value: f64,
    pub passed: bool,
}

/// Heuristic pass signal: the nearest slot held a real obstacle and now
/// holds a different type or nothing at all.
///
/// Only the type is compared. An obstacle drifting into another x bin is the
/// same obstacle, not a pass. The heuristic can still misfire when two
/// different obstacle types follow each other closely, which is accepted.
pub fn obstacle_passed(previous: &EncodedState, current: &EncodedState) -> bool {
    let before = previous.nearest;
    let after = current.nearest;
    !before.is_absent() && (after.type_id != before.type_id || after.is_absent())
}

/// Reward for arriving in `current` from `previous`.
///
/// `consecutive_passes` is the streak before this tick; the caller owns it and
/// bumps it whenever the returned reward reports a pass.
pub fn reward(
    previous: Option<&EncodedState>,
    current: &EncodedState,
    crashed: bool,
    consecutive_passes: u32,
) -> Reward {
    if crashed {
        return Reward {
            value: CRASH_PENALTY,
            passed: false,
        };
    }
    let passed = previous.is_some_and(|previous| obstacle_passed(previous, current));
    let mut value = ALIVE_BONUS;
    if passed {
        value += PASS_BONUS;
        if (consecutive_passes + 1) % STREAK_LENGTH == 0 {
            value += STREAK_BONUS;
        }
    }
    Reward { value, passed }
}

#[cfg(test)]
mod tests {
    use super::*;
    use game_state::{ObstacleSlot, SpeedBand};

    fn slot(type_id: u8, x_bin: i32) -> ObstacleSlot {
        ObstacleSlot {
            type_id,
            x_bin,
            y_bin: 3,
        }
    }

    fn with_nearest(nearest: ObstacleSlot) -> EncodedState {
        EncodedState::new(SpeedBand::Mid, nearest, ObstacleSlot::ABSENT)
    }

    #[test]
    fn crash_overrides_everything() {
        let previous = with_nearest(slot(0, 2));
        let current = with_nearest(ObstacleSlot::ABSENT);
        let reward = reward(Some(&previous), &current, true, 2);
        assert_eq!(reward.value, -10.0);
        assert!(!reward.passed);
    }

    #[test]
    fn first_tick_gets_alive_bonus_only() {
        let current = with_nearest(slot(1, 5));
        assert_eq!(
            reward(None, &current, false, 0),
            Reward {
                value: 0.01,
                passed: false
            }
        );
    }

    #[test]
    fn disappearing_obstacle_is_a_pass() {
        let previous = with_nearest(slot(0, 2));
        let current = with_nearest(ObstacleSlot::ABSENT);
        let reward = reward(Some(&previous), &current, false, 0);
        assert!(reward.passed);
        assert!((reward.value - 1.01).abs() < 1e-12);
    }

    #[test]
    fn type_change_is_a_pass() {
        let previous = with_nearest(slot(0, 0));
        let current = with_nearest(slot(2, 9));
        assert!(obstacle_passed(&previous, &current));
    }

    #[test]
    fn rebinning_alone_is_not_a_pass() {
        let previous = with_nearest(slot(0, 2));
        let current = with_nearest(slot(0, 0));
        assert!(!obstacle_passed(&previous, &current));
        let reward = reward(Some(&previous), &current, false, 0);
        assert_eq!(reward.value, 0.01);
    }

    #[test]
    fn nothing_to_pass_when_previous_slot_was_empty() {
        let previous = with_nearest(ObstacleSlot::ABSENT);
        let current = with_nearest(slot(1, 20));
        assert!(!obstacle_passed(&previous, &current));
    }

    #[test]
    fn every_third_consecutive_pass_earns_the_streak_bonus() {
        let previous = with_nearest(slot(0, 1));
        let current = with_nearest(ObstacleSlot::ABSENT);
        let values: Vec<f64> = (0..6)
            .map(|streak| reward(Some(&previous), &current, false, streak).value)
            .collect();
        let expected = [1.01, 1.01, 1.51, 1.01, 1.01, 1.51];
        for (value, expected) in values.iter().zip(expected) {
            assert!((value - expected).abs() < 1e-12, "{values:?}");
        }
    }
}
