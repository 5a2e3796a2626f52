use super::{Obstacle, ObstacleKind, Observation};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SpeedBand {
    Low,
    Mid,
    High,
}

impl SpeedBand {
    pub fn from_speed(speed: f64) -> Self {
        if speed < 6.0 {
            Self::Low
        } else if speed < 9.0 {
            Self::Mid
        } else {
            Self::High
        }
    }
    fn label(self) -> &'static str {
        match self {
            Self::Low => "0-6",
            Self::Mid => "6-9",
            Self::High => "9+",
        }
    }
}

/// Discretized view of a single obstacle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObstacleSlot {
    pub type_id: u8,
    pub x_bin: i32,
    pub y_bin: u8,
}

impl ObstacleSlot {
    pub const ABSENT_TYPE_ID: u8 = 3;
    pub const ABSENT: ObstacleSlot = ObstacleSlot {
        type_id: Self::ABSENT_TYPE_ID,
        x_bin: 0,
        y_bin: 0,
    };
    const X_BIN_WIDTH: f64 = 20.0;
    pub fn from_obstacle(obstacle: &Obstacle) -> Self {
        Self {
            type_id: type_id(obstacle.kind),
            x_bin: x_bin(obstacle.x_pos),
            y_bin: y_bin(obstacle.y_pos),
        }
    }
    pub fn is_absent(&self) -> bool {
        self.type_id == Self::ABSENT_TYPE_ID
    }
}

fn type_id(kind: ObstacleKind) -> u8 {
    match kind {
        ObstacleKind::Small => 0,
        ObstacleKind::Large => 1,
        ObstacleKind::Flyer => 2,
        ObstacleKind::Unknown => ObstacleSlot::ABSENT_TYPE_ID,
    }
}

fn x_bin(x_pos: f64) -> i32 {
    // floor rather than truncation, so -5 lands in bin -1 and not bin 0.
    // the float to int cast saturates and maps NaN to 0, which keeps the
    // encoder total even for garbage positions
    (x_pos / ObstacleSlot::X_BIN_WIDTH).floor() as i32
}

fn y_bin(y_pos: f64) -> u8 {
    // the thresholds separate ground cacti from the flyer heights
    if y_pos < 40.0 {
        0
    } else if y_pos < 70.0 {
        1
    } else if y_pos < 100.0 {
        2
    } else {
        3
    }
}

/// The table key: speed band plus the two nearest obstacle slots.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EncodedState {
    pub speed: SpeedBand,
    pub nearest: ObstacleSlot,
    pub second: ObstacleSlot,
}

impl EncodedState {
    pub fn new(speed: SpeedBand, nearest: ObstacleSlot, second: ObstacleSlot) -> Self {
        Self {
            speed,
            nearest,
            second,
        }
    }
}

pub fn encode(observation: &Observation) -> EncodedState {
    let mut slots = observation
        .obstacles
        .iter()
        .map(ObstacleSlot::from_obstacle)
        .chain(std::iter::repeat(ObstacleSlot::ABSENT));
    // the chained repeat makes both of these infallible
    let nearest = slots.next().unwrap_or(ObstacleSlot::ABSENT);
    let second = slots.next().unwrap_or(ObstacleSlot::ABSENT);
    EncodedState::new(SpeedBand::from_speed(observation.speed), nearest, second)
}

impl fmt::Display for EncodedState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Self {
            speed,
            nearest: n,
            second: s,
        } = self;
        write!(
            f,
            "{}|{}|{}|{}|{}|{}|{}",
            speed.label(),
            n.type_id,
            n.x_bin,
            n.y_bin,
            s.type_id,
            s.x_bin,
            s.y_bin
        )
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("malformed state key '{key}'")]
pub struct ParseStateError {
    key: String,
}

impl FromStr for EncodedState {
    type Err = ParseStateError;
    fn from_str(key: &str) -> Result<Self, Self::Err> {
        let err = || ParseStateError {
            key: key.to_owned(),
        };
        let parts: Vec<&str> = key.split('|').collect();
        let [speed, n_type, n_x, n_y, s_type, s_x, s_y] = parts[..] else {
            return Err(err());
        };
        let speed = match speed {
            "0-6" => SpeedBand::Low,
            "6-9" => SpeedBand::Mid,
            "9+" => SpeedBand::High,
            _ => return Err(err()),
        };
        let slot = |type_id: &str, x: &str, y: &str| -> Result<ObstacleSlot, ParseStateError> {
            let slot = ObstacleSlot {
                type_id: type_id.parse().map_err(|_| err())?,
                x_bin: x.parse().map_err(|_| err())?,
                y_bin: y.parse().map_err(|_| err())?,
            };
            if slot.type_id > ObstacleSlot::ABSENT_TYPE_ID || slot.y_bin > 3 {
                return Err(err());
            }
            Ok(slot)
        };
        let state = Self::new(speed, slot(n_type, n_x, n_y)?, slot(s_type, s_x, s_y)?);
        // only the canonical spelling, so "+2" or "02" can't alias "2"
        if state.to_string() != key {
            return Err(err());
        }
        Ok(state)
    }
}
