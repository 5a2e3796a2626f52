use serde::{Deserialize, Deserializer, Serialize};

// an explicit null from the driver means the same as a missing field
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

// the driver reports whatever type name the game uses, so anything we don't
// recognize (including null or a missing field) becomes Unknown
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "Option<String>")]
pub enum ObstacleKind {
    #[serde(rename = "CACTUS_SMALL")]
    Small,
    #[serde(rename = "CACTUS_LARGE")]
    Large,
    #[serde(rename = "PTERODACTYL")]
    Flyer,
    #[default]
    #[serde(rename = "UNKNOWN")]
    Unknown,
}

impl From<Option<String>> for ObstacleKind {
    fn from(name: Option<String>) -> Self {
        match name.as_deref() {
            Some("CACTUS_SMALL") => Self::Small,
            Some("CACTUS_LARGE") => Self::Large,
            Some("PTERODACTYL") => Self::Flyer,
            _ => Self::Unknown,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Obstacle {
    #[serde(rename = "xPos", deserialize_with = "null_as_default")]
    pub x_pos: f64,
    #[serde(rename = "yPos", deserialize_with = "null_as_default")]
    pub y_pos: f64,
    #[serde(rename = "type")]
    pub kind: ObstacleKind,
}

impl Obstacle {
    pub fn new(kind: ObstacleKind, x_pos: f64, y_pos: f64) -> Self {
        Self { x_pos, y_pos, kind }
    }
}

/// One snapshot of the game, read once per tick and then dropped.
///
/// Every field has a default so a driver that leaves something out still
/// produces a usable observation.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Observation {
    #[serde(deserialize_with = "null_as_default")]
    pub crashed: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub speed: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub obstacles: Vec<Obstacle>,
    #[serde(
        rename = "distanceRan",
        alias = "distance",
        deserialize_with = "null_as_default"
    )]
    pub distance: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_driver_payload() {
        let json = r#"{
            "crashed": false,
            "speed": 6.5,
            "obstacles": [
                {"xPos": 120.5, "yPos": 105, "type": "CACTUS_SMALL"},
                {"xPos": 300, "yPos": 50, "type": "PTERODACTYL"}
            ],
            "distanceRan": 412.0
        }"#;
        let observation: Observation = serde_json::from_str(json).unwrap();
        assert!(!observation.crashed);
        assert_eq!(observation.speed, 6.5);
        assert_eq!(observation.distance, 412.0);
        assert_eq!(
            observation.obstacles,
            vec![
                Obstacle::new(ObstacleKind::Small, 120.5, 105.0),
                Obstacle::new(ObstacleKind::Flyer, 300.0, 50.0),
            ]
        );
    }

    #[test]
    fn unknown_or_missing_fields_fall_back_to_defaults() {
        let json = r#"{
            "speed": 7,
            "obstacles": [{"xPos": 10, "type": "BOULDER"}, {"yPos": 3}, {"type": null}],
            "distance": 1.5
        }"#;
        let observation: Observation = serde_json::from_str(json).unwrap();
        assert!(!observation.crashed);
        assert_eq!(observation.distance, 1.5);
        assert_eq!(observation.obstacles[0].kind, ObstacleKind::Unknown);
        assert_eq!(observation.obstacles[0].y_pos, 0.0);
        assert_eq!(observation.obstacles[1].kind, ObstacleKind::Unknown);
        assert_eq!(observation.obstacles[1].x_pos, 0.0);
        assert_eq!(observation.obstacles[2].kind, ObstacleKind::Unknown);
    }

    #[test]
    fn null_fields_fall_back_to_defaults() {
        let json = r#"{
            "crashed": null,
            "speed": null,
            "obstacles": [{"xPos": null, "yPos": null, "type": "CACTUS_LARGE"}],
            "distanceRan": null
        }"#;
        let observation: Observation = serde_json::from_str(json).unwrap();
        assert!(!observation.crashed);
        assert_eq!(observation.speed, 0.0);
        assert_eq!(observation.distance, 0.0);
        assert_eq!(
            observation.obstacles,
            vec![Obstacle::new(ObstacleKind::Large, 0.0, 0.0)]
        );

        let observation: Observation =
            serde_json::from_str(r#"{"speed": 6.0, "obstacles": null}"#).unwrap();
        assert_eq!(observation.speed, 6.0);
        assert!(observation.obstacles.is_empty());
    }

    #[test]
    fn empty_object_is_an_empty_observation() {
        let observation: Observation = serde_json::from_str("{}").unwrap();
        assert_eq!(observation, Observation::default());
    }
}
