use game_state::{Command, Observation};
use serde::{Deserialize, Serialize};

/// Sent by the actor to the game driver.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(tag = "request", rename_all = "snake_case")]
pub enum DriverRequest {
    Observe,
    // fire-and-forget, the driver doesn't answer these
    Issue { command: Command },
    Reset,
}

/// Sent by the game driver in response to `Observe` and `Reset`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(tag = "reply", rename_all = "snake_case")]
pub enum DriverReply {
    Observation(Observation),
    Reset { ready: bool },
}

#[cfg(test)]
mod tests {
    use super::*;
    use game_state::{Obstacle, ObstacleKind};

    #[test]
    fn request_wire_format() {
        let cases = [
            (DriverRequest::Observe, r#"{"request":"observe"}"#),
            (
                DriverRequest::Issue {
                    command: Command::Release,
                },
                r#"{"request":"issue","command":"release"}"#,
            ),
            (DriverRequest::Reset, r#"{"request":"reset"}"#),
        ];
        for (request, expected) in cases {
            assert_eq!(serde_json::to_string(&request).unwrap(), expected);
            assert_eq!(
                serde_json::from_str::<DriverRequest>(expected).unwrap(),
                request
            );
        }
    }

    #[test]
    fn observation_reply_is_flattened_into_the_tag() {
        let json = r#"{"reply":"observation","crashed":true,"speed":9.5,
            "obstacles":[{"xPos":12,"yPos":75,"type":"PTERODACTYL"}],"distanceRan":88}"#;
        let reply: DriverReply = serde_json::from_str(json).unwrap();
        assert_eq!(
            reply,
            DriverReply::Observation(Observation {
                crashed: true,
                speed: 9.5,
                obstacles: vec![Obstacle::new(ObstacleKind::Flyer, 12.0, 75.0)],
                distance: 88.0,
            })
        );
    }

    #[test]
    fn reset_reply() {
        let reply: DriverReply =
            serde_json::from_str(r#"{"reply":"reset","ready":false}"#).unwrap();
        assert_eq!(reply, DriverReply::Reset { ready: false });
    }
}
