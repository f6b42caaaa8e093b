use std::fmt;
use std::str::FromStr;

mod duel;
pub use duel::*;
mod random;
pub use random::*;

use crate::env::{Direction, InputError, MoveRequest};

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub enum Agent {
    Duel(DuelAgent),
    Random(RandomAgent),
}

impl Default for Agent {
    fn default() -> Self {
        Self::Duel(DuelAgent::default())
    }
}

impl Agent {
    /// Decides the next move, in the frame of the requesting player.
    pub async fn step(&self, request: &MoveRequest) -> Result<Direction, InputError> {
        match self {
            Agent::Duel(agent) => agent.step(request).await,
            Agent::Random(agent) => agent.step(request).await,
        }
    }
}

impl FromStr for Agent {
    type Err = serde_json::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        serde_json::from_str(s)
    }
}

impl fmt::Display for Agent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", serde_json::to_string(self).unwrap_or_default())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn parse_agents() {
        let agent: Agent = r#"{"Duel": {"depth": 6}}"#.parse().unwrap();
        match agent {
            Agent::Duel(duel) => {
                assert_eq!(duel.search.depth, 6);
                assert_eq!(duel.timeout_ms, 1000);
            }
            _ => panic!("expected duel agent"),
        }

        let agent: Agent = r#"{"Random": null}"#.parse().unwrap();
        assert!(matches!(agent, Agent::Random(_)));

        assert!("{}".parse::<Agent>().is_err());
    }

    #[test]
    fn display_round_trip() {
        let agent = Agent::default();
        let parsed: Agent = agent.to_string().parse().unwrap();
        assert!(matches!(parsed, Agent::Duel(_)));
    }
}
