use crate::domain_model::UserId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Closeness tier of a friendship, in promotion order.
#[derive(Debug, Clone, Copy, Ord, PartialOrd, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FriendshipLevel {
    Conhecido,
    Vizinho,
    AmigoVaranda,
}

impl FriendshipLevel {
    pub const ALL: [FriendshipLevel; 3] = [
        FriendshipLevel::Conhecido,
        FriendshipLevel::Vizinho,
        FriendshipLevel::AmigoVaranda,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FriendshipLevel::Conhecido => "conhecido",
            FriendshipLevel::Vizinho => "vizinho",
            FriendshipLevel::AmigoVaranda => "amigo_varanda",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            FriendshipLevel::Conhecido => "Conhecido da Praça",
            FriendshipLevel::Vizinho => "Vizinho Próximo",
            FriendshipLevel::AmigoVaranda => "Amigo da Varanda",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            FriendshipLevel::Conhecido => "Vocês se cruzam pela praça",
            FriendshipLevel::Vizinho => "Amizade confirmada",
            FriendshipLevel::AmigoVaranda => "Amizade especial",
        }
    }

    pub fn emoji(&self) -> &'static str {
        match self {
            FriendshipLevel::Conhecido => "🏡",
            FriendshipLevel::Vizinho => "🌳",
            FriendshipLevel::AmigoVaranda => "🌟",
        }
    }

    /// The tier a friendship would be promoted to, if any.
    pub fn next(&self) -> Option<FriendshipLevel> {
        match self {
            FriendshipLevel::Conhecido => Some(FriendshipLevel::Vizinho),
            FriendshipLevel::Vizinho => Some(FriendshipLevel::AmigoVaranda),
            FriendshipLevel::AmigoVaranda => None,
        }
    }
}

impl fmt::Display for FriendshipLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FriendshipLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "conhecido" => Ok(FriendshipLevel::Conhecido),
            "vizinho" => Ok(FriendshipLevel::Vizinho),
            "amigo_varanda" => Ok(FriendshipLevel::AmigoVaranda),
            other => Err(format!("unknown friendship level: {other}")),
        }
    }
}

/// Counters of a friendship as maintained by the store.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize)]
pub struct FriendshipStats {
    pub level: FriendshipLevel,
    pub interaction_count: u32,
    pub affinity_score: u8,
}

impl FriendshipStats {
    pub fn new_acquaintance() -> Self {
        Self {
            level: FriendshipLevel::Conhecido,
            interaction_count: 0,
            affinity_score: 0,
        }
    }
}

/// One directed friendship row, seen from `user_id`.
#[derive(Debug, Clone, Serialize)]
pub struct Friendship {
    pub user_id: UserId,
    pub friend_id: UserId,
    pub stats: FriendshipStats,
    pub since: DateTime<Utc>,
}

/// How the viewer relates to another resident.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum RelationshipStatus {
    Myself,
    #[serde(rename = "none")]
    Stranger,
    PendingSent,
    PendingReceived,
    Friends {
        level: FriendshipLevel,
        affinity_score: u8,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_tags_round_trip_through_str() {
        for level in FriendshipLevel::ALL {
            assert_eq!(level.as_str().parse::<FriendshipLevel>(), Ok(level));
        }
        assert!("melhor_amigo".parse::<FriendshipLevel>().is_err());
    }

    #[test]
    fn levels_are_ordered_by_closeness() {
        assert!(FriendshipLevel::Conhecido < FriendshipLevel::Vizinho);
        assert!(FriendshipLevel::Vizinho < FriendshipLevel::AmigoVaranda);
        assert_eq!(FriendshipLevel::AmigoVaranda.next(), None);
    }

    #[test]
    fn unknown_level_is_rejected_by_serde() {
        let level: FriendshipLevel = serde_json::from_str("\"amigo_varanda\"").unwrap();
        assert_eq!(level, FriendshipLevel::AmigoVaranda);
        assert!(serde_json::from_str::<FriendshipLevel>("\"best_friend\"").is_err());
    }

    #[test]
    fn status_serializes_with_tag() {
        let status = RelationshipStatus::Friends {
            level: FriendshipLevel::Vizinho,
            affinity_score: 42,
        };
        let json = serde_json::to_value(status).unwrap();
        assert_eq!(json["status"], "friends");
        assert_eq!(json["level"], "vizinho");
        assert_eq!(json["affinity_score"], 42);
    }
}
