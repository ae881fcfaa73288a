use crate::domain_model::{Friendship, FriendshipLevel};
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct CircleGroup {
    pub level: FriendshipLevel,
    pub label: &'static str,
    pub friends: Vec<Friendship>,
}

/// A resident's friendships grouped by tier, closest tier first.
#[derive(Debug, Clone, Serialize)]
pub struct FriendCircle {
    pub total: usize,
    pub summary: String,
    pub groups: Vec<CircleGroup>,
}

impl FriendCircle {
    /// Empty tiers are left out. Order inside a tier is preserved.
    pub fn group(friendships: Vec<Friendship>) -> Self {
        let total = friendships.len();
        let mut groups: Vec<CircleGroup> = FriendshipLevel::ALL
            .iter()
            .rev()
            .map(|&level| CircleGroup {
                level,
                label: group_label(level),
                friends: Vec::new(),
            })
            .collect();

        for friendship in friendships {
            if let Some(group) = groups
                .iter_mut()
                .find(|g| g.level == friendship.stats.level)
            {
                group.friends.push(friendship);
            }
        }
        groups.retain(|g| !g.friends.is_empty());

        let noun = if total == 1 { "vínculo" } else { "vínculos" };
        Self {
            total,
            summary: format!("{total} {noun} na cidade"),
            groups,
        }
    }
}

fn group_label(level: FriendshipLevel) -> &'static str {
    match level {
        FriendshipLevel::AmigoVaranda => "Amigos da Varanda",
        FriendshipLevel::Vizinho => "Vizinhos Próximos",
        FriendshipLevel::Conhecido => "Conhecidos da Praça",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain_model::{FriendshipStats, UserId};
    use chrono::Utc;

    fn friendship(n: u128, level: FriendshipLevel) -> Friendship {
        Friendship {
            user_id: UserId(uuid::Uuid::from_u128(0)),
            friend_id: UserId(uuid::Uuid::from_u128(n)),
            stats: FriendshipStats {
                level,
                interaction_count: 0,
                affinity_score: 0,
            },
            since: Utc::now(),
        }
    }

    #[test]
    fn groups_closest_tier_first() {
        let circle = FriendCircle::group(vec![
            friendship(1, FriendshipLevel::Conhecido),
            friendship(2, FriendshipLevel::AmigoVaranda),
            friendship(3, FriendshipLevel::Conhecido),
        ]);

        assert_eq!(circle.total, 3);
        assert_eq!(circle.summary, "3 vínculos na cidade");
        let levels: Vec<_> = circle.groups.iter().map(|g| g.level).collect();
        assert_eq!(
            levels,
            vec![FriendshipLevel::AmigoVaranda, FriendshipLevel::Conhecido]
        );
        let conhecidos: Vec<_> = circle.groups[1]
            .friends
            .iter()
            .map(|f| f.friend_id.0.as_u128())
            .collect();
        assert_eq!(conhecidos, vec![1, 3]);
    }

    #[test]
    fn singular_and_empty_summaries() {
        let one = FriendCircle::group(vec![friendship(1, FriendshipLevel::Vizinho)]);
        assert_eq!(one.summary, "1 vínculo na cidade");
        assert_eq!(one.groups[0].label, "Vizinhos Próximos");

        let none = FriendCircle::group(Vec::new());
        assert_eq!(none.total, 0);
        assert!(none.groups.is_empty());
        assert_eq!(none.summary, "0 vínculos na cidade");
    }
}
