//! Progress of a friendship toward its next tier.
//!
//! The computation is advisory: promotion itself is decided by the store,
//! this module only renders how far along a friendship is.

use crate::domain_model::{FriendshipLevel, FriendshipStats};
use serde::Serialize;

pub const VIZINHO_INTERACTIONS: u32 = 3;
pub const VARANDA_INTERACTIONS: u32 = 15;
pub const VARANDA_AFFINITY: u8 = 70;

const MAX_LEVEL_LABEL: &str = "Nível máximo";
const MAX_LEVEL_REQUIREMENT: &str = "Amizade consolidada! 🎉";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LevelProgress {
    /// 0.0 to 100.0
    pub progress_percent: f64,
    pub next_level: Option<FriendshipLevel>,
    pub next_level_label: &'static str,
    pub requirement: String,
}

/// `vizinho -> amigo_varanda` weighs interactions and affinity at 50% each,
/// so neither track alone fills the bar.
pub fn level_progress(
    level: FriendshipLevel,
    interaction_count: u32,
    affinity_score: u8,
) -> LevelProgress {
    let next_level = level.next();
    let next_level_label = next_level.map_or(MAX_LEVEL_LABEL, |next| next.label());

    match level {
        FriendshipLevel::Conhecido => {
            let progress = f64::from(interaction_count) / f64::from(VIZINHO_INTERACTIONS) * 100.0;
            LevelProgress {
                progress_percent: progress.min(100.0),
                next_level,
                next_level_label,
                requirement: format!("{interaction_count}/{VIZINHO_INTERACTIONS} interações"),
            }
        }
        FriendshipLevel::Vizinho => {
            let interactions =
                f64::from(interaction_count) / f64::from(VARANDA_INTERACTIONS) * 50.0;
            let affinity = f64::from(affinity_score) / f64::from(VARANDA_AFFINITY) * 50.0;
            LevelProgress {
                progress_percent: (interactions + affinity).min(100.0),
                next_level,
                next_level_label,
                requirement: format!(
                    "{interaction_count}/{VARANDA_INTERACTIONS} interações • {affinity_score}/{VARANDA_AFFINITY} afinidade"
                ),
            }
        }
        FriendshipLevel::AmigoVaranda => LevelProgress {
            progress_percent: 100.0,
            next_level,
            next_level_label,
            requirement: MAX_LEVEL_REQUIREMENT.to_string(),
        },
    }
}

impl FriendshipStats {
    pub fn progress(&self) -> LevelProgress {
        level_progress(self.level, self.interaction_count, self.affinity_score)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn conhecido_tracks_interactions_up_to_three() {
        for n in 0..50u32 {
            let p = level_progress(FriendshipLevel::Conhecido, n, 0);
            let expected = (f64::from(n) / 3.0 * 100.0).min(100.0);
            assert!(close(p.progress_percent, expected), "n={n}");
            assert_eq!(p.progress_percent == 100.0, n >= 3, "n={n}");
        }
    }

    #[test]
    fn conhecido_ignores_affinity() {
        let p = level_progress(FriendshipLevel::Conhecido, 1, 100);
        assert!(close(p.progress_percent, 100.0 / 3.0));
        assert_eq!(p.requirement, "1/3 interações");
        assert_eq!(p.next_level_label, "Vizinho Próximo");
        assert_eq!(p.next_level, Some(FriendshipLevel::Vizinho));
    }

    #[test]
    fn vizinho_sums_two_half_tracks() {
        let cases = [
            (15, 0, 50.0),
            (0, 70, 50.0),
            (15, 70, 100.0),
            (0, 0, 0.0),
            (30, 0, 100.0),
            (1000, 0, 100.0),
            (0, 100, 100.0 / 70.0 * 50.0),
        ];
        for (n, a, expected) in cases {
            let p = level_progress(FriendshipLevel::Vizinho, n, a);
            assert!(close(p.progress_percent, expected), "n={n} a={a}");
        }
    }

    #[test]
    fn vizinho_matches_formula_over_grid() {
        for n in (0..40u32).step_by(3) {
            for a in (0..=100u8).step_by(7) {
                let p = level_progress(FriendshipLevel::Vizinho, n, a);
                let expected =
                    (f64::from(n) / 15.0 * 50.0 + f64::from(a) / 70.0 * 50.0).min(100.0);
                assert!(close(p.progress_percent, expected), "n={n} a={a}");
            }
        }
    }

    #[test]
    fn vizinho_requirement_reports_both_counters() {
        let p = level_progress(FriendshipLevel::Vizinho, 4, 33);
        assert_eq!(p.requirement, "4/15 interações • 33/70 afinidade");
        assert_eq!(p.next_level_label, "Amigo da Varanda");
    }

    #[test]
    fn amigo_varanda_is_always_full() {
        for (n, a) in [(0, 0), (3, 12), (u32::MAX, 100)] {
            let p = level_progress(FriendshipLevel::AmigoVaranda, n, a);
            assert_eq!(p.progress_percent, 100.0);
            assert_eq!(p.next_level, None);
            assert_eq!(p.next_level_label, "Nível máximo");
            assert_eq!(p.requirement, "Amizade consolidada! 🎉");
        }
    }

    #[test]
    fn same_input_same_output() {
        let stats = FriendshipStats {
            level: FriendshipLevel::Vizinho,
            interaction_count: 7,
            affinity_score: 51,
        };
        assert_eq!(stats.progress(), stats.progress());
    }
}
