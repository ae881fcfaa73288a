use serde::Serialize;
use std::fmt;

/// Compatibility between two residents, 0 to 100.
#[derive(Debug, Clone, Copy, Ord, PartialOrd, Eq, PartialEq, Hash, Default, Serialize)]
#[serde(transparent)]
pub struct AffinityScore(u8);

impl AffinityScore {
    pub const MAX: u8 = 100;

    /// Values outside 0..=100 are clamped.
    pub fn clamped(raw: i64) -> Self {
        Self(raw.clamp(0, i64::from(Self::MAX)) as u8)
    }

    pub fn value(&self) -> u8 {
        self.0
    }

    pub fn band(&self) -> AffinityBand {
        AffinityBand::of(*self)
    }
}

impl TryFrom<i64> for AffinityScore {
    type Error = i64;

    fn try_from(raw: i64) -> Result<Self, Self::Error> {
        if (0..=i64::from(Self::MAX)).contains(&raw) {
            Ok(Self(raw as u8))
        } else {
            Err(raw)
        }
    }
}

impl fmt::Display for AffinityScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0)
    }
}

#[derive(Debug, Clone, Copy, Ord, PartialOrd, Eq, PartialEq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AffinityBand {
    ConhecidosDaPraca,
    ComecandoASeConhecer,
    BoaSintonia,
    SintoniaIncrivel,
}

impl AffinityBand {
    /// Lower bounds are inclusive: 80, 60 and 40.
    pub fn of(score: AffinityScore) -> Self {
        match score.value() {
            80.. => AffinityBand::SintoniaIncrivel,
            60.. => AffinityBand::BoaSintonia,
            40.. => AffinityBand::ComecandoASeConhecer,
            _ => AffinityBand::ConhecidosDaPraca,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            AffinityBand::SintoniaIncrivel => "Sintonia Incrível!",
            AffinityBand::BoaSintonia => "Boa Sintonia",
            AffinityBand::ComecandoASeConhecer => "Começando a se conhecer",
            AffinityBand::ConhecidosDaPraca => "Conhecidos da Praça",
        }
    }

    pub fn emoji(&self) -> &'static str {
        match self {
            AffinityBand::SintoniaIncrivel => "🌟",
            AffinityBand::BoaSintonia => "✨",
            AffinityBand::ComecandoASeConhecer => "🌱",
            AffinityBand::ConhecidosDaPraca => "👋",
        }
    }
}

/// What the profile card shows for a pair of residents.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize)]
pub struct AffinityView {
    pub score: AffinityScore,
    pub band: AffinityBand,
    pub label: &'static str,
    pub emoji: &'static str,
}

impl From<AffinityScore> for AffinityView {
    fn from(score: AffinityScore) -> Self {
        let band = score.band();
        Self {
            score,
            band,
            label: band.label(),
            emoji: band.emoji(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn label(raw: i64) -> &'static str {
        AffinityScore::clamped(raw).band().label()
    }

    #[test]
    fn bands_are_inclusive_on_lower_bound() {
        assert_eq!(label(100), "Sintonia Incrível!");
        assert_eq!(label(80), "Sintonia Incrível!");
        assert_eq!(label(79), "Boa Sintonia");
        assert_eq!(label(60), "Boa Sintonia");
        assert_eq!(label(59), "Começando a se conhecer");
        assert_eq!(label(40), "Começando a se conhecer");
        assert_eq!(label(39), "Conhecidos da Praça");
        assert_eq!(label(0), "Conhecidos da Praça");
    }

    #[test]
    fn banding_is_monotonic() {
        let mut previous = AffinityBand::ConhecidosDaPraca;
        for raw in 0..=100 {
            let band = AffinityScore::clamped(raw).band();
            assert!(band >= previous, "score {raw}");
            previous = band;
        }
    }

    #[test]
    fn out_of_range_scores_clamp() {
        assert_eq!(AffinityScore::clamped(-5).value(), 0);
        assert_eq!(AffinityScore::clamped(250).value(), 100);
        assert_eq!(AffinityScore::try_from(101), Err(101));
        assert_eq!(AffinityScore::try_from(60).map(|s| s.value()), Ok(60));
    }

    #[test]
    fn view_carries_label_and_emoji() {
        let view = AffinityView::from(AffinityScore::clamped(61));
        assert_eq!(view.band, AffinityBand::BoaSintonia);
        assert_eq!(view.label, "Boa Sintonia");
        assert_eq!(view.emoji, "✨");
        assert_eq!(view.score.to_string(), "61%");
    }
}
