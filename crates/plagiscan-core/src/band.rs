//! Severity bands for a plagiarism score.

use serde::Serialize;

/// Coarse severity of a score, used to colour the report.
///
/// Boundaries are inclusive on the lower band: 10 is `Low`, 11 is `Moderate`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ScoreBand {
    Low,
    Moderate,
    Elevated,
    High,
}

impl ScoreBand {
    pub fn for_score(score: u32) -> Self {
        match score {
            s if s > 50 => Self::High,
            s if s > 25 => Self::Elevated,
            s if s > 10 => Self::Moderate,
            _ => Self::Low,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Moderate => "moderate",
            Self::Elevated => "elevated",
            Self::High => "high",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn boundaries() {
        assert_eq!(ScoreBand::for_score(0), ScoreBand::Low);
        assert_eq!(ScoreBand::for_score(10), ScoreBand::Low);
        assert_eq!(ScoreBand::for_score(11), ScoreBand::Moderate);
        assert_eq!(ScoreBand::for_score(25), ScoreBand::Moderate);
        assert_eq!(ScoreBand::for_score(26), ScoreBand::Elevated);
        assert_eq!(ScoreBand::for_score(50), ScoreBand::Elevated);
        assert_eq!(ScoreBand::for_score(51), ScoreBand::High);
        assert_eq!(ScoreBand::for_score(140), ScoreBand::High);
    }

    #[test]
    fn bands_are_ordered() {
        assert!(ScoreBand::Low < ScoreBand::Moderate);
        assert!(ScoreBand::Elevated < ScoreBand::High);
    }
}
