// 🎯 Scoring - credit-score style ratings on a 300-900 band
//
// The weights and thresholds are fixed heuristics; they are reproduced as
// given rather than fitted to anything.

pub mod hlv;
pub mod corpus;

pub use hlv::{calculate_hlv, HlvInput, HlvRating, HlvResult, HlvScores};
pub use corpus::{score_corpus, CorpusRating, CorpusScore, CorpusScoreInput, FactorKind, Impact, ScoreFactor};

pub const MIN_SCORE: f64 = 300.0;
pub const MAX_SCORE: f64 = 900.0;

/// Clamp a raw score into the 300-900 band
pub fn clamp_score(raw: f64) -> f64 {
    raw.clamp(MIN_SCORE, MAX_SCORE)
}

/// Position of a score inside the band, 0.0 at 300 and 1.0 at 900
pub fn band_fraction(score: f64) -> f64 {
    (clamp_score(score) - MIN_SCORE) / (MAX_SCORE - MIN_SCORE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_score() {
        assert_eq!(clamp_score(120.0), 300.0);
        assert_eq!(clamp_score(640.5), 640.5);
        assert_eq!(clamp_score(1_200.0), 900.0);
    }

    #[test]
    fn test_band_fraction() {
        assert_eq!(band_fraction(300.0), 0.0);
        assert_eq!(band_fraction(600.0), 0.5);
        assert_eq!(band_fraction(2_000.0), 1.0);
    }
}
