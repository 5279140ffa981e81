use crate::domain::model::RiskTier;

/// Scales the model's [0, 1] probability into the range of the additive factors.
pub const MODEL_WEIGHT: f64 = 5.0;
pub const HIGH_THRESHOLD: f64 = 7.0;
pub const MODERATE_THRESHOLD: f64 = 4.0;

/// `round(p * 5 + age + comorbidity, 2)`
pub fn composite_score(model_probability: f64, age_factor: f64, comorbidity_factor: f64) -> f64 {
    round_to_hundredths(model_probability * MODEL_WEIGHT + age_factor + comorbidity_factor)
}

/// Rounds the exact binary value to two decimals. Scaling by 100 first would
/// push values such as 2.005 (stored as 2.00499...) up to 2.01.
fn round_to_hundredths(value: f64) -> f64 {
    format!("{:.2}", value).parse().unwrap_or(value)
}

/// Maps a score to a tier. A critical override is always High.
pub fn classify(score: f64, critical: bool) -> RiskTier {
    if critical || score >= HIGH_THRESHOLD {
        RiskTier::High
    } else if score >= MODERATE_THRESHOLD {
        RiskTier::Moderate
    } else {
        RiskTier::Low
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_composite_score_formula() {
        assert_eq!(composite_score(0.1, 2.0, 1.0), 3.5);
        assert_eq!(composite_score(0.6, 1.0, 2.0), 6.0);
        assert_eq!(composite_score(0.2, 0.0, 0.0), 1.0);
        assert_eq!(composite_score(0.1234, 0.0, 0.0), 0.62);
    }

    #[test]
    fn test_rounding_uses_exact_binary_value() {
        // 0.001 * 5 + 2 is stored just below 2.005
        assert_eq!(composite_score(0.001, 0.0, 2.0), 2.0);
        // 0.123 * 5 is stored just below 0.615
        assert_eq!(composite_score(0.123, 0.0, 0.0), 0.61);
        assert_eq!(composite_score(0.6, 1.0, 2.0), 6.0);
    }

    #[test]
    fn test_score_monotonic_in_each_input() {
        let steps = [0.0, 0.1, 0.25, 0.5, 0.75, 0.9, 1.0];
        for window in steps.windows(2) {
            let (lo, hi) = (window[0], window[1]);
            assert!(composite_score(lo, 1.0, 1.0) <= composite_score(hi, 1.0, 1.0));
        }
        for age in [0.0, 1.0, 2.0].windows(2) {
            assert!(composite_score(0.4, age[0], 1.0) <= composite_score(0.4, age[1], 1.0));
        }
        for count in 0..5 {
            let c = count as f64;
            assert!(composite_score(0.4, 1.0, c) <= composite_score(0.4, 1.0, c + 1.0));
        }
    }

    #[test]
    fn test_classify_thresholds() {
        assert_eq!(classify(7.0, false), RiskTier::High);
        assert_eq!(classify(6.99, false), RiskTier::Moderate);
        assert_eq!(classify(4.0, false), RiskTier::Moderate);
        assert_eq!(classify(3.99, false), RiskTier::Low);
        assert_eq!(classify(0.0, false), RiskTier::Low);
    }

    #[test]
    fn test_critical_override_always_high() {
        for score in [0.0, 1.0, 3.99, 5.5, 12.0] {
            assert_eq!(classify(score, true), RiskTier::High);
        }
    }
}
