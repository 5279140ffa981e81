use crate::domain::model::RiskFactor;

/// Age above which the highest age contribution applies.
pub const SENIOR_AGE: i64 = 60;
/// Lower bound of the middle age band, inclusive.
pub const MIDDLE_AGE: i64 = 40;

/// Age contribution: +2 above 60, +1 for 40 through 60, otherwise nothing.
pub fn age_factor(age: i64) -> RiskFactor {
    if age > SENIOR_AGE {
        RiskFactor::new(2.0, format!("Age {} (above 60) increased risk by +2.", age))
    } else if age >= MIDDLE_AGE {
        RiskFactor::new(1.0, format!("Age {} (40–60) increased risk by +1.", age))
    } else {
        RiskFactor::new(0.0, format!("Age {} is within low-risk range.", age))
    }
}

/// One point per listed comorbidity. Names are counted and echoed verbatim.
pub fn comorbidity_factor(comorbidities: &[String]) -> RiskFactor {
    let count = comorbidities.len();
    if count == 0 {
        return RiskFactor::new(0.0, "No known comorbidities.");
    }

    RiskFactor::new(
        count as f64,
        format!(
            "Presence of {} contributed +{} to severity.",
            comorbidities.join(", "),
            count
        ),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_age_band_boundaries() {
        assert_eq!(age_factor(61).contribution(), 2.0);
        assert_eq!(age_factor(60).contribution(), 1.0);
        assert_eq!(age_factor(40).contribution(), 1.0);
        assert_eq!(age_factor(39).contribution(), 0.0);
        assert_eq!(age_factor(-5).contribution(), 0.0);
    }

    #[test]
    fn test_age_justifications() {
        assert_eq!(
            age_factor(65).justification(),
            "Age 65 (above 60) increased risk by +2."
        );
        assert_eq!(
            age_factor(45).justification(),
            "Age 45 (40–60) increased risk by +1."
        );
        assert_eq!(
            age_factor(30).justification(),
            "Age 30 is within low-risk range."
        );
    }

    #[test]
    fn test_comorbidities_counted_verbatim() {
        let factor = comorbidity_factor(&["diabetes".to_string(), "asthma".to_string()]);
        assert_eq!(factor.contribution(), 2.0);
        assert_eq!(
            factor.justification(),
            "Presence of diabetes, asthma contributed +2 to severity."
        );
    }

    #[test]
    fn test_duplicates_and_unknown_names_still_count() {
        let factor = comorbidity_factor(&[
            "Diabetes".to_string(),
            "diabetes".to_string(),
            "gout".to_string(),
        ]);
        assert_eq!(factor.contribution(), 3.0);
        assert!(factor.justification().contains("Diabetes, diabetes, gout"));
    }

    #[test]
    fn test_no_comorbidities() {
        let factor = comorbidity_factor(&[]);
        assert_eq!(factor.contribution(), 0.0);
        assert_eq!(factor.justification(), "No known comorbidities.");
    }
}
