use crate::domain::model::RiskTier;

pub const CRITICAL_ALERT: &str =
    "[!] Critical symptom pattern detected -- automatically classified as High Risk.";

/// Renders the narrative shown with a triage result.
///
/// The age and comorbidity sentences are always included verbatim, in that
/// order, so the output is never empty.
pub fn build_explanation(
    detected: &[String],
    age_justification: &str,
    comorbidity_justification: &str,
    tier: RiskTier,
    critical: bool,
) -> String {
    let mut parts: Vec<String> = Vec::with_capacity(4);

    if critical {
        parts.push(CRITICAL_ALERT.to_string());
    }

    if detected.is_empty() {
        parts.push(format!("{} risk based on symptom analysis.", tier));
    } else {
        parts.push(format!(
            "{} risk due to detected symptoms: {}.",
            tier,
            detected.join(", ")
        ));
    }

    parts.push(age_justification.to_string());
    parts.push(comorbidity_justification.to_string());
    parts.join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    const AGE: &str = "Age 30 is within low-risk range.";
    const COMORBIDITY: &str = "No known comorbidities.";

    #[test]
    fn test_explanation_with_symptoms() {
        let detected = vec!["fever".to_string(), "joint pain".to_string()];
        assert_eq!(
            build_explanation(&detected, AGE, COMORBIDITY, RiskTier::Moderate, false),
            "Moderate risk due to detected symptoms: fever, joint pain. \
             Age 30 is within low-risk range. No known comorbidities."
        );
    }

    #[test]
    fn test_explanation_without_symptoms() {
        assert_eq!(
            build_explanation(&[], AGE, COMORBIDITY, RiskTier::Low, false),
            "Low risk based on symptom analysis. Age 30 is within low-risk range. \
             No known comorbidities."
        );
    }

    #[test]
    fn test_critical_alert_comes_first() {
        let detected = vec!["chest pain".to_string(), "sweating".to_string()];
        let text = build_explanation(&detected, AGE, COMORBIDITY, RiskTier::High, true);
        assert!(text.starts_with(CRITICAL_ALERT));
        assert!(text.contains("High risk due to detected symptoms: chest pain, sweating."));
    }

    #[test]
    fn test_justifications_always_present() {
        for tier in [RiskTier::Low, RiskTier::Moderate, RiskTier::High] {
            for critical in [false, true] {
                let text = build_explanation(&[], AGE, COMORBIDITY, tier, critical);
                let age_at = text.find(AGE).unwrap();
                let comorbidity_at = text.find(COMORBIDITY).unwrap();
                assert!(age_at < comorbidity_at);
            }
        }
    }
}
