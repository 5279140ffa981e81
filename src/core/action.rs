use crate::domain::model::RiskTier;

pub const LOW_ACTION: &str = "Self-care and monitoring recommended. Visit a healthcare provider if symptoms persist beyond 48 hours.";
pub const MODERATE_ACTION: &str = "Schedule an appointment with your healthcare provider within 24 hours. Monitor symptoms closely.";
pub const HIGH_ACTION: &str = "Seek immediate medical attention. Visit the nearest emergency department or call emergency services.";

pub fn recommended_action(tier: RiskTier) -> &'static str {
    match tier {
        RiskTier::Low => LOW_ACTION,
        RiskTier::Moderate => MODERATE_ACTION,
        RiskTier::High => HIGH_ACTION,
    }
}

/// Advisory for a tier given by name, e.g. read back from an assessment log.
/// Unrecognised labels get the Moderate advisory.
pub fn recommended_action_for_label(label: &str) -> &'static str {
    label
        .parse::<RiskTier>()
        .map(recommended_action)
        .unwrap_or(MODERATE_ACTION)
}
