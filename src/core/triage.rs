use crate::core::action::recommended_action;
use crate::core::critical::is_critical;
use crate::core::explain::build_explanation;
use crate::core::extractor::extract_symptoms;
use crate::core::factors::{age_factor, comorbidity_factor};
use crate::core::lexicon::SymptomLexicon;
use crate::core::scoring::{classify, composite_score};
use crate::domain::model::{TriageInput, TriageResult};

/// Scores one presentation given the classifier's scalar probability.
///
/// Pure: the result depends only on the arguments. Gender is carried on the
/// input but does not influence any rule.
pub fn assess(lexicon: &SymptomLexicon, input: &TriageInput, model_probability: f64) -> TriageResult {
    let detected = extract_symptoms(lexicon, &input.symptoms);
    let critical = is_critical(lexicon, &input.symptoms);

    let age = age_factor(input.age);
    let comorbidity = comorbidity_factor(&input.comorbidities);

    let score = composite_score(
        model_probability,
        age.contribution(),
        comorbidity.contribution(),
    );
    let tier = classify(score, critical);

    let explanation = build_explanation(
        detected.as_slice(),
        age.justification(),
        comorbidity.justification(),
        tier,
        critical,
    );

    TriageResult::new(
        tier,
        score,
        explanation,
        detected,
        recommended_action(tier).to_string(),
    )
    .with_critical_override(critical)
}
