use crate::core::lexicon::SymptomLexicon;
use crate::domain::model::DetectedSymptoms;

/// Finds every lexicon phrase contained in `text`.
///
/// Vocabulary phrases come first in lexicon order, followed by any critical
/// pattern phrases not already collected. Order of appearance in the text
/// plays no part. Containment is substring based, so "rash" also matches
/// inside "crash".
pub fn extract_symptoms(lexicon: &SymptomLexicon, text: &str) -> DetectedSymptoms {
    let text_lower = text.to_lowercase();
    let mut detected = DetectedSymptoms::new();

    for symptom in lexicon.symptoms() {
        if text_lower.contains(symptom.as_str()) {
            detected.insert(symptom);
        }
    }

    for phrase in lexicon.critical_phrases() {
        if text_lower.contains(phrase) {
            detected.insert(phrase);
        }
    }

    detected
}
