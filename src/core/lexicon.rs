//! Fixed vocabulary the triage engine matches against.
//!
//! Matching is plain case-insensitive substring containment, so every phrase
//! here is stored lower-case.

pub const KNOWN_SYMPTOMS: &[&str] = &[
    "headache",
    "fever",
    "cough",
    "sore throat",
    "nausea",
    "vomiting",
    "diarrhea",
    "fatigue",
    "weakness",
    "dizziness",
    "chest pain",
    "shortness of breath",
    "breathlessness",
    "sweating",
    "chills",
    "abdominal pain",
    "back pain",
    "joint pain",
    "muscle pain",
    "rash",
    "itching",
    "swelling",
    "numbness",
    "tingling",
    "blurred vision",
    "confusion",
    "seizure",
    "unconsciousness",
    "bleeding",
    "bruising",
    "painful urination",
    "blood in urine",
    "wheezing",
    "congestion",
    "runny nose",
    "sneezing",
    "chest tightness",
    "palpitations",
    "difficulty breathing",
    "loss of appetite",
    "weight loss",
    "night sweats",
    "stiff neck",
    "earache",
    "eye pain",
    "throat swelling",
];

/// Each group forces a High tier when every phrase in it is present.
pub const CRITICAL_PATTERNS: &[&[&str]] = &[
    &["chest pain", "sweating"],
    &["severe breathlessness"],
    &["unconsciousness"],
    &["unconscious"],
    &["loss of consciousness"],
];

/// Recognised comorbidity spellings and their display names.
pub const COMORBIDITY_ALIASES: &[(&str, &str)] = &[
    ("diabetes", "diabetes"),
    ("hypertension", "hypertension"),
    ("heart disease", "heart disease"),
    ("asthma", "asthma"),
    ("copd", "COPD"),
    ("chronic kidney disease", "chronic kidney disease"),
    ("cancer", "cancer"),
    ("obesity", "obesity"),
    ("liver disease", "liver disease"),
    ("immunodeficiency", "immunodeficiency"),
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SymptomLexicon {
    symptoms: Vec<String>,
    critical_patterns: Vec<Vec<String>>,
}

impl SymptomLexicon {
    /// Builds a lexicon from custom phrases. Phrases are lower-cased; blank
    /// phrases and groups left empty are dropped, since an empty phrase
    /// would match every text.
    pub fn new<S, G, P>(symptoms: S, critical_patterns: G) -> Self
    where
        S: IntoIterator,
        S::Item: AsRef<str>,
        G: IntoIterator<Item = P>,
        P: IntoIterator,
        P::Item: AsRef<str>,
    {
        let symptoms = symptoms.into_iter().filter_map(normalize_phrase).collect();
        let critical_patterns = critical_patterns
            .into_iter()
            .map(|group| {
                group
                    .into_iter()
                    .filter_map(normalize_phrase)
                    .collect::<Vec<_>>()
            })
            .filter(|group| !group.is_empty())
            .collect();

        Self {
            symptoms,
            critical_patterns,
        }
    }

    pub fn symptoms(&self) -> &[String] {
        &self.symptoms
    }

    pub fn critical_patterns(&self) -> &[Vec<String>] {
        &self.critical_patterns
    }

    /// All critical phrases, group by group, members in definition order.
    pub fn critical_phrases(&self) -> impl Iterator<Item = &str> {
        self.critical_patterns
            .iter()
            .flat_map(|group| group.iter().map(String::as_str))
    }
}

impl Default for SymptomLexicon {
    fn default() -> Self {
        Self::new(
            KNOWN_SYMPTOMS.iter().copied(),
            CRITICAL_PATTERNS.iter().map(|group| group.iter().copied()),
        )
    }
}

fn normalize_phrase<T: AsRef<str>>(phrase: T) -> Option<String> {
    let phrase = phrase.as_ref().trim().to_lowercase();
    (!phrase.is_empty()).then_some(phrase)
}

/// Display name for a known comorbidity, `None` when unrecognised.
pub fn canonical_comorbidity(name: &str) -> Option<&'static str> {
    let key = name.trim().to_lowercase();
    COMORBIDITY_ALIASES
        .iter()
        .find(|(alias, _)| *alias == key)
        .map(|(_, canonical)| *canonical)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_lexicon_matches_builtin_lists() {
        let lexicon = SymptomLexicon::default();
        assert_eq!(lexicon.symptoms().len(), KNOWN_SYMPTOMS.len());
        assert_eq!(lexicon.critical_patterns().len(), CRITICAL_PATTERNS.len());
        assert_eq!(lexicon.symptoms()[0], "headache");
    }

    #[test]
    fn test_critical_phrases_flatten_in_group_order() {
        let lexicon = SymptomLexicon::default();
        let phrases: Vec<&str> = lexicon.critical_phrases().collect();
        assert_eq!(
            phrases,
            vec![
                "chest pain",
                "sweating",
                "severe breathlessness",
                "unconsciousness",
                "unconscious",
                "loss of consciousness",
            ]
        );
    }

    #[test]
    fn test_custom_lexicon_drops_blank_phrases() {
        let lexicon = SymptomLexicon::new(
            vec!["Fever", "  ", "cough"],
            vec![vec![""], vec!["Stroke", " "]],
        );
        assert_eq!(lexicon.symptoms(), &["fever".to_string(), "cough".to_string()]);
        assert_eq!(lexicon.critical_patterns(), &[vec!["stroke".to_string()]]);
    }

    #[test]
    fn test_canonical_comorbidity() {
        assert_eq!(canonical_comorbidity("COPD"), Some("COPD"));
        assert_eq!(canonical_comorbidity(" Diabetes "), Some("diabetes"));
        assert_eq!(canonical_comorbidity("gout"), None);
    }
}
