use crate::core::lexicon::SymptomLexicon;

/// True when any critical pattern group has all of its phrases in `text`.
pub fn is_critical(lexicon: &SymptomLexicon, text: &str) -> bool {
    let text_lower = text.to_lowercase();
    lexicon
        .critical_patterns()
        .iter()
        .any(|group| group.iter().all(|phrase| text_lower.contains(phrase.as_str())))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn critical(text: &str) -> bool {
        is_critical(&SymptomLexicon::default(), text)
    }

    #[test]
    fn test_chest_pain_with_sweating_fires() {
        assert!(critical("chest pain and sweating"));
        assert!(critical("Heavy SWEATING since morning, now chest pain too"));
    }

    #[test]
    fn test_chest_pain_alone_does_not_fire() {
        assert!(!critical("mild chest pain after exercise"));
        assert!(!critical("sweating at night"));
    }

    #[test]
    fn test_single_phrase_groups_fire_alone() {
        assert!(critical("patient is unconscious"));
        assert!(critical("severe breathlessness at rest"));
        assert!(critical("brief loss of consciousness"));
    }

    #[test]
    fn test_no_match() {
        assert!(!critical(""));
        assert!(!critical("runny nose and sneezing"));
    }

    #[test]
    fn test_custom_groups() {
        let lexicon = SymptomLexicon::new(
            Vec::<&str>::new(),
            vec![vec!["slurred speech", "facial droop"]],
        );
        assert!(is_critical(&lexicon, "facial droop and slurred speech"));
        assert!(!is_critical(&lexicon, "slurred speech"));
    }
}
