//! Values used when the user supplies nothing else.

pub const DEFAULT_NAME_A: &str = "Plan 1";
pub const DEFAULT_NAME_B: &str = "Plan 2";
pub const DEFAULT_COMPANY: &str = "full-remote consulting company with 100 employees";

pub const DEFAULT_QUESTIONS: [&str; 10] = [
    "How good are the deductibles?",
    "How is the preventive care coverage?",
    "How this plan fits for remote workers in the US and abroad?",
    "What is the maximum money amount that can be compensated?",
    "Can I go to any hospital of my choice?",
    "Are there any limitations that won't allow to use the insurance?",
    "Does it cover the family members of the applicant?",
    "What are the healthcare procedures that are not covered by the insurance?",
    "Can I use the insurance for the dental care?",
    "Can I use the insurance in other countries?",
];

pub const DEFAULT_CRITERIA: [&str; 3] = [
    "Coverage of different health procedures",
    "Flexibility for remote workers abroad",
    "Price and compensation",
];

/// The default questions as the editable text area shows them.
pub fn questions_text() -> String {
    DEFAULT_QUESTIONS.join("\n")
}

pub fn criteria_text() -> String {
    DEFAULT_CRITERIA.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::utils::non_empty_lines;

    #[test]
    fn default_text_areas_parse_back_to_the_lists() {
        assert_eq!(non_empty_lines(&questions_text()), DEFAULT_QUESTIONS);
        assert_eq!(non_empty_lines(&criteria_text()), DEFAULT_CRITERIA);
    }

    #[test]
    fn criteria_are_stored_unnumbered() {
        assert!(DEFAULT_CRITERIA.iter().all(|c| !c.starts_with(char::is_numeric)));
    }
}
