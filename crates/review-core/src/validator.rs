//! Form validation
//!
//! Rules run in a fixed order and the first failure wins. Validation never
//! mutates the form, so the same form always produces the same result.

use crate::config::{ReviewConfig, MAX_FILE_BYTES, MIN_CODE_CHARS};
use crate::types::{FormState, InputMode, ValidationIssue, ValidationResult};

/// Limits applied by the validator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidatorLimits {
    pub min_code_chars: usize,
    pub max_file_bytes: u64,
}

impl Default for ValidatorLimits {
    fn default() -> Self {
        Self {
            min_code_chars: MIN_CODE_CHARS,
            max_file_bytes: MAX_FILE_BYTES,
        }
    }
}

impl From<&ReviewConfig> for ValidatorLimits {
    fn from(config: &ReviewConfig) -> Self {
        Self {
            min_code_chars: config.min_code_chars,
            max_file_bytes: config.max_file_bytes,
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Validator {
    limits: ValidatorLimits,
}

impl Validator {
    pub fn new(limits: ValidatorLimits) -> Self {
        Self { limits }
    }

    pub fn validate(&self, form: &FormState) -> ValidationResult {
        match self.first_issue(form) {
            Some(issue) => ValidationResult::rejected(issue),
            None => ValidationResult::ok(),
        }
    }

    fn first_issue(&self, form: &FormState) -> Option<ValidationIssue> {
        let Some(language) = form.selected_language else {
            return Some(ValidationIssue::MissingLanguage);
        };

        match form.input_mode {
            InputMode::Text => {
                let code = form.code_text.trim();
                if code.is_empty() {
                    return Some(ValidationIssue::EmptyCode);
                }
                if code.chars().count() < self.limits.min_code_chars {
                    return Some(ValidationIssue::CodeTooShort);
                }
            }
            InputMode::File => {
                let Some(file) = &form.selected_file else {
                    return Some(ValidationIssue::MissingFile);
                };

                let allowed = language.allowed_extensions();
                if !allowed.contains(&file.extension.as_str()) {
                    return Some(ValidationIssue::InvalidExtension {
                        expected: allowed.iter().map(|ext| ext.to_string()).collect(),
                    });
                }

                if file.size_bytes > self.limits.max_file_bytes {
                    return Some(ValidationIssue::FileTooLarge {
                        limit_bytes: self.limits.max_file_bytes,
                    });
                }
            }
        }

        None
    }
}

/// Validate with the default limits
pub fn validate(form: &FormState) -> ValidationResult {
    Validator::default().validate(form)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{FileAttachment, Language, Severity};
    use proptest::prelude::*;

    #[test]
    fn test_language_is_checked_first() {
        let form = FormState::text(None, "");
        let result = validate(&form);
        assert!(!result.ok);
        assert_eq!(result.issue, Some(ValidationIssue::MissingLanguage));
        assert_eq!(result.severity, Severity::Warning);
    }

    #[test]
    fn test_empty_code_is_rejected() {
        let result = validate(&FormState::text(Some(Language::Python), "   \n\t "));
        assert_eq!(result.issue, Some(ValidationIssue::EmptyCode));
        assert_eq!(
            result.message.as_deref(),
            Some("Please enter some code to analyze.")
        );
    }

    #[test]
    fn test_short_code_is_rejected() {
        let result = validate(&FormState::text(Some(Language::Python), "  x = 1  "));
        assert_eq!(result.issue, Some(ValidationIssue::CodeTooShort));
    }

    #[test]
    fn test_ten_chars_is_enough() {
        let result = validate(&FormState::text(Some(Language::Python), "print('a')"));
        assert!(result.ok);
        assert_eq!(result.message, None);
    }

    #[test]
    fn test_missing_file_is_rejected() {
        let result = validate(&FormState::file(Some(Language::Python), None));
        assert_eq!(result.issue, Some(ValidationIssue::MissingFile));
    }

    #[test]
    fn test_wrong_extension_lists_allowed() {
        let file = FileAttachment::new("script.exe", 100);
        let result = validate(&FormState::file(Some(Language::JavaScript), Some(file)));
        assert!(!result.ok);
        assert_eq!(
            result.message.as_deref(),
            Some("Invalid file extension. Expected: .js, .mjs")
        );
    }

    #[test]
    fn test_extension_check_ignores_case() {
        let file = FileAttachment::new("MAIN.PY", 100);
        assert!(validate(&FormState::file(Some(Language::Python), Some(file))).ok);
    }

    #[test]
    fn test_size_limit_is_inclusive() {
        let at_limit = FileAttachment::new("app.mjs", MAX_FILE_BYTES);
        assert!(validate(&FormState::file(Some(Language::JavaScript), Some(at_limit))).ok);

        let over = FileAttachment::new("app.mjs", MAX_FILE_BYTES + 1);
        let result = validate(&FormState::file(Some(Language::JavaScript), Some(over)));
        assert_eq!(
            result.issue,
            Some(ValidationIssue::FileTooLarge {
                limit_bytes: MAX_FILE_BYTES
            })
        );
        assert_eq!(
            result.message.as_deref(),
            Some("File size exceeds 16MB limit.")
        );
    }

    #[test]
    fn test_text_mode_ignores_attached_file() {
        let mut form = FormState::text(Some(Language::Python), "import os\nprint(os.name)");
        form.selected_file = Some(FileAttachment::new("virus.exe", u64::MAX));
        assert!(validate(&form).ok);
    }

    #[test]
    fn test_custom_limits() {
        let validator = Validator::new(ValidatorLimits {
            min_code_chars: 3,
            max_file_bytes: 10,
        });
        assert!(validator
            .validate(&FormState::text(Some(Language::Python), "abc"))
            .ok);
        let big = FileAttachment::new("a.py", 11);
        assert!(!validator
            .validate(&FormState::file(Some(Language::Python), Some(big)))
            .ok);
    }

    fn any_language() -> impl Strategy<Value = Language> {
        prop_oneof![Just(Language::Python), Just(Language::JavaScript)]
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(200))]

        #[test]
        fn short_text_is_never_accepted(
            language in proptest::option::of(any_language()),
            code in "[ \t\n]{0,3}[a-z(){}=]{0,9}[ \t\n]{0,3}",
        ) {
            let form = FormState::text(language, code);
            let result = validate(&form);
            prop_assert!(!result.ok);
            if language.is_some() {
                prop_assert!(matches!(
                    result.issue,
                    Some(ValidationIssue::EmptyCode) | Some(ValidationIssue::CodeTooShort)
                ));
            }
        }

        #[test]
        fn long_enough_text_is_accepted(
            language in any_language(),
            code in "[ \n]{0,3}[a-z(){}=][a-z(){}= ]{8,60}[a-z(){}=][ \n]{0,3}",
        ) {
            let result = validate(&FormState::text(Some(language), code));
            prop_assert!(result.ok);
        }

        #[test]
        fn foreign_extensions_list_exactly_the_allowed_set(
            language in any_language(),
            stem in "[a-z]{1,8}",
            ext in "[a-z]{1,4}",
        ) {
            let file = FileAttachment::new(format!("{stem}.{ext}"), 1);
            prop_assume!(!language.allowed_extensions().contains(&file.extension.as_str()));

            let result = validate(&FormState::file(Some(language), Some(file)));
            let expected: Vec<String> =
                language.allowed_extensions().iter().map(|e| e.to_string()).collect();
            prop_assert_eq!(result.issue, Some(ValidationIssue::InvalidExtension { expected }));
        }

        #[test]
        fn validation_is_deterministic(
            language in proptest::option::of(any_language()),
            code in ".{0,40}",
        ) {
            let form = FormState::text(language, code);
            prop_assert_eq!(validate(&form), validate(&form));
        }
    }
}
