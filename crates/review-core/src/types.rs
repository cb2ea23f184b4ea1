use crate::error::{Result, ReviewError};
use crate::feedback::format_file_size;
use serde::{Deserialize, Serialize};

/// Languages the analysis backend accepts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    Python,
    JavaScript,
}

impl Language {
    pub const ALL: [Language; 2] = [Language::Python, Language::JavaScript];

    /// Form value used by the language `<select>` and the backend
    pub fn as_str(&self) -> &'static str {
        match self {
            Language::Python => "python",
            Language::JavaScript => "javascript",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Language::Python => "Python",
            Language::JavaScript => "JavaScript",
        }
    }

    /// Mode name understood by the code editor widget
    pub fn editor_mode(&self) -> &'static str {
        self.as_str()
    }

    /// Upload extensions accepted for this language (lowercase, dotted)
    pub fn allowed_extensions(&self) -> &'static [&'static str] {
        match self {
            Language::Python => &[".py"],
            Language::JavaScript => &[".js", ".mjs"],
        }
    }

    /// Value for the file input's `accept` attribute, e.g. `.js,.mjs`
    pub fn accept_attribute(&self) -> String {
        self.allowed_extensions().join(",")
    }

    /// Infer a language from a dotted, lowercase extension
    pub fn from_extension(extension: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|lang| lang.allowed_extensions().contains(&extension))
    }

    /// Parse a form value. An empty value means "unset" and yields `Ok(None)`.
    pub fn parse(value: &str) -> Result<Option<Self>> {
        match value.trim().to_lowercase().as_str() {
            "" => Ok(None),
            "python" => Ok(Some(Language::Python)),
            "javascript" => Ok(Some(Language::JavaScript)),
            other => Err(ReviewError::UnknownLanguage(other.to_string())),
        }
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How the code is supplied
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InputMode {
    #[default]
    Text,
    File,
}

/// Metadata of an uploaded file. The contents never pass through the client logic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileAttachment {
    pub name: String,
    pub size_bytes: u64,
    /// Lowercase extension including the leading dot
    pub extension: String,
}

impl FileAttachment {
    pub fn new(name: impl Into<String>, size_bytes: u64) -> Self {
        let name = name.into();
        let extension = extension_of(&name);
        Self {
            name,
            size_bytes,
            extension,
        }
    }
}

/// Text after the last `.`, lowercased and dotted.
///
/// A name without any dot yields the whole name, matching how the upload
/// form has always compared extensions.
pub fn extension_of(name: &str) -> String {
    let tail = name.rsplit('.').next().unwrap_or(name);
    format!(".{}", tail.to_lowercase())
}

/// Everything the submission form holds
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormState {
    pub selected_language: Option<Language>,
    pub input_mode: InputMode,
    pub code_text: String,
    pub selected_file: Option<FileAttachment>,
}

impl FormState {
    pub fn text(language: Option<Language>, code: impl Into<String>) -> Self {
        Self {
            selected_language: language,
            input_mode: InputMode::Text,
            code_text: code.into(),
            selected_file: None,
        }
    }

    pub fn file(language: Option<Language>, file: Option<FileAttachment>) -> Self {
        Self {
            selected_language: language,
            input_mode: InputMode::File,
            code_text: String::new(),
            selected_file: file,
        }
    }
}

/// Severity attached to a validation failure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    #[default]
    Warning,
    Danger,
}

/// Which validation rule rejected the form
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ValidationIssue {
    MissingLanguage,
    EmptyCode,
    CodeTooShort,
    MissingFile,
    InvalidExtension { expected: Vec<String> },
    FileTooLarge { limit_bytes: u64 },
}

impl ValidationIssue {
    pub fn message(&self) -> String {
        match self {
            ValidationIssue::MissingLanguage => {
                "Please select a programming language.".to_string()
            }
            ValidationIssue::EmptyCode => "Please enter some code to analyze.".to_string(),
            ValidationIssue::CodeTooShort => {
                "Code content seems too short. Please provide more code for analysis.".to_string()
            }
            ValidationIssue::MissingFile => "Please select a file to upload.".to_string(),
            ValidationIssue::InvalidExtension { expected } => {
                format!("Invalid file extension. Expected: {}", expected.join(", "))
            }
            ValidationIssue::FileTooLarge { limit_bytes } => {
                let limit = format_file_size(*limit_bytes).replace(' ', "");
                format!("File size exceeds {} limit.", limit)
            }
        }
    }

    pub fn severity(&self) -> Severity {
        Severity::Warning
    }
}

/// Outcome of one validation call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationResult {
    pub ok: bool,
    pub message: Option<String>,
    pub severity: Severity,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub issue: Option<ValidationIssue>,
}

impl ValidationResult {
    pub fn ok() -> Self {
        Self {
            ok: true,
            message: None,
            severity: Severity::Warning,
            issue: None,
        }
    }

    pub fn rejected(issue: ValidationIssue) -> Self {
        Self {
            ok: false,
            message: Some(issue.message()),
            severity: issue.severity(),
            issue: Some(issue),
        }
    }
}

/// Pre-written code used to demo the form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SampleSnippet {
    pub language: Language,
    pub text: &'static str,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extension_is_lowercased_after_last_dot() {
        assert_eq!(extension_of("Script.PY"), ".py");
        assert_eq!(extension_of("bundle.min.MJS"), ".mjs");
        assert_eq!(extension_of("Makefile"), ".makefile");
        assert_eq!(extension_of("trailing."), ".");
    }

    #[test]
    fn test_language_from_extension() {
        assert_eq!(Language::from_extension(".py"), Some(Language::Python));
        assert_eq!(Language::from_extension(".js"), Some(Language::JavaScript));
        assert_eq!(Language::from_extension(".mjs"), Some(Language::JavaScript));
        assert_eq!(Language::from_extension(".exe"), None);
    }

    #[test]
    fn test_language_parse() {
        assert_eq!(Language::parse("").unwrap(), None);
        assert_eq!(Language::parse("Python").unwrap(), Some(Language::Python));
        assert_eq!(
            Language::parse(" javascript ").unwrap(),
            Some(Language::JavaScript)
        );
        assert_eq!(
            Language::parse("rust"),
            Err(ReviewError::UnknownLanguage("rust".to_string()))
        );
    }

    #[test]
    fn test_accept_attribute() {
        assert_eq!(Language::JavaScript.accept_attribute(), ".js,.mjs");
        assert_eq!(Language::Python.accept_attribute(), ".py");
    }

    #[test]
    fn test_language_serializes_lowercase() {
        let json = serde_json::to_string(&Language::JavaScript).unwrap();
        assert_eq!(json, "\"javascript\"");
    }

    #[test]
    fn test_rejected_result_carries_message() {
        let result = ValidationResult::rejected(ValidationIssue::InvalidExtension {
            expected: vec![".js".to_string(), ".mjs".to_string()],
        });
        assert!(!result.ok);
        assert_eq!(
            result.message.as_deref(),
            Some("Invalid file extension. Expected: .js, .mjs")
        );
        assert_eq!(result.severity, Severity::Warning);
    }

    #[test]
    fn test_file_too_large_message_follows_limit() {
        let message = |limit_bytes| ValidationIssue::FileTooLarge { limit_bytes }.message();
        assert_eq!(message(16 * 1024 * 1024), "File size exceeds 16MB limit.");
        assert_eq!(message(512 * 1024), "File size exceeds 512KB limit.");
        assert_eq!(message(1536 * 1024), "File size exceeds 1.5MB limit.");
    }
}
