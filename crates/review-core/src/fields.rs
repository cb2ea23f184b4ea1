//! Logical names of the page elements the controller works with

/// Elements looked up by id
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Form,
    Language,
    TextMethod,
    FileMethod,
    TextSection,
    FileSection,
    FileInput,
    CodeText,
    ClearButton,
    LoadingModal,
    CodeContainer,
}

impl Field {
    pub const ALL: [Field; 11] = [
        Field::Form,
        Field::Language,
        Field::TextMethod,
        Field::FileMethod,
        Field::TextSection,
        Field::FileSection,
        Field::FileInput,
        Field::CodeText,
        Field::ClearButton,
        Field::LoadingModal,
        Field::CodeContainer,
    ];

    pub fn dom_id(&self) -> &'static str {
        match self {
            Field::Form => "codeForm",
            Field::Language => "language",
            Field::TextMethod => "textarea_method",
            Field::FileMethod => "file_method",
            Field::TextSection => "textarea_section",
            Field::FileSection => "file_upload_section",
            Field::FileInput => "code_file",
            Field::CodeText => "code_content",
            Field::ClearButton => "clearBtn",
            Field::LoadingModal => "loadingModal",
            Field::CodeContainer => "codeContainer",
        }
    }
}

/// CSS selectors for elements found by marker class
pub mod selectors {
    pub const ALERT_CONTAINER: &str = ".alert-container";
    pub const ANALYSIS_CONTENT: &str = ".ai-analysis-content";
    pub const FILE_INFO: &str = ".file-info";
    pub const MAIN: &str = "main";
    pub const PRINT_BUTTON: &str = "[onclick=\"window.print()\"]";
    pub const CODE_TOGGLE_BUTTON: &str = "[onclick=\"toggleCode()\"]";
}

/// Class the form receives once a submit has been attempted
pub const WAS_VALIDATED_CLASS: &str = "was-validated";

/// Attribute carrying an optional JSON config on the form element
pub const CONFIG_ATTRIBUTE: &str = "data-review-config";
