//! Client-side logic of the code review tool
//!
//! Everything here is plain Rust with no browser dependency, so it can be
//! tested on the host. The `review-wasm` app binds it to the page.
//!
//! - [`validator`]: form rules, first failure wins
//! - [`detector`]: heuristic Python/JavaScript detection for pasted code
//! - [`input_mode`]: text/file mode state machine producing view effects
//! - [`lifecycle`]: submit gating, busy indicator and timeout safety net
//! - [`render`]: analysis report to HTML

pub mod config;
pub mod detector;
pub mod error;
pub mod feedback;
pub mod fields;
pub mod input_mode;
pub mod lifecycle;
pub mod render;
pub mod samples;
pub mod types;
pub mod validator;

pub use config::ReviewConfig;
pub use detector::detect;
pub use error::{Result, ReviewError};
pub use feedback::{format_file_size, AlertKind, Notification};
pub use fields::Field;
pub use input_mode::{InputModeController, ViewEffect};
pub use lifecycle::{
    AttemptId, SubmissionHost, SubmissionLifecycle, SubmissionState, SubmitDecision, TimerHandle,
};
pub use render::render;
pub use types::{
    FileAttachment, FormState, InputMode, Language, SampleSnippet, Severity, ValidationIssue,
    ValidationResult,
};
pub use validator::{validate, Validator, ValidatorLimits};
