//! Input mode state machine
//!
//! The controller owns the [`FormState`] and answers every user event with
//! a list of [`ViewEffect`]s. It never touches the page itself; the browser
//! host applies the effects to the bound elements.

use crate::config::ReviewConfig;
use crate::detector::detect_for;
use crate::feedback::{file_caption, AlertKind, Notification};
use crate::samples::sample_for;
use crate::types::{FileAttachment, FormState, InputMode, Language};
use std::time::Duration;
use tracing::debug;

/// A change the view has to make
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewEffect {
    ShowTextSurface,
    HideTextSurface,
    ShowFileSurface,
    HideFileSurface,
    SetFileRequired(bool),
    /// Tick the radio control for a mode
    CheckModeControl(InputMode),
    /// Write the language `<select>` value
    SelectLanguage(Language),
    SetEditorMode(&'static str),
    SetAcceptedExtensions(String),
    ShowFileInfo(String),
    ClearFileInfo,
    SetCode(String),
    ResetForm,
    ScrollToTextSurface,
    Notify(Notification),
}

#[derive(Debug, Clone)]
pub struct InputModeController {
    form: FormState,
    alert_ttl: Duration,
}

impl Default for InputModeController {
    fn default() -> Self {
        Self::new(&ReviewConfig::default())
    }
}

impl InputModeController {
    pub fn new(config: &ReviewConfig) -> Self {
        Self {
            form: FormState::default(),
            alert_ttl: config.alert_ttl(),
        }
    }

    pub fn form(&self) -> &FormState {
        &self.form
    }

    pub fn mode(&self) -> InputMode {
        self.form.input_mode
    }

    pub fn language(&self) -> Option<Language> {
        self.form.selected_language
    }

    /// Explicit choice of one of the two mode radios
    pub fn select_mode(&mut self, mode: InputMode) -> Vec<ViewEffect> {
        debug!(from = ?self.form.input_mode, to = ?mode, "input mode change");
        self.form.input_mode = mode;
        mode_effects(mode)
    }

    /// Explicit language choice (or reset with `None`)
    pub fn select_language(&mut self, language: Option<Language>) -> Vec<ViewEffect> {
        self.form.selected_language = language;
        language.map(language_effects).unwrap_or_default()
    }

    pub fn attach_file(&mut self, file: Option<FileAttachment>) -> Vec<ViewEffect> {
        let Some(file) = file else {
            self.form.selected_file = None;
            return vec![ViewEffect::ClearFileInfo];
        };

        let mut effects = vec![ViewEffect::ShowFileInfo(file_caption(&file))];

        if self.form.selected_language.is_none() {
            if let Some(language) = Language::from_extension(&file.extension) {
                debug!(%language, file = %file.name, "language inferred from extension");
                effects.extend(self.adopt_language(language));
            }
        }

        self.form.selected_file = Some(file);
        effects
    }

    /// Input or (deferred) paste into the code surface
    pub fn text_input(&mut self, text: &str) -> Vec<ViewEffect> {
        self.form.code_text = text.to_string();

        match detect_for(self.form.selected_language, text) {
            Some(language) => self.adopt_language(language),
            None => Vec::new(),
        }
    }

    /// Replace the form with values read back from the page
    pub fn sync_form(&mut self, form: FormState) {
        self.form = form;
    }

    pub fn clear(&mut self) -> Vec<ViewEffect> {
        self.form = FormState::default();

        let mut effects = vec![
            ViewEffect::ResetForm,
            ViewEffect::SetCode(String::new()),
            ViewEffect::ClearFileInfo,
            ViewEffect::CheckModeControl(InputMode::Text),
        ];
        effects.extend(mode_effects(InputMode::Text));
        effects
    }

    pub fn load_sample(&mut self, language: Language) -> Vec<ViewEffect> {
        let sample = sample_for(language);

        let mut effects = self.adopt_language(language);

        self.form.input_mode = InputMode::Text;
        effects.push(ViewEffect::CheckModeControl(InputMode::Text));
        effects.extend(mode_effects(InputMode::Text));

        self.form.code_text = sample.text.to_string();
        effects.push(ViewEffect::SetCode(sample.text.to_string()));
        effects.push(ViewEffect::ScrollToTextSurface);
        effects.push(ViewEffect::Notify(
            Notification::new(
                format!("{} sample code loaded!", language.display_name()),
                AlertKind::Success,
            )
            .with_ttl(self.alert_ttl),
        ));
        effects
    }

    /// Set the language as if the user had picked it
    fn adopt_language(&mut self, language: Language) -> Vec<ViewEffect> {
        self.form.selected_language = Some(language);
        let mut effects = vec![ViewEffect::SelectLanguage(language)];
        effects.extend(language_effects(language));
        effects
    }
}

fn mode_effects(mode: InputMode) -> Vec<ViewEffect> {
    match mode {
        InputMode::Text => vec![
            ViewEffect::ShowTextSurface,
            ViewEffect::HideFileSurface,
            ViewEffect::SetFileRequired(false),
        ],
        InputMode::File => vec![
            ViewEffect::HideTextSurface,
            ViewEffect::ShowFileSurface,
            ViewEffect::SetFileRequired(true),
        ],
    }
}

fn language_effects(language: Language) -> Vec<ViewEffect> {
    vec![
        ViewEffect::SetEditorMode(language.editor_mode()),
        ViewEffect::SetAcceptedExtensions(language.accept_attribute()),
    ]
}
