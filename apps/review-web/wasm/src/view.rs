//! Page elements bound once and the code that applies view effects to them

use crate::alerts;
use crate::editor::CodeSurface;
use review_core::fields::{selectors, Field, WAS_VALIDATED_CLASS};
use review_core::render::escape_html;
use review_core::{FileAttachment, FormState, InputMode, Language, ViewEffect};
use std::collections::HashMap;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{
    Document, Element, HtmlElement, HtmlFormElement, HtmlInputElement, HtmlSelectElement,
    HtmlTextAreaElement, ScrollBehavior, ScrollIntoViewOptions,
};

const FILE_INFO_CLASS: &str = "mt-2 text-muted file-info";

/// Handles to every element the controller works with.
///
/// Elements missing from the page are simply absent; effects aimed at
/// them are skipped.
pub struct ViewModel {
    document: Document,
    elements: HashMap<Field, Element>,
}

impl ViewModel {
    pub fn bind(document: &Document) -> Self {
        let elements = Field::ALL
            .iter()
            .filter_map(|field| {
                document
                    .get_element_by_id(field.dom_id())
                    .map(|element| (*field, element))
            })
            .collect();

        Self {
            document: document.clone(),
            elements,
        }
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn element(&self, field: Field) -> Option<&Element> {
        self.elements.get(&field)
    }

    fn cast<T: JsCast>(&self, field: Field) -> Option<T> {
        self.element(field)
            .and_then(|element| element.clone().dyn_into::<T>().ok())
    }

    pub fn textarea(&self) -> Option<HtmlTextAreaElement> {
        self.cast(Field::CodeText)
    }

    /// Current value of the language `<select>`; an unknown value counts as unset
    pub fn selected_language(&self) -> Option<Language> {
        let select: HtmlSelectElement = self.cast(Field::Language)?;
        match Language::parse(&select.value()) {
            Ok(language) => language,
            Err(e) => {
                web_sys::console::warn_1(&e.to_string().into());
                None
            }
        }
    }

    pub fn mode(&self) -> InputMode {
        match self.cast::<HtmlInputElement>(Field::FileMethod) {
            Some(radio) if radio.checked() => InputMode::File,
            _ => InputMode::Text,
        }
    }

    /// First file of the upload input, name and size only
    pub fn selected_file(&self) -> Option<FileAttachment> {
        let input: HtmlInputElement = self.cast(Field::FileInput)?;
        let file = input.files()?.get(0)?;
        Some(FileAttachment::new(file.name(), file.size() as u64))
    }

    /// Snapshot of the form as the page currently shows it
    pub fn read_form(&self, code: String) -> FormState {
        FormState {
            selected_language: self.selected_language(),
            input_mode: self.mode(),
            code_text: code,
            selected_file: self.selected_file(),
        }
    }

    pub fn mark_validated(&self) -> Result<(), JsValue> {
        match self.element(Field::Form) {
            Some(form) => form.class_list().add_1(WAS_VALIDATED_CLASS),
            None => Ok(()),
        }
    }

    pub fn apply(&self, effect: &ViewEffect, editor: &CodeSurface) -> Result<(), JsValue> {
        match effect {
            ViewEffect::ShowTextSurface => self.set_display(Field::TextSection, "block"),
            ViewEffect::HideTextSurface => self.set_display(Field::TextSection, "none"),
            ViewEffect::ShowFileSurface => self.set_display(Field::FileSection, "block"),
            ViewEffect::HideFileSurface => self.set_display(Field::FileSection, "none"),
            ViewEffect::SetFileRequired(required) => {
                if let Some(input) = self.cast::<HtmlInputElement>(Field::FileInput) {
                    input.set_required(*required);
                }
                Ok(())
            }
            ViewEffect::CheckModeControl(mode) => {
                let (on, off) = match mode {
                    InputMode::Text => (Field::TextMethod, Field::FileMethod),
                    InputMode::File => (Field::FileMethod, Field::TextMethod),
                };
                if let Some(radio) = self.cast::<HtmlInputElement>(on) {
                    radio.set_checked(true);
                }
                if let Some(radio) = self.cast::<HtmlInputElement>(off) {
                    radio.set_checked(false);
                }
                Ok(())
            }
            ViewEffect::SelectLanguage(language) => {
                if let Some(select) = self.cast::<HtmlSelectElement>(Field::Language) {
                    select.set_value(language.as_str());
                }
                Ok(())
            }
            ViewEffect::SetEditorMode(mode) => {
                editor.set_mode(mode);
                Ok(())
            }
            ViewEffect::SetAcceptedExtensions(accept) => match self.element(Field::FileInput) {
                Some(input) => input.set_attribute("accept", accept),
                None => Ok(()),
            },
            ViewEffect::ShowFileInfo(caption) => self.show_file_info(caption),
            ViewEffect::ClearFileInfo => self.clear_file_info(),
            ViewEffect::SetCode(code) => {
                editor.set_value(code);
                Ok(())
            }
            ViewEffect::ResetForm => {
                if let Some(form) = self.cast::<HtmlFormElement>(Field::Form) {
                    form.reset();
                    form.class_list().remove_1(WAS_VALIDATED_CLASS)?;
                }
                Ok(())
            }
            ViewEffect::ScrollToTextSurface => {
                if let Some(section) = self.element(Field::TextSection) {
                    let options = ScrollIntoViewOptions::new();
                    options.set_behavior(ScrollBehavior::Smooth);
                    section.scroll_into_view_with_scroll_into_view_options(&options);
                }
                Ok(())
            }
            ViewEffect::Notify(notification) => {
                alerts::show(&self.document, notification).map(|_| ())
            }
        }
    }

    /// Apply effects in order; a failing effect is logged and the rest still run
    pub fn apply_all(&self, effects: &[ViewEffect], editor: &CodeSurface) {
        for effect in effects {
            if let Err(e) = self.apply(effect, editor) {
                web_sys::console::error_2(&format!("Failed to apply {:?}:", effect).into(), &e);
            }
        }
    }

    fn set_display(&self, field: Field, display: &str) -> Result<(), JsValue> {
        match self.cast::<HtmlElement>(field) {
            Some(element) => element.style().set_property("display", display),
            None => Ok(()),
        }
    }

    /// Replace the caption next to the file input
    fn show_file_info(&self, caption: &str) -> Result<(), JsValue> {
        let Some(parent) = self
            .element(Field::FileInput)
            .and_then(|input| input.parent_element())
        else {
            return Ok(());
        };

        if let Some(existing) = parent.query_selector(selectors::FILE_INFO)? {
            existing.remove();
        }

        let info = self.document.create_element("div")?;
        info.set_class_name(FILE_INFO_CLASS);
        info.set_inner_html(&format!(
            "<small><i class=\"fas fa-file me-1\"></i>{}</small>",
            escape_html(caption)
        ));
        parent.append_child(&info)?;
        Ok(())
    }

    fn clear_file_info(&self) -> Result<(), JsValue> {
        while let Some(info) = self.document.query_selector(selectors::FILE_INFO)? {
            info.remove();
        }
        Ok(())
    }
}

#[cfg(test)]
#[cfg(target_arch = "wasm32")]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    const FORM: &str = r#"
        <form id="codeForm">
          <select id="language">
            <option value="">Choose</option>
            <option value="python">Python</option>
            <option value="javascript">JavaScript</option>
          </select>
          <input type="radio" name="input_method" id="textarea_method" checked>
          <input type="radio" name="input_method" id="file_method">
          <div id="textarea_section"><textarea id="code_content"></textarea></div>
          <div id="file_upload_section" style="display: none">
            <div><input type="file" id="code_file"></div>
          </div>
        </form>
    "#;

    fn mount() -> (Document, ViewModel) {
        let document = web_sys::window().unwrap().document().unwrap();
        document.body().unwrap().set_inner_html(FORM);
        let view = ViewModel::bind(&document);
        (document, view)
    }

    #[wasm_bindgen_test]
    fn test_binds_present_fields_only() {
        let (_, view) = mount();
        assert!(view.element(Field::Form).is_some());
        assert!(view.element(Field::FileInput).is_some());
        assert!(view.element(Field::LoadingModal).is_none());
    }

    #[wasm_bindgen_test]
    fn test_mode_effects_toggle_sections() {
        let (_, view) = mount();
        let editor = CodeSurface::attach(view.textarea());

        view.apply_all(
            &[
                ViewEffect::CheckModeControl(InputMode::File),
                ViewEffect::HideTextSurface,
                ViewEffect::ShowFileSurface,
                ViewEffect::SetFileRequired(true),
            ],
            &editor,
        );

        assert_eq!(view.mode(), InputMode::File);
        let input: HtmlInputElement = view.cast(Field::FileInput).unwrap();
        assert!(input.required());
        let section: HtmlElement = view.cast(Field::TextSection).unwrap();
        assert_eq!(section.style().get_property_value("display").unwrap(), "none");
    }

    #[wasm_bindgen_test]
    fn test_language_and_code_round_trip_through_page() {
        let (_, view) = mount();
        let editor = CodeSurface::attach(view.textarea());

        view.apply_all(
            &[
                ViewEffect::SelectLanguage(Language::JavaScript),
                ViewEffect::SetCode("const answer = 42;".to_string()),
            ],
            &editor,
        );

        let form = view.read_form(editor.value());
        assert_eq!(form.selected_language, Some(Language::JavaScript));
        assert_eq!(form.code_text, "const answer = 42;");
        assert_eq!(form.input_mode, InputMode::Text);
    }

    #[wasm_bindgen_test]
    fn test_file_info_is_replaced_not_stacked() {
        let (document, view) = mount();
        let editor = CodeSurface::attach(view.textarea());

        view.apply_all(&[ViewEffect::ShowFileInfo("Selected: a.py (1 KB)".into())], &editor);
        view.apply_all(&[ViewEffect::ShowFileInfo("Selected: <b>.py (2 KB)".into())], &editor);

        let infos = document.query_selector_all(".file-info").unwrap();
        assert_eq!(infos.length(), 1);
        let info = document.query_selector(".file-info").unwrap().unwrap();
        assert!(info.inner_html().contains("&lt;b&gt;.py"));

        view.apply_all(&[ViewEffect::ClearFileInfo], &editor);
        assert!(document.query_selector(".file-info").unwrap().is_none());
    }
}
