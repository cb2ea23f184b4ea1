//! The submission form: controller, lifecycle and DOM events wired together

use crate::alerts;
use crate::busy::BusyIndicator;
use crate::editor::CodeSurface;
use crate::timers::Timeout;
use crate::view::ViewModel;
use review_core::fields::{Field, CONFIG_ATTRIBUTE};
use review_core::{
    AttemptId, FormState, InputModeController, Language, Notification, ReviewConfig, ReviewError,
    SubmissionHost, SubmissionLifecycle, TimerHandle, ViewEffect,
};
use std::cell::RefCell;
use std::rc::{Rc, Weak};
use std::time::Duration;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Event, EventTarget};

/// Browser side of [`SubmissionHost`]
pub struct PageHost {
    document: Document,
    busy: BusyIndicator,
    page: Weak<RefCell<FormPage>>,
}

impl SubmissionHost for PageHost {
    fn show_busy(&mut self) {
        self.busy.show();
    }

    fn hide_busy(&mut self) {
        self.busy.hide();
    }

    fn notify(&mut self, notification: Notification) {
        if let Err(e) = alerts::show(&self.document, &notification) {
            web_sys::console::error_2(&"Failed to show alert:".into(), &e);
        }
    }

    fn schedule_timeout(
        &mut self,
        delay: Duration,
        attempt: AttemptId,
    ) -> review_core::Result<TimerHandle> {
        let page = self.page.clone();
        let timeout = Timeout::schedule(delay, move || {
            with_page(&page, "timeout", |page| page.on_timeout(attempt));
        })
        .map_err(|e| ReviewError::Timer(format!("{:?}", e)))?;

        Ok(TimerHandle(timeout.id()))
    }

    fn cancel_timeout(&mut self, handle: TimerHandle) {
        Timeout::cancel_id(handle.0);
    }
}

pub struct FormPage {
    config: ReviewConfig,
    controller: InputModeController,
    lifecycle: SubmissionLifecycle,
    view: ViewModel,
    editor: CodeSurface,
    host: PageHost,
    this: Weak<RefCell<FormPage>>,
}

impl FormPage {
    /// Bind the page and register every listener
    pub fn mount(document: &Document) -> Result<Rc<RefCell<FormPage>>, JsValue> {
        let view = ViewModel::bind(document);
        let config = read_config(&view);

        let page = Rc::new_cyclic(|this: &Weak<RefCell<FormPage>>| {
            let editor = CodeSurface::attach(view.textarea());
            let host = PageHost {
                document: document.clone(),
                busy: BusyIndicator::new(view.element(Field::LoadingModal).cloned()),
                page: this.clone(),
            };
            RefCell::new(FormPage {
                controller: InputModeController::new(&config),
                lifecycle: SubmissionLifecycle::new(&config),
                config,
                view,
                editor,
                host,
                this: this.clone(),
            })
        });

        wire(&page, document)?;
        Ok(page)
    }

    pub fn config(&self) -> &ReviewConfig {
        &self.config
    }

    pub fn load_sample(&mut self, language: Language) {
        let effects = self.controller.load_sample(language);
        self.apply(&effects);
    }

    fn apply(&self, effects: &[ViewEffect]) {
        self.view.apply_all(effects, &self.editor);
    }

    fn read_form(&self) -> FormState {
        self.view.read_form(self.editor.value())
    }

    fn on_mode_change(&mut self) {
        let effects = self.controller.select_mode(self.view.mode());
        self.apply(&effects);
    }

    fn on_language_change(&mut self) {
        let effects = self.controller.select_language(self.view.selected_language());
        self.apply(&effects);
    }

    fn on_file_change(&mut self) {
        let effects = self.controller.attach_file(self.view.selected_file());
        self.apply(&effects);
    }

    fn on_text_input(&mut self, text: &str) {
        // the select may have been changed without an event (form reset, autofill)
        let form = self.read_form();
        self.controller.sync_form(form);
        let effects = self.controller.text_input(text);
        self.apply(&effects);
    }

    /// Pasted text lands in the textarea after the event, so read it later
    fn on_paste(&mut self) {
        let this = self.this.clone();
        let scheduled = Timeout::schedule(self.config.paste_delay(), move || {
            with_page(&this, "paste", |page| {
                let text = page.editor.value();
                page.on_text_input(&text);
            });
        });
        if let Err(e) = scheduled {
            web_sys::console::error_2(&"Failed to defer paste handling:".into(), &e);
        }
    }

    fn on_clear(&mut self) {
        let effects = self.controller.clear();
        self.apply(&effects);
    }

    fn on_submit(&mut self, event: &Event) {
        let form = self.read_form();
        self.controller.sync_form(form.clone());

        let decision = self.lifecycle.submit(&form, &mut self.host);
        if !decision.is_proceed() {
            event.prevent_default();
            event.stop_propagation();
        }

        if let Err(e) = self.view.mark_validated() {
            web_sys::console::error_1(&e);
        }
    }

    fn on_timeout(&mut self, attempt: AttemptId) {
        self.lifecycle.on_timeout(attempt, &mut self.host);
    }

    fn on_visibility_change(&mut self) {
        let hidden = self.view.document().hidden();
        self.lifecycle.on_visibility_change(hidden, &mut self.host);
    }

    fn on_unload(&mut self) {
        self.lifecycle.on_unload(&mut self.host);
    }
}

/// Config from the form's `data-review-config` JSON, defaults otherwise
fn read_config(view: &ViewModel) -> ReviewConfig {
    let raw = view
        .element(Field::Form)
        .and_then(|form| form.get_attribute(CONFIG_ATTRIBUTE));

    match raw {
        Some(json) => ReviewConfig::from_json_str(&json).unwrap_or_else(|e| {
            web_sys::console::warn_1(&format!("Ignoring page config: {}", e).into());
            ReviewConfig::default()
        }),
        None => ReviewConfig::default(),
    }
}

/// Run `f` on the page unless it is gone or already borrowed.
///
/// Programmatic editor updates fire change events while the page is
/// borrowed; those are dropped here.
fn with_page<F>(page: &Weak<RefCell<FormPage>>, what: &str, f: F)
where
    F: FnOnce(&mut FormPage),
{
    let Some(page) = page.upgrade() else {
        return;
    };
    match page.try_borrow_mut() {
        Ok(mut page) => f(&mut page),
        Err(_) => web_sys::console::log_1(&format!("Skipped re-entrant {} event", what).into()),
    };
}

fn listen<F>(
    target: &EventTarget,
    event: &str,
    page: &Rc<RefCell<FormPage>>,
    handler: F,
) -> Result<(), JsValue>
where
    F: Fn(&mut FormPage, &Event) + 'static,
{
    let page = Rc::downgrade(page);
    let name = event.to_string();
    let callback = Closure::<dyn FnMut(Event)>::new(move |event: Event| {
        with_page(&page, &name, |page| handler(page, &event));
    });
    target.add_event_listener_with_callback(event, callback.as_ref().unchecked_ref())?;
    callback.forget();
    Ok(())
}

fn wire(page: &Rc<RefCell<FormPage>>, document: &Document) -> Result<(), JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("No window object available"))?;

    let (fields, has_editor) = {
        let page = page.borrow();
        let bound: Vec<(Field, EventTarget)> = Field::ALL
            .iter()
            .filter_map(|field| {
                page.view
                    .element(*field)
                    .map(|element| (*field, EventTarget::from(element.clone())))
            })
            .collect();
        (bound, page.editor.has_editor())
    };

    for (field, target) in &fields {
        match field {
            Field::TextMethod | Field::FileMethod => {
                listen(target, "change", page, |page, _| page.on_mode_change())?
            }
            Field::Language => {
                listen(target, "change", page, |page, _| page.on_language_change())?
            }
            Field::FileInput => listen(target, "change", page, |page, _| page.on_file_change())?,
            Field::CodeText => {
                listen(target, "input", page, |page, _| {
                    let text = page.editor.value();
                    page.on_text_input(&text);
                })?;
                listen(target, "paste", page, |page, _| page.on_paste())?;
            }
            Field::ClearButton => listen(target, "click", page, |page, _| page.on_clear())?,
            Field::Form => listen(target, "submit", page, |page, event| page.on_submit(event))?,
            _ => {}
        }
    }

    // CodeMirror hides the textarea, so its own change event stands in for `input`
    if has_editor {
        let weak = Rc::downgrade(page);
        page.borrow().editor.on_change(move |text| {
            with_page(&weak, "editor change", |page| page.on_text_input(&text));
        });
    }

    listen(document, "visibilitychange", page, |page, _| page.on_visibility_change())?;
    listen(&window, "beforeunload", page, |page, _| page.on_unload())?;

    Ok(())
}

#[cfg(test)]
#[cfg(target_arch = "wasm32")]
mod wasm_tests {
    use super::*;
    use crate::timers::sleep;
    use review_core::{InputMode, SubmissionState};
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    const FORM: &str = r#"
        <main>
          <form id="codeForm" data-review-config='{"min_code_chars": 5}'>
            <select id="language">
              <option value="">Choose</option>
              <option value="python">Python</option>
              <option value="javascript">JavaScript</option>
            </select>
            <input type="radio" name="input_method" id="textarea_method" checked>
            <input type="radio" name="input_method" id="file_method">
            <div id="textarea_section"><textarea id="code_content"></textarea></div>
            <div id="file_upload_section"><div><input type="file" id="code_file"></div></div>
            <button type="button" id="clearBtn">Clear</button>
          </form>
        </main>
    "#;

    fn mount() -> Rc<RefCell<FormPage>> {
        let document = web_sys::window().unwrap().document().unwrap();
        document.body().unwrap().set_inner_html(FORM);
        FormPage::mount(&document).unwrap()
    }

    #[wasm_bindgen_test]
    fn test_config_read_from_form_attribute() {
        let page = mount();
        assert_eq!(page.borrow().config().min_code_chars, 5);
    }

    #[wasm_bindgen_test]
    fn test_load_sample_fills_form() {
        let page = mount();
        page.borrow_mut().load_sample(Language::Python);

        let page = page.borrow();
        let form = page.read_form();
        assert_eq!(form.selected_language, Some(Language::Python));
        assert_eq!(form.input_mode, InputMode::Text);
        assert!(form.code_text.contains("calculate_average"));
    }

    #[wasm_bindgen_test]
    fn test_blocked_submit_prevents_default() {
        let page = mount();
        let event = Event::new_with_event_init_dict("submit", &{
            let init = web_sys::EventInit::new();
            init.set_cancelable(true);
            init
        })
        .unwrap();

        page.borrow_mut().on_submit(&event);
        assert!(event.default_prevented());
        assert_eq!(page.borrow().lifecycle.state(), SubmissionState::Idle);

        let document = web_sys::window().unwrap().document().unwrap();
        let alert = document.query_selector(".alert-warning").unwrap();
        assert!(alert.is_some());
    }

    #[wasm_bindgen_test]
    fn test_clear_restores_text_mode() {
        let page = mount();
        page.borrow_mut().load_sample(Language::JavaScript);
        page.borrow_mut().on_clear();

        let page = page.borrow();
        assert_eq!(page.read_form(), FormState::default());
    }

    #[wasm_bindgen_test]
    async fn test_paste_detects_language_after_delay() {
        let page = mount();
        let textarea = page.borrow().view.textarea().unwrap();
        textarea.set_value("import os\nprint(os.getcwd())");

        textarea.dispatch_event(&Event::new("paste").unwrap()).unwrap();
        assert_eq!(page.borrow().view.selected_language(), None);

        let delay = page.borrow().config().paste_delay();
        sleep(delay + Duration::from_millis(50)).await;

        assert_eq!(page.borrow().view.selected_language(), Some(Language::Python));
        assert_eq!(page.borrow().controller.language(), Some(Language::Python));
    }
}
