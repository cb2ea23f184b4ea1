//! Code surface: CodeMirror when the page loads it, the bare textarea otherwise

use js_sys::{Object, Reflect};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::HtmlTextAreaElement;

// CodeMirror 5 global loaded from the CDN by the page template
#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_name = CodeMirror)]
    #[derive(Clone)]
    pub type CodeMirrorEditor;

    #[wasm_bindgen(catch, js_namespace = CodeMirror, js_name = fromTextArea)]
    fn from_text_area(
        textarea: &HtmlTextAreaElement,
        options: &JsValue,
    ) -> Result<CodeMirrorEditor, JsValue>;

    #[wasm_bindgen(method, js_name = getValue)]
    fn get_value(this: &CodeMirrorEditor) -> String;

    #[wasm_bindgen(method, js_name = setValue)]
    fn set_value(this: &CodeMirrorEditor, value: &str);

    #[wasm_bindgen(method, js_name = setOption)]
    fn set_option(this: &CodeMirrorEditor, key: &str, value: &JsValue);

    #[wasm_bindgen(method)]
    fn on(this: &CodeMirrorEditor, event: &str, handler: &js_sys::Function);

    /// Copy the editor content back into the textarea
    #[wasm_bindgen(method)]
    fn save(this: &CodeMirrorEditor);

    #[wasm_bindgen(method, js_name = somethingSelected)]
    fn something_selected(this: &CodeMirrorEditor) -> bool;

    #[wasm_bindgen(method, js_name = indentSelection)]
    fn indent_selection(this: &CodeMirrorEditor, how: &str);

    #[wasm_bindgen(method, js_name = replaceSelection)]
    fn replace_selection(this: &CodeMirrorEditor, replacement: &str, select: &str);
}

const INDENT: &str = "    ";

/// Where the user types code
pub struct CodeSurface {
    textarea: Option<HtmlTextAreaElement>,
    editor: Option<CodeMirrorEditor>,
}

impl CodeSurface {
    /// Upgrade the textarea to a CodeMirror editor if the library is present
    pub fn attach(textarea: Option<HtmlTextAreaElement>) -> Self {
        let editor = textarea.as_ref().and_then(|area| {
            if !code_mirror_loaded() {
                return None;
            }
            match editor_options().and_then(|options| from_text_area(area, &options)) {
                Ok(editor) => Some(editor),
                Err(e) => {
                    web_sys::console::error_2(&"CodeMirror setup failed:".into(), &e);
                    None
                }
            }
        });

        Self { textarea, editor }
    }

    pub fn has_editor(&self) -> bool {
        self.editor.is_some()
    }

    pub fn value(&self) -> String {
        match (&self.editor, &self.textarea) {
            (Some(editor), _) => editor.get_value(),
            (None, Some(area)) => area.value(),
            (None, None) => String::new(),
        }
    }

    /// Write both the editor and the underlying textarea
    pub fn set_value(&self, value: &str) {
        if let Some(area) = &self.textarea {
            area.set_value(value);
        }
        if let Some(editor) = &self.editor {
            editor.set_value(value);
        }
    }

    pub fn set_mode(&self, mode: &str) {
        if let Some(editor) = &self.editor {
            editor.set_option("mode", &JsValue::from_str(mode));
        }
    }

    /// Call `handler` with the new text on every editor change.
    ///
    /// The textarea is synced before the handler runs so a plain form post
    /// carries the editor content.
    pub fn on_change<F>(&self, mut handler: F)
    where
        F: FnMut(String) + 'static,
    {
        let Some(editor) = &self.editor else {
            return;
        };

        let source = editor.clone();
        let callback = Closure::<dyn FnMut()>::new(move || {
            source.save();
            handler(source.get_value());
        });
        editor.on("change", callback.as_ref().unchecked_ref());
        callback.forget();
    }
}

fn code_mirror_loaded() -> bool {
    Reflect::has(&js_sys::global(), &JsValue::from_str("CodeMirror")).unwrap_or(false)
}

fn editor_options() -> Result<JsValue, JsValue> {
    let options = Object::new();
    Reflect::set(&options, &"lineNumbers".into(), &JsValue::TRUE)?;
    Reflect::set(&options, &"mode".into(), &"python".into())?;
    Reflect::set(&options, &"theme".into(), &"default".into())?;
    Reflect::set(&options, &"indentUnit".into(), &JsValue::from_f64(4.0))?;
    Reflect::set(&options, &"lineWrapping".into(), &JsValue::TRUE)?;
    Reflect::set(&options, &"autoCloseBrackets".into(), &JsValue::TRUE)?;
    Reflect::set(&options, &"matchBrackets".into(), &JsValue::TRUE)?;
    Reflect::set(&options, &"showCursorWhenSelecting".into(), &JsValue::TRUE)?;

    let keys = Object::new();
    Reflect::set(&keys, &"Ctrl-Space".into(), &"autocomplete".into())?;

    let tab = Closure::<dyn Fn(CodeMirrorEditor)>::new(|editor: CodeMirrorEditor| {
        indent_or_insert(&editor);
    });
    Reflect::set(&keys, &"Tab".into(), tab.as_ref())?;
    tab.forget();

    Reflect::set(&options, &"extraKeys".into(), &keys)?;

    Ok(options.into())
}

/// Tab indents a selection, otherwise inserts spaces at the cursor
fn indent_or_insert(editor: &CodeMirrorEditor) {
    if editor.something_selected() {
        editor.indent_selection("add");
    } else {
        editor.replace_selection(INDENT, "end");
    }
}

#[cfg(test)]
#[cfg(target_arch = "wasm32")]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    fn textarea() -> HtmlTextAreaElement {
        let document = web_sys::window().unwrap().document().unwrap();
        document
            .create_element("textarea")
            .unwrap()
            .dyn_into::<HtmlTextAreaElement>()
            .unwrap()
    }

    #[wasm_bindgen_test]
    fn test_falls_back_to_textarea() {
        let surface = CodeSurface::attach(Some(textarea()));
        assert!(!surface.has_editor());

        surface.set_value("print('hi')");
        assert_eq!(surface.value(), "print('hi')");
    }

    #[wasm_bindgen_test]
    fn test_missing_textarea_is_empty() {
        let surface = CodeSurface::attach(None);
        surface.set_value("ignored");
        assert_eq!(surface.value(), "");
    }

    #[wasm_bindgen_test]
    fn test_options_bind_tab_to_a_handler() {
        let options = editor_options().unwrap();
        let keys = Reflect::get(&options, &"extraKeys".into()).unwrap();

        assert!(Reflect::get(&keys, &"Tab".into()).unwrap().is_function());
        assert_eq!(
            Reflect::get(&keys, &"Ctrl-Space".into()).unwrap().as_string().as_deref(),
            Some("autocomplete")
        );
        assert_eq!(
            Reflect::get(&options, &"indentUnit".into()).unwrap().as_f64(),
            Some(4.0)
        );
    }
}
