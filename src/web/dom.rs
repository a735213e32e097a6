//! Browser implementation of the page surface

use js_sys::Reflect;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, HtmlElement, HtmlSelectElement, Window};

use crate::document::SessionContext;
use crate::dom::ReaderDom;
use crate::error::{ReaderError, Result};
use crate::shell::{ThemeSurface, AVAILABLE_THEMES};

pub const CONTAINER_ID: &str = "flipbookContainer";
pub const BACK_BUTTON_ID: &str = "backButton";
pub const STORED_PAGE_ID: &str = "storedPage";
pub const DIRECTION_BUTTON_ID: &str = "toggleDirectionBtn";
pub const THEME_SELECT_ID: &str = "themeSelect";
pub const PDF_INFO_SELECTOR: &str = "[data-pdf-info]";

const PLACEHOLDER_STYLE: &str = "color: red; padding: 20px; text-align: center;";

pub struct BrowserDom {
    window: Window,
    document: Document,
}

impl BrowserDom {
    pub fn new(window: Window) -> Result<Self> {
        let document = window
            .document()
            .ok_or_else(|| ReaderError::MissingElement("document".to_string()))?;
        Ok(Self { window, document })
    }

    pub fn window(&self) -> &Window {
        &self.window
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn element(&self, id: &str) -> Option<Element> {
        self.document.get_element_by_id(id)
    }

    pub fn body(&self) -> Option<HtmlElement> {
        self.document.body()
    }

    /// Every element matching `selector`, as HTML elements
    pub fn select_all(&self, selector: &str) -> Vec<HtmlElement> {
        let Ok(nodes) = self.document.query_selector_all(selector) else {
            return Vec::new();
        };
        (0..nodes.length())
            .filter_map(|i| nodes.item(i))
            .filter_map(|node| node.dyn_into::<HtmlElement>().ok())
            .collect()
    }

    fn container(&self) -> Result<Element> {
        self.element(CONTAINER_ID)
            .ok_or_else(|| ReaderError::MissingElement(format!("#{}", CONTAINER_ID)))
    }

    fn set_global(&self, key: &str, value: &str) {
        if let Err(e) = Reflect::set(&self.window, &JsValue::from_str(key), &JsValue::from_str(value)) {
            tracing::warn!("Cannot set window.{}: {:?}", key, e);
        }
    }
}

impl ReaderDom for BrowserDom {
    fn clear_container(&self) -> Result<()> {
        self.container()?.set_inner_html("");
        Ok(())
    }

    fn show_error(&self, message: &str) {
        let Ok(container) = self.container() else {
            return;
        };
        let Ok(placeholder) = self.document.create_element("div") else {
            return;
        };
        let _ = placeholder.set_attribute("style", PLACEHOLDER_STYLE);
        placeholder.set_text_content(Some(message));

        container.set_inner_html("");
        if let Err(e) = container.append_child(&placeholder) {
            tracing::warn!("Cannot insert error placeholder: {:?}", e);
        }
    }

    fn set_stored_page_label(&self, text: &str) {
        if let Some(label) = self.element(STORED_PAGE_ID) {
            label.set_text_content(Some(text));
        }
    }

    fn set_back_href(&self, url: &str) {
        if let Some(anchor) = self.element(BACK_BUTTON_ID) {
            let _ = anchor.set_attribute("href", url);
        }
    }

    fn publish_pdf_info(&self, name: &str) {
        let display = if name.is_empty() { "none" } else { "inline" };
        for receptor in self.select_all(PDF_INFO_SELECTOR) {
            receptor.set_text_content(Some(name));
            let _ = receptor.style().set_property("display", display);
        }
    }

    fn set_body_overflow_locked(&self, locked: bool) {
        if let Some(body) = self.body() {
            let overflow = if locked { "hidden" } else { "auto" };
            let _ = body.style().set_property("overflow", overflow);
        }
    }

    fn set_direction_tooltip(&self, text: &str) {
        if let Some(button) = self.element(DIRECTION_BUTTON_ID) {
            let _ = button.set_attribute("title", text);
        }
    }

    fn navigate(&self, url: &str) {
        if let Err(e) = self.window.location().set_href(url) {
            tracing::error!("Navigation to {} failed: {:?}", url, e);
        }
    }

    fn origin(&self) -> String {
        self.window.location().origin().unwrap_or_default()
    }

    fn expose_session(&self, context: &SessionContext) {
        self.set_global("currentPdf", &context.current_pdf);
        self.set_global("currentPdfId", &context.current_pdf_id);
    }
}

impl ThemeSurface for BrowserDom {
    fn apply_body_theme(&self, theme: &str) {
        let Some(body) = self.body() else {
            return;
        };
        let classes = body.class_list();
        for known in AVAILABLE_THEMES {
            let _ = classes.remove_1(&format!("theme-{}", known));
        }
        let _ = classes.add_1(&format!("theme-{}", theme));
        let _ = body.set_attribute("data-theme", theme);
    }

    fn sync_selector(&self, theme: &str) {
        if let Some(select) = self
            .element(THEME_SELECT_ID)
            .and_then(|element| element.dyn_into::<HtmlSelectElement>().ok())
        {
            select.set_value(theme);
        }
    }
}
