//! DearFlip bindings
//!
//! The library is a jQuery plugin: `jQuery(container).flipBook(url, options)`.
//! Its enum constants live on the global `DFLIP` object.

use std::rc::Rc;

use js_sys::Reflect;
use serde::Serialize;
use wasm_bindgen::prelude::*;
use web_sys::{Element, Window};

use super::dom::CONTAINER_ID;
use crate::error::{describe_js, ReaderError, Result};
use crate::viewer::{FlipbookEngine, FlipbookOptions, LibraryConstants, ViewerEvent, ViewerEvents};

#[wasm_bindgen]
extern "C" {
    type JQuery;

    #[wasm_bindgen(catch, js_name = jQuery)]
    fn jquery(target: &Element) -> std::result::Result<JQuery, JsValue>;

    #[wasm_bindgen(method, catch, js_name = flipBook)]
    fn flip_book(this: &JQuery, source: &str, options: &JsValue) -> std::result::Result<JsValue, JsValue>;
}

pub struct DearFlipEngine {
    window: Window,
}

impl DearFlipEngine {
    pub fn new(window: Window) -> Self {
        Self { window }
    }

    fn container(&self) -> Result<Element> {
        self.window
            .document()
            .and_then(|document| document.get_element_by_id(CONTAINER_ID))
            .ok_or_else(|| ReaderError::MissingElement(format!("#{}", CONTAINER_ID)))
    }
}

impl FlipbookEngine for DearFlipEngine {
    fn mount(&self, pdf_url: &str, options: &FlipbookOptions, events: ViewerEvents) -> Result<()> {
        let container = self.container()?;

        let js_options = options
            .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
            .map_err(|e| ReaderError::ViewerMount(e.to_string()))?;
        attach_callbacks(&js_options, events)?;

        let target = jquery(&container).map_err(|e| ReaderError::ViewerMount(describe_js(&e)))?;
        target
            .flip_book(pdf_url, &js_options)
            .map_err(|e| ReaderError::ViewerMount(describe_js(&e)))?;

        Ok(())
    }

    fn constants(&self) -> LibraryConstants {
        let dflip = property(&self.window, "DFLIP");
        let page_mode = property(&dflip, "PAGE_MODE");
        let single_page_mode = property(&dflip, "SINGLE_PAGE_MODE");

        LibraryConstants::with_overrides(
            code(&page_mode, "AUTO"),
            code(&page_mode, "SINGLE"),
            code(&single_page_mode, "AUTO"),
        )
    }
}

/// `zoomChange(isZoomed)` and `onReady(book)` hooks
fn attach_callbacks(js_options: &JsValue, events: ViewerEvents) -> Result<()> {
    let zoom_events = Rc::clone(&events);
    let zoom_change = Closure::<dyn Fn(JsValue)>::new(move |zoomed: JsValue| {
        zoom_events(ViewerEvent::ZoomChanged(zoomed.is_truthy()));
    });

    let on_ready = Closure::<dyn Fn(JsValue)>::new(move |book: JsValue| {
        let page_count = property(&book, "pageCount")
            .as_f64()
            .filter(|count| count.is_finite() && *count >= 0.0)
            .map(|count| count as u32);
        events(ViewerEvent::Ready { page_count });
    });

    Reflect::set(js_options, &"zoomChange".into(), &zoom_change.into_js_value())
        .map_err(ReaderError::js)?;
    Reflect::set(js_options, &"onReady".into(), &on_ready.into_js_value())
        .map_err(ReaderError::js)?;
    Ok(())
}

/// `target[key]`, or `undefined` when `target` has no properties
fn property(target: &JsValue, key: &str) -> JsValue {
    Reflect::get(target, &JsValue::from_str(key)).unwrap_or(JsValue::UNDEFINED)
}

fn code(target: &JsValue, key: &str) -> Option<u32> {
    property(target, key)
        .as_f64()
        .filter(|value| value.is_finite() && *value >= 0.0 && value.fract() == 0.0)
        .map(|value| value as u32)
}
