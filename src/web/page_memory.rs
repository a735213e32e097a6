//! Page memory backed by the host's global `getLastPage(id)`
//!
//! The function is looked up on every call, so a store script loaded
//! after the reader is still picked up.

use async_trait::async_trait;
use js_sys::{Function, Promise, Reflect};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::Window;

use crate::document::PageNumber;
use crate::error::{describe_js, ReaderError, Result};
use crate::page_memory::PageMemory;

const LOOKUP_FUNCTION: &str = "getLastPage";

pub struct GlobalPageMemory {
    window: Window,
}

impl GlobalPageMemory {
    pub fn new(window: Window) -> Self {
        Self { window }
    }

    fn lookup(&self) -> Option<Function> {
        Reflect::get(&self.window, &JsValue::from_str(LOOKUP_FUNCTION))
            .ok()
            .and_then(|value| value.dyn_into::<Function>().ok())
    }
}

#[async_trait(?Send)]
impl PageMemory for GlobalPageMemory {
    async fn last_page(&self, id: &str) -> Result<Option<PageNumber>> {
        let Some(function) = self.lookup() else {
            return Ok(None);
        };

        let returned = function
            .call1(&self.window, &JsValue::from_str(id))
            .map_err(|e| ReaderError::PageMemory(describe_js(&e)))?;
        let value = JsFuture::from(Promise::resolve(&returned))
            .await
            .map_err(|e| ReaderError::PageMemory(describe_js(&e)))?;

        Ok(stored_page(&value))
    }

    fn is_available(&self) -> bool {
        self.lookup().is_some()
    }
}

/// Positive integer pages count; numeric strings are accepted too
fn stored_page(value: &JsValue) -> Option<PageNumber> {
    if let Some(number) = value.as_f64() {
        return PageNumber::from_f64(number);
    }
    value
        .as_string()
        .and_then(|text| text.trim().parse::<u32>().ok())
        .and_then(PageNumber::new)
}
