//! SNQR Reader
//!
//! Browser flipbook reader for the SNQR research library:
//! - Resolves `?doc=` ids against a JSON metadata index
//! - Resumes at an explicit `?page=` or the host's remembered page
//! - Mounts the DearFlip viewer and remounts it on direction toggle
//! - Drives the theme selector and the collapsible control panel
//!
//! The core is written against small host traits ([`ReaderDom`],
//! [`MetadataFetcher`], [`PageMemory`], [`FlipbookEngine`]) and runs
//! natively under test; [`web`] supplies the browser implementations.

use wasm_bindgen::prelude::*;

pub mod bootstrap;
pub mod config;
pub mod direction;
pub mod document;
pub mod dom;
pub mod error;
pub mod metadata;
pub mod page_memory;
pub mod reader;
pub mod session;
pub mod shell;
pub mod viewer;
pub mod web;

#[cfg(test)]
mod testing;

// Re-export common types
pub use bootstrap::{BootOutcome, QueryParams};
pub use config::ReaderConfig;
pub use direction::ToggleOutcome;
pub use document::{Direction, DocumentDescriptor, DocumentId, PageNumber, SessionContext};
pub use dom::ReaderDom;
pub use error::{ReaderError, Result};
pub use metadata::{MetadataFetcher, MetadataResolver};
pub use page_memory::{NoPageMemory, PageMemory, ResumePage};
pub use reader::{Reader, ReaderHost};
pub use viewer::{DeviceProfile, FlipbookEngine, FlipbookOptions, MountOutcome, ViewerAdapter};

/// Initialize the WASM module
#[wasm_bindgen(start)]
pub fn init() {
    // Set up better panic messages in debug mode
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Start the reader on the current page
///
/// `config` is an optional object of camelCase [`ReaderConfig`]
/// overrides. Bootstrap runs on DOM ready.
#[wasm_bindgen(js_name = "startReader")]
pub fn start_reader(config: JsValue) -> std::result::Result<(), JsValue> {
    let config = if config.is_undefined() || config.is_null() {
        ReaderConfig::default()
    } else {
        serde_wasm_bindgen::from_value(config)
            .map_err(|e| ReaderError::Config(e.to_string()))?
    };

    web::start(config).map_err(JsValue::from)
}
