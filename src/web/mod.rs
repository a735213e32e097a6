//! Browser host
//!
//! Concrete implementations of the reader's host traits on top of
//! `web-sys`, plus the start-up sequence behind `startReader`.

use std::cell::RefCell;
use std::rc::Rc;

use gloo::events::EventListener;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Window};

use crate::config::ReaderConfig;
use crate::error::{ReaderError, Result};
use crate::reader::{Reader, ReaderHost};
use crate::viewer::DeviceProfile;

pub mod dearflip;
pub mod dom;
pub mod fetch;
pub mod logging;
pub mod page_memory;
pub mod shell;

pub use dearflip::DearFlipEngine;
pub use dom::BrowserDom;
pub use fetch::HttpFetcher;
pub use page_memory::GlobalPageMemory;
pub use shell::Shell;

thread_local! {
    static SHELL: RefCell<Option<Rc<Shell>>> = const { RefCell::new(None) };
}

/// Build the browser reader and schedule its bootstrap for DOM ready
pub fn start(config: ReaderConfig) -> Result<()> {
    logging::init(&config.log_filter);

    let window = web_sys::window().ok_or_else(|| ReaderError::MissingElement("window".to_string()))?;
    let dom = Rc::new(BrowserDom::new(window.clone())?);
    let user_agent = window.navigator().user_agent().unwrap_or_default();
    let profile = DeviceProfile::from_user_agent(&user_agent);

    tracing::debug!("Starting reader (mobile: {})", profile.is_mobile);

    let reader = Rc::new(Reader::new(
        config,
        ReaderHost {
            dom: dom.clone(),
            fetcher: Rc::new(HttpFetcher::new(window.clone())),
            page_memory: Rc::new(GlobalPageMemory::new(window.clone())),
            engine: Rc::new(DearFlipEngine::new(window.clone())),
            profile,
        },
    ));

    let document = dom.document().clone();
    when_dom_ready(&document, move || run(window, dom, reader));
    Ok(())
}

/// Theme applied by the running reader, for other page scripts
///
/// `undefined` until the shell is installed on DOM ready.
#[wasm_bindgen(js_name = "currentTheme")]
pub fn current_theme() -> Option<String> {
    SHELL.with(|slot| {
        slot.borrow()
            .as_ref()
            .map(|shell| shell.current_theme().to_string())
    })
}

fn run(window: Window, dom: Rc<BrowserDom>, reader: Rc<Reader>) {
    let shell = Shell::install(dom, Rc::clone(&reader));
    SHELL.with(|slot| *slot.borrow_mut() = Some(shell));

    let search = window.location().search().unwrap_or_default();
    wasm_bindgen_futures::spawn_local(async move {
        let outcome = reader.bootstrap(&search).await;
        tracing::debug!("Bootstrap finished: {:?}", outcome);
    });
}

fn when_dom_ready(document: &Document, callback: impl FnOnce() + 'static) {
    if document.ready_state() == "loading" {
        EventListener::once(document, "DOMContentLoaded", move |_| callback()).forget();
    } else {
        callback();
    }
}
