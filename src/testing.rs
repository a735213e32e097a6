//! In-memory doubles for the host seams, shared by unit tests

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::io;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tracing::subscriber::DefaultGuard;

use crate::document::{PageNumber, SessionContext};
use crate::dom::ReaderDom;
use crate::error::{ReaderError, Result};
use crate::metadata::MetadataFetcher;
use crate::page_memory::PageMemory;
use crate::viewer::{FlipbookEngine, FlipbookOptions, LibraryConstants, ViewerEvent, ViewerEvents};

pub const TEST_ORIGIN: &str = "https://reader.snqrglobal.com";

/// Metadata fetcher with canned responses
#[derive(Default)]
pub struct FakeFetcher {
    queued: RefCell<VecDeque<Result<String>>>,
    repeat: Option<std::result::Result<String, u16>>,
    requests: RefCell<Vec<String>>,
}

impl FakeFetcher {
    /// Always answer with `body`
    pub fn ok(body: &str) -> Self {
        Self {
            repeat: Some(Ok(body.to_string())),
            ..Self::default()
        }
    }

    /// Always answer with an HTTP error status
    pub fn http_error(status: u16) -> Self {
        Self {
            repeat: Some(Err(status)),
            ..Self::default()
        }
    }

    /// Answer with each response in turn
    pub fn sequence(responses: Vec<Result<String>>) -> Self {
        Self {
            queued: RefCell::new(responses.into()),
            ..Self::default()
        }
    }

    pub fn calls(&self) -> usize {
        self.requests.borrow().len()
    }

    pub fn requests(&self) -> Vec<String> {
        self.requests.borrow().clone()
    }
}

#[async_trait(?Send)]
impl MetadataFetcher for FakeFetcher {
    async fn fetch_text(&self, url: &str) -> Result<String> {
        self.requests.borrow_mut().push(url.to_string());
        if let Some(next) = self.queued.borrow_mut().pop_front() {
            return next;
        }
        match &self.repeat {
            Some(Ok(body)) => Ok(body.clone()),
            Some(Err(status)) => Err(ReaderError::MetadataHttp(*status)),
            None => Err(ReaderError::MetadataNetwork("no response queued".to_string())),
        }
    }
}

enum MemoryAnswer {
    Page(Option<u32>),
    Fail(String),
}

/// Page memory with a configurable answer
pub struct FakePageMemory {
    answer: RefCell<MemoryAnswer>,
    lookups: RefCell<Vec<String>>,
}

impl FakePageMemory {
    pub fn returning(page: Option<u32>) -> Self {
        Self {
            answer: RefCell::new(MemoryAnswer::Page(page)),
            lookups: RefCell::new(Vec::new()),
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            answer: RefCell::new(MemoryAnswer::Fail(message.to_string())),
            lookups: RefCell::new(Vec::new()),
        }
    }

    pub fn set_page(&self, page: Option<u32>) {
        *self.answer.borrow_mut() = MemoryAnswer::Page(page);
    }

    pub fn set_failure(&self, message: &str) {
        *self.answer.borrow_mut() = MemoryAnswer::Fail(message.to_string());
    }

    pub fn lookups(&self) -> Vec<String> {
        self.lookups.borrow().clone()
    }
}

#[async_trait(?Send)]
impl PageMemory for FakePageMemory {
    async fn last_page(&self, id: &str) -> Result<Option<PageNumber>> {
        self.lookups.borrow_mut().push(id.to_string());
        match &*self.answer.borrow() {
            MemoryAnswer::Page(page) => Ok(page.and_then(PageNumber::new)),
            MemoryAnswer::Fail(message) => Err(ReaderError::PageMemory(message.clone())),
        }
    }
}

/// One recorded library call
#[derive(Debug, Clone)]
pub struct RecordedMount {
    pub url: String,
    pub options: FlipbookOptions,
}

/// Flipbook library double
#[derive(Default)]
pub struct FakeEngine {
    mounts: RefCell<Vec<RecordedMount>>,
    events: RefCell<Option<ViewerEvents>>,
    failure: Option<String>,
    constants: LibraryConstants,
}

impl FakeEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Throw on every mount
    pub fn failing(message: &str) -> Self {
        Self {
            failure: Some(message.to_string()),
            ..Self::default()
        }
    }

    pub fn with_constants(constants: LibraryConstants) -> Self {
        Self {
            constants,
            ..Self::default()
        }
    }

    pub fn mounts(&self) -> Vec<RecordedMount> {
        self.mounts.borrow().clone()
    }

    pub fn mount_count(&self) -> usize {
        self.mounts.borrow().len()
    }

    pub fn last_mount(&self) -> Option<RecordedMount> {
        self.mounts.borrow().last().cloned()
    }

    /// Fire an event through the latest mount's callbacks
    pub fn emit(&self, event: ViewerEvent) {
        let sink = self.events.borrow().clone();
        if let Some(sink) = sink {
            sink(event);
        }
    }
}

impl FlipbookEngine for FakeEngine {
    fn mount(&self, pdf_url: &str, options: &FlipbookOptions, events: ViewerEvents) -> Result<()> {
        if let Some(message) = &self.failure {
            return Err(ReaderError::ViewerMount(message.clone()));
        }
        self.mounts.borrow_mut().push(RecordedMount {
            url: pdf_url.to_string(),
            options: options.clone(),
        });
        *self.events.borrow_mut() = Some(events);
        Ok(())
    }

    fn constants(&self) -> LibraryConstants {
        self.constants
    }
}

/// DOM double recording every write
pub struct RecordingDom {
    has_container: bool,
    origin: String,
    clears: Cell<usize>,
    error: RefCell<Option<String>>,
    label: RefCell<Option<String>>,
    back_href: RefCell<Option<String>>,
    pdf_info: RefCell<Option<String>>,
    overflow_locked: Cell<Option<bool>>,
    tooltip: RefCell<Option<String>>,
    navigated: RefCell<Option<String>>,
    exposed: RefCell<Option<SessionContext>>,
}

impl RecordingDom {
    pub fn new() -> Self {
        Self::with_origin(TEST_ORIGIN)
    }

    pub fn with_origin(origin: &str) -> Self {
        Self {
            has_container: true,
            origin: origin.to_string(),
            clears: Cell::new(0),
            error: RefCell::new(None),
            label: RefCell::new(None),
            back_href: RefCell::new(None),
            pdf_info: RefCell::new(None),
            overflow_locked: Cell::new(None),
            tooltip: RefCell::new(None),
            navigated: RefCell::new(None),
            exposed: RefCell::new(None),
        }
    }

    pub fn without_container() -> Self {
        Self {
            has_container: false,
            ..Self::new()
        }
    }

    pub fn clears(&self) -> usize {
        self.clears.get()
    }

    pub fn error(&self) -> Option<String> {
        self.error.borrow().clone()
    }

    pub fn label(&self) -> Option<String> {
        self.label.borrow().clone()
    }

    pub fn back_href(&self) -> Option<String> {
        self.back_href.borrow().clone()
    }

    pub fn pdf_info(&self) -> Option<String> {
        self.pdf_info.borrow().clone()
    }

    pub fn overflow_locked(&self) -> Option<bool> {
        self.overflow_locked.get()
    }

    pub fn tooltip(&self) -> Option<String> {
        self.tooltip.borrow().clone()
    }

    pub fn navigated(&self) -> Option<String> {
        self.navigated.borrow().clone()
    }

    pub fn exposed(&self) -> Option<SessionContext> {
        self.exposed.borrow().clone()
    }
}

impl ReaderDom for RecordingDom {
    fn clear_container(&self) -> Result<()> {
        if !self.has_container {
            return Err(ReaderError::MissingElement("flipbookContainer".to_string()));
        }
        self.clears.set(self.clears.get() + 1);
        *self.error.borrow_mut() = None;
        Ok(())
    }

    fn show_error(&self, message: &str) {
        *self.error.borrow_mut() = Some(message.to_string());
    }

    fn set_stored_page_label(&self, text: &str) {
        *self.label.borrow_mut() = Some(text.to_string());
    }

    fn set_back_href(&self, url: &str) {
        *self.back_href.borrow_mut() = Some(url.to_string());
    }

    fn publish_pdf_info(&self, name: &str) {
        *self.pdf_info.borrow_mut() = Some(name.to_string());
    }

    fn set_body_overflow_locked(&self, locked: bool) {
        self.overflow_locked.set(Some(locked));
    }

    fn set_direction_tooltip(&self, text: &str) {
        *self.tooltip.borrow_mut() = Some(text.to_string());
    }

    fn navigate(&self, url: &str) {
        *self.navigated.borrow_mut() = Some(url.to_string());
    }

    fn origin(&self) -> String {
        self.origin.clone()
    }

    fn expose_session(&self, context: &SessionContext) {
        *self.exposed.borrow_mut() = Some(context.clone());
    }
}

#[derive(Clone, Default)]
struct CaptureWriter(Arc<Mutex<Vec<u8>>>);

impl io::Write for CaptureWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if let Ok(mut out) = self.0.lock() {
            out.extend_from_slice(buf);
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Log output captured for the current thread until dropped
pub struct LogCapture {
    buffer: Arc<Mutex<Vec<u8>>>,
    _guard: DefaultGuard,
}

impl LogCapture {
    pub fn output(&self) -> String {
        self.buffer
            .lock()
            .map(|out| String::from_utf8_lossy(&out).into_owned())
            .unwrap_or_default()
    }

    pub fn contains(&self, needle: &str) -> bool {
        self.output().contains(needle)
    }
}

pub fn capture_logs() -> LogCapture {
    let writer = CaptureWriter::default();
    let buffer = Arc::clone(&writer.0);
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::TRACE)
        .without_time()
        .with_writer(move || writer.clone())
        .finish();
    LogCapture {
        buffer,
        _guard: tracing::subscriber::set_default(subscriber),
    }
}
