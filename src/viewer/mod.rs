//! Viewer adapter
//!
//! Wraps the third-party flipbook library behind [`FlipbookEngine`] and
//! owns the mount sequence: clear the container, build options, hand
//! them to the library, then publish the new session context.

use std::rc::Rc;

use crate::document::{Direction, PageNumber, SessionContext};
use crate::dom::{ReaderDom, INVALID_URL_MESSAGE, LOAD_FAILED_MESSAGE};
use crate::error::{ReaderError, Result};
use crate::session::SessionState;

pub mod device;
pub mod display;
pub mod options;

pub use device::DeviceProfile;
pub use display::display_name;
pub use options::{FlipbookOptions, LibraryConstants, PageMode};

/// Notifications raised by the library after mount
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewerEvent {
    /// Zoom toggled on or off
    ZoomChanged(bool),
    /// Book finished loading
    Ready { page_count: Option<u32> },
}

/// Callback sink for [`ViewerEvent`]s
pub type ViewerEvents = Rc<dyn Fn(ViewerEvent)>;

/// The flipbook library
pub trait FlipbookEngine {
    /// Draw `pdf_url` into the (already emptied) container
    ///
    /// A synchronous throw from the library is an error.
    fn mount(&self, pdf_url: &str, options: &FlipbookOptions, events: ViewerEvents) -> Result<()>;

    /// Enum constants the library publishes, read fresh for each mount
    fn constants(&self) -> LibraryConstants {
        LibraryConstants::default()
    }
}

/// Per-mount parameters
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MountRequest {
    pub direction: Direction,
    pub open_page: Option<PageNumber>,
    pub pdf_id: Option<String>,
}

/// Result of a mount attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MountOutcome {
    Mounted(SessionContext),
    /// The container shows an error placeholder instead
    Failed,
}

/// Normalized front over the flipbook library
pub struct ViewerAdapter {
    engine: Rc<dyn FlipbookEngine>,
    dom: Rc<dyn ReaderDom>,
    session: Rc<SessionState>,
    profile: DeviceProfile,
}

impl ViewerAdapter {
    pub fn new(
        engine: Rc<dyn FlipbookEngine>,
        dom: Rc<dyn ReaderDom>,
        session: Rc<SessionState>,
        profile: DeviceProfile,
    ) -> Self {
        Self {
            engine,
            dom,
            session,
            profile,
        }
    }

    pub fn profile(&self) -> DeviceProfile {
        self.profile
    }

    /// Mount `pdf_url`, replacing whatever the container held
    ///
    /// Never fails outward: errors end up as a placeholder in the
    /// container and a console entry.
    pub fn mount(&self, pdf_url: &str, request: MountRequest) -> MountOutcome {
        if pdf_url.trim().is_empty() {
            tracing::error!("{}", ReaderError::InvalidPdfUrl);
            self.show_placeholder(INVALID_URL_MESSAGE);
            return MountOutcome::Failed;
        }

        if let Err(e) = self.dom.clear_container() {
            tracing::error!("Cannot mount flipbook: {}", e);
            return MountOutcome::Failed;
        }

        let options = FlipbookOptions::build(
            pdf_url,
            self.profile,
            &self.engine.constants(),
            request.direction,
            request.open_page,
            request.pdf_id.as_deref(),
        );

        tracing::debug!(
            "Mounting flipbook for {} at page {} ({:?})",
            pdf_url,
            options.open_page,
            request.direction
        );

        if let Err(e) = self.engine.mount(pdf_url, &options, self.event_sink()) {
            tracing::error!("Error initializing flipbook: {}", e);
            self.dom.show_error(LOAD_FAILED_MESSAGE);
            return MountOutcome::Failed;
        }

        let context = SessionContext::new(pdf_url, options.pdf_id);
        self.session.replace_context(context.clone());
        self.dom.expose_session(&context);
        self.dom
            .publish_pdf_info(&display_name(pdf_url, &self.dom.origin()));

        MountOutcome::Mounted(context)
    }

    fn show_placeholder(&self, message: &str) {
        if let Err(e) = self.dom.clear_container() {
            tracing::error!("Cannot show error placeholder: {}", e);
            return;
        }
        self.dom.show_error(message);
    }

    fn event_sink(&self) -> ViewerEvents {
        let dom = Rc::clone(&self.dom);
        Rc::new(move |event| match event {
            ViewerEvent::ZoomChanged(zoomed) => dom.set_body_overflow_locked(zoomed),
            ViewerEvent::Ready {
                page_count: Some(count),
            } => tracing::info!("PDF loaded: {} pages", count),
            ViewerEvent::Ready { page_count: None } => tracing::info!("PDF loaded."),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{capture_logs, FakeEngine, RecordingDom};

    fn adapter(
        engine: Rc<FakeEngine>,
        dom: Rc<RecordingDom>,
        profile: DeviceProfile,
    ) -> (ViewerAdapter, Rc<SessionState>) {
        let session = Rc::new(SessionState::new());
        let adapter = ViewerAdapter::new(engine, dom, Rc::clone(&session), profile);
        (adapter, session)
    }

    #[test]
    fn test_mount_updates_session_and_receptors() {
        let engine = Rc::new(FakeEngine::new());
        let dom = Rc::new(RecordingDom::new());
        let (viewer, session) = adapter(engine.clone(), dom.clone(), DeviceProfile::desktop());

        let outcome = viewer.mount(
            "/a/b/Z.pdf",
            MountRequest {
                direction: Direction::Ltr,
                open_page: PageNumber::new(4),
                pdf_id: Some("Z".to_string()),
            },
        );

        assert_eq!(outcome, MountOutcome::Mounted(SessionContext::new("/a/b/Z.pdf", "Z")));
        assert_eq!(session.context(), Some(SessionContext::new("/a/b/Z.pdf", "Z")));
        assert_eq!(dom.exposed(), Some(SessionContext::new("/a/b/Z.pdf", "Z")));
        assert_eq!(dom.pdf_info(), Some("Z.pdf".to_string()));
        assert_eq!(dom.clears(), 1);

        let mount = engine.last_mount().unwrap();
        assert_eq!(mount.url, "/a/b/Z.pdf");
        assert_eq!(mount.options.open_page.get(), 4);
        assert_eq!(mount.options.pdf_id, "Z");
    }

    #[test]
    fn test_empty_url_shows_placeholder() {
        let engine = Rc::new(FakeEngine::new());
        let dom = Rc::new(RecordingDom::new());
        let (viewer, session) = adapter(engine.clone(), dom.clone(), DeviceProfile::desktop());

        let logs = capture_logs();
        assert_eq!(viewer.mount("   ", MountRequest::default()), MountOutcome::Failed);

        assert_eq!(engine.mount_count(), 0);
        assert_eq!(dom.error(), Some(INVALID_URL_MESSAGE.to_string()));
        assert!(session.context().is_none());
        assert!(logs.contains("Invalid PDF URL"));
    }

    #[test]
    fn test_library_throw_shows_placeholder() {
        let engine = Rc::new(FakeEngine::failing("flipBook is not a function"));
        let dom = Rc::new(RecordingDom::new());
        let (viewer, session) = adapter(engine.clone(), dom.clone(), DeviceProfile::desktop());

        let logs = capture_logs();
        let outcome = viewer.mount("./reader/X.pdf", MountRequest::default());

        assert_eq!(outcome, MountOutcome::Failed);
        assert_eq!(dom.error(), Some(LOAD_FAILED_MESSAGE.to_string()));
        assert!(session.context().is_none());
        assert!(dom.pdf_info().is_none());
        assert!(logs.contains("flipBook is not a function"));
    }

    #[test]
    fn test_missing_container_skips_library() {
        let engine = Rc::new(FakeEngine::new());
        let dom = Rc::new(RecordingDom::without_container());
        let (viewer, _) = adapter(engine.clone(), dom, DeviceProfile::desktop());

        assert_eq!(viewer.mount("./reader/X.pdf", MountRequest::default()), MountOutcome::Failed);
        assert_eq!(engine.mount_count(), 0);
    }

    #[test]
    fn test_zoom_events_toggle_overflow() {
        let engine = Rc::new(FakeEngine::new());
        let dom = Rc::new(RecordingDom::new());
        let (viewer, _) = adapter(engine.clone(), dom.clone(), DeviceProfile::desktop());

        viewer.mount("./reader/X.pdf", MountRequest::default());
        engine.emit(ViewerEvent::ZoomChanged(true));
        assert_eq!(dom.overflow_locked(), Some(true));
        engine.emit(ViewerEvent::ZoomChanged(false));
        assert_eq!(dom.overflow_locked(), Some(false));
    }

    #[test]
    fn test_ready_event_logs_page_count() {
        let engine = Rc::new(FakeEngine::new());
        let dom = Rc::new(RecordingDom::new());
        let (viewer, _) = adapter(engine.clone(), dom, DeviceProfile::desktop());

        let logs = capture_logs();
        viewer.mount("./reader/X.pdf", MountRequest::default());
        engine.emit(ViewerEvent::Ready { page_count: Some(38) });
        assert!(logs.contains("PDF loaded: 38 pages"));
    }

    #[test]
    fn test_engine_constants_are_used() {
        let engine = Rc::new(FakeEngine::with_constants(LibraryConstants::with_overrides(
            Some(10),
            Some(11),
            Some(12),
        )));
        let dom = Rc::new(RecordingDom::new());
        let (viewer, _) = adapter(engine.clone(), dom, DeviceProfile::desktop());

        viewer.mount("./reader/X.pdf", MountRequest::default());
        let options = engine.last_mount().unwrap().options;
        assert_eq!(options.page_mode, 10);
        assert_eq!(options.single_page_mode, 12);
    }

    #[test]
    fn test_mobile_profile_reaches_library() {
        let engine = Rc::new(FakeEngine::new());
        let dom = Rc::new(RecordingDom::new());
        let (viewer, _) = adapter(engine.clone(), dom, DeviceProfile::mobile());

        viewer.mount("./reader/X.pdf", MountRequest::default());
        let options = engine.last_mount().unwrap().options;
        assert_eq!(options.page_mode, 1);
        assert!(!options.webgl);
        assert!(!options.sound_enable);
        assert_eq!(options.max_texture_size, 1400);
        assert_eq!(options.zoom_ratio, 1.2);
        assert_eq!(options.pdf_id, "./reader/X.pdf");
    }
}
