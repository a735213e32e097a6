//! Page surface the reader core writes to
//!
//! The flipbook container is required. Every other element is optional
//! and implementations silently skip the ones the page does not have.

use crate::document::SessionContext;
use crate::error::Result;

pub const INVALID_URL_MESSAGE: &str = "Invalid PDF URL.";
pub const LOAD_FAILED_MESSAGE: &str = "Error loading PDF. Please check the console for details.";

/// DOM operations used by bootstrap, viewer and direction toggle
pub trait ReaderDom {
    /// Empty the flipbook container
    fn clear_container(&self) -> Result<()>;

    /// Replace the container content with the red error placeholder
    fn show_error(&self, message: &str);

    /// Text of the stored-page label
    fn set_stored_page_label(&self, text: &str);

    /// Target of the back-navigation anchor
    fn set_back_href(&self, url: &str);

    /// Show `name` in every pdf-info receptor; an empty name hides them
    fn publish_pdf_info(&self, name: &str);

    /// Lock page scrolling while the flipbook is zoomed
    fn set_body_overflow_locked(&self, locked: bool);

    /// Tooltip of the direction toggle control
    fn set_direction_tooltip(&self, text: &str);

    /// Full-page navigation
    fn navigate(&self, url: &str);

    /// Origin used to resolve relative PDF URLs
    fn origin(&self) -> String;

    /// Publish the mounted document to the rest of the page
    fn expose_session(&self, context: &SessionContext);
}
