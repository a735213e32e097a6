//! Direction toggle
//!
//! Flips LTR/RTL and re-mounts the current document at its resume page.
//! The URL `page` parameter is bootstrap-only and is not consulted here.

use crate::document::Direction;
use crate::page_memory::{resume_from_memory, ResumePage};
use crate::reader::Reader;
use crate::viewer::{MountOutcome, MountRequest};

/// What a toggle ended up doing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToggleOutcome {
    /// Nothing mounted yet; only the flag changed
    NoDocument(Direction),
    Remounted {
        direction: Direction,
        resume: ResumePage,
        mount: MountOutcome,
    },
}

impl Reader {
    /// Handle a click on the direction toggle control
    pub async fn toggle_direction(&self) -> ToggleOutcome {
        let flipped = self.session.toggle_direction();

        let Some(context) = self.session.context() else {
            tracing::warn!("No currentPdf set when toggling direction.");
            return ToggleOutcome::NoDocument(flipped);
        };

        let resume = resume_from_memory(self.page_memory.as_ref(), &context.current_pdf_id).await;
        if self.page_memory.is_available() {
            self.dom.set_stored_page_label(&resume.label());
        }

        // A later toggle may have landed while page memory was pending
        let direction = self.session.direction();
        let mount = self.viewer.mount(
            &context.current_pdf,
            MountRequest {
                direction,
                open_page: Some(resume.page),
                pdf_id: Some(context.current_pdf_id.clone()),
            },
        );
        self.dom.set_direction_tooltip(direction.toggle_tooltip());

        ToggleOutcome::Remounted {
            direction,
            resume,
            mount,
        }
    }
}
