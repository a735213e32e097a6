//! Page-memory adapter
//!
//! Read-only view of the host's persistent "last page per document"
//! store. Recording pages is the viewer's job; nothing here writes.

use async_trait::async_trait;

use crate::document::PageNumber;
use crate::error::Result;

/// Label text when no stored page applies
pub const NO_STORED_PAGE: &str = "N/A";

/// Persistent last-page lookup
#[async_trait(?Send)]
pub trait PageMemory {
    /// Last recorded page for `id`; `Ok(None)` when nothing is stored
    async fn last_page(&self, id: &str) -> Result<Option<PageNumber>>;

    /// `false` when the host page provides no store at all
    fn is_available(&self) -> bool {
        true
    }
}

/// Stand-in used when the host has no page-memory capability
#[derive(Debug, Default, Clone, Copy)]
pub struct NoPageMemory;

#[async_trait(?Send)]
impl PageMemory for NoPageMemory {
    async fn last_page(&self, _id: &str) -> Result<Option<PageNumber>> {
        Ok(None)
    }

    fn is_available(&self) -> bool {
        false
    }
}

/// Where the reader should open, and what the stored-page label shows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResumePage {
    pub page: PageNumber,
    /// The value read from page memory, if any
    pub stored: Option<PageNumber>,
}

impl ResumePage {
    /// Page 1, nothing stored
    pub fn first() -> Self {
        Self {
            page: PageNumber::FIRST,
            stored: None,
        }
    }

    /// Open at an explicit page; the stored-page label stays `N/A`
    pub fn explicit(page: PageNumber) -> Self {
        Self { page, stored: None }
    }

    pub fn label(&self) -> String {
        self.stored
            .map(|page| page.to_string())
            .unwrap_or_else(|| NO_STORED_PAGE.to_string())
    }
}

/// Resolve the resume page from page memory alone
///
/// A stored page wins; nothing stored, an absent store, or a failed
/// lookup all open at page 1.
pub async fn resume_from_memory(memory: &dyn PageMemory, id: &str) -> ResumePage {
    if !memory.is_available() {
        tracing::debug!("No page memory available, opening {} at page 1", id);
        return ResumePage::first();
    }

    match memory.last_page(id).await {
        Ok(Some(page)) => ResumePage {
            page,
            stored: Some(page),
        },
        Ok(None) => ResumePage::first(),
        Err(e) => {
            tracing::warn!("getLastPage failed: {}", e);
            ResumePage::first()
        }
    }
}
