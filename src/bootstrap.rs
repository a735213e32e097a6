//! Session bootstrap
//!
//! Runs once on DOM ready: read `?doc=` and `?page=`, redirect when the
//! document id is missing, resolve metadata, pick the initial page and
//! mount the viewer.

use url::form_urlencoded;

use crate::document::{DocumentDescriptor, DocumentId, PageNumber, SessionContext};
use crate::page_memory::{resume_from_memory, ResumePage};
use crate::reader::Reader;
use crate::viewer::{MountOutcome, MountRequest};

/// Parameters read from the page's query string
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    pub doc: Option<DocumentId>,
    pub page: Option<PageNumber>,
}

impl QueryParams {
    /// Parse `location.search`, with or without the leading `?`
    ///
    /// The first occurrence of each key wins.
    pub fn parse(search: &str) -> Self {
        let query = search.strip_prefix('?').unwrap_or(search);
        let mut doc = None;
        let mut page = None;

        for (key, value) in form_urlencoded::parse(query.as_bytes()) {
            match key.as_ref() {
                "doc" if doc.is_none() => doc = Some(value.into_owned()),
                "page" if page.is_none() => page = Some(value.into_owned()),
                _ => {}
            }
        }

        Self {
            doc: doc.as_deref().and_then(DocumentId::parse),
            page: page
                .as_deref()
                .and_then(parse_int_prefix)
                .and_then(PageNumber::from_i64),
        }
    }
}

/// Leading decimal integer, the way `parseInt(value, 10)` reads it
///
/// Leading whitespace and one sign are accepted; parsing stops at the
/// first non-digit. `None` when no digit follows.
pub fn parse_int_prefix(value: &str) -> Option<i64> {
    let trimmed = value.trim_start();
    let (negative, rest) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let digits_end = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    if digits_end == 0 {
        return None;
    }

    let magnitude: i64 = rest[..digits_end].parse().ok()?;
    Some(if negative { -magnitude } else { magnitude })
}

/// What the bootstrap ended up doing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BootOutcome {
    /// No document id; the window was sent to this URL
    Redirected(String),
    /// A mount was attempted
    Opened {
        pdf_url: String,
        resume: ResumePage,
        mount: MountOutcome,
    },
}

impl Reader {
    /// Bootstrap the reader from `location.search`
    pub async fn bootstrap(&self, search: &str) -> BootOutcome {
        let query = QueryParams::parse(search);

        let Some(pdf_id) = query.doc else {
            tracing::info!("No ?doc= parameter, redirecting to {}", self.config.redirect_url);
            self.dom.navigate(&self.config.redirect_url);
            return BootOutcome::Redirected(self.config.redirect_url.clone());
        };

        let descriptor = self.metadata.resolve(pdf_id.as_str()).await;
        let (pdf_url, back_url) = self.locate(&pdf_id, descriptor.as_ref());

        self.open_document(&pdf_id, pdf_url, &back_url, query.page).await
    }

    /// PDF location and back URL, preferring descriptor values
    fn locate(
        &self,
        pdf_id: &DocumentId,
        descriptor: Option<&DocumentDescriptor>,
    ) -> (String, String) {
        let pdf_url = descriptor
            .and_then(DocumentDescriptor::pdf_path)
            .map(str::to_string)
            .unwrap_or_else(|| self.config.default_pdf_url(pdf_id));
        let back_url = self
            .config
            .back_url_or_default(descriptor.and_then(DocumentDescriptor::back_url));
        (pdf_url, back_url)
    }

    /// Shared tail for the metadata hit and miss paths
    async fn open_document(
        &self,
        pdf_id: &DocumentId,
        pdf_url: String,
        back_url: &str,
        page_param: Option<PageNumber>,
    ) -> BootOutcome {
        self.dom.set_back_href(back_url);
        let seed = SessionContext::new(pdf_url.as_str(), pdf_id.as_str());
        self.dom.expose_session(&seed);
        self.session.replace_context(seed);

        let resume = match page_param {
            Some(page) => ResumePage::explicit(page),
            None => resume_from_memory(self.page_memory.as_ref(), pdf_id.as_str()).await,
        };
        self.dom.set_stored_page_label(&resume.label());

        let mount = self.viewer.mount(
            &pdf_url,
            MountRequest {
                direction: self.session.direction(),
                open_page: Some(resume.page),
                pdf_id: Some(pdf_id.to_string()),
            },
        );

        BootOutcome::Opened {
            pdf_url,
            resume,
            mount,
        }
    }
}
