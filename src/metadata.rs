//! Metadata resolver
//!
//! Fetches the metadata catalog at most once per page lifetime and looks
//! up descriptors in it. Only a successful load is memoized, so a
//! transient failure lets the next caller try again.

use std::rc::Rc;

use async_trait::async_trait;
use futures::lock::Mutex;

use crate::document::{DocumentDescriptor, DocumentId, MetadataCatalog};
use crate::error::Result;

/// Source of the raw metadata document
#[async_trait(?Send)]
pub trait MetadataFetcher {
    /// GET `url` and return the body; non-OK statuses are errors
    async fn fetch_text(&self, url: &str) -> Result<String>;
}

/// Cached descriptor lookup
pub struct MetadataResolver {
    fetcher: Rc<dyn MetadataFetcher>,
    url: String,
    /// Held across the fetch so only one population is ever in flight
    catalog: Mutex<Option<Rc<MetadataCatalog>>>,
}

impl MetadataResolver {
    pub fn new(fetcher: Rc<dyn MetadataFetcher>, url: impl Into<String>) -> Self {
        Self {
            fetcher,
            url: url.into(),
            catalog: Mutex::new(None),
        }
    }

    /// Resolve a descriptor; never fails, `None` covers every miss
    pub async fn resolve(&self, id: &str) -> Option<DocumentDescriptor> {
        let id = DocumentId::parse(id)?;

        let mut slot = self.catalog.lock().await;
        if let Some(catalog) = slot.as_ref() {
            return catalog.get(&id).cloned();
        }

        match self.load().await {
            Ok(catalog) => {
                tracing::debug!("Metadata catalog loaded with {} entries", catalog.len());
                let catalog = Rc::new(catalog);
                let found = catalog.get(&id).cloned();
                *slot = Some(catalog);
                found
            }
            Err(e) => {
                tracing::warn!("SNQR metadata JSON load failed: {}", e);
                None
            }
        }
    }

    /// Whether a catalog has been loaded successfully
    pub async fn is_cached(&self) -> bool {
        self.catalog.lock().await.is_some()
    }

    async fn load(&self) -> Result<MetadataCatalog> {
        let body = self.fetcher.fetch_text(&self.url).await?;
        MetadataCatalog::from_json(&body)
    }
}
