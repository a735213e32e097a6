//! Reader session object
//!
//! Bundles configuration, host seams and page-lifetime state so the
//! bootstrap and direction-toggle handlers share one explicit owner.

use std::rc::Rc;

use crate::config::ReaderConfig;
use crate::dom::ReaderDom;
use crate::metadata::{MetadataFetcher, MetadataResolver};
use crate::page_memory::PageMemory;
use crate::session::SessionState;
use crate::viewer::{DeviceProfile, FlipbookEngine, ViewerAdapter};

/// Host collaborators supplied by the embedding page
pub struct ReaderHost {
    pub dom: Rc<dyn ReaderDom>,
    pub fetcher: Rc<dyn MetadataFetcher>,
    pub page_memory: Rc<dyn PageMemory>,
    pub engine: Rc<dyn FlipbookEngine>,
    pub profile: DeviceProfile,
}

/// One reader per page
pub struct Reader {
    pub(crate) config: ReaderConfig,
    pub(crate) dom: Rc<dyn ReaderDom>,
    pub(crate) metadata: MetadataResolver,
    pub(crate) page_memory: Rc<dyn PageMemory>,
    pub(crate) viewer: ViewerAdapter,
    pub(crate) session: Rc<SessionState>,
}

impl Reader {
    pub fn new(config: ReaderConfig, host: ReaderHost) -> Self {
        let session = Rc::new(SessionState::new());
        let metadata = MetadataResolver::new(host.fetcher, config.metadata_path.clone());
        let viewer = ViewerAdapter::new(
            host.engine,
            Rc::clone(&host.dom),
            Rc::clone(&session),
            host.profile,
        );

        Self {
            config,
            dom: host.dom,
            metadata,
            page_memory: host.page_memory,
            viewer,
            session,
        }
    }

    pub fn config(&self) -> &ReaderConfig {
        &self.config
    }

    pub fn session(&self) -> &SessionState {
        &self.session
    }

    pub fn viewer(&self) -> &ViewerAdapter {
        &self.viewer
    }

    pub fn metadata(&self) -> &MetadataResolver {
        &self.metadata
    }
}
