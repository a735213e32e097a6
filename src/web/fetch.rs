//! Metadata fetch over `window.fetch`

use async_trait::async_trait;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Response, Window};

use crate::error::{describe_js, ReaderError, Result};
use crate::metadata::MetadataFetcher;

pub struct HttpFetcher {
    window: Window,
}

impl HttpFetcher {
    pub fn new(window: Window) -> Self {
        Self { window }
    }
}

#[async_trait(?Send)]
impl MetadataFetcher for HttpFetcher {
    async fn fetch_text(&self, url: &str) -> Result<String> {
        let response = JsFuture::from(self.window.fetch_with_str(url))
            .await
            .map_err(|e| ReaderError::MetadataNetwork(describe_js(&e)))?;
        let response: Response = response
            .dyn_into()
            .map_err(|_| ReaderError::MetadataNetwork("fetch did not yield a Response".to_string()))?;

        if !response.ok() {
            return Err(ReaderError::MetadataHttp(response.status()));
        }

        let body = response
            .text()
            .map_err(|e| ReaderError::MetadataNetwork(describe_js(&e)))?;
        let body = JsFuture::from(body)
            .await
            .map_err(|e| ReaderError::MetadataNetwork(describe_js(&e)))?;

        body.as_string()
            .ok_or_else(|| ReaderError::MetadataNetwork("response body is not text".to_string()))
    }
}
