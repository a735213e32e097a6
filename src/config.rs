//! Configuration management for the SNQR reader

use serde::Deserialize;

use crate::document::DocumentId;

pub const DEFAULT_PDF_BASE_PATH: &str = "./reader/";
pub const DEFAULT_METADATA_PATH: &str = "./data/reader-index.json";
pub const DEFAULT_REDIRECT_URL: &str = "https://www.snqrglobal.com";
pub const DEFAULT_BACK_URL: &str = "https://www.snqrglobal.com/research";
pub const DEFAULT_THEME_STORAGE_KEY: &str = "snqr_reader_theme";
pub const DEFAULT_LOG_FILTER: &str = "snqr_reader=info";

/// Reader configuration
///
/// Every field has a compile-time default; the host page may override
/// any subset by passing an object to `startReader`.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default, rename_all = "camelCase")]
pub struct ReaderConfig {
    /// Folder holding `<id>.pdf` files
    pub pdf_base_path: String,
    /// Location of the optional metadata catalog
    pub metadata_path: String,
    /// Where the window goes when `?doc=` is missing
    pub redirect_url: String,
    /// Back-button target when the descriptor carries none
    pub default_back_url: String,
    /// localStorage key for the selected theme
    pub theme_storage_key: String,
    /// `EnvFilter` directive for the console logger
    pub log_filter: String,
}

impl Default for ReaderConfig {
    fn default() -> Self {
        ReaderConfig {
            pdf_base_path: DEFAULT_PDF_BASE_PATH.to_string(),
            metadata_path: DEFAULT_METADATA_PATH.to_string(),
            redirect_url: DEFAULT_REDIRECT_URL.to_string(),
            default_back_url: DEFAULT_BACK_URL.to_string(),
            theme_storage_key: DEFAULT_THEME_STORAGE_KEY.to_string(),
            log_filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

impl ReaderConfig {
    /// Default PDF location for a document id: `<base>/<id>.pdf`
    pub fn default_pdf_url(&self, id: &DocumentId) -> String {
        let base = self.pdf_base_path.as_str();
        if base.is_empty() || base.ends_with('/') {
            format!("{}{}.pdf", base, id)
        } else {
            format!("{}/{}.pdf", base, id)
        }
    }

    /// Back-button target, preferring a non-blank descriptor value
    pub fn back_url_or_default(&self, back_url: Option<&str>) -> String {
        match back_url.map(str::trim) {
            Some(url) if !url.is_empty() => url.to_string(),
            _ => self.default_back_url.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(id: &str) -> DocumentId {
        DocumentId::parse(id).unwrap()
    }

    #[test]
    fn test_default_pdf_url() {
        let config = ReaderConfig::default();
        assert_eq!(config.default_pdf_url(&doc("X")), "./reader/X.pdf");
    }

    #[test]
    fn test_base_path_without_trailing_slash() {
        let config = ReaderConfig {
            pdf_base_path: "/pdfs".to_string(),
            ..ReaderConfig::default()
        };
        assert_eq!(config.default_pdf_url(&doc("R-12")), "/pdfs/R-12.pdf");
    }

    #[test]
    fn test_partial_overrides() {
        let config: ReaderConfig =
            serde_json::from_str(r#"{"redirectUrl": "https://example.org"}"#).unwrap();
        assert_eq!(config.redirect_url, "https://example.org");
        assert_eq!(config.metadata_path, DEFAULT_METADATA_PATH);
        assert_eq!(config.default_back_url, DEFAULT_BACK_URL);
    }

    #[test]
    fn test_back_url_fallback() {
        let config = ReaderConfig::default();
        assert_eq!(config.back_url_or_default(None), DEFAULT_BACK_URL);
        assert_eq!(config.back_url_or_default(Some("   ")), DEFAULT_BACK_URL);
        assert_eq!(
            config.back_url_or_default(Some(" https://example.org/list ")),
            "https://example.org/list"
        );
    }
}
