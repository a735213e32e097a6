//! Display name for the "pdf info" receptors

use url::Url;

const MAX_FALLBACK_CHARS: usize = 64;

/// Final path segment of `pdf_url` resolved against `origin`
///
/// Falls back to the host name when the path ends in `/`, and to the
/// first 64 characters of the input when the URL cannot be parsed.
pub fn display_name(pdf_url: &str, origin: &str) -> String {
    match Url::parse(origin).and_then(|base| base.join(pdf_url)) {
        Ok(url) => {
            let last = url.path().rsplit('/').next().unwrap_or_default();
            if last.is_empty() {
                url.host_str().unwrap_or_default().to_string()
            } else {
                last.to_string()
            }
        }
        Err(_) => pdf_url.chars().take(MAX_FALLBACK_CHARS).collect(),
    }
}
