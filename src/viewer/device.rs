//! Device profile derived from the user-agent string

use regex::Regex;

/// User agents treated as mobile
pub const MOBILE_UA_PATTERN: &str = r"(?i)Mobi|Android|iPhone|iPad|iPod";

/// Runtime environment summary used to pick viewer option variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DeviceProfile {
    pub is_mobile: bool,
}

impl DeviceProfile {
    pub fn from_user_agent(user_agent: &str) -> Self {
        let is_mobile = match Regex::new(MOBILE_UA_PATTERN) {
            Ok(re) => re.is_match(user_agent),
            Err(e) => {
                tracing::warn!("Mobile user-agent pattern failed to compile: {}", e);
                false
            }
        };
        Self { is_mobile }
    }

    pub fn desktop() -> Self {
        Self { is_mobile: false }
    }

    pub fn mobile() -> Self {
        Self { is_mobile: true }
    }
}
