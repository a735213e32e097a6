//! Core reader types
//!
//! Identifiers, descriptors and the small value types shared by the
//! bootstrap, viewer and direction-toggle paths.

use std::fmt;
use std::num::NonZeroU32;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};

/// Opaque document identifier taken from `?doc=`
///
/// Always trimmed and non-empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DocumentId(String);

impl DocumentId {
    /// Trim the raw value; blank input yields `None`
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// 1-based page number
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct PageNumber(NonZeroU32);

impl PageNumber {
    pub const FIRST: PageNumber = PageNumber(NonZeroU32::MIN);

    /// `None` for zero
    pub fn new(page: u32) -> Option<Self> {
        NonZeroU32::new(page).map(Self)
    }

    /// Accept any signed value, rejecting zero, negatives and overflow
    pub fn from_i64(page: i64) -> Option<Self> {
        u32::try_from(page).ok().and_then(Self::new)
    }

    /// Accept a JS number only when it is a positive integer
    pub fn from_f64(page: f64) -> Option<Self> {
        if page.is_finite() && page.fract() == 0.0 && page >= 1.0 && page <= f64::from(u32::MAX) {
            Self::new(page as u32)
        } else {
            None
        }
    }

    pub fn get(self) -> u32 {
        self.0.get()
    }
}

impl Default for PageNumber {
    fn default() -> Self {
        Self::FIRST
    }
}

impl fmt::Display for PageNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Reading direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    #[default]
    Ltr,
    Rtl,
}

impl Direction {
    pub fn toggled(self) -> Self {
        match self {
            Direction::Ltr => Direction::Rtl,
            Direction::Rtl => Direction::Ltr,
        }
    }

    /// Flipbook library code: 1 = LTR, 2 = RTL
    pub fn library_code(self) -> u8 {
        match self {
            Direction::Ltr => 1,
            Direction::Rtl => 2,
        }
    }

    /// Tooltip for the toggle control, advertising the other direction
    pub fn toggle_tooltip(self) -> &'static str {
        match self {
            Direction::Ltr => "Switch to RTL",
            Direction::Rtl => "Switch to LTR",
        }
    }
}

/// Optional metadata entry for a document
///
/// Only `pdf_path` and `back_url` drive behaviour. Fields with an
/// unexpected JSON type read as absent rather than failing the entry.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentDescriptor {
    #[serde(default, deserialize_with = "lenient")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub pages: Option<u32>,
    #[serde(default, deserialize_with = "lenient")]
    pub reader_url: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub pdf_path: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub back_url: Option<String>,
}

impl DocumentDescriptor {
    /// Trimmed, non-blank `pdfPath`
    pub fn pdf_path(&self) -> Option<&str> {
        non_blank(self.pdf_path.as_deref())
    }

    /// Trimmed, non-blank `backUrl`
    pub fn back_url(&self) -> Option<&str> {
        non_blank(self.back_url.as_deref())
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}

/// The currently mounted document
///
/// Replaced wholesale on every mount, never patched field by field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionContext {
    pub current_pdf: String,
    pub current_pdf_id: String,
}

impl SessionContext {
    pub fn new(current_pdf: impl Into<String>, current_pdf_id: impl Into<String>) -> Self {
        Self {
            current_pdf: current_pdf.into(),
            current_pdf_id: current_pdf_id.into(),
        }
    }
}
