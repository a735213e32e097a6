//! Flipbook option set
//!
//! Typed mirror of the DearFlip options object. Everything the library
//! reads is built here, in one place, from the device profile, the
//! reading direction and the library's own enum constants.

use serde::Serialize;

use super::device::DeviceProfile;
use crate::document::{Direction, PageNumber};

pub const BACKGROUND_COLOR: &str = "#2F2D2F";
pub const FLIP_DURATION_MS: u32 = 700;
pub const RANGE_CHUNK_SIZE: u32 = 524_288;
pub const MIN_TEXTURE_SIZE: u32 = 256;
pub const MOBILE_MAX_TEXTURE_SIZE: u32 = 1400;
pub const DESKTOP_MAX_TEXTURE_SIZE: u32 = 1800;
pub const MOBILE_ZOOM_RATIO: f64 = 1.2;
pub const DESKTOP_ZOOM_RATIO: f64 = 1.5;

/// Enum values exported by the flipbook library as `DFLIP.*`
///
/// Each one falls back to its literal when the library does not
/// publish it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LibraryConstants {
    pub page_mode_auto: u32,
    pub page_mode_single: u32,
    pub single_page_auto: u32,
}

impl Default for LibraryConstants {
    fn default() -> Self {
        Self {
            page_mode_auto: 0,
            page_mode_single: 1,
            single_page_auto: 0,
        }
    }
}

impl LibraryConstants {
    /// Apply whichever constants the library actually provides
    pub fn with_overrides(
        page_mode_auto: Option<u32>,
        page_mode_single: Option<u32>,
        single_page_auto: Option<u32>,
    ) -> Self {
        let fallback = Self::default();
        Self {
            page_mode_auto: page_mode_auto.unwrap_or(fallback.page_mode_auto),
            page_mode_single: page_mode_single.unwrap_or(fallback.page_mode_single),
            single_page_auto: single_page_auto.unwrap_or(fallback.single_page_auto),
        }
    }
}

/// Page layout requested from the library
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageMode {
    Auto,
    Single,
}

impl PageMode {
    pub fn for_device(profile: DeviceProfile) -> Self {
        if profile.is_mobile {
            PageMode::Single
        } else {
            PageMode::Auto
        }
    }

    pub fn code(self, constants: &LibraryConstants) -> u32 {
        match self {
            PageMode::Auto => constants.page_mode_auto,
            PageMode::Single => constants.page_mode_single,
        }
    }
}

/// Options object handed to `flipBook(url, options)`
///
/// Callbacks are attached separately by the engine.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FlipbookOptions {
    pub height: &'static str,
    pub background_color: &'static str,
    pub duration: u32,
    pub direction: u8,

    // 3D rendering: on for desktop, off for mobile
    pub webgl: bool,
    pub webgl_shadow: bool,
    pub sound_enable: bool,

    pub auto_enable_outline: bool,
    pub auto_enable_thumbnail: bool,
    #[serde(rename = "overwritePDFOutline")]
    pub overwrite_pdf_outline: bool,
    pub show_download_control: bool,
    pub show_print_control: bool,
    pub show_search_control: bool,

    pub page_mode: u32,
    pub single_page_mode: u32,

    pub max_texture_size: u32,
    pub min_texture_size: u32,
    pub range_chunk_size: u32,
    pub zoom_ratio: f64,
    pub force_fit: bool,
    pub transparent: bool,
    pub hard: &'static str,
    pub scroll_wheel: bool,

    pub open_page: PageNumber,
    pub pdf_id: String,
}

impl FlipbookOptions {
    /// Build the option set for one mount
    ///
    /// `open_page` defaults to 1 and `pdf_id` to the PDF URL itself.
    pub fn build(
        pdf_url: &str,
        profile: DeviceProfile,
        constants: &LibraryConstants,
        direction: Direction,
        open_page: Option<PageNumber>,
        pdf_id: Option<&str>,
    ) -> Self {
        let mobile = profile.is_mobile;
        Self {
            height: "100%",
            background_color: BACKGROUND_COLOR,
            duration: FLIP_DURATION_MS,
            direction: direction.library_code(),

            webgl: !mobile,
            webgl_shadow: !mobile,
            sound_enable: !mobile,

            auto_enable_outline: false,
            auto_enable_thumbnail: false,
            overwrite_pdf_outline: false,
            show_download_control: false,
            show_print_control: false,
            show_search_control: true,

            page_mode: PageMode::for_device(profile).code(constants),
            single_page_mode: constants.single_page_auto,

            max_texture_size: if mobile {
                MOBILE_MAX_TEXTURE_SIZE
            } else {
                DESKTOP_MAX_TEXTURE_SIZE
            },
            min_texture_size: MIN_TEXTURE_SIZE,
            range_chunk_size: RANGE_CHUNK_SIZE,
            zoom_ratio: if mobile {
                MOBILE_ZOOM_RATIO
            } else {
                DESKTOP_ZOOM_RATIO
            },
            force_fit: true,
            transparent: false,
            hard: "none",
            scroll_wheel: true,

            open_page: open_page.unwrap_or_default(),
            pdf_id: pdf_id
                .filter(|id| !id.is_empty())
                .unwrap_or(pdf_url)
                .to_string(),
        }
    }
}
