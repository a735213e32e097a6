//! UI shell logic
//!
//! Theme selection and the collapsible control panel. Neither touches
//! the flipbook container, so the shell can never race a viewer mount.

pub mod panel;
pub mod theme;

pub use panel::{KeyInput, PanelController, PanelEffect, AUTO_HIDE_DELAY};
pub use theme::{ThemeManager, ThemeStore, ThemeSurface, AVAILABLE_THEMES, DEFAULT_THEME};
