//! Control panel behaviour
//!
//! The panel logic is a small state machine that turns user input into
//! [`PanelEffect`]s; the browser glue performs them. Keeping timers and
//! DOM out of here lets the open/close rules be tested directly.

use std::time::Duration;

/// Idle time before an open panel closes itself
pub const AUTO_HIDE_DELAY: Duration = Duration::from_secs(5);

pub const DEFAULT_DENSITY: &str = "comfortable";

/// Side effects requested by the controller
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PanelEffect {
    Open,
    Close,
    ScheduleAutoHide(Duration),
    CancelAutoHide,
    SetDensity(String),
    PreventDefault,
}

/// A key press, reduced to what the shortcuts need
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyInput<'a> {
    pub key: &'a str,
    pub ctrl: bool,
    pub meta: bool,
}

#[derive(Debug, Default)]
pub struct PanelController {
    open: bool,
}

impl PanelController {
    /// Panel starts closed
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn open(&mut self) -> Vec<PanelEffect> {
        self.open = true;
        vec![
            PanelEffect::Open,
            PanelEffect::CancelAutoHide,
            PanelEffect::ScheduleAutoHide(AUTO_HIDE_DELAY),
        ]
    }

    pub fn close(&mut self) -> Vec<PanelEffect> {
        self.open = false;
        vec![PanelEffect::Close, PanelEffect::CancelAutoHide]
    }

    pub fn toggle(&mut self) -> Vec<PanelEffect> {
        if self.open {
            self.close()
        } else {
            self.open()
        }
    }

    /// Auto-hide timer fired
    pub fn auto_hide_elapsed(&mut self) -> Vec<PanelEffect> {
        if self.open {
            self.close()
        } else {
            Vec::new()
        }
    }

    /// Pointer or focus entered the panel
    pub fn pointer_entered(&self) -> Vec<PanelEffect> {
        vec![PanelEffect::CancelAutoHide]
    }

    /// Pointer or focus left the panel
    pub fn pointer_left(&self) -> Vec<PanelEffect> {
        vec![
            PanelEffect::CancelAutoHide,
            PanelEffect::ScheduleAutoHide(AUTO_HIDE_DELAY),
        ]
    }

    /// Any interaction inside the panel keeps it open a while longer
    pub fn activity(&self) -> Vec<PanelEffect> {
        if self.open {
            self.pointer_left()
        } else {
            Vec::new()
        }
    }

    /// A document click; `inside` covers the panel and its toggle button
    pub fn document_clicked(&mut self, inside: bool) -> Vec<PanelEffect> {
        if self.open && !inside {
            self.close()
        } else {
            Vec::new()
        }
    }

    pub fn key_pressed(&mut self, input: KeyInput<'_>) -> Vec<PanelEffect> {
        let mut effects = Vec::new();
        if (input.ctrl || input.meta) && input.key == "k" {
            effects.push(PanelEffect::PreventDefault);
            effects.extend(self.toggle());
        }
        if input.key == "Escape" && self.open {
            effects.extend(self.close());
        }
        effects
    }

    /// Density button clicked; `None` means the button carries no value
    pub fn density_selected(&self, density: Option<&str>) -> Vec<PanelEffect> {
        let density = density
            .filter(|value| !value.is_empty())
            .unwrap_or(DEFAULT_DENSITY);
        let mut effects = vec![PanelEffect::SetDensity(density.to_string())];
        effects.extend(self.activity());
        effects
    }
}
