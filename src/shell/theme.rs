//! Theme manager
//!
//! Applies one of a fixed catalog of body themes and remembers the
//! choice across visits.

pub const DEFAULT_THEME: &str = "default";

/// Every theme the stylesheet knows about
pub const AVAILABLE_THEMES: &[&str] = &[
    "default", "dark", "light", "purple", "green", "red", "orange", "pink", "cyan", "indigo",
    "yellow", "gray", "emerald", "teal", "violet", "rose", "amber", "lime", "sky", "fuchsia",
    "slate", "zinc", "neutral", "stone", "dracula", "nord", "gruvbox", "solarized", "monokai",
    "tomorrow", "github", "material", "vscode", "atom", "xcode", "sublime", "jetbrains",
    "notepad", "terminal", "matrix", "cyberpunk", "ocean", "forest",
];

/// Catalog name for `name`, or the default theme
pub fn resolve_theme(name: &str) -> &'static str {
    AVAILABLE_THEMES
        .iter()
        .copied()
        .find(|theme| *theme == name)
        .unwrap_or(DEFAULT_THEME)
}

/// Persistent theme choice; failures are swallowed by implementations
pub trait ThemeStore {
    fn load(&self) -> Option<String>;
    fn save(&self, theme: &str);
}

/// Where a theme is rendered
pub trait ThemeSurface {
    /// Swap the body's `theme-*` class and `data-theme` attribute
    fn apply_body_theme(&self, theme: &str);
    /// Reflect the theme in the selector control, if present
    fn sync_selector(&self, theme: &str);
}

pub struct ThemeManager<S> {
    store: S,
    current: &'static str,
    initialised: bool,
}

impl<S: ThemeStore> ThemeManager<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            current: DEFAULT_THEME,
            initialised: false,
        }
    }

    /// Apply the saved theme once; later calls do nothing
    pub fn init(&mut self, surface: &dyn ThemeSurface) {
        if self.initialised {
            return;
        }

        let saved = self
            .store
            .load()
            .map(|theme| theme.trim().to_string())
            .filter(|theme| !theme.is_empty());
        let theme = resolve_theme(saved.as_deref().unwrap_or(DEFAULT_THEME));

        self.apply(theme, surface);
        surface.sync_selector(theme);
        self.initialised = true;
        tracing::debug!("Theme initialised: {}", theme);
    }

    /// Apply `name`, falling back to the default for unknown names
    pub fn apply(&mut self, name: &str, surface: &dyn ThemeSurface) -> &'static str {
        let theme = resolve_theme(name);
        surface.apply_body_theme(theme);
        self.current = theme;
        theme
    }

    /// User picked a theme from the selector
    pub fn select(&mut self, name: &str, surface: &dyn ThemeSurface) {
        let name = if name.is_empty() { DEFAULT_THEME } else { name };
        let theme = self.apply(name, surface);
        self.store.save(theme);
    }

    pub fn current(&self) -> &'static str {
        self.current
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    #[derive(Default)]
    struct MemoryStore {
        value: RefCell<Option<String>>,
    }

    impl ThemeStore for MemoryStore {
        fn load(&self) -> Option<String> {
            self.value.borrow().clone()
        }

        fn save(&self, theme: &str) {
            *self.value.borrow_mut() = Some(theme.to_string());
        }
    }

    #[derive(Default)]
    struct Surface {
        applied: RefCell<Vec<String>>,
        selector: RefCell<Option<String>>,
    }

    impl ThemeSurface for Surface {
        fn apply_body_theme(&self, theme: &str) {
            self.applied.borrow_mut().push(theme.to_string());
        }

        fn sync_selector(&self, theme: &str) {
            *self.selector.borrow_mut() = Some(theme.to_string());
        }
    }

    #[test]
    fn test_catalog_size() {
        assert_eq!(AVAILABLE_THEMES.len(), 43);
        assert_eq!(resolve_theme("nord"), "nord");
        assert_eq!(resolve_theme("NORD"), DEFAULT_THEME);
    }

    #[test]
    fn test_init_applies_saved_theme() {
        let store = MemoryStore::default();
        store.save(" dracula ");
        let surface = Surface::default();
        let mut manager = ThemeManager::new(store);

        manager.init(&surface);
        manager.init(&surface);

        assert_eq!(manager.current(), "dracula");
        assert_eq!(*surface.applied.borrow(), vec!["dracula".to_string()]);
        assert_eq!(surface.selector.borrow().as_deref(), Some("dracula"));
    }

    #[test]
    fn test_init_rejects_unknown_saved_theme() {
        let store = MemoryStore::default();
        store.save("neon");
        let surface = Surface::default();
        let mut manager = ThemeManager::new(store);

        manager.init(&surface);
        assert_eq!(manager.current(), DEFAULT_THEME);
    }

    #[test]
    fn test_select_persists() {
        let surface = Surface::default();
        let mut manager = ThemeManager::new(MemoryStore::default());

        manager.select("ocean", &surface);
        assert_eq!(manager.current(), "ocean");
        assert_eq!(manager.store.load().as_deref(), Some("ocean"));

        manager.select("", &surface);
        assert_eq!(manager.store.load().as_deref(), Some(DEFAULT_THEME));
    }
}
