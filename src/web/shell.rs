//! UI shell wiring
//!
//! Connects the page's controls to [`ThemeManager`], [`PanelController`]
//! and the direction toggle. Nothing here awaits or touches the
//! flipbook container.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use gloo::events::EventListener;
use gloo::timers::callback::Timeout;
use wasm_bindgen::JsCast;
use web_sys::{Element, Event, EventTarget, HtmlSelectElement, KeyboardEvent, Node, Storage};

use super::dom::{BrowserDom, DIRECTION_BUTTON_ID, THEME_SELECT_ID};
use crate::reader::Reader;
use crate::shell::{KeyInput, PanelController, PanelEffect, ThemeManager, ThemeStore};

const PANEL_ID: &str = "unifiedPanel";
const PANEL_TOGGLE_ID: &str = "toggleUnifiedPanelBtn";
const PANEL_CLOSE_ID: &str = "closeUnifiedPanelBtn";
const DENSITY_BUTTON_SELECTOR: &str = ".panel-toggle-btn";

const OPEN_ICON: &str = r#"<i class="fas fa-bars"></i>"#;
const CLOSE_ICON: &str = r#"<i class="fas fa-times"></i>"#;

/// Theme choice kept in `localStorage`
pub struct LocalThemeStore {
    storage: Option<Storage>,
    key: String,
}

impl LocalThemeStore {
    pub fn new(dom: &BrowserDom, key: &str) -> Self {
        Self {
            storage: dom.window().local_storage().ok().flatten(),
            key: key.to_string(),
        }
    }
}

impl ThemeStore for LocalThemeStore {
    fn load(&self) -> Option<String> {
        self.storage.as_ref()?.get_item(&self.key).ok().flatten()
    }

    fn save(&self, theme: &str) {
        if let Some(storage) = &self.storage {
            if storage.set_item(&self.key, theme).is_err() {
                tracing::debug!("Theme not saved: storage unavailable");
            }
        }
    }
}

/// Page-lifetime shell state; listeners are removed when it drops
pub struct Shell {
    dom: Rc<BrowserDom>,
    reader: Rc<Reader>,
    themes: RefCell<ThemeManager<LocalThemeStore>>,
    panel: RefCell<PanelController>,
    auto_hide: RefCell<Option<Timeout>>,
    listeners: RefCell<Vec<EventListener>>,
}

impl Shell {
    pub fn install(dom: Rc<BrowserDom>, reader: Rc<Reader>) -> Rc<Self> {
        let store = LocalThemeStore::new(&dom, &reader.config().theme_storage_key);
        let shell = Rc::new(Self {
            dom,
            reader,
            themes: RefCell::new(ThemeManager::new(store)),
            panel: RefCell::new(PanelController::new()),
            auto_hide: RefCell::new(None),
            listeners: RefCell::new(Vec::new()),
        });

        shell.themes.borrow_mut().init(shell.dom.as_ref());
        shell.render_panel(false);

        shell.bind_theme_select();
        shell.bind_panel();
        shell.bind_density_buttons();
        shell.bind_direction_button();

        shell
    }

    /// Theme currently applied to the body
    pub fn current_theme(&self) -> &'static str {
        self.themes.borrow().current()
    }

    fn listen(&self, listener: EventListener) {
        self.listeners.borrow_mut().push(listener);
    }

    fn bind_theme_select(self: &Rc<Self>) {
        let Some(select) = self.dom.element(THEME_SELECT_ID) else {
            return;
        };
        let weak = Rc::downgrade(self);
        let listener = EventListener::new(&select, "change", move |event: &Event| {
            let Some(shell) = weak.upgrade() else {
                return;
            };
            let Some(select) = event
                .target()
                .and_then(|target| target.dyn_into::<HtmlSelectElement>().ok())
            else {
                return;
            };
            shell
                .themes
                .borrow_mut()
                .select(&select.value(), shell.dom.as_ref());
        });
        self.listen(listener);
    }

    fn bind_panel(self: &Rc<Self>) {
        if let Some(toggle) = self.dom.element(PANEL_TOGGLE_ID) {
            let listener = self.on(&toggle, "click", |shell, _| shell.panel.borrow_mut().toggle());
            self.listen(listener);
        }

        if let Some(close) = self.dom.element(PANEL_CLOSE_ID) {
            let listener = self.on(&close, "click", |shell, _| shell.panel.borrow_mut().close());
            self.listen(listener);
        }

        if let Some(panel) = self.dom.element(PANEL_ID) {
            for event_type in ["mouseenter", "focusin"] {
                let listener = self.on(&panel, event_type, |shell, _| shell.panel.borrow().pointer_entered());
                self.listen(listener);
            }
            for event_type in ["mouseleave", "focusout"] {
                let listener = self.on(&panel, event_type, |shell, _| shell.panel.borrow().pointer_left());
                self.listen(listener);
            }
        }

        let document = self.dom.document().clone();
        let listener = self.on(&document, "click", |shell, event| {
            let inside = shell.click_inside_panel(event);
            shell.panel.borrow_mut().document_clicked(inside)
        });
        self.listen(listener);

        let listener = self.on(&document, "keydown", |shell, event| {
            let Some(key_event) = event.dyn_ref::<KeyboardEvent>() else {
                return Vec::new();
            };
            let key = key_event.key();
            shell.panel.borrow_mut().key_pressed(KeyInput {
                key: &key,
                ctrl: key_event.ctrl_key(),
                meta: key_event.meta_key(),
            })
        });
        self.listen(listener);
    }

    fn bind_density_buttons(self: &Rc<Self>) {
        for button in self.dom.select_all(DENSITY_BUTTON_SELECTOR) {
            let listener = self.on(&button, "click", |shell, event| {
                let clicked = event
                    .current_target()
                    .and_then(|target| target.dyn_into::<Element>().ok());
                for other in shell.dom.select_all(DENSITY_BUTTON_SELECTOR) {
                    let _ = other.class_list().remove_1("active");
                }
                let density = clicked.as_ref().and_then(|element| {
                    let _ = element.class_list().add_1("active");
                    element.get_attribute("data-density")
                });
                shell.panel.borrow().density_selected(density.as_deref())
            });
            self.listen(listener);
        }
    }

    fn bind_direction_button(self: &Rc<Self>) {
        let Some(button) = self.dom.element(DIRECTION_BUTTON_ID) else {
            return;
        };
        let listener = self.on(&button, "click", |shell, _| {
            let reader = Rc::clone(&shell.reader);
            wasm_bindgen_futures::spawn_local(async move {
                reader.toggle_direction().await;
            });
            shell.panel.borrow().activity()
        });
        self.listen(listener);
    }

    /// Listener that feeds the controller's effects back into [`Shell::run`]
    fn on<F>(
        self: &Rc<Self>,
        target: &EventTarget,
        event_type: &'static str,
        handler: F,
    ) -> EventListener
    where
        F: Fn(&Rc<Shell>, &Event) -> Vec<PanelEffect> + 'static,
    {
        let weak = Rc::downgrade(self);
        EventListener::new(target, event_type, move |event: &Event| {
            if let Some(shell) = weak.upgrade() {
                let effects = handler(&shell, event);
                shell.run(effects, Some(event));
            }
        })
    }

    fn click_inside_panel(&self, event: &Event) -> bool {
        let Some(node) = event.target().and_then(|target| target.dyn_into::<Node>().ok()) else {
            return false;
        };
        [PANEL_ID, PANEL_TOGGLE_ID]
            .iter()
            .filter_map(|id| self.dom.element(id))
            .any(|element| element.contains(Some(&node)))
    }

    fn run(self: &Rc<Self>, effects: Vec<PanelEffect>, event: Option<&Event>) {
        for effect in effects {
            match effect {
                PanelEffect::Open => self.render_panel(true),
                PanelEffect::Close => self.render_panel(false),
                PanelEffect::CancelAutoHide => {
                    self.auto_hide.borrow_mut().take();
                }
                PanelEffect::ScheduleAutoHide(delay) => {
                    let timeout = Timeout::new(delay.as_millis() as u32, auto_hide(Rc::downgrade(self)));
                    *self.auto_hide.borrow_mut() = Some(timeout);
                }
                PanelEffect::SetDensity(density) => {
                    if let Some(body) = self.dom.body() {
                        let _ = body.set_attribute("data-density", &density);
                    }
                }
                PanelEffect::PreventDefault => {
                    if let Some(event) = event {
                        event.prevent_default();
                    }
                }
            }
        }
    }

    fn render_panel(&self, open: bool) {
        if let Some(panel) = self.dom.element(PANEL_ID) {
            let _ = panel.class_list().toggle_with_force("open", open);
        }
        if let Some(body) = self.dom.body() {
            let _ = body.class_list().toggle_with_force("panel-open", open);
        }
        if let Some(toggle) = self.dom.element(PANEL_TOGGLE_ID) {
            let (icon, title) = if open {
                (CLOSE_ICON, "Close Control Panel")
            } else {
                (OPEN_ICON, "Open Control Panel")
            };
            toggle.set_inner_html(icon);
            let _ = toggle.set_attribute("title", title);
        }
    }
}

fn auto_hide(weak: Weak<Shell>) -> impl FnOnce() + 'static {
    move || {
        let Some(shell) = weak.upgrade() else {
            return;
        };
        // The running callback must not drop its own closure
        if let Some(fired) = shell.auto_hide.borrow_mut().take() {
            let _ = fired.forget();
        }
        let effects = shell.panel.borrow_mut().auto_hide_elapsed();
        shell.run(effects, None);
    }
}
