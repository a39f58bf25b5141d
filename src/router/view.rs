// DOM side of the router: clones section markup into `#spaView`, toggles the
// homepage, records history entries and owns the active section's lifecycle.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use gloo::events::{EventListener, EventListenerOptions};
use gloo::timers::callback::Timeout;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Element, HtmlElement, PopStateEvent};

use super::{
    LinkTarget, NavigationEntry, Route, Section, SectionFactory, SectionKey, classify,
    route_for_history,
};
use crate::dom;
use crate::error::{AppError, Result};

pub const HOME_SELECTOR: &str = ".homepage-container";
pub const VIEW_ID: &str = "spaView";
/// Lets the cloned markup go through one layout pass before its initializer runs.
pub const INIT_SETTLE_MS: u32 = 150;

const NAV_LINK_SELECTORS: [&str; 2] = ["a.nav-card", "nav a[href]"];

pub struct ViewRouter {
    home: HtmlElement,
    view: HtmlElement,
    factory: SectionFactory,
    current: NavigationEntry,
    active: Option<Box<dyn Section>>,
    pending_init: Option<Timeout>,
    listeners: Vec<EventListener>,
    me: Weak<RefCell<ViewRouter>>,
}

impl ViewRouter {
    /// Hooks link clicks and history navigation. Returns `None` on pages that
    /// lack the homepage or view container (the router only runs on the index).
    pub fn install(factory: SectionFactory) -> Result<Option<Rc<RefCell<ViewRouter>>>> {
        let doc = dom::document()?;
        let home = doc
            .query_selector(HOME_SELECTOR)
            .ok()
            .flatten()
            .and_then(|el| el.dyn_into::<HtmlElement>().ok());
        let view = doc
            .get_element_by_id(VIEW_ID)
            .and_then(|el| el.dyn_into::<HtmlElement>().ok());
        let (Some(home), Some(view)) = (home, view) else {
            log::info!("no homepage/view container, section routing disabled");
            return Ok(None);
        };

        let router = Rc::new_cyclic(|me| {
            RefCell::new(ViewRouter {
                home,
                view,
                factory,
                current: NavigationEntry::default(),
                active: None,
                pending_init: None,
                listeners: Vec::new(),
                me: me.clone(),
            })
        });

        let weak = Rc::downgrade(&router);
        let click = EventListener::new_with_options(
            &doc,
            "click",
            EventListenerOptions::enable_prevent_default(),
            move |event| {
                if let Some(r) = weak.upgrade() {
                    r.borrow_mut().on_click(event);
                }
            },
        );
        let win = dom::window()?;
        let weak = Rc::downgrade(&router);
        let popstate = EventListener::new(&win, "popstate", move |event| {
            if let Some(r) = weak.upgrade() {
                r.borrow_mut().on_popstate(event);
            }
        });
        router.borrow_mut().listeners = vec![click, popstate];
        Ok(Some(router))
    }

    pub fn current(&self) -> NavigationEntry {
        self.current
    }

    pub fn go(&mut self, route: Route, push: bool) {
        match route {
            Route::Home => self.show_home(push),
            Route::Section(key) => {
                if let Err(e) = self.navigate_to(key, push) {
                    log::warn!("navigation to {} skipped: {e}", key.file());
                }
            }
        }
    }

    /// Mounts a fresh copy of `key`'s markup. Re-navigating to the section on
    /// screen re-renders it.
    pub fn navigate_to(&mut self, key: SectionKey, push: bool) -> Result<()> {
        let source = dom::by_id(key.source_id())
            .ok_or_else(|| AppError::MissingElement(format!("#{}", key.source_id())))?;
        self.release();
        hide_sources();

        let copy: Element = source
            .clone_node_with_deep(true)?
            .dyn_into()
            .map_err(|_| AppError::Dom("section clone is not an element".into()))?;
        copy.remove_attribute("id")?;
        dom::set_class(&copy, "page-section", false);
        dom::set_class(&copy, "active-page", true);
        for (prop, value) in [
            ("display", "block"),
            ("visibility", "visible"),
            ("opacity", "1"),
            ("position", "relative"),
            ("left", "auto"),
            ("width", "100%"),
        ] {
            dom::set_style(&copy, prop, value);
        }

        self.view.set_inner_html("");
        self.view.append_child(&copy)?;
        let _ = self.home.style().set_property("display", "none");
        let view_style = self.view.style();
        let _ = view_style.set_property("display", "block");
        let _ = view_style.set_property("visibility", "visible");
        let _ = view_style.set_property("opacity", "1");
        dom::scroll_to_top();

        let in_history = !push || push_history(Some(key));
        self.current = NavigationEntry {
            section: Some(key),
            in_history,
        };
        log::info!("showing {}", key.file());

        self.active = Some((self.factory)(key));
        let weak = self.me.clone();
        self.pending_init = Some(Timeout::new(INIT_SETTLE_MS, move || {
            if let Some(r) = weak.upgrade() {
                r.borrow_mut().run_initializer(key, &copy);
            }
        }));
        Ok(())
    }

    pub fn show_home(&mut self, push: bool) {
        self.release();
        hide_sources();
        self.view.set_inner_html("");
        let view_style = self.view.style();
        let _ = view_style.set_property("display", "none");
        let _ = view_style.set_property("visibility", "hidden");
        let home_style = self.home.style();
        let _ = home_style.set_property("display", "flex");
        let _ = home_style.set_property("visibility", "visible");
        let _ = home_style.set_property("opacity", "1");
        dom::scroll_to_top();
        let in_history = !push || push_history(None);
        self.current = NavigationEntry {
            section: None,
            in_history,
        };
    }

    /// Unbinds the active section and removes every router listener.
    pub fn teardown(&mut self) {
        self.release();
        self.listeners.clear();
    }

    fn run_initializer(&mut self, key: SectionKey, root: &Element) {
        let Some(section) = self.active.as_mut() else {
            return;
        };
        // The static markup stays up even if wiring fails.
        match section.bind(root) {
            Ok(()) => log::debug!("{} initialized", key.file()),
            Err(e) => log::error!("initializing {} failed: {e}", key.file()),
        }
    }

    fn release(&mut self) {
        self.pending_init = None;
        if let Some(mut section) = self.active.take() {
            section.unbind();
        }
    }

    fn on_click(&mut self, event: &web_sys::Event) {
        let Some(link) = NAV_LINK_SELECTORS
            .iter()
            .find_map(|sel| dom::closest_from_event(event, sel))
        else {
            return;
        };
        let href = link.get_attribute("href").unwrap_or_default();
        if let LinkTarget::Intercept(route) = classify(&href) {
            event.prevent_default();
            self.go(route, true);
        }
    }

    fn on_popstate(&mut self, event: &web_sys::Event) {
        let marker = event
            .dyn_ref::<PopStateEvent>()
            .and_then(|e| e.state().as_string());
        let hash = dom::window()
            .ok()
            .and_then(|w| w.location().hash().ok())
            .unwrap_or_default();
        match route_for_history(marker.as_deref(), &hash) {
            Some(route) => self.go(route, false),
            None => log::debug!("in-page anchor {hash}, section kept"),
        }
    }
}

impl Drop for ViewRouter {
    fn drop(&mut self) {
        self.teardown();
    }
}

fn hide_sources() {
    for key in SectionKey::ALL {
        if let Some(section) = dom::by_id(key.source_id()) {
            dom::set_style(&section, "display", "none");
            dom::set_style(&section, "visibility", "hidden");
        }
    }
}

/// Section entries store the file name as state and `#<file>` as URL; home
/// stores no state and drops the hash.
fn push_history(key: Option<SectionKey>) -> bool {
    let Ok(win) = dom::window() else {
        return false;
    };
    let Ok(history) = win.history() else {
        return false;
    };
    let (state, url) = match key {
        Some(k) => (JsValue::from_str(k.file()), format!("#{}", k.file())),
        None => (
            JsValue::NULL,
            win.location().pathname().unwrap_or_else(|_| "/".into()),
        ),
    };
    match history.push_state_with_url(&state, "", Some(&url)) {
        Ok(()) => true,
        Err(e) => {
            log::warn!("history push failed: {e:?}");
            false
        }
    }
}

/// Marks the navbar link for the current document as active.
pub fn highlight_active_nav() {
    let Ok(doc) = dom::document() else {
        return;
    };
    let path = doc
        .location()
        .and_then(|l| l.pathname().ok())
        .unwrap_or_default();
    let page = match path.rsplit('/').next() {
        Some(p) if !p.is_empty() => p.to_string(),
        _ => "index.html".to_string(),
    };
    let Some(root) = doc.document_element() else {
        return;
    };
    for link in dom::find_all(&root, ".navbar-menu a") {
        let matches = link.get_attribute("href").as_deref() == Some(page.as_str());
        dom::set_class(&link, "active", matches);
    }
}
