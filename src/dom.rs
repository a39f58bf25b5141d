// Thin helpers over web-sys for the handful of DOM operations the panels use.
// Missing elements are reported as `None` so callers can skip the feature.

use std::cell::RefCell;
use std::rc::Rc;

use gloo::events::EventListener;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, EventTarget, HtmlElement, Window};

use crate::error::{AppError, Result};

pub fn window() -> Result<Window> {
    web_sys::window().ok_or(AppError::Unavailable("window"))
}

pub fn document() -> Result<Document> {
    window()?.document().ok_or(AppError::Unavailable("document"))
}

pub fn by_id(id: &str) -> Option<Element> {
    document().ok()?.get_element_by_id(id)
}

pub fn find(root: &Element, selector: &str) -> Option<Element> {
    root.query_selector(selector).ok().flatten()
}

pub fn find_all(root: &Element, selector: &str) -> Vec<Element> {
    let Ok(list) = root.query_selector_all(selector) else {
        return Vec::new();
    };
    (0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|n| n.dyn_into::<Element>().ok())
        .collect()
}

pub fn set_text(el: &Element, text: &str) {
    el.set_text_content(Some(text));
}

pub fn set_class(el: &Element, class: &str, on: bool) {
    let list = el.class_list();
    let _ = if on { list.add_1(class) } else { list.remove_1(class) };
}

pub fn has_class(el: &Element, class: &str) -> bool {
    el.class_list().contains(class)
}

pub fn set_style(el: &Element, prop: &str, value: &str) {
    if let Some(html) = el.dyn_ref::<HtmlElement>() {
        let _ = html.style().set_property(prop, value);
    }
}

pub fn data(el: &Element, name: &str) -> Option<String> {
    el.get_attribute(&format!("data-{name}"))
}

pub fn data_index(el: &Element, name: &str) -> Option<usize> {
    data(el, name)?.trim().parse().ok()
}

/// Closest ancestor (inclusive) of the event target matching `selector`.
pub fn closest_from_event(event: &web_sys::Event, selector: &str) -> Option<Element> {
    event
        .target()?
        .dyn_into::<Element>()
        .ok()?
        .closest(selector)
        .ok()
        .flatten()
}

pub fn scroll_to_top() {
    if let Some(w) = web_sys::window() {
        w.scroll_to_with_x_and_y(0.0, 0.0);
    }
}

pub fn viewport() -> (f64, f64) {
    let Some(w) = web_sys::window() else {
        return (0.0, 0.0);
    };
    let px = |v: std::result::Result<JsValue, JsValue>| v.ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
    (px(w.inner_width()), px(w.inner_height()))
}

/// Listeners that are detached together.
pub type ListenerGroup = Rc<RefCell<Vec<EventListener>>>;

/// Listens for any of `kinds` on `target`. The first matching event runs `f`
/// and detaches every listener in the group. Dropping the group detaches them
/// without running `f`.
pub fn first_of(
    target: &EventTarget,
    kinds: &[&'static str],
    f: impl FnOnce(&web_sys::Event) + 'static,
) -> ListenerGroup {
    let group: ListenerGroup = Rc::default();
    let pending = Rc::new(RefCell::new(Some(f)));
    let listeners: Vec<EventListener> = kinds
        .iter()
        .map(|&kind| {
            let group = Rc::downgrade(&group);
            let pending = pending.clone();
            EventListener::new(target, kind, move |event| {
                let run = pending.borrow_mut().take();
                if let Some(run) = run {
                    run(event);
                }
                if let Some(group) = group.upgrade() {
                    let detached = std::mem::take(&mut *group.borrow_mut());
                    drop(detached);
                }
            })
        })
        .collect();
    *group.borrow_mut() = listeners;
    group
}

thread_local! {
    // Shared rejection handler for media `play()` promises (autoplay policy).
    static SWALLOW: Closure<dyn FnMut(JsValue)> = Closure::new(|err: JsValue| {
        log::debug!("playback rejected: {err:?}");
    });
}

/// Attaches a no-op rejection handler so a blocked `play()` stays quiet.
pub fn swallow_rejection(promise: &js_sys::Promise) {
    SWALLOW.with(|cb| {
        let _ = promise.catch(cb);
    });
}

/// Restarts a short sound cue (`<audio id=...>`) if the page has one.
pub fn play_cue(root: &Element, id: &str) {
    let Some(audio) = find(root, &format!("#{id}"))
        .or_else(|| by_id(id))
        .and_then(|el| el.dyn_into::<web_sys::HtmlMediaElement>().ok())
    else {
        return;
    };
    audio.set_current_time(0.0);
    if let Ok(p) = audio.play() {
        swallow_rejection(&p);
    }
}
