// Browser wiring for the music player: the singleton <audio> element, the
// track buttons, mute/progress/time widgets, minimize toggle, the periodic
// position save and the first-gesture autoplay unlock.

use std::cell::RefCell;
use std::rc::Rc;

use gloo::events::EventListener;
use gloo::timers::callback::Interval;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlAudioElement, MouseEvent};

use super::{AudioController, MediaSink, SAVE_INTERVAL_MS, TrackId, VOLUME, format_time};
use crate::dom;
use crate::error::Result;
use crate::store::SharedStore;

const ICON_MUTED: &str = "<i class=\"fas fa-volume-mute\"></i>";
const ICON_UNMUTED: &str = "<i class=\"fas fa-volume-up\"></i>";
const UNLOCK_EVENTS: [&str; 3] = ["pointerdown", "keydown", "touchstart"];

pub struct HtmlMedia {
    el: HtmlAudioElement,
}

impl HtmlMedia {
    pub fn create() -> Result<Self> {
        let el = HtmlAudioElement::new()?;
        el.set_volume(VOLUME);
        el.set_preload("auto");
        el.set_loop(true);
        Ok(Self { el })
    }

    pub fn element(&self) -> &HtmlAudioElement {
        &self.el
    }
}

impl MediaSink for HtmlMedia {
    fn source(&self) -> String {
        self.el.src()
    }

    fn load(&self, url: &str) {
        self.el.set_src(url);
        self.el.load();
    }

    fn position(&self) -> f64 {
        self.el.current_time()
    }

    fn seek(&self, secs: f64) {
        self.el.set_current_time(secs);
    }

    fn duration(&self) -> Option<f64> {
        let d = self.el.duration();
        (d.is_finite() && d > 0.0).then_some(d)
    }

    fn set_muted(&self, muted: bool) {
        self.el.set_muted(muted);
    }

    fn play(&self) {
        if let Ok(promise) = self.el.play() {
            dom::swallow_rejection(&promise);
        }
    }
}

pub type SharedAudio = Rc<RefCell<AudioController<HtmlMedia>>>;

/// Lives as long as the page; dropping it detaches every player listener.
pub struct MusicPlayer {
    audio: SharedAudio,
    listeners: Vec<EventListener>,
    _unlock: dom::ListenerGroup,
    _save_timer: Interval,
}

impl MusicPlayer {
    pub fn start(store: SharedStore) -> Result<Self> {
        let mut ctl = AudioController::new(HtmlMedia::create()?, store);
        ctl.init();
        let audio = Rc::new(RefCell::new(ctl));

        let saver = audio.clone();
        let save_timer = Interval::new(SAVE_INTERVAL_MS, move || {
            saver.borrow().save_position();
        });

        let mut player = Self {
            audio,
            listeners: Vec::new(),
            _unlock: dom::ListenerGroup::default(),
            _save_timer: save_timer,
        };
        let doc = dom::document()?;
        player.bind_track_buttons(&doc);
        player.bind_controls(&doc);
        player.bind_minimize(&doc);
        player.bind_unlock()?;
        refresh_track_buttons(&doc, player.audio.borrow().track());
        log::info!("music player ready (track {})", player.audio.borrow().track());
        Ok(player)
    }

    // Delegated so buttons inside swapped-in sections work too.
    fn bind_track_buttons(&mut self, doc: &Document) {
        let audio = self.audio.clone();
        let listener = EventListener::new(doc, "click", move |event| {
            let Some(btn) = dom::closest_from_event(event, ".music-btn") else {
                return;
            };
            let Some(song) = dom::data(&btn, "song") else {
                return;
            };
            let track = audio.borrow_mut().select_track(&song);
            if let Ok(doc) = dom::document() {
                refresh_track_buttons(&doc, track);
            }
        });
        self.listeners.push(listener);
    }

    fn bind_controls(&mut self, doc: &Document) {
        if let Some(mute_btn) = doc.get_element_by_id("muteBtn") {
            set_mute_icon(&mute_btn, self.audio.borrow().is_muted());
            let audio = self.audio.clone();
            let btn = mute_btn.clone();
            self.listeners
                .push(EventListener::new(&mute_btn, "click", move |_| {
                    let muted = audio.borrow_mut().toggle_mute();
                    set_mute_icon(&btn, muted);
                }));
        }

        let bar = doc.get_element_by_id("progressBar");
        let time = doc.get_element_by_id("musicTime");
        if let (Some(bar), Some(time)) = (bar, time) {
            let audio = self.audio.clone();
            let el = self.audio.borrow().media().element().clone();
            self.listeners
                .push(EventListener::new(&el, "timeupdate", move |_| {
                    let ctl = audio.borrow();
                    let Some(p) = ctl.progress() else {
                        return;
                    };
                    dom::set_style(&bar, "width", &format!("{}%", p * 100.0));
                    dom::set_text(&time, &format_time(ctl.media().position()));
                }));
        }

        if let Some(track) = doc.query_selector(".music-progress").ok().flatten() {
            let audio = self.audio.clone();
            let target = track.clone();
            self.listeners
                .push(EventListener::new(&track, "click", move |event| {
                    let Some(mouse) = event.dyn_ref::<MouseEvent>() else {
                        return;
                    };
                    let rect = target.get_bounding_client_rect();
                    if rect.width() <= 0.0 {
                        return;
                    }
                    let fraction = (mouse.client_x() as f64 - rect.left()) / rect.width();
                    audio.borrow().seek_fraction(fraction);
                }));
        }
    }

    fn bind_minimize(&mut self, doc: &Document) {
        let Some(panel) = doc.get_element_by_id("musicPlayer") else {
            return;
        };
        if self.audio.borrow().is_minimized() {
            dom::set_class(&panel, "minimized", true);
        }

        if let Some(close) = doc.get_element_by_id("musicClose") {
            let audio = self.audio.clone();
            let p = panel.clone();
            self.listeners
                .push(EventListener::new(&close, "click", move |event| {
                    event.stop_propagation();
                    let minimized = !dom::has_class(&p, "minimized");
                    dom::set_class(&p, "minimized", minimized);
                    audio.borrow().set_minimized(minimized);
                }));
        }

        if let Some(header) = dom::find(&panel, ".music-header") {
            let audio = self.audio.clone();
            let p = panel.clone();
            self.listeners
                .push(EventListener::new(&header, "click", move |_| {
                    if dom::has_class(&p, "minimized") {
                        dom::set_class(&p, "minimized", false);
                        audio.borrow().set_minimized(false);
                    }
                }));
        }
    }

    /// Autoplay is usually blocked until the user interacts; the first
    /// pointer, key or touch event retries playback once and detaches all
    /// three listeners.
    fn bind_unlock(&mut self) -> Result<()> {
        let win = dom::window()?;
        let audio = self.audio.clone();
        self._unlock = dom::first_of(&win, &UNLOCK_EVENTS, move |_| {
            audio.borrow().play_if_unmuted();
        });
        Ok(())
    }
}

fn set_mute_icon(btn: &Element, muted: bool) {
    btn.set_inner_html(if muted { ICON_MUTED } else { ICON_UNMUTED });
}

fn refresh_track_buttons(doc: &Document, track: TrackId) {
    let Some(root) = doc.document_element() else {
        return;
    };
    let current = track.to_string();
    for btn in dom::find_all(&root, ".music-btn") {
        let active = dom::data(&btn, "song").as_deref() == Some(current.as_str());
        dom::set_class(&btn, "active", active);
    }
}
