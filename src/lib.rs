//! Celebration page core crate.
//!
//! The page ships every section's markup up front; `start_app()` wires the
//! persistent music player, installs the in-page section router and hands each
//! mounted section (gallery, messages, game, timeline) its own initializer.
//! Game and router logic stay free of browser types where possible so they can
//! be exercised by native tests.

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::prelude::*;

pub mod audio;
pub mod dom;
pub mod error;
pub mod game;
pub mod panels;
pub mod rng;
pub mod router;
pub mod store;

use audio::player::MusicPlayer;
use game::panel::GamePanel;
use panels::{GalleryPanel, MessagesPanel, TimelinePanel};
use router::{Section, SectionFactory, SectionKey, ViewRouter};
use store::{LocalStore, SharedStore};

// Optional small allocator for size (feature gated)
#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

#[wasm_bindgen(start)]
pub fn wasm_start() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Page-lifetime handles; dropping them would detach every listener.
struct App {
    _player: Option<MusicPlayer>,
    _router: Option<Rc<RefCell<ViewRouter>>>,
}

thread_local! {
    static APP: RefCell<Option<App>> = const { RefCell::new(None) };
}

/// Builds the initializer for a mounted section.
pub fn section_factory(store: SharedStore) -> SectionFactory {
    Box::new(move |key: SectionKey| -> Box<dyn Section> {
        match key {
            SectionKey::Gallery => Box::new(GalleryPanel::new()),
            SectionKey::Messages => Box::new(MessagesPanel::new()),
            SectionKey::Game => Box::new(GamePanel::new(store.clone())),
            SectionKey::Timeline => Box::new(TimelinePanel),
        }
    })
}

// -----------------------------------------------------------------------------
// Unified entrypoint
// -----------------------------------------------------------------------------

#[wasm_bindgen]
pub fn start_app() -> Result<(), JsValue> {
    // A second call (hot reload) keeps the first logger.
    let _ = console_log::init_with_level(log::Level::Info);

    let store: SharedStore = Rc::new(LocalStore::open());
    router::view::highlight_active_nav();

    let player = match MusicPlayer::start(store.clone()) {
        Ok(p) => Some(p),
        Err(e) => {
            log::error!("music player unavailable: {e}");
            None
        }
    };
    let router = ViewRouter::install(section_factory(store))?;

    APP.with(|app| {
        app.replace(Some(App {
            _player: player,
            _router: router,
        }))
    });
    log::info!("celebration page started");
    Ok(())
}
