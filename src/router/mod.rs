//! Single-page section routing.
//!
//! Links on the homepage and in the navbar swap one of a fixed set of
//! pre-rendered sections into a shared view container instead of loading a
//! new document, so the music player keeps playing across navigations.
//! This module holds the pure route vocabulary; [`view`] does the DOM work.

use web_sys::Element;

use crate::error::Result;

pub mod view;

pub use view::ViewRouter;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SectionKey {
    Gallery,
    Messages,
    Game,
    Timeline,
}

impl SectionKey {
    pub const ALL: [SectionKey; 4] = [
        SectionKey::Gallery,
        SectionKey::Messages,
        SectionKey::Game,
        SectionKey::Timeline,
    ];

    pub fn name(self) -> &'static str {
        match self {
            SectionKey::Gallery => "gallery",
            SectionKey::Messages => "messages",
            SectionKey::Game => "game",
            SectionKey::Timeline => "timeline",
        }
    }

    /// Page file the section stands in for; also the history marker.
    pub fn file(self) -> &'static str {
        match self {
            SectionKey::Gallery => "gallery.html",
            SectionKey::Messages => "messages.html",
            SectionKey::Game => "game.html",
            SectionKey::Timeline => "timeline.html",
        }
    }

    /// Id of the hidden source markup in the document.
    pub fn source_id(self) -> &'static str {
        match self {
            SectionKey::Gallery => "gallery-section",
            SectionKey::Messages => "messages-section",
            SectionKey::Game => "game-section",
            SectionKey::Timeline => "timeline-section",
        }
    }

    /// Accepts `gallery` or `gallery.html`.
    pub fn from_name(name: &str) -> Option<SectionKey> {
        let bare = name.strip_suffix(".html").unwrap_or(name);
        SectionKey::ALL.into_iter().find(|k| k.name() == bare)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Route {
    Home,
    Section(SectionKey),
}

/// What to do with a clicked link.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LinkTarget {
    Intercept(Route),
    /// Plain anchors and unknown pages keep the browser's default handling.
    PassThrough,
}

pub fn classify(href: &str) -> LinkTarget {
    let href = href.trim();
    if let Some(name) = href.strip_prefix("#/") {
        if name == "home" {
            return LinkTarget::Intercept(Route::Home);
        }
        return match SectionKey::from_name(name) {
            Some(k) => LinkTarget::Intercept(Route::Section(k)),
            None => LinkTarget::PassThrough,
        };
    }
    if href.starts_with('#') {
        return LinkTarget::PassThrough;
    }
    let path = href.split(['?', '#']).next().unwrap_or_default();
    let file = path.rsplit('/').next().unwrap_or_default();
    match file.strip_suffix(".html").and_then(SectionKey::from_name) {
        Some(k) => LinkTarget::Intercept(Route::Section(k)),
        None => LinkTarget::PassThrough,
    }
}

/// Where a history step lands. Entries pushed by the router carry the
/// section file name; a stateless entry with a fragment belongs to an in-page
/// anchor and is left alone (`None`). Only a stateless, hashless entry is home.
pub fn route_for_history(marker: Option<&str>, hash: &str) -> Option<Route> {
    if let Some(key) = marker.and_then(SectionKey::from_name) {
        return Some(Route::Section(key));
    }
    let fragment = hash.trim_start_matches('#');
    fragment.is_empty().then_some(Route::Home)
}

/// The section currently on screen.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct NavigationEntry {
    pub section: Option<SectionKey>,
    /// Whether the browser history stack has an entry for it.
    pub in_history: bool,
}

/// Lifecycle contract for a mounted section.
///
/// `bind` runs once the section's markup is in the view container and may only
/// touch elements under `root`. `unbind` must cancel every timer and listener
/// `bind` created; the router calls it before the section is replaced.
pub trait Section {
    fn bind(&mut self, root: &Element) -> Result<()>;
    fn unbind(&mut self);
}

pub type SectionFactory = Box<dyn Fn(SectionKey) -> Box<dyn Section>>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_routes_are_intercepted() {
        assert_eq!(classify("#/home"), LinkTarget::Intercept(Route::Home));
        assert_eq!(
            classify("#/gallery.html"),
            LinkTarget::Intercept(Route::Section(SectionKey::Gallery))
        );
        assert_eq!(
            classify("#/game"),
            LinkTarget::Intercept(Route::Section(SectionKey::Game))
        );
        assert_eq!(classify("#/nowhere"), LinkTarget::PassThrough);
    }

    #[test]
    fn direct_page_links_are_intercepted() {
        assert_eq!(
            classify("timeline.html"),
            LinkTarget::Intercept(Route::Section(SectionKey::Timeline))
        );
        assert_eq!(
            classify("./pages/messages.html?x=1"),
            LinkTarget::Intercept(Route::Section(SectionKey::Messages))
        );
    }

    #[test]
    fn plain_anchors_and_unknown_pages_pass_through() {
        assert_eq!(classify("#about"), LinkTarget::PassThrough);
        assert_eq!(classify("index.html"), LinkTarget::PassThrough);
        assert_eq!(classify("https://example.com/"), LinkTarget::PassThrough);
        assert_eq!(classify(""), LinkTarget::PassThrough);
        // bare names only count behind a hash route
        assert_eq!(classify("gallery"), LinkTarget::PassThrough);
    }

    #[test]
    fn history_marker_maps_back_to_route() {
        assert_eq!(
            route_for_history(Some("game.html"), "#game.html"),
            Some(Route::Section(SectionKey::Game))
        );
        assert_eq!(route_for_history(None, ""), Some(Route::Home));
        assert_eq!(route_for_history(None, "#"), Some(Route::Home));
        assert_eq!(route_for_history(Some("junk"), ""), Some(Route::Home));
    }

    #[test]
    fn anchor_history_steps_are_ignored() {
        assert_eq!(route_for_history(None, "#about"), None);
        assert_eq!(route_for_history(Some("junk"), "#top"), None);
    }

    #[test]
    fn keys_roundtrip_through_file_names() {
        for k in SectionKey::ALL {
            assert_eq!(SectionKey::from_name(k.file()), Some(k));
        }
    }
}
