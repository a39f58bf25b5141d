//! Background music: one media session for the lifetime of the page.
//!
//! [`AudioController`] decides what to load, when to seek and what to persist.
//! It drives the media element through [`MediaSink`] so its rules can be
//! checked without a browser; [`player`] binds it to the real `<audio>` and
//! the player widget.

use crate::store::{
    KEY_MUSIC_MINIMIZED, KEY_MUSIC_MUTED, KEY_MUSIC_TIME, KEY_MUSIC_URL, KEY_SELECTED_SONG,
    SharedStore, persist,
};

pub mod player;

pub type TrackId = u8;

pub const DEFAULT_TRACK: TrackId = 1;
pub const VOLUME: f64 = 0.5;
pub const SAVE_INTERVAL_MS: u32 = 1000;

pub static TRACKS: [(TrackId, &str); 3] = [
    (1, "music/Cristina Perri - AThousandYears.mp3"),
    (2, "music/Give Me Your Forever.mp3"),
    (3, "music/you.mp3"),
];

pub fn track_path(id: TrackId) -> Option<&'static str> {
    TRACKS.iter().find(|(t, _)| *t == id).map(|(_, p)| *p)
}

/// Parses a persisted/clicked id, falling back to the default track.
pub fn resolve_track(raw: Option<&str>) -> TrackId {
    raw.and_then(|s| s.trim().parse::<TrackId>().ok())
        .filter(|id| track_path(*id).is_some())
        .unwrap_or(DEFAULT_TRACK)
}

/// Percent-encodes a relative URL the way `encodeURI` does.
pub fn encode_uri(raw: &str) -> String {
    const KEEP: &str = ";,/?:@&=+$-_.!~*'()#";
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        if ch.is_ascii_alphanumeric() || KEEP.contains(ch) {
            out.push(ch);
        } else {
            let mut buf = [0u8; 4];
            for b in ch.encode_utf8(&mut buf).bytes() {
                out.push_str(&format!("%{b:02X}"));
            }
        }
    }
    out
}

pub fn track_url(id: TrackId) -> String {
    encode_uri(track_path(id).unwrap_or(TRACKS[0].1))
}

/// `m:ss`.
pub fn format_time(secs: f64) -> String {
    let total = if secs.is_finite() && secs > 0.0 {
        secs.floor() as u64
    } else {
        0
    };
    format!("{}:{:02}", total / 60, total % 60)
}

/// The operations the controller needs from a media element.
pub trait MediaSink {
    /// Currently loaded source, empty when none.
    fn source(&self) -> String;
    fn load(&self, url: &str);
    fn position(&self) -> f64;
    fn seek(&self, secs: f64);
    /// `None` until metadata is known.
    fn duration(&self) -> Option<f64>;
    fn set_muted(&self, muted: bool);
    /// Attempts playback; a rejection is swallowed by the implementation.
    fn play(&self);
}

pub struct AudioController<M: MediaSink> {
    media: M,
    store: SharedStore,
    track: TrackId,
    // URL handed to the media element; the store only seeds it across reloads.
    loaded: Option<String>,
}

impl<M: MediaSink> AudioController<M> {
    pub fn new(media: M, store: SharedStore) -> Self {
        Self {
            media,
            store,
            track: DEFAULT_TRACK,
            loaded: None,
        }
    }

    pub fn media(&self) -> &M {
        &self.media
    }

    pub fn track(&self) -> TrackId {
        self.track
    }

    /// Restores the session from the store: track, mute flag and, when it
    /// belongs to the same track, the saved position.
    pub fn init(&mut self) {
        self.track = resolve_track(self.store.get(KEY_SELECTED_SONG).as_deref());
        persist(&*self.store, KEY_SELECTED_SONG, &self.track.to_string());
        self.media.set_muted(self.is_muted());

        let url = track_url(self.track);
        let saved_url = self.store.get(KEY_MUSIC_URL);
        let same_track = saved_url.as_deref() == Some(url.as_str());
        if self.media.source().is_empty() || !same_track {
            self.media.load(&url);
            persist(&*self.store, KEY_MUSIC_URL, &url);
        }
        self.loaded = Some(url);

        let saved_pos = self
            .store
            .get(KEY_MUSIC_TIME)
            .and_then(|s| s.parse::<f64>().ok())
            .filter(|t| t.is_finite() && *t >= 0.0);
        match saved_pos {
            Some(t) if same_track => self.media.seek(t),
            _ => {
                self.media.seek(0.0);
                self.store.remove(KEY_MUSIC_TIME);
            }
        }
        self.play_if_unmuted();
    }

    /// Switches tracks. Re-selecting the loaded track leaves playback alone;
    /// a different one starts from 0 and forgets the old saved position.
    pub fn select_track(&mut self, raw_id: &str) -> TrackId {
        let id = resolve_track(Some(raw_id));
        self.track = id;
        persist(&*self.store, KEY_SELECTED_SONG, &id.to_string());

        let url = track_url(id);
        if self.media.source().is_empty() || self.loaded.as_deref() != Some(url.as_str()) {
            log::info!("loading track {id}");
            self.media.load(&url);
            self.media.seek(0.0);
            self.store.remove(KEY_MUSIC_TIME);
            persist(&*self.store, KEY_MUSIC_URL, &url);
            self.loaded = Some(url);
            self.play_if_unmuted();
        }
        id
    }

    pub fn is_muted(&self) -> bool {
        self.store.get_flag(KEY_MUSIC_MUTED)
    }

    /// Flips and applies the mute flag; unmuting tries to play right away.
    pub fn toggle_mute(&mut self) -> bool {
        let muted = !self.is_muted();
        if let Err(e) = self.store.set_flag(KEY_MUSIC_MUTED, muted) {
            log::warn!("{e}");
        }
        self.media.set_muted(muted);
        if !muted {
            self.media.play();
        }
        muted
    }

    pub fn play_if_unmuted(&self) {
        if !self.is_muted() {
            self.media.play();
        }
    }

    /// Called once per second; no-op until a source is loaded.
    pub fn save_position(&self) {
        if self.media.source().is_empty() {
            return;
        }
        persist(
            &*self.store,
            KEY_MUSIC_TIME,
            &self.media.position().to_string(),
        );
    }

    /// Seeks to `fraction` of the track; ignored while the duration is unknown.
    pub fn seek_fraction(&self, fraction: f64) {
        if let Some(d) = self.media.duration() {
            self.media.seek(fraction.clamp(0.0, 1.0) * d);
        }
    }

    /// Progress in `0..=1`, or `None` while the duration is unknown.
    pub fn progress(&self) -> Option<f64> {
        let d = self.media.duration()?;
        Some((self.media.position() / d).clamp(0.0, 1.0))
    }

    pub fn is_minimized(&self) -> bool {
        self.store.get_flag(KEY_MUSIC_MINIMIZED)
    }

    pub fn set_minimized(&self, minimized: bool) {
        if let Err(e) = self.store.set_flag(KEY_MUSIC_MINIMIZED, minimized) {
            log::warn!("{e}");
        }
    }
}

#[cfg(test)]
pub(crate) mod fake {
    use std::cell::{Cell, RefCell};

    use super::MediaSink;

    #[derive(Default)]
    pub struct FakeMedia {
        pub src: RefCell<String>,
        pub pos: Cell<f64>,
        pub dur: Cell<Option<f64>>,
        pub muted: Cell<bool>,
        pub loads: Cell<u32>,
        pub plays: Cell<u32>,
    }

    impl MediaSink for FakeMedia {
        fn source(&self) -> String {
            self.src.borrow().clone()
        }
        fn load(&self, url: &str) {
            *self.src.borrow_mut() = url.to_string();
            self.loads.set(self.loads.get() + 1);
        }
        fn position(&self) -> f64 {
            self.pos.get()
        }
        fn seek(&self, secs: f64) {
            self.pos.set(secs);
        }
        fn duration(&self) -> Option<f64> {
            self.dur.get()
        }
        fn set_muted(&self, muted: bool) {
            self.muted.set(muted);
        }
        fn play(&self) {
            self.plays.set(self.plays.get() + 1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::fake::FakeMedia;
    use super::*;
    use crate::store::{KeyValueStore, MemoryStore};
    use std::rc::Rc;

    fn controller() -> (Rc<MemoryStore>, AudioController<FakeMedia>) {
        let store = MemoryStore::shared();
        let ctl = AudioController::new(FakeMedia::default(), store.clone());
        (store, ctl)
    }

    #[test]
    fn encode_uri_escapes_spaces_only_where_needed() {
        assert_eq!(
            encode_uri("music/Give Me Your Forever.mp3"),
            "music/Give%20Me%20Your%20Forever.mp3"
        );
        assert_eq!(encode_uri("music/you.mp3"), "music/you.mp3");
        assert_eq!(encode_uri("é"), "%C3%A9");
    }

    #[test]
    fn invalid_track_ids_fall_back_to_default() {
        assert_eq!(resolve_track(None), DEFAULT_TRACK);
        assert_eq!(resolve_track(Some("7")), DEFAULT_TRACK);
        assert_eq!(resolve_track(Some("abc")), DEFAULT_TRACK);
        assert_eq!(resolve_track(Some("3")), 3);
    }

    #[test]
    fn format_time_pads_seconds() {
        assert_eq!(format_time(0.0), "0:00");
        assert_eq!(format_time(65.9), "1:05");
        assert_eq!(format_time(f64::NAN), "0:00");
    }

    #[test]
    fn init_restores_position_for_same_track() {
        let (store, mut ctl) = controller();
        store.set(KEY_SELECTED_SONG, "2").unwrap();
        store.set(KEY_MUSIC_URL, &track_url(2)).unwrap();
        store.set(KEY_MUSIC_TIME, "42.5").unwrap();
        ctl.init();
        assert_eq!(ctl.track(), 2);
        assert_eq!(ctl.media().source(), track_url(2));
        assert_eq!(ctl.media().position(), 42.5);
        assert_eq!(ctl.media().plays.get(), 1);
    }

    #[test]
    fn init_discards_stale_position() {
        let (store, mut ctl) = controller();
        store.set(KEY_SELECTED_SONG, "1").unwrap();
        store.set(KEY_MUSIC_URL, &track_url(3)).unwrap();
        store.set(KEY_MUSIC_TIME, "99").unwrap();
        ctl.init();
        assert_eq!(ctl.media().position(), 0.0);
        assert!(store.get(KEY_MUSIC_TIME).is_none());
        assert_eq!(store.get(KEY_MUSIC_URL), Some(track_url(1)));
    }

    #[test]
    fn muted_session_does_not_autoplay() {
        let (store, mut ctl) = controller();
        store.set_flag(KEY_MUSIC_MUTED, true).unwrap();
        ctl.init();
        assert!(ctl.media().muted.get());
        assert_eq!(ctl.media().plays.get(), 0);
        assert!(!ctl.toggle_mute());
        assert!(!ctl.media().muted.get());
        assert_eq!(ctl.media().plays.get(), 1);
    }

    #[test]
    fn reselecting_same_track_keeps_position() {
        let (_, mut ctl) = controller();
        ctl.init();
        ctl.media().seek(30.0);
        ctl.select_track("1");
        ctl.select_track("1");
        assert_eq!(ctl.media().position(), 30.0);
        assert_eq!(ctl.media().loads.get(), 1);
    }

    /// Storage that is present but refuses every read and write.
    struct BlockedStore;

    impl KeyValueStore for BlockedStore {
        fn get(&self, _key: &str) -> Option<String> {
            None
        }
        fn set(&self, key: &str, _value: &str) -> crate::error::Result<()> {
            Err(crate::error::AppError::StorageWrite {
                key: key.to_string(),
            })
        }
        fn remove(&self, _key: &str) {}
    }

    #[test]
    fn reselecting_same_track_keeps_position_without_storage() {
        let mut ctl = AudioController::new(FakeMedia::default(), Rc::new(BlockedStore));
        ctl.init();
        ctl.media().seek(30.0);
        ctl.select_track("1");
        assert_eq!(ctl.media().position(), 30.0);
        assert_eq!(ctl.media().loads.get(), 1);

        assert_eq!(ctl.select_track("3"), 3);
        assert_eq!(ctl.media().loads.get(), 2);
        assert_eq!(ctl.media().position(), 0.0);
    }

    #[test]
    fn selecting_other_track_restarts_and_forgets_position() {
        let (store, mut ctl) = controller();
        ctl.init();
        ctl.media().seek(30.0);
        ctl.save_position();
        assert_eq!(store.get(KEY_MUSIC_TIME).as_deref(), Some("30"));
        assert_eq!(ctl.select_track("2"), 2);
        assert_eq!(ctl.media().position(), 0.0);
        assert!(store.get(KEY_MUSIC_TIME).is_none());
        assert_eq!(store.get(KEY_SELECTED_SONG).as_deref(), Some("2"));
    }

    #[test]
    fn save_position_waits_for_a_source() {
        let (store, ctl) = controller();
        ctl.save_position();
        assert!(store.get(KEY_MUSIC_TIME).is_none());
    }

    #[test]
    fn seeking_needs_known_duration() {
        let (_, ctl) = controller();
        ctl.seek_fraction(0.5);
        assert_eq!(ctl.media().position(), 0.0);
        ctl.media().dur.set(Some(200.0));
        ctl.seek_fraction(0.25);
        assert_eq!(ctl.media().position(), 50.0);
        assert_eq!(ctl.progress(), Some(0.25));
    }

    #[test]
    fn minimized_flag_persists() {
        let (store, ctl) = controller();
        assert!(!ctl.is_minimized());
        ctl.set_minimized(true);
        assert_eq!(store.get(KEY_MUSIC_MINIMIZED).as_deref(), Some("true"));
        assert!(ctl.is_minimized());
    }
}
