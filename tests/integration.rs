// Integration tests (native) for the `celebration-page` crate.
// These drive the game engine, the per-level rounds and the audio controller
// against an in-memory store, without touching browser APIs.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use celebration_page::audio::{AudioController, MediaSink, track_url};
use celebration_page::game::catch::{Catch, CatchRound, TARGET_HEARTS};
use celebration_page::game::memory::{MemoryRound, PAIRS, Reveal, Settle};
use celebration_page::game::quiz::{Answer, QUESTIONS, QuizRound};
use celebration_page::game::{GameEngine, LEVEL_COUNT, MAX_HEARTS, MAX_SCORE, NextOutcome, OpenOutcome};
use celebration_page::rng::XorShift;
use celebration_page::store::{KEY_GAME_STATE, KEY_MUSIC_TIME, KeyValueStore, MemoryStore, SharedStore};

fn fresh() -> (Rc<MemoryStore>, GameEngine) {
    let store = MemoryStore::shared();
    let shared: SharedStore = store.clone();
    (store, GameEngine::load(shared))
}

// Plays the memory board perfectly, reporting each settled pair to the engine.
fn clear_memory(engine: &mut GameEngine, rng: &mut XorShift) {
    let mut round = MemoryRound::new(&PAIRS, rng);
    for i in 0..round.cards().len() {
        if round.cards()[i].face != celebration_page::game::memory::Face::Down {
            continue;
        }
        let partner = round.partner_of(i).unwrap();
        assert_eq!(round.reveal(i), Reveal::First);
        assert!(matches!(round.reveal(partner), Reveal::Match(..)));
        match round.settle() {
            Settle::Matched { complete, .. } => {
                engine.record_pair();
                if complete {
                    engine.complete_current();
                }
            }
            other => panic!("unexpected settle {other:?}"),
        }
    }
    assert!(round.is_complete());
}

#[test]
fn full_playthrough_reaches_caps() {
    let (_store, mut engine) = fresh();
    let mut rng = XorShift::seeded(11);

    clear_memory(&mut engine, &mut rng);
    assert_eq!(engine.state().score, 150);
    assert_eq!(engine.state().hearts, 5);
    assert!(matches!(engine.request_next(&mut rng), NextOutcome::Advanced(l) if l.id == 2));

    for q in &QUESTIONS {
        let mut round = QuizRound::new(q);
        assert_eq!(round.answer(q.correct), Answer::Correct);
        engine.record_correct_answer();
    }
    engine.complete_current();
    assert_eq!(engine.state().score, 400);
    assert_eq!(engine.follow_up(), Some(3));
    assert!(matches!(engine.open_level(3, &mut rng), OpenOutcome::Opened(_)));

    let mut round = CatchRound::new(TARGET_HEARTS);
    while !round.is_complete() {
        let a = round.spawn().unwrap();
        let b = round.spawn().unwrap();
        // one heart falls through, the other is caught
        assert!(round.expire(a));
        if let Catch::Caught { .. } = round.catch(b) {
            engine.record_catch();
        }
    }
    assert_eq!(round.caught(), TARGET_HEARTS);
    assert!(round.spawn().is_none());
    engine.complete_current();

    assert!(matches!(engine.request_next(&mut rng), NextOutcome::Advanced(l) if l.id == 4));
    engine.record_finale_bonus();
    engine.complete_current();

    let st = engine.state();
    assert_eq!(st.completed_levels.len(), LEVEL_COUNT as usize);
    assert_eq!(st.score, MAX_SCORE);
    assert_eq!(st.hearts, MAX_HEARTS);
    assert_eq!(engine.follow_up(), None);
    assert!(matches!(engine.request_next(&mut rng), NextOutcome::AtEnd));
}

#[test]
fn progress_survives_reload() {
    let (store, mut engine) = fresh();
    let mut rng = XorShift::seeded(3);
    clear_memory(&mut engine, &mut rng);
    engine.request_next(&mut rng);
    engine.record_correct_answer();

    let shared: SharedStore = store.clone();
    let reloaded = GameEngine::load(shared);
    assert_eq!(reloaded.state(), engine.state());
    assert_eq!(reloaded.state().current_level, 2);
    assert_eq!(reloaded.state().quiz_answers, 1);
}

#[test]
fn locked_levels_stay_locked_until_predecessor_done() {
    let (_store, mut engine) = fresh();
    let mut rng = XorShift::seeded(5);
    for id in 2..=LEVEL_COUNT {
        assert!(matches!(engine.open_level(id, &mut rng), OpenOutcome::Locked(n) if n.warning));
    }
    assert_eq!(engine.state().current_level, 1);
    assert!(matches!(engine.request_next(&mut rng), NextOutcome::Blocked(_)));
}

#[test]
fn reset_wipes_the_record() {
    let (store, mut engine) = fresh();
    let mut rng = XorShift::seeded(8);
    clear_memory(&mut engine, &mut rng);
    assert!(store.get(KEY_GAME_STATE).is_some());

    engine.reset();
    assert!(store.get(KEY_GAME_STATE).is_none());
    let shared: SharedStore = store.clone();
    assert_eq!(GameEngine::load(shared).state().score, 0);
}

#[derive(Default)]
struct Media {
    src: RefCell<String>,
    pos: Cell<f64>,
    loads: Cell<u32>,
}

impl MediaSink for Media {
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
        Some(200.0)
    }
    fn set_muted(&self, _muted: bool) {}
    fn play(&self) {}
}

#[test]
fn audio_session_resumes_across_pages() {
    let store = MemoryStore::shared();
    let shared: SharedStore = store.clone();

    let mut first = AudioController::new(Media::default(), shared.clone());
    first.init();
    first.select_track("2");
    first.media().seek(42.0);
    first.save_position();

    // same track again: position untouched
    first.select_track("2");
    assert_eq!(first.media().position(), 42.0);

    let mut second = AudioController::new(Media::default(), shared);
    second.init();
    assert_eq!(second.track(), 2);
    assert_eq!(second.media().source(), track_url(2));
    assert_eq!(second.media().position(), 42.0);

    second.select_track("3");
    assert_eq!(second.media().position(), 0.0);
    assert!(store.get(KEY_MUSIC_TIME).is_none());
}
