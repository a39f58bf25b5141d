//! Mini-game engine: four levels played in order (memory match, quiz, heart
//! catch, finale) with a shared score/heart tally.
//!
//! [`GameEngine`] owns the persisted [`GameState`] and is the only thing that
//! mutates it. Every mutation is written back to the store before the method
//! returns, so a reload never observes a half-applied event. The per-level
//! rounds in the child modules hold transient play state only; the DOM panel
//! drives them and reports results to the engine.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::rng::Rng;
use crate::store::{KEY_GAME_STATE, SharedStore, persist};

pub mod catch;
pub mod finale;
pub mod memory;
pub mod messages;
pub mod panel;
pub mod quiz;

pub type LevelId = u8;

pub const LEVEL_COUNT: LevelId = 4;
pub const MAX_SCORE: u32 = 500;
pub const MAX_HEARTS: u32 = 20;

// --- Persisted state --------------------------------------------------------

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GameState {
    pub current_level: LevelId,
    pub score: u32,
    pub hearts: u32,
    pub completed_levels: BTreeSet<LevelId>,
    pub memory_pairs_found: u32,
    pub quiz_answers: u32,
}

impl Default for GameState {
    fn default() -> Self {
        Self {
            current_level: 1,
            score: 0,
            hearts: 0,
            completed_levels: BTreeSet::new(),
            memory_pairs_found: 0,
            quiz_answers: 0,
        }
    }
}

impl GameState {
    pub fn is_unlocked(&self, id: LevelId) -> bool {
        match id {
            1 => true,
            2..=LEVEL_COUNT => self.completed_levels.contains(&(id - 1)),
            _ => false,
        }
    }

    /// Highest level the player may open.
    pub fn frontier(&self) -> LevelId {
        (1..=LEVEL_COUNT)
            .rev()
            .find(|&id| self.is_unlocked(id))
            .unwrap_or(1)
    }

    /// Repairs a record that breaks the unlock or cap invariants.
    fn sanitize(&mut self) {
        self.completed_levels.retain(|id| (1..=LEVEL_COUNT).contains(id));
        if !self.is_unlocked(self.current_level) {
            self.current_level = self.frontier();
        }
        self.score = self.score.min(MAX_SCORE);
        self.hearts = self.hearts.min(MAX_HEARTS);
    }
}

// --- Static level table -----------------------------------------------------

#[derive(Debug)]
pub enum LevelKind {
    Memory(&'static [memory::MemoryPair]),
    Quiz(&'static [quiz::Question]),
    Catch { target: u32 },
    Finale,
}

#[derive(Debug)]
pub struct Level {
    pub id: LevelId,
    pub title: &'static str,
    pub icon: &'static str,
    pub kind: LevelKind,
    pub reward: u32,
    pub completion_message: &'static str,
}

pub static LEVELS: [Level; LEVEL_COUNT as usize] = [
    Level {
        id: 1,
        title: "Let's start with a puzzle!",
        icon: "🧩",
        kind: LevelKind::Memory(&memory::PAIRS),
        reward: 50,
        completion_message: "Puzzle solved, so proud of you!",
    },
    Level {
        id: 2,
        title: "Quiz",
        icon: "❓",
        kind: LevelKind::Quiz(&quiz::QUESTIONS),
        reward: 100,
        completion_message: "Every question answered perfectly!",
    },
    Level {
        id: 3,
        title: "Catch the Hearts",
        icon: "💝",
        kind: LevelKind::Catch {
            target: catch::TARGET_HEARTS,
        },
        reward: 150,
        completion_message: "You caught every heart!",
    },
    Level {
        id: 4,
        title: "Present",
        icon: "🎁",
        kind: LevelKind::Finale,
        reward: 200,
        completion_message: "Enjoy your present!",
    },
];

pub fn level(id: LevelId) -> Option<&'static Level> {
    LEVELS.iter().find(|l| l.id == id)
}

// --- Popup payloads ---------------------------------------------------------

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notice {
    pub icon: &'static str,
    pub title: &'static str,
    pub text: String,
    pub warning: bool,
}

impl Notice {
    pub fn info(icon: &'static str, title: &'static str, text: impl Into<String>) -> Self {
        Self {
            icon,
            title,
            text: text.into(),
            warning: false,
        }
    }

    pub fn warning(title: &'static str, text: impl Into<String>) -> Self {
        Self {
            icon: messages::WARNING_ICON,
            title,
            text: text.into(),
            warning: true,
        }
    }
}

#[derive(Debug)]
pub enum OpenOutcome {
    Opened(&'static Level),
    Locked(Notice),
    Unknown,
}

#[derive(Debug)]
pub enum NextOutcome {
    Advanced(&'static Level),
    Blocked(Notice),
    AtEnd,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CardStatus {
    Completed,
    Active,
    /// Previous level unfinished.
    Locked,
    /// Playable but not the current level.
    Available,
}

// --- Engine -----------------------------------------------------------------

pub struct GameEngine {
    state: GameState,
    store: SharedStore,
}

impl GameEngine {
    /// Loads the persisted record; a missing or malformed one yields defaults.
    pub fn load(store: SharedStore) -> Self {
        let state = match store.get(KEY_GAME_STATE) {
            None => GameState::default(),
            Some(raw) => match serde_json::from_str::<GameState>(&raw) {
                Ok(mut s) => {
                    s.sanitize();
                    s
                }
                Err(source) => {
                    let err = AppError::Malformed {
                        key: KEY_GAME_STATE.to_string(),
                        source,
                    };
                    log::warn!("{err}, starting fresh");
                    GameState::default()
                }
            },
        };
        Self { state, store }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn current(&self) -> &'static Level {
        level(self.state.current_level).unwrap_or(&LEVELS[0])
    }

    pub fn is_completed(&self, id: LevelId) -> bool {
        self.state.completed_levels.contains(&id)
    }

    pub fn card_status(&self, id: LevelId) -> CardStatus {
        if self.is_completed(id) {
            CardStatus::Completed
        } else if id == self.state.current_level {
            CardStatus::Active
        } else if !self.state.is_unlocked(id) {
            CardStatus::Locked
        } else {
            CardStatus::Available
        }
    }

    /// Switches to `id` if it is unlocked. Opening the memory level deals a
    /// fresh board; the quiz resumes where it stopped unless it was finished.
    pub fn open_level(&mut self, id: LevelId, rng: &mut impl Rng) -> OpenOutcome {
        let Some(lvl) = level(id) else {
            return OpenOutcome::Unknown;
        };
        if !self.state.is_unlocked(id) {
            return OpenOutcome::Locked(messages::locked_warning(id, rng));
        }
        self.state.current_level = id;
        match lvl.kind {
            LevelKind::Memory(_) => self.state.memory_pairs_found = 0,
            LevelKind::Quiz(questions) if self.state.quiz_answers as usize >= questions.len() => {
                self.state.quiz_answers = 0
            }
            _ => {}
        }
        self.save();
        OpenOutcome::Opened(lvl)
    }

    pub fn request_next(&mut self, rng: &mut impl Rng) -> NextOutcome {
        let cur = self.state.current_level;
        if !self.is_completed(cur) {
            return NextOutcome::Blocked(messages::skip_warning(cur, rng));
        }
        if cur >= LEVEL_COUNT {
            return NextOutcome::AtEnd;
        }
        match self.open_level(cur + 1, rng) {
            OpenOutcome::Opened(l) => NextOutcome::Advanced(l),
            OpenOutcome::Locked(n) => NextOutcome::Blocked(n),
            OpenOutcome::Unknown => NextOutcome::AtEnd,
        }
    }

    pub fn request_prev(&mut self, rng: &mut impl Rng) -> Option<&'static Level> {
        let cur = self.state.current_level;
        if cur <= 1 {
            return None;
        }
        match self.open_level(cur - 1, rng) {
            OpenOutcome::Opened(l) => Some(l),
            _ => None,
        }
    }

    /// After the popup closes: the level to move on to, if any.
    pub fn follow_up(&self) -> Option<LevelId> {
        let cur = self.state.current_level;
        (cur < LEVEL_COUNT && self.is_completed(cur)).then_some(cur + 1)
    }

    pub fn hint(&self, rng: &mut impl Rng) -> Notice {
        messages::hint(rng)
    }

    /// One scoring event: points plus one heart, both capped.
    pub fn award(&mut self, points: u32) {
        self.state.score = self.state.score.saturating_add(points).min(MAX_SCORE);
        self.state.hearts = (self.state.hearts + 1).min(MAX_HEARTS);
        self.save();
    }

    pub fn record_pair(&mut self) -> u32 {
        self.state.memory_pairs_found += 1;
        self.award(memory::POINTS_PER_PAIR);
        self.state.memory_pairs_found
    }

    pub fn record_correct_answer(&mut self) -> u32 {
        self.state.quiz_answers += 1;
        self.award(quiz::POINTS_PER_ANSWER);
        self.state.quiz_answers
    }

    pub fn record_catch(&mut self) {
        self.award(catch::POINTS_PER_HEART);
    }

    pub fn record_finale_bonus(&mut self) {
        self.award(finale::BONUS_POINTS);
    }

    /// Marks the current level done and pays its reward.
    pub fn complete_current(&mut self) -> Notice {
        let lvl = self.current();
        self.state.completed_levels.insert(lvl.id);
        self.award(lvl.reward);
        Notice::info(
            "🎉",
            "Level Complete!",
            format!("{} +{} points!", lvl.completion_message, lvl.reward),
        )
    }

    /// Drops the persisted record and starts over.
    pub fn reset(&mut self) {
        self.store.remove(KEY_GAME_STATE);
        self.state = GameState::default();
        log::info!("game progress reset");
    }

    /// Fractions in `0..=1` for the level and score progress bars.
    pub fn progress(&self) -> (f64, f64) {
        let lvl = self.state.current_level as f64 / LEVEL_COUNT as f64;
        let score = (self.state.score as f64 / MAX_SCORE as f64).min(1.0);
        (lvl, score)
    }

    fn save(&self) {
        match serde_json::to_string(&self.state) {
            Ok(json) => persist(&*self.store, KEY_GAME_STATE, &json),
            Err(e) => log::error!("failed to encode game state: {e}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::XorShift;
    use crate::store::{KeyValueStore, MemoryStore};
    use std::rc::Rc;

    fn engine() -> (Rc<MemoryStore>, GameEngine) {
        let store = MemoryStore::shared();
        let eng = GameEngine::load(store.clone());
        (store, eng)
    }

    #[test]
    fn default_state_when_nothing_saved() {
        let (_, eng) = engine();
        assert_eq!(eng.state(), &GameState::default());
        assert_eq!(eng.current().id, 1);
    }

    #[test]
    fn malformed_record_falls_back_to_defaults() {
        let store = MemoryStore::shared();
        store.set(KEY_GAME_STATE, "{not json").unwrap();
        let eng = GameEngine::load(store);
        assert_eq!(eng.state(), &GameState::default());
    }

    #[test]
    fn legacy_record_with_extra_fields_decodes() {
        let store = MemoryStore::shared();
        store
            .set(
                KEY_GAME_STATE,
                r#"{"currentLevel":2,"score":75,"hearts":3,"maxHearts":20,"maxScore":500,
                    "completedLevels":[1],"memoryPairsFound":0,"quizAnswers":1}"#,
            )
            .unwrap();
        let eng = GameEngine::load(store);
        assert_eq!(eng.state().current_level, 2);
        assert_eq!(eng.state().quiz_answers, 1);
        assert!(eng.is_completed(1));
    }

    #[test]
    fn record_beyond_frontier_is_pulled_back() {
        let store = MemoryStore::shared();
        store
            .set(KEY_GAME_STATE, r#"{"currentLevel":4,"score":9999,"completedLevels":[1]}"#)
            .unwrap();
        let eng = GameEngine::load(store);
        assert_eq!(eng.state().current_level, 2);
        assert_eq!(eng.state().score, MAX_SCORE);
    }

    #[test]
    fn every_mutation_is_persisted() {
        let (store, mut eng) = engine();
        eng.award(10);
        let saved: GameState = serde_json::from_str(&store.get(KEY_GAME_STATE).unwrap()).unwrap();
        assert_eq!(saved.score, 10);
        assert_eq!(saved.hearts, 1);
        eng.complete_current();
        let saved: GameState = serde_json::from_str(&store.get(KEY_GAME_STATE).unwrap()).unwrap();
        assert!(saved.completed_levels.contains(&1));
    }

    #[test]
    fn locked_level_leaves_state_alone() {
        let (_, mut eng) = engine();
        let mut rng = XorShift::seeded(1);
        let before = eng.state().clone();
        match eng.open_level(3, &mut rng) {
            OpenOutcome::Locked(n) => assert!(n.warning),
            other => panic!("expected lock, got {other:?}"),
        }
        assert_eq!(eng.state(), &before);
    }

    #[test]
    fn unknown_level_is_rejected() {
        let (_, mut eng) = engine();
        let mut rng = XorShift::seeded(1);
        assert!(matches!(eng.open_level(9, &mut rng), OpenOutcome::Unknown));
        assert!(matches!(eng.open_level(0, &mut rng), OpenOutcome::Unknown));
    }

    #[test]
    fn next_is_blocked_until_completed() {
        let (_, mut eng) = engine();
        let mut rng = XorShift::seeded(2);
        assert!(matches!(eng.request_next(&mut rng), NextOutcome::Blocked(_)));
        eng.complete_current();
        match eng.request_next(&mut rng) {
            NextOutcome::Advanced(l) => assert_eq!(l.id, 2),
            other => panic!("unexpected {other:?}"),
        }
        assert_eq!(eng.state().current_level, 2);
        assert_eq!(eng.request_prev(&mut rng).map(|l| l.id), Some(1));
        assert!(eng.request_prev(&mut rng).is_none());
    }

    #[test]
    fn completing_twice_records_level_once() {
        let (_, mut eng) = engine();
        eng.complete_current();
        eng.complete_current();
        assert_eq!(eng.state().completed_levels.len(), 1);
    }

    #[test]
    fn caps_hold_under_repeated_scoring() {
        let (_, mut eng) = engine();
        for _ in 0..100 {
            eng.award(37);
        }
        assert_eq!(eng.state().score, MAX_SCORE);
        assert_eq!(eng.state().hearts, MAX_HEARTS);
        assert_eq!(eng.progress().1, 1.0);
    }

    #[test]
    fn card_status_follows_progress() {
        let (_, mut eng) = engine();
        assert_eq!(eng.card_status(1), CardStatus::Active);
        assert_eq!(eng.card_status(2), CardStatus::Locked);
        eng.complete_current();
        assert_eq!(eng.card_status(1), CardStatus::Completed);
        assert_eq!(eng.card_status(2), CardStatus::Available);
        assert_eq!(eng.follow_up(), Some(2));
    }

    #[test]
    fn finished_quiz_restarts_on_reopen() {
        let (_, mut eng) = engine();
        let mut rng = XorShift::seeded(5);
        eng.complete_current();
        eng.open_level(2, &mut rng);
        for _ in 0..quiz::QUESTIONS.len() {
            eng.record_correct_answer();
        }
        eng.open_level(2, &mut rng);
        assert_eq!(eng.state().quiz_answers, 0);
    }

    #[test]
    fn reset_clears_record() {
        let (store, mut eng) = engine();
        eng.complete_current();
        eng.reset();
        assert!(store.get(KEY_GAME_STATE).is_none());
        assert_eq!(eng.state(), &GameState::default());
    }
}
