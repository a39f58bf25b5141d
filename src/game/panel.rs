// DOM binding for the game section.
//
// `GameView` renders the current level into `#gameContent`, forwards clicks
// to the round logic and reports results to the engine. Every listener,
// timeout and interval it creates is owned by the view: level-scoped handles
// live in `LevelScope` and are dropped (cancelled) whenever another level is
// rendered, the rest go when the section is unbound.

use std::cell::RefCell;
use std::collections::{HashMap, VecDeque};
use std::rc::{Rc, Weak};

use gloo::events::EventListener;
use gloo::timers::callback::{Interval, Timeout};
use wasm_bindgen::JsCast;
use web_sys::{Element, HtmlButtonElement};

use super::catch::{self, Catch, CatchRound, HeartId};
use super::finale;
use super::memory::{self, MemoryRound, Reveal, Settle};
use super::messages;
use super::quiz::{self, Answer, QuizRound};
use super::{
    CardStatus, GameEngine, LEVEL_COUNT, Level, LevelId, LevelKind, NextOutcome, Notice,
    OpenOutcome,
};
use crate::dom;
use crate::error::{AppError, Result};
use crate::rng::{Rng, XorShift};
use crate::router::Section;
use crate::store::SharedStore;

const WELCOME_DELAY_MS: u32 = 500;
/// Pause between the last quiz answer / caught heart and the completion popup.
const COMPLETE_DELAY_MS: u32 = 1000;
const RESET_PROMPT: &str = "Reset the game? All progress will be lost! 😱";
// Bursts older than this many intervals have already cleaned up.
const BURST_BACKLOG: usize = 4;

const FALL_KEYFRAMES: &str = "@keyframes fall { from { top: -50px; transform: rotate(0deg); } \
    to { top: 420px; transform: rotate(360deg); } }";
const FIREWORK_KEYFRAMES: &str = "@keyframes firework { 0% { transform: translate(0, 0); opacity: 1; } \
    100% { transform: translate(var(--x), var(--y)); opacity: 0; } }";

/// Section handle the router mounts for `game.html`.
pub struct GamePanel {
    store: SharedStore,
    view: Option<Rc<RefCell<GameView>>>,
}

impl GamePanel {
    pub fn new(store: SharedStore) -> Self {
        Self { store, view: None }
    }
}

impl Section for GamePanel {
    fn bind(&mut self, root: &Element) -> Result<()> {
        self.unbind();
        self.view = Some(GameView::mount(root, self.store.clone())?);
        Ok(())
    }

    fn unbind(&mut self) {
        if let Some(view) = self.view.take() {
            view.borrow_mut().teardown();
        }
    }
}

struct Ui {
    root: Element,
    content: Element,
    level: Option<Element>,
    score: Option<Element>,
    level_progress: Option<Element>,
    score_progress: Option<Element>,
    prev: Option<Element>,
    next: Option<Element>,
    hint: Option<Element>,
    popup: Option<Element>,
    popup_icon: Option<Element>,
    popup_title: Option<Element>,
    popup_text: Option<Element>,
    popup_btn: Option<Element>,
    reset: Option<Element>,
}

impl Ui {
    fn find(root: &Element) -> Result<Self> {
        let get = |id: &str| dom::find(root, &format!("#{id}")).or_else(|| dom::by_id(id));
        Ok(Self {
            root: root.clone(),
            content: get("gameContent").ok_or_else(|| AppError::MissingElement("#gameContent".into()))?,
            level: get("level"),
            score: get("score"),
            level_progress: get("levelProgress"),
            score_progress: get("scoreProgress"),
            prev: get("prevBtn"),
            next: get("nextBtn"),
            hint: get("hintBtn"),
            popup: get("popup"),
            popup_icon: get("popupIcon"),
            popup_title: get("popupTitle"),
            popup_text: get("popupText"),
            popup_btn: get("popupBtn"),
            reset: get("resetGameBtn"),
        })
    }
}

enum Round {
    Idle,
    Memory(MemoryRound),
    Quiz(QuizRound),
    Catch(CatchRound),
    Finale,
}

/// Handles that live exactly as long as one rendered level.
#[derive(Default)]
struct LevelScope {
    listeners: Vec<EventListener>,
    timers: Vec<Timeout>,
    spawner: Option<Interval>,
    catch_area: Option<Element>,
    hearts: HashMap<HeartId, Element>,
    fireworks: Option<Interval>,
    fireworks_layer: Option<Element>,
    bursts: VecDeque<Timeout>,
}

struct GameView {
    engine: GameEngine,
    rng: XorShift,
    ui: Ui,
    round: Round,
    scope: LevelScope,
    controls: Vec<EventListener>,
    welcome: Option<Timeout>,
    me: Weak<RefCell<GameView>>,
}

impl GameView {
    fn mount(root: &Element, store: SharedStore) -> Result<Rc<RefCell<GameView>>> {
        let ui = Ui::find(root)?;
        let view = Rc::new_cyclic(|me| {
            RefCell::new(GameView {
                engine: GameEngine::load(store),
                rng: XorShift::from_entropy(),
                ui,
                round: Round::Idle,
                scope: LevelScope::default(),
                controls: Vec::new(),
                welcome: None,
                me: me.clone(),
            })
        });
        {
            let mut v = view.borrow_mut();
            v.bind_controls();
            let resume = v.engine.state().current_level;
            v.load_level(resume);
            let weak = v.me.clone();
            v.welcome = Some(Timeout::new(WELCOME_DELAY_MS, move || {
                with_view(&weak, |v| v.show(&messages::welcome()));
            }));
        }
        log::info!("game section mounted");
        Ok(view)
    }

    fn teardown(&mut self) {
        self.scope = LevelScope::default();
        self.controls.clear();
        self.welcome = None;
        self.round = Round::Idle;
    }

    // --- event plumbing ----------------------------------------------------

    fn listen(
        &self,
        target: &Element,
        kind: &'static str,
        handler: impl Fn(&mut GameView, &web_sys::Event) + 'static,
    ) -> EventListener {
        let weak = self.me.clone();
        EventListener::new(target, kind, move |event| {
            with_view(&weak, |v| handler(v, event));
        })
    }

    /// Level-scoped timeout; cancelled if another level is rendered first.
    fn after(&mut self, ms: u32, f: impl FnOnce(&mut GameView) + 'static) {
        let weak = self.me.clone();
        self.scope
            .timers
            .push(Timeout::new(ms, move || with_view(&weak, f)));
    }

    fn every(&self, ms: u32, f: impl Fn(&mut GameView) + 'static) -> Interval {
        let weak = self.me.clone();
        Interval::new(ms, move || with_view(&weak, |v| f(v)))
    }

    fn bind_controls(&mut self) {
        let mut controls = Vec::new();
        if let Some(btn) = &self.ui.prev {
            controls.push(self.listen(btn, "click", |v, _| {
                if let Some(level) = v.engine.request_prev(&mut v.rng) {
                    v.cue_click();
                    v.render_level(level);
                }
            }));
        }
        if let Some(btn) = &self.ui.next {
            controls.push(self.listen(btn, "click", |v, _| {
                match v.engine.request_next(&mut v.rng) {
                    NextOutcome::Advanced(level) => {
                        v.cue_click();
                        v.render_level(level);
                    }
                    NextOutcome::Blocked(notice) => v.show(&notice),
                    NextOutcome::AtEnd => {}
                }
            }));
        }
        if let Some(btn) = &self.ui.hint {
            controls.push(self.listen(btn, "click", |v, _| {
                v.cue_click();
                let hint = v.engine.hint(&mut v.rng);
                v.show(&hint);
            }));
        }
        if let Some(btn) = &self.ui.popup_btn {
            controls.push(self.listen(btn, "click", |v, _| {
                v.cue_click();
                v.close_popup();
                if let Some(next) = v.engine.follow_up() {
                    v.load_level(next);
                }
            }));
        }
        if let Some(popup) = &self.ui.popup {
            let backdrop = popup.clone();
            controls.push(self.listen(popup, "click", move |v, event| {
                let on_backdrop = event
                    .target()
                    .and_then(|t| t.dyn_into::<Element>().ok())
                    .is_some_and(|t| t == backdrop);
                if on_backdrop {
                    v.close_popup();
                }
            }));
        }
        if let Some(btn) = &self.ui.reset {
            controls.push(self.listen(btn, "click", |v, _| v.confirm_reset()));
        }
        for card in dom::find_all(&self.ui.root, ".level-card") {
            let Some(id) = dom::data_index(&card, "level") else {
                continue;
            };
            let id = id as LevelId;
            controls.push(self.listen(&card, "click", move |v, _| {
                v.cue_click();
                v.load_level(id);
            }));
        }
        self.controls = controls;
    }

    // --- level lifecycle ---------------------------------------------------

    /// Opens `id` through the engine's lock check and renders it.
    fn load_level(&mut self, id: LevelId) {
        match self.engine.open_level(id, &mut self.rng) {
            OpenOutcome::Opened(level) => self.render_level(level),
            OpenOutcome::Locked(notice) => self.show(&notice),
            OpenOutcome::Unknown => log::warn!("no level {id}"),
        }
    }

    fn render_level(&mut self, level: &'static Level) {
        self.scope = LevelScope::default();
        self.round = Round::Idle;
        self.update_stats();
        match level.kind {
            LevelKind::Memory(pairs) => self.start_memory(level, pairs),
            LevelKind::Quiz(questions) => self.start_quiz(level, questions),
            LevelKind::Catch { target } => self.start_catch(level, target),
            LevelKind::Finale => self.start_finale(),
        }
        log::debug!("level {} rendered", level.id);
    }

    fn complete_level(&mut self) {
        let notice = self.engine.complete_current();
        self.update_stats();
        self.show(&notice);
    }

    fn confirm_reset(&mut self) {
        let Ok(win) = dom::window() else {
            return;
        };
        if !win.confirm_with_message(RESET_PROMPT).unwrap_or(false) {
            return;
        }
        self.cue_click();
        self.engine.reset();
        if let Err(e) = win.location().reload() {
            log::warn!("reload failed: {e:?}");
            self.load_level(1);
        }
    }

    // --- memory ------------------------------------------------------------

    fn start_memory(&mut self, level: &Level, pairs: &'static [memory::MemoryPair]) {
        let round = MemoryRound::new(pairs, &mut self.rng);
        let cards: String = round
            .cards()
            .iter()
            .enumerate()
            .map(|(i, c)| {
                format!(
                    "<div class=\"memory-card\" data-id=\"{}\" data-index=\"{i}\">\
                     <div class=\"card-inner\">\
                     <div class=\"card-face card-front\"><span>❓</span></div>\
                     <div class=\"card-face card-back\"><span>{}</span></div>\
                     </div></div>",
                    c.pair.id, c.pair.emoji
                )
            })
            .collect();
        self.ui.content.set_inner_html(&format!(
            "<h2 class=\"content-title\">{} {}</h2>\
             <p class=\"memory-counter\">{}</p>\
             <div class=\"memory-game\" id=\"memoryGame\">{cards}</div>",
            level.title,
            level.icon,
            memory_counter(0, round.total_pairs()),
        ));
        self.round = Round::Memory(round);

        if let Some(board) = dom::find(&self.ui.content, "#memoryGame") {
            let l = self.listen(&board, "click", |v, event| {
                if let Some(i) = dom::closest_from_event(event, ".memory-card")
                    .and_then(|c| dom::data_index(&c, "index"))
                {
                    v.on_memory_click(i);
                }
            });
            self.scope.listeners.push(l);
        }
    }

    fn memory_card(&self, index: usize) -> Option<Element> {
        dom::find(
            &self.ui.content,
            &format!(".memory-card[data-index=\"{index}\"]"),
        )
    }

    fn on_memory_click(&mut self, index: usize) {
        let reveal = match &mut self.round {
            Round::Memory(r) => r.reveal(index),
            _ => return,
        };
        let settle_in = match reveal {
            Reveal::Ignored => return,
            Reveal::First => None,
            Reveal::Match(..) => Some(memory::MATCH_SETTLE_MS),
            Reveal::Mismatch(..) => Some(memory::FLIP_BACK_MS),
        };
        self.cue_click();
        if let Some(card) = self.memory_card(index) {
            dom::set_class(&card, "flipped", true);
        }
        if let Some(ms) = settle_in {
            self.after(ms, |v| v.settle_memory());
        }
    }

    fn settle_memory(&mut self) {
        let (settle, total) = match &mut self.round {
            Round::Memory(r) => (r.settle(), r.total_pairs()),
            _ => return,
        };
        match settle {
            Settle::Matched { a, b, complete } => {
                for card in [a, b].into_iter().filter_map(|i| self.memory_card(i)) {
                    dom::set_class(&card, "matched", true);
                    dom::set_style(&card, "opacity", "0.3");
                    dom::set_style(&card, "pointer-events", "none");
                }
                let found = self.engine.record_pair();
                self.cue_success();
                if let Some(counter) = dom::find(&self.ui.content, ".memory-counter") {
                    dom::set_text(&counter, &memory_counter(found, total));
                }
                self.update_stats();
                if complete {
                    self.after(memory::MATCH_SETTLE_MS, |v| v.complete_level());
                }
            }
            Settle::FlippedBack { a, b } => {
                for card in [a, b].into_iter().filter_map(|i| self.memory_card(i)) {
                    dom::set_class(&card, "flipped", false);
                }
            }
            Settle::Nothing => {}
        }
    }

    // --- quiz --------------------------------------------------------------

    fn start_quiz(&mut self, level: &Level, questions: &'static [quiz::Question]) {
        let answered = self.engine.state().quiz_answers as usize;
        let Some(question) = questions.get(answered).or(questions.first()) else {
            return;
        };
        let options: String = question
            .options
            .iter()
            .enumerate()
            .map(|(i, o)| format!("<div class=\"quiz-option\" data-answer=\"{i}\">{o}</div>"))
            .collect();
        self.ui.content.set_inner_html(&format!(
            "<h2 class=\"content-title\">{} {}</h2>\
             <p class=\"quiz-progress\">{answered}/{}</p>\
             <div class=\"quiz-container\">\
             <div class=\"quiz-question\"><h3>{}</h3></div>\
             <div class=\"quiz-options\" id=\"quizOptions\">{options}</div>\
             </div>",
            level.title,
            level.icon,
            questions.len(),
            question.prompt,
        ));
        self.round = Round::Quiz(QuizRound::new(question));

        if let Some(list) = dom::find(&self.ui.content, "#quizOptions") {
            let l = self.listen(&list, "click", move |v, event| {
                let Some(option) = dom::closest_from_event(event, ".quiz-option") else {
                    return;
                };
                if let Some(choice) = dom::data_index(&option, "answer") {
                    v.on_quiz_answer(choice, &option, questions.len());
                }
            });
            self.scope.listeners.push(l);
        }
    }

    fn on_quiz_answer(&mut self, choice: usize, option: &Element, total: usize) {
        let answer = match &mut self.round {
            Round::Quiz(r) => r.answer(choice),
            _ => return,
        };
        if answer == Answer::Ignored {
            return;
        }
        self.cue_click();
        for opt in dom::find_all(&self.ui.content, ".quiz-option") {
            dom::set_style(&opt, "pointer-events", "none");
        }
        match answer {
            Answer::Correct => {
                dom::set_class(option, "correct", true);
                let answered = self.engine.record_correct_answer() as usize;
                self.update_stats();
                if answered >= total {
                    self.after(COMPLETE_DELAY_MS, |v| v.complete_level());
                } else {
                    self.after(quiz::NEXT_QUESTION_MS, |v| {
                        let id = v.engine.state().current_level;
                        v.load_level(id);
                    });
                }
            }
            Answer::Wrong => dom::set_class(option, "wrong", true),
            Answer::Ignored => {}
        }
    }

    // --- catch -------------------------------------------------------------

    fn start_catch(&mut self, level: &Level, target: u32) {
        self.ui.content.set_inner_html(&format!(
            "<h2 class=\"content-title\">{} {}</h2>\
             <p class=\"catch-goal\">Click {target} falling hearts! \
             <span id=\"heartsCaught\">0/{target}</span></p>\
             <div id=\"catchGame\" class=\"catch-area\" \
             style=\"position: relative; overflow: hidden; height: 400px;\"></div>\
             <div class=\"catch-tip\">Click the hearts before they drop! 💖</div>",
            level.title, level.icon,
        ));
        ensure_keyframes("fall-animation", FALL_KEYFRAMES);
        self.round = Round::Catch(CatchRound::new(target));

        let Some(area) = dom::find(&self.ui.content, "#catchGame") else {
            return;
        };
        let click = self.listen(&area, "click", |v, event| {
            if let Some(id) = heart_id(event) {
                v.on_catch(id);
            }
        });
        let landed = self.listen(&area, "animationend", |v, event| {
            if let Some(id) = heart_id(event) {
                v.on_heart_landed(id);
            }
        });
        self.scope.listeners.extend([click, landed]);
        self.scope.catch_area = Some(area);

        self.spawn_heart();
        self.scope.spawner = Some(self.every(catch::SPAWN_INTERVAL_MS, |v| v.spawn_heart()));
    }

    fn spawn_heart(&mut self) {
        let Some(id) = (match &mut self.round {
            Round::Catch(r) => r.spawn(),
            _ => None,
        }) else {
            self.scope.spawner = None;
            return;
        };
        let (Some(area), Ok(doc)) = (self.scope.catch_area.clone(), dom::document()) else {
            return;
        };
        let Ok(heart) = doc.create_element("div") else {
            return;
        };
        heart.set_text_content(Some("💖"));
        let _ = heart.set_attribute("data-heart", &id.to_string());
        let _ = heart.set_attribute(
            "style",
            &format!(
                "position: absolute; font-size: 2.5rem; cursor: pointer; user-select: none; \
                 top: -50px; left: {:.1}%; animation: fall {}ms linear;",
                self.rng.unit() * 90.0,
                catch::FALL_DURATION_MS
            ),
        );
        if area.append_child(&heart).is_ok() {
            self.scope.hearts.insert(id, heart);
        }
    }

    fn on_catch(&mut self, id: HeartId) {
        let (outcome, target) = match &mut self.round {
            Round::Catch(r) => (r.catch(id), r.target()),
            _ => return,
        };
        let Catch::Caught { caught, complete } = outcome else {
            return;
        };
        self.cue_click();
        if let Some(heart) = self.scope.hearts.remove(&id) {
            dom::set_style(&heart, "animation", "none");
            dom::set_style(&heart, "transform", "scale(1.5)");
            dom::set_style(&heart, "opacity", "0");
            self.after(catch::CAUGHT_FADE_MS, move |_| heart.remove());
        }
        if let Some(counter) = dom::find(&self.ui.content, "#heartsCaught") {
            dom::set_text(&counter, &format!("{caught}/{target}"));
        }
        self.engine.record_catch();
        self.update_stats();
        if complete {
            self.scope.spawner = None;
            self.after(COMPLETE_DELAY_MS, |v| v.complete_level());
        }
    }

    fn on_heart_landed(&mut self, id: HeartId) {
        let expired = match &mut self.round {
            Round::Catch(r) => r.expire(id),
            _ => false,
        };
        if expired {
            if let Some(heart) = self.scope.hearts.remove(&id) {
                heart.remove();
            }
        }
    }

    // --- finale ------------------------------------------------------------

    fn start_finale(&mut self) {
        self.ui.content.set_inner_html(
            "<div class=\"birthday-container\">\
             <div class=\"birthday-title\">Happy Birthday</div>\
             <div class=\"cake-container\">\
             <div class=\"romantic-decor\">\
             <span class=\"romantic-emoji\">💕</span><span class=\"romantic-emoji\">✨</span>\
             <span class=\"romantic-emoji\">🎀</span><span class=\"romantic-emoji\">💖</span>\
             <span class=\"romantic-emoji\">🌹</span><span class=\"romantic-emoji\">💐</span>\
             </div>\
             <div class=\"cake-emoji\">🎂</div>\
             </div></div>\
             <div id=\"fireworks\" style=\"position: fixed; top: 0; left: 0; width: 100%; \
             height: 100%; pointer-events: none; z-index: 9999;\"></div>",
        );
        ensure_keyframes("firework-animation", FIREWORK_KEYFRAMES);
        self.round = Round::Finale;

        if let Some(layer) = dom::find(&self.ui.content, "#fireworks") {
            self.scope.fireworks_layer = Some(layer);
            self.fire_burst();
            self.scope.fireworks = Some(self.every(finale::BURST_INTERVAL_MS, |v| v.fire_burst()));
        }
        self.after(finale::COMPLETE_AFTER_MS, |v| {
            v.engine.record_finale_bonus();
            v.complete_level();
        });
    }

    fn fire_burst(&mut self) {
        let (Some(layer), Ok(doc)) = (self.scope.fireworks_layer.clone(), dom::document()) else {
            return;
        };
        let Ok(group) = doc.create_element("div") else {
            return;
        };
        let (w, h) = dom::viewport();
        for p in finale::burst(&mut self.rng, w, h) {
            let Ok(spark) = doc.create_element("div") else {
                continue;
            };
            let _ = spark.set_attribute(
                "style",
                &format!(
                    "position: absolute; left: {:.0}px; top: {:.0}px; width: 8px; height: 8px; \
                     background: {c}; border-radius: 50%; box-shadow: 0 0 10px {c}; \
                     animation: firework {}ms ease-out forwards; --x: {:.1}px; --y: {:.1}px;",
                    p.x,
                    p.y,
                    finale::PARTICLE_LIFETIME_MS,
                    p.dx,
                    p.dy,
                    c = p.color,
                ),
            );
            let _ = group.append_child(&spark);
        }
        if layer.append_child(&group).is_err() {
            return;
        }
        self.scope.bursts.push_back(Timeout::new(
            finale::PARTICLE_LIFETIME_MS,
            move || group.remove(),
        ));
        while self.scope.bursts.len() > BURST_BACKLOG {
            self.scope.bursts.pop_front();
        }
    }

    // --- stats & popup -----------------------------------------------------

    fn update_stats(&self) {
        let state = self.engine.state();
        if let Some(el) = &self.ui.level {
            dom::set_text(el, &state.current_level.to_string());
        }
        if let Some(el) = &self.ui.score {
            dom::set_text(el, &state.score.to_string());
        }
        let (level_frac, score_frac) = self.engine.progress();
        if let Some(el) = &self.ui.level_progress {
            dom::set_style(el, "width", &format!("{}%", level_frac * 100.0));
        }
        if let Some(el) = &self.ui.score_progress {
            dom::set_style(el, "width", &format!("{}%", score_frac * 100.0));
        }

        for card in dom::find_all(&self.ui.root, ".level-card") {
            let Some(id) = dom::data_index(&card, "level") else {
                continue;
            };
            let status = self.engine.card_status(id as LevelId);
            for class in ["active", "completed", "locked"] {
                dom::set_class(&card, class, false);
            }
            let (class, cursor) = match status {
                CardStatus::Completed => ("completed", "pointer"),
                CardStatus::Active => ("active", "pointer"),
                CardStatus::Locked => ("locked", "not-allowed"),
                CardStatus::Available => ("locked", "pointer"),
            };
            dom::set_class(&card, class, true);
            dom::set_style(&card, "cursor", cursor);
        }

        if let Some(btn) = self.ui.prev.as_ref().and_then(|b| b.dyn_ref::<HtmlButtonElement>()) {
            btn.set_disabled(state.current_level == 1);
        }
        // Next stays clickable so an early press can show the skip warning.
        if let Some(btn) = &self.ui.next {
            let idle = !self.engine.is_completed(state.current_level)
                || state.current_level == LEVEL_COUNT;
            dom::set_class(btn, "disabled", idle);
        }
    }

    fn show(&self, notice: &Notice) {
        let Some(popup) = &self.ui.popup else {
            return;
        };
        if let Some(el) = &self.ui.popup_icon {
            dom::set_text(el, notice.icon);
        }
        if let Some(el) = &self.ui.popup_title {
            dom::set_text(el, notice.title);
        }
        if let Some(el) = &self.ui.popup_text {
            dom::set_text(el, &notice.text);
        }
        dom::set_class(popup, "active", true);
        if notice.warning {
            self.cue_click();
        } else {
            self.cue_success();
        }
    }

    fn close_popup(&self) {
        if let Some(popup) = &self.ui.popup {
            dom::set_class(popup, "active", false);
        }
    }

    fn cue_click(&self) {
        dom::play_cue(&self.ui.root, "clickSound");
    }

    fn cue_success(&self) {
        dom::play_cue(&self.ui.root, "successSound");
    }
}

/// Runs `f` on the view if it is still alive and not already borrowed.
fn with_view(weak: &Weak<RefCell<GameView>>, f: impl FnOnce(&mut GameView)) {
    let Some(view) = weak.upgrade() else {
        return;
    };
    match view.try_borrow_mut() {
        Ok(mut v) => f(&mut *v),
        Err(_) => log::debug!("game view busy, event dropped"),
    }
}

fn memory_counter(found: u32, total: usize) -> String {
    format!("Find the matching pairs! {found}/{total} 💝")
}

fn heart_id(event: &web_sys::Event) -> Option<HeartId> {
    let heart = dom::closest_from_event(event, "[data-heart]")?;
    dom::data(&heart, "heart")?.parse().ok()
}

fn ensure_keyframes(id: &str, css: &str) {
    if dom::by_id(id).is_some() {
        return;
    }
    let Ok(doc) = dom::document() else {
        return;
    };
    let (Some(head), Ok(style)) = (doc.head(), doc.create_element("style")) else {
        return;
    };
    style.set_id(id);
    style.set_text_content(Some(css));
    let _ = head.append_child(&style);
}
