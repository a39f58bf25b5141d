// Flavor-text pools for the mini-game popups.
// Warning texts may contain `{level}` (the level clicked / current level) and
// `{prev}` (the level that must be finished first).

use super::{LevelId, Notice};
use crate::rng::Rng;

pub const WARNING_ICON: &str = "⚠️";

/// Shown when a locked level card is clicked.
pub static LOCKED_WARNINGS: [(&str, &str); 10] = [
    ("Whoa whoa whoa!", "This level is still locked! Finish level {prev} first! 😤"),
    ("No cheating!", "No jumping ahead! I'll get mad at you! 😠"),
    ("Patience!", "Eyeing level {level}? Finish level {prev} first! 💔"),
    ("Caught you!", "Looks like you're trying to cheat... level {prev} isn't done yet! 😡"),
    ("STOP!", "I know you're in a hurry, but rules are rules! Go back to level {prev}! 🤨"),
    ("Ouch!", "Skipping levels? Don't you want the final present? 😞"),
    ("Seriously?", "Skipping a level, really? Level {prev} first! 🙄"),
    ("Behave!", "You forgot I can see everything you do! Finish level {prev}! 😈"),
    ("Grr!", "Level {level} is locked! Finish level {prev} first, it's easy! 😤💨"),
    ("NO NO NO!", "Level {level} can't be opened before level {prev} is done! Rules are rules! 🚫✋"),
];

/// Shown when "next" is pressed before the current level is finished.
pub static SKIP_WARNINGS: [(&str, &str); 4] = [
    ("Not done yet!", "Running away? Finish this level first! 😤"),
    ("Don't run!", "We're not done having fun! Finish this level! 💪"),
    ("Wait a second!", "You have to finish level {level} before moving on! 😠"),
    ("Aww!", "Don't skip this one... I want to see you win! 🥺"),
];

pub static HINTS: [(&str, &str, &str); 5] = [
    ("💡", "Hint", "Nope, no hints for you!"),
    ("🤔", "Hmm...", "Don't give up now!"),
    ("💪", "You got this!", "I believe in you!"),
    ("⏰", "Keep going!", "Time is ticking..."),
    ("🎯", "Focus!", "Almost there!"),
];

pub const WELCOME: (&str, &str, &str) = (
    "🎮",
    "Welcome!",
    "Finish every level to unlock a special present! 💖",
);

fn fill(template: &str, level: LevelId) -> String {
    template
        .replace("{prev}", &level.saturating_sub(1).to_string())
        .replace("{level}", &level.to_string())
}

fn warning(pool: &[(&'static str, &'static str)], level: LevelId, rng: &mut impl Rng) -> Notice {
    let (title, text) = rng.pick(pool).copied().unwrap_or(("", ""));
    Notice::warning(title, fill(text, level))
}

pub fn locked_warning(level: LevelId, rng: &mut impl Rng) -> Notice {
    warning(&LOCKED_WARNINGS, level, rng)
}

pub fn skip_warning(level: LevelId, rng: &mut impl Rng) -> Notice {
    warning(&SKIP_WARNINGS, level, rng)
}

pub fn hint(rng: &mut impl Rng) -> Notice {
    let (icon, title, text) = rng.pick(&HINTS).copied().unwrap_or(HINTS[0]);
    Notice::info(icon, title, text)
}

pub fn welcome() -> Notice {
    let (icon, title, text) = WELCOME;
    Notice::info(icon, title, text)
}
