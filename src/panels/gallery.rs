// Memory gallery: clicking a tile opens the detail modal with a fresh like
// counter.

use std::cell::Cell;
use std::rc::Rc;

use gloo::events::EventListener;
use wasm_bindgen::JsCast;
use web_sys::Element;

use super::lookup;
use crate::dom;
use crate::error::{AppError, Result};
use crate::router::Section;

#[derive(Debug, PartialEq, Eq)]
pub struct Memory {
    pub id: u32,
    pub title: &'static str,
    pub date: &'static str,
    pub emoji: &'static str,
    pub description: &'static str,
}

pub static MEMORIES: [Memory; 9] = [
    Memory {
        id: 1,
        title: "Graduating Together",
        date: "June 15, 2019",
        emoji: "🎓",
        description: "Our unforgettable graduation day. I still remember the joy in your eyes.",
    },
    Memory {
        id: 2,
        title: "Dawn at the Beach",
        date: "August 23, 2020",
        emoji: "🌅",
        description: "Watching the sunrise hand in hand. The most romantic moment of all.",
    },
    Memory {
        id: 3,
        title: "Our First Birthday Party",
        date: "December 12, 2021",
        emoji: "🎂",
        description: "The first cake we celebrated together. Every candle was a wish to stay together forever.",
    },
    Memory {
        id: 4,
        title: "Bali Adventure",
        date: "February 7, 2022",
        emoji: "✈️",
        description: "Our first holiday on that beautiful island. Every beach meant more because of you.",
    },
    Memory {
        id: 5,
        title: "Just the Two of Us",
        date: "February 14, 2023",
        emoji: "💑",
        description: "A Valentine's Day full of love and warmth. You are my home.",
    },
    Memory {
        id: 6,
        title: "Surprise Party",
        date: "May 20, 2023",
        emoji: "🎪",
        description: "The surprise I planned for weeks. Your happy face was the best part.",
    },
    Memory {
        id: 7,
        title: "Romantic Dinner",
        date: "August 8, 2023",
        emoji: "🍽️",
        description: "An evening of meaningful conversation. Simple moments with you are the best.",
    },
    Memory {
        id: 8,
        title: "Concert Night",
        date: "November 16, 2023",
        emoji: "🎭",
        description: "Feeling the same music with hearts beating to the same rhythm.",
    },
    Memory {
        id: 9,
        title: "Picnic in the Flower Garden",
        date: "March 22, 2024",
        emoji: "🌸",
        description: "Surrounded by flowers, yet your smile was the prettiest of all.",
    },
];

pub fn memory(id: u32) -> Option<&'static Memory> {
    MEMORIES.iter().find(|m| m.id == id)
}

#[derive(Default)]
pub struct GalleryPanel {
    listeners: Vec<EventListener>,
}

impl GalleryPanel {
    pub fn new() -> Self {
        Self::default()
    }
}

struct Modal {
    frame: Element,
    image: Option<Element>,
    title: Option<Element>,
    date: Option<Element>,
    description: Option<Element>,
    likes: Option<Element>,
}

impl Modal {
    fn open(&self, memory: &Memory) {
        let fields = [
            (&self.image, memory.emoji),
            (&self.title, memory.title),
            (&self.date, memory.date),
            (&self.description, memory.description),
            (&self.likes, "0"),
        ];
        for (el, text) in fields {
            if let Some(el) = el {
                dom::set_text(el, text);
            }
        }
        dom::set_class(&self.frame, "active", true);
    }

    fn close(&self) {
        dom::set_class(&self.frame, "active", false);
    }
}

impl Section for GalleryPanel {
    fn bind(&mut self, root: &Element) -> Result<()> {
        self.unbind();
        let frame = lookup(root, "modal").ok_or_else(|| AppError::MissingElement("#modal".into()))?;
        let modal = Rc::new(Modal {
            image: lookup(root, "modalImage"),
            title: lookup(root, "modalTitle"),
            date: lookup(root, "modalDate"),
            description: lookup(root, "modalDescription"),
            likes: lookup(root, "likeCount"),
            frame: frame.clone(),
        });
        let likes = Rc::new(Cell::new(0u32));

        let m = modal.clone();
        let l = likes.clone();
        self.listeners.push(EventListener::new(root, "click", move |event| {
            let Some(item) = dom::closest_from_event(event, ".gallery-item") else {
                return;
            };
            let Some(found) = dom::data(&item, "id")
                .and_then(|id| id.trim().parse().ok())
                .and_then(memory)
            else {
                return;
            };
            l.set(0);
            m.open(found);
        }));

        let close = frame
            .query_selector(".modal-close")
            .ok()
            .flatten()
            .or_else(|| dom::find(root, ".modal-close"));
        if let Some(close) = close {
            let m = modal.clone();
            self.listeners
                .push(EventListener::new(&close, "click", move |_| m.close()));
        }

        let m = modal.clone();
        let backdrop = frame.clone();
        self.listeners.push(EventListener::new(&frame, "click", move |event| {
            let on_backdrop = event
                .target()
                .and_then(|t| t.dyn_into::<Element>().ok())
                .is_some_and(|t| t == backdrop);
            if on_backdrop {
                m.close();
            }
        }));

        if let Some(btn) = lookup(root, "likeBtn") {
            let m = modal.clone();
            self.listeners.push(EventListener::new(&btn, "click", move |_| {
                likes.set(likes.get() + 1);
                if let Some(count) = &m.likes {
                    dom::set_text(count, &likes.get().to_string());
                }
            }));
        }

        log::debug!("gallery bound with {} memories", MEMORIES.len());
        Ok(())
    }

    fn unbind(&mut self) {
        self.listeners.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_ids_are_unique_and_sequential() {
        for (i, m) in MEMORIES.iter().enumerate() {
            assert_eq!(m.id as usize, i + 1);
        }
    }

    #[test]
    fn lookup_by_id() {
        assert_eq!(memory(4).map(|m| m.emoji), Some("✈️"));
        assert!(memory(0).is_none());
        assert!(memory(10).is_none());
    }

    #[test]
    fn every_memory_has_content() {
        for m in &MEMORIES {
            assert!(!m.title.is_empty() && !m.date.is_empty());
            assert!(!m.emoji.is_empty() && !m.description.is_empty());
        }
    }
}
