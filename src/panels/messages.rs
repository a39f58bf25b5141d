// Message wall: the like/reply buttons on each card are delegated from the
// section root and only flip their `active` state.

use gloo::events::EventListener;
use web_sys::Element;

use crate::dom;
use crate::error::Result;
use crate::router::Section;

#[derive(Default)]
pub struct MessagesPanel {
    listener: Option<EventListener>,
}

impl MessagesPanel {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Section for MessagesPanel {
    fn bind(&mut self, root: &Element) -> Result<()> {
        let scope = root.clone();
        self.listener = Some(EventListener::new(root, "click", move |event| {
            let Some(btn) = dom::closest_from_event(event, ".message-action-btn") else {
                return;
            };
            dom::play_cue(&scope, "clickSound");
            let on = !dom::has_class(&btn, "active");
            dom::set_class(&btn, "active", on);
        }));
        log::debug!("messages bound");
        Ok(())
    }

    fn unbind(&mut self) {
        self.listener = None;
    }
}
