// Timeline: static markup, the initializer only reports how many entries it
// found.

use web_sys::Element;

use crate::error::Result;
use crate::router::Section;

#[derive(Default)]
pub struct TimelinePanel;

impl Section for TimelinePanel {
    fn bind(&mut self, root: &Element) -> Result<()> {
        log::info!(
            "timeline shown ({} entries)",
            root.query_selector_all(".timeline-item")
                .map(|l| l.length())
                .unwrap_or(0)
        );
        Ok(())
    }

    fn unbind(&mut self) {}
}
