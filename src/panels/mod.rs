//! The static content sections. Each one only wires a few click handlers
//! onto markup that ships with the page.

use web_sys::Element;

use crate::dom;

pub mod gallery;
pub mod messages;
pub mod timeline;

pub use gallery::GalleryPanel;
pub use messages::MessagesPanel;
pub use timeline::TimelinePanel;

/// Looks under the mounted section first, then the whole document (modals
/// usually live outside the section markup).
fn lookup(root: &Element, id: &str) -> Option<Element> {
    dom::find(root, &format!("#{id}")).or_else(|| dom::by_id(id))
}
