//! The few document operations the favorite toggle needs.
//!
//! Handles are cheap to clone and mutate through `&self`, the way browser
//! element references behave.

pub mod memory;

pub use memory::{ClickEvent, MemoryDocument, MemoryElement};

/// A handle on an element of a document.
pub trait Element: Clone {
    fn tag_name(&self) -> String;

    /// Concatenated text of the element and its descendants.
    fn text_content(&self) -> String;

    fn attribute(&self, name: &str) -> Option<String>;

    fn set_attribute(&self, name: &str, value: &str);

    fn has_class(&self, class: &str) -> bool;

    fn add_class(&self, class: &str);

    fn remove_class(&self, class: &str);

    /// Nearest ancestor (or self) with the given tag name.
    fn closest(&self, tag: &str) -> Option<Self>;
}

pub trait Document {
    type Element: Element;

    fn element_by_id(&self, id: &str) -> Option<Self::Element>;
}

/// The part of a DOM event the toggle interacts with.
pub trait Event {
    fn prevent_default(&self);
}
