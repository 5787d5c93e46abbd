use super::StyleTarget;
use std::cell::{Cell, RefCell};
use std::collections::{BTreeMap, BTreeSet};
use std::rc::Rc;

/// A node the effector created in the document head.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ManagedNode {
    StylesheetLink { href: String },
    Style { css: String },
}

/// Everything about a [`MemoryDocument`] the effector can touch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocumentSnapshot {
    pub root_styles: BTreeMap<String, String>,
    pub root_classes: BTreeSet<String>,
    pub root_attributes: BTreeMap<String, String>,
    pub nodes: BTreeMap<String, ManagedNode>,
}

/// Headless stand-in for the browser document, used by tests and the
/// logic-mode tester. Clones share state.
#[derive(Debug, Clone, Default)]
pub struct MemoryDocument {
    state: Rc<RefCell<DocumentSnapshot>>,
    link_insertions: Rc<Cell<usize>>,
}

impl MemoryDocument {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn snapshot(&self) -> DocumentSnapshot {
        self.state.borrow().clone()
    }

    #[must_use]
    pub fn root_style(&self, property: &str) -> Option<String> {
        self.state.borrow().root_styles.get(property).cloned()
    }

    #[must_use]
    pub fn root_attribute(&self, name: &str) -> Option<String> {
        self.state.borrow().root_attributes.get(name).cloned()
    }

    #[must_use]
    pub fn has_class(&self, class: &str) -> bool {
        self.state.borrow().root_classes.contains(class)
    }

    #[must_use]
    pub fn style_text(&self, id: &str) -> Option<String> {
        match self.state.borrow().nodes.get(id) {
            Some(ManagedNode::Style { css }) => Some(css.clone()),
            _ => None,
        }
    }

    /// How many stylesheet links were ever inserted.
    #[must_use]
    pub fn link_insertions(&self) -> usize {
        self.link_insertions.get()
    }
}

impl StyleTarget for MemoryDocument {
    fn set_root_style(&self, property: &str, value: Option<&str>) {
        let mut state = self.state.borrow_mut();
        match value {
            Some(value) => {
                state
                    .root_styles
                    .insert(property.to_string(), value.to_string());
            }
            None => {
                state.root_styles.remove(property);
            }
        }
    }

    fn set_root_class(&self, class: &str, enabled: bool) {
        let mut state = self.state.borrow_mut();
        if enabled {
            state.root_classes.insert(class.to_string());
        } else {
            state.root_classes.remove(class);
        }
    }

    fn set_root_attribute(&self, name: &str, value: &str) {
        self.state
            .borrow_mut()
            .root_attributes
            .insert(name.to_string(), value.to_string());
    }

    fn has_node(&self, id: &str) -> bool {
        self.state.borrow().nodes.contains_key(id)
    }

    fn insert_stylesheet_link(&self, id: &str, href: &str) {
        self.link_insertions.set(self.link_insertions.get() + 1);
        self.state.borrow_mut().nodes.insert(
            id.to_string(),
            ManagedNode::StylesheetLink {
                href: href.to_string(),
            },
        );
    }

    fn upsert_style(&self, id: &str, css: &str) {
        self.state.borrow_mut().nodes.insert(
            id.to_string(),
            ManagedNode::Style {
                css: css.to_string(),
            },
        );
    }

    fn remove_node(&self, id: &str) {
        self.state.borrow_mut().nodes.remove(id);
    }
}
