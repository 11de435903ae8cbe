//! An in-memory document, enough to stand in for a browser page.
//!
//! Nodes live in an arena indexed by `NodeId`; element handles share the
//! arena through `Rc<RefCell<_>>`.

use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;
use std::fmt;
use std::rc::Rc;

use super::{Document, Element, Event};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct NodeId(usize);

#[derive(Debug)]
struct Node {
    tag_name: String,
    attrs: BTreeMap<String, String>,
    text: String,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

#[derive(Debug)]
struct Dom {
    nodes: Vec<Node>,
}

impl Dom {
    fn create_node(&mut self, tag_name: &str) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            tag_name: tag_name.to_ascii_lowercase(),
            attrs: BTreeMap::new(),
            text: String::new(),
            parent: None,
            children: Vec::new(),
        });
        id
    }

    fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    fn node_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.0]
    }

    fn append(&mut self, parent: NodeId, child: NodeId) {
        let previous = self.node(child).parent;
        if let Some(previous) = previous {
            self.node_mut(previous).children.retain(|c| *c != child);
        }
        self.node_mut(child).parent = Some(parent);
        self.node_mut(parent).children.push(child);
    }

    fn set_attr(&mut self, id: NodeId, name: &str, value: &str) {
        self.node_mut(id)
            .attrs
            .insert(name.to_string(), value.to_string());
    }

    /// First element under `root`, in tree order, carrying the id.
    fn find_by_id(&self, root: NodeId, id: &str) -> Option<NodeId> {
        let mut stack = vec![root];
        while let Some(current) = stack.pop() {
            let node = self.node(current);
            if node.attrs.get("id").map(String::as_str) == Some(id) {
                return Some(current);
            }
            stack.extend(node.children.iter().rev());
        }
        None
    }

    fn classes(&self, id: NodeId) -> Vec<String> {
        self.node(id)
            .attrs
            .get("class")
            .map(|c| c.split_whitespace().map(String::from).collect())
            .unwrap_or_default()
    }

    fn set_classes(&mut self, id: NodeId, classes: &[String]) {
        let value = classes.join(" ");
        self.set_attr(id, "class", &value);
    }

    fn text_content(&self, id: NodeId, out: &mut String) {
        let node = self.node(id);
        out.push_str(&node.text);
        for child in &node.children {
            self.text_content(*child, out);
        }
    }
}

/// A document held in memory.
#[derive(Clone)]
pub struct MemoryDocument {
    dom: Rc<RefCell<Dom>>,
    body: NodeId,
}

impl MemoryDocument {
    /// Creates an empty document with a `body` element.
    pub fn new() -> Self {
        let mut dom = Dom { nodes: Vec::new() };
        let body = dom.create_node("body");
        MemoryDocument {
            dom: Rc::new(RefCell::new(dom)),
            body,
        }
    }

    pub fn body(&self) -> MemoryElement {
        MemoryElement {
            dom: Rc::clone(&self.dom),
            id: self.body,
        }
    }

    /// Creates a detached element; attach it with [`MemoryElement::child`] or
    /// [`MemoryElement::append`].
    pub fn create_element(&self, tag: &str) -> MemoryElement {
        let id = self.dom.borrow_mut().create_node(tag);
        MemoryElement {
            dom: Rc::clone(&self.dom),
            id,
        }
    }
}

impl Default for MemoryDocument {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for MemoryDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemoryDocument")
            .field("nodes", &self.dom.borrow().nodes.len())
            .finish()
    }
}

impl Document for MemoryDocument {
    type Element = MemoryElement;

    // Only elements attached under the body are found.
    fn element_by_id(&self, id: &str) -> Option<MemoryElement> {
        let node = self.dom.borrow().find_by_id(self.body, id)?;
        Some(MemoryElement {
            dom: Rc::clone(&self.dom),
            id: node,
        })
    }
}

#[derive(Clone)]
pub struct MemoryElement {
    dom: Rc<RefCell<Dom>>,
    id: NodeId,
}

impl PartialEq for MemoryElement {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.dom, &other.dom) && self.id == other.id
    }
}

impl fmt::Debug for MemoryElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let dom = self.dom.borrow();
        let node = dom.node(self.id);
        f.debug_struct("MemoryElement")
            .field("tag_name", &node.tag_name)
            .field("attrs", &node.attrs)
            .finish()
    }
}

impl MemoryElement {
    pub fn attr(self, name: &str, value: &str) -> Self {
        self.set_attribute(name, value);
        self
    }

    pub fn class(self, class: &str) -> Self {
        self.add_class(class);
        self
    }

    pub fn text(self, text: &str) -> Self {
        self.dom.borrow_mut().node_mut(self.id).text.push_str(text);
        self
    }

    pub fn child(self, child: MemoryElement) -> Self {
        self.append(&child);
        self
    }

    pub fn append(&self, child: &MemoryElement) {
        self.dom.borrow_mut().append(self.id, child.id);
    }

    /// Replaces the text of the element and drops its children.
    pub fn set_text_content(&self, text: &str) {
        let mut dom = self.dom.borrow_mut();
        let children = std::mem::take(&mut dom.node_mut(self.id).children);
        for child in children {
            dom.node_mut(child).parent = None;
        }
        dom.node_mut(self.id).text = text.to_string();
    }

    pub fn remove_attribute(&self, name: &str) {
        self.dom.borrow_mut().node_mut(self.id).attrs.remove(name);
    }

    pub fn classes(&self) -> Vec<String> {
        self.dom.borrow().classes(self.id)
    }
}

impl Element for MemoryElement {
    fn tag_name(&self) -> String {
        self.dom.borrow().node(self.id).tag_name.clone()
    }

    fn text_content(&self) -> String {
        let mut out = String::new();
        self.dom.borrow().text_content(self.id, &mut out);
        out
    }

    fn attribute(&self, name: &str) -> Option<String> {
        self.dom.borrow().node(self.id).attrs.get(name).cloned()
    }

    fn set_attribute(&self, name: &str, value: &str) {
        self.dom.borrow_mut().set_attr(self.id, name, value);
    }

    fn has_class(&self, class: &str) -> bool {
        self.dom.borrow().classes(self.id).iter().any(|c| c == class)
    }

    fn add_class(&self, class: &str) {
        let mut dom = self.dom.borrow_mut();
        let mut classes = dom.classes(self.id);
        if !classes.iter().any(|c| c == class) {
            classes.push(class.to_string());
            dom.set_classes(self.id, &classes);
        }
    }

    fn remove_class(&self, class: &str) {
        let mut dom = self.dom.borrow_mut();
        let mut classes = dom.classes(self.id);
        let before = classes.len();
        classes.retain(|c| c != class);
        if classes.len() != before {
            dom.set_classes(self.id, &classes);
        }
    }

    fn closest(&self, tag: &str) -> Option<Self> {
        let dom = self.dom.borrow();
        let mut current = Some(self.id);
        while let Some(id) = current {
            let node = dom.node(id);
            if node.tag_name.eq_ignore_ascii_case(tag) {
                return Some(MemoryElement {
                    dom: Rc::clone(&self.dom),
                    id,
                });
            }
            current = node.parent;
        }
        None
    }
}

/// A click dispatched by hand, remembering whether its default action was suppressed.
#[derive(Debug, Default)]
pub struct ClickEvent {
    default_prevented: Cell<bool>,
}

impl ClickEvent {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn default_prevented(&self) -> bool {
        self.default_prevented.get()
    }
}

impl Event for ClickEvent {
    fn prevent_default(&self) {
        self.default_prevented.set(true);
    }
}
