// autolink-core/src/dom.rs
//! The node tree the detectors and the rewriter operate on.
//!
//! Trees are immutable once built: rewriting produces new [`Element`] values,
//! while unchanged subtrees are shared through [`Arc`]. A [`Document`] is a base
//! URI plus the `body` element that holds the linked fragment.
//!
//! License: MIT OR APACHE 2.0

use std::sync::Arc;

/// Tag name of the anchor element. Anchors are never descended into.
pub const ANCHOR_TAG: &str = "a";

/// A node of the tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Element(Arc<Element>),
    Text(Text),
    /// Comments, doctypes and other markup that is passed through untouched.
    Other(Other),
}

impl Node {
    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Node::Element(element) => Some(element),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&Text> {
        match self {
            Node::Text(text) => Some(text),
            _ => None,
        }
    }

    /// The visible text of this node and its descendants.
    pub fn text(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        match self {
            Node::Element(element) => element.children.iter().for_each(|c| c.collect_text(out)),
            Node::Text(text) => out.push_str(&text.content),
            Node::Other(_) => {}
        }
    }
}

impl From<Element> for Node {
    fn from(element: Element) -> Self {
        Node::Element(Arc::new(element))
    }
}

impl From<Text> for Node {
    fn from(text: Text) -> Self {
        Node::Text(text)
    }
}

impl From<Other> for Node {
    fn from(other: Other) -> Self {
        Node::Other(other)
    }
}

/// A run of character data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Text {
    content: String,
    base_uri: String,
}

impl Text {
    pub fn new(content: impl Into<String>, base_uri: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            base_uri: base_uri.into(),
        }
    }

    /// The raw, unescaped text.
    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn base_uri(&self) -> &str {
        &self.base_uri
    }
}

/// Markup that is neither an element nor linkable text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Other {
    Comment(String),
    Doctype {
        name: String,
        public_id: String,
        system_id: String,
    },
    ProcessingInstruction {
        target: String,
        data: String,
    },
    /// Raw character data of `script` and `style` elements.
    Data(String),
}

/// An ordered attribute list. Setting an existing name replaces its value in place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Attributes(Vec<(String, String)>);

impl Attributes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.0.iter_mut().find(|(key, _)| key.eq_ignore_ascii_case(&name)) {
            Some(slot) => slot.1 = value,
            None => self.0.push((name, value)),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// An element with its attributes and ordered children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    tag: String,
    attributes: Attributes,
    base_uri: String,
    children: Vec<Node>,
}

impl Element {
    pub fn new(tag: impl Into<String>, base_uri: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            attributes: Attributes::new(),
            base_uri: base_uri.into(),
            children: Vec::new(),
        }
    }

    /// Builds `<a href="…" [title="…"]>label</a>`.
    pub fn anchor(base_uri: &str, href: &str, title: Option<&str>, label: &str) -> Self {
        let mut anchor = Element::new(ANCHOR_TAG, base_uri).with_attr("href", href);
        if let Some(title) = title {
            anchor.attributes.set("title", title);
        }
        anchor.append_child(Text::new(label, base_uri));
        anchor
    }

    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.set(name, value);
        self
    }

    pub fn with_attributes(mut self, attributes: Attributes) -> Self {
        self.attributes = attributes;
        self
    }

    /// A copy of this element (same tag, attributes and base URI) holding `children`.
    pub fn with_children(&self, children: Vec<Node>) -> Self {
        Self {
            tag: self.tag.clone(),
            attributes: self.attributes.clone(),
            base_uri: self.base_uri.clone(),
            children,
        }
    }

    pub fn append_child(&mut self, child: impl Into<Node>) {
        self.children.push(child.into());
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn is_anchor(&self) -> bool {
        self.tag.eq_ignore_ascii_case(ANCHOR_TAG)
    }

    pub fn attributes(&self) -> &Attributes {
        &self.attributes
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes.get(name)
    }

    pub fn base_uri(&self) -> &str {
        &self.base_uri
    }

    pub fn children(&self) -> &[Node] {
        &self.children
    }

    pub fn child(&self, index: usize) -> Option<&Node> {
        self.children.get(index)
    }

    /// The visible text of all descendants.
    pub fn text(&self) -> String {
        let mut out = String::new();
        self.children.iter().for_each(|c| c.collect_text(&mut out));
        out
    }
}

/// A parsed document: a base URI and the body holding the content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    base_uri: String,
    body: Element,
}

impl Document {
    pub fn new(base_uri: impl Into<String>, body: Element) -> Self {
        Self {
            base_uri: base_uri.into(),
            body,
        }
    }

    /// A document with an empty body.
    pub fn create_shell(base_uri: impl Into<String>) -> Self {
        let base_uri = base_uri.into();
        let body = Element::new("body", base_uri.clone());
        Self { base_uri, body }
    }

    pub fn base_uri(&self) -> &str {
        &self.base_uri
    }

    pub fn body(&self) -> &Element {
        &self.body
    }

    /// Replaces the body, returning the previous one.
    pub fn replace_body(&mut self, body: Element) -> Element {
        std::mem::replace(&mut self.body, body)
    }

    pub fn into_body(self) -> Element {
        self.body
    }
}
