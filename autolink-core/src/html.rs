// autolink-core/src/html.rs
//! Adapter between markup and the [`crate::dom`] tree.
//!
//! Parsing is delegated to `scraper` (html5ever); the parsed fragment is
//! converted into our own immutable nodes. Serialization is fixed to the one
//! output style the service needs: no pretty printing, XHTML-style escaping,
//! UTF-8 output.
//!
//! License: MIT OR APACHE 2.0

use std::collections::HashSet;

use lazy_static::lazy_static;
use log::trace;
use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{ElementRef, Html};

use crate::dom::{Document, Element, Node, Other, Text};

static VOID_ELEMENTS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    let mut set = HashSet::new();
    set.extend([
        "area", "base", "basefont", "bgsound", "br", "col", "embed", "frame", "hr", "img",
        "input", "keygen", "link", "meta", "param", "source", "track", "wbr",
    ]);
    set
});

static RAW_TEXT_ELEMENTS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    let mut set = HashSet::new();
    set.extend(["script", "style"]);
    set
});

/// Entities whose double-escaped form must stay escaped: unescaping them
/// would change the markup instead of the rendered text.
const MARKUP_ENTITIES: [&str; 5] = ["amp", "lt", "gt", "quot", "apos"];

lazy_static! {
    static ref DOUBLE_ESCAPED_NAMED_ENTITY: Regex =
        Regex::new(r"&amp;([A-Za-z][A-Za-z0-9]{1,31});").unwrap();
}

/// Parses `text` as the content of a `<body>` element.
pub fn parse_body_fragment(text: &str, base_uri: &str) -> Document {
    let fragment = Html::parse_fragment(text);
    for error in &fragment.errors {
        trace!("Lenient parse error in fragment: {}", error);
    }

    // The fragment is parsed into a synthetic <html> context element; its
    // children become the body.
    let context = convert_element(fragment.root_element(), base_uri);
    let body = Element::new("body", base_uri).with_children(context.children().to_vec());
    Document::new(base_uri, body)
}

fn convert_element(source: ElementRef<'_>, base_uri: &str) -> Element {
    let name = source.value().name();
    let mut element = Element::new(name, base_uri);
    for (key, value) in source.value().attrs() {
        element = element.with_attr(key, value);
    }
    let raw_text = RAW_TEXT_ELEMENTS.contains(name);

    for child in source.children() {
        let converted: Option<Node> = match child.value() {
            scraper::Node::Element(_) => {
                ElementRef::wrap(child).map(|e| convert_element(e, base_uri).into())
            }
            scraper::Node::Text(text) if raw_text => Some(Other::Data(String::from(&**text)).into()),
            scraper::Node::Text(text) => Some(Text::new(&**text, base_uri).into()),
            scraper::Node::Comment(comment) => Some(Other::Comment(String::from(&**comment)).into()),
            scraper::Node::Doctype(doctype) => Some(
                Other::Doctype {
                    name: doctype.name().to_string(),
                    public_id: doctype.public_id().to_string(),
                    system_id: doctype.system_id().to_string(),
                }
                .into(),
            ),
            scraper::Node::ProcessingInstruction(pi) => Some(
                Other::ProcessingInstruction {
                    target: String::from(&*pi.target),
                    data: String::from(&*pi.data),
                }
                .into(),
            ),
            _ => None,
        };
        if let Some(node) = converted {
            element.append_child(node);
        }
    }
    element
}

impl Element {
    /// Serializes the children of this element.
    pub fn inner_html(&self) -> String {
        let mut out = String::new();
        for child in self.children() {
            write_node(child, &mut out);
        }
        out
    }

    /// Serializes this element including its own tags.
    pub fn outer_html(&self) -> String {
        let mut out = String::new();
        write_element(self, &mut out);
        out
    }
}

impl Node {
    pub fn outer_html(&self) -> String {
        let mut out = String::new();
        write_node(self, &mut out);
        out
    }
}

fn write_node(node: &Node, out: &mut String) {
    match node {
        Node::Element(element) => write_element(element, out),
        Node::Text(text) => escape_into(text.content(), false, out),
        Node::Other(Other::Comment(comment)) => {
            out.push_str("<!--");
            out.push_str(comment);
            out.push_str("-->");
        }
        Node::Other(Other::Doctype { name, public_id, system_id }) => {
            out.push_str("<!doctype ");
            out.push_str(name);
            if !public_id.is_empty() {
                out.push_str(&format!(" PUBLIC \"{public_id}\""));
            }
            if !system_id.is_empty() {
                out.push_str(&format!(" \"{system_id}\""));
            }
            out.push('>');
        }
        Node::Other(Other::ProcessingInstruction { target, data }) => {
            out.push_str("<?");
            out.push_str(target);
            out.push(' ');
            out.push_str(data);
            out.push_str("?>");
        }
        Node::Other(Other::Data(data)) => out.push_str(data),
    }
}

fn write_element(element: &Element, out: &mut String) {
    out.push('<');
    out.push_str(element.tag());
    for (name, value) in element.attributes().iter() {
        out.push(' ');
        out.push_str(name);
        out.push_str("=\"");
        escape_into(value, true, out);
        out.push('"');
    }

    if element.children().is_empty() && VOID_ELEMENTS.contains(element.tag()) {
        out.push_str(" />");
        return;
    }

    out.push('>');
    for child in element.children() {
        write_node(child, out);
    }
    out.push_str("</");
    out.push_str(element.tag());
    out.push('>');
}

/// XHTML-style escaping. `<` is escaped everywhere, `>` only in text and `"`
/// only in attribute values. A no-break space is always written as `&#xa0;`.
fn escape_into(s: &str, in_attribute: bool, out: &mut String) {
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '\u{00A0}' => out.push_str("&#xa0;"),
            '<' => out.push_str("&lt;"),
            '>' if !in_attribute => out.push_str("&gt;"),
            '"' if in_attribute => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
}

/// Collapses double-escaped named entity references (`&amp;auml;`) back to
/// their single-escaped form (`&auml;`), except for the markup entities.
pub fn unescape_benign_entities(html: &str) -> String {
    DOUBLE_ESCAPED_NAMED_ENTITY
        .replace_all(html, |caps: &regex::Captures<'_>| {
            let name = &caps[1];
            if MARKUP_ENTITIES.iter().any(|m| m.eq_ignore_ascii_case(name)) {
                caps[0].to_string()
            } else {
                format!("&{name};")
            }
        })
        .into_owned()
}
