// autolink-core/src/detector.rs
//! Defines the core `Detector` trait.
//!
//! A detector looks at the content of one text node and finds the substrings it
//! can turn into links. This module defines the contract every detector
//! (url, email, mention, or a custom one) adheres to, so the rewriter and the
//! service can use them interchangeably.
//!
//! License: MIT OR APACHE 2.0

use crate::dom::{Node, Text};
use crate::link_match::{log_link_match_debug, LinkMatch};

/// A trait that defines the core functionality of a detector.
///
/// Implementations must be stateless between calls and must never panic on
/// any string input; text they cannot make sense of stays unlinked.
pub trait Detector: Send + Sync {
    /// A short, stable name used in logs (e.g. `"url"`).
    fn name(&self) -> &str;

    /// Finds all linkable substrings of `text`.
    ///
    /// Matches are returned in text order, do not overlap, and their spans
    /// lie on character boundaries of `text`.
    fn find_matches(&self, text: &str) -> Vec<LinkMatch>;

    /// Turns one text node into the node sequence that replaces it.
    ///
    /// Text between matches is kept as text nodes (empty segments are
    /// dropped) and each match becomes an anchor. A node without matches comes
    /// back as a single, equal text node.
    fn create_links(&self, text: &Text) -> Vec<Node> {
        let matches = self.find_matches(text.content());
        for m in &matches {
            log_link_match_debug(self.name(), m);
        }
        splice_matches(text, &matches)
    }
}

impl<D: Detector + ?Sized> Detector for Box<D> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn find_matches(&self, text: &str) -> Vec<LinkMatch> {
        (**self).find_matches(text)
    }

    fn create_links(&self, text: &Text) -> Vec<Node> {
        (**self).create_links(text)
    }
}

/// Replaces every match span of `text` with the match's anchor.
pub fn splice_matches(text: &Text, matches: &[LinkMatch]) -> Vec<Node> {
    let content = text.content();
    let base_uri = text.base_uri();
    let mut nodes = Vec::with_capacity(matches.len() * 2 + 1);
    let mut last_end = 0usize;

    for m in matches {
        if m.start < last_end {
            continue;
        }
        let before = &content[last_end..m.start];
        if !before.is_empty() {
            nodes.push(Text::new(before, base_uri).into());
        }
        nodes.push(m.to_anchor(base_uri).into());
        last_end = m.end;
    }

    let after = &content[last_end..];
    if !after.is_empty() {
        nodes.push(Text::new(after, base_uri).into());
    }
    nodes
}
