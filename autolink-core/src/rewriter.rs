// autolink-core/src/rewriter.rs
//! Applies one detector to every text node below an element.
//!
//! The rewrite is an immutable rebuild: the input tree is never touched, and
//! subtrees in which nothing was linked are shared with the result instead of
//! being copied. Anchors are left exactly as they are, which is what keeps
//! several detectors (and repeated runs) from linking inside each other's
//! output.
//!
//! License: MIT OR APACHE 2.0

use std::sync::Arc;

use log::trace;

use crate::detector::Detector;
use crate::dom::{Element, Node};

/// Rewrites the children of `element` with `detector`.
///
/// The result has the tag, attributes and base URI of `element`. Text nodes
/// are replaced by whatever the detector returns for them, anchors are kept
/// without being visited, every other element is rewritten recursively and
/// all remaining nodes pass through.
pub fn rewrite(detector: &dyn Detector, element: &Element) -> Element {
    match rewrite_children(detector, element) {
        Some(children) => element.with_children(children),
        None => element.clone(),
    }
}

/// Returns the new child list, or `None` if no descendant was linked.
fn rewrite_children(detector: &dyn Detector, element: &Element) -> Option<Vec<Node>> {
    let mut rewritten: Option<Vec<Node>> = None;

    for (index, child) in element.children().iter().enumerate() {
        let replacement = match child {
            Node::Element(child_element) if child_element.is_anchor() => None,
            Node::Element(child_element) => rewrite_children(detector, child_element)
                .map(|children| vec![Node::Element(Arc::new(child_element.with_children(children)))]),
            Node::Text(text) => {
                let nodes = detector.create_links(text);
                if nodes.len() == 1 && nodes[0] == *child {
                    None
                } else {
                    trace!(
                        "{} replaced a text node with {} node(s) in <{}>",
                        detector.name(),
                        nodes.len(),
                        element.tag()
                    );
                    Some(nodes)
                }
            }
            Node::Other(_) => None,
        };

        match (replacement, rewritten.as_mut()) {
            (Some(nodes), Some(children)) => children.extend(nodes),
            (Some(nodes), None) => {
                // First change: everything before it is carried over as is.
                let mut children = Vec::with_capacity(element.children().len() + nodes.len());
                children.extend(element.children()[..index].iter().cloned());
                children.extend(nodes);
                rewritten = Some(children);
            }
            (None, Some(children)) => children.push(child.clone()),
            (None, None) => {}
        }
    }
    rewritten
}
