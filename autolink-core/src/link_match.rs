// autolink-core/src/link_match.rs
//! Provides the transient match record produced by detectors and the
//! privacy-aware debug logging helpers used while linking.

use std::fmt;

use lazy_static::lazy_static;
use log::debug;
use serde::{Deserialize, Serialize};

use crate::dom::Element;

lazy_static! {
    /// A static boolean that is initialized once to determine if PII is allowed in debug logs.
    static ref PII_DEBUG_ALLOWED: bool = {
        std::env::var("AUTOLINK_ALLOW_DEBUG_PII")
            .map(|s| s.eq_ignore_ascii_case("true"))
            .unwrap_or(false)
    };
}

/// What kind of linkable text a match represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LinkKind {
    Url,
    Email,
    Mention,
}

impl LinkKind {
    /// Whether matched text of this kind is personal data that must not reach
    /// debug logs unredacted.
    pub fn is_sensitive(self) -> bool {
        matches!(self, LinkKind::Email)
    }
}

impl fmt::Display for LinkKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LinkKind::Url => "url",
            LinkKind::Email => "email",
            LinkKind::Mention => "mention",
        };
        f.write_str(name)
    }
}

/// A single accepted match inside one text node.
///
/// `start..end` is the byte span of the source text the anchor replaces.
/// Boundary characters consumed by a grammar (a leading space, an `RT:`
/// marker) are not part of the span and stay in the surrounding text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkMatch {
    pub kind: LinkKind,
    pub start: usize,
    pub end: usize,
    pub matched: String,
    pub href: String,
    #[serde(default)]
    pub title: Option<String>,
    pub label: String,
}

impl LinkMatch {
    /// Builds the anchor element replacing this match.
    pub fn to_anchor(&self, base_uri: &str) -> Element {
        Element::anchor(base_uri, &self.href, self.title.as_deref(), &self.label)
    }
}

pub fn redact_sensitive(s: &str) -> String {
    const MAX_LEN: usize = 8;
    if s.len() <= MAX_LEN {
        "[REDACTED]".to_string()
    } else {
        format!("[REDACTED: {} chars]", s.len())
    }
}

fn get_loggable_content(kind: LinkKind, content: &str) -> String {
    if !kind.is_sensitive() || *PII_DEBUG_ALLOWED {
        content.to_string()
    } else {
        redact_sensitive(content)
    }
}

pub fn log_link_match_debug(detector_name: &str, m: &LinkMatch) {
    debug!(
        target: "autolink_core::detector",
        "{} linked {} at {}..{}: '{}'",
        detector_name,
        m.kind,
        m.start,
        m.end,
        get_loggable_content(m.kind, &m.matched)
    );
}

pub fn log_rejected_candidate_debug(detector_name: &str, kind: LinkKind, candidate: &str, reason: &str) {
    debug!(
        target: "autolink_core::detector",
        "{} rejected {} candidate '{}': {}",
        detector_name,
        kind,
        get_loggable_content(kind, candidate),
        reason
    );
}
