// autolink-core/src/detectors/url.rs
//! A `Detector` that turns plain text URLs into anchors. If no protocol is
//! given, `http://` is assumed.
//! License: MIT OR APACHE 2.0

use std::borrow::Cow;

use log::warn;

use crate::detector::Detector;
use crate::errors::AutolinkError;
use crate::link_match::{LinkKind, LinkMatch};
use crate::patterns::{GROUP_PROTOCOL, GROUP_URL, VALID_URL};
use crate::strings::{truncate, DEFAULT_ELLIPSIS};

/// Maximum anchor label length used when none is configured.
pub const DEFAULT_MAX_LABEL_LENGTH: usize = 30;

const DEFAULT_PROTOCOL: &str = "http://";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlDetector {
    /// Maximum length of the anchor text, in codepoints, before it gets truncated.
    max_label_length: usize,
}

impl UrlDetector {
    /// Creates a URL detector truncating labels to `max_label_length` codepoints.
    ///
    /// Fails if the length cannot even hold the ellipsis.
    pub fn new(max_label_length: usize) -> Result<Self, AutolinkError> {
        let ellipsis_length = DEFAULT_ELLIPSIS.chars().count();
        if max_label_length < ellipsis_length {
            return Err(AutolinkError::invalid_argument(format!(
                "max_label_length must be at least {}, got {}",
                ellipsis_length, max_label_length
            )));
        }
        Ok(Self { max_label_length })
    }

    pub fn max_label_length(&self) -> usize {
        self.max_label_length
    }

    fn label<'a>(&self, url_without_protocol: &'a str) -> Cow<'a, str> {
        truncate(url_without_protocol, self.max_label_length).unwrap_or_else(|e| {
            warn!("Keeping untruncated label for '{}': {}", url_without_protocol, e);
            Cow::Borrowed(url_without_protocol)
        })
    }
}

impl Default for UrlDetector {
    fn default() -> Self {
        Self {
            max_label_length: DEFAULT_MAX_LABEL_LENGTH,
        }
    }
}

impl Detector for UrlDetector {
    fn name(&self) -> &str {
        "url"
    }

    fn find_matches(&self, text: &str) -> Vec<LinkMatch> {
        let mut matches = Vec::new();
        for caps in VALID_URL.captures_iter(text) {
            let Some(url) = caps.name(GROUP_URL) else {
                continue;
            };
            let protocol = caps.name(GROUP_PROTOCOL);

            let href = match protocol {
                Some(_) => url.as_str().to_string(),
                None => format!("{}{}", DEFAULT_PROTOCOL, url.as_str()),
            };
            let without_protocol = &url.as_str()[protocol.map_or(0, |p| p.len())..];

            matches.push(LinkMatch {
                kind: LinkKind::Url,
                start: url.start(),
                end: url.end(),
                matched: url.as_str().to_string(),
                title: Some(href.clone()),
                label: self.label(without_protocol).into_owned(),
                href,
            });
        }
        matches
    }
}
