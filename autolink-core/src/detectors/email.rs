// autolink-core/src/detectors/email.rs
//! A `Detector` that turns ASCII email addresses into `mailto:` anchors.
//!
//! The `mailto:` target can be hex-encoded and the visible label can be
//! obfuscated, both to make harvesting addresses from rendered pages harder.
//!
//! License: MIT OR APACHE 2.0

use crate::detector::Detector;
use crate::link_match::{log_rejected_candidate_debug, LinkKind, LinkMatch};
use crate::patterns::{is_email_boundary, VALID_EMAIL_ADDRESS_ML};
use crate::strings::{hex_encode_email_address, obfuscate_email_address};

const MAILTO: &str = "mailto:";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EmailDetector {
    /// Should `mailto:` addresses be hex-encoded?
    hex_encode: bool,
    /// Should labels be obfuscated?
    obfuscate: bool,
}

impl EmailDetector {
    pub fn new(hex_encode: bool, obfuscate: bool) -> Self {
        Self { hex_encode, obfuscate }
    }

    pub fn hex_encode(&self) -> bool {
        self.hex_encode
    }

    pub fn obfuscate(&self) -> bool {
        self.obfuscate
    }

    fn link_match(&self, start: usize, end: usize, email_address: &str) -> LinkMatch {
        let target = if self.hex_encode {
            hex_encode_email_address(email_address)
        } else {
            email_address.to_string()
        };
        let label = if self.obfuscate {
            obfuscate_email_address(email_address)
        } else {
            email_address.to_string()
        };
        LinkMatch {
            kind: LinkKind::Email,
            start,
            end,
            matched: email_address.to_string(),
            href: format!("{}{}", MAILTO, target),
            title: None,
            label,
        }
    }
}

impl Default for EmailDetector {
    fn default() -> Self {
        Self::new(true, true)
    }
}

impl Detector for EmailDetector {
    fn name(&self) -> &str {
        "email"
    }

    fn find_matches(&self, text: &str) -> Vec<LinkMatch> {
        let mut matches = Vec::new();
        let mut search_from = 0usize;

        while let Some(candidate) = VALID_EMAIL_ADDRESS_ML.find_at(text, search_from) {
            let start = candidate.start();
            let preceded_by_boundary = text[..start].chars().next_back().map_or(true, is_email_boundary);
            if !preceded_by_boundary {
                // Only a position right after whitespace can start an address.
                match text[start..].find(is_email_boundary) {
                    Some(offset) => {
                        search_from = start + offset + 1;
                        continue;
                    }
                    None => break,
                }
            }

            search_from = candidate.end();
            let email_address = candidate.as_str();
            if !email_address.is_ascii() {
                log_rejected_candidate_debug(self.name(), LinkKind::Email, email_address, "not ASCII");
                continue;
            }
            matches.push(self.link_match(start, candidate.end(), email_address));
        }
        matches
    }
}
