// autolink-core/src/detectors/mention.rs
//! A `Detector` that turns `@username` mentions into links to a profile page.
//!
//! The profile URL is built from a template with a single `{username}`
//! placeholder, e.g. `https://twitter.com/{username}`.
//!
//! License: MIT OR APACHE 2.0

use tinytemplate::TinyTemplate;

use crate::detector::Detector;
use crate::errors::AutolinkError;
use crate::link_match::{log_rejected_candidate_debug, LinkKind, LinkMatch};
use crate::patterns::{is_invalid_mention_end, GROUP_AT, GROUP_USERNAME, VALID_MENTION};

/// Profile URL template used when none is configured.
pub const DEFAULT_PROFILE_URL_TEMPLATE: &str = "https://twitter.com/{username}";

const TEMPLATE_NAME: &str = "profile_url";
const USERNAME_PLACEHOLDER: &str = "{username}";
// Rendered in place of the username to find where usernames go.
const USERNAME_SENTINEL: &str = "\u{0}";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MentionDetector {
    profile_url_template: String,
    /// The rendered template, split where the username goes.
    profile_url_parts: Vec<String>,
}

impl MentionDetector {
    /// Creates a mention detector linking to `profile_url_template`.
    ///
    /// The template is parsed and rendered once, here, so a broken template
    /// fails at construction and matching only has to join the parts.
    pub fn new(profile_url_template: impl Into<String>) -> Result<Self, AutolinkError> {
        let profile_url_template = profile_url_template.into();
        let rendered = render_template(&profile_url_template, USERNAME_SENTINEL)?;
        Ok(Self {
            profile_url_parts: rendered.split(USERNAME_SENTINEL).map(str::to_string).collect(),
            profile_url_template,
        })
    }

    pub fn profile_url_template(&self) -> &str {
        &self.profile_url_template
    }

    fn profile_url(&self, username: &str) -> String {
        self.profile_url_parts.join(username)
    }
}

fn render_template(template: &str, username: &str) -> Result<String, AutolinkError> {
    let mut tt = TinyTemplate::new();
    tt.set_default_formatter(&tinytemplate::format_unescaped);
    tt.add_template(TEMPLATE_NAME, template)
        .map_err(|e| AutolinkError::Template(format!("'{}': {}", template, e)))?;
    let ctx = serde_json::json!({ "username": username });
    tt.render(TEMPLATE_NAME, &ctx)
        .map_err(|e| AutolinkError::Template(format!("'{}': {}", template, e)))
}

impl Default for MentionDetector {
    fn default() -> Self {
        Self {
            profile_url_template: DEFAULT_PROFILE_URL_TEMPLATE.to_string(),
            profile_url_parts: DEFAULT_PROFILE_URL_TEMPLATE
                .split(USERNAME_PLACEHOLDER)
                .map(str::to_string)
                .collect(),
        }
    }
}

impl Detector for MentionDetector {
    fn name(&self) -> &str {
        "mention"
    }

    fn find_matches(&self, text: &str) -> Vec<LinkMatch> {
        let mut matches = Vec::new();
        for caps in VALID_MENTION.captures_iter(text) {
            let (Some(at), Some(username)) = (caps.name(GROUP_AT), caps.name(GROUP_USERNAME)) else {
                continue;
            };
            let candidate = &text[at.start()..username.end()];
            if is_invalid_mention_end(&text[username.end()..]) {
                log_rejected_candidate_debug(self.name(), LinkKind::Mention, candidate, "invalid end");
                continue;
            }

            let href = self.profile_url(username.as_str());
            matches.push(LinkMatch {
                kind: LinkKind::Mention,
                start: at.start(),
                end: username.end(),
                matched: candidate.to_string(),
                href,
                title: None,
                label: format!("@{}", username.as_str()),
            });
        }
        matches
    }
}
