// autolink-core/src/service.rs
//! The `AutoLinkService`: parses an HTML fragment, applies every configured
//! detector in order and serializes the result.
//!
//! Each detector runs over the whole body before the next one starts, and
//! since anchors are never visited, later detectors cannot link inside the
//! anchors created by earlier ones.
//!
//! License: MIT OR APACHE 2.0

use std::fmt;
use std::str::FromStr;

use log::debug;

use crate::config::AutolinkConfig;
use crate::detector::Detector;
use crate::dom::Document;
use crate::errors::AutolinkError;
use crate::html::{parse_body_fragment, unescape_benign_entities};
use crate::rewriter::rewrite;

/// The shape `add_links_to` returns its result in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputTarget {
    /// The linked body content, serialized.
    Html,
    /// The linked document tree.
    Document,
}

impl FromStr for OutputTarget {
    type Err = AutolinkError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "html" | "string" => Ok(OutputTarget::Html),
            "document" => Ok(OutputTarget::Document),
            _ => Err(AutolinkError::invalid_argument(format!("Invalid target class: {}", s))),
        }
    }
}

impl fmt::Display for OutputTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputTarget::Html => f.write_str("html"),
            OutputTarget::Document => f.write_str("document"),
        }
    }
}

/// The result of [`AutoLinkService::add_links_to`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Linked {
    Html(Option<String>),
    Document(Document),
}

/// Applies an ordered list of detectors to HTML fragments.
///
/// The service holds no per-call state and can be shared between threads.
pub struct AutoLinkService {
    detectors: Vec<Box<dyn Detector>>,
}

impl AutoLinkService {
    pub fn new(detectors: Vec<Box<dyn Detector>>) -> Self {
        Self { detectors }
    }

    /// Builds a service with the detectors of `config`, in configuration order.
    pub fn from_config(config: &AutolinkConfig) -> Result<Self, AutolinkError> {
        Ok(Self::new(config.build_detectors()?))
    }

    /// Appends a detector that runs after all current ones.
    pub fn with_detector(mut self, detector: impl Detector + 'static) -> Self {
        self.detectors.push(Box::new(detector));
        self
    }

    pub fn detectors(&self) -> &[Box<dyn Detector>] {
        &self.detectors
    }

    /// Links all URLs, email addresses and mentions in `text`.
    ///
    /// `None` stays `None`, and blank text is returned as it is. Anything else
    /// is parsed as a body fragment (resolving against `base_url`) and comes
    /// back as the serialized, trimmed body content.
    pub fn add_links(&self, text: Option<&str>, base_url: Option<&str>) -> Option<String> {
        let text = text?;
        if text.trim().is_empty() {
            return Some(text.to_string());
        }

        let document = self.add_links_to_document(parse_body_fragment(text, base_url.unwrap_or("")));
        let html = document.body().inner_html();
        Some(unescape_benign_entities(html.trim()))
    }

    /// Like [`add_links`](Self::add_links), returning either the serialized
    /// content or the linked document.
    ///
    /// In document mode, missing or blank text yields an empty document.
    pub fn add_links_to(
        &self,
        text: Option<&str>,
        base_url: Option<&str>,
        target: OutputTarget,
    ) -> Result<Linked, AutolinkError> {
        debug!("Adding links with target '{}'.", target);
        Ok(match target {
            OutputTarget::Html => Linked::Html(self.add_links(text, base_url)),
            OutputTarget::Document => {
                let base_uri = base_url.unwrap_or("");
                match text {
                    Some(text) if !text.trim().is_empty() => {
                        Linked::Document(self.add_links_to_document(parse_body_fragment(text, base_uri)))
                    }
                    _ => Linked::Document(Document::create_shell(base_uri)),
                }
            }
        })
    }

    /// Runs every detector, in order, over the body of an existing document.
    pub fn add_links_to_document(&self, mut document: Document) -> Document {
        for detector in &self.detectors {
            debug!("Applying detector '{}'.", detector.name());
            let body = rewrite(detector.as_ref(), document.body());
            document.replace_body(body);
        }
        document
    }
}

impl Default for AutoLinkService {
    /// Email, mention and url detectors with their default options.
    fn default() -> Self {
        Self::new(vec![
            Box::new(crate::detectors::EmailDetector::default()),
            Box::new(crate::detectors::MentionDetector::default()),
            Box::new(crate::detectors::UrlDetector::default()),
        ])
    }
}

impl fmt::Debug for AutoLinkService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.detectors.iter().map(|d| d.name()).collect();
        f.debug_struct("AutoLinkService").field("detectors", &names).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::link_match::{LinkKind, LinkMatch};

    /// Links every occurrence of a fixed word.
    struct Word(&'static str);

    impl Detector for Word {
        fn name(&self) -> &str {
            self.0
        }

        fn find_matches(&self, text: &str) -> Vec<LinkMatch> {
            text.match_indices(self.0)
                .map(|(start, matched)| LinkMatch {
                    kind: LinkKind::Url,
                    start,
                    end: start + matched.len(),
                    matched: matched.to_string(),
                    href: "#".to_string(),
                    title: None,
                    label: "THELINK!".to_string(),
                })
                .collect()
        }
    }

    fn service() -> AutoLinkService {
        AutoLinkService::new(vec![]).with_detector(Word("linkme")).with_detector(Word("meToo"))
    }

    #[test]
    fn text_without_matches_is_unchanged() {
        assert_eq!(
            service().add_links(Some("Einfach nur so ein Text"), None).as_deref(),
            Some("Einfach nur so ein Text")
        );
    }

    #[test]
    fn all_detectors_are_applied() {
        assert_eq!(
            service().add_links(Some("Einfach nur linkme so ein Text und meToo."), None).as_deref(),
            Some("Einfach nur <a href=\"#\">THELINK!</a> so ein Text und <a href=\"#\">THELINK!</a>.")
        );
    }

    #[test]
    fn missing_and_blank_text_pass_through() {
        let service = service();
        assert_eq!(service.add_links(None, None), None);
        assert_eq!(service.add_links(Some(""), None).as_deref(), Some(""));
        assert_eq!(service.add_links(Some("\t"), None).as_deref(), Some("\t"));
        assert_eq!(service.add_links(Some(" "), None).as_deref(), Some(" "));
    }

    #[test]
    fn output_is_trimmed() {
        assert_eq!(
            service().add_links(Some("  <p>linkme</p>\n"), None).as_deref(),
            Some("<p><a href=\"#\">THELINK!</a></p>")
        );
    }

    #[test]
    fn output_target_from_str() {
        assert_eq!("html".parse::<OutputTarget>().unwrap(), OutputTarget::Html);
        assert_eq!("String".parse::<OutputTarget>().unwrap(), OutputTarget::Html);
        assert_eq!("document".parse::<OutputTarget>().unwrap(), OutputTarget::Document);

        let err = "xml".parse::<OutputTarget>().unwrap_err();
        assert!(matches!(err, AutolinkError::InvalidArgument(_)));
        assert_eq!(err.to_string(), "Invalid target class: xml");
    }

    #[test]
    fn document_target_for_blank_text_is_an_empty_shell() {
        let linked = service()
            .add_links_to(Some("   "), Some("http://example.com"), OutputTarget::Document)
            .unwrap();
        assert_eq!(linked, Linked::Document(Document::create_shell("http://example.com")));
        let linked = service().add_links_to(None, None, OutputTarget::Document).unwrap();
        assert_eq!(linked, Linked::Document(Document::create_shell("")));
    }

    #[test]
    fn document_target_returns_linked_tree() {
        let Linked::Document(document) = service()
            .add_links_to(Some("<p>linkme</p>"), Some("http://example.com"), OutputTarget::Document)
            .unwrap()
        else {
            panic!("expected a document");
        };
        assert_eq!(document.base_uri(), "http://example.com");
        assert_eq!(document.body().inner_html(), "<p><a href=\"#\">THELINK!</a></p>");
    }

    #[test]
    fn html_target_matches_add_links() {
        let service = service();
        assert_eq!(
            service.add_links_to(Some("linkme"), None, OutputTarget::Html).unwrap(),
            Linked::Html(service.add_links(Some("linkme"), None))
        );
    }

    #[test]
    fn debug_lists_detector_names() {
        assert_eq!(
            format!("{:?}", service()),
            "AutoLinkService { detectors: [\"linkme\", \"meToo\"] }"
        );
    }
}
