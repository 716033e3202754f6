// autolink-core/src/lib.rs
//! # Autolink Core Library
//!
//! `autolink-core` turns the plain text URLs, email addresses and `@mentions`
//! inside an HTML fragment into anchors. The fragment is parsed into a tree,
//! each configured detector rewrites the text nodes it finds outside of
//! existing anchors, and the result is serialized again. Markup, comments and
//! existing links are kept as they are.
//!
//! ## Modules
//!
//! * `config`: Defines `AutolinkConfig`, the ordered list of detectors and their options.
//! * `detector`: Defines the `Detector` trait every detector implements.
//! * `detectors`: The built-in url, email and mention detectors.
//! * `dom`: The immutable node tree the detectors operate on.
//! * `html`: Parsing of fragments into the tree and serialization back to markup.
//! * `link_match`: The record of a single match, plus privacy-aware debug logging.
//! * `patterns`: The compiled detection grammars.
//! * `rewriter`: Applies one detector to a subtree.
//! * `service`: `AutoLinkService`, which runs all detectors over a fragment.
//! * `strings`: Label truncation and email address encoding.
//! * `headless`: A one-shot convenience wrapper.
//!
//! ## Public API
//!
//! **Linking**
//!
//! * [`AutoLinkService`]: Applies detectors to text, in order.
//! * [`AutoLinkService::add_links`]: Links a fragment and returns the serialized result.
//! * [`AutoLinkService::add_links_to`]: Returns either markup or the linked [`Document`].
//!
//! **Detectors**
//!
//! * [`Detector`]: A trait for pluggable link detection.
//! * [`UrlDetector`], [`EmailDetector`], [`MentionDetector`]: The built-in detectors.
//!
//! **Configuration**
//!
//! * [`AutolinkConfig::load_from_file`]: Loads detectors from a YAML file.
//! * [`AutolinkConfig::load_default`]: Loads the built-in email, mention, url set.
//!
//! **Headless Mode**
//!
//! * [`headless_add_links`]: Builds a service from a configuration and links one string.
//!
//! ## Usage Example
//!
//! ```rust
//! use autolink_core::{AutoLinkService, AutolinkConfig};
//! use anyhow::Result;
//!
//! fn main() -> Result<()> {
//!     // 1. Build a service from the default detectors.
//!     let config = AutolinkConfig::load_default()?;
//!     let service = AutoLinkService::from_config(&config)?;
//!
//!     // 2. Link a fragment.
//!     let linked = service.add_links(Some("<p>Read heise.de</p>"), None);
//!     assert_eq!(
//!         linked.as_deref(),
//!         Some("<p>Read <a href=\"http://heise.de\" title=\"http://heise.de\">heise.de</a></p>")
//!     );
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! Detectors never fail: text they cannot make sense of stays unlinked. Invalid
//! arguments and configuration problems are reported through [`AutolinkError`],
//! and loading configuration files uses `anyhow::Error` with context.
//!
//! ---
//! License: MIT OR APACHE 2.0

pub mod config;
pub mod detector;
pub mod detectors;
pub mod dom;
pub mod errors;
pub mod headless;
pub mod html;
pub mod link_match;
pub mod patterns;
pub mod rewriter;
pub mod service;
pub mod strings;

/// Re-exports the configuration types.
pub use config::{AutolinkConfig, DetectorConfig};

/// Re-exports the custom error type for clear error reporting.
pub use errors::AutolinkError;

/// Re-exports the detector trait and the built-in detectors.
pub use detector::Detector;
pub use detectors::{EmailDetector, MentionDetector, UrlDetector};

/// Re-exports the tree types.
pub use dom::{Attributes, Document, Element, Node, Other, Text};

pub use html::parse_body_fragment;
pub use link_match::{redact_sensitive, LinkKind, LinkMatch};
pub use rewriter::rewrite;

/// Re-exports the service and its output types.
pub use service::{AutoLinkService, Linked, OutputTarget};

pub use strings::{truncate, truncate_with};

/// Re-exports the one-shot entry point.
pub use headless::headless_add_links;
