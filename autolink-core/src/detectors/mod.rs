// autolink-core/src/detectors/mod.rs
//! This module contains the built-in detector implementations.
//!
//! Each detector is a separate file within this directory and implements the
//! `Detector` trait:
//!
//! * `url`: plain text URLs, with or without protocol.
//! * `email`: RFC 822 email addresses, optionally hex-encoded and obfuscated.
//! * `mention`: `@username` handles linked to a profile URL.
//!
//! License: MIT OR APACHE 2.0

pub mod email;
pub mod mention;
pub mod url;

pub use email::EmailDetector;
pub use mention::MentionDetector;
pub use url::UrlDetector;
