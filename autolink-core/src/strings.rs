// File: autolink-core/src/strings.rs
//! Text utilities shared by the detectors.
//!
//! * Codepoint-aware truncation of anchor labels.
//! * Email address transforms: percent-hex encoding for `mailto:` targets and
//!   textual obfuscation for visible labels.
//! * Strict, whole-string validation of email addresses.
//!
//! License: MIT OR APACHE 2.0

use std::borrow::Cow;

use crate::errors::AutolinkError;
use crate::patterns::VALID_EMAIL_ADDRESS;

/// The ellipsis appended by [`truncate`]: a single horizontal ellipsis glyph.
pub const DEFAULT_ELLIPSIS: &str = "\u{2026}";

const AT_REPLACEMENT: &str = " [AT] ";
const DOT_REPLACEMENT: &str = " [DOT] ";

/// Truncates `text` to at most `max_length` codepoints, using [`DEFAULT_ELLIPSIS`].
///
/// See [`truncate_with`].
pub fn truncate(text: &str, max_length: usize) -> Result<Cow<'_, str>, AutolinkError> {
    truncate_with(text, max_length, Some(DEFAULT_ELLIPSIS))
}

/// Truncates `text` to a string of at most `max_length` codepoints.
///
/// If an ellipsis is given, its length counts against `max_length`. Lengths are
/// counted in Unicode scalar values, so a character outside the basic
/// multilingual plane is one unit and is never split.
///
/// # Errors
///
/// Returns [`AutolinkError::InvalidArgument`] if the ellipsis alone is longer
/// than `max_length`, even when `text` would not need truncating.
///
/// # Examples
///
/// ```
/// use autolink_core::strings::truncate_with;
///
/// assert_eq!(truncate_with("foobar", 5, Some("...")).unwrap(), "fo...");
/// assert_eq!(truncate_with("12\u{1F44D}45", 4, Some("\u{2026}")).unwrap(), "12\u{1F44D}\u{2026}");
/// ```
pub fn truncate_with<'a>(
    text: &'a str,
    max_length: usize,
    ellipsis: Option<&str>,
) -> Result<Cow<'a, str>, AutolinkError> {
    let ellipsis = ellipsis.unwrap_or("");
    let Some(keep) = max_length.checked_sub(ellipsis.chars().count()) else {
        return Err(AutolinkError::invalid_argument(
            "Cannot truncate string to length < 0",
        ));
    };

    if text.chars().count() <= max_length {
        return Ok(Cow::Borrowed(text));
    }

    let cut = text
        .char_indices()
        .nth(keep)
        .map_or(text.len(), |(index, _)| index);
    let mut truncated = String::with_capacity(cut + ellipsis.len());
    truncated.push_str(&text[..cut]);
    truncated.push_str(ellipsis);
    Ok(Cow::Owned(truncated))
}

/// Hex encodes an email address, leaving the `@` intact.
///
/// The address is lowercased first. Every other byte becomes `%` followed by
/// two lowercase hex digits, which browsers decode inside a `mailto:` target.
pub fn hex_encode_email_address(email_address: &str) -> String {
    let lowercased = email_address.to_lowercase();
    let mut encoded = String::with_capacity(lowercased.len() * 3);
    let mut buf = [0u8; 4];
    for c in lowercased.chars() {
        if c == '@' {
            encoded.push(c);
            continue;
        }
        for byte in c.encode_utf8(&mut buf).bytes() {
            encoded.push('%');
            encoded.push_str(&hex::encode([byte]));
        }
    }
    encoded
}

/// Obfuscates an email address for display.
///
/// The address is lowercased, every `@` (including the fullwidth `＠`) becomes
/// `" [AT] "` and every `.` becomes `" [DOT] "`.
pub fn obfuscate_email_address(email_address: &str) -> String {
    let lowercased = email_address.to_lowercase();
    let mut obfuscated = String::with_capacity(lowercased.len() * 2);
    for c in lowercased.chars() {
        match c {
            '@' | '\u{FF20}' => obfuscated.push_str(AT_REPLACEMENT),
            '.' => obfuscated.push_str(DOT_REPLACEMENT),
            _ => obfuscated.push(c),
        }
    }
    obfuscated
}

/// Returns `true` if the whole of `candidate` is an RFC 822 address.
///
/// This is the anchored form of the grammar the email detector scans with;
/// it does not apply the ASCII-only acceptance rule.
pub fn is_valid_email_address(candidate: &str) -> bool {
    VALID_EMAIL_ADDRESS.is_match(candidate)
}
