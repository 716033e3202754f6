//! patterns.rs - The detection grammars and their compilation.
//!
//! All grammars are compiled once into process-wide statics. The `regex` crate
//! has no look-around, so the boundary rules that need it are split between the
//! pattern (what is consumed) and small checks in code:
//!
//! * email: the "preceded by whitespace or start of text" rule is checked by
//!   the email detector against the byte before the match.
//! * mention: the "not followed by another at sign, an accented letter or
//!   `://`" rule is [`is_invalid_mention_end`].
//! * url: the domain label look-ahead is expressed as `label([.-]label)*`.
//!
//! License: MIT OR APACHE 2.0

use lazy_static::lazy_static;
use log::debug;
use regex::{Regex, RegexBuilder};

use crate::errors::AutolinkError;

/// Upper bound for the compiled size of a single grammar.
const PATTERN_SIZE_LIMIT: usize = 10 * (1 << 20);

// RFC 822 address grammar. Originally written by Cal Henderson, later
// translated to Ruby by Tim Fletcher with changes suggested by Dan Kubb.
const EMAIL_ATOM: &str =
    r"[^\x00-\x20\x22\x28\x29\x2c\x2e\x3a-\x3c\x3e\x40\x5b-\x5d\x7f-\xff]+";
const EMAIL_QUOTED_STRING: &str = r"\x22(?:[^\x0d\x22\x5c\x80-\xff]|\x5c[\x00-\x7f])*\x22";
const EMAIL_DOMAIN_LITERAL: &str = r"\x5b(?:[^\x0d\x5b-\x5d\x80-\xff]|\x5c[\x00-\x7f])*\x5d";

// URL grammar, based on the twitter-text extraction patterns (Apache License 2.0).
// The grammars are ASCII-biased: `(?i)` must not fold `ſ` into `s` or the
// Kelvin sign into `k`, so ASCII classes are written with `(?-u:...)` or with
// both cases spelled out under `(?-i:...)`.
const URL_PRECEDING_CHARS: &str = r#"(?:(?-i:[^\-/"':!=A-Za-z0-9_@＠])+|^|:)"#;
const URL_PROTOCOL: &str = r"(?-u:https?://)";
// Punctuation and ASCII whitespace (`[ \t\n\x0B\f\r]`) end a label; a no-break space does not.
const URL_DOMAIN_LABEL: &str = r"[^[:punct:] \t\n\x0B\x0C\r]+";
const URL_TLD: &str = r"(?-u:[a-z]){2,}";
const URL_GENERAL_PATH_CHARS: &str = r"(?-u:[a-z0-9!*';:=+$/%#\[\]\-_,~])";
const URL_PATH_ENDING_CHARS: &str = r"(?-u:[a-z0-9=_#/])";
const URL_QUERY_CHARS: &str = r"(?-u:[a-z0-9!*'();:&=+$/%#\[\]\-_.,~])";
const URL_QUERY_ENDING_CHARS: &str = r"(?-u:[a-z0-9_&=#/])";

// Mention grammar, based on the twitter-text extraction patterns.
const AT_SIGNS: &str = "[@＠]";
const MENTION_PRECEDING_CHARS: &str =
    r"(?:(?-i:[^a-zA-Z0-9_!#$%&*@＠])|^|(?:^|(?-i:[^a-zA-Z0-9_+~.\-]))(?-u:RT):?)";
const MENTION_USERNAME: &str = r"(?-u:[a-z0-9_]){1,20}";
const LATIN_ACCENTS: &str = "\u{00c0}-\u{00d6}\u{00d8}-\u{00f6}\u{00f8}-\u{00ff}\u{0100}-\u{024f}\
    \u{0253}\u{0254}\u{0256}\u{0257}\u{0259}\u{025b}\u{0263}\u{0268}\u{026f}\u{0272}\u{0289}\u{028b}\
    \u{02bb}\u{0300}-\u{036f}\u{1e00}-\u{1eff}";

/// Named capture group holding the boundary run before a URL or mention.
pub const GROUP_BEFORE: &str = "before";
/// Named capture group holding the complete URL (protocol included, if any).
pub const GROUP_URL: &str = "url";
/// Named capture group holding the URL protocol, e.g. `https://`.
pub const GROUP_PROTOCOL: &str = "protocol";
/// Named capture group holding the at sign(s) of a mention.
pub const GROUP_AT: &str = "at";
/// Named capture group holding the username of a mention.
pub const GROUP_USERNAME: &str = "username";

/// Compiles a grammar with the size limit applied to every built-in pattern.
pub fn compile_pattern(name: &str, pattern: &str) -> Result<Regex, AutolinkError> {
    debug!("Compiling pattern '{}' ({} bytes).", name, pattern.len());
    RegexBuilder::new(pattern)
        .size_limit(PATTERN_SIZE_LIMIT)
        .build()
        .map_err(|e| AutolinkError::PatternCompilation(name.to_string(), e))
}

fn email_address_pattern() -> String {
    let word = format!("(?:{EMAIL_ATOM}|{EMAIL_QUOTED_STRING})");
    let sub_domain = format!("(?:{EMAIL_ATOM}|{EMAIL_DOMAIN_LITERAL})");
    format!(r"{word}(?:\x2e{word})*\x40{sub_domain}(?:\x2e{sub_domain})*")
}

fn url_pattern() -> String {
    let domain = format!(
        r"{URL_DOMAIN_LABEL}(?:[.\-]{URL_DOMAIN_LABEL})*\.{URL_TLD}(?::[0-9]+)?"
    );
    // Balanced parens, as in Wikipedia paths like /Primer_(film) or IIS sessions like /S(dfd346)/
    let balanced_parens = format!(r"(?:\({URL_GENERAL_PATH_CHARS}+\))");
    let path_chars = format!(
        r"(?:{balanced_parens}|@{URL_GENERAL_PATH_CHARS}+/|[.,]?{URL_GENERAL_PATH_CHARS}+)"
    );
    // A valid last character, so /foo. does not gobble the period
    let path_ending = format!(r"(?:{URL_PATH_ENDING_CHARS}+|{balanced_parens})");
    let path = format!(
        r"/(?:{path_chars}+{path_ending}|{path_chars}+{path_ending}?|{path_ending})?"
    );
    let query = format!(r"\?{URL_QUERY_CHARS}*{URL_QUERY_ENDING_CHARS}");

    format!(
        r"(?ims)(?P<{GROUP_BEFORE}>{URL_PRECEDING_CHARS})(?P<{GROUP_URL}>(?P<{GROUP_PROTOCOL}>{URL_PROTOCOL})?{domain}(?:{path})?(?:{query})?)"
    )
}

fn mention_pattern() -> String {
    format!(
        r"(?i)(?P<{GROUP_BEFORE}>{MENTION_PRECEDING_CHARS})(?P<{GROUP_AT}>{AT_SIGNS}+)(?P<{GROUP_USERNAME}>{MENTION_USERNAME})"
    )
}

fn builtin(name: &str, pattern: &str) -> Regex {
    compile_pattern(name, pattern)
        .unwrap_or_else(|e| panic!("built-in pattern must compile: {e}"))
}

lazy_static! {
    /// A complete email address, anchored at both ends.
    pub static ref VALID_EMAIL_ADDRESS: Regex =
        builtin("email_address", &format!(r"\A{}\z", email_address_pattern()));

    /// Email addresses anywhere in a (possibly multi-line) text.
    pub static ref VALID_EMAIL_ADDRESS_ML: Regex =
        builtin("email_address_ml", &format!("(?m){}", email_address_pattern()));

    /// URLs with or without protocol, together with the boundary run before them.
    pub static ref VALID_URL: Regex = builtin("url", &url_pattern());

    /// `@username` mentions, together with the boundary text before them.
    pub static ref VALID_MENTION: Regex = builtin("mention", &mention_pattern());

    static ref INVALID_MENTION_MATCH_END: Regex =
        builtin("mention_end", &format!(r"\A(?:[@＠{LATIN_ACCENTS}]|://)"));
}

/// Returns `true` if the text directly after a mention candidate shows that
/// the candidate is part of something else (an address, a URL, a word).
pub fn is_invalid_mention_end(rest: &str) -> bool {
    INVALID_MENTION_MATCH_END.is_match(rest)
}

/// ASCII whitespace as understood by the email boundary rule.
pub fn is_email_boundary(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n' | '\x0B' | '\x0C' | '\r')
}
