//! Whitespace rules for form input.
//!
//! Form fields count the byte order mark (U+FEFF) as whitespace and do not
//! count NEXT LINE (U+0085). Everything else follows Unicode `White_Space`.

/// Whether `c` is whitespace in a form field.
#[must_use]
pub fn is_whitespace(c: char) -> bool {
    c == '\u{FEFF}' || (c != '\u{0085}' && c.is_whitespace())
}

/// `s` with leading and trailing [`is_whitespace`] characters removed.
#[must_use]
pub fn trim(s: &str) -> &str {
    s.trim_matches(is_whitespace)
}

/// Whether `s` is empty once trimmed.
#[must_use]
pub fn is_blank(s: &str) -> bool {
    trim(s).is_empty()
}
