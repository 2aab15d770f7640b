//! Filename convention for markdown pages: `NNN-slug.md`.
//!
//! The numeric prefix orders pages in navigation and is stripped from the
//! URL. Pages without a prefix are still generated but stay out of the nav.
//!
//! - `010-about.md` → order 10, slug `about`, label "about"
//! - `020-deck-building.md` → order 20, slug `deck-building`, label "deck building"
//! - `notes.md` → no order, slug `notes`

/// Parsed page file stem.
#[derive(Debug, Clone, PartialEq)]
pub struct PageName {
    /// Number prefix, if any. Present means the page appears in navigation.
    pub order: Option<u32>,
    /// URL slug: the stem with the number prefix stripped.
    pub slug: String,
    /// Navigation label: slug with dashes turned into spaces.
    pub label: String,
}

/// Parse a page file stem following the `NNN-slug` convention.
///
/// A stem that is only a number (`"010"`, `"010-"`) keeps the whole stem as
/// its slug so the page still gets a usable URL.
pub fn parse_page_name(stem: &str) -> PageName {
    let (order, rest) = match stem.split_once('-') {
        Some((prefix, rest)) => match prefix.parse::<u32>() {
            Ok(n) => (Some(n), rest),
            Err(_) => (None, stem),
        },
        None => match stem.parse::<u32>() {
            Ok(n) => (Some(n), ""),
            Err(_) => (None, stem),
        },
    };

    let slug = if rest.is_empty() {
        stem.trim_end_matches('-')
    } else {
        rest
    };

    PageName {
        order,
        slug: slug.to_string(),
        label: slug.replace('-', " "),
    }
}
