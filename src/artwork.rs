//! Site-relative paths for card artwork.
//!
//! Artwork lives at `cards/<id>.avif` in the content root and is copied to the
//! same place in the output. Every URL the site emits goes through
//! [`with_base`] so the wiki can be served from a sub-path (`/wiki/`).
//!
//! Missing artwork is not an error here. Pages point at the placeholder
//! instead; see the generate stage.

/// Artwork directory, relative to both the content root and the output root.
pub const ARTWORK_DIR: &str = "cards";
pub const ARTWORK_EXTENSION: &str = "avif";
pub const PLACEHOLDER: &str = "placeholder.avif";

/// Normalize a configured base to the `/segment/` form.
///
/// `""`, `"/"` → `"/"`; `"wiki"`, `"/wiki"`, `"wiki/"` → `"/wiki/"`.
pub fn normalize_base(base: &str) -> String {
    let trimmed = base.trim().trim_matches('/');
    if trimmed.is_empty() {
        "/".to_string()
    } else {
        format!("/{trimmed}/")
    }
}

/// Prefix a site-relative path with the base.
pub fn with_base(base: &str, path: &str) -> String {
    format!("{}{}", normalize_base(base), path.trim_start_matches('/'))
}

/// Artwork file for a card, relative to the content (and output) root.
pub fn artwork_file(id: &str) -> String {
    format!("{ARTWORK_DIR}/{id}.{ARTWORK_EXTENSION}")
}

/// URL of a card's artwork, or of the placeholder when there is no id.
///
/// A blank id counts as no id.
pub fn card_image_path(base: &str, id: Option<&str>) -> String {
    match id.map(str::trim).filter(|id| !id.is_empty()) {
        Some(id) => with_base(base, &artwork_file(id)),
        None => placeholder_image_path(base),
    }
}

pub fn placeholder_image_path(base: &str) -> String {
    with_base(base, PLACEHOLDER)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn image_path_for_id() {
        let path = card_image_path("/", Some("042"));
        assert_eq!(path, "/cards/042.avif");
        assert!(path.ends_with("cards/042.avif"));
    }

    #[test]
    fn image_path_without_id_is_placeholder() {
        let path = card_image_path("/", None);
        assert_eq!(path, "/placeholder.avif");
        assert!(path.ends_with("placeholder.avif"));
    }

    #[test]
    fn blank_id_is_placeholder() {
        assert_eq!(card_image_path("/", Some("  ")), "/placeholder.avif");
    }

    #[test]
    fn image_path_respects_sub_path_base() {
        assert_eq!(card_image_path("/wiki/", Some("7")), "/wiki/cards/7.avif");
        assert_eq!(placeholder_image_path("/wiki/"), "/wiki/placeholder.avif");
    }

    #[test]
    fn base_forms_are_normalized() {
        assert_eq!(normalize_base(""), "/");
        assert_eq!(normalize_base("/"), "/");
        assert_eq!(normalize_base("wiki"), "/wiki/");
        assert_eq!(normalize_base("/wiki"), "/wiki/");
        assert_eq!(normalize_base("wiki/"), "/wiki/");
        assert_eq!(normalize_base("/a/b/"), "/a/b/");
    }

    #[test]
    fn with_base_avoids_double_slashes() {
        assert_eq!(with_base("/wiki/", "/card/1.html"), "/wiki/card/1.html");
        assert_eq!(with_base("/", ""), "/");
    }

    #[test]
    fn artwork_file_is_relative() {
        assert_eq!(artwork_file("001"), "cards/001.avif");
    }
}
