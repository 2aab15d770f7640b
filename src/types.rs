//! Shared types serialized between the scan and generate stages.

use serde::{Deserialize, Serialize};

/// A page generated from a markdown file in the content root.
///
/// Numbered files (`NNN-slug.md`) appear in navigation, sorted by number.
/// If the file content is just a URL, the page becomes an external link.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page {
    /// First `# heading` in the markdown, or the label as fallback
    pub title: String,
    /// Navigation label derived from the filename
    pub label: String,
    /// URL slug; the page is written to `<slug>.html`
    pub slug: String,
    /// Source filename relative to the content root
    pub source: String,
    /// Raw markdown content
    pub body: String,
    /// Number prefix. `None` keeps the page out of navigation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order: Option<u32>,
    /// External URL for link-only pages
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
}

impl Page {
    pub fn in_nav(&self) -> bool {
        self.order.is_some()
    }
}

/// Top-level navigation entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NavItem {
    pub title: String,
    /// Site-relative path (`""` for home, `rulings.html`), or an absolute URL
    /// when `external` is set.
    pub path: String,
    #[serde(default, skip_serializing_if = "is_false")]
    pub external: bool,
}

fn is_false(value: &bool) -> bool {
    !*value
}
