//! Content scanning and manifest generation.
//!
//! Stage 1 of the build pipeline. Reads the content directory and produces a
//! [`Manifest`] that the generate stage consumes.
//!
//! ## Directory Structure
//!
//! ```text
//! content/
//! ├── config.toml          # Site configuration (optional)
//! ├── cards.csv            # Card list (required)
//! ├── rulings.csv          # Rulings (optional)
//! ├── placeholder.avif     # Shown for cards without artwork
//! ├── cards/
//! │   ├── 001.avif         # Artwork, named by card id
//! │   └── 002.avif
//! ├── assets/              # Copied verbatim to the output root
//! ├── 010-about.md         # Page (numbered = appears in nav)
//! ├── 090-github.md        # External link page (URL-only content)
//! └── notes.md             # Unnumbered = generated, hidden from nav
//! ```
//!
//! ## Validation
//!
//! - The card file must exist and parse; any CSV error fails the scan.
//! - Card ids must be unique (they become page and artwork filenames).
//! - Page slugs may not collide with generated pages (`index`, `rulings`).
//!
//! Cards without artwork are recorded, not rejected: the generate stage
//! points them at the placeholder.

use crate::artwork;
use crate::cards::{self, Card, Ruling};
use crate::config::{self, SiteConfig};
use crate::csv::{self, CsvError};
use crate::naming::parse_page_name;
use crate::types::{NavItem, Page};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashSet};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Config error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("Card data not found: {}", .0.display())]
    MissingData(PathBuf),
    #[error("{}: {source}", .file.display())]
    Csv { file: PathBuf, source: CsvError },
    #[error("Duplicate card id {id:?} in {}", .file.display())]
    DuplicateCard { id: String, file: PathBuf },
    #[error("{}: Line {line}: invalid card id {id:?}: {reason}", .file.display())]
    InvalidCardId {
        id: String,
        file: PathBuf,
        line: usize,
        reason: &'static str,
    },
    #[error("Page slug {0:?} collides with a generated page")]
    ReservedSlug(String),
}

/// Slugs the generate stage writes itself.
const RESERVED_SLUGS: &[&str] = &["index", "rulings"];

/// Manifest output from the scan stage
#[derive(Debug, Serialize, Deserialize)]
pub struct Manifest {
    pub navigation: Vec<NavItem>,
    pub cards: Vec<Card>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub rulings: Vec<Ruling>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub pages: Vec<Page>,
    /// Ids of cards that have an artwork file.
    #[serde(default)]
    pub artwork: BTreeSet<String>,
    pub config: SiteConfig,
}

impl Manifest {
    pub fn has_artwork(&self, card_id: &str) -> bool {
        self.artwork.contains(card_id)
    }

    /// Rulings whose card reference matches no card.
    pub fn unresolved_rulings(&self) -> Vec<&Ruling> {
        self.rulings
            .iter()
            .filter(|r| cards::find_card(&self.cards, &r.card).is_none())
            .collect()
    }
}

pub fn scan(root: &Path) -> Result<Manifest, ScanError> {
    let config = config::load_config(root)?;

    let cards = load_cards(&root.join(&config.data.cards))?;
    let rulings = load_rulings(&root.join(&config.data.rulings))?;
    let pages = parse_pages(root)?;
    let artwork = scan_artwork(root, &cards);
    let navigation = build_navigation(&rulings, &pages);

    Ok(Manifest {
        navigation,
        cards,
        rulings,
        pages,
        artwork,
        config,
    })
}

fn read_data(path: &Path) -> Result<Option<String>, ScanError> {
    if !path.is_file() {
        return Ok(None);
    }
    Ok(Some(fs::read_to_string(path)?))
}

fn load_cards(path: &Path) -> Result<Vec<Card>, ScanError> {
    let text = read_data(path)?.ok_or_else(|| ScanError::MissingData(path.to_path_buf()))?;
    let numbered = csv::parse_numbered::<Card>(&text).map_err(|source| ScanError::Csv {
        file: path.to_path_buf(),
        source,
    })?;

    let mut seen = HashSet::new();
    for (line, card) in &numbered {
        if let Some(reason) = card_id_problem(&card.id) {
            return Err(ScanError::InvalidCardId {
                id: card.id.clone(),
                file: path.to_path_buf(),
                line: *line,
                reason,
            });
        }
        if !seen.insert(card.id.as_str()) {
            return Err(ScanError::DuplicateCard {
                id: card.id.clone(),
                file: path.to_path_buf(),
            });
        }
    }
    Ok(numbered.into_iter().map(|(_, card)| card).collect())
}

/// Card ids become `card/<id>.html` and `cards/<id>.avif`, so they must be a
/// single path segment that needs no URL escaping.
fn card_id_problem(id: &str) -> Option<&'static str> {
    if id.is_empty() {
        Some("id is empty")
    } else if id == "." || id == ".." {
        Some("id is a relative path segment")
    } else if id.contains(['/', '\\']) {
        Some("id contains a path separator")
    } else if id.chars().any(char::is_control) {
        Some("id contains a control character")
    } else if id.contains(['#', '?', '%']) {
        Some("id contains a URL-reserved character")
    } else {
        None
    }
}

/// The rulings file is optional; a missing file means no rulings.
fn load_rulings(path: &Path) -> Result<Vec<Ruling>, ScanError> {
    match read_data(path)? {
        Some(text) => cards::parse_rulings(&text).map_err(|source| ScanError::Csv {
            file: path.to_path_buf(),
            source,
        }),
        None => Ok(Vec::new()),
    }
}

fn scan_artwork(root: &Path, cards: &[Card]) -> BTreeSet<String> {
    cards
        .iter()
        .filter(|c| root.join(artwork::artwork_file(&c.id)).is_file())
        .map(|c| c.id.clone())
        .collect()
}

/// Parse all markdown files in the root directory into pages.
fn parse_pages(root: &Path) -> Result<Vec<Page>, ScanError> {
    let mut md_files: Vec<PathBuf> = fs::read_dir(root)?
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| {
            p.is_file()
                && p.extension()
                    .map(|e| e.eq_ignore_ascii_case("md"))
                    .unwrap_or(false)
        })
        .collect();

    md_files.sort();

    let mut pages = Vec::new();
    for md_path in &md_files {
        let stem = md_path
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_default();
        let source = md_path
            .file_name()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_default();

        let name = parse_page_name(&stem);
        if RESERVED_SLUGS.contains(&name.slug.as_str()) {
            return Err(ScanError::ReservedSlug(name.slug));
        }

        let body = fs::read_to_string(md_path)?;
        let trimmed = body.trim();

        // A page whose only content is a URL becomes an external link
        let is_link = !trimmed.contains('\n')
            && (trimmed.starts_with("http://") || trimmed.starts_with("https://"));

        let title = if is_link {
            name.label.clone()
        } else {
            body.lines()
                .find(|line| line.starts_with("# "))
                .map(|line| line.trim_start_matches("# ").trim().to_string())
                .unwrap_or_else(|| name.label.clone())
        };

        pages.push(Page {
            title,
            label: name.label,
            slug: name.slug,
            source,
            link: is_link.then(|| trimmed.to_string()),
            body,
            order: name.order,
        });
    }

    pages.sort_by_key(|p| p.order.unwrap_or(u32::MAX));
    Ok(pages)
}

/// Cards first, rulings when there are any, then numbered pages in order.
fn build_navigation(rulings: &[Ruling], pages: &[Page]) -> Vec<NavItem> {
    let mut nav = vec![NavItem {
        title: "Cards".to_string(),
        path: String::new(),
        external: false,
    }];

    if !rulings.is_empty() {
        nav.push(NavItem {
            title: "Rulings".to_string(),
            path: "rulings.html".to_string(),
            external: false,
        });
    }

    for page in pages.iter().filter(|p| p.in_nav()) {
        nav.push(match &page.link {
            Some(url) => NavItem {
                title: page.label.clone(),
                path: url.clone(),
                external: true,
            },
            None => NavItem {
                title: page.label.clone(),
                path: format!("{}.html", page.slug),
                external: false,
            },
        });
    }

    nav
}
