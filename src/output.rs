//! CLI output formatting for all pipeline stages.
//!
//! Output is information-centric: each entity leads with its positional index
//! and display name, with file paths shown as indented context lines.
//!
//! ## Scan
//!
//! ```text
//! Cards (4)
//! 001 Unit (2 cards)
//!     001 Rose Knight
//!         Artwork: cards/001.avif
//!     002 Thorn, the Wall
//!         Artwork: cards/002.avif
//! 002 Field (1 card)
//!     001 Blooming Field
//!         Artwork: missing (placeholder)
//!
//! Rulings (3)
//!     001 #1 → Rose Knight
//!
//! Pages
//!     001 About This Wiki
//!         Source: 010-about.md
//!     002 github (link)
//!
//! Config
//!     config.toml
//!     assets/
//! ```
//!
//! ## Generate
//!
//! ```text
//! Home → index.html
//! Cards
//!     001 Rose Knight → card/001.html
//! Rulings → rulings.html
//! Pages
//!     001 About This Wiki → about.html
//!
//! Generated 4 card pages, 1 page, 2 artwork files, 1 asset
//! 2 cards without artwork (placeholder shown)
//! ```
//!
//! Each stage has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout.

use crate::artwork;
use crate::cards::{self, Card};
use crate::generate::{PageKind, SiteReport};
use crate::scan::Manifest;
use std::path::Path;

// ============================================================================
// Shared helpers
// ============================================================================

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

fn plural(n: usize, singular: &str, plural: &str) -> String {
    if n == 1 {
        format!("{n} {singular}")
    } else {
        format!("{n} {plural}")
    }
}

fn card_label(card: &Card) -> &str {
    if card.name.is_empty() {
        &card.id
    } else {
        &card.name
    }
}

// ============================================================================
// Stage 1: Scan output
// ============================================================================

/// Format scan stage output: cards by kind, rulings, pages, config.
pub fn format_scan_output(manifest: &Manifest, source_root: &Path) -> Vec<String> {
    let mut lines = Vec::new();

    lines.push(format!("Cards ({})", manifest.cards.len()));
    for (i, (kind, group)) in cards::group_by_kind(&manifest.cards).iter().enumerate() {
        let kind = if kind.is_empty() { "Other" } else { kind };
        lines.push(format!(
            "{} {} ({})",
            format_index(i + 1),
            kind,
            plural(group.len(), "card", "cards")
        ));
        for (j, card) in group.iter().enumerate() {
            lines.push(format!(
                "{}{} {}",
                indent(1),
                format_index(j + 1),
                card_label(card)
            ));
            let art = if manifest.has_artwork(&card.id) {
                artwork::artwork_file(&card.id)
            } else {
                "missing (placeholder)".to_string()
            };
            lines.push(format!("{}Artwork: {}", indent(2), art));
        }
    }

    if !manifest.rulings.is_empty() {
        lines.push(String::new());
        lines.push(format!("Rulings ({})", manifest.rulings.len()));
        for (i, ruling) in manifest.rulings.iter().enumerate() {
            let target = match cards::find_card(&manifest.cards, &ruling.card) {
                Some(card) => card_label(card).to_string(),
                None => format!("{} (no such card)", ruling.card),
            };
            lines.push(format!(
                "{}{} #{} → {}",
                indent(1),
                format_index(i + 1),
                ruling.id,
                target
            ));
        }
    }

    if !manifest.pages.is_empty() {
        lines.push(String::new());
        lines.push("Pages".to_string());
        for (i, page) in manifest.pages.iter().enumerate() {
            let link_marker = if page.link.is_some() { " (link)" } else { "" };
            let hidden_marker = if page.in_nav() { "" } else { " (hidden)" };
            lines.push(format!(
                "{}{} {}{}{}",
                indent(1),
                format_index(i + 1),
                page.title,
                link_marker,
                hidden_marker
            ));
            lines.push(format!("{}Source: {}", indent(2), page.source));
        }
    }

    lines.push(String::new());
    lines.push("Config".to_string());
    if source_root.join("config.toml").exists() {
        lines.push(format!("{}config.toml", indent(1)));
    }
    if source_root.join(&manifest.config.assets_dir).is_dir() {
        lines.push(format!("{}{}/", indent(1), manifest.config.assets_dir));
    }

    lines
}

/// Print scan output to stdout.
pub fn print_scan_output(manifest: &Manifest, source_root: &Path) {
    for line in format_scan_output(manifest, source_root) {
        println!("{}", line);
    }
}

// ============================================================================
// Stage 2: Generate output
// ============================================================================

/// Format generate stage output: every written page, then a summary line.
pub fn format_generate_output(report: &SiteReport) -> Vec<String> {
    let mut lines = Vec::new();

    for page in report.pages.iter().filter(|p| p.kind == PageKind::Home) {
        lines.push(format!("Home → {}", page.path));
    }

    let card_pages: Vec<_> = report
        .pages
        .iter()
        .filter(|p| p.kind == PageKind::Card)
        .collect();
    if !card_pages.is_empty() {
        lines.push("Cards".to_string());
        for (i, page) in card_pages.iter().enumerate() {
            lines.push(format!(
                "{}{} {} → {}",
                indent(1),
                format_index(i + 1),
                page.title,
                page.path
            ));
        }
    }

    for page in report.pages.iter().filter(|p| p.kind == PageKind::Rulings) {
        lines.push(format!("Rulings → {}", page.path));
    }

    let content_pages: Vec<_> = report
        .pages
        .iter()
        .filter(|p| p.kind == PageKind::Content)
        .collect();
    if !content_pages.is_empty() {
        lines.push("Pages".to_string());
        for (i, page) in content_pages.iter().enumerate() {
            lines.push(format!(
                "{}{} {} → {}",
                indent(1),
                format_index(i + 1),
                page.title,
                page.path
            ));
        }
    }

    lines.push(String::new());
    lines.push(format!(
        "Generated {}, {}, {}, {}",
        plural(card_pages.len(), "card page", "card pages"),
        plural(content_pages.len(), "page", "pages"),
        plural(report.artwork_files, "artwork file", "artwork files"),
        plural(report.asset_files, "asset", "assets"),
    ));
    if report.placeholders > 0 {
        lines.push(format!(
            "{} without artwork (placeholder shown)",
            plural(report.placeholders, "card", "cards")
        ));
    }

    lines
}

/// Print generate output to stdout.
pub fn print_generate_output(report: &SiteReport) {
    for line in format_generate_output(report) {
        println!("{}", line);
    }
}

// ============================================================================
// Check output
// ============================================================================

/// Format a content health report: artwork coverage and unresolved rulings.
///
/// Neither problem fails a build; they are listed so they can be fixed.
pub fn format_check_output(manifest: &Manifest) -> Vec<String> {
    let mut lines = Vec::new();

    let missing: Vec<&Card> = manifest
        .cards
        .iter()
        .filter(|c| !manifest.has_artwork(&c.id))
        .collect();
    lines.push(format!(
        "Artwork: {}/{} cards",
        manifest.cards.len() - missing.len(),
        manifest.cards.len()
    ));
    for card in &missing {
        lines.push(format!(
            "{}missing: {} ({})",
            indent(1),
            artwork::artwork_file(&card.id),
            card_label(card)
        ));
    }

    let unresolved = manifest.unresolved_rulings();
    lines.push(format!(
        "Rulings: {} ({} unresolved)",
        manifest.rulings.len(),
        unresolved.len()
    ));
    for ruling in unresolved {
        lines.push(format!(
            "{}#{} refers to unknown card {:?}",
            indent(1),
            ruling.id,
            ruling.card
        ));
    }

    lines
}

/// Print check output to stdout.
pub fn print_check_output(manifest: &Manifest) {
    for line in format_check_output(manifest) {
        println!("{}", line);
    }
}
