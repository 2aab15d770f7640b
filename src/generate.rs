//! HTML site generation.
//!
//! Stage 2 of the build pipeline. Takes the scan manifest and writes the
//! final static site.
//!
//! ## Generated Pages
//!
//! - **Index page** (`/index.html`): every card, grouped by kind
//! - **Card pages** (`/card/{id}.html`): artwork, fields, tags, related rulings
//! - **Rulings page** (`/rulings.html`): all rulings, linked to their cards
//! - **Markdown pages** (`/{slug}.html`): content pages from the content root
//!
//! ## Output Structure
//!
//! ```text
//! dist/
//! ├── index.html
//! ├── rulings.html
//! ├── about.html
//! ├── card/
//! │   ├── 001.html
//! │   └── 002.html
//! ├── cards/                 # Artwork (copied)
//! │   └── 001.avif
//! ├── placeholder.avif       # Copied when present
//! └── robots.txt             # From assets/ (copied)
//! ```
//!
//! ## Missing Artwork
//!
//! The manifest records which cards have artwork. Cards without it reference
//! the placeholder directly. Cards with it also carry an `onerror` handler
//! that swaps in the placeholder, so a file deleted after the scan still
//! renders.
//!
//! ## HTML Generation
//!
//! Uses [maud](https://maud.lambda.xyz/) for compile-time HTML templating.
//! Every URL goes through [`artwork::with_base`] so the site works under a
//! sub-path.

use crate::artwork;
use crate::cards::{self, Card, Ruling};
use crate::config::{self, SiteConfig};
use crate::scan::Manifest;
use crate::types::{NavItem, Page};
use maud::{DOCTYPE, Markup, PreEscaped, html};
use pulldown_cmark::{Parser, html as md_html};
use rayon::prelude::*;
use std::fs;
use std::path::Path;
use thiserror::Error;
use walkdir::WalkDir;

#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Directory walk error: {0}")]
    Walk(#[from] walkdir::Error),
}

/// Directory for card detail pages. Artwork uses `cards/`.
pub const CARD_PAGE_DIR: &str = "card";

const CSS_STATIC: &str = include_str!("../static/style.css");

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageKind {
    Home,
    Card,
    Rulings,
    Content,
}

/// One written HTML file.
#[derive(Debug, Clone)]
pub struct GeneratedPage {
    pub kind: PageKind,
    pub title: String,
    /// Path relative to the output directory.
    pub path: String,
}

/// What the generate stage wrote, for CLI output.
#[derive(Debug, Default)]
pub struct SiteReport {
    pub pages: Vec<GeneratedPage>,
    pub artwork_files: usize,
    pub asset_files: usize,
    /// Card pages that point at the placeholder.
    pub placeholders: usize,
}

impl SiteReport {
    pub fn count(&self, kind: PageKind) -> usize {
        self.pages.iter().filter(|p| p.kind == kind).count()
    }
}

/// File the card list is re-exported to, linked from the index.
pub const CARD_EXPORT: &str = "cards.csv";

/// Read a manifest written by the scan stage.
pub fn load_manifest(path: &Path) -> Result<Manifest, GenerateError> {
    let content = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

/// Shared rendering context: everything a page needs besides its own data.
struct Site<'a> {
    config: &'a SiteConfig,
    navigation: &'a [NavItem],
    css: &'a str,
}

impl Site<'_> {
    fn url(&self, path: &str) -> String {
        artwork::with_base(&self.config.base, path)
    }
}

pub fn card_page_file(id: &str) -> String {
    format!("{CARD_PAGE_DIR}/{id}.html")
}

/// Load the scan manifest at `manifest_path` and render the site.
pub fn generate(
    manifest_path: &Path,
    source_root: &Path,
    output_dir: &Path,
) -> Result<SiteReport, GenerateError> {
    let manifest = load_manifest(manifest_path)?;
    render_site(&manifest, source_root, output_dir)
}

/// Render the whole site into `output_dir`, copying artwork and assets from
/// `source_root`.
pub fn render_site(
    manifest: &Manifest,
    source_root: &Path,
    output_dir: &Path,
) -> Result<SiteReport, GenerateError> {
    let config = &manifest.config;
    let css = format!(
        "{}\n\n{}\n\n{}",
        config::generate_color_css(&config.colors),
        config::generate_theme_css(&config.theme),
        CSS_STATIC
    );
    let site = Site {
        config,
        navigation: &manifest.navigation,
        css: &css,
    };

    fs::create_dir_all(output_dir.join(CARD_PAGE_DIR))?;
    let mut report = SiteReport::default();

    let index_html = render_index(&site, manifest);
    fs::write(output_dir.join("index.html"), index_html.into_string())?;
    report.pages.push(GeneratedPage {
        kind: PageKind::Home,
        title: config.title.clone(),
        path: "index.html".to_string(),
    });

    // Card pages are independent of each other; render them in parallel and
    // write in source order.
    let rendered: Vec<String> = manifest
        .cards
        .par_iter()
        .map(|card| {
            let rulings = cards::rulings_for(&manifest.rulings, card);
            render_card_page(&site, card, &rulings, manifest.has_artwork(&card.id)).into_string()
        })
        .collect();

    for (card, html) in manifest.cards.iter().zip(rendered) {
        let path = card_page_file(&card.id);
        fs::write(output_dir.join(&path), html)?;
        if !manifest.has_artwork(&card.id) {
            report.placeholders += 1;
        }
        report.pages.push(GeneratedPage {
            kind: PageKind::Card,
            title: card.name.clone(),
            path,
        });
    }

    if !manifest.rulings.is_empty() {
        let rulings_html = render_rulings_page(&site, &manifest.rulings, &manifest.cards);
        fs::write(output_dir.join("rulings.html"), rulings_html.into_string())?;
        report.pages.push(GeneratedPage {
            kind: PageKind::Rulings,
            title: "Rulings".to_string(),
            path: "rulings.html".to_string(),
        });
    }

    for page in manifest.pages.iter().filter(|p| p.link.is_none()) {
        let path = format!("{}.html", page.slug);
        let page_html = render_content_page(&site, page);
        fs::write(output_dir.join(&path), page_html.into_string())?;
        report.pages.push(GeneratedPage {
            kind: PageKind::Content,
            title: page.title.clone(),
            path,
        });
    }

    fs::write(
        output_dir.join(CARD_EXPORT),
        cards::write_cards(&manifest.cards),
    )?;

    report.artwork_files = copy_tree(
        &source_root.join(artwork::ARTWORK_DIR),
        &output_dir.join(artwork::ARTWORK_DIR),
    )?;
    let placeholder = source_root.join(artwork::PLACEHOLDER);
    if placeholder.is_file() {
        fs::copy(&placeholder, output_dir.join(artwork::PLACEHOLDER))?;
    }
    report.asset_files = copy_tree(&source_root.join(&config.assets_dir), output_dir)?;

    Ok(report)
}

/// Copy every file under `src` into `dst`, keeping relative paths.
/// A missing `src` copies nothing.
fn copy_tree(src: &Path, dst: &Path) -> Result<usize, GenerateError> {
    if !src.is_dir() {
        return Ok(0);
    }
    let mut copied = 0;
    for entry in WalkDir::new(src).min_depth(1) {
        let entry = entry?;
        let Ok(rel) = entry.path().strip_prefix(src) else {
            continue;
        };
        let target = dst.join(rel);
        if entry.file_type().is_dir() {
            fs::create_dir_all(&target)?;
        } else if entry.file_type().is_file() {
            if let Some(parent) = target.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::copy(entry.path(), &target)?;
            copied += 1;
        }
    }
    Ok(copied)
}

// ============================================================================
// HTML Components
// ============================================================================

/// Renders the base HTML document structure
fn base_document(site: &Site, title: &str, content: Markup) -> Markup {
    let full_title = if title == site.config.title {
        title.to_string()
    } else {
        format!("{} | {}", title, site.config.title)
    };
    html! {
        (DOCTYPE)
        html lang=(site.config.lang) {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                @if !site.config.description.is_empty() {
                    meta name="description" content=(site.config.description);
                }
                title { (full_title) }
                style { (PreEscaped(site.css)) }
            }
            body {
                (content)
            }
        }
    }
}

/// Renders the site header with breadcrumb and navigation
fn site_header(site: &Site, breadcrumb: Markup, current_path: &str) -> Markup {
    html! {
        header.site-header {
            nav.breadcrumb {
                a href=(site.url("")) { (site.config.title) }
                (breadcrumb)
            }
            nav.site-nav {
                (render_nav(site.navigation, &site.config.base, current_path))
            }
        }
    }
}

/// Renders the navigation menu
pub fn render_nav(items: &[NavItem], base: &str, current_path: &str) -> Markup {
    html! {
        ul {
            @for item in items {
                @if item.external {
                    li {
                        a href=(item.path) target="_blank" rel="noopener" { (item.title) }
                    }
                } @else {
                    @let is_current = item.path == current_path;
                    li class=[is_current.then_some("current")] {
                        a href=(artwork::with_base(base, &item.path)) { (item.title) }
                    }
                }
            }
        }
    }
}

/// Card artwork `<img>`, falling back to the placeholder.
fn card_image(base: &str, card: &Card, has_artwork: bool) -> Markup {
    let placeholder = artwork::placeholder_image_path(base);
    if has_artwork {
        let src = artwork::card_image_path(base, Some(&card.id));
        let fallback = format!("this.onerror=null;this.src='{placeholder}'");
        html! {
            img.card-art src=(src) alt=(card.name) loading="lazy" onerror=(fallback);
        }
    } else {
        html! {
            img.card-art.placeholder src=(placeholder) alt=(card.name) loading="lazy";
        }
    }
}

fn kind_label(kind: &str) -> &str {
    if kind.is_empty() { "Other" } else { kind }
}

// ============================================================================
// Page Renderers
// ============================================================================

/// Renders the index page: all cards grouped by kind
fn render_index(site: &Site, manifest: &Manifest) -> Markup {
    let base = &site.config.base;

    let content = html! {
        (site_header(site, html! {}, ""))
        main.index-page {
            @if !site.config.description.is_empty() {
                p.site-description { (site.config.description) }
            }
            p.card-export {
                a href=(site.url(CARD_EXPORT)) download { "Download the card list (CSV)" }
            }
            @for (kind, group) in cards::group_by_kind(&manifest.cards) {
                section.kind-section {
                    h2 {
                        (kind_label(kind))
                        " "
                        span.count { "(" (group.len()) ")" }
                    }
                    div.card-grid {
                        @for card in group {
                            a.card-tile href=(site.url(&card_page_file(&card.id))) {
                                (card_image(base, card, manifest.has_artwork(&card.id)))
                                span.card-name { (card.name) }
                                span.card-type { (card.card_type) }
                            }
                        }
                    }
                }
            }
        }
    };

    base_document(site, &site.config.title, content)
}

/// Renders a card detail page
fn render_card_page(site: &Site, card: &Card, rulings: &[&Ruling], has_artwork: bool) -> Markup {
    let tags = card.tag_list();

    let breadcrumb = html! {
        " › "
        (card.name)
    };

    let content = html! {
        (site_header(site, breadcrumb, ""))
        main.card-page {
            article.card-detail {
                figure.card-figure {
                    (card_image(&site.config.base, card, has_artwork))
                }
                div.card-body {
                    h1 { (card.name) }
                    dl.card-fields {
                        dt { "ID" }
                        dd { (card.id) }
                        dt { "Kind" }
                        dd { (kind_label(&card.kind)) }
                        dt { "Type" }
                        dd { (card.card_type) }
                    }
                    @if !card.effect.is_empty() {
                        section.card-effect {
                            h2 { "Effect" }
                            p { (card.effect) }
                        }
                    }
                    @if !tags.is_empty() {
                        ul.tag-list {
                            @for tag in &tags {
                                li.tag { (tag) }
                            }
                        }
                    }
                }
            }
            @if !rulings.is_empty() {
                section.card-rulings {
                    h2 { "Rulings" }
                    ol.ruling-list {
                        @for ruling in rulings {
                            li id={ "ruling-" (ruling.id) } {
                                span.ruling-id { "#" (ruling.id) }
                                " "
                                (ruling.content)
                            }
                        }
                    }
                }
            }
        }
    };

    base_document(site, &card.name, content)
}

/// Renders the rulings page, linking each ruling to its card when it resolves
fn render_rulings_page(site: &Site, rulings: &[Ruling], all_cards: &[Card]) -> Markup {
    let breadcrumb = html! {
        " › "
        "Rulings"
    };

    let content = html! {
        (site_header(site, breadcrumb, "rulings.html"))
        main.rulings-page {
            h1 { "Rulings" }
            ol.ruling-list {
                @for ruling in rulings {
                    li id={ "ruling-" (ruling.id) } {
                        span.ruling-id { "#" (ruling.id) }
                        " "
                        @match cards::find_card(all_cards, &ruling.card) {
                            Some(card) => {
                                a.ruling-card href=(site.url(&card_page_file(&card.id))) { (card.name) }
                            },
                            None => {
                                span.ruling-card.unresolved { (ruling.card) }
                            },
                        }
                        p.ruling-content { (ruling.content) }
                    }
                }
            }
        }
    };

    base_document(site, "Rulings", content)
}

/// Renders a markdown content page
fn render_content_page(site: &Site, page: &Page) -> Markup {
    let parser = Parser::new(&page.body);
    let mut body_html = String::new();
    md_html::push_html(&mut body_html, parser);

    let breadcrumb = html! {
        " › "
        (page.title)
    };

    let current = format!("{}.html", page.slug);
    let content = html! {
        (site_header(site, breadcrumb, &current))
        main.content-page {
            article.page-content {
                (PreEscaped(body_html))
            }
        }
    };

    base_document(site, &page.title, content)
}

// ============================================================================
// Tests
// ============================================================================
