//! # Card Wiki
//!
//! A static site generator for card game reference wikis. Card data lives in
//! hand-curated CSV files, artwork is named by card id, and markdown files
//! become pages.
//!
//! # Architecture: Two-Stage Pipeline
//!
//! ```text
//! 1. Scan      content/  →  manifest.json    (CSV + markdown + artwork → structured data)
//! 2. Generate  manifest  →  dist/            (final HTML site)
//! ```
//!
//! The manifest is human-readable JSON, so the output of the scan stage can be
//! inspected on its own. `card-wiki build` runs both stages.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`csv`] | Quote-aware CSV tokenizer, header validation, record mapping and writing |
//! | [`cards`] | `Card` and `Ruling` shapes built from CSV records |
//! | [`artwork`] | Card id → artwork URL, with the placeholder fallback |
//! | [`scan`] | Stage 1: reads the content directory and produces the manifest |
//! | [`generate`] | Stage 2: renders the HTML site from the manifest using Maud |
//! | [`config`] | `config.toml` loading, validation, merging, and CSS generation |
//! | [`types`] | Shared types serialized between stages (`NavItem`, `Page`) |
//! | [`naming`] | `NNN-name` filename convention for pages |
//! | [`output`] | CLI output formatting for each stage |
//!
//! # Failing Loudly
//!
//! Card data is typed by hand. A row with a stray comma, a missing column, or
//! a header typo stops the scan with an error that names the file and the
//! line, so a broken list never reaches the published site. Missing artwork
//! is the one tolerated gap: those cards render with a placeholder and
//! `card-wiki check` lists them.

pub mod artwork;
pub mod cards;
pub mod config;
pub mod csv;
pub mod generate;
pub mod naming;
pub mod output;
pub mod scan;
pub mod types;

#[cfg(test)]
pub(crate) mod test_helpers;
