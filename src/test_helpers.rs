//! Shared test utilities.
//!
//! Lookup helpers panic with the available keys on a miss, so a failing test
//! says what it found instead of just `None`.

use std::path::Path;
use tempfile::TempDir;

use crate::cards::{Card, Ruling};
use crate::scan::Manifest;
use crate::types::Page;

// =========================================================================
// Fixture setup
// =========================================================================

/// Copy `fixtures/content/` to a temp directory and return it.
pub fn setup_fixtures() -> TempDir {
    let tmp = TempDir::new().unwrap();
    let fixtures = Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures/content");
    copy_dir_recursive(&fixtures, tmp.path()).unwrap();
    tmp
}

fn copy_dir_recursive(src: &Path, dst: &Path) -> std::io::Result<()> {
    for entry in std::fs::read_dir(src)? {
        let entry = entry?;
        let src_path = entry.path();
        let dst_path = dst.join(entry.file_name());

        if src_path.is_dir() {
            std::fs::create_dir_all(&dst_path)?;
            copy_dir_recursive(&src_path, &dst_path)?;
        } else {
            std::fs::copy(&src_path, &dst_path)?;
        }
    }
    Ok(())
}

// =========================================================================
// Manifest lookups
// =========================================================================

pub fn find_card<'a>(manifest: &'a Manifest, id: &str) -> &'a Card {
    manifest
        .cards
        .iter()
        .find(|c| c.id == id)
        .unwrap_or_else(|| panic!("card '{id}' not found. Available: {:?}", card_ids(manifest)))
}

pub fn find_ruling(manifest: &Manifest, id: u32) -> &Ruling {
    manifest
        .rulings
        .iter()
        .find(|r| r.id == id)
        .unwrap_or_else(|| {
            let ids: Vec<u32> = manifest.rulings.iter().map(|r| r.id).collect();
            panic!("ruling {id} not found. Available: {ids:?}")
        })
}

pub fn find_page<'a>(manifest: &'a Manifest, slug: &str) -> &'a Page {
    manifest
        .pages
        .iter()
        .find(|p| p.slug == slug)
        .unwrap_or_else(|| {
            let slugs: Vec<&str> = manifest.pages.iter().map(|p| p.slug.as_str()).collect();
            panic!("page '{slug}' not found. Available: {slugs:?}")
        })
}

// =========================================================================
// Bulk extractors
// =========================================================================

/// All card ids in source order.
pub fn card_ids(manifest: &Manifest) -> Vec<&str> {
    manifest.cards.iter().map(|c| c.id.as_str()).collect()
}

/// Navigation titles in order.
pub fn nav_titles(manifest: &Manifest) -> Vec<&str> {
    manifest
        .navigation
        .iter()
        .map(|n| n.title.as_str())
        .collect()
}
