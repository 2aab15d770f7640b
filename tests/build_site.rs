//! End-to-end tests driving the `card-wiki` binary.
//!
//! Each test builds from `fixtures/content` (or a small content root written
//! to a temp dir) into a fresh output directory.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

// ===========================================================================
// Setup helpers
// ===========================================================================

fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("fixtures/content")
}

fn run(args: &[&str], source: &Path, work: &Path) -> Output {
    Command::new(env!("CARGO_BIN_EXE_card-wiki"))
        .args(args)
        .arg("--source")
        .arg(source)
        .arg("--output")
        .arg(work.join("dist"))
        .arg("--temp-dir")
        .arg(work.join("temp"))
        .output()
        .expect("failed to run card-wiki")
}

fn stdout(out: &Output) -> String {
    String::from_utf8_lossy(&out.stdout).into_owned()
}

fn stderr(out: &Output) -> String {
    String::from_utf8_lossy(&out.stderr).into_owned()
}

// ===========================================================================
// build
// ===========================================================================

#[test]
fn build_writes_complete_site() {
    let work = TempDir::new().unwrap();
    let out = run(&["build"], &fixtures_dir(), work.path());
    assert!(out.status.success(), "build failed: {}", stderr(&out));

    let dist = work.path().join("dist");
    for file in [
        "index.html",
        "rulings.html",
        "about.html",
        "notes.html",
        "card/001.html",
        "card/002.html",
        "card/003.html",
        "card/004.html",
        "cards/001.avif",
        "cards/002.avif",
        "placeholder.avif",
        "robots.txt",
        "cards.csv",
    ] {
        assert!(dist.join(file).is_file(), "missing {file}");
    }
    assert!(!dist.join("github.html").exists());
    assert!(work.path().join("temp/manifest.json").is_file());
}

#[test]
fn build_reports_each_stage() {
    let work = TempDir::new().unwrap();
    let out = run(&["build"], &fixtures_dir(), work.path());
    let text = stdout(&out);

    assert!(text.contains("==> Stage 1: Scanning"));
    assert!(text.contains("Cards (4)"));
    assert!(text.contains("==> Stage 2: Generating HTML"));
    assert!(text.contains("Home → index.html"));
    assert!(text.contains("Generated 4 card pages, 2 pages, 2 artwork files, 1 asset"));
    assert!(text.contains("2 cards without artwork (placeholder shown)"));
    assert!(text.contains("==> Build complete"));
}

#[test]
fn built_pages_escape_and_link_correctly() {
    let work = TempDir::new().unwrap();
    let out = run(&["build"], &fixtures_dir(), work.path());
    assert!(out.status.success(), "build failed: {}", stderr(&out));

    let dist = work.path().join("dist");
    let thorn = fs::read_to_string(dist.join("card/002.html")).unwrap();
    assert!(thorn.contains("Thorn, the Wall"));
    assert!(thorn.contains("Blocks &quot;piercing&quot; attacks."));
    assert!(thorn.contains(r#"src="/cards/002.avif""#));
    assert!(thorn.contains(r#"id="ruling-2""#));

    let field = fs::read_to_string(dist.join("card/003.html")).unwrap();
    assert!(field.contains(r#"src="/placeholder.avif""#));

    let rulings = fs::read_to_string(dist.join("rulings.html")).unwrap();
    assert!(rulings.contains(r#"href="/card/001.html""#));
    assert!(rulings.contains("Missing Card"));
}

#[test]
fn scan_then_generate_matches_build() {
    let work = TempDir::new().unwrap();
    let scanned = run(&["scan"], &fixtures_dir(), work.path());
    assert!(scanned.status.success(), "scan failed: {}", stderr(&scanned));
    assert!(!work.path().join("dist").exists());

    let generated = run(&["generate"], &fixtures_dir(), work.path());
    assert!(
        generated.status.success(),
        "generate failed: {}",
        stderr(&generated)
    );
    assert!(work.path().join("dist/card/004.html").is_file());
}

// ===========================================================================
// Failures
// ===========================================================================

#[test]
fn malformed_row_fails_build_with_line_number() {
    let content = TempDir::new().unwrap();
    fs::write(
        content.path().join("cards.csv"),
        "id,name,kind,type,effect,tags\n\
         001,Rose Knight,Unit,Normal,,\n\
         002,Thorn, the Wall,Unit,Guardian,,\n",
    )
    .unwrap();

    let work = TempDir::new().unwrap();
    let out = run(&["build"], content.path(), work.path());

    assert!(!out.status.success());
    let err = stderr(&out);
    assert!(err.contains("cards.csv"), "stderr: {err}");
    assert!(err.contains("Line 3"), "stderr: {err}");
    assert!(!work.path().join("dist/index.html").exists());
}

#[test]
fn missing_header_fails_build() {
    let content = TempDir::new().unwrap();
    fs::write(content.path().join("cards.csv"), "id,name,kind\n001,Rose,Unit\n").unwrap();

    let work = TempDir::new().unwrap();
    let out = run(&["build"], content.path(), work.path());

    assert!(!out.status.success());
    assert!(stderr(&out).contains("Missing required headers: type, effect, tags"));
}

#[test]
fn generate_without_scan_fails() {
    let work = TempDir::new().unwrap();
    let out = run(&["generate"], &fixtures_dir(), work.path());
    assert!(!out.status.success());
    assert!(stderr(&out).starts_with("error:"));
}

// ===========================================================================
// check / gen-config
// ===========================================================================

#[test]
fn check_lists_missing_artwork_and_unresolved_rulings() {
    let work = TempDir::new().unwrap();
    let out = run(&["check"], &fixtures_dir(), work.path());
    assert!(out.status.success(), "check failed: {}", stderr(&out));

    let text = stdout(&out);
    assert!(text.contains("Artwork: 2/4 cards"));
    assert!(text.contains("missing: cards/003.avif (Blooming Field)"));
    assert!(text.contains("Rulings: 3 (1 unresolved)"));
    assert!(text.contains("==> Content is valid"));
    assert!(!work.path().join("dist").exists());
}

#[test]
fn gen_config_prints_stock_config() {
    let work = TempDir::new().unwrap();
    let out = run(&["gen-config"], &fixtures_dir(), work.path());
    assert!(out.status.success());

    let text = stdout(&out);
    assert!(text.contains("title = \"Card Wiki\""));
    assert!(text.contains("[data]"));
}
