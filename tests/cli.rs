//! End-to-end tests for the `vitrine` binary against the fixture site.

use std::fs;
use std::path::PathBuf;
use std::process::{Command, Output};
use tempfile::TempDir;

fn fixture_site() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("fixtures/site")
}

fn vitrine(site: &std::path::Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_vitrine"))
        .arg("--site")
        .arg(site)
        .args(args)
        .output()
        .unwrap()
}

fn stdout_lines(output: &Output) -> Vec<String> {
    String::from_utf8_lossy(&output.stdout)
        .lines()
        .map(str::to_string)
        .collect()
}

fn has_line(output: &Output, line: &str) -> bool {
    stdout_lines(output).iter().any(|l| l == line)
}

// =========================================================================
// check
// =========================================================================

#[test]
fn check_fixture_passes_and_reports_orphan() {
    let out = vitrine(&fixture_site(), &["check"]);
    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));
    assert!(has_line(&out, "Orphan fragments"));
    assert!(has_line(&out, "    pages/brouillon.html"));
    assert!(has_line(&out, "OK: 7 routes, 0 missing, 1 orphan"));
}

#[test]
fn check_fails_on_missing_fragment() {
    let tmp = TempDir::new().unwrap();
    fs::create_dir_all(tmp.path().join("pages")).unwrap();
    fs::write(tmp.path().join("pages/home.html"), "<h1>Accueil</h1>").unwrap();
    fs::write(
        tmp.path().join("site.toml"),
        "[routes]\ntarifs = \"pages/tarifs.html\"\n",
    )
    .unwrap();

    let out = vitrine(tmp.path(), &["check"]);
    assert!(!out.status.success());
    assert!(has_line(&out, "    tarifs → pages/tarifs.html"));
    assert!(has_line(&out, "FAILED: 2 routes, 1 missing, 0 orphans"));
}

#[test]
fn invalid_config_is_reported() {
    let tmp = TempDir::new().unwrap();
    fs::write(
        tmp.path().join("site.toml"),
        "[categories]\nsein = [\"fantome\"]\n",
    )
    .unwrap();

    let out = vitrine(tmp.path(), &["check"]);
    assert!(!out.status.success());
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("fantome"), "{stderr}");
}

// =========================================================================
// routes and resolve
// =========================================================================

#[test]
fn routes_lists_fixture_pages() {
    let out = vitrine(&fixture_site(), &["routes"]);
    assert!(out.status.success());
    let lines = stdout_lines(&out);
    assert_eq!(lines[0], "Routes");
    assert_eq!(lines[1], "001 avant-apres → pages/avant-apres.html");
    assert!(has_line(&out, "    Category: sein (3/3)"));
    assert_eq!(lines.last().unwrap(), "7 routes, 1 category");
}

#[test]
fn resolve_strips_base_and_extension() {
    let out = vitrine(
        &fixture_site(),
        &["resolve", "/cabinet/tarifs.html", "--base", "/cabinet"],
    );
    assert!(out.status.success());
    assert_eq!(stdout_lines(&out), vec!["/cabinet/tarifs.html → tarifs"]);
}

#[test]
fn resolve_root_is_home() {
    let out = vitrine(&fixture_site(), &["resolve", "/"]);
    assert_eq!(stdout_lines(&out), vec!["/ → home"]);
}

#[test]
fn resolve_flags_unknown_page() {
    let out = vitrine(&fixture_site(), &["resolve", "/inconnue"]);
    assert!(out.status.success());
    let lines = stdout_lines(&out);
    assert_eq!(lines[0], "/inconnue → inconnue");
    assert!(lines[1].contains("not registered"));
}

// =========================================================================
// render
// =========================================================================

#[test]
fn render_procedure_page() {
    let out = vitrine(&fixture_site(), &["render", "lifting-mammaire"]);
    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));
    assert!(has_line(&out, "lifting-mammaire → /lifting-mammaire"));
    assert!(has_line(&out, "    State: loaded"));
    assert!(has_line(&out, "    Title: Lifting mammaire | Ptose mammaire"));
    assert!(has_line(
        &out,
        "    Canonical: https://cabinet.example/lifting-mammaire"
    ));
    assert!(has_line(
        &out,
        "    Image: https://cabinet.example/images/lifting-mammaire.jpg"
    ));
    assert!(has_line(&out, "    Siblings: reduction-mammaire ← · → (none)"));
    assert!(has_line(
        &out,
        "    Structured data: schema-page-breadcrumb, schema-page-content"
    ));
}

#[test]
fn render_page_with_carousel() {
    let out = vitrine(&fixture_site(), &["render", "avant-apres"]);
    assert!(out.status.success());
    assert!(has_line(&out, "    Carousel: sein (3 slides)"));
    // No SEO entry: home's title is borrowed
    assert!(has_line(
        &out,
        "    Title: Chirurgien plasticien | Cabinet de chirurgie plastique"
    ));
}

#[test]
fn render_page_with_tabs() {
    let out = vitrine(&fixture_site(), &["render", "tarifs"]);
    assert!(out.status.success());
    assert!(has_line(&out, "    Tabs: tarifs (consultation, sein)"));
}

#[test]
fn render_unknown_page_falls_back_to_home() {
    let out = vitrine(&fixture_site(), &["render", "inconnue"]);
    assert!(out.status.success());
    let lines = stdout_lines(&out);
    assert_eq!(lines[0], "home → /");
    assert_eq!(lines[1], "    Requested: inconnue");
}

#[test]
fn render_under_base_path() {
    let out = vitrine(&fixture_site(), &["render", "tarifs", "--base", "/cabinet"]);
    assert!(out.status.success());
    assert!(has_line(&out, "tarifs → /cabinet/tarifs"));
}

#[test]
fn render_missing_fragment_fails() {
    let tmp = TempDir::new().unwrap();
    fs::create_dir_all(tmp.path().join("pages")).unwrap();
    fs::write(tmp.path().join("pages/home.html"), "<h1>Accueil</h1>").unwrap();
    fs::write(
        tmp.path().join("site.toml"),
        "[routes]\ntarifs = \"pages/tarifs.html\"\n",
    )
    .unwrap();

    let out = vitrine(tmp.path(), &["render", "tarifs"]);
    assert!(!out.status.success());
    assert!(
        stdout_lines(&out)
            .iter()
            .any(|l| l.starts_with("    State: failed: HTTP error 404"))
    );
}

#[test]
fn verbose_logs_navigation_to_stderr() {
    let out = vitrine(&fixture_site(), &["--verbose", "render", "tarifs"]);
    assert!(out.status.success());
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("[INFO] page tarifs loaded"), "{stderr}");
}

// =========================================================================
// gen-config
// =========================================================================

#[test]
fn gen_config_prints_valid_site_toml() {
    let tmp = TempDir::new().unwrap();
    let out = vitrine(tmp.path(), &["gen-config"]);
    assert!(out.status.success());
    let text = String::from_utf8(out.stdout).unwrap();
    assert!(text.contains("[routes]"));
    let value: Result<toml::Value, _> = toml::from_str(&text);
    assert!(value.is_ok());
}
