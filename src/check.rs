//! Site consistency check.
//!
//! Compares the route table against the fragment files on disk:
//!
//! - **missing**: a route names a fragment that does not exist. The router
//!   would show the error panel for that page.
//! - **orphan**: an `.html` file under `pages_dir` that no route names. It can
//!   never be displayed.
//!
//! Missing fragments fail the check; orphans are only reported.

use crate::config::SiteConfig;
use log::debug;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

#[derive(Error, Debug)]
pub enum CheckError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Directory walk error: {0}")]
    Walk(#[from] walkdir::Error),
}

/// A route whose fragment file is absent.
#[derive(Debug, Clone, PartialEq)]
pub struct MissingFragment {
    pub page: String,
    pub path: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CheckReport {
    /// Number of registered routes.
    pub routes: usize,
    pub missing: Vec<MissingFragment>,
    /// Unreferenced fragments, relative to the site root, sorted.
    pub orphans: Vec<PathBuf>,
}

impl CheckReport {
    pub fn is_ok(&self) -> bool {
        self.missing.is_empty()
    }
}

fn site_relative(path: &str) -> PathBuf {
    PathBuf::from(path.trim_start_matches("./").trim_start_matches('/'))
}

/// Check every route of `config` against the files under `root`.
pub fn check_site(root: &Path, config: &SiteConfig) -> Result<CheckReport, CheckError> {
    let mut report = CheckReport {
        routes: config.routes.len(),
        ..CheckReport::default()
    };

    let mut referenced = BTreeSet::new();
    for (page, path) in &config.routes {
        let relative = site_relative(path);
        if !root.join(&relative).is_file() {
            debug!("route {page} points at missing {path}");
            report.missing.push(MissingFragment {
                page: page.clone(),
                path: path.clone(),
            });
        }
        referenced.insert(relative);
    }

    let pages_dir = root.join(&config.pages_dir);
    if pages_dir.is_dir() {
        for entry in WalkDir::new(&pages_dir).sort_by_file_name() {
            let entry = entry?;
            let path = entry.path();
            if !entry.file_type().is_file()
                || path.extension().and_then(|e| e.to_str()) != Some("html")
            {
                continue;
            }
            let relative = path.strip_prefix(root).unwrap_or(path).to_path_buf();
            if !referenced.contains(&relative) {
                report.orphans.push(relative);
            }
        }
    }
    report.orphans.sort();
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn site_with(files: &[&str]) -> TempDir {
        let tmp = TempDir::new().unwrap();
        for file in files {
            let path = tmp.path().join(file);
            fs::create_dir_all(path.parent().unwrap()).unwrap();
            fs::write(&path, "<section></section>").unwrap();
        }
        tmp
    }

    fn config_with(routes: &[(&str, &str)]) -> SiteConfig {
        let mut config = SiteConfig::default();
        config.routes.clear();
        for (page, path) in routes {
            config.routes.insert(page.to_string(), path.to_string());
        }
        config
    }

    #[test]
    fn complete_site_passes() {
        let tmp = site_with(&["pages/home.html", "pages/tarifs.html"]);
        let config = config_with(&[("home", "pages/home.html"), ("tarifs", "pages/tarifs.html")]);
        let report = check_site(tmp.path(), &config).unwrap();
        assert!(report.is_ok());
        assert_eq!(report.routes, 2);
        assert!(report.orphans.is_empty());
    }

    #[test]
    fn missing_fragment_fails() {
        let tmp = site_with(&["pages/home.html"]);
        let config = config_with(&[("home", "pages/home.html"), ("tarifs", "pages/tarifs.html")]);
        let report = check_site(tmp.path(), &config).unwrap();
        assert!(!report.is_ok());
        assert_eq!(
            report.missing,
            vec![MissingFragment {
                page: "tarifs".into(),
                path: "pages/tarifs.html".into()
            }]
        );
    }

    #[test]
    fn unreferenced_fragments_are_orphans() {
        let tmp = site_with(&[
            "pages/home.html",
            "pages/old.html",
            "pages/archive/2019.html",
            "pages/notes.txt",
        ]);
        let config = config_with(&[("home", "pages/home.html")]);
        let report = check_site(tmp.path(), &config).unwrap();
        assert!(report.is_ok());
        assert_eq!(
            report.orphans,
            vec![
                PathBuf::from("pages/archive/2019.html"),
                PathBuf::from("pages/old.html")
            ]
        );
    }

    #[test]
    fn leading_slash_and_dot_are_ignored() {
        let tmp = site_with(&["pages/home.html", "pages/tarifs.html"]);
        let config = config_with(&[("home", "/pages/home.html"), ("tarifs", "./pages/tarifs.html")]);
        let report = check_site(tmp.path(), &config).unwrap();
        assert!(report.is_ok());
        assert!(report.orphans.is_empty());
    }

    #[test]
    fn missing_pages_dir_reports_no_orphans() {
        let tmp = TempDir::new().unwrap();
        let config = config_with(&[("home", "pages/home.html")]);
        let report = check_site(tmp.path(), &config).unwrap();
        assert_eq!(report.missing.len(), 1);
        assert!(report.orphans.is_empty());
    }
}
