//! Filesystem-backed fragment fetcher.
//!
//! Serves fragment files from a site directory the way a static HTTP server
//! would: missing files answer `404 Not Found`, paths escaping the root
//! answer `403 Forbidden`, and only unexpected I/O failures surface as
//! transport errors.

use super::{FetchError, FetchResponse, Fetcher};
use crate::location::strip_base;
use std::future::{Future, ready};
use std::io;
use std::path::{Component, Path, PathBuf};

#[derive(Debug, Clone)]
pub struct DirFetcher {
    root: PathBuf,
    base: String,
}

impl DirFetcher {
    /// Serve `root` as if it were mounted at URL prefix `base` (`""` for the domain root).
    pub fn new(root: impl Into<PathBuf>, base: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            base: base.into(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn respond(&self, path: &str) -> Result<FetchResponse, FetchError> {
        let relative = strip_base(path, &self.base).trim_start_matches('/');
        let relative = Path::new(relative);
        if relative
            .components()
            .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir))
        {
            return Ok(FetchResponse::with_status(403, "Forbidden"));
        }
        match std::fs::read_to_string(self.root.join(relative)) {
            Ok(body) => Ok(FetchResponse::ok(body)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                Ok(FetchResponse::with_status(404, "Not Found"))
            }
            Err(e) => Err(FetchError::new(format!("{}: {e}", relative.display()))),
        }
    }
}

impl Fetcher for DirFetcher {
    fn fetch(&self, path: &str) -> impl Future<Output = Result<FetchResponse, FetchError>> {
        ready(self.respond(path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::block_on;
    use std::fs;
    use tempfile::TempDir;

    fn site() -> TempDir {
        let tmp = TempDir::new().unwrap();
        fs::create_dir_all(tmp.path().join("pages")).unwrap();
        fs::write(tmp.path().join("pages/home.html"), "<h1>Accueil</h1>").unwrap();
        tmp
    }

    #[test]
    fn serves_existing_fragment() {
        let tmp = site();
        let fetcher = DirFetcher::new(tmp.path(), "");
        let response = block_on(fetcher.fetch("pages/home.html")).unwrap();
        assert_eq!(response.status, 200);
        assert_eq!(response.body, "<h1>Accueil</h1>");
    }

    #[test]
    fn strips_base_prefix() {
        let tmp = site();
        let fetcher = DirFetcher::new(tmp.path(), "/cabinet");
        let response = block_on(fetcher.fetch("/cabinet/pages/home.html")).unwrap();
        assert!(response.is_success());
    }

    #[test]
    fn missing_fragment_is_404() {
        let tmp = site();
        let fetcher = DirFetcher::new(tmp.path(), "");
        let response = block_on(fetcher.fetch("pages/tarifs.html")).unwrap();
        assert_eq!(response.status, 404);
        assert_eq!(response.status_text, "Not Found");
    }

    #[test]
    fn parent_traversal_is_forbidden() {
        let tmp = site();
        let fetcher = DirFetcher::new(tmp.path().join("pages"), "");
        let response = block_on(fetcher.fetch("../pages/home.html")).unwrap();
        assert_eq!(response.status, 403);
    }

    #[test]
    fn directory_read_is_transport_error() {
        let tmp = site();
        let fetcher = DirFetcher::new(tmp.path(), "");
        let result = block_on(fetcher.fetch("pages"));
        // Reading a directory as a file fails with something other than NotFound.
        assert!(result.is_err());
    }
}
