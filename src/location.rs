//! URL ↔ page key conversion and base-prefix detection.
//!
//! The site can be hosted at a domain root (`https://example.com/tarifs`) or
//! under a sub-path (`https://user.github.io/site/tarifs`). The sub-path is
//! the *base path*; every URL the router builds or parses goes through it.
//!
//! ## Base path detection
//!
//! First match wins:
//!
//! 1. A value already stored in session storage under [`BASE_PATH_KEY`].
//! 2. On `*.github.io` hosts, the first path segment (`/site`).
//! 3. The `<base href>` of the document, resolved against the origin, with
//!    one trailing slash removed. `href="/"` means no base.
//!
//! The result is written back to session storage so that later client-side
//! navigations (which change the path) do not re-derive a different value.

use crate::host::SessionStorage;
use crate::routes::HOME;
use url::Url;

/// Session key caching the detected base path.
pub const BASE_PATH_KEY: &str = "router_basePath";
/// One-shot session key set by the 404 fallback page before it redirects.
pub const REDIRECT_PATH_KEY: &str = "redirect_path";

/// Derive the base path from the current location, without caching.
pub fn detect_base_path(
    hostname: &str,
    pathname: &str,
    origin: &str,
    base_href: Option<&str>,
) -> String {
    if hostname.contains("github.io") {
        return pathname
            .split('/')
            .find(|segment| !segment.is_empty())
            .map(|segment| format!("/{segment}"))
            .unwrap_or_default();
    }

    let Some(href) = base_href.filter(|h| !h.is_empty() && *h != "/") else {
        return String::new();
    };
    let resolved = Url::parse(origin)
        .and_then(|origin| origin.join(href))
        .map(|url| url.path().to_string())
        .unwrap_or_else(|_| href.to_string());
    resolved
        .strip_suffix('/')
        .unwrap_or(&resolved)
        .to_string()
}

/// Return the session-cached base path, detecting and storing it on first use.
pub fn cached_base_path(
    session: &mut impl SessionStorage,
    detect: impl FnOnce() -> String,
) -> String {
    if let Some(stored) = session.get(BASE_PATH_KEY) {
        return stored;
    }
    let base = detect();
    session.set(BASE_PATH_KEY, &base);
    base
}

/// Remove `base` from the front of `path` when it matches on a segment boundary.
pub fn strip_base<'a>(path: &'a str, base: &str) -> &'a str {
    if base.is_empty() {
        return path;
    }
    match path.strip_prefix(base) {
        Some(rest) if rest.is_empty() || rest.starts_with('/') => rest,
        _ => path,
    }
}

/// Map a URL path to the page key it names.
///
/// - `""`, `/`, `/index`, `/index.html` → `home`
/// - `/tarifs`, `/tarifs.html`, `/tarifs/` → `tarifs`
///
/// The key is not checked against the route table; unknown keys are the
/// router's concern.
pub fn page_from_path(path: &str, base: &str) -> String {
    let path = strip_base(path, base);
    let key = path.strip_prefix('/').unwrap_or(path);
    let key = key.strip_suffix('/').unwrap_or(key);
    let key = key.strip_suffix(".html").unwrap_or(key);
    if key.is_empty() || key == "index" {
        HOME.to_string()
    } else {
        key.to_string()
    }
}

/// URL the router pushes for `page`: the base root for home, `<base>/<page>` otherwise.
pub fn page_url(page: &str, base: &str) -> String {
    if page == HOME {
        home_url(base)
    } else {
        format!("{base}/{page}")
    }
}

/// Canonical root URL under `base`.
pub fn home_url(base: &str) -> String {
    format!("{base}/")
}

/// Whether `pathname` already displays the home page root.
pub fn is_home_url(pathname: &str, base: &str) -> bool {
    pathname == home_url(base) || pathname == format!("{base}/index.html")
}

/// Path a fragment is fetched from.
pub fn fragment_url(template_path: &str, base: &str) -> String {
    if base.is_empty() {
        template_path.to_string()
    } else {
        format!("{base}/{}", template_path.trim_start_matches('/'))
    }
}
