//! Service route lists and their comparison with collection URLs
//!
//! A route list is either an OpenAPI/Swagger document or a plain text file
//! with one route per line (`GET /users` or `/users`).

use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use regex::Regex;
use serde::Serialize;
use serde_json::Value;

/// A route exposed by the deployed service
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Route {
    /// HTTP method, absent when the list only names paths
    pub method: Option<String>,
    pub path: String,
}

impl Route {
    pub fn new(method: Option<&str>, path: impl Into<String>) -> Self {
        Route {
            method: method.map(|m| m.to_uppercase()),
            path: path.into(),
        }
    }

    /// `GET /users`, or just the path when the method is unknown
    pub fn label(&self, path: &str) -> String {
        match &self.method {
            Some(method) => format!("{} {}", method, path),
            None => path.to_string(),
        }
    }
}

/// Load a route list, picking the format from the file extension
pub fn load_routes(path: &Path) -> Result<Vec<Route>> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("reading route list {}", path.display()))?;

    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
    match ext {
        "json" => {
            let spec: Value = serde_json::from_str(&content)
                .with_context(|| format!("parsing {}", path.display()))?;
            Ok(parse_openapi_routes(&spec))
        }
        "yaml" | "yml" => {
            let spec: Value = serde_yaml::from_str(&content)
                .with_context(|| format!("parsing {}", path.display()))?;
            Ok(parse_openapi_routes(&spec))
        }
        _ => Ok(parse_route_lines(&content)),
    }
}

fn is_http_method(method: &str) -> bool {
    matches!(
        method.to_lowercase().as_str(),
        "get" | "post" | "put" | "patch" | "delete" | "head" | "options" | "trace"
    )
}

/// Routes from the `paths` object, prefixed with the first server's base path
pub fn parse_openapi_routes(spec: &Value) -> Vec<Route> {
    let mut routes = Vec::new();

    // OpenAPI 3 servers[0].url, or Swagger 2 basePath
    let base_path = spec
        .get("servers")
        .and_then(|s| s.as_array())
        .and_then(|servers| servers.first())
        .and_then(|server| server.get("url"))
        .and_then(|v| v.as_str())
        .map(strip_origin)
        .or_else(|| spec.get("basePath").and_then(|v| v.as_str()).map(String::from))
        .unwrap_or_default();
    let base_path = base_path.trim_end_matches('/');

    if let Some(paths) = spec.get("paths").and_then(|p| p.as_object()) {
        for (path, methods) in paths {
            let full_path = format!("{}{}", base_path, path);
            let mut found_method = false;

            if let Some(methods_obj) = methods.as_object() {
                for method in methods_obj.keys().filter(|m| is_http_method(m)) {
                    routes.push(Route::new(Some(method.as_str()), full_path.clone()));
                    found_method = true;
                }
            }

            if !found_method {
                routes.push(Route::new(None, full_path));
            }
        }
    }

    routes
}

/// Routes from text lines; blank lines and `#` comments are skipped
pub fn parse_route_lines(content: &str) -> Vec<Route> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(|line| {
            let mut parts = line.split_whitespace();
            match (parts.next(), parts.next()) {
                (Some(method), Some(path)) if is_http_method(method) => Route::new(Some(method), path),
                (Some(path), _) => Route::new(None, path),
                (None, _) => Route::new(None, line),
            }
        })
        .collect()
}

fn strip_origin(url: &str) -> String {
    match url.find("://") {
        Some(idx) => {
            let rest = &url[idx + 3..];
            rest.find('/').map(|i| rest[i..].to_string()).unwrap_or_default()
        }
        None => url.to_string(),
    }
}

/// Reduces collection URLs and service paths to one comparable form
pub struct PathNormalizer {
    template_host: Regex,
    origin: Regex,
    param_segment: Regex,
}

impl PathNormalizer {
    pub fn new() -> Result<Self> {
        Ok(PathNormalizer {
            template_host: Regex::new(r"^\{\{[^}]+\}\}")?,
            origin: Regex::new(r"^[a-zA-Z][a-zA-Z0-9+.-]*://[^/]*")?,
            param_segment: Regex::new(r"^(?::\w+|\{\{?[^}/]+\}?\})$")?,
        })
    }

    /// Comparable path for a URL or route, `None` for an empty URL
    pub fn normalize(&self, url: &str) -> Option<String> {
        let url = url.trim();
        if url.is_empty() {
            return None;
        }

        let url = self.template_host.replace(url, "");
        let url = self.origin.replace(&url, "");
        let path = url.split(['?', '#']).next().unwrap_or("");

        let segments: Vec<&str> = path
            .split('/')
            .filter(|s| !s.is_empty())
            .map(|s| if self.param_segment.is_match(s) { "{}" } else { s })
            .collect();

        Some(format!("/{}", segments.join("/")))
    }
}

/// Outcome of comparing a collection with a service route list
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct RouteDiff {
    /// Service routes the collection does not document, as `METHOD /path`
    pub undocumented: Vec<String>,
    /// Collection paths the service no longer exposes
    pub stale: Vec<String>,
}

impl RouteDiff {
    pub fn is_clean(&self) -> bool {
        self.undocumented.is_empty() && self.stale.is_empty()
    }
}

/// Compare collection URLs with service routes by normalized path
pub fn diff_routes(collection_urls: &[String], routes: &[Route]) -> Result<RouteDiff> {
    let normalizer = PathNormalizer::new()?;

    let documented: BTreeSet<String> = collection_urls
        .iter()
        .filter_map(|url| normalizer.normalize(url))
        .collect();
    let exposed: Vec<(&Route, String)> = routes
        .iter()
        .filter_map(|route| normalizer.normalize(&route.path).map(|path| (route, path)))
        .collect();

    let undocumented: BTreeSet<String> = exposed
        .iter()
        .filter(|(_, path)| !documented.contains(path))
        .map(|(route, path)| route.label(path))
        .collect();
    let exposed_paths: BTreeSet<&String> = exposed.iter().map(|(_, path)| path).collect();
    let stale = documented
        .iter()
        .filter(|path| !exposed_paths.contains(path))
        .cloned()
        .collect();

    Ok(RouteDiff {
        undocumented: undocumented.into_iter().collect(),
        stale,
    })
}
