//! Rendering of a resolution (and optional route diff) for stdout

use std::fmt::Write;

use serde::Serialize;

use crate::pipeline::Resolution;
use crate::routes::RouteDiff;

#[derive(Serialize)]
struct Report<'a> {
    #[serde(flatten)]
    resolution: &'a Resolution,
    #[serde(skip_serializing_if = "Option::is_none")]
    diff: Option<&'a RouteDiff>,
}

/// Plain text: ids first, then one URL per line, then the diff sections
pub fn render_text(resolution: &Resolution, diff: Option<&RouteDiff>) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Workspace Id: \t{}", resolution.workspace_id);
    let _ = writeln!(out, "Collection Id: \t{}", resolution.collection_uid);
    for url in &resolution.urls {
        let _ = writeln!(out, "{}", url);
    }

    if let Some(diff) = diff {
        out.push('\n');
        if diff.is_clean() {
            out.push_str("Collection matches service routes\n");
            return out;
        }
        let _ = writeln!(out, "Undocumented service routes ({}):", diff.undocumented.len());
        for route in &diff.undocumented {
            let _ = writeln!(out, "  {}", route);
        }
        let _ = writeln!(out, "Stale collection routes ({}):", diff.stale.len());
        for path in &diff.stale {
            let _ = writeln!(out, "  {}", path);
        }
    }

    out
}

/// Pretty JSON of the resolution fields, with a `diff` object when present
pub fn render_json(resolution: &Resolution, diff: Option<&RouteDiff>) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&Report { resolution, diff })
}
