use std::sync::LazyLock;

use regex::Regex;

static SPACE_RUNS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[ \t]+").unwrap());
static NON_SLUG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^a-z0-9]+").unwrap());
static EDGE_DASHES: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^-+|-+$").unwrap());
static DASH_RUNS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"--+").unwrap());

/// Collapses CRLF to LF and runs of spaces/tabs to a single space, then
/// trims both ends. Idempotent: normalizing twice equals normalizing once.
pub fn normalize_whitespace(text: &str) -> String {
    let unix = text.replace("\r\n", "\n");
    SPACE_RUNS.replace_all(&unix, " ").trim().to_string()
}

/// URL-safe slug: lowercased, `&` spelled out, everything outside
/// `[a-z0-9]` folded into single dashes, capped at 80 characters.
pub fn slugify(value: &str) -> String {
    let lowered = value.to_lowercase().replace('&', "and");
    let dashed = NON_SLUG.replace_all(&lowered, "-");
    let trimmed = EDGE_DASHES.replace_all(&dashed, "");
    let collapsed = DASH_RUNS.replace_all(&trimmed, "-");
    collapsed.chars().take(80).collect()
}
