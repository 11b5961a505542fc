use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;

static URN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"urn:li:fsd_profile:[A-Za-z0-9_-]+").unwrap());

/// Find every profile URN in `text`, deduplicated, in first-match order.
///
/// The order matters downstream: the primary method takes "first URN in the
/// block" from it, and the fallback method breaks occurrence-count ties by it.
pub fn find_all(text: &str) -> Vec<String> {
    let mut seen: HashSet<&str> = HashSet::new();
    let mut urns = Vec::new();
    for m in URN_RE.find_iter(text) {
        if seen.insert(m.as_str()) {
            urns.push(m.as_str().to_string());
        }
    }
    urns
}
