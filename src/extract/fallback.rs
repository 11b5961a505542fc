use tracing::debug;

use super::scan;

/// Fallback method: pick the URN with the fewest occurrences in the page.
///
/// The viewer's URN repeats across navigation and menu markup; the subject's
/// URN only occurs in page-specific content, so the rarest candidate is the
/// best guess. Less reliable than the anchor-field method.
pub fn by_occurrence_count(html: &str) -> Option<String> {
    let candidates = scan::find_all(html);

    let mut best: Option<(&str, usize)> = None;
    for urn in &candidates {
        // Count the URN as a literal needle, not a pattern
        let count = html.matches(urn.as_str()).count();
        debug!("{}: {} occurrence(s)", urn, count);

        match best {
            Some((_, min)) if count >= min => {}
            _ => best = Some((urn, count)),
        }
    }

    best.map(|(urn, _)| urn.to_string())
}
