use tracing::debug;

use super::{blocks, scan};

/// Primary method: anchor-field extraction from `<code>` blocks.
///
/// The target profile's data is serialized once, early in the page, in a
/// `<code>` block that also carries its `publicIdentifier` field. The
/// profile's own URN is emitted before that field, so among the URNs in the
/// block the earliest one preceding the anchor is the target. The viewer's
/// URN shows up later or in unrelated blocks.
pub fn from_code_blocks(html: &str, vanity_name: &str) -> Option<String> {
    let anchor = format!("\"publicIdentifier\":\"{}\"", vanity_name);

    for block in blocks::code_blocks(html) {
        if !block.text.contains(vanity_name) {
            continue;
        }

        let candidates = scan::find_all(&block.text);
        if candidates.is_empty() {
            // Marker can appear in several blocks; only one carries URNs
            continue;
        }
        debug!(
            "code block at {}..{} contains \"{}\" with {} candidate URN(s)",
            block.start,
            block.end,
            vanity_name,
            candidates.len()
        );

        if let Some(anchor_at) = block.text.find(&anchor) {
            let mut before_anchor: Vec<(usize, &str)> = candidates
                .iter()
                .filter_map(|urn| block.text.find(urn.as_str()).map(|at| (at, urn.as_str())))
                .filter(|(at, _)| *at < anchor_at)
                .collect();
            before_anchor.sort_by_key(|(at, _)| *at);

            if let Some((at, urn)) = before_anchor.first() {
                debug!("selected URN at offset {} before publicIdentifier: {}", at, urn);
                return Some(urn.to_string());
            }
        }

        // Anchor missing or nothing precedes it: first URN in the block wins,
        // and this block settles the question for the whole document
        debug!("no URN before publicIdentifier, taking first in block: {}", candidates[0]);
        return Some(candidates[0].clone());
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    const AAA: &str = "urn:li:fsd_profile:AAA";
    const BBB: &str = "urn:li:fsd_profile:BBB";

    /// Build a code block where `AAA` sits at offset 100, the anchor at 500
    /// and `BBB` at 600 (offsets within the block text).
    fn anchored_block(vanity: &str, with_anchor: bool) -> String {
        let mut text = String::new();
        text.push_str(&"x".repeat(100));
        text.push_str(AAA);
        while text.len() < 500 {
            text.push('y');
        }
        if with_anchor {
            text.push_str(&format!("\"publicIdentifier\":\"{}\"", vanity));
        } else {
            text.push_str(vanity);
        }
        while text.len() < 600 {
            text.push('z');
        }
        text.push_str(BBB);
        format!("<code>{}</code>", text)
    }

    #[test]
    fn earliest_urn_before_anchor_wins() {
        let html = anchored_block("janedoe", true);
        assert_eq!(from_code_blocks(&html, "janedoe").as_deref(), Some(AAA));
    }

    #[test]
    fn anchor_absent_takes_first_in_block() {
        let html = anchored_block("janedoe", false);
        assert_eq!(from_code_blocks(&html, "janedoe").as_deref(), Some(AAA));
    }

    #[test]
    fn anchor_before_all_urns_takes_first_in_block() {
        // Anchor present but no URN precedes it: per-block fallback applies
        let html = format!(
            "<code>\"publicIdentifier\":\"janedoe\" then {} and {}</code>",
            BBB, AAA
        );
        assert_eq!(from_code_blocks(&html, "janedoe").as_deref(), Some(BBB));
    }

    #[test]
    fn marker_block_without_urns_is_skipped() {
        let html = format!(
            "<code>janedoe appears here without any urn</code>\
             <code>janedoe again, now with {}</code>",
            BBB
        );
        assert_eq!(from_code_blocks(&html, "janedoe").as_deref(), Some(BBB));
    }

    #[test]
    fn first_deciding_block_wins_over_later_blocks() {
        let html = format!(
            "<code>janedoe with {}</code><code>janedoe with {}</code>",
            BBB, AAA
        );
        assert_eq!(from_code_blocks(&html, "janedoe").as_deref(), Some(BBB));
    }

    #[test]
    fn anchor_matched_against_decoded_text() {
        let html = format!(
            "<code>{} &quot;publicIdentifier&quot;:&quot;janedoe&quot; {}</code>",
            AAA, BBB
        );
        assert_eq!(from_code_blocks(&html, "janedoe").as_deref(), Some(AAA));
    }

    #[test]
    fn no_block_contains_marker() {
        let html = format!("<code>someone else {}</code>", AAA);
        assert_eq!(from_code_blocks(&html, "janedoe"), None);
    }

    #[test]
    fn no_blocks_at_all() {
        assert_eq!(from_code_blocks("<html>janedoe</html>", "janedoe"), None);
    }
}
