use std::sync::LazyLock;

use regex::Regex;

static CODE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<code[^>]*>(.*?)</code>").unwrap());

/// One decoded `<code>` segment of a profile page.
///
/// LinkedIn serializes profile data as HTML-escaped JSON inside `<code>` tags.
/// `start..end` is the byte range of the raw (still escaped) inner text in the
/// source document.
#[derive(Debug, Clone)]
pub struct CodeBlock {
    pub text: String,
    pub start: usize,
    pub end: usize,
}

/// Yield every `<code>` block in document order, entity-decoded.
///
/// Restartable: each call re-derives the sequence from the document string.
pub fn code_blocks(document: &str) -> impl Iterator<Item = CodeBlock> + '_ {
    CODE_RE.captures_iter(document).map(|caps| {
        let inner = caps.get(1).unwrap();
        CodeBlock {
            text: decode_entities(inner.as_str()),
            start: inner.start(),
            end: inner.end(),
        }
    })
}

/// Decode the four escapes LinkedIn uses in `<code>` payloads:
/// `&quot;` `&amp;` `&lt;` `&gt;`.
///
/// Single left-to-right pass, so a decoded `&` can never combine with the
/// following text into a second escape: `&amp;quot;` becomes the literal
/// `&quot;`, not `"`.
fn decode_entities(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut rest = raw;
    while let Some(pos) = rest.find('&') {
        out.push_str(&rest[..pos]);
        let tail = &rest[pos..];
        let (ch, len) = if tail.starts_with("&quot;") {
            ('"', 6)
        } else if tail.starts_with("&amp;") {
            ('&', 5)
        } else if tail.starts_with("&lt;") {
            ('<', 4)
        } else if tail.starts_with("&gt;") {
            ('>', 4)
        } else {
            ('&', 1)
        };
        out.push(ch);
        rest = &tail[len..];
    }
    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_order() {
        let html = "<code>first</code><p>x</p><code id=\"bpr-guid-2\">second</code>";
        let texts: Vec<String> = code_blocks(html).map(|b| b.text).collect();
        assert_eq!(texts, vec!["first", "second"]);
    }

    #[test]
    fn offsets_point_at_raw_inner_text() {
        let html = "<p>pad</p><code>abc</code>";
        let block = code_blocks(html).next().unwrap();
        assert_eq!(&html[block.start..block.end], "abc");
    }

    #[test]
    fn attributes_on_code_tag() {
        let html = r#"<code id="datalet-bpr-guid-3" style="display: none">{"x":1}</code>"#;
        let block = code_blocks(html).next().unwrap();
        assert_eq!(block.text, r#"{"x":1}"#);
    }

    #[test]
    fn spans_newlines() {
        let html = "<code>line1\nline2</code>";
        let block = code_blocks(html).next().unwrap();
        assert_eq!(block.text, "line1\nline2");
    }

    #[test]
    fn no_blocks() {
        assert_eq!(code_blocks("<html><body></body></html>").count(), 0);
    }

    #[test]
    fn restartable() {
        let html = "<code>a</code><code>b</code>";
        assert_eq!(code_blocks(html).count(), 2);
        assert_eq!(code_blocks(html).count(), 2);
    }

    #[test]
    fn decodes_quotes() {
        assert_eq!(
            decode_entities("&quot;publicIdentifier&quot;:&quot;janedoe&quot;"),
            r#""publicIdentifier":"janedoe""#
        );
    }

    #[test]
    fn decodes_brackets_and_amp() {
        assert_eq!(decode_entities("a &lt;b&gt; &amp; c"), "a <b> & c");
    }

    #[test]
    fn decoding_never_cascades() {
        // &amp;quot; is an escaped "&quot;" — it must decode to that literal,
        // not on through to a bare quote
        assert_eq!(decode_entities("&amp;quot;"), "&quot;");
        assert_eq!(decode_entities("&amp;lt;"), "&lt;");
    }

    #[test]
    fn lone_ampersand_passes_through() {
        assert_eq!(decode_entities("a & b &nbsp; c"), "a & b &nbsp; c");
    }
}
