//! Raw markup to blocks.

use tessera_types::BlockRecord;

use crate::names;

/// Convert raw markup into paragraph blocks.
///
/// Paragraph boundaries are blank lines and closing `</p>` tags. A wrapping
/// `<p>` element is stripped; any other markup is kept verbatim as the
/// paragraph content.
pub fn raw_handler(html: &str) -> Vec<BlockRecord> {
    let normalized = html.replace("\r\n", "\n").replace("</p>", "</p>\n\n");
    normalized
        .split("\n\n")
        .map(str::trim)
        .filter(|chunk| !chunk.is_empty())
        .map(strip_paragraph)
        .filter(|content| !content.is_empty())
        .map(|content| BlockRecord::new(names::PARAGRAPH).with_attribute("content", content))
        .collect()
}

fn strip_paragraph(chunk: &str) -> String {
    let mut body = chunk;
    if let Some(rest) = body.strip_suffix("</p>") {
        body = rest;
    }
    if body.starts_with("<p>") || body.starts_with("<p ") {
        if let Some(end) = body.find('>') {
            body = &body[end + 1..];
        }
    }
    body.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn contents(blocks: &[BlockRecord]) -> Vec<&str> {
        blocks.iter().filter_map(|b| b.attribute_str("content")).collect()
    }

    #[test]
    fn test_paragraph_tags_split() {
        let blocks = raw_handler("<p>one</p><p class=\"x\">two</p>");
        assert_eq!(contents(&blocks), vec!["one", "two"]);
        assert!(blocks.iter().all(|b| b.name == names::PARAGRAPH));
    }

    #[test]
    fn test_blank_lines_split() {
        let blocks = raw_handler("first line\nstill first\n\n\nsecond <em>x</em>");
        assert_eq!(contents(&blocks), vec!["first line\nstill first", "second <em>x</em>"]);
    }

    #[test]
    fn test_empty_input_yields_nothing() {
        assert!(raw_handler("").is_empty());
        assert!(raw_handler("  \n\n <p></p> ").is_empty());
    }
}
