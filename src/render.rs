//! # Report Renderer
//!
//! The provider's report arrives as free text in a small markdown
//! subset: bullet lines, `**bold**` runs and `[label](target)` links.
//! [`render`] turns it into structured blocks in two passes:
//!
//! 1. **Lines**: split on newlines and classify each line as blank,
//!    list item or paragraph. A trimmed line opening with a single `*`
//!    or `-` is a bullet (a `**` opener is emphasis, not a bullet);
//!    exactly one marker character plus surrounding whitespace is
//!    stripped. Non-bullet lines keep their full original text.
//! 2. **Spans**: within a line, greedy left-to-right scan for
//!    non-nested `**…**` pairs, then for `[label](target)` inside the
//!    remaining plain segments. Emphasis interiors are not re-scanned
//!    for links.
//!
//! Malformed markup — an unpaired `**`, a bracket pair that never
//! closes — is left as literal text: no match, no transformation. The
//! renderer is pure and total; any string in, blocks out.

/// One styled run of text within a line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Span {
    Plain(String),
    Emphasis(String),
    Link { label: String, target: String },
}

/// One rendered line of the report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    Paragraph(Vec<Span>),
    ListItem(Vec<Span>),
    Blank,
}

impl Block {
    /// The unstyled text of this block — what the line reads as once
    /// markers are stripped.
    pub fn plain_text(&self) -> String {
        let spans = match self {
            Block::Paragraph(spans) | Block::ListItem(spans) => spans,
            Block::Blank => return String::new(),
        };
        spans
            .iter()
            .map(|span| match span {
                Span::Plain(text) | Span::Emphasis(text) => text.as_str(),
                Span::Link { label, .. } => label.as_str(),
            })
            .collect()
    }
}

pub fn render(text: &str) -> Vec<Block> {
    text.split('\n').map(render_line).collect()
}

fn render_line(line: &str) -> Block {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return Block::Blank;
    }

    if let Some(content) = bullet_content(trimmed) {
        Block::ListItem(scan_spans(content))
    } else {
        Block::Paragraph(scan_spans(line))
    }
}

/// The line's content with its bullet marker stripped, or `None` for a
/// non-bullet line.
fn bullet_content(trimmed: &str) -> Option<&str> {
    let is_bullet = trimmed.starts_with('-')
        || (trimmed.starts_with('*') && !trimmed.starts_with("**"));
    is_bullet.then(|| trimmed[1..].trim())
}

/// Pass 2: emphasis pairs first, link patterns in what remains.
fn scan_spans(text: &str) -> Vec<Span> {
    let mut spans = Vec::new();
    let mut rest = text;

    while let Some(open) = rest.find("**") {
        let after_open = &rest[open + 2..];
        let Some(close) = after_open.find("**") else {
            // Odd marker count: everything from here on is literal.
            break;
        };
        scan_links(&rest[..open], &mut spans);
        spans.push(Span::Emphasis(after_open[..close].to_string()));
        rest = &after_open[close + 2..];
    }
    scan_links(rest, &mut spans);

    spans
}

fn scan_links(text: &str, spans: &mut Vec<Span>) {
    let mut rest = text;
    while let Some((start, end, label, target)) = find_link(rest) {
        if start > 0 {
            spans.push(Span::Plain(rest[..start].to_string()));
        }
        spans.push(Span::Link { label, target });
        rest = &rest[end..];
    }
    if !rest.is_empty() {
        spans.push(Span::Plain(rest.to_string()));
    }
}

/// Leftmost `[label](target)` occurrence: byte range plus its parts.
fn find_link(text: &str) -> Option<(usize, usize, String, String)> {
    let mut search_from = 0;
    while let Some(rel) = text[search_from..].find('[') {
        let open = search_from + rel;
        if let Some((len, label, target)) = match_link_at(&text[open..]) {
            return Some((open, open + len, label, target));
        }
        search_from = open + 1;
    }
    None
}

/// Match a complete link at the start of `text` (which begins with `[`).
/// Label may not contain `]`, target may not contain `)`, and both need
/// at least one character.
fn match_link_at(text: &str) -> Option<(usize, String, String)> {
    let after_bracket = &text[1..];
    let close_bracket = after_bracket.find(']')?;
    if close_bracket == 0 {
        return None;
    }
    let label = &after_bracket[..close_bracket];

    let rest = &after_bracket[close_bracket + 1..];
    if !rest.starts_with('(') {
        return None;
    }
    let after_paren = &rest[1..];
    let close_paren = after_paren.find(')')?;
    if close_paren == 0 {
        return None;
    }
    let target = &after_paren[..close_paren];

    let len = 1 + close_bracket + 1 + 1 + close_paren + 1;
    Some((len, label.to_string(), target.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plain(s: &str) -> Span {
        Span::Plain(s.to_string())
    }

    fn emph(s: &str) -> Span {
        Span::Emphasis(s.to_string())
    }

    fn link(label: &str, target: &str) -> Span {
        Span::Link {
            label: label.to_string(),
            target: target.to_string(),
        }
    }

    #[test]
    fn report_scenario() {
        let blocks = render("**必吃**\n* 推薦 [連結](http://x.test)\n\n普通段落");
        assert_eq!(
            blocks,
            vec![
                Block::Paragraph(vec![emph("必吃")]),
                Block::ListItem(vec![plain("推薦 "), link("連結", "http://x.test")]),
                Block::Blank,
                Block::Paragraph(vec![plain("普通段落")]),
            ]
        );
    }

    #[test]
    fn dash_bullets_strip_one_marker() {
        let blocks = render("- 第一項\n-第二項");
        assert_eq!(blocks[0], Block::ListItem(vec![plain("第一項")]));
        assert_eq!(blocks[1], Block::ListItem(vec![plain("第二項")]));
    }

    #[test]
    fn double_asterisk_opener_is_a_paragraph_not_a_bullet() {
        let blocks = render("**加粗開頭** 後面");
        assert_eq!(
            blocks,
            vec![Block::Paragraph(vec![emph("加粗開頭"), plain(" 後面")])]
        );
    }

    #[test]
    fn paragraph_keeps_original_leading_whitespace() {
        let blocks = render("  縮排段落");
        assert_eq!(blocks, vec![Block::Paragraph(vec![plain("  縮排段落")])]);
    }

    #[test]
    fn multiple_emphasis_runs_interleave_with_plain() {
        let blocks = render("去 **A店** 或 **B店** 都行");
        assert_eq!(
            blocks,
            vec![Block::Paragraph(vec![
                plain("去 "),
                emph("A店"),
                plain(" 或 "),
                emph("B店"),
                plain(" 都行"),
            ])]
        );
    }

    #[test]
    fn unpaired_emphasis_stays_literal() {
        let blocks = render("評分 **4.8 顆星");
        assert_eq!(
            blocks,
            vec![Block::Paragraph(vec![plain("評分 **4.8 顆星")])]
        );
    }

    #[test]
    fn links_inside_emphasis_are_not_rescanned() {
        let blocks = render("**[店名](http://x.test)**");
        assert_eq!(
            blocks,
            vec![Block::Paragraph(vec![emph("[店名](http://x.test)")])]
        );
    }

    #[test]
    fn multiple_links_keep_order_and_surroundings() {
        let blocks = render("先看 [甲](http://a.test)，再看 [乙](http://b.test)。");
        assert_eq!(
            blocks,
            vec![Block::Paragraph(vec![
                plain("先看 "),
                link("甲", "http://a.test"),
                plain("，再看 "),
                link("乙", "http://b.test"),
                plain("。"),
            ])]
        );
    }

    #[test]
    fn malformed_links_stay_literal() {
        for text in ["[沒關括號](http://x.test", "[](http://x.test)", "[標籤]()", "[標籤] (分開)"] {
            let blocks = render(text);
            assert_eq!(
                blocks,
                vec![Block::Paragraph(vec![plain(text)])],
                "text: {text}"
            );
        }
    }

    #[test]
    fn bullet_with_bold_and_link_composes() {
        let blocks = render("* **超推** [店](http://x.test) 300m");
        assert_eq!(
            blocks,
            vec![Block::ListItem(vec![
                emph("超推"),
                plain(" "),
                link("店", "http://x.test"),
                plain(" 300m"),
            ])]
        );
    }

    #[test]
    fn whitespace_only_line_is_blank() {
        let blocks = render("   \t  ");
        assert_eq!(blocks, vec![Block::Blank]);
    }

    #[test]
    fn empty_emphasis_pair_is_allowed() {
        let blocks = render("x****y");
        assert_eq!(
            blocks,
            vec![Block::Paragraph(vec![plain("x"), emph(""), plain("y")])]
        );
    }

    #[test]
    fn rendering_is_idempotent_over_plain_projection() {
        let source = "**必吃**\n* 推薦 [連結](http://x.test) 與 **好店**\n\n普通段落";
        for block in render(source) {
            let projected = block.plain_text();
            let again = render(&projected);
            assert_eq!(again.len(), 1);
            let reprojected = again[0].plain_text();
            assert_eq!(projected, reprojected);
        }
    }
}
