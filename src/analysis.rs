// ABOUTME: Structural analysis of slide HTML fragments
// ABOUTME: Scans markup without a DOM to count elements and extract text content

/// Tags that never take a closing tag and so are never pushed on the open stack.
const VOID_TAGS: &[&str] = &["br", "hr", "img", "input", "meta", "link", "wbr", "source"];

/// Tags whose start begins a new line of text.
const BLOCK_TAGS: &[&str] = &[
    "h1", "h2", "h3", "h4", "h5", "h6", "p", "ul", "ol", "div", "section", "blockquote", "pre",
];

/// An element found in a fragment, kept as its exact source markup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    pub tag: String,
    pub outer_html: String,
    pub text: String,
}

impl Element {
    /// Length of the element's text content, in characters (untrimmed).
    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }
}

/// Read-only measurement of one slide fragment.
///
/// Computed fresh by [`analyze`] every time it is needed; nothing here is
/// cached across fragments.
#[derive(Debug, Clone, Default)]
pub struct ContentAnalysis {
    /// Text content of the fragment with all tags removed and block
    /// boundaries turned into line breaks.
    pub text: String,
    /// Characters of the trimmed text content, not counting inserted breaks.
    pub char_count: usize,
    pub line_count: usize,
    pub word_count: usize,
    pub headings: Vec<Element>,
    pub paragraphs: Vec<Element>,
    pub lists: Vec<Element>,
    pub list_items: Vec<Element>,
}

impl ContentAnalysis {
    pub fn heading_count(&self) -> usize {
        self.headings.len()
    }

    pub fn paragraph_count(&self) -> usize {
        self.paragraphs.len()
    }

    pub fn list_count(&self) -> usize {
        self.lists.len()
    }

    pub fn list_item_count(&self) -> usize {
        self.list_items.len()
    }

    /// Outer HTML of the first heading, or an empty string when there is none.
    pub fn first_heading_html(&self) -> &str {
        self.headings
            .first()
            .map(|h| h.outer_html.as_str())
            .unwrap_or("")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Category {
    Heading,
    Paragraph,
    List,
    ListItem,
}

fn category(tag: &str) -> Option<Category> {
    match tag {
        "h1" | "h2" | "h3" => Some(Category::Heading),
        "p" => Some(Category::Paragraph),
        "ul" | "ol" => Some(Category::List),
        "li" => Some(Category::ListItem),
        _ => None,
    }
}

struct OpenElement {
    tag: String,
    start: usize,
    text_start: usize,
}

struct Tag<'a> {
    name: String,
    closing: bool,
    self_closing: bool,
    raw: &'a str,
}

/// Try to read a tag starting at `html[pos]` (which must be `<`).
///
/// Returns `None` when the `<` does not open a tag, in which case it is text.
fn read_tag(html: &str, pos: usize) -> Option<Tag<'_>> {
    let rest = &html[pos..];
    let end = rest.find('>')?;
    let raw = &rest[..=end];
    let inner = &raw[1..raw.len() - 1];
    let (closing, body) = match inner.strip_prefix('/') {
        Some(body) => (true, body),
        None => (false, inner),
    };
    if !body.starts_with(|c: char| c.is_ascii_alphabetic()) {
        return None;
    }
    let name: String = body
        .chars()
        .take_while(|c| c.is_ascii_alphanumeric())
        .collect::<String>()
        .to_ascii_lowercase();
    Some(Tag {
        name,
        closing,
        self_closing: inner.ends_with('/'),
        raw,
    })
}

/// Analyze an HTML fragment.
///
/// Text content is every character outside of tags, in order, with a line
/// break inserted where a block element starts on a non-empty line (and for
/// `<br>`), so adjacent blocks never run together. The character count ignores
/// those inserted breaks. Elements left unclosed are
/// closed at the end of input, and closing tags with no matching open element
/// are ignored.
pub fn analyze(html: &str) -> ContentAnalysis {
    let mut text = String::with_capacity(html.len());
    let mut raw_text = String::with_capacity(html.len());
    let mut stack: Vec<OpenElement> = Vec::new();
    let mut found: Vec<(usize, Category, Element)> = Vec::new();

    let mut close = |open: OpenElement, end: usize, text: &str| {
        if let Some(cat) = category(&open.tag) {
            found.push((
                open.start,
                cat,
                Element {
                    tag: open.tag,
                    outer_html: html[open.start..end].to_string(),
                    text: text[open.text_start..].to_string(),
                },
            ));
        }
    };

    let mut pos = 0;
    while pos < html.len() {
        let next_lt = html[pos..].find('<').map(|i| pos + i);
        let Some(lt) = next_lt else {
            text.push_str(&html[pos..]);
            raw_text.push_str(&html[pos..]);
            break;
        };
        text.push_str(&html[pos..lt]);
        raw_text.push_str(&html[pos..lt]);

        match read_tag(html, lt) {
            Some(tag) => {
                let tag_end = lt + tag.raw.len();
                if tag.closing {
                    if let Some(idx) = stack.iter().rposition(|o| o.tag == tag.name) {
                        // Anything still open above the match is closed implicitly.
                        while stack.len() > idx + 1 {
                            if let Some(inner) = stack.pop() {
                                close(inner, lt, &text);
                            }
                        }
                        if let Some(open) = stack.pop() {
                            close(open, tag_end, &text);
                        }
                    }
                } else if tag.name == "br" {
                    text.push('\n');
                } else if !tag.self_closing && !VOID_TAGS.contains(&tag.name.as_str()) {
                    if BLOCK_TAGS.contains(&tag.name.as_str())
                        && !text.is_empty()
                        && !text.ends_with('\n')
                    {
                        text.push('\n');
                    }
                    stack.push(OpenElement {
                        tag: tag.name,
                        start: lt,
                        text_start: text.len(),
                    });
                }
                pos = tag_end;
            }
            None => {
                text.push('<');
                raw_text.push('<');
                pos = lt + 1;
            }
        }
    }

    while let Some(open) = stack.pop() {
        close(open, html.len(), &text);
    }

    found.sort_by_key(|(start, _, _)| *start);

    let mut analysis = ContentAnalysis::default();
    for (_, cat, element) in found {
        match cat {
            Category::Heading => analysis.headings.push(element),
            Category::Paragraph => analysis.paragraphs.push(element),
            Category::List => analysis.lists.push(element),
            Category::ListItem => analysis.list_items.push(element),
        }
    }

    analysis.char_count = raw_text.trim().chars().count();
    analysis.line_count = text.split('\n').filter(|l| !l.trim().is_empty()).count();
    analysis.word_count = text.split_whitespace().count();
    analysis.text = text;
    analysis
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts_elements_and_text() {
        let html = "<h2>Title</h2><p>One <strong>two</strong></p><ul class=\"fragment\"><li>a</li><li>b</li></ul>";
        let analysis = analyze(html);

        assert_eq!(analysis.heading_count(), 1);
        assert_eq!(analysis.paragraph_count(), 1);
        assert_eq!(analysis.list_count(), 1);
        assert_eq!(analysis.list_item_count(), 2);
        assert_eq!(analysis.text, "Title\nOne two\nab");
        assert_eq!(analysis.char_count, 14);
        assert_eq!(analysis.word_count, 4);
        assert_eq!(analysis.line_count, 3);
    }

    #[test]
    fn test_outer_html_is_exact_source() {
        let html = "<h1>A</h1>\n<ul class=\"fragment\"><li><em>x</em></li></ul>";
        let analysis = analyze(html);

        assert_eq!(analysis.first_heading_html(), "<h1>A</h1>");
        assert_eq!(
            analysis.lists[0].outer_html,
            "<ul class=\"fragment\"><li><em>x</em></li></ul>"
        );
        assert_eq!(analysis.list_items[0].outer_html, "<li><em>x</em></li>");
        assert_eq!(analysis.list_items[0].text, "x");
    }

    #[test]
    fn test_lines_come_from_text_newlines() {
        let analysis = analyze("<h2>A</h2>\n<p>B</p>\n\n<p>C</p>");
        assert_eq!(analysis.line_count, 3);
    }

    #[test]
    fn test_list_items_share_a_line() {
        let analysis = analyze("<ul><li>a</li><li>b</li></ul>");
        assert_eq!(analysis.text, "ab");
        assert_eq!(analysis.list_items[1].char_len(), 1);
    }

    #[test]
    fn test_empty_fragment() {
        let analysis = analyze("");
        assert_eq!(analysis.char_count, 0);
        assert_eq!(analysis.word_count, 0);
        assert_eq!(analysis.line_count, 0);
        assert_eq!(analysis.first_heading_html(), "");
    }

    #[test]
    fn test_stray_angle_bracket_is_text() {
        let analysis = analyze("<p>1 < 2</p>");
        assert_eq!(analysis.text, "1 < 2");
        assert_eq!(analysis.paragraph_count(), 1);
    }

    #[test]
    fn test_unclosed_elements_close_at_end() {
        let analysis = analyze("<p>open <em>inner");
        assert_eq!(analysis.paragraph_count(), 1);
        assert_eq!(analysis.paragraphs[0].outer_html, "<p>open <em>inner");
        assert_eq!(analysis.paragraphs[0].text, "open inner");
    }

    #[test]
    fn test_heading_levels_beyond_three_are_not_headings() {
        let analysis = analyze("<h4>x</h4><h3>y</h3>");
        assert_eq!(analysis.heading_count(), 1);
        assert_eq!(analysis.headings[0].tag, "h3");
    }

    #[test]
    fn test_nested_elements_keep_document_order() {
        let analysis = analyze("<div><p>first</p><div><p>second</p></div></div><p>third</p>");
        let texts: Vec<&str> = analysis.paragraphs.iter().map(|p| p.text.as_str()).collect();
        assert_eq!(texts, vec!["first", "second", "third"]);
    }
}
