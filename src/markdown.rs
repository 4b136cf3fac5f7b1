// ABOUTME: Markdown parsing module for the slidemark application
// ABOUTME: Splits restricted Markdown into slide segments and converts each to an HTML fragment

use log::debug;
use regex::Regex;
use std::sync::OnceLock;

/// Canonical token every separator line is collapsed into.
pub const SLIDE_SEPARATOR: &str = "\n---\n";

/// CSS class carried by generated lists, used by the renderer to reveal items one by one.
pub const FRAGMENT_CLASS: &str = "fragment";

/// A single pattern-based text rewrite.
///
/// Rules are applied in slice order by [`apply_rules`]; the order is part of
/// the contract (bold must be consumed before italic).
#[derive(Debug)]
pub struct RewriteRule {
    pub name: &'static str,
    pub scope: RuleScope,
    pub pattern: Regex,
    pub replacement: &'static str,
}

/// Whether a rule matches whole lines or spans inside a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleScope {
    Line,
    Inline,
}

impl RewriteRule {
    fn new(name: &'static str, scope: RuleScope, pattern: &str, replacement: &'static str) -> Self {
        Self {
            name,
            scope,
            pattern: Regex::new(pattern).expect("rewrite rule pattern is valid"),
            replacement,
        }
    }

    /// Apply this rule to every match in `text`.
    pub fn apply(&self, text: &str) -> String {
        self.pattern.replace_all(text, self.replacement).into_owned()
    }
}

/// The ordered line-level and inline conversions, headings first.
pub fn rewrite_rules() -> &'static [RewriteRule] {
    static RULES: OnceLock<Vec<RewriteRule>> = OnceLock::new();
    RULES.get_or_init(|| {
        vec![
            RewriteRule::new("h1", RuleScope::Line, r"(?m)^# (.+)$", "<h1>${1}</h1>"),
            RewriteRule::new("h2", RuleScope::Line, r"(?m)^## (.+)$", "<h2>${1}</h2>"),
            RewriteRule::new("h3", RuleScope::Line, r"(?m)^### (.+)$", "<h3>${1}</h3>"),
            RewriteRule::new(
                "bold",
                RuleScope::Inline,
                r"\*\*(.+?)\*\*",
                "<strong>${1}</strong>",
            ),
            RewriteRule::new("italic", RuleScope::Inline, r"\*(.+?)\*", "<em>${1}</em>"),
            RewriteRule::new("code", RuleScope::Inline, r"`([^`]+)`", "<code>${1}</code>"),
            RewriteRule::new(
                "link",
                RuleScope::Inline,
                r"\[([^\]]+)\]\(([^\)]+)\)",
                r#"<a href="${2}" target="_blank">${1}</a>"#,
            ),
        ]
    })
}

/// Run `rules` over `text` one after the other.
pub fn apply_rules(text: &str, rules: &[RewriteRule]) -> String {
    rules
        .iter()
        .fold(text.to_string(), |acc, rule| rule.apply(&acc))
}

fn re_html_tag() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"<[^>]*>").expect("re_html_tag: pattern is valid"))
}

fn re_separator_line() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?m)^---+$").expect("re_separator_line: pattern is valid"))
}

fn re_h2_boundary() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\n##\s").expect("re_h2_boundary: pattern is valid"))
}

fn re_bullet_item() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[-*]\s+(.+)$").expect("re_bullet_item: pattern is valid"))
}

fn re_numbered_item() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\d+\.\s+(.+)$").expect("re_numbered_item: pattern is valid"))
}

fn re_bullet_marker() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[-*]\s+").expect("re_bullet_marker: pattern is valid"))
}

fn re_numbered_marker() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\d+\.\s+").expect("re_numbered_marker: pattern is valid"))
}

/// Parse a Markdown document into one HTML fragment per slide, in order.
pub fn parse(markdown: &str) -> Vec<String> {
    let sanitized = sanitize(markdown);
    let slides: Vec<String> = segment(&sanitized)
        .into_iter()
        .map(convert_segment)
        .collect();
    debug!("Parsed {} slides from markdown", slides.len());
    slides
}

/// Strip every HTML tag and collapse separator lines into [`SLIDE_SEPARATOR`].
///
/// Windows line endings are normalised first so line-anchored patterns see `\n` only.
pub fn sanitize(markdown: &str) -> String {
    let normalized = markdown.replace("\r\n", "\n");
    let stripped = re_html_tag().replace_all(&normalized, "");
    re_separator_line()
        .replace_all(&stripped, SLIDE_SEPARATOR)
        .into_owned()
}

/// Split sanitized text into slide segments.
///
/// Explicit separators win. Without any, every line starting with `## ` opens
/// a new segment. Blank segments are dropped.
pub fn segment(sanitized: &str) -> Vec<&str> {
    let slides: Vec<&str> = sanitized
        .split(SLIDE_SEPARATOR)
        .filter(|s| !s.trim().is_empty())
        .collect();

    if slides.len() != 1 {
        return slides;
    }

    let mut parts = Vec::new();
    let mut start = 0;
    for boundary in re_h2_boundary().find_iter(sanitized) {
        parts.push(&sanitized[start..boundary.start()]);
        start = boundary.start();
    }
    parts.push(&sanitized[start..]);

    parts.into_iter().filter(|s| !s.trim().is_empty()).collect()
}

/// Convert one segment's Markdown into its HTML fragment.
pub fn convert_segment(segment: &str) -> String {
    let converted = apply_rules(segment.trim(), rewrite_rules());
    group_lists(&converted)
}

/// Apply only the inline rules (emphasis, code, links) to a piece of text.
pub fn convert_inline(text: &str) -> String {
    rewrite_rules()
        .iter()
        .filter(|rule| rule.scope == RuleScope::Inline)
        .fold(text.to_string(), |acc, rule| rule.apply(&acc))
}

/// Whether a trimmed line is a bullet or numbered list item.
pub fn is_list_item(line: &str) -> bool {
    re_bullet_item().is_match(line) || re_numbered_item().is_match(line)
}

fn list_item_content(line: &str) -> String {
    let without_bullet = re_bullet_marker().replace(line, "");
    re_numbered_marker()
        .replace(&without_bullet, "")
        .into_owned()
}

/// Wrap list items in a `<ul>` carrying the fragment class.
pub fn list_html(items: &[String]) -> String {
    format!("<ul class=\"{}\">{}</ul>", FRAGMENT_CLASS, items.concat())
}

fn format_block_line(line: &str) -> String {
    if line.starts_with("<h") || line.starts_with("<ul") {
        line.to_string()
    } else {
        format!("<p>{}</p>", line)
    }
}

/// Group consecutive list lines into lists and wrap every other non-blank
/// line in a paragraph. Runs after every inline rule.
fn group_lists(text: &str) -> String {
    let mut blocks: Vec<String> = Vec::new();
    let mut items: Vec<String> = Vec::new();

    for line in text.split('\n') {
        let line = line.trim();

        if is_list_item(line) {
            items.push(format!("<li>{}</li>", list_item_content(line)));
            continue;
        }

        if !items.is_empty() {
            blocks.push(list_html(&items));
            items.clear();
        }

        if !line.is_empty() {
            blocks.push(format_block_line(line));
        }
    }

    if !items.is_empty() {
        blocks.push(list_html(&items));
    }

    blocks.concat()
}
