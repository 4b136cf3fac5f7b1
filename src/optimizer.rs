// ABOUTME: Slide optimization module for the slidemark application
// ABOUTME: Re-paginates overflowing slides and tags each slide with a density-based size class

use crate::analysis::{analyze, ContentAnalysis};
use crate::markdown::list_html;
use log::debug;
use regex::Regex;
use std::fmt;
use std::sync::OnceLock;

/// Divisor applied to the element count when computing density.
const ELEMENTS_PER_FULL_SLIDE: f64 = 10.0;

/// Thresholds driving re-pagination.
#[derive(Debug, Clone, PartialEq)]
pub struct OptimizerConfig {
    pub max_chars: usize,
    pub max_lines: usize,
    pub max_list_items: usize,
    /// Paragraph splitting applies when the paragraph count exceeds this.
    pub paragraph_split_threshold: usize,
    /// Sentence splitting applies only up to this many paragraphs.
    pub sentence_split_max_paragraphs: usize,
}

impl Default for OptimizerConfig {
    fn default() -> Self {
        Self {
            max_chars: 800,
            max_lines: 15,
            max_list_items: 8,
            paragraph_split_threshold: 4,
            sentence_split_max_paragraphs: 2,
        }
    }
}

/// Font scale assigned to a slide from its density.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SizeClass {
    Smallest,
    Small,
    Normal,
    Large,
}

impl SizeClass {
    pub const ALL: [SizeClass; 4] = [
        SizeClass::Smallest,
        SizeClass::Small,
        SizeClass::Normal,
        SizeClass::Large,
    ];

    /// Pick the class for a density score.
    pub fn from_density(score: f64) -> Self {
        if score > 0.9 {
            SizeClass::Smallest
        } else if score > 0.7 {
            SizeClass::Small
        } else if score < 0.3 {
            SizeClass::Large
        } else {
            SizeClass::Normal
        }
    }

    pub fn css_class(self) -> &'static str {
        match self {
            SizeClass::Smallest => "size-smallest",
            SizeClass::Small => "size-small",
            SizeClass::Normal => "size-normal",
            SizeClass::Large => "size-large",
        }
    }

    /// Relative font size in `em`.
    pub fn font_scale(self) -> f64 {
        match self {
            SizeClass::Smallest => 0.75,
            SizeClass::Small => 0.85,
            SizeClass::Normal => 1.0,
            SizeClass::Large => 1.15,
        }
    }
}

impl fmt::Display for SizeClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.css_class())
    }
}

/// A slide fragment tagged with its size class.
///
/// Displays as the fragment wrapped in a `<div>` carrying the class.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SizedFragment {
    pub content: String,
    pub size: SizeClass,
}

impl fmt::Display for SizedFragment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<div class=\"{}\">{}</div>", self.size, self.content)
    }
}

/// How an overflowing fragment gets re-paginated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SplitStrategy {
    /// The fragment already fits.
    Keep,
    ByList,
    ByParagraph,
    BySentence,
    /// Over a threshold, but no rule applies.
    PassThrough,
}

fn re_sentence_end() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[.!?]+\s+").expect("re_sentence_end: pattern is valid"))
}

/// Split text after each run of `.`, `!` or `?` followed by whitespace.
///
/// The delimiter and its whitespace stay on the chunk they end; blank chunks
/// are dropped.
pub fn split_sentences(text: &str) -> Vec<&str> {
    let mut chunks = Vec::new();
    let mut start = 0;
    for end in re_sentence_end().find_iter(text) {
        chunks.push(&text[start..end.end()]);
        start = end.end();
    }
    chunks.push(&text[start..]);
    chunks.retain(|c| !c.trim().is_empty());
    chunks
}

#[derive(Debug, Clone, Default)]
pub struct Optimizer {
    config: OptimizerConfig,
}

impl Optimizer {
    pub fn new(config: OptimizerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &OptimizerConfig {
        &self.config
    }

    /// Optimize every fragment, keeping presentation order.
    pub fn optimize<S: AsRef<str>>(&self, fragments: &[S]) -> Vec<SizedFragment> {
        let optimized: Vec<SizedFragment> = fragments
            .iter()
            .flat_map(|fragment| self.optimize_fragment(fragment.as_ref()))
            .collect();
        debug!(
            "Optimized {} fragments into {} slides",
            fragments.len(),
            optimized.len()
        );
        optimized
    }

    /// Split one fragment if needed and tag each resulting slide.
    pub fn optimize_fragment(&self, html: &str) -> Vec<SizedFragment> {
        self.split(html)
            .into_iter()
            .map(|content| {
                let size = self.size_class(&analyze(&content));
                SizedFragment { content, size }
            })
            .collect()
    }

    pub fn is_optimal(&self, analysis: &ContentAnalysis) -> bool {
        analysis.char_count <= self.config.max_chars
            && analysis.list_item_count() <= self.config.max_list_items
            && analysis.line_count <= self.config.max_lines
    }

    /// Choose how to re-paginate; the first matching rule wins.
    pub fn strategy(&self, analysis: &ContentAnalysis) -> SplitStrategy {
        if self.is_optimal(analysis) {
            SplitStrategy::Keep
        } else if analysis.list_item_count() > self.config.max_list_items {
            SplitStrategy::ByList
        } else if analysis.paragraph_count() > self.config.paragraph_split_threshold {
            SplitStrategy::ByParagraph
        } else if analysis.paragraph_count() <= self.config.sentence_split_max_paragraphs
            && analysis.char_count > self.config.max_chars
        {
            SplitStrategy::BySentence
        } else {
            SplitStrategy::PassThrough
        }
    }

    /// Re-paginate a fragment. Never returns an empty vector.
    pub fn split(&self, html: &str) -> Vec<String> {
        let analysis = analyze(html);
        let strategy = self.strategy(&analysis);

        let slides = match strategy {
            SplitStrategy::Keep | SplitStrategy::PassThrough => Vec::new(),
            SplitStrategy::ByList => self.split_by_list(&analysis),
            SplitStrategy::ByParagraph => self.split_by_paragraph(&analysis),
            SplitStrategy::BySentence => self.split_by_sentence(&analysis),
        };

        if slides.is_empty() {
            return vec![html.to_string()];
        }

        debug!("Split slide with {:?} into {} slides", strategy, slides.len());
        slides
    }

    fn split_by_list(&self, analysis: &ContentAnalysis) -> Vec<String> {
        let heading = analysis.first_heading_html();
        analysis
            .list_items
            .chunks(self.config.max_list_items.max(1))
            .map(|chunk| {
                let items: Vec<String> = chunk.iter().map(|li| li.outer_html.clone()).collect();
                format!("{}{}", heading, list_html(&items))
            })
            .collect()
    }

    fn split_by_paragraph(&self, analysis: &ContentAnalysis) -> Vec<String> {
        let heading = analysis.first_heading_html();
        let mut slides = Vec::new();
        let mut current = String::new();
        let mut current_chars = 0;

        for paragraph in &analysis.paragraphs {
            let len = paragraph.char_len();
            if current_chars + len > self.config.max_chars && !current.is_empty() {
                slides.push(format!("{}{}", heading, current));
                current.clear();
                current_chars = 0;
            }
            current.push_str(&paragraph.outer_html);
            current_chars += len;
        }

        if !current.is_empty() {
            slides.push(format!("{}{}", heading, current));
        }
        slides
    }

    fn split_by_sentence(&self, analysis: &ContentAnalysis) -> Vec<String> {
        let heading = analysis.first_heading_html();
        let mut slides = Vec::new();
        let mut current = String::new();
        let mut current_chars = 0;

        let flush = |current: &str, slides: &mut Vec<String>| {
            slides.push(format!("{}<p>{}</p>", heading, current.trim()));
        };

        for sentence in split_sentences(&analysis.text) {
            let len = sentence.chars().count();
            if current_chars + len > self.config.max_chars && !current.is_empty() {
                flush(&current, &mut slides);
                current.clear();
                current_chars = 0;
            }
            current.push_str(sentence);
            current_chars += len;
        }

        if !current.is_empty() {
            flush(&current, &mut slides);
        }
        slides
    }

    /// Density: mean of the character fill ratio and the element fill ratio.
    pub fn density(&self, analysis: &ContentAnalysis) -> f64 {
        let char_score = analysis.char_count as f64 / self.config.max_chars as f64;
        let element_score = (analysis.list_item_count() + analysis.paragraph_count()) as f64
            / ELEMENTS_PER_FULL_SLIDE;
        (char_score + element_score) / 2.0
    }

    pub fn size_class(&self, analysis: &ContentAnalysis) -> SizeClass {
        SizeClass::from_density(self.density(analysis))
    }
}

/// Optimize fragments with the default thresholds.
pub fn optimize<S: AsRef<str>>(fragments: &[S]) -> Vec<SizedFragment> {
    Optimizer::default().optimize(fragments)
}

/// Size class of a fragment under the default thresholds.
pub fn classify(html: &str) -> SizeClass {
    Optimizer::default().size_class(&analyze(html))
}
