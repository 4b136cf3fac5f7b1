// ABOUTME: Presentation assembly module for the slidemark application
// ABOUTME: Runs parse and optimize, then wraps the slides into one standalone Reveal.js HTML document

use crate::analysis::analyze;
use crate::errors::{Result, SlideError};
use crate::markdown;
use crate::optimizer::{Optimizer, OptimizerConfig, SizedFragment};
use crate::resources::{ResourceFile, ResourceKind, REVEAL_CSS_URL, REVEAL_JS_URL};
use crate::theme::{theme_css, Theme, DEFAULT_THEME};
use crate::utils;
use log::{info, warn};
use std::fs;
use std::path::Path;

const DEFAULT_TITLE: &str = "Presentation";

/// Settings for assembling a presentation document.
#[derive(Debug, Clone)]
pub struct PresentationOptions {
    /// Document title; the first `<h1>` of the deck is used when unset.
    pub title: Option<String>,
    pub theme: &'static Theme,
    pub footer: Option<String>,
    pub width: u32,
    pub height: u32,
    /// Inline the Reveal.js assets instead of linking them.
    pub embed_assets: bool,
    pub reveal_css: ResourceFile,
    pub reveal_js: ResourceFile,
    pub optimizer: OptimizerConfig,
}

impl Default for PresentationOptions {
    fn default() -> Self {
        Self {
            title: None,
            theme: Theme::or_default(DEFAULT_THEME),
            footer: None,
            width: 960,
            height: 700,
            embed_assets: false,
            reveal_css: ResourceFile::new(REVEAL_CSS_URL),
            reveal_js: ResourceFile::new(REVEAL_JS_URL),
            optimizer: OptimizerConfig::default(),
        }
    }
}

/// A generated presentation document.
#[derive(Debug, Clone)]
pub struct Presentation {
    pub html: String,
    pub slides: Vec<SizedFragment>,
}

impl Presentation {
    pub fn slide_count(&self) -> usize {
        self.slides.len()
    }
}

/// Build a presentation from a Markdown file.
pub fn generate_presentation(
    markdown_path: &Path,
    options: &PresentationOptions,
) -> Result<Presentation> {
    info!("Generating presentation from markdown: {:?}", markdown_path);
    let markdown = utils::read_markdown(markdown_path)?;
    build_presentation(&markdown, options)
}

/// Build a presentation from Markdown text.
pub fn build_presentation(markdown: &str, options: &PresentationOptions) -> Result<Presentation> {
    if markdown.trim().is_empty() {
        return Err(SlideError::EmptyInput);
    }

    let fragments = markdown::parse(markdown);
    if fragments.is_empty() {
        return Err(SlideError::EmptyInput);
    }
    info!("{} slides parsed", fragments.len());

    let slides = Optimizer::new(options.optimizer.clone()).optimize(&fragments);
    info!("{} slides after optimization", slides.len());

    let html = render_document(&slides, options);
    Ok(Presentation { html, slides })
}

fn deck_title(slides: &[SizedFragment]) -> Option<String> {
    slides.iter().find_map(|slide| {
        analyze(&slide.content)
            .headings
            .into_iter()
            .find(|h| h.tag == "h1")
            .map(|h| h.text.trim().to_string())
            .filter(|t| !t.is_empty())
    })
}

fn asset_tag(resource: &ResourceFile, kind: ResourceKind, embed: bool) -> String {
    match resource.tag(kind, embed) {
        Ok(tag) => tag,
        Err(e) => {
            warn!(
                "Failed to embed resource {}: {}. Linking it instead.",
                resource.path, e
            );
            resource.link_tag(kind)
        }
    }
}

fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// Assemble the standalone HTML document for already optimized slides.
pub fn render_document(slides: &[SizedFragment], options: &PresentationOptions) -> String {
    let title = options
        .title
        .clone()
        .or_else(|| deck_title(slides))
        .unwrap_or_else(|| DEFAULT_TITLE.to_string());

    let mut html_doc = String::from("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    html_doc.push_str("<meta charset=\"UTF-8\">\n");
    html_doc.push_str(
        "<meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">\n",
    );
    html_doc.push_str(&format!("<title>{}</title>\n", escape_html(&title)));
    html_doc.push_str(&asset_tag(
        &options.reveal_css,
        ResourceKind::Css,
        options.embed_assets,
    ));
    html_doc.push('\n');
    html_doc.push_str("<style>\n");
    html_doc.push_str(&theme_css(options.theme));
    html_doc.push_str("</style>\n");
    html_doc.push_str("</head>\n<body>\n");

    html_doc.push_str("<div class=\"reveal\">\n<div class=\"slides\">\n");
    for slide in slides {
        html_doc.push_str("<section>");
        html_doc.push_str(&slide.to_string());
        html_doc.push_str("</section>\n");
    }
    html_doc.push_str("</div>\n</div>\n");

    html_doc.push_str(
        "<div class=\"custom-controls\">\n\
         <button class=\"control-button\" onclick=\"Reveal.prev()\" title=\"Previous slide\">&larr;</button>\n\
         <button class=\"control-button\" onclick=\"Reveal.next()\" title=\"Next slide\">&rarr;</button>\n\
         </div>\n",
    );
    html_doc.push_str(
        "<div class=\"progress-bar\"><div class=\"progress-fill\" id=\"progress\"></div></div>\n",
    );
    html_doc.push_str(&format!(
        "<div class=\"slide-number\" id=\"slideNumber\">1 / {}</div>\n",
        slides.len()
    ));
    if let Some(footer) = &options.footer {
        html_doc.push_str(&format!(
            "<div class=\"footer\">{}</div>\n",
            escape_html(footer)
        ));
    }

    html_doc.push_str(&asset_tag(
        &options.reveal_js,
        ResourceKind::Js,
        options.embed_assets,
    ));
    html_doc.push('\n');
    html_doc.push_str("<script>\n");
    html_doc.push_str(&init_script(options.width, options.height));
    html_doc.push_str("</script>\n");

    html_doc.push_str("</body>\n</html>");
    html_doc
}

fn init_script(width: u32, height: u32) -> String {
    format!(
        r#"Reveal.initialize({{
    width: {width},
    height: {height},
    margin: 0.1,
    minScale: 0.2,
    maxScale: 2.0,
    controls: false,
    progress: false,
    center: true,
    hash: true,
    slideNumber: false,
    transition: 'slide',
    transitionSpeed: 'default',
    fragments: true,
    fragmentInURL: true,
    keyboard: true,
    overview: true,
    touch: true,
    loop: false,
    rtl: false,
    shuffle: false,
    mouseWheel: false,
    hideAddressBar: true,
    previewLinks: false
}});

Reveal.on('slidechanged', function() {{
    var indices = Reveal.getIndices();
    var total = Reveal.getTotalSlides();
    document.getElementById('progress').style.width = ((indices.h + 1) / total) * 100 + '%';
    document.getElementById('slideNumber').textContent = (indices.h + 1) + ' / ' + total;
}});

document.addEventListener('keydown', function(e) {{
    if ((e.key === 'f' || e.key === 'F') && document.documentElement.requestFullscreen) {{
        document.documentElement.requestFullscreen();
    }}
}});
"#
    )
}

/// Write a presentation document, creating the parent directory if needed.
pub fn write_presentation(html_content: &str, output_path: &Path) -> Result<()> {
    info!("Writing presentation to file: {:?}", output_path);
    utils::ensure_parent_directory_exists(output_path)?;
    fs::write(output_path, html_content).map_err(SlideError::FileReadError)?;
    Ok(())
}
