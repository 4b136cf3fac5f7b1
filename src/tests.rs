// ABOUTME: Crate-level tests for the slidemark library
// ABOUTME: Exercise the parse, optimize and assembly stages together

use super::*;
use std::io::Write;
use tempfile::{NamedTempFile, TempDir};

fn create_temp_markdown_file(content: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(".md")
        .tempfile()
        .expect("Failed to create temp file");
    file.write_all(content.as_bytes())
        .expect("Failed to write to temp file");
    file
}

fn bullet_list(count: usize) -> String {
    (1..=count)
        .map(|i| format!("- item{}", i))
        .collect::<Vec<_>>()
        .join("\n")
}

#[test]
fn test_title_and_slide_pipeline() {
    let slides = optimize(&parse("# Title\n\n## Slide One\nHello world"));

    assert_eq!(slides.len(), 2);
    assert_eq!(slides[0].content, "<h1>Title</h1>");
    assert_eq!(slides[1].content, "<h2>Slide One</h2><p>Hello world</p>");
    assert!(slides.iter().all(|s| s.size == SizeClass::Large));
}

#[test]
fn test_ten_list_items_become_two_slides() {
    let markdown = format!("## Items\n{}", bullet_list(10));
    let slides = optimize(&parse(&markdown));

    assert_eq!(slides.len(), 2);
    for slide in &slides {
        assert!(slide.content.starts_with("<h2>Items</h2><ul class=\"fragment\">"));
    }
    assert_eq!(slides[0].content.matches("<li>").count(), 8);
    assert_eq!(slides[1].content.matches("<li>").count(), 2);
    assert!(slides[1].content.contains("<li>item9</li><li>item10</li>"));
}

#[test]
fn test_inline_markup_in_a_slide() {
    let slides = parse("**bold** and *italic* and `code`");
    assert_eq!(
        slides,
        vec!["<p><strong>bold</strong> and <em>italic</em> and <code>code</code></p>"]
    );
}

#[test]
fn test_short_paragraphs_are_kept_on_one_slide() {
    let markdown = "## Notes\nOne.\n\nTwo.\n\nThree.\n\nFour.\n\nFive.";
    let slides = optimize(&parse(markdown));

    assert_eq!(slides.len(), 1);
    assert_eq!(analyze(&slides[0].content).paragraph_count(), 5);
}

#[test]
fn test_750_chars_classify_as_normal() {
    assert_eq!(classify(&"a".repeat(750)), SizeClass::Normal);
}

#[test]
fn test_slide_order_is_preserved_across_splits() {
    let markdown = format!(
        "## First\n{}\n---\n## Second\nshort\n---\n## Third\n{}",
        bullet_list(9),
        bullet_list(3)
    );
    let slides = optimize(&parse(&markdown));

    let headings: Vec<String> = slides
        .iter()
        .map(|s| analyze(&s.content).headings[0].text.clone())
        .collect();
    assert_eq!(headings, vec!["First", "First", "Second", "Third"]);
}

#[test]
fn test_every_parsed_slide_is_covered() {
    let markdown = "# A\n\n## B\ntext\n\n## C\n- x\n- y";
    let parsed = parse(markdown);
    let optimized = optimize(&parsed);

    assert_eq!(parsed.len(), 3);
    assert!(optimized.len() >= parsed.len());
    for fragment in &parsed {
        assert!(optimized.iter().any(|s| &s.content == fragment));
    }
}

#[test]
fn test_generate_presentation_from_file() {
    let markdown_file = create_temp_markdown_file("# Deck\n\n## Intro\nWelcome **all**");
    let options = PresentationOptions::default();

    let presentation = generate_presentation(markdown_file.path(), &options).unwrap();

    assert_eq!(presentation.slide_count(), 2);
    assert!(presentation.html.contains("<title>Deck</title>"));
    assert!(presentation
        .html
        .contains("<h2>Intro</h2><p>Welcome <strong>all</strong></p>"));
    assert!(presentation.html.contains("1 / 2"));
}

#[test]
fn test_generate_presentation_rejects_empty_file() {
    let markdown_file = create_temp_markdown_file("\n\n   \n");
    let result = generate_presentation(markdown_file.path(), &PresentationOptions::default());
    assert!(matches!(result, Err(SlideError::EmptyInput)));
}

#[test]
fn test_generate_presentation_missing_file() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let result = generate_presentation(
        &dir.path().join("missing.md"),
        &PresentationOptions::default(),
    );
    assert!(matches!(result, Err(SlideError::PathNotFoundError(_))));
}

#[test]
fn test_write_presentation_creates_directories() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let output = dir.path().join("out/deck/index.html");

    let presentation = build_presentation("# Hi", &PresentationOptions::default()).unwrap();
    write_presentation(&presentation.html, &output).unwrap();

    let written = std::fs::read_to_string(&output).unwrap();
    assert_eq!(written, presentation.html);
}

#[test]
fn test_custom_optimizer_config_flows_through_options() {
    let config = Config {
        optimizer: OptimizerConfig {
            max_list_items: 3,
            ..OptimizerConfig::default()
        },
        ..Config::default()
    };
    let options = config.presentation_options(None, None, None);
    let markdown = format!("## Items\n{}", bullet_list(7));

    let presentation = build_presentation(&markdown, &options).unwrap();
    assert_eq!(presentation.slide_count(), 3);
}

#[test]
fn test_demo_deck_builds() {
    let presentation = build_presentation(DEMO_MARKDOWN, &PresentationOptions::default()).unwrap();
    assert_eq!(presentation.slide_count(), 6);
    assert!(presentation.html.contains("<title>The Art of the Prompt</title>"));

    let stats = PresentationStats::compute(&presentation.html, presentation.slide_count());
    assert_eq!(stats.slide_count, 6);
    assert!(stats.co2_saved_grams > 0);
}
