use std::fs;
use tempfile::TempDir;

use slidemark::{
    analyze, build_presentation, generate_presentation, write_presentation, Config,
    PresentationOptions, PresentationStats, ResourceFile, SizeClass, SlideError,
};

fn long_paragraph(sentences: usize) -> String {
    (0..sentences)
        .map(|i| format!("Sentence number {} talks about the topic at some length.", i))
        .collect::<Vec<_>>()
        .join(" ")
}

#[test]
fn test_full_pipeline() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let markdown_path = temp_dir.path().join("talk.md");
    let output_path = temp_dir.path().join("out/talk.html");

    let items = (1..=12)
        .map(|i| format!("- point {}", i))
        .collect::<Vec<_>>()
        .join("\n");
    let markdown = format!(
        "# Conference Talk\n\n## Agenda\n{}\n\n## Deep dive\n{}\n\n## End\nThanks",
        items,
        long_paragraph(30)
    );
    fs::write(&markdown_path, markdown).expect("Failed to write markdown file");

    let options = Config::default().presentation_options(Some("nature"), None, None);
    let presentation = generate_presentation(&markdown_path, &options).unwrap();
    write_presentation(&presentation.html, &output_path).unwrap();

    // title + agenda (8 + 4) + deep dive (split on sentences) + end
    let headings: Vec<String> = presentation
        .slides
        .iter()
        .map(|slide| analyze(&slide.content).headings[0].text.clone())
        .collect();
    assert_eq!(headings[0], "Conference Talk");
    assert_eq!(&headings[1..3], &["Agenda", "Agenda"]);
    assert!(headings.iter().filter(|h| *h == "Deep dive").count() >= 2);
    assert_eq!(headings.last().map(String::as_str), Some("End"));

    for slide in &presentation.slides {
        let analysis = analyze(&slide.content);
        assert!(analysis.list_item_count() <= 8);
        assert!(analysis.char_count <= 800 + "Deep dive".len());
    }

    let written = fs::read_to_string(&output_path).expect("Failed to read output file");
    assert!(written.contains("#27ae60"), "Missing theme colors");
    assert_eq!(
        written.matches("<section>").count(),
        presentation.slide_count()
    );
}

#[test]
fn test_pipeline_with_empty_content() {
    let options = PresentationOptions::default();
    assert!(matches!(
        build_presentation("", &options),
        Err(SlideError::EmptyInput)
    ));
    assert!(matches!(
        build_presentation("\n---\n---\n", &options),
        Err(SlideError::EmptyInput)
    ));
}

#[test]
fn test_size_classes_in_document() {
    let markdown = format!("## Dense\n{}\n---\n## Light\nHi", "x".repeat(780));
    let presentation = build_presentation(&markdown, &PresentationOptions::default()).unwrap();

    assert_eq!(presentation.slides[0].size, SizeClass::Normal);
    assert_eq!(presentation.slides[1].size, SizeClass::Large);
    assert!(presentation.html.contains("<div class=\"size-large\"><h2>Light</h2>"));
}

#[test]
fn test_embedded_local_assets() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let css_path = temp_dir.path().join("reveal.css");
    let js_path = temp_dir.path().join("reveal.js");
    fs::write(&css_path, ".reveal { color: red; }").unwrap();
    fs::write(&js_path, "var Reveal = {};").unwrap();

    let options = PresentationOptions {
        embed_assets: true,
        reveal_css: ResourceFile::new(css_path.to_str().unwrap()),
        reveal_js: ResourceFile::new(js_path.to_str().unwrap()),
        ..PresentationOptions::default()
    };
    let presentation = build_presentation("# Offline", &options).unwrap();

    assert!(presentation
        .html
        .contains("<style>.reveal { color: red; }</style>"));
    assert!(presentation.html.contains("<script>var Reveal = {};</script>"));
}

#[test]
fn test_missing_asset_falls_back_to_link() {
    let options = PresentationOptions {
        embed_assets: true,
        reveal_css: ResourceFile::new("/no/such/reveal.css"),
        reveal_js: ResourceFile::new("/no/such/reveal.js"),
        ..PresentationOptions::default()
    };
    let presentation = build_presentation("# Offline", &options).unwrap();

    assert!(presentation
        .html
        .contains(r#"<link rel="stylesheet" href="/no/such/reveal.css">"#));
    assert!(presentation
        .html
        .contains(r#"<script src="/no/such/reveal.js"></script>"#));
}

#[test]
#[ignore] // Requires network access to the CDN
fn test_embedded_remote_assets() {
    let options = PresentationOptions {
        embed_assets: true,
        ..PresentationOptions::default()
    };
    let presentation = build_presentation("# Online", &options).unwrap();
    assert!(!presentation.html.contains("cdn.jsdelivr.net"));

    let stats = PresentationStats::compute(&presentation.html, presentation.slide_count());
    assert!(stats.size_kb > 50.0);
}
