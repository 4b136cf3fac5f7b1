// ABOUTME: Resource handling for the slidemark application
// ABOUTME: Loads local or remote stylesheets and scripts and renders them as link or inline tags

use crate::errors::{Result, SlideError};
use log::info;
use reqwest::blocking::Client;
use std::fs;
use std::path::Path;
use std::time::Duration;

pub const REVEAL_CSS_URL: &str = "https://cdn.jsdelivr.net/npm/reveal.js@4.5.0/dist/reveal.min.css";
pub const REVEAL_JS_URL: &str = "https://cdn.jsdelivr.net/npm/reveal.js@4.5.0/dist/reveal.min.js";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceKind {
    Css,
    Js,
}

/// Represents a resource file that can be either local or remote.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceFile {
    pub path: String,
    pub is_remote: bool,
}

impl ResourceFile {
    /// Create a new ResourceFile from a path string.
    /// The path can be either a local file path or a URL.
    pub fn new(path: &str) -> Self {
        let is_remote = path.starts_with("http://") || path.starts_with("https://");
        Self {
            path: path.to_string(),
            is_remote,
        }
    }

    /// Get the content of the resource file, fetching it when remote.
    pub fn content(&self) -> Result<String> {
        if self.is_remote {
            self.fetch_remote_content()
        } else {
            self.read_local_content()
        }
    }

    /// Fetch content from a remote URL with retry capability
    fn fetch_remote_content(&self) -> Result<String> {
        info!("Fetching remote resource: {}", self.path);

        let client = Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .map_err(SlideError::FetchError)?;

        // Try up to 3 times with increasing backoff
        let mut retry_delay = 1000;
        let mut last_error = None;

        for attempt in 1..=3 {
            match client.get(&self.path).send() {
                Ok(response) => {
                    if response.status().is_success() {
                        return response.text().map_err(SlideError::FetchError);
                    }
                    let status = response.status();
                    last_error = Some(SlideError::InvalidResourcePath(format!(
                        "{} returned HTTP {}",
                        self.path, status
                    )));
                }
                Err(e) => {
                    last_error = Some(SlideError::FetchError(e));
                }
            }

            if attempt < 3 {
                info!(
                    "Fetch attempt {} failed, retrying in {} ms",
                    attempt, retry_delay
                );
                std::thread::sleep(Duration::from_millis(retry_delay));
                retry_delay *= 2;
            }
        }

        Err(last_error.unwrap_or_else(|| {
            SlideError::ValidationError("Unknown error fetching resource".to_string())
        }))
    }

    fn read_local_content(&self) -> Result<String> {
        info!("Reading local resource: {}", self.path);
        let path = Path::new(&self.path);
        if !path.exists() {
            return Err(SlideError::PathNotFoundError(path.to_path_buf()));
        }

        fs::read_to_string(path).map_err(SlideError::FileReadError)
    }

    /// Generate the HTML tag for the resource.
    /// With `embed` the content is inlined (fetched first when remote);
    /// otherwise the tag references the path.
    pub fn tag(&self, kind: ResourceKind, embed: bool) -> Result<String> {
        if !embed {
            return Ok(self.link_tag(kind));
        }

        let content = self.content()?;
        Ok(match kind {
            ResourceKind::Css => format!("<style>{}</style>", content),
            ResourceKind::Js => format!("<script>{}</script>", content),
        })
    }

    /// Tag referencing the resource without reading it.
    pub fn link_tag(&self, kind: ResourceKind) -> String {
        match kind {
            ResourceKind::Css => format!(r#"<link rel="stylesheet" href="{}">"#, self.path),
            ResourceKind::Js => format!(r#"<script src="{}"></script>"#, self.path),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_remote_detection() {
        assert!(ResourceFile::new(REVEAL_CSS_URL).is_remote);
        assert!(ResourceFile::new("http://example.com/a.js").is_remote);
        assert!(!ResourceFile::new("./style.css").is_remote);
    }

    #[test]
    fn test_link_tags() {
        let css = ResourceFile::new("https://example.com/style.css");
        assert_eq!(
            css.tag(ResourceKind::Css, false).unwrap(),
            r#"<link rel="stylesheet" href="https://example.com/style.css">"#
        );

        let js = ResourceFile::new("https://example.com/script.js");
        assert_eq!(
            js.tag(ResourceKind::Js, false).unwrap(),
            r#"<script src="https://example.com/script.js"></script>"#
        );
    }

    #[test]
    fn test_local_resources_are_embedded() {
        let mut file = NamedTempFile::new().expect("Failed to create temp file");
        file.write_all(b"body { color: red; }")
            .expect("Failed to write to temp file");
        let resource = ResourceFile::new(file.path().to_str().unwrap());

        assert_eq!(
            resource.tag(ResourceKind::Css, true).unwrap(),
            "<style>body { color: red; }</style>"
        );
    }

    #[test]
    fn test_missing_local_resource() {
        let resource = ResourceFile::new("/definitely/not/here.js");
        assert!(matches!(
            resource.tag(ResourceKind::Js, true),
            Err(SlideError::PathNotFoundError(_))
        ));
    }
}
