// ABOUTME: Watch module for monitoring markdown changes and regenerating the presentation
// ABOUTME: Provides file watching, auto-regeneration and an optional local preview server

use log::{debug, error, info};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use notify::{RecursiveMode, Watcher};
use notify_debouncer_full::new_debouncer;
use tiny_http::{Header, Response, Server, StatusCode};

use crate::errors::{Result, SlideError};
use crate::presentation::{self, PresentationOptions};
use crate::utils;

/// Configuration for watch mode
#[derive(Debug, Clone)]
pub struct WatchConfig {
    /// Path to the markdown file to watch
    pub markdown_path: PathBuf,

    /// Output HTML file path
    pub html_output: PathBuf,

    pub options: PresentationOptions,

    /// Debounce time in milliseconds
    pub debounce_ms: u64,

    /// Whether to serve the HTML using a local web server
    pub serve: bool,

    /// Port for local web server
    pub port: u16,
}

impl Default for WatchConfig {
    fn default() -> Self {
        Self {
            markdown_path: PathBuf::new(),
            html_output: PathBuf::new(),
            options: PresentationOptions::default(),
            debounce_ms: 500,
            serve: false,
            port: 8080,
        }
    }
}

fn content_type(path: &Path) -> &'static str {
    match path
        .extension()
        .map(|ext| ext.to_string_lossy().to_lowercase())
        .as_deref()
    {
        Some("html") => "text/html; charset=utf-8",
        Some("css") => "text/css",
        Some("js") => "application/javascript",
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("svg") => "image/svg+xml",
        _ => "application/octet-stream",
    }
}

/// Start a simple HTTP server serving the presentation and its directory
fn start_server(html_path: PathBuf, port: u16) -> Result<()> {
    let server = Server::http(format!("0.0.0.0:{}", port))
        .map_err(|e| SlideError::WatchError(format!("Failed to start HTTP server: {}", e)))?;

    let html_dir = html_path.parent().unwrap_or(Path::new(".")).to_path_buf();
    let html_file_name = html_path
        .file_name()
        .unwrap_or_default()
        .to_string_lossy()
        .to_string();

    thread::spawn(move || {
        info!("HTTP server listening on http://localhost:{}", port);
        println!("Preview available at http://localhost:{}", port);

        for request in server.incoming_requests() {
            let url_path = request.url().split('?').next().unwrap_or("/").to_string();

            let file_path = if url_path == "/" {
                html_dir.join(&html_file_name)
            } else {
                let clean_path = url_path.trim_start_matches('/');
                if clean_path.split('/').any(|part| part == "..") {
                    let response =
                        Response::from_string("403 Forbidden").with_status_code(StatusCode(403));
                    let _ = request.respond(response);
                    continue;
                }
                html_dir.join(clean_path)
            };

            debug!("Request for {:?} -> {:?}", url_path, file_path);

            if !file_path.is_file() {
                let response =
                    Response::from_string("404 Not Found").with_status_code(StatusCode(404));
                let _ = request.respond(response);
                continue;
            }

            match fs::read(&file_path) {
                Ok(content) => {
                    let mut response = Response::from_data(content);
                    if let Ok(header) =
                        Header::from_bytes("Content-Type", content_type(&file_path))
                    {
                        response = response.with_header(header);
                    }
                    if let Err(e) = request.respond(response) {
                        error!("Failed to send response: {}", e);
                    }
                }
                Err(e) => {
                    error!("Failed to read file {:?}: {}", file_path, e);
                    let response = Response::from_string(format!("Failed to read file: {}", e))
                        .with_status_code(StatusCode(500));
                    let _ = request.respond(response);
                }
            }
        }
    });

    Ok(())
}

/// Starts watching a markdown file and regenerates the presentation when it changes
pub fn watch_markdown(config: WatchConfig) -> Result<()> {
    utils::validate_file_exists(&config.markdown_path)?;
    utils::ensure_parent_directory_exists(&config.html_output)?;

    // Initial generation must succeed; later failures keep the previous output.
    regenerate(&config)?;

    if config.serve {
        start_server(config.html_output.clone(), config.port)?;
    }

    let (tx, rx) = mpsc::channel();

    let mut debouncer = new_debouncer(Duration::from_millis(config.debounce_ms), None, tx)
        .map_err(|e| SlideError::WatchError(format!("Failed to create file watcher: {}", e)))?;

    let watch_path = match config.markdown_path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let abs_watch_path = utils::get_absolute_path(watch_path)?;

    debug!("Watching absolute path: {:?}", abs_watch_path);

    debouncer
        .watcher()
        .watch(&abs_watch_path, RecursiveMode::NonRecursive)
        .map_err(|e| {
            SlideError::WatchError(format!(
                "Failed to start watching {:?}: {}",
                abs_watch_path, e
            ))
        })?;

    info!("Watching for changes in {:?}", watch_path);
    println!(
        "Watching {:?} for changes (Press Ctrl+C to stop)",
        config.markdown_path
    );

    let md_path_abs = utils::get_absolute_path(&config.markdown_path)
        .unwrap_or_else(|_| config.markdown_path.clone());
    let mut last_processed = Instant::now();

    for result in rx {
        match result {
            Ok(events) => {
                let relevant = events.iter().any(|event| {
                    event
                        .paths
                        .iter()
                        .any(|path| is_relevant_path(path, &md_path_abs, &config.html_output))
                });

                let now = Instant::now();
                if relevant
                    && now.duration_since(last_processed)
                        > Duration::from_millis(config.debounce_ms)
                {
                    match regenerate(&config) {
                        Ok(count) => {
                            info!("Regenerated presentation with {} slides", count);
                            last_processed = now;
                        }
                        Err(e) => error!("Failed to regenerate presentation: {}", e),
                    }
                }
            }
            Err(errors) => {
                for e in errors {
                    error!("Watch error: {:?}", e);
                }
            }
        }
    }

    Ok(())
}

/// Checks if a changed path should trigger regeneration
fn is_relevant_path(path: &Path, markdown_abs: &Path, html_output: &Path) -> bool {
    let path_abs = utils::get_absolute_path(path).unwrap_or_else(|_| path.to_path_buf());

    if path_abs == markdown_abs {
        return true;
    }

    // Our own output lands next to the input; never react to it.
    if path.file_name().is_some() && path.file_name() == html_output.file_name() {
        return false;
    }

    utils::is_markdown_file(path)
}

/// Regenerate the presentation, returning the slide count. A failed build
/// leaves the previously written file untouched.
fn regenerate(config: &WatchConfig) -> Result<usize> {
    info!("Regenerating presentation...");
    let presentation =
        presentation::generate_presentation(&config.markdown_path, &config.options)?;
    presentation::write_presentation(&presentation.html, &config.html_output)?;
    info!("Presentation written: {:?}", config.html_output);
    Ok(presentation.slide_count())
}
