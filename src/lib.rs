// ABOUTME: Library module for the slidemark program.
// ABOUTME: Contains the markdown slide parser, the slide optimizer and presentation assembly.

// Reexport modules
pub mod analysis;
pub mod config;
pub mod demo;
pub mod errors;
pub mod markdown;
pub mod optimizer;
pub mod presentation;
pub mod resources;
pub mod stats;
pub mod theme;
pub mod utils;
pub mod watch;

// Reexport common types and functions
pub use analysis::{analyze, ContentAnalysis, Element};
pub use config::Config;
pub use demo::DEMO_MARKDOWN;
pub use errors::{Result, SlideError};
pub use markdown::parse;
pub use optimizer::{classify, optimize, Optimizer, OptimizerConfig, SizeClass, SizedFragment};
pub use presentation::{
    build_presentation, generate_presentation, render_document, write_presentation, Presentation,
    PresentationOptions,
};
pub use resources::{ResourceFile, ResourceKind};
pub use stats::PresentationStats;
pub use theme::{theme_css, Theme};
pub use watch::{watch_markdown, WatchConfig};

#[cfg(test)]
mod tests;
