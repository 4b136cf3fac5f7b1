// ABOUTME: Configuration module for the slidemark application
// ABOUTME: Provides configuration settings and environment variable handling

use crate::errors::{Result, SlideError};
use crate::optimizer::OptimizerConfig;
use crate::presentation::PresentationOptions;
use crate::theme::{Theme, DEFAULT_THEME};
use log::warn;
use std::env;
use std::path::PathBuf;
use std::str::FromStr;

/// Global configuration for the application
#[derive(Debug, Clone)]
pub struct Config {
    pub default_theme: String,
    pub default_output: PathBuf,
    pub embed_assets: bool,
    pub footer: Option<String>,
    pub optimizer: OptimizerConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_theme: DEFAULT_THEME.to_string(),
            default_output: PathBuf::from("presentation.html"),
            embed_assets: false,
            footer: None,
            optimizer: OptimizerConfig::default(),
        }
    }
}

/// Parse an environment variable, falling back to `default` when unset or invalid.
fn env_or<T: FromStr>(name: &str, default: T) -> T {
    match env::var(name) {
        Ok(raw) => raw.trim().parse::<T>().unwrap_or_else(|_| {
            warn!("Ignoring invalid value {:?} for {}", raw, name);
            default
        }),
        Err(_) => default,
    }
}

impl Config {
    /// Create a new configuration instance
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let default_theme = match env::var("SLIDEMARK_THEME") {
            Ok(key) if Theme::get(&key).is_some() => key.trim().to_lowercase(),
            Ok(key) => {
                warn!("Unknown theme {:?} in SLIDEMARK_THEME, using {}", key, DEFAULT_THEME);
                defaults.default_theme
            }
            Err(_) => defaults.default_theme,
        };
        let default_output = env::var("SLIDEMARK_OUTPUT")
            .ok()
            .map(PathBuf::from)
            .unwrap_or(defaults.default_output);
        let embed_assets = env::var("SLIDEMARK_EMBED")
            .ok()
            .map(|s| matches!(s.trim().to_lowercase().as_str(), "1" | "true" | "yes"))
            .unwrap_or(defaults.embed_assets);
        let footer = env::var("SLIDEMARK_FOOTER").ok().filter(|s| !s.trim().is_empty());

        let optimizer = OptimizerConfig {
            max_chars: env_or("SLIDEMARK_MAX_CHARS", defaults.optimizer.max_chars),
            max_lines: env_or("SLIDEMARK_MAX_LINES", defaults.optimizer.max_lines),
            max_list_items: env_or("SLIDEMARK_MAX_LIST_ITEMS", defaults.optimizer.max_list_items),
            ..defaults.optimizer
        };

        Self {
            default_theme,
            default_output,
            embed_assets,
            footer,
            optimizer,
        }
    }

    /// Reject settings the optimizer cannot work with.
    pub fn validate(&self) -> Result<()> {
        let optimizer = &self.optimizer;
        if optimizer.max_chars == 0 || optimizer.max_lines == 0 || optimizer.max_list_items == 0 {
            return Err(SlideError::ConfigError(format!(
                "Optimizer limits must be positive (chars {}, lines {}, list items {})",
                optimizer.max_chars, optimizer.max_lines, optimizer.max_list_items
            )));
        }
        if self.default_output.as_os_str().is_empty() {
            return Err(SlideError::ConfigError(
                "Default output path is empty".to_string(),
            ));
        }
        Ok(())
    }

    pub fn optimizer_config(&self) -> OptimizerConfig {
        self.optimizer.clone()
    }

    /// Get presentation options with defaults from this config
    pub fn presentation_options(
        &self,
        theme: Option<&str>,
        title: Option<String>,
        embed_assets: Option<bool>,
    ) -> PresentationOptions {
        let theme_key = theme.unwrap_or(&self.default_theme);
        let theme = match Theme::get(theme_key) {
            Some(theme) => theme,
            None => {
                warn!("Unknown theme {:?}, using {}", theme_key, DEFAULT_THEME);
                Theme::or_default(DEFAULT_THEME)
            }
        };

        PresentationOptions {
            title,
            theme,
            footer: self.footer.clone(),
            embed_assets: embed_assets.unwrap_or(self.embed_assets),
            optimizer: self.optimizer_config(),
            ..PresentationOptions::default()
        }
    }
}
