// ABOUTME: Theme table for the slidemark application
// ABOUTME: Defines the built-in color themes and renders each as a presentation stylesheet

use crate::errors::{Result, SlideError};
use crate::optimizer::SizeClass;
use std::fmt::Write;

/// Colors applied to a presentation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    pub key: &'static str,
    pub name: &'static str,
    pub background: &'static str,
    pub primary: &'static str,
    pub secondary: &'static str,
    pub accent: &'static str,
    /// Swatch shown when listing themes.
    pub preview: &'static str,
}

pub const DEFAULT_THEME: &str = "cooperatives";

const THEMES: &[Theme] = &[
    Theme {
        key: "cooperatives",
        name: "Cooperatives",
        background: "linear-gradient(135deg, #AFDCE1 0%, #ffffff 100%)",
        primary: "#133D69",
        secondary: "#F6A02D",
        accent: "#E73334",
        preview: "linear-gradient(135deg, #F6A02D, #E73334)",
    },
    Theme {
        key: "minimal",
        name: "Minimal",
        background: "#f8f9fa",
        primary: "#2c3e50",
        secondary: "#3498db",
        accent: "#e74c3c",
        preview: "linear-gradient(135deg, #2c3e50, #34495e)",
    },
    Theme {
        key: "nature",
        name: "Nature",
        background: "linear-gradient(135deg, #e8f8f5 0%, #ffffff 100%)",
        primary: "#27ae60",
        secondary: "#2ecc71",
        accent: "#16a085",
        preview: "linear-gradient(135deg, #27ae60, #2ecc71)",
    },
];

impl Theme {
    /// All built-in themes, default first.
    pub fn all() -> &'static [Theme] {
        THEMES
    }

    pub fn get(key: &str) -> Option<&'static Theme> {
        let key = key.trim().to_lowercase();
        THEMES.iter().find(|t| t.key == key)
    }

    /// Look up a theme, failing on unknown keys.
    pub fn find(key: &str) -> Result<&'static Theme> {
        Self::get(key).ok_or_else(|| SlideError::UnknownTheme(key.to_string()))
    }

    /// Look up a theme, falling back to the default on unknown keys.
    pub fn or_default(key: &str) -> &'static Theme {
        Self::get(key).unwrap_or(&THEMES[0])
    }
}

impl Default for Theme {
    fn default() -> Self {
        THEMES[0]
    }
}

/// Render the stylesheet for a theme, including the size-class rules.
pub fn theme_css(theme: &Theme) -> String {
    let mut css = format!(
        r#"* {{
    margin: 0;
    padding: 0;
    box-sizing: border-box;
}}

body {{
    font-family: 'Roboto', 'Segoe UI', Arial, sans-serif;
    background: {background};
}}

.reveal {{
    font-size: 38px;
}}

.reveal .slides {{
    text-align: left;
}}

.reveal section {{
    background: white;
    border-radius: 20px;
    box-shadow: 0 10px 40px rgba(0, 0, 0, 0.15);
    padding: 60px;
    height: 100%;
    display: flex;
    flex-direction: column;
    justify-content: center;
}}

.reveal h1 {{
    color: {primary};
    font-size: 2.5em;
    font-weight: 700;
    margin-bottom: 0.5em;
    text-align: center;
}}

.reveal h2 {{
    background: {secondary};
    color: white;
    padding: 20px 30px;
    border-radius: 15px;
    font-size: 1.8em;
    font-weight: 600;
    margin-bottom: 0.8em;
    box-shadow: 0 4px 15px rgba(0, 0, 0, 0.1);
}}

.reveal h3 {{
    color: {primary};
    font-size: 1.4em;
    font-weight: 600;
    margin: 0.8em 0 0.5em 0;
}}

.reveal p {{
    color: #333;
    font-size: 1em;
    line-height: 1.6;
    margin: 0.6em 0;
}}

.reveal ul {{
    list-style: none;
    margin: 1em 0;
}}

.reveal li {{
    color: {primary};
    font-size: 1em;
    margin: 0.6em 0;
    padding-left: 1.5em;
    position: relative;
    line-height: 1.5;
}}

.reveal li::before {{
    content: '\2192';
    position: absolute;
    left: 0;
    color: {secondary};
    font-weight: bold;
    font-size: 1.2em;
}}

.reveal strong {{
    color: {accent};
    font-weight: 700;
}}

.reveal em {{
    font-style: italic;
    color: {secondary};
}}

.reveal code {{
    background: #f4f4f4;
    padding: 0.2em 0.4em;
    border-radius: 5px;
    font-family: 'Courier New', monospace;
    font-size: 0.85em;
    color: #c7254e;
}}

.reveal a {{
    color: {secondary};
    text-decoration: none;
    border-bottom: 2px solid {secondary};
    transition: all 0.3s;
}}

.reveal a:hover {{
    color: {accent};
    border-color: {accent};
}}
"#,
        background = theme.background,
        primary = theme.primary,
        secondary = theme.secondary,
        accent = theme.accent,
    );

    for size in SizeClass::ALL {
        let _ = writeln!(
            css,
            "\n.{class} {{\n    font-size: {scale}em{important};\n}}",
            class = size.css_class(),
            scale = size.font_scale(),
            important = match size {
                SizeClass::Smallest | SizeClass::Small => " !important",
                _ => "",
            },
        );
        let heading_scale = match size {
            SizeClass::Smallest => Some("1.5em !important"),
            SizeClass::Small => Some("1.6em !important"),
            SizeClass::Large => Some("2em"),
            SizeClass::Normal => None,
        };
        if let Some(scale) = heading_scale {
            let _ = writeln!(
                css,
                "\n.{} h2 {{\n    font-size: {};\n}}",
                size.css_class(),
                scale
            );
        }
    }

    let _ = write!(
        css,
        r#"
.reveal .fragment {{
    opacity: 0;
    transform: translateY(20px);
    transition: all 0.5s ease;
}}

.reveal .fragment.visible {{
    opacity: 1;
    transform: translateY(0);
}}

.custom-controls {{
    position: fixed;
    bottom: 30px;
    right: 30px;
    z-index: 100;
    display: flex;
    gap: 10px;
}}

.control-button {{
    background: {secondary};
    color: white;
    border: none;
    width: 50px;
    height: 50px;
    border-radius: 50%;
    font-size: 1.5em;
    cursor: pointer;
    box-shadow: 0 4px 15px rgba(0, 0, 0, 0.2);
    transition: all 0.3s;
    display: flex;
    align-items: center;
    justify-content: center;
}}

.control-button:hover {{
    transform: scale(1.1);
    box-shadow: 0 6px 20px rgba(0, 0, 0, 0.3);
}}

.progress-bar {{
    position: fixed;
    bottom: 0;
    left: 0;
    width: 100%;
    height: 5px;
    background: rgba(0, 0, 0, 0.1);
    z-index: 100;
}}

.progress-fill {{
    height: 100%;
    background: {secondary};
    width: 0%;
    transition: width 0.3s ease;
}}

.slide-number {{
    position: fixed;
    bottom: 30px;
    left: 30px;
    color: {primary};
    font-size: 1.2em;
    font-weight: 600;
    z-index: 100;
    background: rgba(255, 255, 255, 0.9);
    padding: 10px 20px;
    border-radius: 25px;
    box-shadow: 0 2px 10px rgba(0, 0, 0, 0.1);
}}

.footer {{
    position: fixed;
    bottom: 20px;
    left: 50%;
    transform: translateX(-50%);
    opacity: 0.7;
    font-size: 0.8em;
    color: {primary};
    z-index: 100;
    background: rgba(255, 255, 255, 0.8);
    padding: 8px 20px;
    border-radius: 20px;
}}
"#,
        primary = theme.primary,
        secondary = theme.secondary,
    );

    css
}
