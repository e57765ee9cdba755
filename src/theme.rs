//! Styling of the rendered table
//!
//! The style file holds one `key = value` entry per line; lines starting with
//! `#` are comments. Recognized keys are `header`, `accent` and `dim`; values
//! are colour names or `#rrggbb` codes as understood by ratatui.

use crate::Result;
use anyhow::Context;
use ratatui::style::Color;
use std::path::Path;

/// Colours applied to the rendered table
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct Theme {
    /// Table header row and view title
    pub header: Color,

    /// Highlighted values (keywords, the page selector)
    pub accent: Color,

    /// Secondary text (key hints, empty time series)
    pub dim: Color,
}
//
impl Default for Theme {
    fn default() -> Self {
        Self {
            header: Color::Yellow,
            accent: Color::Cyan,
            dim: Color::DarkGray,
        }
    }
}

/// Load the style file, falling back to defaults when none is given
pub fn load(path: Option<&Path>) -> Result<Theme> {
    let Some(path) = path else {
        return Ok(Theme::default());
    };
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading style file {}", path.display()))?;
    parse(&text).with_context(|| format!("parsing style file {}", path.display()))
}

/// Decode the text of a style file
fn parse(text: &str) -> Result<Theme> {
    let mut theme = Theme::default();
    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let (key, value) = line
            .split_once('=')
            .with_context(|| format!("style entry {line:?} is not a key = value pair"))?;
        let value = value.trim();
        let color = value
            .parse::<Color>()
            .map_err(|_| anyhow::format_err!("unknown colour {value:?}"))?;
        match key.trim() {
            "header" => theme.header = color,
            "accent" => theme.accent = color,
            "dim" => theme.dim = color,
            other => anyhow::bail!("unknown style key {other:?}"),
        }
    }
    Ok(theme)
}
