//! Level colorization
//!
//! Colors are a cosmetic mapping keyed by level name, owned here by the
//! format layer rather than by the level table.

use crate::core::{Format, LogEntry, Result};
use colored::{Color, Colorize as _};
use std::collections::HashMap;

/// Optional mapping from level name to terminal color.
#[derive(Debug, Clone, Default)]
pub struct ColorMap {
    map: HashMap<String, Color>,
}

impl ColorMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Colors for the npm level set.
    #[must_use]
    pub fn npm() -> Self {
        Self::new()
            .with_color("error", Color::Red)
            .with_color("warn", Color::Yellow)
            .with_color("info", Color::Green)
            .with_color("http", Color::Magenta)
            .with_color("verbose", Color::Cyan)
            .with_color("debug", Color::Blue)
            .with_color("silly", Color::BrightBlack)
    }

    /// Colors for the syslog level set.
    #[must_use]
    pub fn syslog() -> Self {
        Self::new()
            .with_color("emerg", Color::BrightRed)
            .with_color("alert", Color::Red)
            .with_color("crit", Color::Red)
            .with_color("error", Color::Red)
            .with_color("warning", Color::Yellow)
            .with_color("notice", Color::Cyan)
            .with_color("info", Color::Green)
            .with_color("debug", Color::Blue)
    }

    #[must_use]
    pub fn with_color(mut self, level: impl Into<String>, color: Color) -> Self {
        self.map.insert(level.into(), color);
        self
    }

    pub fn set(&mut self, level: impl Into<String>, color: Color) {
        self.map.insert(level.into(), color);
    }

    pub fn color_for(&self, level: &str) -> Option<Color> {
        self.map.get(level).copied()
    }

    /// Render a level name with its configured color, or unchanged when the
    /// name has no mapping.
    pub fn paint(&self, level: &str) -> String {
        match self.color_for(level) {
            Some(color) => level.color(color).to_string(),
            None => level.to_string(),
        }
    }
}

/// Format stage replacing the level text with its colored rendering.
///
/// Filtering happens before formatting, so the rewritten level never
/// affects delivery decisions; still, place this stage last so earlier
/// stages see the plain name.
pub struct Colorize {
    colors: ColorMap,
}

impl Colorize {
    pub fn new(colors: ColorMap) -> Self {
        Self { colors }
    }
}

impl Format for Colorize {
    fn transform(&self, entry: LogEntry) -> Result<LogEntry> {
        let painted = self.colors.paint(entry.level());
        Ok(entry.with_level(painted))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unmapped_level_unchanged() {
        let colors = ColorMap::new();
        assert_eq!(colors.paint("info"), "info");
    }

    #[test]
    fn test_mapped_level_painted() {
        // colored suppresses escapes off-tty; force them for the assertion
        colored::control::set_override(true);
        let colors = ColorMap::new().with_color("error", Color::Red);
        let painted = colors.paint("error");
        colored::control::unset_override();

        assert!(painted.contains("error"));
        assert_ne!(painted, "error");
    }

    #[test]
    fn test_colorize_stage_rewrites_level() {
        let stage = Colorize::new(ColorMap::new().with_color("warn", Color::Yellow));
        let out = stage.transform(LogEntry::new("warn", "m")).unwrap();
        assert!(out.level().contains("warn"));
    }
}
