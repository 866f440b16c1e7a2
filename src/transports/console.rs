//! Console transport

use crate::core::{FormatPipeline, LogEntry, Result, Transport};
use crate::formats::{ColorMap, TimestampFormat};
use std::collections::HashSet;
use std::io::Write;

/// Writes rendered text lines to stdout, or stderr for configured levels.
pub struct ConsoleTransport {
    colors: Option<ColorMap>,
    timestamp_format: TimestampFormat,
    stderr_levels: HashSet<String>,
    level: Option<String>,
    format: Option<FormatPipeline>,
    silent: bool,
}

impl ConsoleTransport {
    pub fn new() -> Self {
        Self {
            colors: None,
            timestamp_format: TimestampFormat::default(),
            stderr_levels: HashSet::new(),
            level: None,
            format: None,
            silent: false,
        }
    }

    /// Enable colored level names.
    ///
    /// # Example
    ///
    /// ```
    /// use fanlog::formats::ColorMap;
    /// use fanlog::transports::ConsoleTransport;
    ///
    /// let transport = ConsoleTransport::new().with_colors(ColorMap::npm());
    /// ```
    #[must_use]
    pub fn with_colors(mut self, colors: ColorMap) -> Self {
        self.colors = Some(colors);
        self
    }

    /// Set the timestamp rendering for this transport.
    #[must_use]
    pub fn with_timestamp_format(mut self, format: TimestampFormat) -> Self {
        self.timestamp_format = format;
        self
    }

    /// Route the given level names to stderr instead of stdout.
    #[must_use]
    pub fn with_stderr_levels<S, I>(mut self, levels: I) -> Self
    where
        S: Into<String>,
        I: IntoIterator<Item = S>,
    {
        self.stderr_levels = levels.into_iter().map(Into::into).collect();
        self
    }

    /// Set a per-transport minimum level override.
    #[must_use]
    pub fn with_level(mut self, level: impl Into<String>) -> Self {
        self.level = Some(level.into());
        self
    }

    /// Set a per-transport format pipeline override.
    #[must_use]
    pub fn with_format(mut self, format: FormatPipeline) -> Self {
        self.format = Some(format);
        self
    }

    #[must_use]
    pub fn with_silent(mut self, silent: bool) -> Self {
        self.silent = silent;
        self
    }

    fn render(&self, entry: &LogEntry) -> String {
        let level_text = match &self.colors {
            Some(colors) => colors.paint(entry.level()),
            None => entry.level().to_string(),
        };

        let base = format!(
            "[{}] [{}] {}",
            self.timestamp_format.format(&entry.timestamp()),
            level_text,
            entry.message()
        );

        if entry.field_count() > 0 {
            format!("{} {}", base, entry.format_fields())
        } else {
            base
        }
    }
}

impl Default for ConsoleTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl Transport for ConsoleTransport {
    fn name(&self) -> &str {
        "console"
    }

    fn write(&self, entry: &LogEntry) -> Result<()> {
        let line = self.render(entry);
        if self.stderr_levels.contains(entry.level()) {
            eprintln!("{}", line);
        } else {
            println!("{}", line);
        }
        Ok(())
    }

    fn level(&self) -> Option<&str> {
        self.level.as_deref()
    }

    fn format(&self) -> Option<&FormatPipeline> {
        self.format.as_ref()
    }

    fn silent(&self) -> bool {
        self.silent
    }

    fn flush(&self) -> Result<()> {
        std::io::stdout().flush()?;
        std::io::stderr().flush()?;
        Ok(())
    }
}
