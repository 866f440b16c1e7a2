//! File transport with JSONL persistence
//!
//! Each entry is one JSON object per line, which is what makes this
//! transport query- and stream-capable: read-back parses the same file.

use crate::core::{FormatPipeline, LogEntry, QueryOptions, Result, Transport};
use parking_lot::Mutex;
use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::PathBuf;

pub struct FileTransport {
    path: PathBuf,
    writer: Mutex<BufWriter<File>>,
    level: Option<String>,
    format: Option<FormatPipeline>,
    silent: bool,
}

impl FileTransport {
    pub fn new(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let file = OpenOptions::new().create(true).append(true).open(&path)?;

        Ok(Self {
            path,
            writer: Mutex::new(BufWriter::new(file)),
            level: None,
            format: None,
            silent: false,
        })
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

    pub fn path(&self) -> &std::path::Path {
        &self.path
    }
}

impl Transport for FileTransport {
    fn name(&self) -> &str {
        "file"
    }

    fn write(&self, entry: &LogEntry) -> Result<()> {
        let line = serde_json::to_string(entry)?;
        let mut writer = self.writer.lock();
        writeln!(writer, "{}", line)?;
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
        self.writer.lock().flush()?;
        Ok(())
    }

    fn supports_query(&self) -> bool {
        true
    }

    fn query(&self, options: &QueryOptions) -> Result<Vec<LogEntry>> {
        self.flush()?;

        let file = File::open(&self.path)?;
        let reader = BufReader::new(file);
        let mut rows = Vec::new();

        for line in reader.lines() {
            let line = line?;
            if line.is_empty() {
                continue;
            }
            // Foreign or corrupt lines are skipped, not fatal
            if let Ok(entry) = serde_json::from_str::<LogEntry>(&line) {
                if options.in_range(entry.timestamp()) {
                    rows.push(entry);
                }
            }
        }

        Ok(rows)
    }

    fn stream_entries(&self) -> Option<Box<dyn Iterator<Item = LogEntry> + Send>> {
        if self.flush().is_err() {
            return None;
        }
        let file = File::open(&self.path).ok()?;
        let reader = BufReader::new(file);

        Some(Box::new(reader.lines().filter_map(|line| {
            line.ok()
                .and_then(|line| serde_json::from_str::<LogEntry>(&line).ok())
        })))
    }
}

impl Drop for FileTransport {
    fn drop(&mut self) {
        let _ = self.writer.lock().flush();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn transport_in(dir: &TempDir) -> FileTransport {
        FileTransport::new(dir.path().join("test.log")).unwrap()
    }

    #[test]
    fn test_write_and_query_roundtrip() {
        let dir = TempDir::new().unwrap();
        let transport = transport_in(&dir);

        transport
            .write(&LogEntry::new("info", "persisted").with_field("seq", 1))
            .unwrap();
        transport.write(&LogEntry::new("warn", "second")).unwrap();

        let rows = transport.query(&QueryOptions::new()).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].message(), "persisted");
        assert_eq!(rows[1].level(), "warn");
    }

    #[test]
    fn test_query_skips_corrupt_lines() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("test.log");
        let transport = FileTransport::new(&path).unwrap();

        transport.write(&LogEntry::new("info", "good")).unwrap();
        transport.flush().unwrap();
        std::fs::write(
            &path,
            format!(
                "{}\nnot json at all\n",
                std::fs::read_to_string(&path).unwrap().trim_end()
            ),
        )
        .unwrap();

        let rows = transport.query(&QueryOptions::new()).unwrap();
        assert_eq!(rows.len(), 1);
    }

    #[test]
    fn test_stream_reads_back_in_order() {
        let dir = TempDir::new().unwrap();
        let transport = transport_in(&dir);

        for i in 0..3 {
            transport
                .write(&LogEntry::new("info", format!("m{}", i)))
                .unwrap();
        }

        let streamed: Vec<_> = transport.stream_entries().unwrap().collect();
        assert_eq!(streamed.len(), 3);
        assert_eq!(streamed[0].message(), "m0");
        assert_eq!(streamed[2].message(), "m2");
    }
}
