//! Level tables: ordered name-to-severity mappings
//!
//! A [`LevelTable`] defines the set of valid level names for a logger and
//! their relative severities. Lower numbers are more severe, so an entry
//! passes the filter when its severity is less than or equal to the active
//! level's severity.

use super::error::{LoggerError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Ordered mapping from level name to numeric severity.
///
/// Tables are immutable once built; `configure()` swaps a whole table in
/// rather than editing one in place.
///
/// # Example
///
/// ```
/// use fanlog::LevelTable;
///
/// let levels = LevelTable::new([("error", 0), ("warn", 1), ("info", 2)]).unwrap();
/// assert!(levels.should_log("warn", "info"));
/// assert!(!levels.should_log("info", "warn"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelTable {
    names: Vec<String>,
    severities: HashMap<String, u64>,
}

impl LevelTable {
    /// Build a table from `(name, severity)` pairs, preserving insertion order.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfiguration` if the table would be empty or a name
    /// appears twice.
    pub fn new<I, S>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (S, u64)>,
        S: Into<String>,
    {
        let mut names = Vec::new();
        let mut severities = HashMap::new();

        for (name, severity) in pairs {
            let name = name.into();
            if severities.insert(name.clone(), severity).is_some() {
                return Err(LoggerError::config(
                    "LevelTable",
                    format!("duplicate level name '{}'", name),
                ));
            }
            names.push(name);
        }

        if names.is_empty() {
            return Err(LoggerError::config(
                "LevelTable",
                "at least one level is required",
            ));
        }

        Ok(Self { names, severities })
    }

    /// The npm-style level set: error, warn, info, http, verbose, debug, silly.
    #[must_use]
    pub fn npm() -> Self {
        Self::known(&[
            ("error", 0),
            ("warn", 1),
            ("info", 2),
            ("http", 3),
            ("verbose", 4),
            ("debug", 5),
            ("silly", 6),
        ])
    }

    /// The syslog level set: emerg through debug.
    #[must_use]
    pub fn syslog() -> Self {
        Self::known(&[
            ("emerg", 0),
            ("alert", 1),
            ("crit", 2),
            ("error", 3),
            ("warning", 4),
            ("notice", 5),
            ("info", 6),
            ("debug", 7),
        ])
    }

    /// The cli level set used by interactive tools.
    #[must_use]
    pub fn cli() -> Self {
        Self::known(&[
            ("error", 0),
            ("warn", 1),
            ("help", 2),
            ("data", 3),
            ("info", 4),
            ("debug", 5),
            ("prompt", 6),
            ("verbose", 7),
            ("input", 8),
            ("silly", 9),
        ])
    }

    /// Internal constructor for the built-in sets, which are known non-empty
    /// and duplicate-free.
    fn known(pairs: &[(&str, u64)]) -> Self {
        let names = pairs.iter().map(|(n, _)| (*n).to_string()).collect();
        let severities = pairs
            .iter()
            .map(|(n, s)| ((*n).to_string(), *s))
            .collect();
        Self { names, severities }
    }

    /// Numeric severity of a level name, if it is a member of this table.
    pub fn severity(&self, name: &str) -> Option<u64> {
        self.severities.get(name).copied()
    }

    /// Whether `name` is a member of this table.
    pub fn contains(&self, name: &str) -> bool {
        self.severities.contains_key(name)
    }

    /// Level names in insertion order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    /// Number of levels in the table.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Always false: tables cannot be constructed empty.
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// The most severe level name (lowest severity number, first-inserted
    /// wins ties). Used by the exception handler for fatal entries.
    pub fn most_severe(&self) -> &str {
        let mut best = self.names[0].as_str();
        let mut best_severity = self.severities[best];
        for name in &self.names[1..] {
            let severity = self.severities[name.as_str()];
            if severity < best_severity {
                best = name;
                best_severity = severity;
            }
        }
        best
    }

    /// Filtering predicate: true iff both levels are members of this table
    /// and `severity(entry) <= severity(active)`.
    ///
    /// Unknown names fail closed (return false) so a stale or mistyped level
    /// can never surface an error on the logging path.
    pub fn should_log(&self, entry_level: &str, active_level: &str) -> bool {
        match (self.severity(entry_level), self.severity(active_level)) {
            (Some(entry), Some(active)) => entry <= active,
            _ => false,
        }
    }
}
