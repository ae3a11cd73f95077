//! OSSEC rootkit database reader
//!
//! Scans `rootkit_files.txt` once and groups the normalized file paths by
//! rootkit name. Group order and path order both follow the source file.

use crate::error::QpackError;
use crate::record::{
    classify_line, normalize_file_path, normalize_rootkit_name, LineKind, Rejection,
};
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Rootkit name -> file paths, in first-seen order
///
/// A group is only created when a path is appended, so no group is ever empty.
#[derive(Debug, Clone, Default)]
pub struct RootkitFileMap {
    groups: Vec<(String, Vec<String>)>,
    index: HashMap<String, usize>,
}

impl RootkitFileMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `path` to the group for `name`, creating the group if needed.
    /// Duplicate paths are kept.
    pub fn insert(&mut self, name: String, path: String) {
        match self.index.get(&name) {
            Some(&slot) => self.groups[slot].1.push(path),
            None => {
                self.index.insert(name.clone(), self.groups.len());
                self.groups.push((name, vec![path]));
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<&[String]> {
        self.index
            .get(name)
            .map(|&slot| self.groups[slot].1.as_slice())
    }

    /// Number of rootkit groups
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Total number of paths across all groups
    pub fn path_count(&self) -> usize {
        self.groups.iter().map(|(_, paths)| paths.len()).sum()
    }

    /// Iterate groups in first-seen order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.groups
            .iter()
            .map(|(name, paths)| (name.as_str(), paths.as_slice()))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.groups.iter().map(|(name, _)| name.as_str())
    }
}

/// A data line dropped during normalization
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedEntry {
    /// 1-based line number in the database
    pub line: usize,
    pub reason: Rejection,
}

impl std::fmt::Display for SkippedEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.reason {
            // Matches the historical diagnostic, which carried no line number
            Rejection::Wildcard(_) => write!(f, "{}", self.reason),
            _ => write!(f, "{} (line {})", self.reason, self.line),
        }
    }
}

/// Line counters collected during a scan
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParseStats {
    pub lines: usize,
    pub comments: usize,
    pub malformed: usize,
    /// Records accepted into the file map
    pub records: usize,
    pub skipped: usize,
}

/// Parsed rootkit database
#[derive(Debug, Clone, Default)]
pub struct RootkitDb {
    pub files: RootkitFileMap,
    pub skipped: Vec<SkippedEntry>,
    pub stats: ParseStats,
}

impl RootkitDb {
    /// Load and parse the database at `path`
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, QpackError> {
        let path_ref = path.as_ref();

        if !path_ref.exists() {
            return Err(QpackError::InputNotFound(path_ref.to_path_buf()));
        }

        let read_err = |source| QpackError::Read {
            path: path_ref.to_path_buf(),
            source,
        };

        let file = File::open(path_ref).map_err(read_err)?;
        Self::from_reader(BufReader::new(file)).map_err(read_err)
    }

    /// Parse a database from any buffered reader.
    ///
    /// Bytes that are not valid UTF-8 are replaced rather than failing the
    /// whole scan; the database is ASCII in practice.
    pub fn from_reader<R: BufRead>(mut reader: R) -> std::io::Result<Self> {
        let mut db = Self::default();
        let mut buf = Vec::new();
        let mut line_no = 0;

        loop {
            buf.clear();
            if reader.read_until(b'\n', &mut buf)? == 0 {
                break;
            }
            line_no += 1;

            let text = String::from_utf8_lossy(&buf);
            let line = text.trim_end_matches('\n').trim_end_matches('\r');
            db.push_line(line_no, line);
        }

        db.log_summary();
        Ok(db)
    }

    /// Parse a database held in memory
    pub fn parse_str(text: &str) -> Self {
        let mut db = Self::default();
        for (idx, line) in text.lines().enumerate() {
            db.push_line(idx + 1, line);
        }
        db.log_summary();
        db
    }

    fn push_line(&mut self, line_no: usize, line: &str) {
        self.stats.lines += 1;

        let (file_part, name_part) = match classify_line(line) {
            LineKind::Comment => {
                self.stats.comments += 1;
                return;
            }
            LineKind::Malformed => {
                self.stats.malformed += 1;
                return;
            }
            LineKind::Record {
                file_part,
                name_part,
            } => (file_part, name_part),
        };

        let entry = normalize_file_path(file_part)
            .and_then(|path| normalize_rootkit_name(name_part).map(|name| (name, path)));

        match entry {
            Ok((name, path)) => {
                tracing::trace!(line = line_no, rootkit = %name, path = %path, "accepted record");
                self.stats.records += 1;
                self.files.insert(name, path);
            }
            Err(reason) => {
                tracing::debug!(line = line_no, %reason, "skipped record");
                self.stats.skipped += 1;
                self.skipped.push(SkippedEntry {
                    line: line_no,
                    reason,
                });
            }
        }
    }

    fn log_summary(&self) {
        tracing::info!(
            lines = self.stats.lines,
            comments = self.stats.comments,
            malformed = self.stats.malformed,
            records = self.stats.records,
            skipped = self.stats.skipped,
            rootkits = self.files.len(),
            paths = self.files.path_count(),
            "parsed rootkit database"
        );
    }
}
