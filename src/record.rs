//! Line classification and normalization for the OSSEC rootkit database
//!
//! Each data line of `rootkit_files.txt` has the shape
//! `<file-spec>!<rootkit-spec>`, e.g.
//!
//! ```text
//! usr/lib/libsh/.bashrc    ! Shv5 Rootkit:: ossec-hids
//! ```
//!
//! The rootkit spec may carry a description after the first `:`, which is
//! dropped. File specs are made absolute; wildcard specs are rejected because
//! the `file` table lookup cannot express them.

use thiserror::Error;

/// Classification of a single raw line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind<'a> {
    /// Empty line or `#` comment
    Comment,
    /// No `!` separator present
    Malformed,
    /// A `<file-spec>!<rootkit-spec>` record, split at the first `!`
    Record { file_part: &'a str, name_part: &'a str },
}

/// Why a record was dropped during normalization
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
    #[error("Ignoring file starting with wildcard: {0}")]
    Wildcard(String),

    #[error("Ignoring entry with empty file path")]
    EmptyPath,

    #[error("Ignoring entry with empty rootkit name")]
    EmptyName,
}

/// Classify a raw line. Pure; never allocates.
pub fn classify_line(line: &str) -> LineKind<'_> {
    if line.is_empty() || line.starts_with('#') {
        return LineKind::Comment;
    }

    match line.split_once('!') {
        Some((file_part, name_part)) => LineKind::Record {
            file_part,
            name_part,
        },
        None => LineKind::Malformed,
    }
}

/// Turn a raw file spec into an absolute path
pub fn normalize_file_path(raw: &str) -> Result<String, Rejection> {
    let path = raw.trim();

    if path.is_empty() {
        return Err(Rejection::EmptyPath);
    }
    if path.starts_with('*') {
        return Err(Rejection::Wildcard(path.to_string()));
    }

    if path.starts_with('/') {
        Ok(path.to_string())
    } else {
        Ok(format!("/{}", path))
    }
}

/// Turn a raw rootkit spec into a grouping key like `acme_rootkit`
pub fn normalize_rootkit_name(raw: &str) -> Result<String, Rejection> {
    // Anything after the first ':' is free-form description
    let name = raw.split_once(':').map_or(raw, |(name, _)| name).trim();

    if name.is_empty() {
        return Err(Rejection::EmptyName);
    }

    Ok(name.replace(' ', "_").replace('-', "_").to_lowercase())
}
