//! osquery query pack generation
//!
//! One `file` table query is emitted per rootkit group:
//!
//! ```text
//! select * from file where path in ('/etc/passwd', '/bin/evil');
//! ```

use crate::error::QpackError;
use crate::rootkit_db::RootkitFileMap;
use serde::{Serialize, Serializer};
use std::fs;
use std::path::Path;

pub const DEFAULT_PLATFORM: &str = "linux";
pub const DEFAULT_PACK_VERSION: &str = "1.4.5";
pub const DEFAULT_INTERVAL_SECS: u32 = 3600;
pub const DEFAULT_VALUE: &str = "Artifacts used by this malware";

/// Fixed metadata stamped onto the pack and each query
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackConfig {
    pub platform: String,
    pub version: String,
    /// Query schedule in seconds
    pub interval: u32,
    pub value: String,
}

impl Default for PackConfig {
    fn default() -> Self {
        Self {
            platform: DEFAULT_PLATFORM.to_string(),
            version: DEFAULT_PACK_VERSION.to_string(),
            interval: DEFAULT_INTERVAL_SECS,
            value: DEFAULT_VALUE.to_string(),
        }
    }
}

/// A scheduled query for one rootkit
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Query {
    pub query: String,
    /// Seconds, serialized as a string as osquery packs expect
    pub interval: String,
    pub platform: String,
    pub description: String,
    pub value: String,
}

/// Build the `file` table lookup for a set of paths.
///
/// Returns `None` for an empty set, since `in ()` is not valid SQL.
pub fn build_query<S: AsRef<str>>(paths: &[S]) -> Option<String> {
    if paths.is_empty() {
        return None;
    }

    let list = paths
        .iter()
        .map(|path| format!("'{}'", path.as_ref()))
        .collect::<Vec<_>>()
        .join(", ");

    Some(format!("select * from file where path in ({});", list))
}

/// Root query pack document
#[derive(Debug, Clone, Serialize)]
pub struct QueryPack {
    pub platform: String,
    pub version: String,
    /// Rootkit name -> query, kept in database order
    #[serde(serialize_with = "serialize_ordered")]
    pub queries: Vec<(String, Query)>,
}

fn serialize_ordered<S: Serializer>(
    entries: &[(String, Query)],
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.collect_map(entries.iter().map(|(name, query)| (name, query)))
}

impl QueryPack {
    /// Generate one query per rootkit group
    pub fn from_file_map(files: &RootkitFileMap, config: &PackConfig) -> Self {
        let interval = config.interval.to_string();

        let queries = files
            .iter()
            .filter_map(|(name, paths)| {
                let query = build_query(paths)?;
                Some((
                    name.to_string(),
                    Query {
                        query,
                        interval: interval.clone(),
                        platform: config.platform.clone(),
                        description: name.to_string(),
                        value: config.value.clone(),
                    },
                ))
            })
            .collect();

        Self {
            platform: config.platform.clone(),
            version: config.version.clone(),
            queries,
        }
    }

    pub fn get(&self, name: &str) -> Option<&Query> {
        self.queries
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, query)| query)
    }

    pub fn len(&self) -> usize {
        self.queries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queries.is_empty()
    }

    /// Serialize to JSON with 2-space indentation
    pub fn to_json(&self) -> Result<String, QpackError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Write the pack to `path`, replacing any existing file
    pub fn write_to<P: AsRef<Path>>(&self, path: P) -> Result<(), QpackError> {
        let path_ref = path.as_ref();
        let json = self.to_json()?;

        fs::write(path_ref, json).map_err(|source| QpackError::Write {
            path: path_ref.to_path_buf(),
            source,
        })?;

        tracing::info!(
            path = %path_ref.display(),
            queries = self.queries.len(),
            "wrote query pack"
        );
        Ok(())
    }
}
