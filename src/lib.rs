//! ossec-qpack - OSSEC rootkit database to osquery query pack converter
//!
//! This library parses the OSSEC `rootkit_files.txt` database, groups the
//! artifact paths by rootkit, and renders one `file` table query per rootkit
//! into an osquery query pack.

pub mod cli;
pub mod error;
pub mod query_pack;
pub mod record;
pub mod rootkit_db;
