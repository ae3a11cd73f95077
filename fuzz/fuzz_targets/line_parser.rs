#![no_main]

use libfuzzer_sys::fuzz_target;
use ossec_qpack::query_pack::{PackConfig, QueryPack};
use ossec_qpack::rootkit_db::RootkitDb;

fuzz_target!(|data: &[u8]| {
    // Arbitrary bytes, including invalid UTF-8, must never panic the parser
    if let Ok(db) = RootkitDb::from_reader(data) {
        let pack = QueryPack::from_file_map(&db.files, &PackConfig::default());
        for (name, query) in &pack.queries {
            assert!(!name.is_empty());
            assert!(query.query.ends_with(");"));
        }
    }
});
