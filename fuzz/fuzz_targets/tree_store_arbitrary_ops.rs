#![no_main]

use std::collections::BTreeMap;

use intmemo::record::{AnalysisRecord, Tristate};
use intmemo::store::traits::{RecordStore, Upsert};
use intmemo::store::tree::TreeStore;
use libfuzzer_sys::fuzz_target;

// Fuzz arbitrary operation sequences on TreeStore
//
// Tests random sequences of upsert, lookup, contains, clear against a
// reference BTreeMap, then verifies structural invariants.
fuzz_target!(|data: &[u8]| {
    let mut tree = TreeStore::new();
    let mut reference: BTreeMap<i32, AnalysisRecord> = BTreeMap::new();

    for chunk in data.chunks_exact(3) {
        let op = chunk[0] % 4;
        let key = i32::from(i16::from_le_bytes([chunk[1], chunk[2]]));

        match op {
            0 => {
                // upsert
                let record = AnalysisRecord {
                    key,
                    evenness: Tristate::from(chunk[1] & 1 == 0),
                    divisibility: Tristate::Unevaluated,
                };
                let expected = if reference.insert(key, record).is_some() {
                    Upsert::Updated
                } else {
                    Upsert::Inserted
                };
                assert_eq!(tree.upsert(record), expected);
            }
            1 => {
                // lookup
                let found = tree.lookup(key);
                match reference.get(&key) {
                    Some(record) => assert_eq!(found, *record),
                    None => assert!(found.is_absent()),
                }
            }
            2 => {
                // contains
                assert_eq!(tree.contains(key), reference.contains_key(&key));
            }
            _ => {
                // clear (rare)
                if chunk[1] == 0xff {
                    tree.clear();
                    reference.clear();
                }
            }
        }
        assert_eq!(tree.len(), reference.len());
    }

    tree.check_invariants().unwrap();
    assert!(tree.iter().eq(reference.values()));
});
