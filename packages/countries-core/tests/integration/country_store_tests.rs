//! Country store lifecycle and concurrency tests.

use std::collections::HashSet;
use std::sync::{Arc, Barrier};
use std::thread;

use ntest::timeout;

use countries_core::{Country, CountryStore, StoreError};

/// Full lifecycle: upsert → get → list → delete → get
#[test]
fn test_country_lifecycle() {
    let store = CountryStore::new();

    store.upsert(Country::new("FR", "France")).unwrap();
    store.upsert(Country::new("US", "United States")).unwrap();

    assert_eq!(store.get("FR").unwrap(), Country::new("FR", "France"));
    assert_eq!(store.list().len(), 2);

    store.delete("FR");
    assert!(matches!(
        store.get("FR"),
        Err(StoreError::CountryNotFound { .. })
    ));
    assert_eq!(store.list(), vec![Country::new("US", "United States")]);

    store.delete("US");
    assert!(store.is_empty());
    assert!(store.list().is_empty());
}

/// Rejected writes never become visible
#[test]
fn test_validation_failures_do_not_modify_store() {
    let store = CountryStore::new();
    store.upsert(Country::new("FR", "France")).unwrap();

    let before: HashSet<Country> = store.list().into_iter().collect();
    for invalid in [
        Country::new("", "France"),
        Country::new("FR", ""),
        Country::new("", ""),
        Country::new("DE", ""),
    ] {
        assert!(store.upsert(invalid).unwrap_err().is_validation());
    }
    let after: HashSet<Country> = store.list().into_iter().collect();

    assert_eq!(before, after);
    assert!(store.get("DE").is_err());
}

/// Listing while writers churn never yields duplicates or torn records
#[timeout(10000)]
#[test]
fn test_list_snapshots_under_concurrent_writes() {
    let store = Arc::new(CountryStore::new());
    store.upsert(Country::new("FR", "France")).unwrap();
    store.upsert(Country::new("US", "United States")).unwrap();

    let writers = 4;
    let readers = 4;
    let barrier = Arc::new(Barrier::new(writers + readers));
    let mut handles = Vec::new();

    for w in 0..writers {
        let store = Arc::clone(&store);
        let barrier = Arc::clone(&barrier);
        handles.push(thread::spawn(move || {
            barrier.wait();
            let code = format!("W{}", w);
            for i in 0..500 {
                store
                    .upsert(Country::new(code.clone(), format!("{}-{}", code, i)))
                    .unwrap();
                store.delete(&code);
            }
        }));
    }

    for _ in 0..readers {
        let store = Arc::clone(&store);
        let barrier = Arc::clone(&barrier);
        handles.push(thread::spawn(move || {
            barrier.wait();
            for _ in 0..500 {
                let snapshot = store.list();
                let codes: HashSet<&str> = snapshot.iter().map(|c| c.code.as_str()).collect();
                assert_eq!(codes.len(), snapshot.len(), "duplicate code in snapshot");
                assert!(codes.contains("FR"));
                assert!(codes.contains("US"));
                for country in &snapshot {
                    if country.code.starts_with('W') {
                        assert!(country.name.starts_with(&country.code));
                    }
                }
            }
        }));
    }

    for handle in handles {
        handle.join().unwrap();
    }

    let final_set: HashSet<Country> = store.list().into_iter().collect();
    let expected: HashSet<Country> = [
        Country::new("FR", "France"),
        Country::new("US", "United States"),
    ]
    .into_iter()
    .collect();
    assert_eq!(final_set, expected);
}

/// Racing writers on one code: the survivor is one whole written record
#[timeout(10000)]
#[test]
fn test_same_code_race_keeps_one_whole_record() {
    let store = Arc::new(CountryStore::new());
    let candidates = ["Alpha", "Bravo", "Charlie", "Delta"];
    let barrier = Arc::new(Barrier::new(candidates.len()));

    let handles: Vec<_> = candidates
        .iter()
        .map(|name| {
            let store = Arc::clone(&store);
            let barrier = Arc::clone(&barrier);
            let name = name.to_string();
            thread::spawn(move || {
                barrier.wait();
                store.upsert(Country::new("RC", name)).unwrap();
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    let survivor = store.get("RC").unwrap();
    assert_eq!(survivor.code, "RC");
    assert!(candidates.contains(&survivor.name.as_str()));
    assert_eq!(store.len(), 1);
}
