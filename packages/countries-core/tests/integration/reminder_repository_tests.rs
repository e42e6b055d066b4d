//! Reminder repository tests, exercised through the port trait object.

use std::sync::Arc;
use std::thread;

use ntest::timeout;

use countries_core::{MemoryReminderRepository, ReminderRepository, StoreError};

fn repository() -> Arc<dyn ReminderRepository> {
    Arc::new(MemoryReminderRepository::new())
}

#[test]
fn test_reminder_lifecycle() {
    let repo = repository();

    let created = repo.create("water the plants".to_string()).unwrap();
    assert_eq!(repo.get(created.id).unwrap(), created);

    let updated = repo.update(created.id, "water the cactus".to_string()).unwrap();
    assert_eq!(updated.id, created.id);
    assert_eq!(updated.message, "water the cactus");
    assert_eq!(updated.created_at, created.created_at);

    assert_eq!(repo.list().unwrap(), vec![updated]);

    repo.delete(created.id).unwrap();
    assert_eq!(
        repo.get(created.id).unwrap_err(),
        StoreError::ReminderNotFound { id: created.id }
    );
    assert_eq!(
        repo.delete(created.id).unwrap_err(),
        StoreError::ReminderNotFound { id: created.id }
    );
    assert!(repo.list().unwrap().is_empty());
}

#[timeout(10000)]
#[test]
fn test_concurrent_creates_get_unique_ids() {
    let repo = repository();
    let handles: Vec<_> = (0..8)
        .map(|t| {
            let repo = Arc::clone(&repo);
            thread::spawn(move || {
                (0..50)
                    .map(|i| repo.create(format!("{}-{}", t, i)).unwrap().id)
                    .collect::<Vec<_>>()
            })
        })
        .collect();

    let mut ids: Vec<u64> = handles
        .into_iter()
        .flat_map(|h| h.join().unwrap())
        .collect();
    ids.sort_unstable();

    assert_eq!(ids, (1..=400).collect::<Vec<u64>>());
    assert_eq!(repo.list().unwrap().len(), 400);
}
