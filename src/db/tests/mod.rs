mod close;

use crate::config::{Collation, StoreConfig, StoreLocation};
use crate::db::Database;

/// Open a fresh in-memory store
pub(super) async fn memory_db(collation: Collation) -> Database {
    Database::open(&StoreConfig {
        location: StoreLocation::Memory {
            name: "persons".to_string(),
        },
        collation,
    })
    .await
    .unwrap()
}
