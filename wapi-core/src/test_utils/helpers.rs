// File: wapi-core/src/test_utils/helpers.rs

use std::path::Path;
use std::sync::Arc;

use crate::Error;
use crate::config::DashboardConfig;
use crate::db::Database;
use crate::repositories::SqliteStore;

/// A migrated private in-memory SQLite database.
pub async fn setup_test_database() -> Result<Database, Error> {
    let db = Database::in_memory().await?;
    db.migrate().await?;
    Ok(db)
}

/// A `local_storage` table in a fresh in-memory database.
pub async fn sqlite_store() -> Result<Arc<SqliteStore>, Error> {
    let db = setup_test_database().await?;
    Ok(Arc::new(SqliteStore::new(db.pool().clone())))
}

/// Defaults pointing at `dir/wapi.db`, with receipt and integration delays
/// short enough for real-time tests.
pub fn test_config(dir: &Path) -> DashboardConfig {
    DashboardConfig {
        db_path: dir.join("wapi.db").to_string_lossy().into_owned(),
        delivery_delay_ms: 10,
        read_delay_ms: 20,
        integration_test_delay_ms: 10,
        integration_sync_delay_ms: 10,
        ..DashboardConfig::default()
    }
}
