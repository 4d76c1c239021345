pub mod local_storage;
pub mod session;

pub use local_storage::SqliteStore;
pub use session::SqliteSessionRegistry;
