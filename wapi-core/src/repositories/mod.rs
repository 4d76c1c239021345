// src/repositories/mod.rs

pub mod collection;
pub mod evented;
pub mod memory;
pub mod sqlite;

pub use collection::CollectionRepository;
pub use evented::EventedStore;
pub use memory::InMemoryStore;
pub use sqlite::{SqliteSessionRegistry, SqliteStore};
pub use wapi_common::traits::{KeyValueStore, Repository};
