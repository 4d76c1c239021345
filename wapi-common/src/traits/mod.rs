pub mod auth_traits;
pub mod repository_traits;

pub use auth_traits::SessionVerifier;
pub use repository_traits::{Entity, InsertPosition, KeyValueStore, Repository};
