// wapi-core/src/auth/mod.rs

pub mod registry;
pub mod session;

pub use registry::InMemorySessionRegistry;
pub use session::{Credentials, GuardDecision, SessionGate, SessionState};
