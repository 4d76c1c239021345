use async_trait::async_trait;

use crate::error::Error;
use crate::models::session::SessionRecord;

/// Issues and checks session tokens on the trusted side of the gate.
///
/// The client-side flag alone is never enough to render the dashboard when a
/// verifier is attached; the token stored next to it must check out here.
#[async_trait]
pub trait SessionVerifier: Send + Sync {
    async fn issue(&self, email: &str, display_name: &str) -> Result<SessionRecord, Error>;

    /// Returns the live session for `token`, or `None` when unknown or expired.
    async fn verify(&self, token: &str) -> Result<Option<SessionRecord>, Error>;

    async fn revoke(&self, token: &str) -> Result<(), Error>;
}
