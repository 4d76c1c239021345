// wapi-core/src/auth/session.rs

use std::sync::Arc;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::Error;
use crate::config::DashboardConfig;
use crate::eventbus::{EventBus, WapiEvent};
use crate::routes::Page;
use wapi_common::models::{Notification, SessionFlags};
use wapi_common::traits::{KeyValueStore, SessionVerifier};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    /// The flag has not been read yet.
    Loading,
    Authenticated { email: String, name: String },
    Anonymous,
}

impl SessionState {
    pub fn is_authenticated(&self) -> bool {
        matches!(self, SessionState::Authenticated { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardDecision {
    Render(Page),
    Redirect(&'static str),
    Loading,
    NotFound,
}

/// The single account the dashboard accepts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub email: String,
    pub password: String,
    pub display_name: String,
}

impl From<&DashboardConfig> for Credentials {
    fn from(cfg: &DashboardConfig) -> Self {
        Self {
            email: cfg.login_email.clone(),
            password: cfg.login_password.clone(),
            display_name: cfg.display_name.clone(),
        }
    }
}

/// Decides whether a page renders, based on the session flags in storage.
///
/// Each gate is one "tab". When a verifier is attached, the `isLoggedIn` flag
/// alone is not enough: the `sessionToken` stored next to it must verify.
pub struct SessionGate {
    store: Arc<dyn KeyValueStore>,
    verifier: Option<Arc<dyn SessionVerifier>>,
    bus: Option<EventBus>,
    credentials: Credentials,
    state: watch::Sender<SessionState>,
}

impl SessionGate {
    pub fn new(store: Arc<dyn KeyValueStore>, credentials: Credentials) -> Self {
        let (state, _) = watch::channel(SessionState::Loading);
        Self {
            store,
            verifier: None,
            bus: None,
            credentials,
            state,
        }
    }

    pub fn with_verifier(mut self, verifier: Arc<dyn SessionVerifier>) -> Self {
        self.verifier = Some(verifier);
        self
    }

    /// Toasts for login and logout go out on `bus`.
    pub fn with_bus(mut self, bus: EventBus) -> Self {
        self.bus = Some(bus);
        self
    }

    pub fn state(&self) -> SessionState {
        self.state.borrow().clone()
    }

    /// Watch state transitions, e.g. to see a logout made by another gate.
    pub fn subscribe_state(&self) -> watch::Receiver<SessionState> {
        self.state.subscribe()
    }

    fn set_state(&self, next: SessionState) {
        let prev = self.state.send_replace(next.clone());
        if prev != next {
            info!("session {:?} -> {:?}", prev, next);
        }
    }

    async fn notify(&self, n: Notification) {
        if let Some(bus) = &self.bus {
            bus.notify(n).await;
        }
    }

    /// Read the flags and settle on `Authenticated` or `Anonymous`.
    pub async fn mount(&self) -> Result<SessionState, Error> {
        let next = self.read_state().await?;
        self.set_state(next.clone());
        Ok(next)
    }

    async fn read_state(&self) -> Result<SessionState, Error> {
        let logged_in = self.store.get(SessionFlags::LOGGED_IN).await?;
        if logged_in.as_deref() != Some("true") {
            return Ok(SessionState::Anonymous);
        }

        if let Some(verifier) = &self.verifier {
            let Some(token) = self.store.get(SessionFlags::SESSION_TOKEN).await? else {
                debug!("login flag set without a session token");
                return Ok(SessionState::Anonymous);
            };
            // A garbled token is just an invalid session here.
            return Ok(match verifier.verify(&token).await {
                Ok(Some(record)) => SessionState::Authenticated {
                    email: record.email,
                    name: record.display_name,
                },
                Ok(None) | Err(Error::Auth(_)) => SessionState::Anonymous,
                Err(e) => return Err(e),
            });
        }

        let email = self.store.get(SessionFlags::USER_EMAIL).await?.unwrap_or_default();
        let name = self.store.get(SessionFlags::USER_NAME).await?.unwrap_or_default();
        Ok(SessionState::Authenticated { email, name })
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<SessionState, Error> {
        let email = email.trim();
        if email != self.credentials.email || password != self.credentials.password {
            warn!("rejected login for '{}'", email);
            let msg = format!(
                "Invalid credentials. Please use: {} / {}",
                self.credentials.email, self.credentials.password
            );
            self.notify(Notification::error(msg.clone())).await;
            return Err(Error::Auth(msg));
        }

        let name = self.credentials.display_name.clone();
        if let Some(verifier) = &self.verifier {
            let record = verifier.issue(email, &name).await?;
            self.store
                .set(SessionFlags::SESSION_TOKEN, &record.token.to_string())
                .await?;
        }
        self.store.set(SessionFlags::USER_EMAIL, email).await?;
        self.store.set(SessionFlags::USER_NAME, &name).await?;
        self.store.set(SessionFlags::LOGGED_IN, "true").await?;

        let next = SessionState::Authenticated { email: email.to_string(), name };
        self.set_state(next.clone());
        self.notify(Notification::success("Login successful! Welcome to Ideas bot Dashboard"))
            .await;
        Ok(next)
    }

    /// Clear the session flags and revoke the token. Returns where to go next.
    pub async fn logout(&self) -> Result<&'static str, Error> {
        if let Some(verifier) = &self.verifier {
            if let Some(token) = self.store.get(SessionFlags::SESSION_TOKEN).await? {
                verifier.revoke(&token).await?;
            }
        }
        self.store.remove(SessionFlags::SESSION_TOKEN).await?;
        for key in SessionFlags::LOGOUT_CLEARS {
            self.store.remove(key).await?;
        }

        self.set_state(SessionState::Anonymous);
        self.notify(Notification::success("Logged out successfully")).await;
        Ok(Page::Login.path())
    }

    pub fn guard(&self, path: &str) -> GuardDecision {
        let Some(page) = Page::resolve(path) else {
            warn!("no route for '{}'", path);
            return GuardDecision::NotFound;
        };

        match (self.state(), page.requires_session()) {
            (SessionState::Loading, true) => GuardDecision::Loading,
            (SessionState::Authenticated { .. }, false) => {
                GuardDecision::Redirect(Page::Dashboard.path())
            }
            (SessionState::Anonymous, true) => GuardDecision::Redirect(Page::Login.path()),
            _ => GuardDecision::Render(page),
        }
    }

    /// Re-read the flags whenever another writer touches them. The task ends
    /// when the bus shuts down.
    pub async fn watch_storage(self: &Arc<Self>, bus: &EventBus) -> JoinHandle<()> {
        let mut rx = bus.subscribe(None).await;
        let mut shutdown = bus.shutdown_rx.clone();
        let gate = Arc::clone(self);

        tokio::spawn(async move {
            loop {
                tokio::select! {
                    event = rx.recv() => match event {
                        Some(WapiEvent::StorageChanged { key, .. }) if is_session_key(&key) => {
                            if let Err(e) = gate.mount().await {
                                warn!("re-reading session flags failed: {}", e);
                            }
                        }
                        Some(_) => {}
                        None => break,
                    },
                    _ = shutdown.changed() => {
                        if *shutdown.borrow() {
                            break;
                        }
                    }
                }
            }
        })
    }
}

fn is_session_key(key: &str) -> bool {
    key == SessionFlags::SESSION_TOKEN || SessionFlags::LOGOUT_CLEARS.contains(&key)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::InMemoryStore;
    use wapi_common::models::NotificationLevel;

    fn gate(store: Arc<dyn KeyValueStore>) -> SessionGate {
        SessionGate::new(store, Credentials::from(&DashboardConfig::default()))
    }

    #[tokio::test]
    async fn gate_is_loading_until_mounted() -> Result<(), Error> {
        let g = gate(Arc::new(InMemoryStore::new()));
        assert_eq!(g.guard("/contacts"), GuardDecision::Loading);
        assert_eq!(g.guard("/"), GuardDecision::Render(Page::Login));

        g.mount().await?;
        assert_eq!(g.guard("/contacts"), GuardDecision::Redirect("/"));
        Ok(())
    }

    #[tokio::test]
    async fn wrong_password_is_rejected_and_writes_nothing() -> Result<(), Error> {
        let store = Arc::new(InMemoryStore::new());
        let g = gate(store.clone());
        assert!(matches!(g.login("demo@flaxxawapi.com", "nope").await, Err(Error::Auth(_))));
        assert!(store.keys().await?.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn rejection_toast_names_the_demo_account() -> Result<(), Error> {
        let bus = EventBus::new();
        let mut rx = bus.subscribe(None).await;
        let g = gate(Arc::new(InMemoryStore::new())).with_bus(bus);

        let err = g.login("someone@else.com", "demo123").await;
        let expected = "Invalid credentials. Please use: demo@flaxxawapi.com / demo123";
        assert!(matches!(err, Err(Error::Auth(ref m)) if m == expected));
        match rx.recv().await {
            Some(WapiEvent::Notification(n)) => {
                assert_eq!(n.level, NotificationLevel::Error);
                assert_eq!(n.message, expected);
            }
            other => panic!("expected a toast, got {other:?}"),
        }
        Ok(())
    }

    #[tokio::test]
    async fn flag_other_than_true_is_anonymous() -> Result<(), Error> {
        let store = Arc::new(InMemoryStore::with_entries([("isLoggedIn", "yes")]));
        let g = gate(store);
        assert_eq!(g.mount().await?, SessionState::Anonymous);
        Ok(())
    }

    #[tokio::test]
    async fn authenticated_visitor_is_sent_from_login_to_dashboard() -> Result<(), Error> {
        let g = gate(Arc::new(InMemoryStore::new()));
        g.login(" demo@flaxxawapi.com ", "demo123").await?;
        assert_eq!(g.guard("/"), GuardDecision::Redirect("/dashboard"));
        assert_eq!(g.guard("/reply-bots"), GuardDecision::Render(Page::ReplyBots));
        assert_eq!(g.guard("/missing"), GuardDecision::NotFound);
        Ok(())
    }
}
