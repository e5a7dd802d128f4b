use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use dashmap::mapref::one::RefMut;
use dashmap::DashMap;
use rental_core::http::{HeaderMap, COOKIE};
use serde_json::Value;

/// Name of the cookie carrying the session id.
pub const SESSION_COOKIE: &str = "SESSION";

/// Session attribute holding the last authentication failure, shown on the
/// login page and cleared once a login succeeds.
pub const AUTHENTICATION_EXCEPTION: &str = "AUTHENTICATION_EXCEPTION";

/// Idle time after which a session is discarded.
pub const DEFAULT_SESSION_TTL: Duration = Duration::from_secs(30 * 60);

/// Attribute storage of one HTTP session.
pub trait SessionAttributes {
    fn set_attribute(&mut self, name: &str, value: Value);

    fn remove_attribute(&mut self, name: &str);
}

struct SessionData {
    attributes: HashMap<String, Value>,
    last_access: Instant,
}

impl SessionData {
    fn new() -> Self {
        Self {
            attributes: HashMap::new(),
            last_access: Instant::now(),
        }
    }

    fn is_expired(&self, ttl: Duration) -> bool {
        self.last_access.elapsed() >= ttl
    }
}

/// Process-local session store keyed by session id.
///
/// Sessions idle for longer than the store's TTL are treated as absent and
/// dropped lazily. Cloning shares the underlying map.
#[derive(Clone)]
pub struct InMemorySessionStore {
    sessions: Arc<DashMap<String, SessionData>>,
    ttl: Duration,
}

impl Default for InMemorySessionStore {
    fn default() -> Self {
        Self::with_ttl(DEFAULT_SESSION_TTL)
    }
}

/// A locked, mutable view of one session. Do not hold across `.await`.
pub struct Session<'a> {
    entry: RefMut<'a, String, SessionData>,
}

impl Session<'_> {
    pub fn id(&self) -> &str {
        self.entry.key()
    }

    pub fn attribute(&self, name: &str) -> Option<&Value> {
        self.entry.value().attributes.get(name)
    }
}

impl SessionAttributes for Session<'_> {
    fn set_attribute(&mut self, name: &str, value: Value) {
        self.entry
            .value_mut()
            .attributes
            .insert(name.to_string(), value);
    }

    fn remove_attribute(&mut self, name: &str) {
        self.entry.value_mut().attributes.remove(name);
    }
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            sessions: Arc::new(DashMap::new()),
            ttl,
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Start an empty session. Expired sessions are swept first.
    pub fn create(&self) -> Session<'_> {
        self.purge_expired();
        let id = uuid::Uuid::new_v4().to_string();
        tracing::debug!(session_id = %id, "session created");
        let entry = self.sessions.entry(id).or_insert_with(SessionData::new);
        Session { entry }
    }

    /// The live session with this id, if any. Never creates one.
    pub fn get(&self, id: &str) -> Option<Session<'_>> {
        let mut entry = self.sessions.get_mut(id)?;
        if entry.is_expired(self.ttl) {
            drop(entry);
            self.sessions.remove_if(id, |_, data| data.is_expired(self.ttl));
            tracing::debug!(session_id = %id, "session expired");
            return None;
        }
        entry.last_access = Instant::now();
        Some(Session { entry })
    }

    /// The session named by the request's `SESSION` cookie, if any.
    pub fn from_headers(&self, headers: &HeaderMap) -> Option<Session<'_>> {
        let id = session_id(headers)?;
        self.get(&id)
    }

    /// The request's session, or a fresh one when it has none.
    pub fn from_headers_or_create(&self, headers: &HeaderMap) -> Session<'_> {
        if let Some(session) = self.from_headers(headers) {
            return session;
        }
        self.create()
    }

    /// Drop every expired session and return how many were removed.
    pub fn purge_expired(&self) -> usize {
        let before = self.sessions.len();
        self.sessions.retain(|_, data| !data.is_expired(self.ttl));
        before.saturating_sub(self.sessions.len())
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}

/// Read the session id from the `Cookie` headers.
pub fn session_id(headers: &HeaderMap) -> Option<String> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == SESSION_COOKIE)
        .map(|(_, value)| value.to_string())
        .filter(|value| !value.is_empty())
}

/// `Set-Cookie` value binding the client to session `id`.
pub fn session_cookie(id: &str) -> String {
    format!("{SESSION_COOKIE}={id}; Path=/; HttpOnly; SameSite=Lax")
}
