//! Cookie-identified caller sessions.
//!
//! This module provides:
//! - **Session middleware**: read the session id from the `todo_session` cookie
//!   (or start a new session) and make it available to handlers
//! - **Session registry**: the in-memory lists owned by each session, dropped
//!   once the session goes idle
//!
//! # Example
//!
//! ```ignore
//! use axum::Router;
//! use todo_lists_web::session::session_layer;
//!
//! let app = Router::new()
//!     .route("/lists", get(list_lists))
//!     .layer(session_layer());
//! ```
//!
//! # Flow
//!
//! 1. **Extract** the session id from the `todo_session` cookie (or generate a new UUID)
//! 2. **Store** it in request extensions for handler access
//! 3. **Create tracing span** with a `session_id` field
//! 4. **Set** the cookie on the response when the session is new

use axum::{
    extract::Request,
    http::{header, HeaderMap, HeaderValue},
    response::Response,
};
use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Mutex, PoisonError};
use std::task::{Context, Poll};
use std::time::{Duration, Instant};
use todo_lists_core::SessionLists;
use tokio::task::JoinHandle;
use tokio::time::{self, MissedTickBehavior};
use tower::{Layer, Service};
use tracing::Instrument;
use uuid::Uuid;

/// Name of the cookie carrying the session id.
pub const SESSION_COOKIE: &str = "todo_session";

/// Identifies one caller session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SessionId(Uuid);

impl SessionId {
    /// Start a new session.
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    /// Wrap an existing id.
    #[must_use]
    pub const fn from_uuid(id: Uuid) -> Self {
        Self(id)
    }

    /// Session id carried by the request's cookies, if any is valid.
    #[must_use]
    pub fn from_headers(headers: &HeaderMap) -> Option<Self> {
        headers
            .get_all(header::COOKIE)
            .iter()
            .filter_map(|value| value.to_str().ok())
            .flat_map(|cookies| cookies.split(';'))
            .filter_map(|cookie| cookie.trim().split_once('='))
            .find(|(name, _)| *name == SESSION_COOKIE)
            .and_then(|(_, value)| Uuid::parse_str(value.trim()).ok())
            .map(Self)
    }

    fn set_cookie_header(self) -> Option<HeaderValue> {
        HeaderValue::from_str(&format!(
            "{SESSION_COOKIE}={}; Path=/; HttpOnly; SameSite=Lax",
            self.0
        ))
        .ok()
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// How long an unused session keeps its lists unless configured otherwise.
pub const DEFAULT_IDLE_TIMEOUT: Duration = Duration::from_secs(30 * 60);

#[derive(Debug)]
struct SessionEntry {
    lists: SessionLists,
    last_access: Instant,
}

impl SessionEntry {
    fn new(now: Instant) -> Self {
        Self {
            lists: SessionLists::new(),
            last_access: now,
        }
    }

    fn is_idle(&self, now: Instant, idle_timeout: Duration) -> bool {
        now.saturating_duration_since(self.last_access) >= idle_timeout
    }
}

/// In-memory lists of every live session.
///
/// A session that goes unused for the idle timeout ends: its lists are
/// dropped, either when [`SessionRegistry::evict_idle`] sweeps or when the
/// session is next seen. Clones share the same sessions.
#[derive(Debug, Clone)]
pub struct SessionRegistry {
    sessions: Arc<Mutex<HashMap<SessionId, SessionEntry>>>,
    idle_timeout: Duration,
}

impl Default for SessionRegistry {
    fn default() -> Self {
        Self::with_idle_timeout(DEFAULT_IDLE_TIMEOUT)
    }
}

impl SessionRegistry {
    /// Create an empty registry with the default idle timeout.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty registry whose sessions end after `idle_timeout`
    /// without a request.
    #[must_use]
    pub fn with_idle_timeout(idle_timeout: Duration) -> Self {
        Self {
            sessions: Arc::default(),
            idle_timeout,
        }
    }

    /// Idle time after which a session ends.
    #[must_use]
    pub const fn idle_timeout(&self) -> Duration {
        self.idle_timeout
    }

    /// The lists handle of `session_id`, created empty on first access.
    #[must_use]
    pub fn lists_for(&self, session_id: SessionId) -> SessionLists {
        self.lists_for_at(session_id, Instant::now())
    }

    fn lists_for_at(&self, session_id: SessionId, now: Instant) -> SessionLists {
        let mut sessions = self.sessions.lock().unwrap_or_else(PoisonError::into_inner);
        let entry = sessions.entry(session_id).or_insert_with(|| {
            tracing::debug!(session_id = %session_id, "New session lists");
            SessionEntry::new(now)
        });

        if entry.is_idle(now, self.idle_timeout) {
            tracing::debug!(session_id = %session_id, "Session expired, starting over");
            *entry = SessionEntry::new(now);
        }
        entry.last_access = now;
        entry.lists.clone()
    }

    /// Drop a session and its lists.
    pub fn end(&self, session_id: SessionId) {
        self.sessions
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&session_id);
    }

    /// Drop every session idle for at least the idle timeout.
    ///
    /// Returns the number of sessions dropped.
    pub fn evict_idle(&self) -> usize {
        self.evict_idle_at(Instant::now())
    }

    fn evict_idle_at(&self, now: Instant) -> usize {
        let mut sessions = self.sessions.lock().unwrap_or_else(PoisonError::into_inner);
        let before = sessions.len();
        sessions.retain(|_, entry| !entry.is_idle(now, self.idle_timeout));
        before - sessions.len()
    }

    /// Sweep idle sessions every `every` until the runtime shuts down.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn spawn_eviction(&self, every: Duration) -> JoinHandle<()> {
        let registry = self.clone();
        let mut ticks = time::interval(every.max(Duration::from_secs(1)));
        ticks.set_missed_tick_behavior(MissedTickBehavior::Delay);

        tokio::spawn(async move {
            loop {
                ticks.tick().await;
                let evicted = registry.evict_idle();
                if evicted > 0 {
                    tracing::info!(evicted, remaining = registry.len(), "Idle sessions evicted");
                    metrics::counter!("todo_lists.sessions.evicted").increment(u64::try_from(evicted).unwrap_or(u64::MAX));
                }
            }
        })
    }

    /// Number of live sessions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.sessions
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Whether no session is live.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Create a layer that resolves the caller's session on every request.
#[must_use]
pub const fn session_layer() -> SessionLayer {
    SessionLayer
}

/// Layer for session resolution.
#[derive(Clone, Debug)]
pub struct SessionLayer;

impl<S> Layer<S> for SessionLayer {
    type Service = SessionMiddleware<S>;

    fn layer(&self, inner: S) -> Self::Service {
        SessionMiddleware { inner }
    }
}

/// Middleware service for session resolution.
#[derive(Clone, Debug)]
pub struct SessionMiddleware<S> {
    inner: S,
}

impl<S> Service<Request> for SessionMiddleware<S>
where
    S: Service<Request, Response = Response> + Send + 'static,
    S::Future: Send + 'static,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = std::pin::Pin<
        Box<dyn std::future::Future<Output = Result<Self::Response, Self::Error>> + Send>,
    >;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut req: Request) -> Self::Future {
        let existing = SessionId::from_headers(req.headers());
        let session_id = existing.unwrap_or_else(SessionId::generate);

        req.extensions_mut().insert(session_id);

        let span = tracing::info_span!(
            "http_request",
            session_id = %session_id,
            method = %req.method(),
            uri = %req.uri(),
        );

        let fut = self.inner.call(req);

        Box::pin(async move {
            let mut response = fut.instrument(span).await?;

            if existing.is_none() {
                if let Some(cookie) = session_id.set_cookie_header() {
                    response.headers_mut().append(header::SET_COOKIE, cookie);
                }
            }

            Ok(response)
        })
    }
}
