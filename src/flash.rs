//! One-shot notices carried from a state-changing request to the next page
//! render of the same browser session.
//!
//! The session is identified by a cookie holding a random UUID. Notices live
//! in process memory and are removed as soon as they are taken, or once they
//! are older than the store's time-to-live (a session that never comes back).

use actix_web::cookie::{Cookie, SameSite};
use actix_web::HttpRequest;
use chrono::{DateTime, Duration, Utc};
use leptos::logging::log;
use std::collections::HashMap;
use tokio::sync::Mutex;
use uuid::Uuid;

pub const SESSION_COOKIE: &str = "storefront_session";

/// How long an unread notice is kept for its session.
pub const NOTICE_TTL_MINUTES: i64 = 30;

/// Key of the notice written after a review was accepted.
pub const THANKS: &str = "thanks";
pub const THANKS_MESSAGE: &str = "Спасибо за отзыв! Он появится после проверки модератором.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SessionId(Uuid);

impl SessionId {
    pub fn generate() -> Self {
        SessionId(Uuid::new_v4())
    }

    /// Reads the session cookie. Missing or garbled cookies yield `None`.
    pub fn from_request(req: &HttpRequest) -> Option<Self> {
        let cookie = req.cookie(SESSION_COOKIE)?;
        Uuid::parse_str(cookie.value()).ok().map(SessionId)
    }

    pub fn cookie(&self) -> Cookie<'static> {
        Cookie::build(SESSION_COOKIE, self.0.to_string())
            .path("/")
            .http_only(true)
            .same_site(SameSite::Lax)
            .finish()
    }
}

#[derive(Debug)]
struct SessionNotices {
    written_at: DateTime<Utc>,
    messages: HashMap<String, String>,
}

#[derive(Debug)]
pub struct FlashStore {
    ttl: Duration,
    notices: Mutex<HashMap<SessionId, SessionNotices>>,
}

impl Default for FlashStore {
    fn default() -> Self {
        Self::with_ttl(Duration::minutes(NOTICE_TTL_MINUTES))
    }
}

impl FlashStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_ttl(ttl: Duration) -> Self {
        FlashStore {
            ttl,
            notices: Mutex::new(HashMap::new()),
        }
    }

    /// Stores a notice for the session, replacing any unread notice under the same key.
    pub async fn put(&self, session: SessionId, key: &str, message: impl Into<String>) {
        self.put_at(session, key, message.into(), Utc::now()).await
    }

    /// Returns the notice and forgets it, so the next call yields `None`.
    pub async fn take(&self, session: SessionId, key: &str) -> Option<String> {
        self.take_at(session, key, Utc::now()).await
    }

    /// Number of sessions with at least one unread notice.
    pub async fn pending_sessions(&self) -> usize {
        self.notices.lock().await.len()
    }

    async fn put_at(&self, session: SessionId, key: &str, message: String, now: DateTime<Utc>) {
        let mut notices = self.notices.lock().await;
        self.purge_expired(&mut notices, now);
        let slot = notices.entry(session).or_insert_with(|| SessionNotices {
            written_at: now,
            messages: HashMap::new(),
        });
        slot.written_at = now;
        slot.messages.insert(key.to_string(), message);
        log!("[FLASH] Stored '{}' notice", key);
    }

    async fn take_at(&self, session: SessionId, key: &str, now: DateTime<Utc>) -> Option<String> {
        let mut notices = self.notices.lock().await;
        self.purge_expired(&mut notices, now);
        let slot = notices.get_mut(&session)?;
        let message = slot.messages.remove(key);
        if slot.messages.is_empty() {
            notices.remove(&session);
        }
        if message.is_some() {
            log!("[FLASH] Consumed '{}' notice", key);
        }
        message
    }

    fn purge_expired(&self, notices: &mut HashMap<SessionId, SessionNotices>, now: DateTime<Utc>) {
        let before = notices.len();
        notices.retain(|_, slot| now - slot.written_at < self.ttl);
        let dropped = before - notices.len();
        if dropped > 0 {
            log!("[FLASH] Dropped {} expired sessions", dropped);
        }
    }
}
