use std::time::{Duration, Instant};

use actix_web::http::header::{HeaderMap, AUTHORIZATION};
use chrono::Utc;
use dashmap::DashMap;
use uuid::Uuid;
use validator::Validate;
use zeroize::Zeroizing;

use crate::{
    entities::session::{LoginRequest, Session, SessionResponse},
    errors::GateError,
    settings::AppConfig,
};

/// Single-user gate in front of the dashboard. One fixed credential pair,
/// opaque uuid tokens held in memory, a restart signs everyone out.
pub struct SessionGate {
    username: String,
    password: Zeroizing<String>,
    sessions: DashMap<String, Session>,
}

impl SessionGate {
    pub fn new(config: &AppConfig) -> Self {
        SessionGate {
            username: config.dashboard_username.clone(),
            password: Zeroizing::new(config.dashboard_password.clone()),
            sessions: DashMap::new(),
        }
    }

    pub fn login(&self, request: &LoginRequest) -> Result<SessionResponse, GateError> {
        request.validate()?;

        if request.username != self.username || request.password != *self.password {
            return Err(GateError::WrongCredentials);
        }

        let session = Session {
            token: Uuid::new_v4().to_string(),
            started_at: Utc::now(),
        };
        let response = SessionResponse::from(&session);
        self.sessions.insert(session.token.clone(), session);

        tracing::info!("Dashboard unlocked");
        Ok(response)
    }

    pub fn logout(&self, token: &str) -> Result<(), GateError> {
        self.sessions
            .remove(token)
            .map(|_| ())
            .ok_or(GateError::InvalidSession)
    }

    /// Some(session) when the token belongs to a live session.
    pub fn authorize(&self, token: &str) -> Option<Session> {
        self.sessions.get(token).map(|entry| entry.value().clone())
    }
}

/// Pull the bearer token out of an Authorization header.
pub fn bearer_token(headers: &HeaderMap) -> Option<String> {
    headers
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(|token| token.trim().to_string())
}

#[derive(Debug, Clone, Copy)]
struct AttemptWindow {
    count: u32,
    window_start: Instant,
}

/// Per-address failed-login throttle. Enough failures inside the window
/// lock the address out until the window expires.
pub struct LoginAttemptGuard {
    max_attempts: u32,
    window: Duration,
    attempts: DashMap<String, AttemptWindow>,
}

impl LoginAttemptGuard {
    pub fn new(max_attempts: u32, window: Duration) -> Self {
        LoginAttemptGuard {
            max_attempts,
            window,
            attempts: DashMap::new(),
        }
    }

    pub fn check(&self, addr: &str) -> Result<(), GateError> {
        let expired = match self.attempts.get(addr) {
            Some(entry) => {
                let attempt = *entry.value();
                if attempt.window_start.elapsed() < self.window {
                    if attempt.count >= self.max_attempts {
                        return Err(GateError::TooManyAttempts);
                    }
                    return Ok(());
                }
                true
            }
            None => false,
        };

        if expired {
            self.attempts.remove(addr);
        }
        Ok(())
    }

    pub fn record_failure(&self, addr: &str) {
        let mut entry = self
            .attempts
            .entry(addr.to_string())
            .or_insert(AttemptWindow {
                count: 0,
                window_start: Instant::now(),
            });

        if entry.window_start.elapsed() >= self.window {
            *entry = AttemptWindow {
                count: 1,
                window_start: Instant::now(),
            };
        } else {
            entry.count += 1;
        }
    }

    pub fn clear(&self, addr: &str) {
        self.attempts.remove(addr);
    }
}
