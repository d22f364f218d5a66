use std::sync::{Arc, Mutex, PoisonError};
use std::time::{Duration, Instant};

use axum::body::Body;
use axum::extract::State;
use axum::http::Request;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};

use crate::error::Error;

#[derive(Debug, Default)]
struct ThrottleState {
    clicks: u32,
    locked_until: Option<Instant>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshDecision {
    Allowed,
    Rejected { retry_after: Duration },
}

/// Click-count lockout for the reload action. Clicks are counted with no time
/// decay; the click that reaches `max_clicks` still goes through but locks the
/// action for `cooldown`, after which the count starts over.
#[derive(Clone, Debug)]
pub struct RefreshThrottle {
    max_clicks: u32,
    cooldown: Duration,
    state: Arc<Mutex<ThrottleState>>,
}

impl RefreshThrottle {
    pub fn new(max_clicks: u32, cooldown: Duration) -> Self {
        Self {
            max_clicks: max_clicks.max(1),
            cooldown,
            state: Arc::new(Mutex::new(ThrottleState::default())),
        }
    }

    pub fn try_acquire(&self) -> RefreshDecision {
        self.try_acquire_at(Instant::now())
    }

    pub fn try_acquire_at(&self, now: Instant) -> RefreshDecision {
        let mut guard = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        Self::expire(&mut guard, now);

        if let Some(until) = guard.locked_until {
            return RefreshDecision::Rejected {
                retry_after: until.saturating_duration_since(now),
            };
        }

        guard.clicks += 1;
        if guard.clicks >= self.max_clicks {
            guard.locked_until = Some(now + self.cooldown);
            tracing::info!(clicks = guard.clicks, cooldown_secs = self.cooldown.as_secs(), "Refresh locked");
        }
        RefreshDecision::Allowed
    }

    pub fn is_locked(&self) -> bool {
        self.is_locked_at(Instant::now())
    }

    pub fn is_locked_at(&self, now: Instant) -> bool {
        let mut guard = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        Self::expire(&mut guard, now);
        guard.locked_until.is_some()
    }

    fn expire(state: &mut ThrottleState, now: Instant) {
        if state.locked_until.is_some_and(|until| now >= until) {
            state.locked_until = None;
            state.clicks = 0;
        }
    }
}

pub async fn refresh_throttle_middleware(
    State(throttle): State<RefreshThrottle>,
    req: Request<Body>,
    next: Next,
) -> Response {
    match throttle.try_acquire() {
        RefreshDecision::Allowed => next.run(req).await,
        RefreshDecision::Rejected { retry_after } => Error::RefreshLocked {
            retry_after_secs: retry_after.as_secs_f64().ceil() as u64,
        }
        .into_response(),
    }
}
