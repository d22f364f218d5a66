pub mod config;
pub mod database;
pub mod dto;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod utils;

use std::sync::Arc;

use crate::config::Config;
use crate::middleware::refresh_throttle::RefreshThrottle;
use crate::services::{
    interview_service::InterviewService,
    interview_store::{InterviewStore, PgInterviewStore},
    position_service::PositionMatcher,
};
use crate::utils::time::Clock;

#[derive(Clone)]
pub struct AppState<S = PgInterviewStore> {
    pub interview_service: InterviewService<S>,
    pub refresh_throttle: RefreshThrottle,
    pub positions: PositionMatcher,
}

impl<S: InterviewStore + Clone> AppState<S> {
    pub fn new(store: S, clock: Arc<dyn Clock>, refresh_throttle: RefreshThrottle) -> Self {
        Self {
            interview_service: InterviewService::new(store, clock),
            refresh_throttle,
            positions: PositionMatcher::default(),
        }
    }

    pub fn from_config(store: S, clock: Arc<dyn Clock>, config: &Config) -> Self {
        let throttle = RefreshThrottle::new(config.refresh_max_clicks, config.refresh_cooldown);
        Self::new(store, clock, throttle)
    }
}
