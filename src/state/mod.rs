//! Shared application state
//!
//! Everything a request handler needs, cloned into each request by axum

use std::sync::Arc;
use tokio::sync::watch;
use crate::config::Settings;
use crate::middleware::rate_limit::SubmissionRateLimiter;
use crate::services::{AvailabilitySnapshot, ServiceFactory};

#[derive(Clone)]
pub struct AppState {
    pub settings: Arc<Settings>,
    pub services: Arc<ServiceFactory>,
    /// Latest snapshot published by the availability poller
    pub availability: watch::Receiver<AvailabilitySnapshot>,
    pub rate_limiter: SubmissionRateLimiter,
}

impl AppState {
    pub fn new(
        settings: Settings,
        services: ServiceFactory,
        availability: watch::Receiver<AvailabilitySnapshot>,
    ) -> Self {
        let rate_limiter = SubmissionRateLimiter::new(&settings.rate_limit);

        Self {
            settings: Arc::new(settings),
            services: Arc::new(services),
            availability,
            rate_limiter,
        }
    }
}
