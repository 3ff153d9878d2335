//! Rate limiting middleware
//!
//! This module limits public registration submissions per client address
//! to keep the form from being flooded.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::num::NonZeroU32;
use std::sync::Arc;
use axum::extract::{ConnectInfo, Request, State};
use axum::http::HeaderMap;
use axum::middleware::Next;
use axum::response::Response;
use governor::{DefaultKeyedRateLimiter, Quota, RateLimiter};
use tracing::warn;
use crate::config::RateLimitConfig;
use crate::state::AppState;
use crate::utils::errors::{PereirinhaError, Result};

/// Per-address limiter for registration submissions
#[derive(Clone)]
pub struct SubmissionRateLimiter {
    limiter: Option<Arc<DefaultKeyedRateLimiter<IpAddr>>>,
    trust_forwarded_for: bool,
}

impl SubmissionRateLimiter {
    /// Build a limiter from configuration; disabled or zero quotas turn it off
    pub fn new(config: &RateLimitConfig) -> Self {
        let limiter = match (config.enabled, NonZeroU32::new(config.submissions_per_minute)) {
            (true, Some(per_minute)) => {
                let burst = NonZeroU32::new(config.burst).unwrap_or(per_minute);
                Some(Arc::new(RateLimiter::keyed(Quota::per_minute(per_minute).allow_burst(burst))))
            }
            _ => None,
        };

        Self {
            limiter,
            trust_forwarded_for: config.trust_forwarded_for,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.limiter.is_some()
    }

    /// Record one submission from `client`
    pub fn check(&self, client: IpAddr) -> Result<()> {
        let Some(limiter) = &self.limiter else {
            return Ok(());
        };

        if limiter.check_key(&client).is_err() {
            warn!(client = %client, "Submission rate limit exceeded");
            return Err(PereirinhaError::RateLimitExceeded);
        }

        // Drop entries whose quota has fully replenished
        limiter.retain_recent();
        Ok(())
    }

    /// Address a request is attributed to
    pub fn client_ip(&self, headers: &HeaderMap, peer: Option<SocketAddr>) -> IpAddr {
        if self.trust_forwarded_for {
            let forwarded = headers
                .get("x-forwarded-for")
                .and_then(|value| value.to_str().ok())
                .and_then(|value| value.split(',').next())
                .and_then(|first| first.trim().parse().ok());
            if let Some(ip) = forwarded {
                return ip;
            }
        }

        peer.map(|addr| addr.ip()).unwrap_or(IpAddr::V4(Ipv4Addr::UNSPECIFIED))
    }
}

/// Reject submissions over the per-address quota with 429
pub async fn limit_submissions(State(state): State<AppState>, request: Request, next: Next) -> Result<Response> {
    let peer = request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| *addr);
    let client = state.rate_limiter.client_ip(request.headers(), peer);

    state.rate_limiter.check(client)?;
    Ok(next.run(request).await)
}
