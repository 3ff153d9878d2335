//! Authentication service implementation
//!
//! This service handles admin login against the configured credentials,
//! issues signed session tokens and keeps track of tokens revoked by logout.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use chrono::{DateTime, Duration, TimeZone, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use uuid::Uuid;
use crate::config::AuthConfig;
use crate::utils::errors::{PereirinhaError, Result};
use crate::utils::logging;

/// Claims carried by an admin session token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Admin email
    pub sub: String,
    /// Token id, used for revocation
    pub jti: String,
    pub iat: i64,
    pub exp: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

/// Authentication service for the admin panel
#[derive(Clone)]
pub struct AuthService {
    settings: AuthConfig,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    /// Revoked token ids with their expiry timestamp
    revoked: Arc<Mutex<HashMap<String, i64>>>,
}

impl AuthService {
    /// Create a new AuthService instance
    pub fn new(settings: AuthConfig) -> Self {
        let encoding_key = EncodingKey::from_secret(settings.jwt_secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(settings.jwt_secret.as_bytes());

        Self {
            settings,
            encoding_key,
            decoding_key,
            revoked: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Hash a password for the admin credentials setting
    pub fn hash_password(password: &str) -> Result<String> {
        if password.len() < 8 {
            return Err(PereirinhaError::InvalidInput(
                "Password must be at least 8 characters long".to_string(),
            ));
        }

        Ok(bcrypt::hash(password, bcrypt::DEFAULT_COST)?)
    }

    /// Check credentials and issue a session token
    pub async fn login(&self, request: LoginRequest) -> Result<LoginResponse> {
        let email_matches = request.email.trim().eq_ignore_ascii_case(&self.settings.admin_email);

        // Verify even on a wrong email so both failures take the same time
        let hash = self.settings.admin_password_hash.clone();
        let password = request.password;
        let password_matches = tokio::task::spawn_blocking(move || bcrypt::verify(password, &hash))
            .await
            .map_err(|e| PereirinhaError::Authentication(format!("Password verification failed: {}", e)))??;

        if !(email_matches && password_matches) {
            warn!(email = %request.email.trim(), "Admin login rejected");
            return Err(PereirinhaError::Authentication("Invalid email or password".to_string()));
        }

        let response = self.issue_token(Utc::now())?;
        logging::log_admin_action(&self.settings.admin_email, "login", None, None);

        Ok(response)
    }

    fn issue_token(&self, now: DateTime<Utc>) -> Result<LoginResponse> {
        let expires_at = now + Duration::minutes(self.settings.token_ttl_minutes);
        let claims = Claims {
            sub: self.settings.admin_email.clone(),
            jti: Uuid::new_v4().to_string(),
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
        };

        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)?;
        Ok(LoginResponse { token, expires_at })
    }

    /// Decode a token and reject it if expired or revoked
    pub fn verify_token(&self, token: &str) -> Result<Claims> {
        let data = decode::<Claims>(token, &self.decoding_key, &Validation::new(Algorithm::HS256))?;
        let claims = data.claims;

        if self.revoked().contains_key(&claims.jti) {
            debug!(jti = %claims.jti, "Revoked token presented");
            return Err(PereirinhaError::Authentication("Session has ended".to_string()));
        }

        Ok(claims)
    }

    /// Revoke the token until it would have expired anyway
    pub fn logout(&self, claims: &Claims) {
        let now = Utc::now().timestamp();
        let mut revoked = self.revoked();
        revoked.retain(|_, exp| *exp > now);
        revoked.insert(claims.jti.clone(), claims.exp);

        let expired_at = Utc.timestamp_opt(claims.exp, 0).single();
        logging::log_admin_action(&claims.sub, "logout", None, expired_at.map(|t| t.to_rfc3339()).as_deref());
    }

    fn revoked(&self) -> MutexGuard<'_, HashMap<String, i64>> {
        self.revoked.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
