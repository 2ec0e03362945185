pub mod password;

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::SecurityConfig;
use crate::database::models::User;
use crate::error::ActionError;
use crate::types::Role;

/// Name of the cookie carrying the session token for browser clients
pub const SESSION_COOKIE: &str = "session";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// User id
    pub sub: String,
    pub role: Role,
    pub exp: i64,
    pub iat: i64,
}

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("JWT secret not configured")]
    MissingSecret,

    #[error("Invalid session lifetime: {0} hours")]
    InvalidExpiry(u64),

    #[error("Invalid session token: {0}")]
    Token(#[from] jsonwebtoken::errors::Error),
}

/// Signing material for session tokens
pub struct SessionKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl: Duration,
}

impl SessionKeys {
    pub fn new(secret: &str, expiry_hours: u64) -> Result<Self, SessionError> {
        if secret.is_empty() {
            return Err(SessionError::MissingSecret);
        }
        let ttl = i64::try_from(expiry_hours)
            .ok()
            .and_then(Duration::try_hours)
            .filter(|ttl| Utc::now().checked_add_signed(*ttl).is_some())
            .ok_or(SessionError::InvalidExpiry(expiry_hours))?;

        Ok(Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            ttl,
        })
    }

    pub fn from_config(config: &SecurityConfig) -> Result<Self, SessionError> {
        Self::new(&config.jwt_secret, config.jwt_expiry_hours)
    }

    /// Token lifetime in seconds
    pub fn ttl_secs(&self) -> i64 {
        self.ttl.num_seconds()
    }

    pub fn issue(&self, user: &User) -> Result<String, SessionError> {
        let now = Utc::now();
        let expires = now
            .checked_add_signed(self.ttl)
            .ok_or(SessionError::InvalidExpiry(self.ttl.num_hours().unsigned_abs()))?;
        let claims = Claims {
            sub: user.id.clone(),
            role: user.role,
            exp: expires.timestamp(),
            iat: now.timestamp(),
        };
        self.sign(&claims)
    }

    pub fn verify(&self, token: &str) -> Result<Claims, SessionError> {
        let data = decode::<Claims>(token, &self.decoding, &Validation::default())?;
        Ok(data.claims)
    }

    fn sign(&self, claims: &Claims) -> Result<String, SessionError> {
        Ok(encode(&Header::default(), claims, &self.encoding)?)
    }
}

/// Identity of whoever issued the current request, resolved once per request
/// by the session middleware and handed explicitly to every action.
#[derive(Debug, Clone, Default)]
pub struct Caller(Option<User>);

impl Caller {
    pub fn anonymous() -> Self {
        Self(None)
    }

    pub fn user(user: User) -> Self {
        Self(Some(user))
    }

    pub fn current(&self) -> Option<&User> {
        self.0.as_ref()
    }

    pub fn is_admin(&self) -> bool {
        self.0.as_ref().is_some_and(User::is_admin)
    }

    /// The signed-in user, or `Unauthorized`
    pub fn require(&self) -> Result<&User, ActionError> {
        self.0.as_ref().ok_or(ActionError::Unauthorized)
    }

    /// A signed-in ADMIN, `Unauthorized` when nobody is signed in, `Forbidden` otherwise
    pub fn require_admin(&self) -> Result<&User, ActionError> {
        let user = self.require()?;
        if user.is_admin() {
            Ok(user)
        } else {
            Err(ActionError::Forbidden)
        }
    }
}
