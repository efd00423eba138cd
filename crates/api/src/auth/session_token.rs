//! Admin session tokens.
//!
//! The embedded admin sends an HS256 JWT signed with the app's API secret.
//! Its audience is the app's API key and its `dest` claim is the shop's
//! origin (`https://<shop>`), which is how a request gets bound to a shop.

use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Claims carried by an admin session token.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct SessionClaims {
    /// Issuer -- the shop's admin URL (`https://<shop>/admin`).
    pub iss: String,
    /// Destination -- the shop's origin (`https://<shop>`).
    pub dest: String,
    /// Audience -- the app's API key.
    pub aud: String,
    /// Staff member id, when the token was issued for one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub: Option<String>,
    /// Expiration time (UTC Unix timestamp).
    pub exp: i64,
    /// Not-before time (UTC Unix timestamp).
    pub nbf: i64,
    /// Issued-at time (UTC Unix timestamp).
    pub iat: i64,
    /// Unique token identifier.
    pub jti: String,
}

impl SessionClaims {
    /// The shop domain this token is bound to.
    ///
    /// Returns `None` unless `dest` is an `https://` origin with a bare host
    /// and `iss` points at that same shop.
    pub fn shop(&self) -> Option<&str> {
        let shop = self.dest.strip_prefix("https://")?.trim_end_matches('/');
        if shop.is_empty() || shop.contains('/') {
            return None;
        }
        let issuer_shop = self
            .iss
            .strip_prefix("https://")?
            .trim_end_matches('/')
            .trim_end_matches("/admin");
        (issuer_shop == shop).then_some(shop)
    }
}

/// App credentials used to verify session tokens.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// The app's API key; expected as the token audience.
    pub api_key: String,
    /// The app's API secret; the HMAC-SHA256 signing key.
    pub api_secret: String,
}

impl SessionConfig {
    /// Load app credentials from environment variables.
    ///
    /// | Env Var              | Required |
    /// |----------------------|----------|
    /// | `SHOPIFY_API_KEY`    | **yes**  |
    /// | `SHOPIFY_API_SECRET` | **yes**  |
    ///
    /// # Panics
    ///
    /// Panics if either variable is missing or empty.
    pub fn from_env() -> Self {
        let api_key =
            std::env::var("SHOPIFY_API_KEY").expect("SHOPIFY_API_KEY must be set in the environment");
        assert!(!api_key.is_empty(), "SHOPIFY_API_KEY must not be empty");

        let api_secret = std::env::var("SHOPIFY_API_SECRET")
            .expect("SHOPIFY_API_SECRET must be set in the environment");
        assert!(!api_secret.is_empty(), "SHOPIFY_API_SECRET must not be empty");

        Self {
            api_key,
            api_secret,
        }
    }
}

/// Validate a session token's signature, audience, `exp` and `nbf`.
pub fn validate_session_token(
    token: &str,
    config: &SessionConfig,
) -> Result<SessionClaims, jsonwebtoken::errors::Error> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.set_audience(&[config.api_key.as_str()]);
    validation.validate_nbf = true;

    let token_data = decode::<SessionClaims>(
        token,
        &DecodingKey::from_secret(config.api_secret.as_bytes()),
        &validation,
    )?;
    Ok(token_data.claims)
}

/// Sign a session token for `shop` valid for `ttl_secs`.
///
/// The admin host normally issues these; the server uses this for local
/// tooling and tests.
pub fn issue_session_token(
    shop: &str,
    config: &SessionConfig,
    ttl_secs: i64,
) -> Result<String, jsonwebtoken::errors::Error> {
    let now = chrono::Utc::now().timestamp();
    let claims = SessionClaims {
        iss: format!("https://{shop}/admin"),
        dest: format!("https://{shop}"),
        aud: config.api_key.clone(),
        sub: None,
        exp: now + ttl_secs,
        nbf: now,
        iat: now,
        jti: Uuid::new_v4().to_string(),
    };

    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(config.api_secret.as_bytes()),
    )
}
