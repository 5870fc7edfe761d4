// Authentication configuration loaded from environment variables.
// Decision: AUTH_ prefix for all auth config
// Decision: Single stateless access token; no refresh tokens and no
// server-side revocation, so validity is signature + expiry only.

use std::time::Duration;

/// JWT configuration
#[derive(Debug, Clone)]
pub struct JwtConfig {
    /// Secret key for signing tokens
    pub secret: String,
    /// Access token lifetime
    pub access_token_lifetime: Duration,
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            secret: String::new(),
            access_token_lifetime: Duration::from_secs(7 * 24 * 60 * 60), // 7 days
        }
    }
}

/// Complete authentication configuration
#[derive(Debug, Clone, Default)]
pub struct AuthConfig {
    /// JWT configuration
    pub jwt: JwtConfig,
    /// Whether to disable signup (registration)
    pub disable_signup: bool,
}

impl AuthConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        let secret = std::env::var("AUTH_JWT_SECRET").unwrap_or_else(|_| {
            // Ephemeral secret for dev mode; tokens do not survive a restart
            tracing::warn!("AUTH_JWT_SECRET not set, generating an ephemeral secret");
            use rand::Rng;
            let bytes: [u8; 32] = rand::thread_rng().gen();
            hex::encode(bytes)
        });

        let access_token_lifetime = std::env::var("AUTH_TOKEN_LIFETIME")
            .ok()
            .and_then(|s| s.parse().ok())
            .map(Duration::from_secs)
            .unwrap_or_else(|| JwtConfig::default().access_token_lifetime);

        let disable_signup = std::env::var("AUTH_DISABLE_SIGNUP")
            .map(|s| s.to_lowercase() == "true" || s == "1")
            .unwrap_or(false);

        Self {
            jwt: JwtConfig {
                secret,
                access_token_lifetime,
            },
            disable_signup,
        }
    }

    /// Check if registration is open
    pub fn signup_enabled(&self) -> bool {
        !self.disable_signup
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_lifetime_is_a_week() {
        let config = JwtConfig::default();
        assert_eq!(
            config.access_token_lifetime,
            Duration::from_secs(7 * 24 * 60 * 60)
        );
    }

    #[test]
    fn signup_enabled_by_default() {
        let config = AuthConfig::default();
        assert!(config.signup_enabled());

        let closed = AuthConfig {
            disable_signup: true,
            ..Default::default()
        };
        assert!(!closed.signup_enabled());
    }
}
