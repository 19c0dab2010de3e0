//! Main token service implementation

use chrono::Utc;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};

use crate::domain::entities::identity::Identity;
use crate::domain::entities::token::Claims;
use crate::errors::{DomainError, DomainResult, TokenError};

use super::config::TokenServiceConfig;

/// Issues and verifies signed session tokens
pub struct TokenService {
    config: TokenServiceConfig,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl TokenService {
    /// Creates a new token service instance
    ///
    /// # Arguments
    ///
    /// * `config` - Token service configuration
    ///
    /// # Returns
    ///
    /// A new `TokenService`, or a configuration error when the secret is
    /// empty or the lifetime is not positive
    pub fn new(config: TokenServiceConfig) -> DomainResult<Self> {
        if config.jwt_secret.trim().is_empty() {
            return Err(DomainError::Configuration {
                message: "JWT secret must not be empty".to_string(),
            });
        }
        if config.token_expiry_seconds <= 0 {
            return Err(DomainError::Configuration {
                message: format!(
                    "token lifetime must be positive, got {}s",
                    config.token_expiry_seconds
                ),
            });
        }

        let encoding_key = EncodingKey::from_secret(config.jwt_secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.jwt_secret.as_bytes());

        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[config.issuer.as_str()]);
        validation.set_required_spec_claims(&["exp", "iss", "sub"]);
        validation.validate_exp = true;
        // Expired means now > exp, with no grace period
        validation.leeway = 0;

        Ok(Self {
            config,
            encoding_key,
            decoding_key,
            validation,
        })
    }

    /// Token lifetime in seconds
    pub fn expiry_seconds(&self) -> i64 {
        self.config.token_expiry_seconds
    }

    /// Issues a token for an account: `exp = iat + expiry`
    pub fn issue(&self, identity: &Identity) -> DomainResult<String> {
        let claims = Claims::new(
            identity.id,
            identity.role,
            Utc::now().timestamp(),
            self.config.token_expiry_seconds,
            &self.config.issuer,
        )
        .ok_or_else(|| {
            tracing::error!(
                ttl = self.config.token_expiry_seconds,
                "Token expiry overflows the timestamp range"
            );
            DomainError::from(TokenError::GenerationFailed)
        })?;
        self.encode_claims(&claims)
    }

    pub(crate) fn encode_claims(&self, claims: &Claims) -> DomainResult<String> {
        encode(&Header::new(Algorithm::HS256), claims, &self.encoding_key).map_err(|e| {
            tracing::error!(error = %e, "Failed to sign token");
            DomainError::from(TokenError::GenerationFailed)
        })
    }

    /// Verifies signature, expiry and issuer, returning the claims
    ///
    /// # Returns
    ///
    /// * `Ok(Claims)` - Token is valid
    /// * `Err(TokenError::InvalidSignature)` - Signed with another secret
    /// * `Err(TokenError::Expired)` - Past its `exp`
    /// * `Err(TokenError::Malformed)` - Undecodable, unknown role or wrong issuer
    pub fn verify(&self, token: &str) -> DomainResult<Claims> {
        decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| {
                let error = match e.kind() {
                    ErrorKind::ExpiredSignature => TokenError::Expired,
                    ErrorKind::InvalidSignature => TokenError::InvalidSignature,
                    _ => TokenError::Malformed,
                };
                DomainError::from(error)
            })
    }
}
