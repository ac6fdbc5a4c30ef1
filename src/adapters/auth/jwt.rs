//! HS256 JWT adapter.
//!
//! Implements `TokenIssuer` and `SessionValidator` with two shared secrets:
//! access tokens are signed with the access secret and refresh tokens with the
//! refresh secret. The `typ` claim additionally stops one kind of token from
//! being accepted as the other.

use async_trait::async_trait;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use crate::domain::foundation::{AuthError, AuthenticatedUser, Role, Timestamp, UserId};
use crate::ports::{SessionValidator, TokenIssuer, TokenPair};

/// Settings for [`JwtTokenService`].
#[derive(Debug, Clone)]
pub struct JwtConfig {
    pub access_secret: SecretString,
    pub refresh_secret: SecretString,
    pub access_ttl_secs: u64,
    pub refresh_ttl_secs: u64,
    pub issuer: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
enum TokenType {
    Access,
    Refresh,
}

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    sub: String,
    email: String,
    role: Role,
    typ: TokenType,
    iss: String,
    iat: i64,
    exp: i64,
}

pub struct JwtTokenService {
    config: JwtConfig,
    access_encoding: EncodingKey,
    access_decoding: DecodingKey,
    refresh_encoding: EncodingKey,
    refresh_decoding: DecodingKey,
}

impl JwtTokenService {
    pub fn new(config: JwtConfig) -> Self {
        let access = config.access_secret.expose_secret().as_bytes();
        let refresh = config.refresh_secret.expose_secret().as_bytes();
        Self {
            access_encoding: EncodingKey::from_secret(access),
            access_decoding: DecodingKey::from_secret(access),
            refresh_encoding: EncodingKey::from_secret(refresh),
            refresh_decoding: DecodingKey::from_secret(refresh),
            config,
        }
    }

    fn sign(
        &self,
        user: &AuthenticatedUser,
        typ: TokenType,
        ttl_secs: u64,
    ) -> Result<String, AuthError> {
        let iat = Timestamp::now().as_unix_secs();
        let claims = Claims {
            sub: user.id.to_string(),
            email: user.email.clone(),
            role: user.role,
            typ,
            iss: self.config.issuer.clone(),
            iat,
            exp: iat.saturating_add(i64::try_from(ttl_secs).unwrap_or(i64::MAX)),
        };
        let key = match typ {
            TokenType::Access => &self.access_encoding,
            TokenType::Refresh => &self.refresh_encoding,
        };
        encode(&Header::new(Algorithm::HS256), &claims, key).map_err(|e| {
            tracing::error!("Failed to sign token: {}", e);
            AuthError::service_unavailable("token signing failed")
        })
    }

    fn verify(&self, token: &str, expected: TokenType) -> Result<Claims, AuthError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[&self.config.issuer]);
        validation.set_required_spec_claims(&["exp", "iss", "sub"]);

        let key = match expected {
            TokenType::Access => &self.access_decoding,
            TokenType::Refresh => &self.refresh_decoding,
        };

        let claims = decode::<Claims>(token, key, &validation)
            .map_err(|e| {
                use jsonwebtoken::errors::ErrorKind;
                match e.kind() {
                    ErrorKind::ExpiredSignature => {
                        tracing::debug!("Token expired");
                        AuthError::TokenExpired
                    }
                    _ => {
                        tracing::debug!("Token validation failed: {}", e);
                        AuthError::InvalidToken
                    }
                }
            })?
            .claims;

        if claims.typ != expected {
            tracing::warn!("Token type mismatch: expected {:?}, got {:?}", expected, claims.typ);
            return Err(AuthError::InvalidToken);
        }
        Ok(claims)
    }
}

impl TokenIssuer for JwtTokenService {
    fn issue(&self, user: &AuthenticatedUser) -> Result<TokenPair, AuthError> {
        Ok(TokenPair {
            access_token: self.sign(user, TokenType::Access, self.config.access_ttl_secs)?,
            refresh_token: self.sign(user, TokenType::Refresh, self.config.refresh_ttl_secs)?,
            expires_in: self.config.access_ttl_secs,
        })
    }

    fn verify_refresh(&self, token: &str) -> Result<UserId, AuthError> {
        let claims = self.verify(token, TokenType::Refresh)?;
        claims.sub.parse().map_err(|_| AuthError::InvalidToken)
    }
}

#[async_trait]
impl SessionValidator for JwtTokenService {
    async fn validate(&self, token: &str) -> Result<AuthenticatedUser, AuthError> {
        let claims = self.verify(token, TokenType::Access)?;
        let id: UserId = claims.sub.parse().map_err(|_| {
            tracing::warn!("Invalid user ID in token: {}", claims.sub);
            AuthError::InvalidToken
        })?;
        Ok(AuthenticatedUser::new(id, claims.email, claims.role))
    }
}

impl std::fmt::Debug for JwtTokenService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtTokenService")
            .field("issuer", &self.config.issuer)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> JwtTokenService {
        JwtTokenService::new(JwtConfig {
            access_secret: SecretString::new("access-secret-access-secret-0123".to_string()),
            refresh_secret: SecretString::new("refresh-secret-refresh-secret-01".to_string()),
            access_ttl_secs: 3600,
            refresh_ttl_secs: 604_800,
            issuer: "dolphin-streak".to_string(),
        })
    }

    fn user() -> AuthenticatedUser {
        AuthenticatedUser::new(UserId::new(), "ana@example.com", Role::Admin)
    }

    #[tokio::test]
    async fn access_token_round_trips_identity() {
        let service = service();
        let user = user();
        let pair = service.issue(&user).unwrap();

        let validated = service.validate(&pair.access_token).await.unwrap();
        assert_eq!(validated, user);
        assert_eq!(pair.expires_in, 3600);
    }

    #[test]
    fn refresh_token_yields_user_id() {
        let service = service();
        let user = user();
        let pair = service.issue(&user).unwrap();

        assert_eq!(service.verify_refresh(&pair.refresh_token).unwrap(), user.id);
    }

    #[tokio::test]
    async fn tokens_are_not_interchangeable() {
        let service = service();
        let pair = service.issue(&user()).unwrap();

        assert!(matches!(
            service.validate(&pair.refresh_token).await,
            Err(AuthError::InvalidToken)
        ));
        assert!(matches!(
            service.verify_refresh(&pair.access_token),
            Err(AuthError::InvalidToken)
        ));
    }

    #[tokio::test]
    async fn expired_token_is_reported_as_expired() {
        let service = service();
        let token = encode(
            &Header::new(Algorithm::HS256),
            &Claims {
                sub: UserId::new().to_string(),
                email: "ana@example.com".to_string(),
                role: Role::User,
                typ: TokenType::Access,
                iss: "dolphin-streak".to_string(),
                iat: Timestamp::now().as_unix_secs() - 7200,
                exp: Timestamp::now().as_unix_secs() - 3600,
            },
            &service.access_encoding,
        )
        .unwrap();

        assert!(matches!(service.validate(&token).await, Err(AuthError::TokenExpired)));
    }

    #[tokio::test]
    async fn foreign_issuer_is_rejected() {
        let other = JwtTokenService::new(JwtConfig {
            issuer: "someone-else".to_string(),
            ..service().config.clone()
        });
        let pair = other.issue(&user()).unwrap();

        assert!(service().validate(&pair.access_token).await.is_err());
    }

    #[tokio::test]
    async fn garbage_is_invalid() {
        assert!(matches!(
            service().validate("not-a-jwt").await,
            Err(AuthError::InvalidToken)
        ));
    }
}
