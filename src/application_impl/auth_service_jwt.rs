use crate::application_port::{AuthError, AuthService};
use crate::domain_model::UserId;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};
use serde::Deserialize;

#[derive(Debug, Clone)]
pub struct JwtConfig {
    pub audience: String,
    pub signing_key: Vec<u8>,
}

/// Claims of an access token minted by the hosted auth provider.
#[derive(Debug, Deserialize)]
struct AccessClaims {
    sub: String, // user id as string
}

pub struct JwtAuthService {
    cfg: JwtConfig,
}

impl JwtAuthService {
    pub fn new(cfg: JwtConfig) -> Self {
        Self { cfg }
    }

    fn decode_access(&self, token: &str) -> Result<AccessClaims, AuthError> {
        let mut v = Validation::new(Algorithm::HS256);
        v.validate_exp = true;
        v.set_audience(&[self.cfg.audience.clone()]);
        let data = decode::<AccessClaims>(
            token,
            &DecodingKey::from_secret(&self.cfg.signing_key),
            &v,
        )
        .map_err(|e| match e.kind() {
            ErrorKind::ExpiredSignature => AuthError::TokenExpired,
            _ => AuthError::TokenInvalid,
        })?;
        Ok(data.claims)
    }
}

#[async_trait::async_trait]
impl AuthService for JwtAuthService {
    async fn verify_token(&self, token: &str) -> Result<UserId, AuthError> {
        let claims = self.decode_access(token)?;
        claims
            .sub
            .parse::<UserId>()
            .map_err(|_| AuthError::TokenInvalid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};
    use jsonwebtoken::{EncodingKey, Header, encode};
    use serde::Serialize;

    #[derive(Serialize)]
    struct Claims<'a> {
        sub: &'a str,
        aud: &'a str,
        exp: i64,
    }

    const KEY: &[u8] = b"test-secret";

    fn service() -> JwtAuthService {
        JwtAuthService::new(JwtConfig {
            audience: "authenticated".to_string(),
            signing_key: KEY.to_vec(),
        })
    }

    fn token(sub: &str, aud: &str, exp_offset: Duration, key: &[u8]) -> String {
        let claims = Claims {
            sub,
            aud,
            exp: (Utc::now() + exp_offset).timestamp(),
        };
        encode(&Header::default(), &claims, &EncodingKey::from_secret(key)).unwrap()
    }

    const SUB: &str = "67e55044-10b1-426f-9247-bb680e5fe0c8";

    #[tokio::test]
    async fn accepts_provider_token() {
        let t = token(SUB, "authenticated", Duration::hours(1), KEY);
        let user = service().verify_token(&t).await.unwrap();
        assert_eq!(user.to_string(), SUB);
    }

    #[tokio::test]
    async fn rejects_expired_token() {
        let t = token(SUB, "authenticated", Duration::hours(-2), KEY);
        assert!(matches!(
            service().verify_token(&t).await,
            Err(AuthError::TokenExpired)
        ));
    }

    #[tokio::test]
    async fn rejects_foreign_audience_key_or_subject() {
        let wrong_aud = token(SUB, "anon", Duration::hours(1), KEY);
        let wrong_key = token(SUB, "authenticated", Duration::hours(1), b"other");
        let wrong_sub = token("not-a-uuid", "authenticated", Duration::hours(1), KEY);
        for t in [wrong_aud, wrong_key, wrong_sub] {
            assert!(matches!(
                service().verify_token(&t).await,
                Err(AuthError::TokenInvalid)
            ));
        }
    }
}
