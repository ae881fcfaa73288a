use crate::domain_model::UserId;

#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("token invalid")]
    TokenInvalid,
    #[error("token expired")]
    TokenExpired,
    #[error("internal error: {0}")]
    InternalError(String),
}

/// Resolves a bearer token issued by the hosted auth provider.
#[async_trait::async_trait]
pub trait AuthService: Send + Sync {
    async fn verify_token(&self, token: &str) -> Result<UserId, AuthError>;
}
