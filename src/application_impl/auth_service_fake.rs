use crate::application_port::{AuthError, AuthService};
use crate::domain_model::UserId;

/// Treats the bearer token as the caller's user id. Development only.
#[derive(Debug, Default)]
pub struct FakeAuthService;

impl FakeAuthService {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait::async_trait]
impl AuthService for FakeAuthService {
    async fn verify_token(&self, token: &str) -> Result<UserId, AuthError> {
        token.parse::<UserId>().map_err(|_| AuthError::TokenInvalid)
    }
}
