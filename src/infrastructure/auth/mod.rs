//! Login through the configured authenticator

use tracing::{info, warn};

use crate::domain::auth::Authenticator;
use crate::domain::token::TokenInfo;
use crate::domain::{DomainError, ForbiddenReason};

/// Check credentials and issue a token for the user
pub async fn login<A>(auth: &A, email: &str, password: &str) -> Result<TokenInfo, DomainError>
where
    A: Authenticator + ?Sized,
{
    let Some(user) = auth.authenticate(email, password).await else {
        return Err(DomainError::forbidden(ForbiddenReason::AuthenticationFailed));
    };

    match auth.create_user_token(&user).await {
        Ok(token) => {
            info!(email = %user.email(), token_type = %token.token_type, "User logged in");
            Ok(token)
        }
        Err(e) => {
            warn!(email = %user.email(), error = %e, "Failed to create user token");
            Err(e)
        }
    }
}
