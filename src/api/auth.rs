//! Login and logout.

use crate::errors::AppError;
use crate::http::Auth;
use crate::models::{LoginRequest, LoginResponse, User};
use crate::session::Session;
use crate::AdminClient;

/// POST /user/login — authenticate and persist the session.
pub async fn login(client: &AdminClient, email: &str, password: &str) -> Result<User, AppError> {
    let request = LoginRequest {
        email: email.to_string(),
        password: password.to_string(),
    };

    let response: LoginResponse = client
        .http
        .post_json("/user/login", &request, Auth::None)
        .await?;

    client.session.set(Session {
        token: response.token,
        user: response.user.clone(),
    })?;

    tracing::info!("Logged in as {}", response.user.email);
    Ok(response.user)
}

/// End the session and forget the persisted token.
pub fn logout(client: &AdminClient) -> Result<(), AppError> {
    client.session.clear()
}
