use super::types::{LoginRequest, LoginResponse, ProfileResponse, UserProfile};
use super::{ApiClient, ApiError};

/// POST /auth/login. A 401 here means bad credentials, not an expired session.
pub async fn login(api: &ApiClient, email: &str, password: &str) -> Result<LoginResponse, ApiError> {
    let body = LoginRequest { email: email.trim(), password };
    match api.post_json("/auth/login", None, Some(&body)).await {
        Err(ApiError::Unauthorized) => Err(ApiError::Rejected {
            status: 401,
            message: Some("Invalid credentials".to_string()),
        }),
        other => other,
    }
}

/// GET /auth/profile
pub async fn profile(api: &ApiClient, token: &str) -> Result<UserProfile, ApiError> {
    let response: ProfileResponse = api.get_json("/auth/profile", Some(token)).await?;
    Ok(response.into_user())
}
