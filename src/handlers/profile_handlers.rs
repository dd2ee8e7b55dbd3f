use actix_session::Session;
use actix_web::{web, HttpResponse};

use crate::api::{self, ApiClient, ApiError};
use crate::auth::session::SessionState;
use crate::errors::{AppError, render};
use crate::templates_structs::{PageContext, ProfileTemplate};

/// GET /profile
/// Refreshes the stored profile from the backend; a failed refresh shows the
/// cached copy with an inline error.
pub async fn show(
    api_client: web::Data<ApiClient>,
    session: Session,
) -> Result<HttpResponse, AppError> {
    let mut state = SessionState::require(&session)?;

    let error = match api::auth::profile(&api_client, &state.token).await {
        Ok(user) => {
            state.update_user(&session, user)?;
            None
        }
        Err(ApiError::Unauthorized) => return Err(AppError::Unauthorized),
        Err(e) => {
            log::warn!("Profile refresh failed: {e}");
            Some(e.user_message("Failed to load profile"))
        }
    };

    let ctx = PageContext::build(&session, &state, "/profile");
    render(ProfileTemplate { ctx, user: state.user, error })
}
