use actix_session::SessionExt;
use actix_web::{
    Error, HttpResponse,
    body::MessageBody,
    dev::{ServiceRequest, ServiceResponse},
    http::StatusCode,
    middleware::Next,
};

use crate::auth::session::SessionState;

/// Route guard for everything behind the login.
///
/// Redirects to /login when no session is present. After the handler runs,
/// a 401 (the backend rejected our token) purges the session and redirects
/// to /login as well, so page handlers never deal with expired tokens.
pub async fn require_auth(
    req: ServiceRequest,
    next: Next<impl MessageBody + 'static>,
) -> Result<ServiceResponse<impl MessageBody>, Error> {
    let session = req.get_session();

    if SessionState::hydrate(&session).is_none() {
        let response = HttpResponse::SeeOther()
            .insert_header(("Location", "/login"))
            .finish();
        return Ok(req.into_response(response).map_into_right_body());
    }

    let res = next.call(req).await?;

    if res.status() == StatusCode::UNAUTHORIZED {
        log::warn!("Backend rejected session token on {}, signing out", res.request().path());
        SessionState::teardown(&res.request().get_session());
        let response = HttpResponse::SeeOther()
            .insert_header(("Location", "/login"))
            .finish();
        return Ok(res.into_response(response).map_into_right_body());
    }

    Ok(res.map_into_left_body())
}
