use actix_session::Session;
use actix_web::{web, HttpRequest, HttpResponse};
use serde::Deserialize;

use crate::api::{self, ApiClient};
use crate::auth::{csrf, rate_limit::LoginLimiter, validate};
use crate::auth::session::SessionState;
use crate::errors::{AppError, render};
use crate::templates_structs::{APP_NAME, LoginTemplate};

#[derive(Deserialize)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
    pub csrf_token: String,
}

#[derive(Deserialize)]
pub struct CsrfOnly {
    pub csrf_token: String,
}

fn login_form(session: &Session, email: &str, error: Option<String>) -> Result<HttpResponse, AppError> {
    let tmpl = LoginTemplate {
        error,
        email: email.to_string(),
        app_name: APP_NAME,
        csrf_token: csrf::get_or_create_token(session),
    };
    render(tmpl)
}

/// GET /login — guests only; signed-in users go to their dashboard.
pub async fn login_page(session: Session) -> Result<HttpResponse, AppError> {
    if let Some(state) = SessionState::hydrate(&session) {
        return Ok(HttpResponse::SeeOther()
            .insert_header(("Location", state.role().dashboard_path()))
            .finish());
    }
    login_form(&session, "", None)
}

pub async fn login_submit(
    req: HttpRequest,
    api_client: web::Data<ApiClient>,
    session: Session,
    form: web::Form<LoginForm>,
    limiter: web::Data<LoginLimiter>,
) -> Result<HttpResponse, AppError> {
    csrf::validate_csrf(&session, &form.csrf_token)?;

    let ip = req.peer_addr()
        .map(|addr| addr.ip())
        .unwrap_or_else(|| std::net::IpAddr::V4(std::net::Ipv4Addr::UNSPECIFIED));

    if limiter.is_blocked(ip) {
        return login_form(
            &session,
            &form.email,
            Some("Too many failed login attempts. Please try again later.".to_string()),
        );
    }

    if let Some(err) = validate::validate_email(&form.email)
        .or_else(|| validate::validate_password_present(&form.password))
    {
        return login_form(&session, &form.email, Some(err));
    }

    match api::auth::login(&api_client, &form.email, &form.password).await {
        Ok(response) => {
            limiter.clear(ip);
            let state = SessionState { token: response.token, user: response.user };
            state.persist(&session)?;
            log::info!("User {} signed in as {}", state.user_id(), state.role().label());
            Ok(HttpResponse::SeeOther()
                .insert_header(("Location", state.role().dashboard_path()))
                .finish())
        }
        Err(e) => {
            if matches!(e, api::ApiError::Rejected { status: 400..=499, .. }) {
                limiter.record_failure(ip);
            }
            log::warn!("Login failed: {e}");
            login_form(&session, &form.email, Some(e.user_message("Login failed")))
        }
    }
}

pub async fn logout(
    session: Session,
    form: web::Form<CsrfOnly>,
) -> Result<HttpResponse, AppError> {
    csrf::validate_csrf(&session, &form.csrf_token)?;
    SessionState::teardown(&session);
    Ok(HttpResponse::SeeOther()
        .insert_header(("Location", "/login"))
        .finish())
}
