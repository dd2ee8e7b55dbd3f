use actix_session::Session;
use actix_web::{HttpRequest, HttpResponse};
use chrono::{Local, Timelike};

use crate::auth::role::Role;
use crate::auth::session::{SessionState, require_role};
use crate::errors::{AppError, render};
use crate::templates_structs::{DashboardTemplate, PageContext};

fn time_greeting(name: &str) -> String {
    let hour = Local::now().hour();
    let period = match hour {
        5..=11 => "Good morning",
        12..=16 => "Good afternoon",
        _ => "Good evening",
    };
    format!("{}, {}", period, name)
}

/// GET /dashboard — forwards to the signed-in role's landing page.
pub async fn index(session: Session) -> Result<HttpResponse, AppError> {
    let state = SessionState::require(&session)?;
    Ok(HttpResponse::SeeOther()
        .insert_header(("Location", state.role().dashboard_path()))
        .finish())
}

/// GET /farmer/dashboard, /warehouse/dashboard, /admin/dashboard
pub async fn role_dashboard(req: HttpRequest, session: Session) -> Result<HttpResponse, AppError> {
    let state = SessionState::require(&session)?;
    let owner = match req.path() {
        "/farmer/dashboard" => Role::Farmer,
        "/warehouse/dashboard" => Role::WarehouseAdmin,
        "/admin/dashboard" => Role::SystemAdmin,
        _ => return Err(AppError::NotFound),
    };
    require_role(&state, &[owner])?;

    let ctx = PageContext::build(&session, &state, req.path());
    let greeting = time_greeting(&state.user.first_name_or_display());
    render(DashboardTemplate { ctx, greeting })
}
