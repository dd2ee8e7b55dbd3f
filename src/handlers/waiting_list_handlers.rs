use std::collections::HashMap;

use actix_session::Session;
use actix_web::{web, HttpResponse};
use chrono::Utc;
use serde::Deserialize;

use crate::api::{self, ApiClient, ApiError};
use crate::api::types::{GrainType, JoinWaitingListRequest};
use crate::auth::{csrf, validate};
use crate::auth::role::Role;
use crate::auth::session::{FlashKind, SessionState, require_role, set_flash};
use crate::errors::{AppError, render};
use crate::templates_structs::{
    DeclinePromptTemplate, GrainOption, JoinWaitingListTemplate, PageContext, WaitingListTemplate,
};
use crate::waiting_list::{EntryView, PendingActions, WaitingListView, view};

const LIST_PATH: &str = "/farmer/waiting-lists";
const SEEN_STATUSES_KEY: &str = "waiting_list_statuses";
/// The cookie store holds about 4 KB, shared with the token and profile.
const MAX_REMEMBERED_STATUSES: usize = 32;

pub const CONFIRMED_NOTICE: &str =
    "Time slot confirmed successfully! You can view your appointment in My Appointments.";
pub const DECLINED_NOTICE: &str =
    "Time slot declined. Your position has been removed from the waiting list.";
pub const JOINED_NOTICE: &str =
    "Successfully joined the waiting list! We will notify you when a slot becomes available.";
pub const BUSY_NOTICE: &str = "This entry is already being processed. Please wait.";
pub const SUSPENDED_NOTICE: &str =
    "Your account is suspended. Please contact the warehouse administrator.";

// ---------------------------------------------------------------------------
// Form Structures
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct ConfirmForm {
    pub csrf_token: String,
}

#[derive(Debug, Deserialize)]
pub struct DeclineForm {
    pub csrf_token: String,
    /// "yes" only when the farmer accepted the prompt.
    #[serde(default)]
    pub confirmed: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct JoinQuery {
    #[serde(default)]
    pub warehouse_zone_id: Option<String>,
    #[serde(default)]
    pub time_slot_id: Option<String>,
    #[serde(default)]
    pub grain_type: Option<String>,
    #[serde(default)]
    pub requested_quantity: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct JoinForm {
    pub csrf_token: String,
    pub warehouse_zone_id: String,
    pub time_slot_id: String,
    pub grain_type: String,
    pub requested_quantity: String,
}

fn farmer_session(session: &Session) -> Result<SessionState, AppError> {
    let state = SessionState::require(session)?;
    require_role(&state, &[Role::Farmer])?;
    Ok(state)
}

fn back_to_list() -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header(("Location", LIST_PATH))
        .finish()
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /farmer/waiting-lists
/// Fetches the farmer's entries on every visit. A failed fetch renders the
/// error and no entries; reloading the page is the retry.
pub async fn list(
    api_client: web::Data<ApiClient>,
    pending: web::Data<PendingActions>,
    session: Session,
) -> Result<HttpResponse, AppError> {
    let state = farmer_session(&session)?;

    let view = match api::waiting_list::my_list(&api_client, &state.token).await {
        Ok(entries) => {
            note_regressions(&session, state.user_id(), &entries);
            WaitingListView::loaded(&entries, Utc::now(), &pending, state.user_id())
        }
        Err(ApiError::Unauthorized) => return Err(AppError::Unauthorized),
        Err(e) => {
            log::warn!("Waiting list fetch failed for user {}: {e}", state.user_id());
            WaitingListView::failed(e.user_message("Failed to fetch waiting lists"))
        }
    };

    let ctx = PageContext::build(&session, &state, LIST_PATH);
    render(WaitingListTemplate { ctx, view })
}

/// Statuses only move forward; a backwards step means the backend and our
/// last view disagree. Logged, never corrected.
fn note_regressions(session: &Session, user_id: i64, entries: &[api::types::WaitingListEntry]) {
    let previous = session
        .get::<HashMap<i64, String>>(SEEN_STATUSES_KEY)
        .unwrap_or(None)
        .unwrap_or_default();
    for id in view::regressions(&previous, entries) {
        log::warn!("Waiting list entry {id} of user {user_id} moved backwards in status");
    }

    let seen = view::statuses_to_remember(entries, MAX_REMEMBERED_STATUSES);
    if seen.is_empty() {
        session.remove(SEEN_STATUSES_KEY);
        return;
    }
    if let Err(e) = session.insert(SEEN_STATUSES_KEY, seen) {
        log::warn!("Failed to remember waiting list statuses for user {user_id}: {e}");
    }
}

/// POST /farmer/waiting-lists/{id}/confirm
pub async fn confirm(
    api_client: web::Data<ApiClient>,
    pending: web::Data<PendingActions>,
    session: Session,
    path: web::Path<i64>,
    form: web::Form<ConfirmForm>,
) -> Result<HttpResponse, AppError> {
    let state = farmer_session(&session)?;
    csrf::validate_csrf(&session, &form.csrf_token)?;
    let entry_id = path.into_inner();

    let Some(_guard) = pending.try_begin(state.user_id(), entry_id) else {
        set_flash(&session, FlashKind::Info, BUSY_NOTICE);
        return Ok(back_to_list());
    };

    match api::waiting_list::confirm(&api_client, &state.token, entry_id).await {
        Ok(()) => {
            log::info!("User {} confirmed waiting list entry {entry_id}", state.user_id());
            set_flash(&session, FlashKind::Success, CONFIRMED_NOTICE);
        }
        Err(ApiError::Unauthorized) => return Err(AppError::Unauthorized),
        Err(e) => {
            log::warn!("Confirm of entry {entry_id} failed: {e}");
            set_flash(&session, FlashKind::Error, e.user_message("Failed to confirm slot"));
        }
    }
    Ok(back_to_list())
}

/// GET /farmer/waiting-lists/{id}/decline
/// Asks before declining; the farmer loses their queue position.
pub async fn decline_prompt(
    api_client: web::Data<ApiClient>,
    pending: web::Data<PendingActions>,
    session: Session,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let state = farmer_session(&session)?;
    let entry_id = path.into_inner();

    let entries = match api::waiting_list::my_list(&api_client, &state.token).await {
        Ok(entries) => entries,
        Err(ApiError::Unauthorized) => return Err(AppError::Unauthorized),
        Err(e) => {
            set_flash(&session, FlashKind::Error, e.user_message("Failed to fetch waiting lists"));
            return Ok(back_to_list());
        }
    };

    let entry = entries
        .iter()
        .find(|e| e.id == entry_id)
        .map(|e| EntryView::build(e, Utc::now(), pending.is_pending(state.user_id(), e.id)))
        .ok_or(AppError::NotFound)?;

    if !entry.controls_enabled {
        return Ok(back_to_list());
    }

    let ctx = PageContext::build(&session, &state, LIST_PATH);
    render(DeclinePromptTemplate { ctx, entry })
}

/// POST /farmer/waiting-lists/{id}/decline
/// Sends nothing unless the prompt was accepted.
pub async fn decline(
    api_client: web::Data<ApiClient>,
    pending: web::Data<PendingActions>,
    session: Session,
    path: web::Path<i64>,
    form: web::Form<DeclineForm>,
) -> Result<HttpResponse, AppError> {
    let state = farmer_session(&session)?;
    csrf::validate_csrf(&session, &form.csrf_token)?;
    let entry_id = path.into_inner();

    if form.confirmed.as_deref() != Some("yes") {
        return Ok(back_to_list());
    }

    let Some(_guard) = pending.try_begin(state.user_id(), entry_id) else {
        set_flash(&session, FlashKind::Info, BUSY_NOTICE);
        return Ok(back_to_list());
    };

    match api::waiting_list::decline(&api_client, &state.token, entry_id).await {
        Ok(()) => {
            log::info!("User {} declined waiting list entry {entry_id}", state.user_id());
            set_flash(&session, FlashKind::Success, DECLINED_NOTICE);
        }
        Err(ApiError::Unauthorized) => return Err(AppError::Unauthorized),
        Err(e) => {
            log::warn!("Decline of entry {entry_id} failed: {e}");
            set_flash(&session, FlashKind::Error, e.user_message("Failed to decline slot"));
        }
    }
    Ok(back_to_list())
}

fn grain_options(selected: &str) -> Vec<GrainOption> {
    GrainType::ALL
        .iter()
        .map(|g| GrainOption {
            code: g.code(),
            label: g.label(),
            selected: g.code() == selected,
        })
        .collect()
}

fn join_form_page(
    session: &Session,
    state: &SessionState,
    zone: &str,
    slot: &str,
    grain: &str,
    quantity: &str,
    errors: Vec<String>,
) -> Result<HttpResponse, AppError> {
    let ctx = PageContext::build(session, state, "/farmer/waiting-lists/join");
    render(JoinWaitingListTemplate {
        ctx,
        warehouse_zone_id: zone.to_string(),
        time_slot_id: slot.to_string(),
        requested_quantity: quantity.to_string(),
        grains: grain_options(grain),
        errors,
    })
}

/// GET /farmer/waiting-lists/join — offered when the chosen slot is full.
pub async fn join_form(
    session: Session,
    query: web::Query<JoinQuery>,
) -> Result<HttpResponse, AppError> {
    let state = farmer_session(&session)?;
    let q = query.into_inner();
    join_form_page(
        &session,
        &state,
        q.warehouse_zone_id.as_deref().unwrap_or(""),
        q.time_slot_id.as_deref().unwrap_or(""),
        q.grain_type.as_deref().unwrap_or(""),
        q.requested_quantity.as_deref().unwrap_or(""),
        Vec::new(),
    )
}

/// Check the join form; every problem is reported at once.
pub fn validate_join(form: &JoinForm) -> Result<JoinWaitingListRequest, Vec<String>> {
    let mut errors = Vec::new();

    let zone = validate::validate_id(&form.warehouse_zone_id, "Warehouse zone")
        .map_err(|e| errors.push(e))
        .ok();
    let slot = validate::validate_id(&form.time_slot_id, "Time slot")
        .map_err(|e| errors.push(e))
        .ok();
    let grain = GrainType::from_code(&form.grain_type);
    if grain.is_none() {
        errors.push("Please select a grain type".to_string());
    }
    let quantity = validate::validate_quantity(&form.requested_quantity)
        .map_err(|e| errors.push(e))
        .ok();

    match (zone, slot, grain, quantity) {
        (Some(warehouse_zone_id), Some(time_slot_id), Some(grain_type), Some(requested_quantity))
            if errors.is_empty() =>
        {
            Ok(JoinWaitingListRequest { warehouse_zone_id, time_slot_id, grain_type, requested_quantity })
        }
        _ => Err(errors),
    }
}

/// POST /farmer/waiting-lists/join
pub async fn join(
    api_client: web::Data<ApiClient>,
    session: Session,
    form: web::Form<JoinForm>,
) -> Result<HttpResponse, AppError> {
    let state = farmer_session(&session)?;
    csrf::validate_csrf(&session, &form.csrf_token)?;

    let rerender = |errors: Vec<String>| {
        join_form_page(
            &session,
            &state,
            &form.warehouse_zone_id,
            &form.time_slot_id,
            &form.grain_type,
            &form.requested_quantity,
            errors,
        )
    };

    if state.user.is_suspended {
        return rerender(vec![SUSPENDED_NOTICE.to_string()]);
    }

    let request = match validate_join(&form) {
        Ok(request) => request,
        Err(errors) => return rerender(errors),
    };

    match api::waiting_list::join(&api_client, &state.token, &request).await {
        Ok(()) => {
            log::info!(
                "User {} joined waiting list for slot {} in zone {}",
                state.user_id(),
                request.time_slot_id,
                request.warehouse_zone_id
            );
            set_flash(&session, FlashKind::Success, JOINED_NOTICE);
            Ok(back_to_list())
        }
        Err(ApiError::Unauthorized) => Err(AppError::Unauthorized),
        Err(e) => {
            log::warn!("Join waiting list failed: {e}");
            rerender(vec![e.user_message("Failed to join waiting list")])
        }
    }
}
