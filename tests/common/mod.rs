//! Shared test infrastructure: a fake booking backend and a cookie-carrying client.
//!
//! # Fake backend
//! - `start_backend(BackendState)` binds an actix-web server on 127.0.0.1:0 that
//!   speaks the booking REST contract and records every request it sees.
//!
//! # Portal
//! - `portal!(base_url, pending)` builds the portal under `actix_web::test`.
//! - `visit!(app, browser, request)` runs a request and keeps the session cookie.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use actix_web::cookie::Cookie;
use actix_web::dev::{ServerHandle, ServiceResponse};
use actix_web::http::StatusCode;
use actix_web::{App, HttpRequest, HttpResponse, HttpServer, test, web};
use serde_json::{Value, json};

// ============================================================================
// TEST CONSTANTS
// ============================================================================

pub const FARMER_EMAIL: &str = "amina@example.dz";
pub const FARMER_PASS: &str = "wheat-harvest";
pub const FARMER_TOKEN: &str = "tok-farmer-7";
pub const FARMER_ID: i64 = 7;

// ============================================================================
// FAKE BACKEND
// ============================================================================

#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    pub authorization: Option<String>,
    pub body: String,
}

pub struct BackendState {
    pub user: Value,
    pub token: String,
    pub entries: Value,
    /// Overrides the my-list answer with (status, body).
    pub list_failure: Option<(u16, Value)>,
    pub confirm_answer: (u16, Value),
    pub decline_answer: (u16, Value),
    pub join_answer: (u16, Value),
    pub requests: Vec<RecordedRequest>,
}

impl Default for BackendState {
    fn default() -> Self {
        Self {
            user: farmer_user(),
            token: FARMER_TOKEN.to_string(),
            entries: json!([]),
            list_failure: None,
            confirm_answer: (200, json!({"message": "Confirmed"})),
            decline_answer: (200, json!({"message": "Declined"})),
            join_answer: (201, json!({"message": "Joined"})),
            requests: Vec::new(),
        }
    }
}

pub fn farmer_user() -> Value {
    json!({
        "id": FARMER_ID,
        "email": FARMER_EMAIL,
        "firstName": "Amina",
        "lastName": "Benali",
        "role": "FARMER",
        "isSuspended": false
    })
}

pub fn warehouse_admin_user() -> Value {
    json!({
        "id": 30,
        "email": "depot@example.dz",
        "firstName": "Karim",
        "lastName": "Haddad",
        "role": "WAREHOUSE_ADMIN"
    })
}

/// A queue entry in the backend's wire format.
pub fn entry_json(id: i64, status: &str, position: Option<u32>, expires_at: Option<String>) -> Value {
    json!({
        "id": id,
        "appointment": {
            "id": 100 + id,
            "appointmentDate": "2026-11-03",
            "warehouseZone": {"id": 4, "name": "Silo B - Wheat"},
            "timeSlot": {"id": 12, "startTime": "08:00", "endTime": "09:00"}
        },
        "grainType": "WHEAT",
        "requestedQuantity": 12.5,
        "position": position,
        "status": status,
        "notifiedAt": null,
        "expiresAt": expires_at
    })
}

pub struct FakeBackend {
    pub state: Arc<Mutex<BackendState>>,
    pub base_url: String,
    handle: ServerHandle,
}

impl FakeBackend {
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.state.lock().unwrap().requests.clone()
    }

    pub fn requests_to(&self, path_prefix: &str) -> Vec<RecordedRequest> {
        self.requests()
            .into_iter()
            .filter(|r| r.path.starts_with(path_prefix))
            .collect()
    }

    pub fn with_state<R>(&self, f: impl FnOnce(&mut BackendState) -> R) -> R {
        f(&mut self.state.lock().unwrap())
    }

    pub async fn stop(&self) {
        self.handle.stop(false).await;
    }
}

fn answer(status: u16, body: Value) -> HttpResponse {
    let status = StatusCode::from_u16(status).expect("valid status");
    HttpResponse::build(status).json(body)
}

async fn fake_handler(
    req: HttpRequest,
    body: web::Bytes,
    state: web::Data<Mutex<BackendState>>,
) -> HttpResponse {
    let mut st = state.lock().unwrap();
    let authorization = req
        .headers()
        .get("Authorization")
        .and_then(|v| v.to_str().ok())
        .map(String::from);
    let path = req.path().to_string();
    let method = req.method().to_string();
    st.requests.push(RecordedRequest {
        method: method.clone(),
        path: path.clone(),
        authorization: authorization.clone(),
        body: String::from_utf8_lossy(&body).into_owned(),
    });

    if method == "POST" && path == "/api/auth/login" {
        let creds: Value = serde_json::from_slice(&body).unwrap_or(Value::Null);
        if creds["password"] == "wrong" {
            return answer(401, json!({"message": "Invalid credentials"}));
        }
        return answer(200, json!({"token": st.token, "user": st.user}));
    }

    let expected = format!("Bearer {}", st.token);
    if authorization.as_deref() != Some(expected.as_str()) {
        return answer(401, json!({"detail": "Invalid token"}));
    }

    match (method.as_str(), path.as_str()) {
        ("GET", "/api/auth/profile") => answer(200, json!({"user": st.user})),
        ("GET", "/api/waiting-list/my-list") => match st.list_failure.clone() {
            Some((status, body)) => answer(status, body),
            None => answer(200, json!({"waitingLists": st.entries})),
        },
        ("POST", p) if p.starts_with("/api/waiting-list/confirm/") => {
            let (status, body) = st.confirm_answer.clone();
            answer(status, body)
        }
        ("POST", p) if p.starts_with("/api/waiting-list/decline/") => {
            let (status, body) = st.decline_answer.clone();
            answer(status, body)
        }
        ("POST", "/api/waiting-list/join") => {
            let (status, body) = st.join_answer.clone();
            answer(status, body)
        }
        _ => answer(404, json!({"message": "Not found"})),
    }
}

pub async fn start_backend(state: BackendState) -> FakeBackend {
    let shared = Arc::new(Mutex::new(state));
    let data = web::Data::from(shared.clone());

    let server = HttpServer::new(move || {
        App::new()
            .app_data(data.clone())
            .default_service(web::to(fake_handler))
    })
    .workers(1)
    .bind(("127.0.0.1", 0))
    .expect("Failed to bind fake backend");

    let addr = server.addrs()[0];
    let server = server.run();
    let handle = server.handle();
    actix_web::rt::spawn(server);

    FakeBackend {
        state: shared,
        base_url: format!("http://{addr}/api"),
        handle,
    }
}

// ============================================================================
// PORTAL
// ============================================================================

/// Build the portal against `$base_url`, sharing `$pending` with the test.
#[macro_export]
macro_rules! portal {
    ($base_url:expr, $pending:expr) => {{
        let api_client = mahsoule::api::ApiClient::new(&$base_url, std::time::Duration::from_secs(5))
            .expect("api client");
        actix_web::test::init_service(
            actix_web::App::new()
                .wrap(
                    actix_session::SessionMiddleware::builder(
                        actix_session::storage::CookieSessionStore::default(),
                        actix_web::cookie::Key::generate(),
                    )
                    .cookie_secure(false)
                    .build(),
                )
                .app_data(actix_web::web::Data::new(api_client))
                .app_data(actix_web::web::Data::new(mahsoule::auth::rate_limit::LoginLimiter::new()))
                .app_data(actix_web::web::Data::new($pending.clone()))
                .configure(mahsoule::app::routes),
        )
        .await
    }};
}

/// Run `$req` (a `TestRequest`) and return a [`Page`], keeping the session cookie current.
#[macro_export]
macro_rules! visit {
    ($app:expr, $browser:expr, $req:expr) => {{
        let resp = actix_web::test::call_service($app, $req.to_request()).await;
        $browser.absorb(&resp);
        let status = resp.status();
        let location = resp
            .headers()
            .get("Location")
            .and_then(|v| v.to_str().ok())
            .map(String::from);
        let body = actix_web::test::read_body(resp).await;
        $crate::common::Page {
            status,
            location,
            body: String::from_utf8_lossy(&body).into_owned(),
        }
    }};
}

pub struct Page {
    pub status: StatusCode,
    pub location: Option<String>,
    pub body: String,
}

impl Page {
    pub fn redirects_to(&self, path: &str) -> bool {
        self.status == StatusCode::SEE_OTHER && self.location.as_deref() == Some(path)
    }
}

/// Carries the session cookie between requests like a browser would.
#[derive(Default)]
pub struct Browser {
    cookie: Option<Cookie<'static>>,
    pub csrf_token: String,
}

impl Browser {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has_session(&self) -> bool {
        self.cookie.is_some()
    }

    pub fn absorb<B>(&mut self, resp: &ServiceResponse<B>) {
        for cookie in resp.response().cookies() {
            if cookie.name() != "id" {
                continue;
            }
            if cookie.value().is_empty() {
                self.cookie = None;
            } else {
                self.cookie = Some(cookie.into_owned());
            }
        }
    }

    pub fn get(&self, path: &str) -> test::TestRequest {
        self.with_cookie(test::TestRequest::get().uri(path))
    }

    /// Form POST; the CSRF token is added automatically.
    pub fn post(&self, path: &str, fields: &[(&str, &str)]) -> test::TestRequest {
        let mut all: Vec<(&str, &str)> = vec![("csrf_token", self.csrf_token.as_str())];
        all.extend_from_slice(fields);
        let body = serde_urlencoded::to_string(&all).expect("encode form");
        self.with_cookie(
            test::TestRequest::post()
                .uri(path)
                .insert_header(("Content-Type", "application/x-www-form-urlencoded"))
                .set_payload(body),
        )
    }

    fn with_cookie(&self, req: test::TestRequest) -> test::TestRequest {
        match &self.cookie {
            Some(c) => req.cookie(c.clone()),
            None => req,
        }
    }

    pub fn remember_csrf(&mut self, html: &str) {
        let re = regex::Regex::new(r#"name="csrf_token" value="([0-9a-f]{64})""#).unwrap();
        if let Some(caps) = re.captures(html) {
            self.csrf_token = caps[1].to_string();
        }
    }
}

/// Sign in through the real login form.
#[macro_export]
macro_rules! sign_in {
    ($app:expr, $browser:expr, $email:expr, $password:expr) => {{
        let page = $crate::visit!($app, $browser, $browser.get("/login"));
        $browser.remember_csrf(&page.body);
        $crate::visit!(
            $app,
            $browser,
            $browser.post("/login", &[("email", $email), ("password", $password)])
        )
    }};
}
