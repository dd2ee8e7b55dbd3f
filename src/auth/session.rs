use actix_session::Session;
use serde::{Deserialize, Serialize};

use crate::api::types::UserProfile;
use crate::auth::role::Role;
use crate::errors::AppError;

const TOKEN_KEY: &str = "token";
const USER_KEY: &str = "user";
const FLASH_KEY: &str = "flash";

/// Bearer token and profile of the signed-in user, persisted in the session cookie.
///
/// Hydrated once per request; written only by login, the profile refresh and
/// teardown (logout or a 401 from the backend).
#[derive(Debug, Clone)]
pub struct SessionState {
    pub token: String,
    pub user: UserProfile,
}

impl SessionState {
    /// Rebuild from the cookie. Anything partial or undecodable counts as signed out.
    pub fn hydrate(session: &Session) -> Option<Self> {
        let token = session.get::<String>(TOKEN_KEY).ok().flatten()?;
        if token.is_empty() {
            return None;
        }
        let user = match session.get::<UserProfile>(USER_KEY) {
            Ok(Some(user)) => user,
            Ok(None) => return None,
            Err(e) => {
                log::warn!("Discarding unreadable session user: {e}");
                return None;
            }
        };
        Some(Self { token, user })
    }

    /// Like [`hydrate`](Self::hydrate) but for handlers behind the auth guard.
    pub fn require(session: &Session) -> Result<Self, AppError> {
        Self::hydrate(session).ok_or(AppError::Unauthorized)
    }

    pub fn persist(&self, session: &Session) -> Result<(), AppError> {
        session.renew();
        session
            .insert(TOKEN_KEY, &self.token)
            .map_err(|e| AppError::Session(format!("Failed to store token: {e}")))?;
        session
            .insert(USER_KEY, &self.user)
            .map_err(|e| AppError::Session(format!("Failed to store user: {e}")))?;
        Ok(())
    }

    /// Replace the stored profile after a refresh from the backend.
    pub fn update_user(&mut self, session: &Session, user: UserProfile) -> Result<(), AppError> {
        session
            .insert(USER_KEY, &user)
            .map_err(|e| AppError::Session(format!("Failed to store user: {e}")))?;
        self.user = user;
        Ok(())
    }

    pub fn teardown(session: &Session) {
        session.purge();
    }

    pub fn role(&self) -> Role {
        self.user.role
    }

    pub fn user_id(&self) -> i64 {
        self.user.id
    }
}

/// Reject users whose role is not in `allowed`; they are sent to their own dashboard.
pub fn require_role(state: &SessionState, allowed: &[Role]) -> Result<(), AppError> {
    if allowed.contains(&state.role()) {
        Ok(())
    } else {
        Err(AppError::WrongRole(state.role()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FlashKind {
    Success,
    Error,
    Info,
}

impl FlashKind {
    pub fn css_class(&self) -> &'static str {
        match self {
            FlashKind::Success => "flash-success",
            FlashKind::Error => "flash-error",
            FlashKind::Info => "flash-info",
        }
    }
}

/// One-shot notice shown on the next rendered page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flash {
    pub kind: FlashKind,
    pub message: String,
}

pub fn set_flash(session: &Session, kind: FlashKind, message: impl Into<String>) {
    let flash = Flash { kind, message: message.into() };
    if let Err(e) = session.insert(FLASH_KEY, &flash) {
        log::warn!("Failed to store flash message: {e}");
    }
}

pub fn take_flash(session: &Session) -> Option<Flash> {
    let flash = session.get::<Flash>(FLASH_KEY).unwrap_or(None);
    if flash.is_some() {
        session.remove(FLASH_KEY);
    }
    flash
}
