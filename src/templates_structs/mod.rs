// Template context structures for Askama templates, organized by page family.

use actix_session::Session;

use crate::auth::csrf;
use crate::auth::role::{NavItem, Role};
use crate::auth::session::{Flash, SessionState, take_flash};

pub const APP_NAME: &str = "MAHSOULE";

/// Common context shared by all authenticated pages.
/// Templates access these as `ctx.display_name`, `ctx.nav`, etc.
pub struct PageContext {
    pub display_name: String,
    pub avatar_initial: String,
    pub role: Role,
    pub flash: Option<Flash>,
    pub nav: Vec<NavItem>,
    pub app_name: &'static str,
    pub csrf_token: String,
}

impl PageContext {
    pub fn build(session: &Session, state: &SessionState, current_path: &str) -> Self {
        let display_name = state.user.display_name();
        let avatar_initial = display_name.chars().next().unwrap_or('?').to_uppercase().to_string();
        Self {
            display_name,
            avatar_initial,
            role: state.role(),
            flash: take_flash(session),
            nav: state.role().navigation(current_path),
            app_name: APP_NAME,
            csrf_token: csrf::get_or_create_token(session),
        }
    }

    pub fn role_label(&self) -> &'static str {
        self.role.label()
    }
}

mod common;
mod waiting_list;

pub use self::common::{DashboardTemplate, LoginTemplate, ProfileTemplate};
pub use self::waiting_list::{DeclinePromptTemplate, GrainOption, JoinWaitingListTemplate, WaitingListTemplate};
