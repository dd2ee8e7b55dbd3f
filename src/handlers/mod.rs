pub mod auth_handlers;
pub mod dashboard;
pub mod profile_handlers;
pub mod waiting_list_handlers;
