use askama::Template;

use crate::waiting_list::{EntryView, WaitingListView};
use super::PageContext;

#[derive(Template)]
#[template(path = "waiting_lists/list.html")]
pub struct WaitingListTemplate {
    pub ctx: PageContext,
    pub view: WaitingListView,
}

#[derive(Template)]
#[template(path = "waiting_lists/decline.html")]
pub struct DeclinePromptTemplate {
    pub ctx: PageContext,
    pub entry: EntryView,
}

/// Grain choice for the join form's select box.
pub struct GrainOption {
    pub code: &'static str,
    pub label: &'static str,
    pub selected: bool,
}

#[derive(Template)]
#[template(path = "waiting_lists/join.html")]
pub struct JoinWaitingListTemplate {
    pub ctx: PageContext,
    pub warehouse_zone_id: String,
    pub time_slot_id: String,
    pub requested_quantity: String,
    pub grains: Vec<GrainOption>,
    pub errors: Vec<String>,
}
