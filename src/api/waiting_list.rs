use super::types::{JoinWaitingListRequest, WaitingListEntry, WaitingListResponse};
use super::{ApiClient, ApiError};

/// GET /waiting-list/my-list
pub async fn my_list(api: &ApiClient, token: &str) -> Result<Vec<WaitingListEntry>, ApiError> {
    let response: WaitingListResponse = api.get_json("/waiting-list/my-list", Some(token)).await?;
    Ok(response.waiting_lists)
}

/// POST /waiting-list/join
pub async fn join(api: &ApiClient, token: &str, request: &JoinWaitingListRequest) -> Result<(), ApiError> {
    api.post_for_status("/waiting-list/join", Some(token), Some(request)).await
}

/// POST /waiting-list/confirm/{id}
pub async fn confirm(api: &ApiClient, token: &str, entry_id: i64) -> Result<(), ApiError> {
    api.post_for_status::<()>(&format!("/waiting-list/confirm/{entry_id}"), Some(token), None)
        .await
}

/// POST /waiting-list/decline/{id}
pub async fn decline(api: &ApiClient, token: &str, entry_id: i64) -> Result<(), ApiError> {
    api.post_for_status::<()>(&format!("/waiting-list/decline/{entry_id}"), Some(token), None)
        .await
}
