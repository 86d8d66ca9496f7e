use crate::client::ApiClient;
use crate::error::ApiError;
use crate::model::posts::PostRecord;

/// Latest posts, newest first as ordered by the backend.
pub async fn list_posts(api: &ApiClient) -> Result<Vec<PostRecord>, ApiError> {
    api.get_json(&["posts"]).await
}
