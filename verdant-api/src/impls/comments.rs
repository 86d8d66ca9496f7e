use tracing::{debug, warn};

use verdant_core::EntityId;

use crate::cache::{CacheService, replies_key, reply_parent_key};
use crate::client::ApiClient;
use crate::error::ApiError;
use crate::model::comments::{CommentRecord, NewComment, NewReply, ReplyRecord};

pub async fn list_comments(
    api: &ApiClient,
    post_id: &EntityId,
) -> Result<Vec<CommentRecord>, ApiError> {
    api.get_json(&["posts", post_id.as_str(), "comments"]).await
}

/// Replies under one comment. Cached for the rest of the session, or until a
/// reply is posted under the comment or one of its replies is voted on.
pub async fn list_replies(
    api: &ApiClient,
    comment_id: &EntityId,
) -> Result<Vec<ReplyRecord>, ApiError> {
    let cache = api.cache();
    let key = replies_key(cache, comment_id);

    cache
        .get_or_load_json(&key, cache.ttl(), move || async move {
            debug!(%comment_id, "fetching replies");
            let replies: Vec<ReplyRecord> = api
                .get_json(&["comments", comment_id.as_str(), "replies"])
                .await?;
            remember_parents(cache, &replies).await;
            Ok::<_, ApiError>(replies)
        })
        .await
}

async fn remember_parents(cache: &CacheService, replies: &[ReplyRecord]) {
    for reply in replies {
        let key = reply_parent_key(cache, &reply.id);
        if let Err(e) = cache.set_json(&key, &reply.comment_id, cache.ttl()).await {
            warn!(?e, reply_id = %reply.id, "failed to index cached reply");
        }
    }
}

async fn drop_replies(cache: &CacheService, comment_id: &EntityId) {
    if let Err(e) = cache.del(&replies_key(cache, comment_id)).await {
        warn!(?e, %comment_id, "failed to drop cached replies");
    }
}

/// Drop the cached reply list that holds `reply_id`, if any.
pub(crate) async fn forget_cached_reply(cache: &CacheService, reply_id: &EntityId) {
    match cache.get_json::<EntityId>(&reply_parent_key(cache, reply_id)).await {
        Ok(Some(comment_id)) => drop_replies(cache, &comment_id).await,
        Ok(None) => {}
        Err(e) => warn!(?e, %reply_id, "failed to look up cached reply"),
    }
}

pub async fn create_comment(
    api: &ApiClient,
    comment: &NewComment,
) -> Result<CommentRecord, ApiError> {
    api.post_json(&["comments"], comment).await
}

/// Post a reply and drop the cached reply list of its parent.
pub async fn create_reply(api: &ApiClient, reply: &NewReply) -> Result<ReplyRecord, ApiError> {
    let created: ReplyRecord = api.post_json(&["replies"], reply).await?;
    drop_replies(api.cache(), &reply.comment_id).await;
    Ok(created)
}
