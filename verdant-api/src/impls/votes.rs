use tracing::info;

use verdant_core::{EntityId, UserId, VoteAction};

use super::comments::forget_cached_reply;
use crate::client::ApiClient;
use crate::error::ApiError;
use crate::model::votes::{VoteCounts, VoteRequest, VoteTarget};

/// Cast (or toggle off) a vote. The backend decides the resulting counts.
///
/// A vote on a reply drops the cached reply list that holds it.
pub async fn cast_vote(
    api: &ApiClient,
    target: VoteTarget,
    action: VoteAction,
    viewer: &UserId,
    target_id: &EntityId,
) -> Result<VoteCounts, ApiError> {
    let request = VoteRequest {
        user_id: viewer.clone(),
        target_id: target_id.clone(),
    };

    let counts: VoteCounts = api
        .post_json(&target.vote_segments(action), &request)
        .await?;

    info!(
        target = target.path_segment(),
        %target_id,
        %action,
        upvotes = counts.number_of_upvotes,
        downvotes = counts.number_of_devotes,
        "vote recorded"
    );

    if matches!(target, VoteTarget::Reply) {
        forget_cached_reply(api.cache(), target_id).await;
    }

    Ok(counts)
}
