use verdant_core::UserId;

use crate::client::ApiClient;
use crate::error::ApiError;
use crate::model::experience::{AddExperience, ExperiencePoints};

pub async fn get_experience_points(
    api: &ApiClient,
    user_id: &UserId,
) -> Result<ExperiencePoints, ApiError> {
    api.get_json(&["users", user_id.as_str(), "experience-points"])
        .await
}

/// Ask the backend to add `points` and return the confirmed total.
pub async fn add_experience_points(
    api: &ApiClient,
    user_id: &UserId,
    points: f64,
) -> Result<ExperiencePoints, ApiError> {
    api.post_json(
        &["users", user_id.as_str(), "experience-points"],
        &AddExperience { points },
    )
    .await
}
