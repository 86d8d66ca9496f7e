pub mod cache;
pub mod client;
pub mod error;
pub mod impls;
pub mod model;
pub mod service;

pub use cache::CacheService;
pub use client::{ApiClient, ApiConfig};
pub use error::ApiError;
pub use service::{ChatService, CommentService, ExperienceService, PostService, VoteService};
