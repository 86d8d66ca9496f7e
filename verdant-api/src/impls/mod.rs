pub mod chat;
pub mod comments;
pub mod experience;
pub mod posts;
pub mod votes;
