/// Chat room message list refreshed on notification.
pub mod chat;
/// Client-side posts, comments and replies.
pub mod entity;
/// Experience total and the level derived from it.
pub mod experience;
/// Post feed with in-place vote reconciliation.
pub mod feed;
/// Merging server-confirmed results into in-memory lists.
pub mod reconcile;
/// Stale-response guard shared by every view.
pub mod scope;
/// Comments and lazily expanded replies for one post.
pub mod thread;
/// Per-widget vote state machine.
pub mod vote;

#[cfg(test)]
pub(crate) mod fakes;
