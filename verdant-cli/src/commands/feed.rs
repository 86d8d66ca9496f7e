use verdant_core::ActionError;
use verdant_interactions::feed::PostFeed;
use verdant_utils::formatting::format_compact_count;

use super::CommandMeta;
use crate::context::Data;

pub const META: CommandMeta = CommandMeta {
    name: "feed",
    desc: "Lists the latest posts with their scores",
    usage: "verdant feed",
    needs_backend: true,
};

pub async fn feed(data: &Data) -> Result<(), ActionError> {
    let mut feed = PostFeed::new();
    feed.load(&data.api).await?;

    if feed.posts().is_empty() {
        println!("No posts yet.");
    }
    for post in feed.posts() {
        println!(
            "{:>6}  {}  ({})",
            format_compact_count(post.tally.count),
            post.title,
            post.id
        );
    }
    Ok(())
}
