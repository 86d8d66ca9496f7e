pub mod chat;
pub mod experience;
pub mod feed;
pub mod help;
pub mod level;
pub mod thread;
pub mod vote;

use verdant_core::ActionError;

use crate::context::Data;

pub struct CommandMeta {
    pub name: &'static str,
    pub desc: &'static str,
    pub usage: &'static str,
    pub needs_backend: bool,
}

pub const COMMANDS: &[CommandMeta] = &[
    help::META,
    level::META,
    experience::XP_META,
    experience::AWARD_META,
    feed::META,
    vote::META,
    thread::META,
    chat::META,
];

pub fn find(name: &str) -> Option<&'static CommandMeta> {
    COMMANDS.iter().find(|meta| meta.name == name)
}

/// Argument problem; reported with the command's usage line.
#[derive(Debug)]
pub struct UsageError {
    pub usage: &'static str,
    pub message: String,
}

impl UsageError {
    pub fn new(meta: &CommandMeta, message: impl Into<String>) -> Self {
        Self {
            usage: meta.usage,
            message: message.into(),
        }
    }
}

/// Run a command that talks to the backend.
pub async fn run_networked(
    name: &str,
    args: &[String],
    data: &Data,
) -> Result<Result<(), ActionError>, UsageError> {
    match name {
        "xp" => Ok(experience::xp(data, experience::parse_xp(args)?).await),
        "award" => Ok(experience::award(data, experience::parse_award(args)?).await),
        "feed" => Ok(feed::feed(data).await),
        "vote" => Ok(vote::vote(data, vote::parse(args)?).await),
        "thread" => Ok(thread::thread(data, thread::parse(args)?).await),
        "chat" => Ok(chat::chat(data, chat::parse(args)?).await),
        other => Err(UsageError {
            usage: help::META.usage,
            message: format!("unknown command `{}`", other),
        }),
    }
}
