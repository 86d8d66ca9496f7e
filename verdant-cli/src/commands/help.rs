use super::{COMMANDS, CommandMeta};

pub const META: CommandMeta = CommandMeta {
    name: "help",
    desc: "Lists the available commands",
    usage: "verdant help",
    needs_backend: false,
};

pub fn help() {
    println!("Commands:");
    for meta in COMMANDS {
        println!("  {:<48} {}", meta.usage, meta.desc);
    }
}
