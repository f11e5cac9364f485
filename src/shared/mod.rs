pub mod error;
pub mod middleware;
pub mod structs;
pub mod utility;

#[cfg(test)]
pub mod test_support;

pub const DEFAULT_ROUTE: &str = "/discord/interactions/entrypoint";
pub const DEFAULT_TOPIC_PREFIX: &str = "wikia-discord-commands";
