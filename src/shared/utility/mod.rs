pub mod command_name;
pub mod pubsub;
