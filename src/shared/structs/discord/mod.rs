pub mod interaction;
pub mod public_key;
