// Text console host: turns typed commands into catalog events and prints the list.
pub mod command_handler;
pub mod render;

pub use command_handler::{handle_command, CommandOutcome};
