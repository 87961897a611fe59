pub mod dto;
pub mod commands;

pub use dto::*;
pub use commands::{execute, Command, Reply};
