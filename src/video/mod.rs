mod assemble;
pub mod audio;
mod check;
pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
mod inspect;
pub mod pipeline;
pub mod render;
pub mod support;

pub use cli::VideoCommands;
pub use commands::handle_video_command;
