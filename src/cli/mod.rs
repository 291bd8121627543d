pub mod commands;
pub mod core;
pub mod forms;
pub mod navigation;
pub mod output;
mod shell;
pub mod shell_context;
pub mod table;

pub use shell::run_cli;
