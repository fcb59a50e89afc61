pub mod command_handlers;

pub use command_handlers::run_interactive;
