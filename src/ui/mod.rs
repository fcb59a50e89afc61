pub mod formatting;
pub mod terminal;
pub mod updates;

pub use terminal::TerminalRenderer;
pub use updates::{format_changes, render_view, Snapshot};
