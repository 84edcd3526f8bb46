//! Output formatting for subnet summaries.

mod terminal;

// Re-export public functions
pub use terminal::{format_row, render_summary};
