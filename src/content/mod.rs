//! Content module - post model and the plain-text formatter

pub mod formatter;
pub mod post;

pub use formatter::format_text;
pub use post::{Authorship, Post};
