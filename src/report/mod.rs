//! Rendering of the channel view.

pub mod generator;

pub use generator::{build_view, generate_json_view, generate_markdown_view};
