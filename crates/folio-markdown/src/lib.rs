//! Markdown rendering for folio pages.
//!
//! Converts CommonMark with GitHub-flavored tables to HTML. Raw HTML in the
//! source is passed through unescaped: page sources are first-party content.

pub mod render;

pub use render::{render_markdown, MarkdownOptions};
