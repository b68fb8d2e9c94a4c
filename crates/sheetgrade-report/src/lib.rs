//! Human-readable renderings of a [`GradeReport`](sheetgrade_core::GradeReport).

pub mod html;
pub mod markdown;

pub use html::{generate_html, write_html_report};
pub use markdown::to_markdown;
