//! HTTP protocol layer module
//!
//! Response builders shared by the dev server host and the llms plugin.

pub mod response;

pub use response::{build_404_response, build_markdown_response, MARKDOWN_CONTENT_TYPE};
