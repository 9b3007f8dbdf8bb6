//! Capture layer: fetch a terms/privacy page, flatten it to text, and append
//! it to the policy source file before a run.

pub mod convert;
pub mod http;

pub use convert::html_to_text;
pub use http::{CaptureClient, CaptureError, append_to_source};
