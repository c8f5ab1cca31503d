pub mod backend;
pub mod extract;
pub mod ndjson;

pub use backend::{BackendClient, StreamEvent};
pub use extract::extract_code_block;
pub use ndjson::NdjsonParser;
