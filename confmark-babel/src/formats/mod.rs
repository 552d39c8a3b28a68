//! Format implementations
//!
//! Each format converts between its own text representation and storage
//! markup.

pub mod markdown;
pub mod storage;

pub use markdown::MarkdownFormat;
pub use storage::StorageFormat;
