// Common modules available on all platforms
pub mod document;
pub mod tool;

pub use document::Document;
