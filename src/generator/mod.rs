pub mod manifest;
pub mod templates;
pub mod writer;
