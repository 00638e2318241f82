//! CLI command implementations.

pub mod ask;
pub mod import;
pub mod init;
pub mod stats;
pub mod templates;
