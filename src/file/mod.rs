//! File I/O for YAML documents.
//!
//! Documents are loaded from disk or stdin (optionally gzip-compressed) and
//! rendered files are written back atomically, with an optional backup.

pub mod loader;
pub mod saver;
