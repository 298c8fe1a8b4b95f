//! Cross-platform utilities and helpers
//!
//! # Modules
//!
//! - [`fs`] - File system operations with atomic writes

pub mod fs;

pub use fs::{atomic_write, atomic_write_validated, ensure_dir, read_json_value};
