//! Path and URL utilities.
//!
//! Pure functions for path manipulation. No side effects.
//!
//! - [`fs`]: Filesystem path normalization (`normalize_path`, `path_segments`)
//! - [`route`]: Script URL handling (`classify_src`, `resolve_segments`, `relative_url`)

pub mod fs;
pub mod route;

pub use fs::{normalize_path, path_segments};
