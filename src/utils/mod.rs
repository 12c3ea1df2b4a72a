//! Shared helpers.

pub mod html;
pub mod path;
pub mod plural;

pub use plural::plural_count;
