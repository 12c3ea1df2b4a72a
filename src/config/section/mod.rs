//! Configuration section definitions.
//!
//! Each module corresponds to a section in `pagedir.toml`:
//!
//! | Module      | TOML Section    | Purpose                                  |
//! |-------------|-----------------|------------------------------------------|
//! | `bundle`    | `[bundle]`      | Bundler command and output directory     |
//! | `normalize` | `[normalize]`   | Index name, script rewriting policy      |

mod bundle;
mod normalize;

pub use bundle::BundleConfig;
pub use normalize::NormalizeConfig;
