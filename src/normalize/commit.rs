//! Writing planned relocations to disk.

use std::fs;

use super::NormalizeError;
use super::plan::Relocation;

/// Write the relocated page, then remove the original.
///
/// Intermediate directories are created as needed. Directories left empty
/// by the removal are not cleaned up.
pub fn commit(plan: &Relocation) -> Result<(), NormalizeError> {
    if let Some(parent) = plan.target.parent() {
        fs::create_dir_all(parent).map_err(|err| NormalizeError::io("create", parent, err))?;
    }
    fs::write(&plan.target, &plan.html)
        .map_err(|err| NormalizeError::io("write", &plan.target, err))?;
    fs::remove_file(&plan.source).map_err(|err| NormalizeError::io("remove", &plan.source, err))
}
