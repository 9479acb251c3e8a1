//! Test utilities for wrapgen unit tests.
//!
//! # Example
//!
//! ```rust,ignore
//! use wrapgen::test_support::{fixtures, write_project};
//!
//! #[test]
//! fn test_example() {
//!     let tmp = tempfile::TempDir::new().unwrap();
//!     let path = write_project(tmp.path(), &fixtures::linphone_project()).unwrap();
//!     // Load `path` with CProject::load...
//! }
//! ```

pub mod fixtures;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::cparser::project::CProject;

// Re-export fixtures for convenience
pub use fixtures::*;

/// Serialize `project` to `<dir>/project.json`.
pub fn write_project(dir: &Path, project: &CProject) -> Result<PathBuf> {
    let path = dir.join("project.json");
    let contents = serde_json::to_string_pretty(project)?;
    std::fs::write(&path, contents)
        .with_context(|| format!("failed to write {}", path.display()))?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_written_project_loads_back() {
        let tmp = TempDir::new().unwrap();
        let path = write_project(tmp.path(), &linphone_project()).unwrap();

        let project = CProject::load(&path).unwrap();
        assert_eq!(project.enums.len(), 1);
        assert_eq!(project.classes.len(), 2);
        assert_eq!(project.classes[0].properties.len(), 2);
        assert_eq!(
            project.classes[0].instance_methods[1].arguments[1].complete_type,
            "const char *"
        );
    }
}
