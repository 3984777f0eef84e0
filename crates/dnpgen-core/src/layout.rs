//! Project layout of a CWave RTU project

use std::path::{Path, PathBuf};

use crate::error::{DnpGenError, Result};
use crate::writer::LIST_FILE;

/// Resource directory relative to the project root
pub const RESOURCE_DIR: &[&str] = &["C", "CWave_Micro", "R", "RTU_RESOURCE"];

/// Resolved file locations for one node
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectLayout {
    pub node: String,
    pub resource_dir: PathBuf,
    /// `<node>.SIG` produced by SIGEXT
    pub sig_file: PathBuf,
    /// `<node>.mwt` model passed to SIGEXT
    pub mwt_file: PathBuf,
    /// Generated `__lists.ini`
    pub list_file: PathBuf,
}

impl ProjectLayout {
    /// Resolve paths under `root`. The model file is looked up at the
    /// project root first, then in the resource directory.
    pub fn resolve(root: &Path, node: &str) -> Result<Self> {
        let resource_dir = RESOURCE_DIR
            .iter()
            .fold(root.to_path_buf(), |dir, part| dir.join(part));

        if !resource_dir.is_dir() {
            return Err(DnpGenError::ResourceNotFound { path: resource_dir });
        }

        let mwt_name = format!("{}.mwt", node);
        let mut mwt_file = root.join(&mwt_name);
        if !mwt_file.exists() {
            mwt_file = resource_dir.join(&mwt_name);
        }

        Ok(Self {
            node: node.to_string(),
            sig_file: resource_dir.join(format!("{}.SIG", node)),
            list_file: resource_dir.join(LIST_FILE),
            mwt_file,
            resource_dir,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn project() -> (TempDir, PathBuf) {
        let tmp = TempDir::new().unwrap();
        let resource = tmp
            .path()
            .join("C")
            .join("CWave_Micro")
            .join("R")
            .join("RTU_RESOURCE");
        fs::create_dir_all(&resource).unwrap();
        (tmp, resource)
    }

    #[test]
    fn test_resolve_paths() {
        let (tmp, resource) = project();
        let layout = ProjectLayout::resolve(tmp.path(), "RTU01").unwrap();

        assert_eq!(layout.resource_dir, resource);
        assert_eq!(layout.sig_file, resource.join("RTU01.SIG"));
        assert_eq!(layout.list_file, resource.join("__lists.ini"));
        // falls back to resource dir when root has no model
        assert_eq!(layout.mwt_file, resource.join("RTU01.mwt"));
    }

    #[test]
    fn test_resolve_prefers_root_model() {
        let (tmp, _) = project();
        fs::write(tmp.path().join("RTU01.mwt"), "").unwrap();

        let layout = ProjectLayout::resolve(tmp.path(), "RTU01").unwrap();
        assert_eq!(layout.mwt_file, tmp.path().join("RTU01.mwt"));
    }

    #[test]
    fn test_resolve_missing_resource_dir() {
        let tmp = TempDir::new().unwrap();
        let err = ProjectLayout::resolve(tmp.path(), "RTU01").unwrap_err();
        assert!(matches!(err, DnpGenError::ResourceNotFound { .. }));
    }
}
