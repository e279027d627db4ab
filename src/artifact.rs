//! Ownership of the generated document on disk.
//!
//! A run either writes to a path the caller named, which it must never delete, or to a
//! temporary file it owns. Nothing is cleaned up implicitly: the driver calls
//! [`OutputArtifact::release`] after a successful print and
//! [`OutputArtifact::abandon`] when the page could not be written.

use crate::error::AppError;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

#[derive(Debug)]
pub struct OutputArtifact {
    path: PathBuf,
    caller_owned: bool,
}

impl OutputArtifact {
    /// Uses `output` when given, otherwise allocates a fresh temporary `.pdf` path.
    pub fn resolve(output: Option<&Path>) -> Result<Self, AppError> {
        match output {
            Some(path) => Ok(Self {
                path: path.to_path_buf(),
                caller_owned: true,
            }),
            None => Self::temporary(),
        }
    }

    fn temporary() -> Result<Self, AppError> {
        let file = tempfile::Builder::new()
            .prefix("nozzle-exerciser-")
            .suffix(".pdf")
            .tempfile()
            .map_err(AppError::TempArtifact)?;
        // Keep the file past the handle; removal happens in `release`.
        let path = file
            .into_temp_path()
            .keep()
            .map_err(|e| AppError::TempArtifact(e.error))?;
        debug!(path = %path.display(), "allocated temporary artifact");

        Ok(Self {
            path,
            caller_owned: false,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn is_caller_owned(&self) -> bool {
        self.caller_owned
    }

    /// Deletes the file if this run owns it. Returns whether anything was removed.
    pub fn release(self) -> Result<bool, AppError> {
        if self.caller_owned {
            return Ok(false);
        }
        fs::remove_file(&self.path).map_err(|source| AppError::ArtifactRemove {
            path: self.path.clone(),
            source,
        })?;
        debug!(path = %self.path.display(), "removed temporary artifact");
        Ok(true)
    }

    /// Best-effort removal of a run-owned file after composing it failed.
    ///
    /// The caller is already reporting an error, so a failed removal is only logged.
    pub fn abandon(self) {
        if self.caller_owned {
            return;
        }
        if let Err(e) = fs::remove_file(&self.path) {
            warn!(path = %self.path.display(), error = %e, "could not remove temporary artifact");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn temporary_artifact_is_removed_on_release() {
        let artifact = OutputArtifact::resolve(None).unwrap();
        let path = artifact.path().to_path_buf();

        assert!(!artifact.is_caller_owned());
        assert!(path.exists());
        assert_eq!(path.extension().and_then(|e| e.to_str()), Some("pdf"));

        assert!(artifact.release().unwrap());
        assert!(!path.exists());
    }

    #[test]
    fn temporary_paths_are_unique() {
        let a = OutputArtifact::resolve(None).unwrap();
        let b = OutputArtifact::resolve(None).unwrap();
        assert_ne!(a.path(), b.path());
        a.release().unwrap();
        b.release().unwrap();
    }

    #[test]
    fn caller_owned_artifact_survives_release() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("keep.pdf");
        fs::write(&path, b"%PDF-1.7\n").unwrap();

        let artifact = OutputArtifact::resolve(Some(&path)).unwrap();
        assert!(artifact.is_caller_owned());
        assert_eq!(artifact.path(), path);

        assert!(!artifact.release().unwrap());
        assert!(path.exists());
    }

    #[test]
    fn abandoned_temp_file_is_removed() {
        let artifact = OutputArtifact::resolve(None).unwrap();
        let path = artifact.path().to_path_buf();
        assert!(path.exists());

        artifact.abandon();
        assert!(!path.exists());
    }

    #[test]
    fn abandoning_caller_owned_file_keeps_it() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("keep.pdf");
        fs::write(&path, b"partial").unwrap();

        OutputArtifact::resolve(Some(&path)).unwrap().abandon();
        assert!(path.exists());
    }

    #[test]
    fn releasing_a_vanished_temp_file_fails() {
        let artifact = OutputArtifact::resolve(None).unwrap();
        fs::remove_file(artifact.path()).unwrap();

        assert!(matches!(
            artifact.release(),
            Err(AppError::ArtifactRemove { .. })
        ));
    }
}
