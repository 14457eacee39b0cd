//! The set of files one emitter produces.

use std::path::{Path, PathBuf};

use eyre::{Result, eyre};
use propgen_core::StagedFile;

/// One backend's output: `<class_name>.<ext>` files in the staging directory.
///
/// Exists from `start_files` until it is either relocated or discarded.
#[derive(Debug)]
pub struct Artifact {
    class_name: String,
    staging_dir: PathBuf,
    files: Vec<StagedFile>,
}

impl Artifact {
    pub fn new(class_name: impl Into<String>, staging_dir: impl Into<PathBuf>) -> Self {
        Self {
            class_name: class_name.into(),
            staging_dir: staging_dir.into(),
            files: Vec::new(),
        }
    }

    /// Create `<class_name>.<extension>` in the staging directory.
    pub fn create(&mut self, extension: &str) -> Result<()> {
        let file = StagedFile::create(&self.staging_dir, self.file_name(extension))?;
        self.files.push(file);
        Ok(())
    }

    /// Append text to the part with the given extension.
    pub fn write(&mut self, extension: &str, text: &str) -> Result<()> {
        let file_name = self.file_name(extension);
        let file = self
            .files
            .iter_mut()
            .find(|f| f.file_name() == file_name)
            .ok_or_else(|| eyre!("'{}' has not been started", file_name))?;
        file.write_str(text)
    }

    /// Flush and close every part.
    pub fn close(&mut self) -> Result<()> {
        for file in &mut self.files {
            file.close()?;
        }
        Ok(())
    }

    /// Remove every staged part. Every part is attempted; the first error is returned.
    pub fn discard(&mut self) -> Result<()> {
        let mut first_error = None;
        for file in &mut self.files {
            if let Err(e) = file.discard() {
                tracing::error!(path = %file.path().display(), error = %e, "failed to remove staged file");
                first_error.get_or_insert(e);
            }
        }
        first_error.map_or(Ok(()), Err)
    }

    /// Move every part into `dest_dir`.
    pub fn relocate(&mut self, dest_dir: &Path) -> Result<Vec<PathBuf>> {
        self.files
            .iter_mut()
            .map(|file| file.relocate(dest_dir))
            .collect()
    }

    fn file_name(&self, extension: &str) -> String {
        format!("{}.{}", self.class_name, extension)
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;

    #[test]
    fn test_parts_are_named_after_class() {
        let temp = TempDir::new().unwrap();
        let mut artifact = Artifact::new("PropertyNames", temp.path());

        artifact.create("h").unwrap();
        artifact.create("cpp").unwrap();
        artifact.write("h", "header").unwrap();
        artifact.write("cpp", "source").unwrap();
        artifact.close().unwrap();

        assert_eq!(
            fs::read_to_string(temp.path().join("PropertyNames.h")).unwrap(),
            "header"
        );
        assert_eq!(
            fs::read_to_string(temp.path().join("PropertyNames.cpp")).unwrap(),
            "source"
        );
    }

    #[test]
    fn test_write_to_unknown_part_fails() {
        let temp = TempDir::new().unwrap();
        let mut artifact = Artifact::new("PropertyNames", temp.path());
        assert!(artifact.write("java", "x").is_err());
    }

    #[test]
    fn test_discard_without_files_is_noop() {
        let temp = TempDir::new().unwrap();
        let mut artifact = Artifact::new("PropertyNames", temp.path());
        assert!(artifact.discard().is_ok());
    }

    #[test]
    fn test_discard_removes_all_parts() {
        let temp = TempDir::new().unwrap();
        let mut artifact = Artifact::new("PropertyNames", temp.path());
        artifact.create("h").unwrap();
        artifact.create("cpp").unwrap();

        artifact.discard().unwrap();
        artifact.discard().unwrap();

        assert_eq!(fs::read_dir(temp.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_relocate_moves_all_parts() {
        let temp = TempDir::new().unwrap();
        let staging = temp.path().join("staging");
        let dest = temp.path().join("dest");
        let mut artifact = Artifact::new("PropertyNames", &staging);
        artifact.create("h").unwrap();
        artifact.create("cpp").unwrap();

        let moved = artifact.relocate(&dest).unwrap();

        assert_eq!(
            moved,
            [dest.join("PropertyNames.h"), dest.join("PropertyNames.cpp")]
        );
        assert_eq!(fs::read_dir(&staging).unwrap().count(), 0);
    }
}
