use std::{
    fs,
    io::{BufWriter, Write},
    path::{Path, PathBuf},
};

use eyre::{Context, Result, eyre};

#[derive(Debug, Clone, PartialEq, Eq)]
enum StagedState {
    /// Created in the staging directory and accepting writes.
    Open,
    /// Fully written and flushed, still in the staging directory.
    Closed,
    /// Moved to its destination; no longer owned by the stage.
    Relocated(PathBuf),
    /// Removed from the staging directory.
    Discarded,
}

/// A generated file written in a staging directory before it is known that
/// the whole run succeeds.
///
/// The file is either relocated into its destination tree or discarded;
/// nothing is written at the destination until [`StagedFile::relocate`].
#[derive(Debug)]
pub struct StagedFile {
    path: PathBuf,
    file_name: String,
    writer: Option<BufWriter<fs::File>>,
    state: StagedState,
}

impl StagedFile {
    /// Create (or truncate) `file_name` inside `dir`.
    pub fn create(dir: &Path, file_name: impl Into<String>) -> Result<Self> {
        let file_name = file_name.into();
        fs::create_dir_all(dir)
            .wrap_err_with(|| format!("failed to create staging directory '{}'", dir.display()))?;

        let path = dir.join(&file_name);
        let file = fs::File::create(&path)
            .wrap_err_with(|| format!("failed to create '{}'", path.display()))?;
        tracing::debug!(path = %path.display(), "staged file created");

        Ok(Self {
            path,
            file_name,
            writer: Some(BufWriter::new(file)),
            state: StagedState::Open,
        })
    }

    /// Path of the file in the staging directory.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Bare file name, reused at the destination.
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// Append text to the file.
    pub fn write_str(&mut self, text: &str) -> Result<()> {
        let writer = self
            .writer
            .as_mut()
            .ok_or_else(|| eyre!("'{}' is not open for writing", self.path.display()))?;
        writer
            .write_all(text.as_bytes())
            .wrap_err_with(|| format!("failed to write '{}'", self.path.display()))
    }

    /// Flush and close the file, keeping it in the staging directory.
    pub fn close(&mut self) -> Result<()> {
        if let Some(mut writer) = self.writer.take() {
            writer
                .flush()
                .wrap_err_with(|| format!("failed to flush '{}'", self.path.display()))?;
            self.state = StagedState::Closed;
        }
        Ok(())
    }

    /// Remove the staged file. Safe to call any number of times.
    pub fn discard(&mut self) -> Result<()> {
        match self.state {
            StagedState::Relocated(_) | StagedState::Discarded => return Ok(()),
            StagedState::Open | StagedState::Closed => {}
        }

        // Unflushed content is irrelevant, the file is going away.
        drop(self.writer.take());

        match fs::remove_file(&self.path) {
            Ok(()) => {}
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => {
                return Err(e)
                    .wrap_err_with(|| format!("failed to remove '{}'", self.path.display()));
            }
        }
        tracing::debug!(path = %self.path.display(), "staged file removed");
        self.state = StagedState::Discarded;
        Ok(())
    }

    /// Move the file into `dest_dir`, replacing any file of the same name.
    ///
    /// Returns the final path.
    pub fn relocate(&mut self, dest_dir: &Path) -> Result<PathBuf> {
        match &self.state {
            StagedState::Relocated(target) => return Ok(target.clone()),
            StagedState::Discarded => {
                return Err(eyre!(
                    "'{}' was discarded and cannot be relocated",
                    self.path.display()
                ));
            }
            StagedState::Open | StagedState::Closed => {}
        }
        self.close()?;

        fs::create_dir_all(dest_dir).wrap_err_with(|| {
            format!(
                "failed to create destination directory '{}'",
                dest_dir.display()
            )
        })?;

        let target = dest_dir.join(&self.file_name);
        if self.is_at(&target)? {
            tracing::debug!(path = %target.display(), "staged file already at destination");
            self.state = StagedState::Relocated(target.clone());
            return Ok(target);
        }

        if fs::rename(&self.path, &target).is_err() {
            // rename fails across filesystems; fall back to copy + remove.
            if target.exists() {
                fs::remove_file(&target)
                    .wrap_err_with(|| format!("failed to replace '{}'", target.display()))?;
            }
            fs::copy(&self.path, &target).wrap_err_with(|| {
                format!(
                    "failed to move '{}' to '{}'",
                    self.path.display(),
                    target.display()
                )
            })?;
            fs::remove_file(&self.path)
                .wrap_err_with(|| format!("failed to remove '{}'", self.path.display()))?;
        }

        tracing::debug!(from = %self.path.display(), to = %target.display(), "file relocated");
        self.state = StagedState::Relocated(target.clone());
        Ok(target)
    }

    /// Whether `target` names the staged file itself.
    fn is_at(&self, target: &Path) -> Result<bool> {
        if !target.exists() {
            return Ok(false);
        }
        let staged = fs::canonicalize(&self.path)
            .wrap_err_with(|| format!("failed to resolve '{}'", self.path.display()))?;
        let target = fs::canonicalize(target)
            .wrap_err_with(|| format!("failed to resolve '{}'", target.display()))?;
        Ok(staged == target)
    }
}
