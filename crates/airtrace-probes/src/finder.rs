use crate::{Error, Result};
use std::path::{Path, PathBuf};

/// Locates an external command-line tool a probe depends on.
pub struct ToolFinder {
    name: &'static str,
    custom_path: Option<PathBuf>,
    fallback_paths: Vec<PathBuf>,
}

impl ToolFinder {
    /// Look `name` up on `PATH`.
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            custom_path: None,
            fallback_paths: Vec::new(),
        }
    }

    /// Use this path instead of searching.
    pub fn with_custom_path(mut self, path: Option<PathBuf>) -> Self {
        self.custom_path = path;
        self
    }

    /// Extra locations to try when the tool is not on `PATH`.
    pub fn with_fallbacks(mut self, paths: Vec<PathBuf>) -> Self {
        self.fallback_paths = paths;
        self
    }

    pub fn name(&self) -> &str {
        self.name
    }

    /// Find the tool: custom path first, then `PATH`, then fallbacks.
    pub fn find(&self) -> Result<PathBuf> {
        if let Some(ref path) = self.custom_path {
            return self.validate_path(path);
        }

        if let Ok(path) = which::which(self.name) {
            tracing::debug!("Found {} at {}", self.name, path.display());
            return Ok(path);
        }

        for path in &self.fallback_paths {
            if let Ok(valid_path) = self.validate_path(path) {
                tracing::debug!("Found {} at {}", self.name, valid_path.display());
                return Ok(valid_path);
            }
        }

        Err(Error::ToolNotFound(self.name.to_string()))
    }

    /// Validate that a path exists and is executable
    fn validate_path(&self, path: &Path) -> Result<PathBuf> {
        if !path.exists() {
            return Err(Error::ToolNotFound(format!(
                "{} (looked at {})",
                self.name,
                path.display()
            )));
        }

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let metadata = std::fs::metadata(path)?;
            if metadata.permissions().mode() & 0o111 == 0 {
                return Err(Error::ToolNotFound(format!(
                    "{} ({} is not executable)",
                    self.name,
                    path.display()
                )));
            }
        }

        Ok(path.to_path_buf())
    }
}
