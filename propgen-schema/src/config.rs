//! Project configuration read from `propgen.toml`.
//!
//! The file also marks the project root: generated files are relocated
//! relative to the directory that contains it.

use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use serde::Deserialize;

use crate::{Error, Result, SourceContext};

/// Name of the configuration file marking the project root.
pub const CONFIG_FILE: &str = "propgen.toml";

/// Schema used when none is given on the command line.
pub const DEFAULT_SCHEMA: &str = "config/PropertyNames.xml";

/// Root of `propgen.toml`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProjectConfig {
    #[serde(default)]
    pub generator: GeneratorConfig,

    /// Per-backend overrides, keyed by backend id (`cpp`, `java`, `cs`, `js`).
    #[serde(default)]
    pub backends: IndexMap<String, BackendConfig>,
}

/// `[generator]` table.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GeneratorConfig {
    /// Default schema, relative to the project root.
    #[serde(default = "default_schema")]
    pub schema: PathBuf,

    /// Working directory for in-progress files, relative to the current directory.
    #[serde(default)]
    pub staging: Option<PathBuf>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            schema: default_schema(),
            staging: None,
        }
    }
}

fn default_schema() -> PathBuf {
    PathBuf::from(DEFAULT_SCHEMA)
}

/// `[backends.<id>]` table.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BackendConfig {
    /// Destination directory, relative to the project root.
    pub destination: Option<PathBuf>,

    /// Section allow-list; every section when absent.
    pub sections: Option<Vec<String>>,
}

impl ProjectConfig {
    /// Parse a config from a string with a filename for error reporting.
    pub fn from_str_with_filename(content: &str, filename: &str) -> Result<Self> {
        toml::from_str(content)
            .map_err(|e| SourceContext::new(content, filename).config_error(e))
    }

    /// Get the overrides for a backend.
    pub fn backend(&self, id: &str) -> Option<&BackendConfig> {
        self.backends.get(id)
    }
}

/// A located project: its root directory and configuration.
#[derive(Debug, Clone)]
pub struct Project {
    root: PathBuf,
    config: ProjectConfig,
}

impl Project {
    /// Walk upward from `start` until a directory containing `propgen.toml` is found.
    pub fn discover(start: &Path) -> Result<Self> {
        let root = start
            .ancestors()
            .find(|dir| dir.join(CONFIG_FILE).is_file())
            .ok_or_else(|| {
                Box::new(Error::ProjectRootNotFound {
                    start: start.to_path_buf(),
                    marker: CONFIG_FILE,
                })
            })?;
        tracing::debug!(root = %root.display(), "project root found");
        Self::open(root)
    }

    /// Open a project at a known root. The config file is optional here.
    pub fn open(root: &Path) -> Result<Self> {
        let path = root.join(CONFIG_FILE);
        let config = if path.is_file() {
            let content = std::fs::read_to_string(&path).map_err(|e| {
                Box::new(Error::Io {
                    path: path.clone(),
                    source: e,
                })
            })?;
            ProjectConfig::from_str_with_filename(&content, &path.display().to_string())?
        } else {
            ProjectConfig::default()
        };

        Ok(Self {
            root: root.to_path_buf(),
            config,
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn config(&self) -> &ProjectConfig {
        &self.config
    }

    /// The configured default schema, resolved against the root.
    pub fn schema_path(&self) -> PathBuf {
        self.root.join(&self.config.generator.schema)
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = ProjectConfig::from_str_with_filename("", "propgen.toml").unwrap();
        assert_eq!(config.generator.schema, PathBuf::from(DEFAULT_SCHEMA));
        assert!(config.generator.staging.is_none());
        assert!(config.backends.is_empty());
    }

    #[test]
    fn test_backend_overrides() {
        let config = ProjectConfig::from_str_with_filename(
            r#"
            [generator]
            schema = "schema/Props.xml"
            staging = "target/propgen"

            [backends.js]
            destination = "web/src"
            sections = ["Ice", "IceSSL"]

            [backends.cpp]
            destination = "native/src"
            "#,
            "propgen.toml",
        )
        .unwrap();

        assert_eq!(config.generator.schema, PathBuf::from("schema/Props.xml"));
        assert_eq!(
            config.generator.staging.as_deref(),
            Some(Path::new("target/propgen"))
        );
        let js = config.backend("js").unwrap();
        assert_eq!(js.destination.as_deref(), Some(Path::new("web/src")));
        assert_eq!(
            js.sections.as_deref(),
            Some(&["Ice".to_string(), "IceSSL".to_string()][..])
        );
        assert!(config.backend("cpp").unwrap().sections.is_none());
        assert!(config.backend("java").is_none());
    }

    #[test]
    fn test_unknown_field_is_rejected() {
        let err = ProjectConfig::from_str_with_filename(
            "[backends.js]\ndestinaton = \"x\"\n",
            "propgen.toml",
        )
        .unwrap_err();
        assert!(matches!(*err, Error::Config { .. }));
    }

    #[test]
    fn test_discover_walks_upward() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join(CONFIG_FILE), "").unwrap();
        let nested = temp.path().join("cpp").join("src").join("Ice");
        fs::create_dir_all(&nested).unwrap();

        let project = Project::discover(&nested).unwrap();

        assert_eq!(project.root(), temp.path());
        assert_eq!(
            project.schema_path(),
            temp.path().join("config").join("PropertyNames.xml")
        );
    }

    #[test]
    fn test_discover_without_marker() {
        let temp = TempDir::new().unwrap();
        // Guard against a propgen.toml somewhere above the temp dir.
        if temp.path().ancestors().any(|d| d.join(CONFIG_FILE).is_file()) {
            return;
        }
        let err = Project::discover(temp.path()).unwrap_err();
        assert!(matches!(*err, Error::ProjectRootNotFound { .. }));
    }

    #[test]
    fn test_open_without_config_file() {
        let temp = TempDir::new().unwrap();
        let project = Project::open(temp.path()).unwrap();
        assert!(project.config().backends.is_empty());
    }
}
