//! Configuration file support for wrapgen.
//!
//! wrapgen supports two configuration file locations:
//! - Global: `~/.wrapgen/config.toml` - User-wide defaults
//! - Project: `.wrapgen/config.toml` - Project-specific overrides
//!
//! Project config takes precedence over global config.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// wrapgen configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// C metadata translation settings
    pub parser: ParserConfig,
}

/// Where class (static) methods of a C class end up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClassMethodPlacement {
    /// In the class's own class-method list
    #[default]
    Separate,
    /// Mixed into the instance-method list, for backends written against
    /// the legacy layout
    Instance,
}

/// Settings of the C metadata translator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserConfig {
    /// Top namespace, in snake_case (e.g. `linphone`)
    pub namespace: String,

    /// C container spelling translated to a list type
    pub list_type: String,

    /// The library's boolean spelling
    pub bool_type: String,

    /// Type names handled as base types
    pub base_types: Vec<String>,

    /// Placement of class methods
    pub class_methods: ClassMethodPlacement,
}

impl Default for ParserConfig {
    fn default() -> Self {
        ParserConfig {
            namespace: "linphone".to_string(),
            list_type: "bctbx_list_t".to_string(),
            bool_type: "bool_t".to_string(),
            base_types: [
                "void", "bool_t", "char", "short", "int", "long", "size_t", "time_t", "float",
                "double",
            ]
            .into_iter()
            .map(String::from)
            .collect(),
            class_methods: ClassMethodPlacement::Separate,
        }
    }
}

/// Optional overrides of [`ParserConfig`], as read from a single file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
struct PartialConfig {
    parser: PartialParserConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
struct PartialParserConfig {
    namespace: Option<String>,
    list_type: Option<String>,
    bool_type: Option<String>,
    base_types: Option<Vec<String>>,
    class_methods: Option<ClassMethodPlacement>,
}

impl Config {
    /// Load configuration from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let mut config = Config::default();
        config.merge_file(path)?;
        Ok(config)
    }

    /// Load configuration with fallback to defaults if file doesn't exist.
    pub fn load_or_default(path: &Path) -> Self {
        if path.exists() {
            Self::load(path).unwrap_or_else(|e| {
                tracing::warn!("Failed to load config from {}: {}", path.display(), e);
                Self::default()
            })
        } else {
            Self::default()
        }
    }

    /// Overlay the settings present in `path` (settings it omits are kept).
    pub fn merge_file(&mut self, path: &Path) -> Result<()> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;

        let partial: PartialConfig = toml::from_str(&contents)
            .with_context(|| format!("failed to parse config file: {}", path.display()))?;

        self.merge(partial);
        Ok(())
    }

    fn merge(&mut self, other: PartialConfig) {
        let parser = other.parser;
        if let Some(namespace) = parser.namespace {
            self.parser.namespace = namespace;
        }
        if let Some(list_type) = parser.list_type {
            self.parser.list_type = list_type;
        }
        if let Some(bool_type) = parser.bool_type {
            self.parser.bool_type = bool_type;
        }
        if let Some(base_types) = parser.base_types {
            self.parser.base_types = base_types;
        }
        if let Some(class_methods) = parser.class_methods {
            self.parser.class_methods = class_methods;
        }
    }
}

/// Load merged configuration from global and project locations.
///
/// Order of precedence (highest to lowest):
/// 1. Project config (.wrapgen/config.toml)
/// 2. Global config (~/.wrapgen/config.toml)
/// 3. Defaults
pub fn load_config(global_path: &Path, project_path: &Path) -> Config {
    let mut config = Config::default();

    for path in [global_path, project_path] {
        if path.exists() {
            if let Err(e) = config.merge_file(path) {
                tracing::warn!("Failed to load config from {}: {:#}", path.display(), e);
            }
        }
    }

    config
}

/// Get the global wrapgen config directory (~/.wrapgen).
pub fn global_config_dir() -> Option<PathBuf> {
    directories::BaseDirs::new().map(|b| b.home_dir().join(".wrapgen"))
}

/// Get the global config path (~/.wrapgen/config.toml).
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("config.toml"))
}

/// Get the project config path (.wrapgen/config.toml).
pub fn project_config_path(project_root: &Path) -> PathBuf {
    project_root.join(".wrapgen").join("config.toml")
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.parser.namespace, "linphone");
        assert_eq!(config.parser.list_type, "bctbx_list_t");
        assert_eq!(config.parser.bool_type, "bool_t");
        assert!(config.parser.base_types.iter().any(|t| t == "time_t"));
        assert_eq!(config.parser.class_methods, ClassMethodPlacement::Separate);
    }

    #[test]
    fn test_config_load() {
        let tmp = TempDir::new().unwrap();
        let config_path = tmp.path().join("config.toml");

        std::fs::write(
            &config_path,
            r#"
[parser]
namespace = "belle_sip"
list_type = "belle_sip_list_t"
class_methods = "instance"
"#,
        )
        .unwrap();

        let config = Config::load(&config_path).unwrap();
        assert_eq!(config.parser.namespace, "belle_sip");
        assert_eq!(config.parser.list_type, "belle_sip_list_t");
        assert_eq!(config.parser.class_methods, ClassMethodPlacement::Instance);
        // untouched settings keep their defaults
        assert_eq!(config.parser.bool_type, "bool_t");
    }

    #[test]
    fn test_config_load_or_default_on_bad_file() {
        let tmp = TempDir::new().unwrap();
        let config_path = tmp.path().join("config.toml");
        std::fs::write(&config_path, "[parser\nnamespace = ").unwrap();

        let config = Config::load_or_default(&config_path);
        assert_eq!(config.parser, ParserConfig::default());

        let missing = Config::load_or_default(&tmp.path().join("missing.toml"));
        assert_eq!(missing.parser, ParserConfig::default());
    }

    #[test]
    fn test_load_config_precedence() {
        let tmp = TempDir::new().unwrap();
        let global_path = tmp.path().join("global.toml");
        let project_path = tmp.path().join("project.toml");

        std::fs::write(
            &global_path,
            r#"
[parser]
namespace = "belcard"
bool_type = "bool"
"#,
        )
        .unwrap();

        std::fs::write(
            &project_path,
            r#"
[parser]
namespace = "linphone"
"#,
        )
        .unwrap();

        let config = load_config(&global_path, &project_path);
        assert_eq!(config.parser.namespace, "linphone");
        assert_eq!(config.parser.bool_type, "bool");
    }

    #[test]
    fn test_project_config_path() {
        let path = project_config_path(Path::new("/work/liblinphone"));
        assert_eq!(path, PathBuf::from("/work/liblinphone/.wrapgen/config.toml"));
    }
}
