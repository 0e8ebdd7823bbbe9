//! Configuration loading and root folder resolution
//!
//! Bootstrap settings come from an optional TOML file. A missing file is not
//! an error: every field has a compiled default.
//!
//! Root folder priority:
//! 1. Command-line argument (highest priority)
//! 2. `PDEX_ROOT_FOLDER` environment variable
//! 3. TOML config file `root_folder`
//! 4. OS-dependent compiled default (fallback)

use crate::store::CatalogStores;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Environment variable overriding the root folder
pub const ROOT_FOLDER_ENV: &str = "PDEX_ROOT_FOLDER";

/// Bootstrap configuration loaded from TOML file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    /// Root folder holding the three stores (optional)
    #[serde(default)]
    pub root_folder: Option<PathBuf>,

    /// HTTP server port
    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default)]
    pub logging: LoggingConfig,

    #[serde(default)]
    pub fetch: FetchSettings,

    #[serde(default)]
    pub stores: StoreOverrides,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log file path (optional, logs to stderr if not specified)
    #[serde(default)]
    pub file: Option<PathBuf>,
}

/// Remote fetch tuning
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetchSettings {
    /// Timeout for the target page request
    #[serde(default = "default_page_timeout_secs")]
    pub page_timeout_secs: u64,

    /// Timeout for each candidate image request
    #[serde(default = "default_image_timeout_secs")]
    pub image_timeout_secs: u64,

    /// Downloads smaller than this are treated as favicons/spacers
    #[serde(default = "default_min_image_bytes")]
    pub min_image_bytes: usize,

    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Prefix used for staged filenames when the caller gives none
    #[serde(default = "default_prefix")]
    pub default_prefix: String,
}

/// Optional per-store directory overrides (relative paths resolve against root)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StoreOverrides {
    #[serde(default)]
    pub canonical: Option<PathBuf>,
    #[serde(default)]
    pub staging: Option<PathBuf>,
    #[serde(default)]
    pub metadata: Option<PathBuf>,
}

fn default_port() -> u16 {
    5731
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_page_timeout_secs() -> u64 {
    10
}

fn default_image_timeout_secs() -> u64 {
    5
}

fn default_min_image_bytes() -> usize {
    10 * 1024
}

fn default_user_agent() -> String {
    "Mozilla/5.0".to_string()
}

fn default_prefix() -> String {
    "auto_img".to_string()
}

impl Default for TomlConfig {
    fn default() -> Self {
        Self {
            root_folder: None,
            port: default_port(),
            logging: LoggingConfig::default(),
            fetch: FetchSettings::default(),
            stores: StoreOverrides::default(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file: None,
        }
    }
}

impl Default for FetchSettings {
    fn default() -> Self {
        Self {
            page_timeout_secs: default_page_timeout_secs(),
            image_timeout_secs: default_image_timeout_secs(),
            min_image_bytes: default_min_image_bytes(),
            user_agent: default_user_agent(),
            default_prefix: default_prefix(),
        }
    }
}

impl TomlConfig {
    /// Parse a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("Read TOML failed ({}): {}", path.display(), e)))?;
        toml::from_str(&content)
            .map_err(|e| Error::Config(format!("Parse TOML failed ({}): {}", path.display(), e)))
    }

    /// Load the explicit file if given, else the platform config file if present,
    /// else compiled defaults
    pub fn load_or_default(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            info!("Loading config from {}", path.display());
            return Self::load(path);
        }

        match default_config_file() {
            Some(path) => {
                info!("Loading config from {}", path.display());
                Self::load(&path)
            }
            None => {
                warn!("No config file found, using compiled defaults");
                Ok(Self::default())
            }
        }
    }

    /// Store handles for the resolved root folder, honoring overrides
    pub fn stores(&self, root: &Path) -> CatalogStores {
        let defaults = CatalogStores::under_root(root);
        let pick = |over: &Option<PathBuf>, default: PathBuf| match over {
            Some(p) if p.is_absolute() => p.clone(),
            Some(p) => root.join(p),
            None => default,
        };

        CatalogStores::new(
            pick(&self.stores.canonical, defaults.canonical),
            pick(&self.stores.staging, defaults.staging),
            pick(&self.stores.metadata, defaults.metadata),
        )
    }
}

/// Root folder resolution
pub struct RootFolderResolver {
    cli_arg: Option<PathBuf>,
    toml_root: Option<PathBuf>,
}

impl RootFolderResolver {
    pub fn new(cli_arg: Option<PathBuf>, config: &TomlConfig) -> Self {
        Self {
            cli_arg,
            toml_root: config.root_folder.clone(),
        }
    }

    /// Resolve following the priority order in the module docs
    pub fn resolve(&self) -> PathBuf {
        if let Some(path) = &self.cli_arg {
            info!("Root folder from command line: {}", path.display());
            return path.clone();
        }

        if let Ok(path) = std::env::var(ROOT_FOLDER_ENV) {
            if !path.trim().is_empty() {
                info!("Root folder from {}: {}", ROOT_FOLDER_ENV, path);
                return PathBuf::from(path);
            }
        }

        if let Some(path) = &self.toml_root {
            info!("Root folder from TOML config: {}", path.display());
            return path.clone();
        }

        let path = default_root_folder();
        info!("Root folder from compiled default: {}", path.display());
        path
    }
}

/// Platform config file location, if one exists
fn default_config_file() -> Option<PathBuf> {
    let user_config = dirs::config_dir().map(|d| d.join("pdex").join("config.toml"));
    if let Some(path) = user_config {
        if path.exists() {
            return Some(path);
        }
    }

    if cfg!(target_os = "linux") {
        let system_config = PathBuf::from("/etc/pdex/config.toml");
        if system_config.exists() {
            return Some(system_config);
        }
    }

    None
}

/// OS-dependent default root folder path
pub fn default_root_folder() -> PathBuf {
    dirs::data_local_dir()
        .map(|d| d.join("pdex"))
        .unwrap_or_else(|| PathBuf::from("./pdex_data"))
}
