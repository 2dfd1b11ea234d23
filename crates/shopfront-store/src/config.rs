//! # Store Configuration
//!
//! Where the catalog lives on disk and how its records are written.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     SHOPFRONT_DATA_DIR=/srv/shop/data                                  │
//! │     SHOPFRONT_LOCALE=fr-FR                                             │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     ~/.config/shopfront/shopfront.toml (Linux)                         │
//! │     ~/Library/Application Support/com.shopfront.shopfront/ (macOS)     │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! │     ./data, ./reports, ./temp, ',' delimiter, en-GB                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! [folders]
//! data = "data"
//! reports = "reports"
//! temp = "temp"
//!
//! [files]
//! product_prefix = "product"
//! review_file = "reviews{id}.txt"
//! report_file = "product{id}_{client}_report.txt"
//!
//! [format]
//! delimiter = ","
//! default_locale = "en-GB"
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use shopfront_core::codec::{LineCodec, DEFAULT_DELIMITER};
use shopfront_core::{CoreError, ProductId, ValidationError};

use crate::error::{StoreError, StoreResult};
use crate::locale::Locale;

// =============================================================================
// Folder Settings
// =============================================================================

/// The three working folders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FolderSettings {
    /// Product and review files, read by `load_all`, written by `save_all`.
    #[serde(default = "default_data_folder")]
    pub data: PathBuf,

    /// Generated per-product reports.
    #[serde(default = "default_reports_folder")]
    pub reports: PathBuf,

    /// Snapshot dump/restore.
    #[serde(default = "default_temp_folder")]
    pub temp: PathBuf,
}

fn default_data_folder() -> PathBuf {
    PathBuf::from("data")
}

fn default_reports_folder() -> PathBuf {
    PathBuf::from("reports")
}

fn default_temp_folder() -> PathBuf {
    PathBuf::from("temp")
}

impl Default for FolderSettings {
    fn default() -> Self {
        FolderSettings {
            data: default_data_folder(),
            reports: default_reports_folder(),
            temp: default_temp_folder(),
        }
    }
}

// =============================================================================
// File Naming Settings
// =============================================================================

/// File name rules. `{id}` and `{client}` are substituted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileSettings {
    /// Files in the data folder whose name starts with this are products.
    #[serde(default = "default_product_prefix")]
    pub product_prefix: String,

    /// Pattern for a product's own record file, used by `save_all`.
    #[serde(default = "default_product_file")]
    pub product_file: String,

    /// Pattern for a product's review file.
    #[serde(default = "default_review_file")]
    pub review_file: String,

    /// Pattern for a generated report.
    #[serde(default = "default_report_file")]
    pub report_file: String,
}

fn default_product_prefix() -> String {
    "product".to_string()
}

fn default_product_file() -> String {
    "product{id}.txt".to_string()
}

fn default_review_file() -> String {
    "reviews{id}.txt".to_string()
}

fn default_report_file() -> String {
    "product{id}_{client}_report.txt".to_string()
}

impl Default for FileSettings {
    fn default() -> Self {
        FileSettings {
            product_prefix: default_product_prefix(),
            product_file: default_product_file(),
            review_file: default_review_file(),
            report_file: default_report_file(),
        }
    }
}

impl FileSettings {
    pub fn product_file_name(&self, id: ProductId) -> String {
        self.product_file.replace("{id}", &id.to_string())
    }

    pub fn review_file_name(&self, id: ProductId) -> String {
        self.review_file.replace("{id}", &id.to_string())
    }

    /// Report file name for `client`.
    ///
    /// The client name ends up inside a path, so it must be a plain name:
    /// not empty, no path separators, no `..` and no NUL.
    pub fn report_file_name(&self, id: ProductId, client: &str) -> StoreResult<String> {
        validate_client_name(client)?;
        Ok(self
            .report_file
            .replace("{id}", &id.to_string())
            .replace("{client}", client))
    }

    /// The id in a review file name, if `name` follows the review pattern.
    pub fn review_file_id(&self, name: &str) -> Option<ProductId> {
        let (prefix, suffix) = self.review_file.split_once("{id}")?;
        let digits = name.strip_prefix(prefix)?.strip_suffix(suffix)?;
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        digits.parse().ok()
    }
}

fn validate_client_name(client: &str) -> StoreResult<()> {
    let reason = if client.trim().is_empty() {
        Some("must not be empty")
    } else if client.contains(['/', '\\']) {
        Some("must not contain path separators")
    } else if client.contains("..") {
        Some("must not contain '..'")
    } else if client.contains('\0') {
        Some("must not contain NUL")
    } else {
        None
    };

    match reason {
        Some(reason) => Err(StoreError::Core(CoreError::Validation(
            ValidationError::InvalidFormat {
                field: "client".to_string(),
                reason: reason.to_string(),
            },
        ))),
        None => Ok(()),
    }
}

// =============================================================================
// Record Format Settings
// =============================================================================

/// Record delimiter and presentation defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormatSettings {
    /// Field delimiter for product and review records.
    #[serde(default = "default_delimiter")]
    pub delimiter: char,

    /// Locale used when a caller does not name one.
    #[serde(default = "default_locale")]
    pub default_locale: String,
}

fn default_delimiter() -> char {
    DEFAULT_DELIMITER
}

fn default_locale() -> String {
    Locale::default().tag().to_string()
}

impl Default for FormatSettings {
    fn default() -> Self {
        FormatSettings {
            delimiter: default_delimiter(),
            default_locale: default_locale(),
        }
    }
}

// =============================================================================
// Main Store Configuration
// =============================================================================

/// Complete store configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreConfig {
    #[serde(default)]
    pub folders: FolderSettings,

    #[serde(default)]
    pub files: FileSettings,

    #[serde(default)]
    pub format: FormatSettings,
}

impl StoreConfig {
    /// Defaults, with all three folders placed under `root`.
    ///
    /// ## Usage
    /// ```rust
    /// use shopfront_store::StoreConfig;
    ///
    /// let config = StoreConfig::with_root("/srv/shop");
    /// assert_eq!(config.folders.data, std::path::Path::new("/srv/shop/data"));
    /// ```
    pub fn with_root(root: impl AsRef<Path>) -> Self {
        let root = root.as_ref();
        let mut config = Self::default();
        config.folders = FolderSettings {
            data: root.join(default_data_folder()),
            reports: root.join(default_reports_folder()),
            temp: root.join(default_temp_folder()),
        };
        config
    }

    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (shopfront.toml)
    /// 3. Environment variables
    pub fn load(config_path: Option<PathBuf>) -> StoreResult<Self> {
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading store config from file");
                let contents =
                    std::fs::read_to_string(&path).map_err(|e| StoreError::io(&path, e))?;
                config = toml::from_str(&contents)?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// Saves configuration to file.
    pub fn save(&self, config_path: Option<PathBuf>) -> StoreResult<()> {
        let path = config_path
            .or_else(Self::default_config_path)
            .ok_or_else(|| StoreError::Config("No config path available".into()))?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| StoreError::io(parent, e))?;
        }

        let contents = toml::to_string_pretty(self)?;
        std::fs::write(&path, contents).map_err(|e| StoreError::io(&path, e))?;

        info!(?path, "Store config saved");
        Ok(())
    }

    /// Validates the configuration.
    pub fn validate(&self) -> StoreResult<()> {
        let delimiter = self.format.delimiter;
        // digits, '.', '-' and whitespace all occur inside prices and dates
        if delimiter.is_ascii_digit() || delimiter.is_whitespace() || matches!(delimiter, '.' | '-')
        {
            return Err(StoreError::Config(format!(
                "delimiter {:?} would collide with record contents",
                delimiter
            )));
        }

        if self.files.product_prefix.is_empty() {
            return Err(StoreError::Config(
                "product_prefix must not be empty".into(),
            ));
        }

        for (name, pattern) in [
            ("product_file", &self.files.product_file),
            ("review_file", &self.files.review_file),
            ("report_file", &self.files.report_file),
        ] {
            if !pattern.contains("{id}") {
                return Err(StoreError::Config(format!(
                    "{} must contain {{id}}, got: {}",
                    name, pattern
                )));
            }
        }

        if !self
            .files
            .product_file
            .starts_with(&self.files.product_prefix)
        {
            return Err(StoreError::Config(
                "product_file must start with product_prefix or saved catalogs cannot be loaded"
                    .into(),
            ));
        }

        if self
            .files
            .review_file
            .starts_with(&self.files.product_prefix)
        {
            return Err(StoreError::Config(
                "review_file must not start with product_prefix".into(),
            ));
        }

        if Locale::from_tag(&self.format.default_locale).is_none() {
            warn!(
                locale = %self.format.default_locale,
                "Unsupported default locale, reports will fall back to {}",
                Locale::default().tag()
            );
        }

        Ok(())
    }

    /// Applies environment variable overrides.
    fn apply_env_overrides(&mut self) {
        if let Ok(dir) = std::env::var("SHOPFRONT_DATA_DIR") {
            debug!(dir = %dir, "Overriding data folder from environment");
            self.folders.data = PathBuf::from(dir);
        }

        if let Ok(dir) = std::env::var("SHOPFRONT_REPORTS_DIR") {
            debug!(dir = %dir, "Overriding reports folder from environment");
            self.folders.reports = PathBuf::from(dir);
        }

        if let Ok(dir) = std::env::var("SHOPFRONT_TEMP_DIR") {
            debug!(dir = %dir, "Overriding temp folder from environment");
            self.folders.temp = PathBuf::from(dir);
        }

        if let Ok(tag) = std::env::var("SHOPFRONT_LOCALE") {
            debug!(locale = %tag, "Overriding default locale from environment");
            self.format.default_locale = tag;
        }

        if let Ok(delimiter) = std::env::var("SHOPFRONT_DELIMITER") {
            let mut chars = delimiter.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => {
                    debug!(delimiter = %c, "Overriding delimiter from environment");
                    self.format.delimiter = c;
                }
                _ => warn!(delimiter = %delimiter, "Delimiter must be one character, ignoring"),
            }
        }
    }

    /// Returns the default config file path.
    fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "shopfront", "shopfront")
            .map(|dirs| dirs.config_dir().join("shopfront.toml"))
    }

    // =========================================================================
    // Convenience Methods
    // =========================================================================

    /// Codec for the configured delimiter.
    pub fn codec(&self) -> LineCodec {
        LineCodec::new(self.format.delimiter)
    }

    /// The configured default locale (en-GB if unsupported).
    pub fn default_locale(&self) -> Locale {
        Locale::from_tag_or_default(&self.format.default_locale)
    }
}
