//! Configuration management for Quill.
//!
//! Parses `quill.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! CLI settings can be applied during load via [`CliSettings`].
//!
//! ## Environment Variable Expansion
//!
//! String configuration values support environment variable expansion:
//!
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default
//!
//! Expanded fields:
//! - `html.block_id_prefix`
//! - `export.formatting`
//! - `citations.start_date`
//! - `citations.end_date`
//! - `citations.sort_by`
//!
//! ## Example
//!
//! ```toml
//! [html]
//! block_id_prefix = "Section"
//!
//! [export]
//! formatting = "two-column-layout"
//!
//! [citations]
//! start_date = "${REPORT_START:-2018}"
//! end_date = "2021/12/31"
//! sort_by = "date_reverse"
//! ```

mod expand;

use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use quill_citations::{
    CitationFilter, DEFAULT_ENTRY_CLASS, DEFAULT_MARKER_TAG, SortOrder, parse_date_bound,
};
use quill_export::FormattingMode;
use serde::Deserialize;

use crate::expand::{expand_env, expand_opt};

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override the heading anchor prefix.
    pub block_id_prefix: Option<String>,
    /// Override the default export formatting mode.
    pub formatting: Option<String>,
    /// Override the citation range start.
    pub start_date: Option<String>,
    /// Override the citation range end.
    pub end_date: Option<String>,
    /// Override the citation sort order.
    pub sort_by: Option<String>,
}

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "quill.toml";

/// Application configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// HTML rendering configuration.
    pub html: HtmlConfig,
    /// Paragraph export configuration.
    pub export: ExportConfig,
    /// Citation list configuration.
    pub citations: CitationsConfig,

    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

/// HTML rendering configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct HtmlConfig {
    /// Prefix placed before the block id in heading anchors.
    pub block_id_prefix: String,
}

impl Default for HtmlConfig {
    fn default() -> Self {
        Self {
            block_id_prefix: "Section".to_owned(),
        }
    }
}

/// Paragraph export configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    /// Formatting mode for blocks that don't name one.
    pub formatting: String,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            formatting: FormattingMode::None.as_str().to_owned(),
        }
    }
}

impl ExportConfig {
    /// Parsed formatting mode. Unknown names resolve to `none`.
    #[must_use]
    pub fn formatting_mode(&self) -> FormattingMode {
        FormattingMode::from(self.formatting.clone())
    }
}

/// Citation list configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct CitationsConfig {
    /// Element name carrying the citation payload.
    pub marker_tag: String,
    /// Class of bibliography entry elements.
    pub entry_class: String,
    /// Inclusive range start, `YYYY[/MM[/DD]]`.
    pub start_date: Option<String>,
    /// Inclusive range end, `YYYY[/MM[/DD]]`.
    pub end_date: Option<String>,
    /// One of `none`, `date`, `date_reverse`.
    pub sort_by: String,
}

impl Default for CitationsConfig {
    fn default() -> Self {
        Self {
            marker_tag: DEFAULT_MARKER_TAG.to_owned(),
            entry_class: DEFAULT_ENTRY_CLASS.to_owned(),
            start_date: None,
            end_date: None,
            sort_by: SortOrder::None.as_str().to_owned(),
        }
    }
}

impl CitationsConfig {
    /// Build the date filter described by this section.
    ///
    /// Blank bounds count as unset.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` for malformed dates or an unknown
    /// sort order.
    pub fn filter(&self) -> Result<CitationFilter, ConfigError> {
        let start = parse_bound(self.start_date.as_deref(), "citations.start_date")?;
        let end = parse_bound(self.end_date.as_deref(), "citations.end_date")?;
        let sort = self
            .sort_by
            .parse::<SortOrder>()
            .map_err(|e| ConfigError::Validation(format!("citations.sort_by: {e}")))?;

        if let (Some(start), Some(end)) = (start, end)
            && start > end
        {
            return Err(ConfigError::Validation(
                "citations.start_date must not be after citations.end_date".to_owned(),
            ));
        }

        Ok(CitationFilter::default()
            .with_start(start)
            .with_end(end)
            .with_sort(sort))
    }
}

fn parse_bound(
    value: Option<&str>,
    field: &str,
) -> Result<Option<NaiveDate>, ConfigError> {
    match value.map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => parse_date_bound(value)
            .map(Some)
            .map_err(|e| ConfigError::Validation(format!("{field}: {e}"))),
    }
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`citations.start_date`").
        field: String,
        /// Error message (e.g., "${`REPORT_START`} not set").
        message: String,
    },
}

/// Require a string field to be non-empty.
fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.trim().is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

/// Require a string field to be usable as an element or class name.
fn require_name(value: &str, field: &str) -> Result<(), ConfigError> {
    require_non_empty(value, field)?;
    if value.chars().any(|c| c.is_whitespace() || matches!(c, '<' | '>' | '"' | '\'')) {
        return Err(ConfigError::Validation(format!(
            "{field} must not contain whitespace, quotes or angle brackets"
        )));
    }
    Ok(())
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `quill.toml` in current directory and parents,
    /// falling back to defaults when none is found.
    ///
    /// CLI settings are applied after loading and the result is validated
    /// again, so overrides are held to the same rules as file values.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist, parsing fails,
    /// or a value is invalid.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = Self::discover_config() {
            Self::load_from_file(&discovered)?
        } else {
            Self::default()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
            config.validate()?;
        }

        Ok(config)
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(prefix) = &settings.block_id_prefix {
            self.html.block_id_prefix.clone_from(prefix);
        }
        if let Some(formatting) = &settings.formatting {
            self.export.formatting.clone_from(formatting);
        }
        if let Some(start_date) = &settings.start_date {
            self.citations.start_date = Some(start_date.clone());
        }
        if let Some(end_date) = &settings.end_date {
            self.citations.end_date = Some(end_date.clone());
        }
        if let Some(sort_by) = &settings.sort_by {
            self.citations.sort_by.clone_from(sort_by);
        }
    }

    /// Search for config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let cwd = std::env::current_dir().ok()?;
        Self::discover_from(&cwd)
    }

    /// Search for config file in `start` and its parents.
    fn discover_from(start: &Path) -> Option<PathBuf> {
        let mut current = start.to_path_buf();
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        config.expand_env_vars()?;
        config.config_path = Some(path.to_path_buf());
        config.validate()?;

        Ok(config)
    }

    /// Expand environment variables in string fields.
    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        self.html.block_id_prefix = expand_env(&self.html.block_id_prefix, "html.block_id_prefix")?;
        self.export.formatting = expand_env(&self.export.formatting, "export.formatting")?;
        expand_opt(&mut self.citations.start_date, "citations.start_date")?;
        expand_opt(&mut self.citations.end_date, "citations.end_date")?;
        self.citations.sort_by = expand_env(&self.citations.sort_by, "citations.sort_by")?;
        Ok(())
    }

    /// Validate configuration values.
    ///
    /// Called automatically after loading from file.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_html()?;
        self.validate_citations()?;
        Ok(())
    }

    fn validate_html(&self) -> Result<(), ConfigError> {
        if self.html.block_id_prefix.chars().any(char::is_whitespace) {
            return Err(ConfigError::Validation(
                "html.block_id_prefix must not contain whitespace".to_owned(),
            ));
        }
        Ok(())
    }

    fn validate_citations(&self) -> Result<(), ConfigError> {
        require_name(&self.citations.marker_tag, "citations.marker_tag")?;
        require_name(&self.citations.entry_class, "citations.entry_class")?;
        self.citations.filter()?;
        Ok(())
    }
}
