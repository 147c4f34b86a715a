use serde::Deserialize;
use tracing::{debug, instrument};

use refdoc_base::{FilePath, PalHandle, RefdocError, RefdocResult, ResultExt};

/// Name of the configuration file looked up in the working directory.
pub const CONFIG_FILE_NAME: &str = "refdoc.toml";

/// Configuration for a refdoc reference site.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Title of the reference page.
    pub title: String,
    /// Introductory text shown below the title.
    #[serde(default)]
    pub description: String,
    /// Path to the registry document (`.json`, `.yaml` or `.yml`).
    pub registry: String,
    /// URL of the reference page, used as the prefix of navigation anchors.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Output locations.
    #[serde(default)]
    pub output: OutputConfig,
}

/// Where rendered artifacts are written.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OutputConfig {
    /// Path of the standalone HTML page.
    #[serde(default = "default_html_output")]
    pub html: String,
    /// Optional path of a JSON dump of the rendered page tree.
    #[serde(default)]
    pub json: Option<String>,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            html: default_html_output(),
            json: None,
        }
    }
}

fn default_base_url() -> String {
    "/api-reference".to_string()
}

fn default_html_output() -> String {
    "site/api-reference.html".to_string()
}

impl Config {
    /// Path of the registry document.
    pub fn registry_path(&self) -> FilePath {
        FilePath::from(self.registry.as_str())
    }
}

/// Load and parse the configuration file.
#[instrument(skip(pal), fields(path = %path))]
pub fn load_config(pal: &PalHandle, path: &FilePath) -> RefdocResult<Config> {
    let text = pal
        .read_file_to_string(path)
        .with_context(|| format!("Failed to read config file {}", path))?;
    let config = parse_config(&text).with_context(|| format!("Invalid config file {}", path))?;
    debug!(title = %config.title, registry = %config.registry, "config loaded");
    Ok(config)
}

/// Parse configuration from TOML text.
pub fn parse_config(text: &str) -> RefdocResult<Config> {
    let config: Config =
        toml::from_str(text).map_err(|e| Box::new(RefdocError::message(e.to_string())))?;
    if config.registry.trim().is_empty() {
        return Err(Box::new(RefdocError::authoring(
            "registry",
            "registry path must not be empty",
        )));
    }
    Ok(config)
}
