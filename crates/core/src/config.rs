use crate::types::CfMode;
use serde::Deserialize;

/// Root application configuration. Loaded from environment variables
/// with the prefix `CINEMATCH__`.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    #[serde(default = "default_data_dir")]
    pub data_dir: String,
    #[serde(default)]
    pub content: ContentConfig,
    #[serde(default)]
    pub cf: CfConfig,
}

/// Content similarity engine settings.
#[derive(Debug, Clone, Deserialize)]
pub struct ContentConfig {
    /// Vocabulary cap for the TF-IDF model.
    #[serde(default = "default_max_features")]
    pub max_features: usize,
}

/// Collaborative filtering engine settings.
#[derive(Debug, Clone, Deserialize)]
pub struct CfConfig {
    #[serde(default = "default_cf_mode")]
    pub mode: CfMode,
    /// Neighborhood size for rating prediction.
    #[serde(default = "default_neighbors")]
    pub neighbors: usize,
    /// Minimum predicted rating for a movie to be recommended.
    #[serde(default = "default_min_predicted")]
    pub min_predicted: f64,
}

// Default functions
fn default_data_dir() -> String {
    "data".to_string()
}
fn default_max_features() -> usize {
    1000
}
fn default_cf_mode() -> CfMode {
    CfMode::UserBased
}
fn default_neighbors() -> usize {
    50
}
fn default_min_predicted() -> f64 {
    3.0
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            max_features: default_max_features(),
        }
    }
}

impl Default for CfConfig {
    fn default() -> Self {
        Self {
            mode: default_cf_mode(),
            neighbors: default_neighbors(),
            min_predicted: default_min_predicted(),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            content: ContentConfig::default(),
            cf: CfConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self, config::ConfigError> {
        let builder = config::Config::builder().add_source(
            config::Environment::with_prefix("CINEMATCH")
                .separator("__")
                .try_parsing(true)
                .list_separator(","),
        );

        let config = builder.build()?;
        config.try_deserialize()
    }
}
