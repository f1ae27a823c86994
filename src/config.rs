use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;
use crate::core::{scoring::ReasonThresholds, MatcherSettings};
use crate::models::MatchingWeights;

/// Application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    pub appwrite: AppwriteSettings,
    #[serde(default)]
    pub collection: CollectionSettings,
    pub database: DatabaseSettings,
    #[serde(default)]
    pub matching: MatchingSettings,
    #[serde(default)]
    pub scoring: ScoringSettings,
    #[serde(default)]
    pub notifications: NotificationSettings,
    #[serde(default)]
    pub admin: AdminSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    pub workers: Option<usize>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppwriteSettings {
    pub endpoint: String,
    pub api_key: String,
    pub project_id: String,
    pub database_id: String,
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CollectionSettings {
    #[serde(default = "default_models_collection")]
    pub models: String,
    #[serde(default = "default_castings_collection")]
    pub castings: String,
}

impl Default for CollectionSettings {
    fn default() -> Self {
        Self {
            models: default_models_collection(),
            castings: default_castings_collection(),
        }
    }
}

fn default_models_collection() -> String { "models".to_string() }
fn default_castings_collection() -> String { "castings".to_string() }

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseSettings {
    pub url: String,
    pub max_connections: Option<u32>,
    pub min_connections: Option<u32>,
    pub acquire_timeout_secs: Option<u64>,
    pub idle_timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MatchingSettings {
    #[serde(default = "default_limit")]
    pub default_limit: u16,
    #[serde(default = "default_max_limit")]
    pub max_limit: u16,
    #[serde(default = "default_overfetch_factor")]
    pub overfetch_factor: u32,
    #[serde(default = "default_max_page_size")]
    pub max_page_size: u32,
    #[serde(default = "default_casting_min_score")]
    pub casting_min_score: f64,
    #[serde(default = "default_similar_min_score")]
    pub similar_min_score: f64,
}

impl Default for MatchingSettings {
    fn default() -> Self {
        Self {
            default_limit: default_limit(),
            max_limit: default_max_limit(),
            overfetch_factor: default_overfetch_factor(),
            max_page_size: default_max_page_size(),
            casting_min_score: default_casting_min_score(),
            similar_min_score: default_similar_min_score(),
        }
    }
}

fn default_limit() -> u16 { 20 }
fn default_max_limit() -> u16 { 100 }
fn default_overfetch_factor() -> u32 { 5 }
fn default_max_page_size() -> u32 { 500 }
fn default_casting_min_score() -> f64 { 50.0 }
fn default_similar_min_score() -> f64 { 30.0 }

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ScoringSettings {
    #[serde(default)]
    pub weights: WeightsConfig,
    #[serde(default)]
    pub reasons: ReasonsConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WeightsConfig {
    #[serde(default = "default_demographics_weight")]
    pub demographics: f64,
    #[serde(default = "default_physical_weight")]
    pub physical: f64,
    #[serde(default = "default_professional_weight")]
    pub professional: f64,
    #[serde(default = "default_geographic_weight")]
    pub geographic: f64,
    #[serde(default = "default_specialized_weight")]
    pub specialized: f64,
}

impl Default for WeightsConfig {
    fn default() -> Self {
        Self {
            demographics: default_demographics_weight(),
            physical: default_physical_weight(),
            professional: default_professional_weight(),
            geographic: default_geographic_weight(),
            specialized: default_specialized_weight(),
        }
    }
}

fn default_demographics_weight() -> f64 { 0.20 }
fn default_physical_weight() -> f64 { 0.25 }
fn default_professional_weight() -> f64 { 0.20 }
fn default_geographic_weight() -> f64 { 0.15 }
fn default_specialized_weight() -> f64 { 0.20 }

impl From<&WeightsConfig> for MatchingWeights {
    fn from(config: &WeightsConfig) -> Self {
        Self {
            demographics: config.demographics,
            physical: config.physical,
            professional: config.professional,
            geographic: config.geographic,
            specialized: config.specialized,
        }
    }
}

/// Factor scores above which a match reason is shown
#[derive(Debug, Clone, Deserialize)]
pub struct ReasonsConfig {
    #[serde(default = "default_geographic_reason")]
    pub geographic: f64,
    #[serde(default = "default_demographics_reason")]
    pub demographics: f64,
    #[serde(default = "default_physical_reason")]
    pub physical: f64,
    #[serde(default = "default_professional_reason")]
    pub professional: f64,
    #[serde(default = "default_specialized_reason")]
    pub specialized: f64,
}

impl Default for ReasonsConfig {
    fn default() -> Self {
        Self {
            geographic: default_geographic_reason(),
            demographics: default_demographics_reason(),
            physical: default_physical_reason(),
            professional: default_professional_reason(),
            specialized: default_specialized_reason(),
        }
    }
}

fn default_geographic_reason() -> f64 { 80.0 }
fn default_demographics_reason() -> f64 { 70.0 }
fn default_physical_reason() -> f64 { 60.0 }
fn default_professional_reason() -> f64 { 50.0 }
fn default_specialized_reason() -> f64 { 40.0 }

impl From<&ReasonsConfig> for ReasonThresholds {
    fn from(config: &ReasonsConfig) -> Self {
        Self {
            geographic: config.geographic,
            demographics: config.demographics,
            physical: config.physical,
            professional: config.professional,
            specialized: config.specialized,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct NotificationSettings {
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default = "default_top_n")]
    pub top_n: usize,
    #[serde(default = "default_queue_capacity")]
    pub queue_capacity: usize,
}

impl Default for NotificationSettings {
    fn default() -> Self {
        Self {
            enabled: default_true(),
            top_n: default_top_n(),
            queue_capacity: default_queue_capacity(),
        }
    }
}

fn default_true() -> bool { true }
fn default_top_n() -> usize { 10 }
fn default_queue_capacity() -> usize { 256 }

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AdminSettings {
    #[serde(default)]
    pub admin_ids: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_log_level() -> String { "info".to_string() }
fn default_log_format() -> String { "json".to_string() }

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml)
    /// 3. Environment variables (prefixed with CASTING_)
    pub fn load() -> Result<Self, ConfigError> {
        let mut settings = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            // Local overrides for development
            .add_source(File::with_name("config/local").required(false))
            // e.g., CASTING__SERVER__PORT -> server.port
            .add_source(env_source())
            .build()?;

        settings = substitute_env_vars(settings)?;

        settings.try_deserialize()
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(env_source())
            .build()?;

        settings.try_deserialize()
    }

    pub fn default_weights(&self) -> MatchingWeights {
        MatchingWeights::from(&self.scoring.weights)
    }

    pub fn matcher_settings(&self) -> MatcherSettings {
        MatcherSettings {
            overfetch_factor: self.matching.overfetch_factor,
            max_page_size: self.matching.max_page_size,
            casting_min_score: self.matching.casting_min_score,
            similar_min_score: self.matching.similar_min_score,
            reason_thresholds: ReasonThresholds::from(&self.scoring.reasons),
        }
    }
}

fn env_source() -> Environment {
    Environment::with_prefix("CASTING")
        .prefix_separator("__")
        .separator("__")
        .list_separator(",")
        .with_list_parse_key("admin.admin_ids")
        .try_parsing(true)
}

/// Apply well-known unprefixed environment variables
///
/// `DATABASE_URL` and the `APPWRITE_*` variables used by the rest of the
/// platform win over file values.
fn substitute_env_vars(settings: Config) -> Result<Config, ConfigError> {
    use std::env;

    let mut builder = Config::builder().add_source(settings);

    let overrides = [
        ("DATABASE_URL", "database.url"),
        ("APPWRITE_ENDPOINT", "appwrite.endpoint"),
        ("APPWRITE_API_KEY", "appwrite.api_key"),
        ("APPWRITE_PROJECT_ID", "appwrite.project_id"),
        ("APPWRITE_DATABASE_ID", "appwrite.database_id"),
    ];

    for (var, key) in overrides {
        if let Ok(value) = env::var(var) {
            builder = builder.set_override(key, value)?;
        }
    }

    builder.build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_weights() {
        let weights = MatchingWeights::from(&WeightsConfig::default());
        assert_eq!(weights, MatchingWeights::default());
    }

    #[test]
    fn test_default_logging() {
        let logging = LoggingSettings::default();
        assert_eq!(logging.level, "info");
        assert_eq!(logging.format, "json");
    }

    #[test]
    fn test_default_reason_thresholds() {
        let thresholds = ReasonThresholds::from(&ReasonsConfig::default());
        assert_eq!(thresholds, ReasonThresholds::default());
    }

    #[test]
    fn test_load_from_file() {
        let dir = std::env::temp_dir().join(format!("casting-match-config-{}", uuid::Uuid::new_v4()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("test.toml");
        std::fs::write(
            &path,
            r#"
[server]
host = "127.0.0.1"
port = 8080

[appwrite]
endpoint = "https://appwrite.test/v1"
api_key = "key"
project_id = "project"
database_id = "db"

[database]
url = "postgres://localhost/casting"

[matching]
casting_min_score = 60.0

[scoring.weights]
physical = 0.30
specialized = 0.15

[admin]
admin_ids = ["admin-1"]
"#,
        )
        .unwrap();

        let settings = Settings::load_from(&path).unwrap();

        assert_eq!(settings.server.port, 8080);
        assert_eq!(settings.collection.models, "models");
        assert_eq!(settings.matcher_settings().casting_min_score, 60.0);
        assert_eq!(settings.matcher_settings().similar_min_score, 30.0);
        assert_eq!(settings.default_weights().physical, 0.30);
        assert!((settings.default_weights().sum() - 1.0).abs() < 1e-9);
        assert_eq!(settings.admin.admin_ids, vec!["admin-1".to_string()]);

        std::fs::remove_dir_all(&dir).ok();
    }
}
