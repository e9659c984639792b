use crate::error::CoreError;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub summary: SummaryConfig,
    #[serde(default)]
    pub scan: ScanPaths,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub tables: TablesConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummaryConfig {
    #[serde(default = "default_max_sentences")]
    pub max_sentences: usize,
    /// Length normalisation exponent applied to a sentence's token count.
    #[serde(default = "default_score_exponent")]
    pub score_exponent: f64,
    #[serde(default = "default_title_max_chars")]
    pub title_max_chars: usize,
    #[serde(default = "default_language_sample_chars")]
    pub language_sample_chars: usize,
}

impl Default for SummaryConfig {
    fn default() -> Self {
        Self {
            max_sentences: default_max_sentences(),
            score_exponent: default_score_exponent(),
            title_max_chars: default_title_max_chars(),
            language_sample_chars: default_language_sample_chars(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ScanPaths {
    #[serde(default)]
    pub include: Vec<String>,
    #[serde(default)]
    pub exclude: Vec<String>,
    #[serde(default)]
    pub include_hidden: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default = "default_output_dir")]
    pub dir: String,
    #[serde(default)]
    pub per_file_json: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: default_output_dir(),
            per_file_json: false,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct TablesConfig {
    /// TOML file overriding stop words, tag rules and action clues.
    pub path: Option<String>,
}

fn default_max_sentences() -> usize {
    5
}

fn default_score_exponent() -> f64 {
    0.6
}

fn default_title_max_chars() -> usize {
    140
}

fn default_language_sample_chars() -> usize {
    5000
}

fn default_output_dir() -> String {
    "output".to_string()
}

impl SummaryConfig {
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.max_sentences == 0 {
            return Err(CoreError::InvalidConfig(
                "summary.max_sentences must be positive".to_string(),
            ));
        }
        if !self.score_exponent.is_finite() || self.score_exponent <= 0.0 {
            return Err(CoreError::InvalidConfig(format!(
                "summary.score_exponent must be a positive number, got {}",
                self.score_exponent
            )));
        }
        Ok(())
    }
}

pub fn load(path: Option<&str>) -> anyhow::Result<AppConfig> {
    let mut settings = config::Config::builder();
    if let Some(p) = path {
        settings = settings.add_source(config::File::with_name(p));
    } else {
        settings = settings.add_source(config::File::with_name("config/default").required(false));
    }
    settings = settings.add_source(
        config::Environment::with_prefix("DOCSUM")
            .prefix_separator("__")
            .separator("__")
            .try_parsing(true),
    );
    let cfg: AppConfig = settings.build()?.try_deserialize()?;
    cfg.summary.validate()?;
    Ok(cfg)
}
