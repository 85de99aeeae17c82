use crate::config::{default_output_formats, validate_provider, DEFAULT_IMAGE_BASE_URL, DEFAULT_ROUNDS};
use crate::core::data_source::DEFAULT_RECORD_COUNT;
use crate::domain::model::{MasonryOptions, RenderStrategy};
use crate::domain::ports::ConfigProvider;
use crate::utils::error::{GridError, Result};
use crate::utils::logger::LogFormat;
use crate::utils::validation::Validate;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::OnceLock;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TomlConfig {
    pub data: DataConfig,
    pub render: RenderConfig,
    pub masonry: MasonryOptions,
    pub bench: BenchConfig,
    pub monitoring: Option<MonitoringConfig>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DataConfig {
    pub count: Option<usize>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RenderConfig {
    pub strategy: Option<RenderStrategy>,
    pub image_base_url: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BenchConfig {
    pub rounds: Option<usize>,
    pub output_path: Option<String>,
    pub output_formats: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MonitoringConfig {
    pub enabled: bool,
    pub log_format: Option<LogFormat>,
    pub verbose: Option<bool>,
}

fn env_var_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\$\{([A-Za-z_][A-Za-z0-9_]*)\}").expect("valid env var pattern"))
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);
        Ok(toml::from_str(&processed_content)?)
    }

    /// 替換環境變數 (例如 ${POKE_IMAGE_BASE})，未設定的保持原樣
    fn substitute_env_vars(content: &str) -> String {
        env_var_pattern()
            .replace_all(content, |caps: &regex::Captures| {
                let var_name = &caps[1];
                std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
            })
            .into_owned()
    }

    pub fn log_format(&self) -> LogFormat {
        self.monitoring
            .as_ref()
            .and_then(|m| m.log_format)
            .unwrap_or_default()
    }

    pub fn verbose(&self) -> bool {
        self.monitoring
            .as_ref()
            .and_then(|m| m.verbose)
            .unwrap_or(false)
    }

    /// 命令列有指定的欄位覆蓋檔案內容
    #[cfg(feature = "cli")]
    pub fn apply_overrides(&mut self, cli: &crate::config::CliConfig) {
        if cli.count.is_some() {
            self.data.count = cli.count;
        }
        if cli.strategy.is_some() {
            self.render.strategy = cli.strategy;
        }
        if cli.image_base_url.is_some() {
            self.render.image_base_url = cli.image_base_url.clone();
        }
        if cli.rounds.is_some() {
            self.bench.rounds = cli.rounds;
        }
        if cli.output_path.is_some() {
            self.bench.output_path = cli.output_path.clone();
        }
        if cli.formats.is_some() {
            self.bench.output_formats = cli.formats.clone();
        }
        cli.apply_to_masonry(&mut self.masonry);

        let monitoring = self.monitoring.get_or_insert_with(MonitoringConfig::default);
        if cli.monitor {
            monitoring.enabled = true;
        }
        if cli.json_logs {
            monitoring.log_format = Some(LogFormat::Json);
        }
        if cli.verbose {
            monitoring.verbose = Some(true);
        }
    }
}

impl ConfigProvider for TomlConfig {
    fn record_count(&self) -> usize {
        self.data.count.unwrap_or(DEFAULT_RECORD_COUNT)
    }

    fn strategy(&self) -> RenderStrategy {
        self.render.strategy.unwrap_or_default()
    }

    fn masonry(&self) -> MasonryOptions {
        self.masonry
    }

    fn image_base_url(&self) -> &str {
        self.render
            .image_base_url
            .as_deref()
            .unwrap_or(DEFAULT_IMAGE_BASE_URL)
    }

    fn rounds(&self) -> usize {
        self.bench.rounds.unwrap_or(DEFAULT_ROUNDS)
    }

    fn output_path(&self) -> Option<&str> {
        self.bench.output_path.as_deref()
    }

    fn output_formats(&self) -> Vec<String> {
        self.bench
            .output_formats
            .clone()
            .unwrap_or_else(default_output_formats)
    }

    fn monitoring_enabled(&self) -> bool {
        self.monitoring.as_ref().map(|m| m.enabled).unwrap_or(false)
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        validate_provider(self).map_err(|e| match e {
            GridError::InvalidConfigValueError { field, value, reason } => {
                GridError::ConfigValidationError {
                    field,
                    message: format!("'{}' rejected: {}", value, reason),
                }
            }
            other => other,
        })
    }
}
