pub mod toml_config;

use crate::domain::ports::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{self, REPORT_FORMATS};

pub use crate::core::renderer::DEFAULT_IMAGE_BASE_URL;

pub const DEFAULT_ROUNDS: usize = 1;
pub const MAX_ROUNDS: usize = 100_000;

pub fn default_output_formats() -> Vec<String> {
    vec!["json".to_string()]
}

/// 共用的設定檢查，CLI 與 TOML 都走這裡
pub fn validate_provider<C: ConfigProvider>(config: &C) -> Result<()> {
    validation::validate_record_count("data.count", config.record_count())?;
    validation::validate_url("card.image_base_url", config.image_base_url())?;
    validation::validate_masonry("masonry", &config.masonry())?;
    validation::validate_range("bench.rounds", config.rounds(), 1, MAX_ROUNDS)?;
    if let Some(path) = config.output_path() {
        validation::validate_path("bench.output_path", path)?;
    }
    validation::validate_allowed_values(
        "bench.output_formats",
        &config.output_formats(),
        &REPORT_FORMATS,
    )?;
    Ok(())
}

#[cfg(feature = "cli")]
pub use cli_config::CliConfig;

#[cfg(feature = "cli")]
mod cli_config {
    use super::*;
    use crate::core::data_source::DEFAULT_RECORD_COUNT;
    use crate::domain::model::{MasonryOptions, RenderStrategy};
    use crate::utils::validation::Validate;
    use clap::Parser;

    #[derive(Debug, Clone, Default, Parser)]
    #[command(name = "poke-grid")]
    #[command(about = "Render a grid of placeholder Pokemon cards and time the reverse command")]
    pub struct CliConfig {
        /// Path to a TOML configuration file; flags below override it
        #[arg(short, long)]
        pub config: Option<String>,

        /// Number of records to generate
        #[arg(long)]
        pub count: Option<usize>,

        #[arg(long, value_enum)]
        pub strategy: Option<RenderStrategy>,

        /// How many times to press "Reverse Pokemon"
        #[arg(long)]
        pub rounds: Option<usize>,

        #[arg(long)]
        pub image_base_url: Option<String>,

        #[arg(long)]
        pub column_width: Option<f64>,

        #[arg(long)]
        pub viewport_width: Option<f64>,

        #[arg(long)]
        pub viewport_height: Option<f64>,

        #[arg(long)]
        pub scroll_offset: Option<f64>,

        /// Directory for the benchmark report; nothing is written when omitted
        #[arg(long)]
        pub output_path: Option<String>,

        #[arg(long, value_delimiter = ',')]
        pub formats: Option<Vec<String>>,

        /// Print every frame as text
        #[arg(long)]
        pub print: bool,

        #[arg(short, long, help = "Enable verbose output")]
        pub verbose: bool,

        #[arg(long, help = "Log process CPU and memory per round")]
        pub monitor: bool,

        #[arg(long, help = "Emit logs as JSON")]
        pub json_logs: bool,
    }

    impl CliConfig {
        /// 只套用有指定的欄位
        pub fn apply_to_masonry(&self, masonry: &mut MasonryOptions) {
            if let Some(v) = self.column_width {
                masonry.column_width = v;
            }
            if let Some(v) = self.viewport_width {
                masonry.viewport_width = v;
            }
            if let Some(v) = self.viewport_height {
                masonry.viewport_height = v;
            }
            if let Some(v) = self.scroll_offset {
                masonry.scroll_offset = v;
            }
        }
    }

    impl ConfigProvider for CliConfig {
        fn record_count(&self) -> usize {
            self.count.unwrap_or(DEFAULT_RECORD_COUNT)
        }

        fn strategy(&self) -> RenderStrategy {
            self.strategy.unwrap_or_default()
        }

        fn masonry(&self) -> MasonryOptions {
            let mut masonry = MasonryOptions::default();
            self.apply_to_masonry(&mut masonry);
            masonry
        }

        fn image_base_url(&self) -> &str {
            self.image_base_url
                .as_deref()
                .unwrap_or(DEFAULT_IMAGE_BASE_URL)
        }

        fn rounds(&self) -> usize {
            self.rounds.unwrap_or(DEFAULT_ROUNDS)
        }

        fn output_path(&self) -> Option<&str> {
            self.output_path.as_deref()
        }

        fn output_formats(&self) -> Vec<String> {
            self.formats.clone().unwrap_or_else(default_output_formats)
        }

        fn monitoring_enabled(&self) -> bool {
            self.monitor
        }
    }

    impl Validate for CliConfig {
        fn validate(&self) -> Result<()> {
            validate_provider(self)
        }
    }

}
