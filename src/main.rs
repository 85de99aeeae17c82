use anyhow::Context;
use clap::Parser;
use poke_grid::core::{ConfigProvider, Surface};
use poke_grid::utils::logger::{self, LogFormat};
use poke_grid::utils::validation::Validate;
use poke_grid::{
    App, BenchEngine, BenchReport, CliConfig, HeadlessSurface, LocalStorage, PerformanceTimeline,
    TextSurface, TomlConfig,
};

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    let result = match cli.config.as_deref() {
        Some(path) => {
            // 載入 TOML 配置，命令列參數優先
            let mut config = TomlConfig::from_file(path)
                .with_context(|| format!("Failed to load config file '{}'", path))?;
            config.apply_overrides(&cli);

            logger::init_logger(config.log_format(), config.verbose());
            tracing::info!("📁 Loaded configuration from: {}", path);
            run(&config, cli.print).await
        }
        None => {
            let format = if cli.json_logs {
                LogFormat::Json
            } else {
                LogFormat::Compact
            };
            logger::init_logger(format, cli.verbose);
            tracing::debug!("CLI config: {:?}", cli);
            run(&cli, cli.print).await
        }
    };

    if let Err(e) = result {
        tracing::error!(
            "❌ Run failed: {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );
        tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());

        std::process::exit(e.severity().exit_code());
    }

    Ok(())
}

async fn run<C: ConfigProvider + Validate>(config: &C, print: bool) -> poke_grid::Result<()> {
    config.validate()?;
    tracing::info!("✅ Configuration validated");

    let report = if print {
        bench(config, TextSurface::stdout()).await?
    } else {
        bench(config, HeadlessSurface::new()).await?
    };

    println!(
        "✅ {} rounds with {} strategy: {} -> {} records",
        report.rounds, report.strategy, report.initial_count, report.final_count
    );
    if let (Some(min), Some(mean), Some(max)) = (report.min_ms, report.mean_ms, report.max_ms) {
        println!(
            "⏱️ reversePokemon-measure min {:.3}ms / mean {:.3}ms / max {:.3}ms",
            min, mean, max
        );
    }

    if let Some(output_path) = config.output_path() {
        let storage = LocalStorage::new(output_path.to_string());
        let written = report.save(&storage, &config.output_formats()).await?;
        for file in written {
            tracing::info!("📁 Report saved to: {}/{}", output_path, file);
        }
    }

    Ok(())
}

async fn bench<C: ConfigProvider, S: Surface>(
    config: &C,
    surface: S,
) -> poke_grid::Result<BenchReport> {
    let app = App::init(config, surface, PerformanceTimeline::new()).await?;
    let engine =
        BenchEngine::new_with_monitoring(app, config.rounds(), config.monitoring_enabled());
    engine.run().await
}
