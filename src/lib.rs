pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::{
    storage::LocalStorage,
    surface::{HeadlessSurface, TextSurface},
};
pub use config::toml_config::TomlConfig;
pub use crate::core::{
    app::{App, Command, SessionSummary},
    engine::BenchEngine,
    report::BenchReport,
};
pub use domain::model::{Record, RenderStrategy, Sequence};
pub use utils::error::{GridError, Result};
pub use utils::timeline::PerformanceTimeline;
