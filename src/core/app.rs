use crate::core::controller::ViewController;
use crate::core::data_source::generate;
use crate::core::renderer::CardRenderer;
use crate::domain::model::{PerformanceMeasure, RenderStats, RenderStrategy, Sequence};
use crate::domain::ports::{ConfigProvider, PerformanceMarks, Surface};
use crate::utils::error::{GridError, Result};
use crate::utils::validation;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// The "Reverse Pokemon" button.
    Reverse,
}

#[derive(Debug, Clone)]
pub struct SessionSummary {
    pub strategy: RenderStrategy,
    pub frames: usize,
    pub final_count: usize,
    pub last_stats: RenderStats,
    pub measures: Vec<PerformanceMeasure>,
}

/// 應用程式生命週期：init 建立唯一的 controller，shutdown 收回量測結果
pub struct App<S: Surface, D: PerformanceMarks> {
    controller: ViewController<D>,
    renderer: CardRenderer,
    surface: S,
    frames: usize,
    last_stats: RenderStats,
}

impl<S: Surface, D: PerformanceMarks> App<S, D> {
    pub async fn init<C: ConfigProvider>(config: &C, surface: S, diagnostics: D) -> Result<Self> {
        validation::validate_record_count("data.count", config.record_count())?;
        validation::validate_url("card.image_base_url", config.image_base_url())?;
        let masonry = config.masonry();
        validation::validate_masonry("masonry", &masonry)?;

        let count = u32::try_from(config.record_count()).map_err(|_| {
            GridError::InvalidConfigValueError {
                field: "data.count".to_string(),
                value: config.record_count().to_string(),
                reason: "Value does not fit in a record id".to_string(),
            }
        })?;
        let sequence = generate(count);
        tracing::info!(
            "🚀 Initializing grid with {} records ({} strategy)",
            sequence.len(),
            config.strategy()
        );

        let renderer = CardRenderer::new(config.strategy(), config.image_base_url(), masonry);
        let mut app = Self {
            controller: ViewController::new(sequence, diagnostics),
            renderer,
            surface,
            frames: 0,
            last_stats: RenderStats::default(),
        };

        // 第一次 render 沒有 previous，不會產生量測
        app.render().await?;
        Ok(app)
    }

    pub async fn dispatch(&mut self, command: Command) -> Result<Option<PerformanceMeasure>> {
        match command {
            Command::Reverse => self.controller.reverse(),
        }
        self.render().await
    }

    async fn render(&mut self) -> Result<Option<PerformanceMeasure>> {
        let frame = self.renderer.render(self.controller.current());
        self.surface.paint(&frame).await?;
        self.frames += 1;
        self.last_stats = frame.stats;

        // 讓出一次排程，再執行變更偵測
        tokio::task::yield_now().await;
        self.controller.commit_rendered()
    }

    pub fn sequence(&self) -> &Sequence {
        self.controller.current()
    }

    pub fn diagnostics(&self) -> &D {
        self.controller.diagnostics()
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn frames(&self) -> usize {
        self.frames
    }

    pub fn strategy(&self) -> RenderStrategy {
        self.renderer.strategy()
    }

    pub fn scroll_to(&mut self, offset: f64) {
        self.renderer.set_scroll_offset(offset);
    }

    pub fn shutdown(self) -> SessionSummary {
        let strategy = self.renderer.strategy();
        let final_count = self.controller.current().len();
        let measures = self.controller.into_diagnostics().measures().to_vec();

        tracing::info!(
            "🛑 Shutting down after {} frames, {} measurements",
            self.frames,
            measures.len()
        );

        SessionSummary {
            strategy,
            frames: self.frames,
            final_count,
            last_stats: self.last_stats,
            measures,
        }
    }
}
