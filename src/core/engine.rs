use crate::core::app::{App, Command};
use crate::core::report::BenchReport;
use crate::domain::ports::{PerformanceMarks, Surface};
use crate::utils::error::Result;
use crate::utils::monitor::SystemMonitor;

/// 反覆按下 "Reverse Pokemon" 並收集每一輪的量測
pub struct BenchEngine<S: Surface, D: PerformanceMarks> {
    app: App<S, D>,
    rounds: usize,
    monitor: SystemMonitor,
}

impl<S: Surface, D: PerformanceMarks> BenchEngine<S, D> {
    pub fn new(app: App<S, D>, rounds: usize) -> Self {
        Self::new_with_monitoring(app, rounds, false)
    }

    pub fn new_with_monitoring(app: App<S, D>, rounds: usize, enable_monitoring: bool) -> Self {
        Self {
            app,
            rounds,
            monitor: SystemMonitor::new(enable_monitoring),
        }
    }

    pub async fn run(self) -> Result<BenchReport> {
        let Self {
            mut app,
            rounds,
            monitor,
        } = self;

        let initial_count = app.sequence().len();
        tracing::info!(
            "Starting benchmark: {} rounds over {} records",
            rounds,
            initial_count
        );
        monitor.log_stats("Initial render");

        for round in 1..=rounds {
            match app.dispatch(Command::Reverse).await? {
                Some(measure) => tracing::debug!(
                    "Round {}/{}: {:.3}ms, {} records left",
                    round,
                    rounds,
                    measure.duration(),
                    app.sequence().len()
                ),
                None => tracing::warn!("Round {}/{} produced no measurement", round, rounds),
            }
            monitor.log_stats(&format!("Round {}", round));
        }

        monitor.log_final_stats();

        let summary = app.shutdown();
        Ok(BenchReport::new(
            summary.strategy,
            initial_count,
            summary.final_count,
            rounds,
            summary.frames,
            summary.last_stats,
            summary.measures,
        ))
    }
}
