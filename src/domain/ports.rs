use crate::domain::model::{Frame, MasonryOptions, PerformanceMark, PerformanceMeasure, RenderStrategy};
use crate::utils::error::Result;
use async_trait::async_trait;

/// 瀏覽器 `performance` 介面的對應：mark 與 measure
pub trait PerformanceMarks: Send + Sync {
    fn mark(&mut self, name: &str) -> PerformanceMark;
    fn measure(&mut self, name: &str, start_mark: &str, end_mark: &str)
        -> Result<PerformanceMeasure>;
    fn measures(&self) -> &[PerformanceMeasure];
}

/// The hosting rendering engine. `paint` resolves once the frame is visibly committed.
#[async_trait]
pub trait Surface: Send + Sync {
    async fn paint(&self, frame: &Frame) -> Result<()>;
}

pub trait Storage: Send + Sync {
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn record_count(&self) -> usize;
    fn strategy(&self) -> RenderStrategy;
    fn masonry(&self) -> MasonryOptions;
    fn image_base_url(&self) -> &str;
    fn rounds(&self) -> usize;
    fn output_path(&self) -> Option<&str>;
    fn output_formats(&self) -> Vec<String>;
    fn monitoring_enabled(&self) -> bool;
}
