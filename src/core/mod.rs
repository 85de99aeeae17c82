pub mod app;
pub mod controller;
pub mod data_source;
pub mod engine;
pub mod masonry;
pub mod renderer;
pub mod report;

pub use crate::domain::model::{Record, Sequence};
pub use crate::domain::ports::{ConfigProvider, PerformanceMarks, Storage, Surface};
pub use crate::utils::error::Result;
