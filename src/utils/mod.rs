pub mod error;
pub mod logger;
pub mod monitor;
pub mod timeline;
pub mod validation;
