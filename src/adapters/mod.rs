// Adapters layer: concrete implementations for external systems (disk, rendering surface).

pub mod storage;
pub mod surface;
