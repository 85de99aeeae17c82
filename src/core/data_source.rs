use crate::domain::model::{Record, Sequence};
use std::sync::Arc;

pub const DEFAULT_RECORD_COUNT: usize = 49;

/// experience 與 height 在 u32 上限處飽和
pub fn make_record(id: u32) -> Record {
    Record {
        id,
        name: format!("Poki Maan {}", id),
        experience: id.saturating_mul(20),
        height: id.saturating_add(10),
    }
}

/// 產生 `count` 筆佔位資料，id 由 1 開始遞增
pub fn generate(count: u32) -> Sequence {
    (1..=count).map(|id| Arc::new(make_record(id))).collect()
}
