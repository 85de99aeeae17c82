use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

/// 單筆佔位資料 (一張卡片)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Record {
    pub id: u32,
    pub name: String,
    pub experience: u32,
    pub height: u32,
}

/// 目前顯示中的有序序列。
///
/// 內部是共享的不可變 handle：複製 `Sequence` 只會複製指標，
/// 而每次重新排序都會配置新的 handle。`same_handle` 以身分 (identity)
/// 比較，`PartialEq` 則以內容比較。
#[derive(Debug, Clone)]
pub struct Sequence {
    records: Arc<[Arc<Record>]>,
}

impl Sequence {
    pub fn new(records: Vec<Arc<Record>>) -> Self {
        Self {
            records: Arc::from(records),
        }
    }

    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Arc<Record>> {
        self.records.get(index)
    }

    pub fn records(&self) -> &[Arc<Record>] {
        &self.records
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<Record>> {
        self.records.iter()
    }

    pub fn ids(&self) -> Vec<u32> {
        self.records.iter().map(|r| r.id).collect()
    }

    /// 兩個序列是否為同一個 handle (不比較內容)
    pub fn same_handle(&self, other: &Sequence) -> bool {
        Arc::ptr_eq(&self.records, &other.records)
    }
}

impl PartialEq for Sequence {
    fn eq(&self, other: &Self) -> bool {
        self.records.len() == other.records.len()
            && self
                .records
                .iter()
                .zip(other.records.iter())
                .all(|(a, b)| a == b)
    }
}

impl FromIterator<Arc<Record>> for Sequence {
    fn from_iter<I: IntoIterator<Item = Arc<Record>>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

/// 具名的計時區間，對應一組 start/end mark 與一個 measure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimingSpan {
    pub name: &'static str,
}

impl TimingSpan {
    pub const fn new(name: &'static str) -> Self {
        Self { name }
    }

    pub fn start_mark(&self) -> String {
        format!("{}-start", self.name)
    }

    pub fn end_mark(&self) -> String {
        format!("{}-end", self.name)
    }

    pub fn measure_name(&self) -> String {
        format!("{}-measure", self.name)
    }
}

pub const REVERSE_SPAN: TimingSpan = TimingSpan::new("reversePokemon");

/// Timestamps are milliseconds since the timeline origin.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerformanceMark {
    pub name: String,
    pub start_time: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerformanceMeasure {
    pub name: String,
    pub start_mark: String,
    pub end_mark: String,
    pub start_time: f64,
    pub end_time: f64,
}

impl PerformanceMeasure {
    pub fn duration(&self) -> f64 {
        self.end_time - self.start_time
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum RenderStrategy {
    Plain,
    Memoized,
    #[default]
    Windowed,
}

impl RenderStrategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            RenderStrategy::Plain => "plain",
            RenderStrategy::Memoized => "memoized",
            RenderStrategy::Windowed => "windowed",
        }
    }
}

impl fmt::Display for RenderStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RenderStrategy {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "plain" => Ok(RenderStrategy::Plain),
            "memoized" | "memo" => Ok(RenderStrategy::Memoized),
            "windowed" | "virtual" | "masonry" => Ok(RenderStrategy::Windowed),
            other => Err(format!("unknown render strategy: {}", other)),
        }
    }
}

/// 瀑布流 (masonry) 版面參數，單位為像素
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MasonryOptions {
    pub column_width: f64,
    pub column_gutter: f64,
    pub viewport_width: f64,
    pub viewport_height: f64,
    pub item_height: f64,
    /// Multiple of the viewport height kept materialized around the scroll position.
    pub overscan_by: f64,
    pub scroll_offset: f64,
}

impl Default for MasonryOptions {
    fn default() -> Self {
        Self {
            column_width: 150.0,
            column_gutter: 0.0,
            viewport_width: 1280.0,
            viewport_height: 720.0,
            // 140px media + 文字區塊
            item_height: 212.0,
            overscan_by: 2.0,
            scroll_offset: 0.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CardView {
    pub id: u32,
    pub image_url: String,
    /// Fixed media title attribute, the same on every card.
    pub image_title: String,
    pub title: String,
    pub subtitle: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Placement {
    pub column: usize,
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlacedCard {
    /// Position of the record inside the sequence.
    pub index: usize,
    pub card: Arc<CardView>,
    pub placement: Option<Placement>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RenderStats {
    /// Cards built during this render.
    pub created: usize,
    /// Cards taken from the memo cache.
    pub reused: usize,
    /// Records left unmaterialized (outside the window).
    pub skipped: usize,
}

#[derive(Debug, Clone)]
pub struct Frame {
    pub strategy: RenderStrategy,
    pub total: usize,
    pub cards: Vec<PlacedCard>,
    pub stats: RenderStats,
}

impl Frame {
    pub fn materialized(&self) -> usize {
        self.cards.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: u32) -> Arc<Record> {
        Arc::new(Record {
            id,
            name: format!("r{}", id),
            experience: id,
            height: id,
        })
    }

    #[test]
    fn test_sequence_identity_vs_equality() {
        let a: Sequence = vec![record(1), record(2)].into_iter().collect();
        let b = a.clone();
        let c: Sequence = vec![record(1), record(2)].into_iter().collect();

        assert!(a.same_handle(&b));
        assert!(!a.same_handle(&c));
        assert_eq!(a, c);
        assert!(!Sequence::empty().same_handle(&Sequence::empty()));
    }

    #[test]
    fn test_timing_span_names() {
        assert_eq!(REVERSE_SPAN.start_mark(), "reversePokemon-start");
        assert_eq!(REVERSE_SPAN.end_mark(), "reversePokemon-end");
        assert_eq!(REVERSE_SPAN.measure_name(), "reversePokemon-measure");
    }

    #[test]
    fn test_strategy_from_str() {
        assert_eq!("Plain".parse::<RenderStrategy>(), Ok(RenderStrategy::Plain));
        assert_eq!("memo".parse::<RenderStrategy>(), Ok(RenderStrategy::Memoized));
        assert_eq!("masonry".parse::<RenderStrategy>(), Ok(RenderStrategy::Windowed));
        assert!("grid".parse::<RenderStrategy>().is_err());
        assert_eq!(RenderStrategy::default().to_string(), "windowed");
    }
}
