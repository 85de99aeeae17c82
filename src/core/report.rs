use crate::domain::model::{PerformanceMeasure, RenderStats, RenderStrategy};
use crate::domain::ports::Storage;
use crate::utils::error::{GridError, Result};
use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct BenchReport {
    pub generated_at: DateTime<Utc>,
    pub strategy: RenderStrategy,
    pub initial_count: usize,
    pub final_count: usize,
    pub rounds: usize,
    pub frames: usize,
    pub last_stats: RenderStats,
    pub min_ms: Option<f64>,
    pub max_ms: Option<f64>,
    pub mean_ms: Option<f64>,
    pub measures: Vec<PerformanceMeasure>,
}

#[derive(Debug, Serialize)]
struct MeasureRow<'a> {
    round: usize,
    name: &'a str,
    start_ms: f64,
    end_ms: f64,
    duration_ms: f64,
}

impl BenchReport {
    pub fn new(
        strategy: RenderStrategy,
        initial_count: usize,
        final_count: usize,
        rounds: usize,
        frames: usize,
        last_stats: RenderStats,
        measures: Vec<PerformanceMeasure>,
    ) -> Self {
        let durations: Vec<f64> = measures.iter().map(|m| m.duration()).collect();
        let min_ms = durations.iter().copied().reduce(f64::min);
        let max_ms = durations.iter().copied().reduce(f64::max);
        let mean_ms = if durations.is_empty() {
            None
        } else {
            Some(durations.iter().sum::<f64>() / durations.len() as f64)
        };

        Self {
            generated_at: Utc::now(),
            strategy,
            initial_count,
            final_count,
            rounds,
            frames,
            last_stats,
            min_ms,
            max_ms,
            mean_ms,
            measures,
        }
    }

    pub fn to_json(&self) -> Result<Vec<u8>> {
        Ok(serde_json::to_vec_pretty(self)?)
    }

    pub fn to_csv(&self) -> Result<Vec<u8>> {
        let mut writer = csv::Writer::from_writer(Vec::new());
        for (i, measure) in self.measures.iter().enumerate() {
            writer.serialize(MeasureRow {
                round: i + 1,
                name: &measure.name,
                start_ms: measure.start_time,
                end_ms: measure.end_time,
                duration_ms: measure.duration(),
            })?;
        }
        writer.into_inner().map_err(|e| GridError::IoError(e.into_error()))
    }

    /// 依 `formats` 寫出 `report.json` / `report.csv`，回傳寫出的檔名
    pub async fn save<S: Storage>(&self, storage: &S, formats: &[String]) -> Result<Vec<String>> {
        let mut written = Vec::new();
        for format in formats {
            let (filename, data) = match format.as_str() {
                "json" => ("report.json", self.to_json()?),
                "csv" => ("report.csv", self.to_csv()?),
                other => {
                    return Err(GridError::InvalidConfigValueError {
                        field: "bench.output_formats".to_string(),
                        value: other.to_string(),
                        reason: "Unsupported format. Valid formats: json, csv".to_string(),
                    })
                }
            };
            storage.write_file(filename, &data).await?;
            tracing::debug!("Wrote {} ({} bytes)", filename, data.len());
            written.push(filename.to_string());
        }
        Ok(written)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn measure(start: f64, end: f64) -> PerformanceMeasure {
        PerformanceMeasure {
            name: "reversePokemon-measure".to_string(),
            start_mark: "reversePokemon-start".to_string(),
            end_mark: "reversePokemon-end".to_string(),
            start_time: start,
            end_time: end,
        }
    }

    #[test]
    fn test_summary_statistics() {
        let report = BenchReport::new(
            RenderStrategy::Windowed,
            49,
            47,
            2,
            3,
            RenderStats::default(),
            vec![measure(1.0, 3.0), measure(10.0, 14.0)],
        );
        assert_eq!(report.min_ms, Some(2.0));
        assert_eq!(report.max_ms, Some(4.0));
        assert_eq!(report.mean_ms, Some(3.0));
    }

    #[test]
    fn test_empty_report_has_no_statistics() {
        let report = BenchReport::new(
            RenderStrategy::Plain,
            49,
            49,
            0,
            1,
            RenderStats::default(),
            Vec::new(),
        );
        assert!(report.min_ms.is_none());
        assert!(report.mean_ms.is_none());
        assert!(report.to_csv().unwrap().is_empty());
    }

    #[test]
    fn test_csv_rows() {
        let report = BenchReport::new(
            RenderStrategy::Memoized,
            49,
            48,
            1,
            2,
            RenderStats::default(),
            vec![measure(1.5, 2.0)],
        );
        let csv = String::from_utf8(report.to_csv().unwrap()).unwrap();
        let mut lines = csv.lines();
        assert_eq!(lines.next(), Some("round,name,start_ms,end_ms,duration_ms"));
        assert_eq!(lines.next(), Some("1,reversePokemon-measure,1.5,2.0,0.5"));
    }

    #[test]
    fn test_json_contains_strategy() {
        let report = BenchReport::new(
            RenderStrategy::Memoized,
            5,
            4,
            1,
            2,
            RenderStats::default(),
            vec![measure(0.0, 1.0)],
        );
        let value: serde_json::Value = serde_json::from_slice(&report.to_json().unwrap()).unwrap();
        assert_eq!(value["strategy"], "memoized");
        assert_eq!(value["measures"][0]["name"], "reversePokemon-measure");
    }
}
