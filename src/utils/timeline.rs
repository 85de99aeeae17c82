use crate::domain::model::{PerformanceMark, PerformanceMeasure};
use crate::domain::ports::PerformanceMarks;
use crate::utils::error::{GridError, Result};
use std::time::Instant;

/// 單調時鐘上的 mark/measure 紀錄。
///
/// 同名的 mark 可以重複；`measure` 一律取最新的那一個，
/// 所以連續兩次 reverse 時由最後一次的 start 計時。
#[derive(Debug)]
pub struct PerformanceTimeline {
    origin: Instant,
    marks: Vec<PerformanceMark>,
    measures: Vec<PerformanceMeasure>,
}

impl PerformanceTimeline {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
            marks: Vec::new(),
            measures: Vec::new(),
        }
    }

    pub fn now(&self) -> f64 {
        self.origin.elapsed().as_secs_f64() * 1000.0
    }

    pub fn marks(&self) -> &[PerformanceMark] {
        &self.marks
    }

    pub fn marks_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a PerformanceMark> {
        self.marks.iter().filter(move |m| m.name == name)
    }

    fn latest_mark(&self, name: &str) -> Result<&PerformanceMark> {
        self.marks
            .iter()
            .rev()
            .find(|m| m.name == name)
            .ok_or_else(|| GridError::MissingMark {
                name: name.to_string(),
            })
    }
}

impl Default for PerformanceTimeline {
    fn default() -> Self {
        Self::new()
    }
}

impl PerformanceMarks for PerformanceTimeline {
    fn mark(&mut self, name: &str) -> PerformanceMark {
        let mark = PerformanceMark {
            name: name.to_string(),
            start_time: self.now(),
        };
        tracing::trace!("mark {} @ {:.3}ms", mark.name, mark.start_time);
        self.marks.push(mark.clone());
        mark
    }

    fn measure(
        &mut self,
        name: &str,
        start_mark: &str,
        end_mark: &str,
    ) -> Result<PerformanceMeasure> {
        let start_time = self.latest_mark(start_mark)?.start_time;
        let end_time = self.latest_mark(end_mark)?.start_time;

        let measure = PerformanceMeasure {
            name: name.to_string(),
            start_mark: start_mark.to_string(),
            end_mark: end_mark.to_string(),
            start_time,
            end_time,
        };
        self.measures.push(measure.clone());
        Ok(measure)
    }

    fn measures(&self) -> &[PerformanceMeasure] {
        &self.measures
    }
}
