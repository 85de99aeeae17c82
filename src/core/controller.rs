use crate::domain::model::{PerformanceMeasure, Sequence, TimingSpan, REVERSE_SPAN};
use crate::domain::ports::PerformanceMarks;
use crate::utils::error::Result;
use std::sync::Arc;

/// 由後往前取出元素，但不包含 index 0。
///
/// `[A, B, C, D]` 會變成 `[D, C, B]`，長度為 N-1；空序列得到新的空序列。
pub fn reversed_without_head(sequence: &Sequence) -> Sequence {
    (1..sequence.len())
        .rev()
        .map(|i| Arc::clone(&sequence.records()[i]))
        .collect()
}

/// 持有目前的序列，並用 timing span 包住每一次狀態變更
pub struct ViewController<D: PerformanceMarks> {
    current: Sequence,
    /// Sequence seen by the last completed render.
    previous: Option<Sequence>,
    diagnostics: D,
    span: TimingSpan,
}

impl<D: PerformanceMarks> ViewController<D> {
    pub fn new(initial: Sequence, diagnostics: D) -> Self {
        Self {
            current: initial,
            previous: None,
            diagnostics,
            span: REVERSE_SPAN,
        }
    }

    pub fn current(&self) -> &Sequence {
        &self.current
    }

    pub fn diagnostics(&self) -> &D {
        &self.diagnostics
    }

    pub fn into_diagnostics(self) -> D {
        self.diagnostics
    }

    pub fn reverse(&mut self) {
        let next = reversed_without_head(&self.current);

        let mark = self.diagnostics.mark(&self.span.start_mark());
        tracing::debug!(
            "Reordering {} -> {} records (start mark @ {:.3}ms)",
            self.current.len(),
            next.len(),
            mark.start_time
        );

        self.current = next;
    }

    /// Runs after every completed render. Closes the span only when a previously
    /// rendered sequence exists and is a different handle from the current one.
    ///
    /// The rendered sequence is remembered even when the measure fails.
    pub fn commit_rendered(&mut self) -> Result<Option<PerformanceMeasure>> {
        let changed = self
            .previous
            .replace(self.current.clone())
            .map(|prev| !prev.same_handle(&self.current))
            .unwrap_or(false);

        if !changed {
            return Ok(None);
        }

        self.diagnostics.mark(&self.span.end_mark());
        let measure = self.diagnostics.measure(
            &self.span.measure_name(),
            &self.span.start_mark(),
            &self.span.end_mark(),
        )?;
        tracing::info!(
            "⏱️ {} took {:.3}ms ({} records)",
            measure.name,
            measure.duration(),
            self.current.len()
        );
        Ok(Some(measure))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::data_source::generate;
    use crate::domain::model::{PerformanceMark, Record};
    use crate::utils::error::GridError;
    use crate::utils::timeline::PerformanceTimeline;

    /// 記錄 mark，但 measure 一律失敗
    #[derive(Default)]
    struct FailingMarks {
        marks: Vec<PerformanceMark>,
        measure_calls: usize,
    }

    impl PerformanceMarks for FailingMarks {
        fn mark(&mut self, name: &str) -> PerformanceMark {
            let mark = PerformanceMark {
                name: name.to_string(),
                start_time: self.marks.len() as f64,
            };
            self.marks.push(mark.clone());
            mark
        }

        fn measure(
            &mut self,
            _name: &str,
            start_mark: &str,
            _end_mark: &str,
        ) -> Result<PerformanceMeasure> {
            self.measure_calls += 1;
            Err(GridError::MissingMark {
                name: start_mark.to_string(),
            })
        }

        fn measures(&self) -> &[PerformanceMeasure] {
            &[]
        }
    }

    fn letters(names: &[&str]) -> Sequence {
        names
            .iter()
            .enumerate()
            .map(|(i, name)| {
                Arc::new(Record {
                    id: i as u32 + 1,
                    name: name.to_string(),
                    experience: 0,
                    height: 0,
                })
            })
            .collect()
    }

    fn names(sequence: &Sequence) -> Vec<String> {
        sequence.iter().map(|r| r.name.clone()).collect()
    }

    #[test]
    fn test_reverse_drops_first_element() {
        let input = letters(&["A", "B", "C", "D"]);
        let output = reversed_without_head(&input);
        assert_eq!(names(&output), vec!["D", "C", "B"]);
    }

    #[test]
    fn test_reverse_single_and_empty() {
        let single = letters(&["A"]);
        assert!(reversed_without_head(&single).is_empty());

        let empty = Sequence::empty();
        let output = reversed_without_head(&empty);
        assert!(output.is_empty());
        assert!(!output.same_handle(&empty));
    }

    #[test]
    fn test_reverse_keeps_record_handles() {
        let input = generate(5);
        let output = reversed_without_head(&input);
        assert!(Arc::ptr_eq(&output.records()[0], &input.records()[4]));
        assert!(Arc::ptr_eq(&output.records()[3], &input.records()[1]));
    }

    #[test]
    fn test_first_commit_records_nothing() {
        let mut controller = ViewController::new(generate(49), PerformanceTimeline::new());
        assert!(controller.commit_rendered().unwrap().is_none());
        assert!(controller.diagnostics().measures().is_empty());
        assert!(controller.diagnostics().marks().is_empty());
    }

    #[test]
    fn test_reverse_then_commit_records_one_measure() {
        let mut controller = ViewController::new(generate(49), PerformanceTimeline::new());
        controller.commit_rendered().unwrap();

        controller.reverse();
        assert_eq!(controller.current().len(), 48);

        let measure = controller.commit_rendered().unwrap().expect("measure");
        assert_eq!(measure.name, "reversePokemon-measure");
        assert_eq!(measure.start_mark, "reversePokemon-start");
        assert_eq!(measure.end_mark, "reversePokemon-end");
        assert!(measure.end_time >= measure.start_time);
        assert_eq!(controller.diagnostics().measures().len(), 1);
    }

    #[test]
    fn test_commit_without_change_records_nothing() {
        let mut controller = ViewController::new(generate(3), PerformanceTimeline::new());
        controller.commit_rendered().unwrap();
        controller.reverse();
        controller.commit_rendered().unwrap();

        assert!(controller.commit_rendered().unwrap().is_none());
        assert_eq!(controller.diagnostics().measures().len(), 1);
    }

    #[test]
    fn test_overlapping_reverses_measure_from_last_start() {
        let mut controller = ViewController::new(generate(10), PerformanceTimeline::new());
        controller.commit_rendered().unwrap();

        controller.reverse();
        controller.reverse();
        let measure = controller.commit_rendered().unwrap().expect("measure");

        let starts: Vec<f64> = controller
            .diagnostics()
            .marks_named("reversePokemon-start")
            .map(|m| m.start_time)
            .collect();
        assert_eq!(starts.len(), 2);
        assert_eq!(measure.start_time, starts[1]);
        assert_eq!(controller.diagnostics().measures().len(), 1);
        assert_eq!(controller.current().len(), 8);
    }

    #[test]
    fn test_failed_measure_still_remembers_rendered_sequence() {
        let mut controller = ViewController::new(generate(4), FailingMarks::default());
        controller.commit_rendered().unwrap();
        controller.reverse();

        let err = controller.commit_rendered().unwrap_err();
        assert!(matches!(err, GridError::MissingMark { .. }));

        // 同一個 handle 再次 render 不應重試量測
        assert!(controller.commit_rendered().unwrap().is_none());
        assert_eq!(controller.diagnostics().measure_calls, 1);
    }

    #[test]
    fn test_reverse_on_empty_still_measures() {
        let mut controller = ViewController::new(Sequence::empty(), PerformanceTimeline::new());
        controller.commit_rendered().unwrap();
        controller.reverse();
        assert!(controller.current().is_empty());
        assert!(controller.commit_rendered().unwrap().is_some());
    }
}
