use std::time::Duration;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Reference volume the throughput estimate is extrapolated to.
pub const REFERENCE_VOLUME: usize = 200_000;
/// Minimum indexed-record count before an estimate is worth reporting.
pub const ESTIMATE_THRESHOLD: usize = 100;

/// Counters for one run.
///
/// Threaded as explicit values: the batch writer and collection indexer
/// return deltas, the coordinator folds them. Counts are adjusted
/// optimistically while streaming and corrected downward when the engine
/// reports per-item failures.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunCounters {
    /// Collections fully processed (checkpoint written).
    pub modules_indexed: usize,
    /// Records successfully indexed.
    pub records_indexed: usize,
    /// Document fields successfully indexed.
    pub fields_indexed: usize,
    /// Records removed from the index.
    pub records_removed: usize,
}

impl RunCounters {
    pub fn merge(&mut self, other: &RunCounters) {
        self.modules_indexed += other.modules_indexed;
        self.records_indexed += other.records_indexed;
        self.fields_indexed += other.fields_indexed;
        self.records_removed += other.records_removed;
    }
}

/// Outcome of one run: counters plus elapsed wall time.
#[derive(Debug, Clone)]
pub struct Summary {
    pub run_id: Uuid,
    pub counters: RunCounters,
    pub elapsed: Duration,
}

impl Summary {
    pub fn new(run_id: Uuid, counters: RunCounters, elapsed: Duration) -> Self {
        Self {
            run_id,
            counters,
            elapsed,
        }
    }

    /// Linear extrapolation of this run's throughput to
    /// [`REFERENCE_VOLUME`] records, rounded to whole seconds. `None` when
    /// nothing was indexed.
    pub fn reference_estimate(&self) -> Option<Duration> {
        if self.counters.records_indexed == 0 {
            return None;
        }
        let per_record = self.elapsed.as_secs_f64() / self.counters.records_indexed as f64;
        let estimate = per_record * REFERENCE_VOLUME as f64;
        Some(Duration::from_secs(estimate.round() as u64))
    }

    /// Render the human-readable report lines.
    pub fn report_lines(&self) -> Vec<String> {
        let mut lines = Vec::new();

        if self.counters.records_removed > 0 {
            lines.push(format!(
                "{} records have been removed",
                self.counters.records_removed
            ));
        }

        if self.counters.records_indexed != 0 {
            lines.push(format!(
                "{} modules, {} records and {} fields indexed in {:.3} s",
                self.counters.modules_indexed,
                self.counters.records_indexed,
                self.counters.fields_indexed,
                self.elapsed.as_secs_f64()
            ));

            if self.counters.records_indexed > ESTIMATE_THRESHOLD {
                if let Some(estimate) = self.reference_estimate() {
                    lines.push(format!(
                        "It would take ~{} for 200,000 records, assuming a linear expansion",
                        humantime::format_duration(estimate)
                    ));
                }
            }
        } else {
            lines.push("No record has been indexed".to_string());
        }

        lines
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary(counters: RunCounters, elapsed: Duration) -> Summary {
        Summary::new(Uuid::new_v4(), counters, elapsed)
    }

    #[test]
    fn test_merge() {
        let mut total = RunCounters::default();
        total.merge(&RunCounters {
            modules_indexed: 1,
            records_indexed: 10,
            fields_indexed: 50,
            records_removed: 2,
        });
        total.merge(&RunCounters {
            modules_indexed: 1,
            records_indexed: 5,
            fields_indexed: 20,
            records_removed: 0,
        });

        assert_eq!(total.modules_indexed, 2);
        assert_eq!(total.records_indexed, 15);
        assert_eq!(total.fields_indexed, 70);
        assert_eq!(total.records_removed, 2);
    }

    #[test]
    fn test_no_records_indexed() {
        let s = summary(RunCounters::default(), Duration::from_secs(1));
        assert_eq!(s.reference_estimate(), None);
        assert_eq!(s.report_lines(), vec!["No record has been indexed"]);
    }

    #[test]
    fn test_reference_estimate_linear() {
        // 1000 records in 10s -> 10ms/record -> 2000s for 200k
        let s = summary(
            RunCounters {
                modules_indexed: 1,
                records_indexed: 1000,
                fields_indexed: 4000,
                records_removed: 0,
            },
            Duration::from_secs(10),
        );
        assert_eq!(s.reference_estimate(), Some(Duration::from_secs(2000)));

        let lines = s.report_lines();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains("1 modules, 1000 records and 4000 fields"));
        assert!(lines[1].contains("200,000 records"));
    }

    #[test]
    fn test_estimate_suppressed_on_tiny_runs() {
        let s = summary(
            RunCounters {
                modules_indexed: 1,
                records_indexed: 5,
                fields_indexed: 20,
                records_removed: 0,
            },
            Duration::from_secs(1),
        );
        // Estimate exists but is below the reporting threshold
        assert!(s.reference_estimate().is_some());
        let lines = s.report_lines();
        assert_eq!(lines.len(), 1);
        assert!(!lines[0].contains("200,000"));
    }

    #[test]
    fn test_removed_records_line() {
        let s = summary(
            RunCounters {
                modules_indexed: 1,
                records_indexed: 0,
                fields_indexed: 0,
                records_removed: 3,
            },
            Duration::from_secs(1),
        );
        let lines = s.report_lines();
        assert_eq!(lines[0], "3 records have been removed");
        assert_eq!(lines[1], "No record has been indexed");
    }
}
