use log::info;
use std::time::{Duration, Instant};

/// Counters for one load. Returned with the loaded data instead of kept globally.
#[derive(Debug, Clone, Default)]
pub struct LoadMetrics {
    pub files_attempted: u64,
    pub files_loaded: u64,
    pub files_skipped: u64,
    pub sheets_loaded: u64,
    pub sheets_skipped: u64,
    pub environment_rows: u64,
    pub growth_rows: u64,
    pub invalid_timestamps: u64,
    pub stage_times: Vec<(String, Duration)>,
    pub start_time: Option<Instant>,
}

impl LoadMetrics {
    pub fn new() -> Self {
        Self {
            start_time: Some(Instant::now()),
            ..Default::default()
        }
    }

    pub fn record_file_attempt(&mut self) {
        self.files_attempted += 1;
    }

    pub fn record_file_success(&mut self) {
        self.files_loaded += 1;
    }

    pub fn record_file_skipped(&mut self) {
        self.files_skipped += 1;
    }

    pub fn record_sheet_success(&mut self) {
        self.sheets_loaded += 1;
    }

    pub fn record_sheet_skipped(&mut self) {
        self.sheets_skipped += 1;
    }

    pub fn record_environment_rows(&mut self, rows: u64) {
        self.environment_rows += rows;
    }

    pub fn record_growth_rows(&mut self, rows: u64) {
        self.growth_rows += rows;
    }

    pub fn record_invalid_timestamp(&mut self) {
        self.invalid_timestamps += 1;
    }

    pub fn record_stage_time(&mut self, stage: &str, duration: Duration) {
        self.stage_times.push((stage.to_string(), duration));
    }

    pub fn get_total_duration(&self) -> Duration {
        self.start_time
            .map(|start| start.elapsed())
            .unwrap_or_default()
    }

    pub fn log_summary(&self) {
        info!(
            "Load finished in {:.2?}: files {}/{} loaded ({} skipped), sheets {} loaded ({} skipped)",
            self.get_total_duration(),
            self.files_loaded,
            self.files_attempted,
            self.files_skipped,
            self.sheets_loaded,
            self.sheets_skipped
        );
        info!(
            "Rows: {} environment, {} growth; {} unparsable timestamps",
            self.environment_rows, self.growth_rows, self.invalid_timestamps
        );
        for (stage, duration) in &self.stage_times {
            info!("  {}: {:.2?}", stage, duration);
        }
    }
}

/// Times an expression and records the duration on a [`LoadMetrics`].
#[macro_export]
macro_rules! time_stage {
    ($metrics:expr, $name:expr, $op:expr) => {{
        let start = std::time::Instant::now();
        let result = $op;
        $metrics.record_stage_time($name, start.elapsed());
        result
    }};
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counters() {
        let mut metrics = LoadMetrics::new();
        metrics.record_file_attempt();
        metrics.record_file_attempt();
        metrics.record_file_success();
        metrics.record_file_skipped();
        metrics.record_environment_rows(12);
        metrics.record_environment_rows(3);
        assert_eq!(metrics.files_attempted, 2);
        assert_eq!(metrics.files_loaded, 1);
        assert_eq!(metrics.environment_rows, 15);
    }

    #[test]
    fn test_time_stage_records_duration() {
        let mut metrics = LoadMetrics::new();
        let value = time_stage!(metrics, "compute", 40 + 2);
        assert_eq!(value, 42);
        assert_eq!(metrics.stage_times.len(), 1);
        assert_eq!(metrics.stage_times[0].0, "compute");
    }
}
