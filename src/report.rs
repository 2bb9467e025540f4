//! Relative timing comparisons.
//!
//! Every figure is expressed against a baseline as `baseline / sample`, so
//! "100% faster" means twice as fast while a 2x slowdown reads "50% slower".

use std::fmt;
use std::time::Duration;

use serde::Serialize;

use crate::config::BenchConfig;
use crate::fetch::Accessor;
use crate::suite::SuiteResults;

/// Describe `sample` relative to `baseline`, e.g. `"12.50% faster"`.
pub fn comparison_string(baseline: Duration, sample: Duration) -> String {
    let ratio = baseline.as_secs_f64() / sample.as_secs_f64();
    if ratio > 1.0 {
        format!("{:.2}% faster", (ratio - 1.0) * 100.0)
    } else if ratio < 1.0 {
        format!("{:.2}% slower", (1.0 - ratio) * 100.0)
    } else {
        // Also reached for 0/0.
        "equal".to_string()
    }
}

/// One `<label> is <comparison>` line.
#[derive(Debug, Clone, Serialize)]
pub struct Comparison {
    pub label: String,
    pub elapsed_ns: u64,
    pub comparison: String,
}

/// A group of comparisons against a single baseline.
#[derive(Debug, Clone, Serialize)]
pub struct Section {
    pub baseline: String,
    pub baseline_ns: u64,
    pub comparisons: Vec<Comparison>,
}

impl Section {
    fn new<'a, I>(baseline_label: &str, baseline: Duration, samples: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, Duration)>,
    {
        Self {
            baseline: baseline_label.to_string(),
            baseline_ns: baseline.as_nanos() as u64,
            comparisons: samples
                .into_iter()
                .map(|(label, elapsed)| Comparison {
                    label: label.to_string(),
                    elapsed_ns: elapsed.as_nanos() as u64,
                    comparison: comparison_string(baseline, elapsed),
                })
                .collect(),
        }
    }
}

pub const SHALLOW_DYNAMIC_LABEL: &str = "Shallow dynamic value";
pub const SHALLOW_STATIC_LABEL: &str = "Shallow static value";
pub const MARKERS_DYNAMIC_LABEL: &str = "Dynamic marker fetch";
pub const MARKERS_STATIC_LABEL: &str = "Static marker fetch";

/// Full comparison table for one suite run.
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub sections: Vec<Section>,
}

impl Report {
    /// Nested accessors against `baseline`, then the static shallow and
    /// marker fetches against their dynamic counterparts.
    pub fn new(results: &SuiteResults, baseline: Accessor) -> Self {
        let nested = Section::new(
            baseline.label(),
            results.elapsed(baseline),
            Accessor::ALL
                .iter()
                .map(|accessor| (accessor.label(), results.elapsed(*accessor))),
        );
        let shallow = Section::new(
            SHALLOW_DYNAMIC_LABEL,
            results.shallow_dynamic,
            [(SHALLOW_STATIC_LABEL, results.shallow_static)],
        );
        let markers = Section::new(
            MARKERS_DYNAMIC_LABEL,
            results.markers_dynamic,
            [(MARKERS_STATIC_LABEL, results.markers_static)],
        );
        Self {
            sections: vec![nested, shallow, markers],
        }
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for section in &self.sections {
            writeln!(f, "Compared to {}:", section.baseline.to_lowercase())?;
            for c in &section.comparisons {
                writeln!(f, "{} is {}", c.label, c.comparison)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Run parameters and host details emitted alongside a JSON report.
#[derive(Debug, Clone, Serialize)]
pub struct RunMetadata {
    pub crate_version: String,
    pub os: String,
    pub arch: String,
    pub cores: usize,
    pub repeats: usize,
    pub marker_count: usize,
    pub filler_count: usize,
    pub baseline: Accessor,
}

impl RunMetadata {
    pub fn capture(config: &BenchConfig) -> Self {
        Self {
            crate_version: env!("CARGO_PKG_VERSION").to_string(),
            os: std::env::consts::OS.to_string(),
            arch: std::env::consts::ARCH.to_string(),
            cores: std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(0),
            repeats: config.repeats,
            marker_count: config.marker_count,
            filler_count: config.filler_count,
            baseline: config.baseline,
        }
    }
}

/// Top-level JSON document printed with `--json`.
#[derive(Debug, Clone, Serialize)]
pub struct JsonReport<'a> {
    pub metadata: RunMetadata,
    pub report: &'a Report,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn equal_timings() {
        assert_eq!(comparison_string(ms(7), ms(7)), "equal");
        assert_eq!(comparison_string(Duration::ZERO, Duration::ZERO), "equal");
    }

    #[test]
    fn half_the_time_is_100_percent_faster() {
        assert_eq!(comparison_string(ms(20), ms(10)), "100.00% faster");
    }

    #[test]
    fn double_the_time_is_50_percent_slower() {
        assert_eq!(comparison_string(ms(20), ms(40)), "50.00% slower");
    }

    #[test]
    fn rounds_to_two_places() {
        assert_eq!(comparison_string(ms(4), ms(3)), "33.33% faster");
        assert_eq!(comparison_string(ms(3), ms(4)), "25.00% slower");
    }

    #[test]
    fn zero_sample_is_infinitely_faster() {
        assert_eq!(comparison_string(ms(1), Duration::ZERO), "inf% faster");
    }

    #[test]
    fn report_layout() {
        let results = SuiteResults::from_timings(
            1_000,
            [ms(10), ms(20), ms(10), ms(5), ms(5), ms(40)],
            [ms(2), ms(1)],
            [ms(3), ms(3)],
        );
        let report = Report::new(&results, Accessor::DynamicIfLet);
        let text = report.to_string();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "Compared to dynamic if/let:");
        assert_eq!(lines[1], "Dynamic if/let is equal");
        assert_eq!(lines[2], "Dynamic bridged to typed map if/let is 50.00% slower");
        assert_eq!(lines[4], "Static if/let is 100.00% faster");
        assert_eq!(lines[6], "Dynamic key path is 75.00% slower");
        assert_eq!(lines[7], "");
        assert_eq!(lines[8], "Compared to shallow dynamic value:");
        assert_eq!(lines[9], "Shallow static value is 100.00% faster");
        assert_eq!(lines[12], "Static marker fetch is equal");
    }

    #[test]
    fn report_serializes() {
        let results = SuiteResults::from_timings(
            10,
            [ms(1); 6],
            [ms(1), ms(1)],
            [ms(1), ms(1)],
        );
        let report = Report::new(&results, Accessor::StaticIfLet);
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["sections"][0]["baseline"], "Static if/let");
        assert_eq!(json["sections"][0]["comparisons"].as_array().unwrap().len(), 6);
        assert_eq!(json["sections"][1]["baseline_ns"], 1_000_000);
    }
}
