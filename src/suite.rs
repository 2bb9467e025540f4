//! Sequential benchmark suite.
//!
//! Builds fixtures, times every accessor one after another, and writes the
//! comparison report. Progress markers (`.`) and the report go to the
//! supplied writer so tests can capture them; diagnostics go through
//! `tracing`.

use std::io::{self, Write};
use std::time::Duration;

use thiserror::Error;
use tracing::{debug, info};

use crate::config::{BenchConfig, OutputFormat};
use crate::fetch::{
    fetch_markers_dynamic, fetch_markers_static, shallow_fetch_dynamic, shallow_fetch_static,
    Accessor, TARGET_MARKERS,
};
use crate::fixtures::{build_nested_fixtures, NestedFixtures, ShallowFixtures};
use crate::report::{JsonReport, Report, RunMetadata};
use crate::timer::time_fetch;

#[derive(Debug, Error)]
pub enum BenchError {
    #[error("failed to write report: {0}")]
    Io(#[from] io::Error),
    #[error("failed to encode report: {0}")]
    Json(#[from] serde_json::Error),
}

/// Elapsed time of every timed run in one suite.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuiteResults {
    pub repeats: usize,
    nested: [Duration; Accessor::COUNT],
    pub shallow_dynamic: Duration,
    pub shallow_static: Duration,
    pub markers_dynamic: Duration,
    pub markers_static: Duration,
}

impl SuiteResults {
    /// `nested` is indexed in [`Accessor::ALL`] order; `shallow` and
    /// `markers` are `[dynamic, static]`.
    pub fn from_timings(
        repeats: usize,
        nested: [Duration; Accessor::COUNT],
        shallow: [Duration; 2],
        markers: [Duration; 2],
    ) -> Self {
        Self {
            repeats,
            nested,
            shallow_dynamic: shallow[0],
            shallow_static: shallow[1],
            markers_dynamic: markers[0],
            markers_static: markers[1],
        }
    }

    pub fn elapsed(&self, accessor: Accessor) -> Duration {
        self.nested[accessor as usize]
    }
}

fn progress<W: Write>(out: &mut W, config: &BenchConfig) -> io::Result<()> {
    if !config.shows_progress() {
        return Ok(());
    }
    write!(out, ".")?;
    out.flush()
}

/// Time every accessor against the given fixtures, in a fixed order.
///
/// Panics if any accessor fails to fetch its value.
pub fn run_suite<W: Write>(
    config: &BenchConfig,
    nested: &NestedFixtures,
    shallow: &ShallowFixtures,
    out: &mut W,
) -> io::Result<SuiteResults> {
    let repeats = config.repeats;

    let mut nested_times = [Duration::ZERO; Accessor::COUNT];
    for accessor in Accessor::ALL {
        let elapsed = time_fetch(repeats, || accessor.fetch(nested));
        debug!(accessor = accessor.name(), elapsed_ns = elapsed.as_nanos() as u64, "timed");
        nested_times[accessor as usize] = elapsed;
        progress(out, config)?;
    }

    let middle = TARGET_MARKERS[1];
    let mut timed = |name: &str, elapsed: Duration| -> io::Result<Duration> {
        debug!(accessor = name, elapsed_ns = elapsed.as_nanos() as u64, "timed");
        progress(out, config)?;
        Ok(elapsed)
    };
    let shallow_dynamic = timed(
        "shallow-dynamic",
        time_fetch(repeats, || shallow_fetch_dynamic(&shallow.dynamic, middle)),
    )?;
    let shallow_static = timed(
        "shallow-static",
        time_fetch(repeats, || shallow_fetch_static(&shallow.typed, middle)),
    )?;
    let markers_dynamic = timed(
        "markers-dynamic",
        time_fetch(repeats, || fetch_markers_dynamic(&shallow.dynamic)),
    )?;
    let markers_static = timed(
        "markers-static",
        time_fetch(repeats, || fetch_markers_static(&shallow.typed)),
    )?;

    Ok(SuiteResults::from_timings(
        repeats,
        nested_times,
        [shallow_dynamic, shallow_static],
        [markers_dynamic, markers_static],
    ))
}

/// Build fixtures, run the suite and write the report in the configured format.
pub fn run<W: Write>(config: &BenchConfig, out: &mut W) -> Result<Report, BenchError> {
    info!(
        repeats = config.repeats,
        baseline = config.baseline.name(),
        "running lookup suite"
    );

    let nested = build_nested_fixtures();
    assert!(
        nested.is_consistent(),
        "dynamic and typed fixtures diverge; timings would not be comparable"
    );
    let shallow = ShallowFixtures::build(config.marker_count, config.filler_count);

    let results = run_suite(config, &nested, &shallow, out)?;
    let report = Report::new(&results, config.baseline);

    match config.format {
        OutputFormat::Text => {
            if config.shows_progress() {
                writeln!(out)?;
                writeln!(out)?;
            }
            write!(out, "{}", report)?;
        }
        OutputFormat::Json => {
            let doc = JsonReport {
                metadata: RunMetadata::capture(config),
                report: &report,
            };
            serde_json::to_writer_pretty(&mut *out, &doc)?;
            writeln!(out)?;
        }
    }
    out.flush()?;

    info!("lookup suite finished");
    Ok(report)
}
