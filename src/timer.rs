//! Hand-rolled wall-clock timing.
//!
//! No warm-up and no calibration: one `Instant` before the loop, one after.
//! Use the criterion benches for statistically meaningful numbers.

use std::hint::black_box;
use std::time::{Duration, Instant};

/// Default number of calls per timed accessor.
pub const DEFAULT_REPEATS: usize = 20_000;

/// Call `fetch` exactly `repeats` times and return the elapsed wall-clock time.
///
/// Only the last fetched value is kept. Panics if nothing was fetched, which
/// includes `repeats == 0`.
pub fn time_fetch<T, F>(repeats: usize, mut fetch: F) -> Duration
where
    F: FnMut() -> T,
{
    let start = Instant::now();
    let mut fetched = None;
    for _ in 0..repeats {
        fetched = Some(black_box(fetch()));
    }
    let elapsed = start.elapsed();
    assert!(fetched.is_some(), "No value fetched, benchmark failed");
    elapsed
}
