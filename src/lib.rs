//! Micro-benchmarks for nested map lookups.
//!
//! Compares a dynamically typed [`value::Value`] tree against a statically
//! typed nested `HashMap`, across several access idioms (chained `if let`,
//! `Option` chains and dotted key paths).

pub mod config;
pub mod fetch;
pub mod fixtures;
pub mod report;
pub mod suite;
pub mod timer;
pub mod value;

pub use config::{BenchConfig, ConfigError};
pub use fetch::Accessor;
pub use fixtures::{build_nested_fixtures, NestedFixtures, ShallowFixtures};
pub use report::{comparison_string, Report};
pub use suite::{run, run_suite, BenchError, SuiteResults};
pub use timer::time_fetch;
pub use value::Value;
