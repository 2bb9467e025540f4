//! Run configuration.
//!
//! Defaults, optionally overlaid by a JSON config file (`--config`), then by
//! individual command-line flags. Nothing is required: running with no
//! arguments uses the defaults.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::fetch::Accessor;
use crate::fixtures::{DEFAULT_FILLER_COUNT, DEFAULT_MARKER_COUNT};
use crate::timer::DEFAULT_REPEATS;

/// Marker fetches read `Test1..=Test3`, so fixtures need at least three.
pub const MIN_MARKER_COUNT: usize = 3;

pub const USAGE: &str = "\
Usage: lookup-bench [OPTIONS]

Options:
  --repeats <N>        calls per timed accessor (default 20000)
  --fillers <N>        random entries between shallow markers (default 100)
  --markers <N>        marker keys in shallow fixtures, at least 3 (default 3)
  --baseline <NAME>    accessor the nested timings are compared against
  --config <FILE>      JSON config file, overridden by the flags above
  --json               print the report as JSON
  -q, --quiet          no progress markers
  -h, --help           print this help";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing value for {0}")]
    MissingValue(String),
    #[error("invalid value '{value}' for {flag}")]
    InvalidNumber { flag: String, value: String },
    #[error("{0}")]
    UnknownAccessor(String),
    #[error("unknown argument '{0}'")]
    UnknownArgument(String),
    #[error("failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("{0}")]
    Invalid(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BenchConfig {
    pub repeats: usize,
    pub filler_count: usize,
    pub marker_count: usize,
    pub baseline: Accessor,
    pub format: OutputFormat,
    pub quiet: bool,
}

impl Default for BenchConfig {
    fn default() -> Self {
        Self {
            repeats: DEFAULT_REPEATS,
            filler_count: DEFAULT_FILLER_COUNT,
            marker_count: DEFAULT_MARKER_COUNT,
            baseline: Accessor::DynamicIfLet,
            format: OutputFormat::Text,
            quiet: false,
        }
    }
}

impl BenchConfig {
    /// Load and validate a JSON config file. Missing fields keep their defaults.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let config = Self::read_file(path)?;
        config.validate()?;
        Ok(config)
    }

    /// Not validated: flags may still override what the file sets.
    fn read_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Build a config from command-line arguments (without the program name).
    pub fn from_args<I, S>(args: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let args: Vec<String> = args.into_iter().map(Into::into).collect();

        let mut config = match config_path(&args)? {
            Some(path) => Self::read_file(Path::new(path))?,
            None => Self::default(),
        };

        let mut i = 0;
        while i < args.len() {
            match args[i].as_str() {
                "--repeats" => config.repeats = parse_count(&args, &mut i)?,
                "--fillers" => config.filler_count = parse_count(&args, &mut i)?,
                "--markers" => config.marker_count = parse_count(&args, &mut i)?,
                "--baseline" => {
                    config.baseline = flag_value(&args, &mut i)?
                        .parse::<Accessor>()
                        .map_err(ConfigError::UnknownAccessor)?;
                }
                // Already applied above.
                "--config" => {
                    flag_value(&args, &mut i)?;
                }
                "--json" => config.format = OutputFormat::Json,
                "-q" | "--quiet" => config.quiet = true,
                other => return Err(ConfigError::UnknownArgument(other.to_string())),
            }
            i += 1;
        }

        config.validate()?;
        Ok(config)
    }

    /// Progress dots are only written alongside text output.
    pub fn shows_progress(&self) -> bool {
        !self.quiet && self.format == OutputFormat::Text
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.repeats == 0 {
            return Err(ConfigError::Invalid("repeats must be at least 1".into()));
        }
        if self.marker_count < MIN_MARKER_COUNT {
            return Err(ConfigError::Invalid(format!(
                "marker count must be at least {}, got {}",
                MIN_MARKER_COUNT, self.marker_count
            )));
        }
        Ok(())
    }
}

/// True if the arguments ask for usage text.
pub fn wants_help<S: AsRef<str>>(args: &[S]) -> bool {
    args.iter().any(|a| matches!(a.as_ref(), "-h" | "--help"))
}

fn config_path(args: &[String]) -> Result<Option<&str>, ConfigError> {
    match args.iter().position(|a| a == "--config") {
        Some(pos) => args
            .get(pos + 1)
            .map(|p| Some(p.as_str()))
            .ok_or_else(|| ConfigError::MissingValue("--config".into())),
        None => Ok(None),
    }
}

fn flag_value<'a>(args: &'a [String], i: &mut usize) -> Result<&'a str, ConfigError> {
    let flag = &args[*i];
    *i += 1;
    args.get(*i)
        .map(String::as_str)
        .ok_or_else(|| ConfigError::MissingValue(flag.clone()))
}

fn parse_count(args: &[String], i: &mut usize) -> Result<usize, ConfigError> {
    let flag = args[*i].clone();
    let value = flag_value(args, i)?;
    value
        .replace('_', "")
        .parse()
        .map_err(|_| ConfigError::InvalidNumber {
            flag,
            value: value.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_arguments_means_defaults() {
        let config = BenchConfig::from_args(Vec::<String>::new()).unwrap();
        assert_eq!(config, BenchConfig::default());
        assert_eq!(config.repeats, 20_000);
        assert_eq!(config.baseline, Accessor::DynamicIfLet);
    }

    #[test]
    fn flags_override_defaults() {
        let config = BenchConfig::from_args([
            "--repeats",
            "10_000",
            "--fillers",
            "50",
            "--markers",
            "4",
            "--baseline",
            "static-optional-chain",
            "--json",
            "-q",
        ])
        .unwrap();
        assert_eq!(config.repeats, 10_000);
        assert_eq!(config.filler_count, 50);
        assert_eq!(config.marker_count, 4);
        assert_eq!(config.baseline, Accessor::StaticOptionalChain);
        assert_eq!(config.format, OutputFormat::Json);
        assert!(config.quiet);
    }

    #[test]
    fn rejects_bad_input() {
        assert!(matches!(
            BenchConfig::from_args(["--repeats", "lots"]),
            Err(ConfigError::InvalidNumber { .. })
        ));
        assert!(matches!(
            BenchConfig::from_args(["--repeats"]),
            Err(ConfigError::MissingValue(_))
        ));
        assert!(matches!(
            BenchConfig::from_args(["--baseline", "nsdict"]),
            Err(ConfigError::UnknownAccessor(_))
        ));
        assert!(matches!(
            BenchConfig::from_args(["--verbose"]),
            Err(ConfigError::UnknownArgument(_))
        ));
        assert!(matches!(
            BenchConfig::from_args(["--markers", "2"]),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            BenchConfig::from_args(["--repeats", "0"]),
            Err(ConfigError::Invalid(_))
        ));
    }

    #[test]
    fn help_flags() {
        assert!(wants_help(&["--json", "-h"][..]));
        assert!(wants_help(&["--help"][..]));
        assert!(!wants_help(&["--json"][..]));
    }
}
