//! Turning the textual action inputs into validated [`MatrixInputs`].

use crate::catalog::{
    Platform, Strategy, IMPLICIT_DEFAULT_PYTHON, IMPLICIT_MAX_PYTHON, IMPLICIT_MIN_PYTHON,
};
use crate::error::MatrixError;
use crate::expand::Strategies;

/// Inputs exactly as the host hands them over. `None`, empty and
/// whitespace-only values all mean "unset".
#[derive(Clone, Debug, Default)]
pub struct RawInputs {
    pub other_names: Option<String>,
    pub other_envs: Option<String>,
    pub platforms: Option<String>,
    pub min_python: Option<String>,
    pub max_python: Option<String>,
    pub default_python: Option<String>,
    pub skip_explode: Option<String>,
    pub linux: Option<String>,
    pub macos: Option<String>,
    pub windows: Option<String>,
}

impl RawInputs {
    pub fn strategy(&self, platform: Platform) -> Option<&str> {
        let v = match platform {
            Platform::Linux => &self.linux,
            Platform::Macos => &self.macos,
            Platform::Windows => &self.windows,
        };
        non_empty(v)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MatrixInputs {
    /// Named job spec lines, one job per entry.
    pub other_names: Vec<String>,
    pub platforms: Vec<String>,
    pub min_python: String,
    pub max_python: String,
    pub default_python: String,
    pub skip_explode: bool,
    pub strategies: Strategies,
}

impl Default for MatrixInputs {
    fn default() -> Self {
        MatrixInputs {
            other_names: Vec::new(),
            platforms: Vec::new(),
            min_python: IMPLICIT_MIN_PYTHON.to_string(),
            max_python: IMPLICIT_MAX_PYTHON.to_string(),
            default_python: IMPLICIT_DEFAULT_PYTHON.to_string(),
            skip_explode: false,
            strategies: Strategies::new(),
        }
    }
}

impl MatrixInputs {
    pub fn from_raw(raw: &RawInputs) -> Result<Self, MatrixError> {
        let defaults = MatrixInputs::default();

        let mut other_names = Vec::new();
        for v in [&raw.other_names, &raw.other_envs] {
            if let Some(v) = non_empty(v) {
                other_names.extend(split_job_specs(v));
            }
        }

        let mut strategies = Strategies::new();
        for platform in Platform::ALL {
            strategies.insert(platform, parse_strategy(platform, raw.strategy(platform))?);
        }

        Ok(MatrixInputs {
            other_names,
            platforms: non_empty(&raw.platforms)
                .map(split_platforms)
                .unwrap_or_default(),
            min_python: non_empty(&raw.min_python)
                .map(str::to_string)
                .unwrap_or(defaults.min_python),
            max_python: non_empty(&raw.max_python)
                .map(str::to_string)
                .unwrap_or(defaults.max_python),
            default_python: non_empty(&raw.default_python)
                .map(str::to_string)
                .unwrap_or(defaults.default_python),
            skip_explode: match non_empty(&raw.skip_explode) {
                Some(v) => parse_skip_explode(v)?,
                None => defaults.skip_explode,
            },
            strategies,
        })
    }
}

fn non_empty(v: &Option<String>) -> Option<&str> {
    v.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

/// Splits the named-jobs input into spec lines.
///
/// Entries are newline separated. A line without `:` carries no commands and
/// may also list several names separated by commas; a line with commands is
/// kept whole so commas inside commands survive.
pub fn split_job_specs(raw: &str) -> Vec<String> {
    let mut out = Vec::new();
    for line in raw.lines().map(str::trim).filter(|l| !l.is_empty()) {
        if line.contains(':') {
            out.push(line.to_string());
            continue;
        }
        out.extend(
            line.split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string),
        );
    }
    out
}

pub fn split_platforms(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Integer flag; any nonzero value disables the platform x version expansion.
pub fn parse_skip_explode(raw: &str) -> Result<bool, MatrixError> {
    let n: i64 = raw.trim().parse().map_err(|_| {
        MatrixError::config(format!("skip_explode must be an integer, got {raw:?}"))
    })?;
    Ok(n != 0)
}

pub fn parse_strategy(platform: Platform, raw: Option<&str>) -> Result<Strategy, MatrixError> {
    let Some(raw) = raw else {
        return Ok(Strategy::default());
    };
    Strategy::parse(raw).ok_or_else(|| {
        MatrixError::config(format!(
            "invalid testing strategy for {}: {raw:?} (expected 'full' or 'minmax')",
            platform.as_str()
        ))
    })
}
