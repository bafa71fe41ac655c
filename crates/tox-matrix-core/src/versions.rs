use once_cell::sync::Lazy;
use regex::Regex;

use crate::catalog::{redirect, DEVELOPMENT_MARKER};
use crate::error::MatrixError;

static PY_DIGITS: Lazy<Regex> = Lazy::new(|| Regex::new(r"py([0-9]+)").expect("valid py regex"));

/// Returns the contiguous slice of `catalog` from `min` to `max`, both
/// inclusive.
///
/// Both endpoints must be catalog members, except that `max` may be
/// [`DEVELOPMENT_MARKER`], which extends the slice to the catalog's last entry.
pub fn resolve_range<'a>(
    catalog: &[&'a str],
    min: &str,
    max: &str,
) -> Result<Vec<&'a str>, MatrixError> {
    let start = position(catalog, "min_python", min)?;
    let end = if max == DEVELOPMENT_MARKER {
        catalog.len()
    } else {
        position(catalog, "max_python", max)? + 1
    };
    if start >= end {
        return Err(MatrixError::config(format!(
            "min_python {min:?} is newer than max_python {max:?}"
        )));
    }
    Ok(catalog[start..end].to_vec())
}

fn position(catalog: &[&str], input: &str, version: &str) -> Result<usize, MatrixError> {
    catalog.iter().position(|v| *v == version).ok_or_else(|| {
        MatrixError::config(format!(
            "{input} value not found: {version:?} (known versions: {})",
            catalog.join(", ")
        ))
    })
}

/// Version embedded in a job name as `py<digits>`, e.g. `py310-devel` -> `3.10`.
///
/// The first digit is the major version, the rest the minor. A lone digit
/// (`py3`) yields just the major version.
pub fn infer_version(name: &str) -> Option<String> {
    let digits = PY_DIGITS.captures(name)?.get(1)?.as_str();
    let (major, minor) = digits.split_at(1);
    if minor.is_empty() {
        return Some(major.to_string());
    }
    Some(format!("{major}.{minor}"))
}

/// Version a named job runs on: the inferred one if present, else `default`,
/// in both cases after redirection.
pub fn job_version(name: &str, default: &str) -> String {
    let version = infer_version(name).unwrap_or_else(|| default.to_string());
    redirect(&version).to_string()
}

/// Short token used in generated job names and tox env names: the digits of
/// the version identifier (`3.13-dev` -> `313`).
pub fn version_token(version: &str) -> String {
    version.chars().filter(|c| c.is_ascii_digit()).collect()
}
