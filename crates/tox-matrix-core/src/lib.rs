//! Build/test matrix generation for tox based CI pipelines.
//!
//! [`generate`] is a pure function of [`MatrixInputs`] and the static tables
//! in [`catalog`]. Named jobs and the platform x version expansion land in one
//! [`JobSet`], which is returned in human name order. Any error aborts the
//! whole computation.

use serde::Serialize;
use tracing::debug;

pub mod catalog;
pub mod error;
pub mod expand;
pub mod inputs;
pub mod job;
pub mod named;
pub mod order;
pub mod versions;

pub use error::MatrixError;
pub use inputs::{MatrixInputs, RawInputs};
pub use job::{JobRecord, JobSet};

/// Output document consumed by the CI fan-out (`strategy.matrix`).
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Matrix {
    pub include: Vec<JobRecord>,
}

impl Matrix {
    pub fn names(&self) -> Vec<&str> {
        self.include.iter().map(|j| j.name.as_str()).collect()
    }

    pub fn to_json(&self) -> Result<String, MatrixError> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn to_json_pretty(&self) -> Result<String, MatrixError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

pub fn generate(inputs: &MatrixInputs) -> Result<Matrix, MatrixError> {
    generate_with_catalog(catalog::KNOWN_PYTHONS, inputs)
}

/// [`generate`] against an explicit version catalog, oldest first.
pub fn generate_with_catalog(
    known: &[&str],
    inputs: &MatrixInputs,
) -> Result<Matrix, MatrixError> {
    debug!(
        "Testing strategy: {}",
        inputs
            .strategies
            .iter()
            .map(|(p, s)| format!("{}={}", p.as_str(), s.as_str()))
            .collect::<Vec<_>>()
            .join(", ")
    );

    let versions = versions::resolve_range(known, &inputs.min_python, &inputs.max_python)?;
    debug!("Python versions in range: {}", versions.join(", "));

    let mut jobs = JobSet::new();
    for job in named::named_jobs(&inputs.other_names, &inputs.default_python)? {
        jobs.add_job(job)?;
    }
    if !inputs.skip_explode {
        for job in expand::expand(&inputs.platforms, &inputs.strategies, &versions) {
            jobs.add_job(job)?;
        }
    }

    Ok(Matrix {
        include: jobs.into_ordered(),
    })
}
