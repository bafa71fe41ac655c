use std::collections::BTreeMap;
use std::fmt;

use serde::ser::{Serialize, SerializeMap, Serializer};
use tracing::debug;

use crate::error::MatrixError;
use crate::order::sort_human;

/// One entry of the generated matrix.
///
/// Serializes as a flat object whose keys are sorted alphabetically; the
/// secondary commands become `command2`, `command3`, ... in order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct JobRecord {
    pub name: String,
    pub command: String,
    pub extra_commands: Vec<String>,
    pub python_version: String,
    pub os: String,
}

impl JobRecord {
    pub fn new(
        name: impl Into<String>,
        command: impl Into<String>,
        python_version: impl Into<String>,
        os: impl Into<String>,
    ) -> Self {
        JobRecord {
            name: name.into(),
            command: command.into(),
            extra_commands: Vec::new(),
            python_version: python_version.into(),
            os: os.into(),
        }
    }

    /// All output fields keyed by their serialized name.
    pub fn fields(&self) -> BTreeMap<String, &str> {
        let mut out = BTreeMap::new();
        out.insert("name".to_string(), self.name.as_str());
        out.insert("command".to_string(), self.command.as_str());
        for (idx, cmd) in self.extra_commands.iter().enumerate() {
            out.insert(format!("command{}", idx + 2), cmd.as_str());
        }
        out.insert("python_version".to_string(), self.python_version.as_str());
        out.insert("os".to_string(), self.os.as_str());
        out
    }
}

impl Serialize for JobRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let fields = self.fields();
        let mut map = serializer.serialize_map(Some(fields.len()))?;
        for (k, v) in &fields {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

impl fmt::Display for JobRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = serde_json::to_string(self).map_err(|_| fmt::Error)?;
        f.write_str(&s)
    }
}

/// The result set jobs are merged into, keyed by job name.
#[derive(Debug, Default)]
pub struct JobSet {
    jobs: BTreeMap<String, JobRecord>,
}

impl JobSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts `job`, rejecting a name that is already present.
    pub fn add_job(&mut self, job: JobRecord) -> Result<(), MatrixError> {
        if let Some(existing) = self.jobs.get(&job.name) {
            return Err(MatrixError::DuplicateJob {
                name: job.name.clone(),
                existing: Box::new(existing.clone()),
                attempted: Box::new(job),
            });
        }
        debug!(name = %job.name, os = %job.os, python = %job.python_version, "add job");
        self.jobs.insert(job.name.clone(), job);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&JobRecord> {
        self.jobs.get(name)
    }

    pub fn len(&self) -> usize {
        self.jobs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.jobs.is_empty()
    }

    /// Job names in human order.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.jobs.keys().cloned().collect();
        sort_human(&mut names);
        names
    }

    /// Consumes the set, returning its jobs in human name order.
    pub fn into_ordered(mut self) -> Vec<JobRecord> {
        self.names()
            .into_iter()
            .filter_map(|name| self.jobs.remove(&name))
            .collect()
    }
}
