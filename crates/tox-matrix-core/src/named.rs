//! Explicitly named jobs (`name` or `name:cmd1;cmd2;...`).

use crate::catalog::Platform;
use crate::error::MatrixError;
use crate::job::JobRecord;
use crate::versions::job_version;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NamedJobSpec {
    pub name: String,
    pub commands: Vec<String>,
}

impl NamedJobSpec {
    /// Parses one spec line. Without `:` the single command is
    /// `tox -e <name>`; with it, the right side is split on `;`.
    pub fn parse(line: &str) -> Result<Self, MatrixError> {
        let (name, commands): (&str, Vec<String>) = match line.split_once(':') {
            Some((name, rest)) => (
                name.trim(),
                rest.split(';').map(|c| c.trim().to_string()).collect(),
            ),
            None => {
                let name = line.trim();
                (name, vec![format!("tox -e {name}")])
            }
        };
        if name.is_empty() {
            return Err(MatrixError::config(format!(
                "job spec {line:?} has an empty name"
            )));
        }
        if let Some(idx) = commands.iter().position(|c| c.is_empty()) {
            return Err(MatrixError::config(format!(
                "job {name:?} has an empty command at position {}",
                idx + 1
            )));
        }
        Ok(NamedJobSpec {
            name: name.to_string(),
            commands,
        })
    }

    pub fn into_job(self, default_python: &str) -> JobRecord {
        let python_version = job_version(&self.name, default_python);
        let os = infer_platform(&self.name).runner();
        let mut commands = self.commands.into_iter();
        let command = commands.next().unwrap_or_default();
        JobRecord {
            name: self.name,
            command,
            extra_commands: commands.collect(),
            python_version,
            os: os.to_string(),
        }
    }
}

/// First known platform whose name occurs anywhere in `name`; the implicit
/// platform otherwise.
pub fn infer_platform(name: &str) -> Platform {
    Platform::ALL
        .into_iter()
        .find(|p| name.contains(p.as_str()))
        .unwrap_or_default()
}

/// Converts every spec line into a job record, failing on the first bad line.
pub fn named_jobs<S: AsRef<str>>(
    lines: &[S],
    default_python: &str,
) -> Result<Vec<JobRecord>, MatrixError> {
    lines
        .iter()
        .map(|line| NamedJobSpec::parse(line.as_ref()).map(|spec| spec.into_job(default_python)))
        .collect()
}
