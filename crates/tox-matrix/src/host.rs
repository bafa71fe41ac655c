use std::fs::OpenOptions;
use std::io::Write as _;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};

const OUTPUT_DELIMITER: &str = "ghadelimiter_tox_matrix";

/// Capabilities of the automation platform the tool reports to.
pub(crate) trait ActionHost {
    fn set_output(&mut self, name: &str, value: &str) -> Result<()>;
    fn fail(&mut self, message: &str);
}

/// GitHub Actions: outputs go to the `$GITHUB_OUTPUT` file, failures are
/// `::error::` workflow commands on stdout.
#[derive(Debug)]
pub(crate) struct GithubHost {
    output_file: Option<PathBuf>,
}

impl GithubHost {
    pub(crate) fn from_env() -> Self {
        let output_file = std::env::var_os("GITHUB_OUTPUT")
            .filter(|v| !v.is_empty())
            .map(PathBuf::from);
        GithubHost { output_file }
    }
}

impl ActionHost for GithubHost {
    fn set_output(&mut self, name: &str, value: &str) -> Result<()> {
        let Some(path) = &self.output_file else {
            println!("::set-output name={name}::{}", escape_data(value));
            return Ok(());
        };
        let entry = output_entry(name, value)?;
        let mut f = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("open GITHUB_OUTPUT: {}", path.display()))?;
        f.write_all(entry.as_bytes())
            .with_context(|| format!("write GITHUB_OUTPUT: {}", path.display()))?;
        Ok(())
    }

    fn fail(&mut self, message: &str) {
        println!("::error::{}", escape_data(message));
    }
}

fn output_entry(name: &str, value: &str) -> Result<String> {
    if !value.contains('\n') && !value.contains('\r') {
        return Ok(format!("{name}={value}\n"));
    }
    if value.contains(OUTPUT_DELIMITER) {
        bail!("output {name:?} contains the reserved delimiter {OUTPUT_DELIMITER}");
    }
    Ok(format!(
        "{name}<<{OUTPUT_DELIMITER}\n{value}\n{OUTPUT_DELIMITER}\n"
    ))
}

fn escape_data(s: &str) -> String {
    s.replace('%', "%25")
        .replace('\r', "%0D")
        .replace('\n', "%0A")
}
