use std::io::Write as _;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use tox_matrix_core::{generate, Matrix, MatrixInputs, RawInputs};
use tracing::info;
use tracing_subscriber::EnvFilter;

mod host;

use host::{ActionHost, GithubHost};

/// Every input can come from the `INPUT_*` variable GitHub Actions sets, or
/// from the matching flag when run by hand.
#[derive(Debug, Parser)]
#[command(name = "tox-matrix")]
#[command(about = "Generates the CI job matrix for tox environments.", long_about = None)]
struct Cli {
    /// Extra jobs, one `name` or `name:cmd1;cmd2` per line.
    #[arg(long, env = "INPUT_OTHER_NAMES")]
    other_names: Option<String>,

    /// Same as --other-names; both lists are used when both are given.
    #[arg(long, env = "INPUT_OTHER_ENVS")]
    other_envs: Option<String>,

    /// Comma separated platforms (linux, macos, windows or a runner label).
    #[arg(long, env = "INPUT_PLATFORMS")]
    platforms: Option<String>,

    #[arg(long, env = "INPUT_MIN_PYTHON")]
    min_python: Option<String>,

    #[arg(long, env = "INPUT_MAX_PYTHON")]
    max_python: Option<String>,

    /// Python for extra jobs whose name does not embed a version.
    #[arg(long, env = "INPUT_DEFAULT_PYTHON")]
    default_python: Option<String>,

    /// Nonzero disables the platform x version expansion.
    #[arg(long, env = "INPUT_SKIP_EXPLODE")]
    skip_explode: Option<String>,

    /// Strategy for linux: full or minmax.
    #[arg(long, env = "INPUT_LINUX")]
    linux: Option<String>,

    /// Strategy for macos: full or minmax.
    #[arg(long, env = "INPUT_MACOS")]
    macos: Option<String>,

    /// Strategy for windows: full or minmax.
    #[arg(long, env = "INPUT_WINDOWS")]
    windows: Option<String>,

    /// Print the matrix document to stdout instead of setting the action output.
    #[arg(long)]
    json: bool,
}

impl Cli {
    fn raw_inputs(&self) -> RawInputs {
        RawInputs {
            other_names: self.other_names.clone(),
            other_envs: self.other_envs.clone(),
            platforms: self.platforms.clone(),
            min_python: self.min_python.clone(),
            max_python: self.max_python.clone(),
            default_python: self.default_python.clone(),
            skip_explode: self.skip_explode.clone(),
            linux: self.linux.clone(),
            macos: self.macos.clone(),
            windows: self.windows.clone(),
        }
    }
}

fn main() -> ExitCode {
    init_tracing();
    let cli = Cli::parse();
    let mut host = GithubHost::from_env();
    match try_main(&cli, &mut host) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            host.fail(&format!("Action failed due to {err:#}"));
            ExitCode::FAILURE
        }
    }
}

fn try_main(cli: &Cli, host: &mut dyn ActionHost) -> Result<()> {
    log_action_inputs();

    let inputs = MatrixInputs::from_raw(&cli.raw_inputs())?;
    let matrix = generate(&inputs)?;

    info!("Generated {} matrix entries.", matrix.include.len());
    info!("Job names: {}", matrix.names().join(", "));
    info!(
        "Matrix jobs ordered by their name: {}",
        serde_json::to_string_pretty(&matrix.include).context("encode matrix jobs")?
    );

    if cli.json {
        return write_json_stdout(&matrix);
    }
    host.set_output("matrix", &matrix.to_json()?)
}

fn init_tracing() {
    let default_level = if std::env::var("RUNNER_DEBUG").as_deref() == Ok("1") {
        "debug"
    } else {
        "info"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_ansi(false)
        .without_time()
        .init();
}

fn log_action_inputs() {
    let mut vars: Vec<(String, String)> = std::env::vars_os()
        .map(|(k, v)| (k.to_string_lossy().into_owned(), v.to_string_lossy().into_owned()))
        .filter(|(k, _)| k.starts_with("INPUT_"))
        .collect();
    vars.sort();
    for (k, v) in vars {
        info!("Env var {k}={v}");
    }
}

fn write_json_stdout(matrix: &Matrix) -> Result<()> {
    let mut bytes = matrix.to_json()?.into_bytes();
    bytes.push(b'\n');
    std::io::stdout()
        .write_all(&bytes)
        .context("write stdout")?;
    Ok(())
}
