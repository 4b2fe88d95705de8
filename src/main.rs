// Entrypoint for the CLI application.
// - Keeps `main` small: resolve config, build the API client and the
//   controller, then either run one submission or hand over to the menu.
// - Returns `anyhow::Result` for setup failures; submission outcomes are
//   reported through the exit code.

use anyhow::{Context, Result};
use clap::Parser;
use resume_match_cli::config::{AppConfig, Overrides};
use resume_match_cli::controller::SubmissionController;
use resume_match_cli::model::UiState;
use resume_match_cli::ui::{main_menu, TerminalView};
use resume_match_cli::ApiClient;
use std::io::{self, Read};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "resume-match", version, about = "Score a resume against a job description")]
struct Cli {
    /// Resume file (PDF or DOCX).
    #[arg(long, value_name = "PATH")]
    resume: Option<PathBuf>,

    /// Job description file, or `-` for stdin.
    #[arg(long, value_name = "PATH", conflicts_with = "job_text")]
    job: Option<PathBuf>,

    /// Job description given inline.
    #[arg(long, value_name = "TEXT")]
    job_text: Option<String>,

    /// Matching endpoint URL (overrides config file and RESUME_MATCH_ENDPOINT).
    #[arg(long, value_name = "URL")]
    endpoint: Option<String>,

    /// Do not print the matched-skills list.
    #[arg(long)]
    hide_matched: bool,

    /// Maximum number of missing skills to print (0 = all).
    #[arg(long, value_name = "N", conflicts_with = "show_all_missing")]
    missing_limit: Option<usize>,

    /// Print every missing skill.
    #[arg(long)]
    show_all_missing: bool,

    /// Debug logging on stderr.
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)))
        .with_writer(io::stderr)
        .init();

    let config = resolve_config(&cli)?;
    debug!(?config, "Resolved configuration");

    let api = ApiClient::new(config.endpoint_url.clone())?;
    let mut controller = SubmissionController::new(api, TerminalView::new(), config.display);

    let job_text = read_job_text(&cli)?;
    if cli.resume.is_none() && job_text.is_none() {
        main_menu(&mut controller)?;
        return Ok(ExitCode::SUCCESS);
    }

    let state = controller.submit(cli.resume.as_deref(), job_text.as_deref());
    Ok(match state {
        UiState::Success(_) => ExitCode::SUCCESS,
        UiState::Error(_) => ExitCode::from(1),
        // Validation blocked the submission.
        UiState::Idle | UiState::Loading => ExitCode::from(2),
    })
}

fn resolve_config(cli: &Cli) -> Result<AppConfig> {
    let missing_skills_limit = if cli.show_all_missing {
        Some(None)
    } else {
        cli.missing_limit.map(|n| (n > 0).then_some(n))
    };
    let overrides = Overrides {
        endpoint_url: cli.endpoint.clone(),
        show_matched_skills: cli.hide_matched.then_some(false),
        missing_skills_limit,
    };
    AppConfig::load(&overrides).context("Failed to load configuration")
}

fn read_job_text(cli: &Cli) -> Result<Option<String>> {
    if let Some(text) = &cli.job_text {
        return Ok(Some(text.clone()));
    }
    match &cli.job {
        Some(path) if path.as_os_str() == "-" => {
            let mut text = String::new();
            io::stdin()
                .read_to_string(&mut text)
                .context("Failed to read job description from stdin")?;
            Ok(Some(text))
        }
        Some(path) => std::fs::read_to_string(path)
            .map(Some)
            .with_context(|| format!("Failed to read job description '{}'", path.display())),
        None => Ok(None),
    }
}
