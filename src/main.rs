//! commitsmith - CLI entry point.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use tracing::warn;
use tracing_subscriber::EnvFilter;

use commitsmith::commit::{DiffPolicyKind, PromptFlow, TerminalConfirm, run};
use commitsmith::config::{Config, Settings, StageMode};
use commitsmith::git::{GitCli, Vcs, check_git_installed};
use commitsmith::llm::{ChatCompletionClient, PromptTemplate};

/// Write a commit message for staged changes with a chat-completion model.
#[derive(Parser, Debug)]
#[command(name = "commitsmith")]
#[command(about = "Write a commit message for staged changes with a chat-completion model")]
#[command(version)]
struct Cli {
    /// Run as if started in this directory
    #[arg(short = 'C', default_value = ".")]
    path: PathBuf,

    /// What to stage before reading the diff
    #[arg(long, value_enum)]
    stage: Option<StageMode>,

    /// Which diff to send to the model
    #[arg(long, value_enum)]
    policy: Option<DiffPolicyKind>,

    /// Which confirmation questions to ask
    #[arg(long, value_enum)]
    flow: Option<PromptFlow>,

    /// System instruction to send
    #[arg(long, value_enum)]
    template: Option<PromptTemplate>,

    /// Model identifier
    #[arg(short, long)]
    model: Option<String>,

    /// Include a fixed example exchange before the diff
    #[arg(long)]
    with_example: bool,

    /// Remote to push to
    #[arg(long)]
    remote: Option<String>,

    /// Branch to push to
    #[arg(long)]
    branch: Option<String>,

    /// Chat-completion API base URL
    #[arg(long)]
    base_url: Option<String>,

    /// Request timeout in seconds (0 = none)
    #[arg(long)]
    timeout: Option<u64>,

    /// Settings file (defaults to .commitsmith.toml in the working directory)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Print the commit command instead of committing
    #[arg(long)]
    dry_run: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn settings(&self) -> Settings {
        Settings {
            stage: self.stage,
            policy: self.policy,
            flow: self.flow,
            template: self.template,
            model: self.model.clone(),
            with_example: self.with_example.then_some(true),
            remote: self.remote.clone(),
            branch: self.branch.clone(),
            base_url: self.base_url.clone(),
            timeout_secs: self.timeout,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    load_dotenv(&cli.path);

    check_git_installed().context("git is required")?;

    let config = Config::resolve(&cli.path, cli.config.as_deref(), cli.settings(), cli.dry_run)
        .context("Failed to load configuration")?;

    let client = ChatCompletionClient::from_env(&config.base_url, config.request_timeout)
        .context("Failed to set up the completion client")?;

    let git = GitCli::new(&config.workdir);

    match run(&config, &git, &client, &TerminalConfirm).await {
        Ok(outcome) => println!("{outcome}"),
        Err(e) => {
            // Handled failures still exit 0; the staging area is always rolled back.
            println!("{e}");
            if let Err(reset_err) = git.reset_staging() {
                warn!("Failed to reset staging area: {reset_err}");
            }
        }
    }

    Ok(())
}

/// Install the tracing subscriber. `RUST_LOG` wins over `--verbose`.
fn init_tracing(verbose: bool) {
    let default_filter = if verbose { "commitsmith=debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Load `.env` from the working directory, falling back to the usual search.
fn load_dotenv(workdir: &Path) {
    if dotenv::from_path(workdir.join(".env")).is_err() {
        dotenv::dotenv().ok();
    }
}
