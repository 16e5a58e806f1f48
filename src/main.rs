use clap::Parser;
use tracing::{debug, error};

use gitstep::cli::{Cli, Commands};
use gitstep::config::{JobDefinition, StepConfig};
use gitstep::env::JobEnvironment;
use gitstep::steps::{self, StepOutcome};
use gitstep::subprocess::SubprocessManager;
use gitstep::tools::{FileToolRegistry, ToolRegistry};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let log_level = match cli.verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .with_target(cli.verbose >= 2)
        .init();

    debug!("gitstep started with verbosity level: {}", cli.verbose);

    match run(cli).await {
        Ok(StepOutcome::Succeeded) => {}
        Ok(StepOutcome::Failed) => std::process::exit(1),
        Err(e) => {
            error!("Fatal error: {:#}", e);
            eprintln!("Error: {e:#}");
            std::process::exit(2);
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<StepOutcome> {
    let workspace = match cli.workspace {
        Some(path) => path,
        None => std::env::current_dir()?,
    };

    let environment = JobEnvironment::from_var_args(&cli.vars)?;
    let tools: Box<dyn ToolRegistry> = match &cli.tools {
        Some(path) => Box::new(FileToolRegistry::load(path)?),
        None => Box::new(FileToolRegistry::default_git()),
    };
    let subprocess = SubprocessManager::production();
    let job_name = cli.job_name.as_deref();

    let outcome = match cli.command {
        Commands::Run { job } => {
            let job = JobDefinition::load(&job)?;
            steps::run_job(
                &job,
                &workspace,
                job_name,
                tools.as_ref(),
                &environment,
                &subprocess,
            )
            .await?
        }
        Commands::Clone(args) => {
            let step = StepConfig::Clone(args.into());
            steps::run_step(
                &step,
                &workspace,
                job_name,
                tools.as_ref(),
                &environment,
                &subprocess,
            )
            .await?
        }
        Commands::Push(args) => {
            let step = StepConfig::Push(args.into());
            steps::run_step(
                &step,
                &workspace,
                job_name,
                tools.as_ref(),
                &environment,
                &subprocess,
            )
            .await?
        }
    };

    Ok(outcome)
}
