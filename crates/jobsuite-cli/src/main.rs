use clap::Parser;

mod cli;
mod commands;
mod context;
mod fetcher;

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        eprintln!("jobsuite error: {error:#}");
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();
    let serving = matches!(cli.command, cli::Commands::Serve(_));
    init_tracing(cli.quiet, cli.verbose, serving)?;

    let ctx = context::AppContext::init(cli.config.as_deref())?;

    match &cli.command {
        cli::Commands::Serve(args) => commands::serve::handle(args, ctx).await,
        cli::Commands::Auth { action } => commands::auth::handle(action, ctx).await,
        cli::Commands::Cache { action } => commands::cache::handle(action, ctx).await,
        cli::Commands::Estimates { action } => commands::estimates::handle(action, ctx).await,
        cli::Commands::Clients { action } => commands::clients::handle(action, ctx).await,
        cli::Commands::Upload { action } => commands::upload::handle(action, ctx).await,
        cli::Commands::Render { action } => commands::render::handle(action, &ctx),
    }
}

fn init_tracing(quiet: bool, verbose: bool, serving: bool) -> anyhow::Result<()> {
    let level = if quiet {
        "error"
    } else if verbose {
        "debug"
    } else if serving {
        "info"
    } else {
        "warn"
    };

    let filter = tracing_subscriber::EnvFilter::try_from_env("JOBSUITE_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .try_init()
        .map_err(|error| anyhow::anyhow!("failed to initialize tracing subscriber: {error}"))?;

    Ok(())
}
