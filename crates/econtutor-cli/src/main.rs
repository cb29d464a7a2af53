//! CLI entry point - the composition root.

use clap::Parser;

use econtutor_cli::{Cli, Commands, handlers, init_logging, load_config, load_env};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Before parsing, so `.env` can supply flag defaults such as PORT
    load_env();
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = load_config(cli.model)?;

    match cli.command {
        Commands::Serve { port } => handlers::serve::execute(config, port).await?,
        Commands::Invoke { function, event } => {
            handlers::invoke::execute(config, function, event.as_deref()).await?;
        }
        Commands::Health => handlers::health::execute(config).await?,
    }

    Ok(())
}
