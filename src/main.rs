use clap::Parser;
use form_copilot::cli::commands::{
    CommandContext, cmd_analyze, cmd_ask, cmd_classify, cmd_fields, load_snapshot,
};
use form_copilot::cli::config::{Cli, Commands, load_config, log_level};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // RUST_LOG wins over -v
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(log_level(cli.verbose)));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let config = load_config(cli.config.as_deref());
    let mut ctx = CommandContext::from_config(&config, cli.trace.as_deref())?;

    let output = match cli.command {
        Commands::Classify { snapshot, json } => {
            cmd_classify(&mut ctx, &load_snapshot(&snapshot)?, json)?
        }
        Commands::Ask {
            snapshot,
            question,
            json,
        } => cmd_ask(&mut ctx, &load_snapshot(&snapshot)?, &question, json)?,
        Commands::Fields { snapshot } => cmd_fields(&mut ctx, &load_snapshot(&snapshot)?)?,
        Commands::Analyze { snapshot, json } => {
            cmd_analyze(&mut ctx, &load_snapshot(&snapshot)?, json)?
        }
    };

    println!("{}", output.trim_end());
    Ok(())
}
