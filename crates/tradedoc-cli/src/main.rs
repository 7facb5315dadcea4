//! # tradedoc CLI Entry Point
//!
//! Assembles subcommands and dispatches to handler modules.

use clap::Parser;

/// Trade Document Stack CLI.
///
/// Exercises the document lifecycle engine locally: runs complete
/// transaction flows and inspects the trade term table.
#[derive(Parser, Debug)]
#[command(name = "tradedoc", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Drive one complete transaction and print the consolidated view.
    Flow(tradedoc_cli::flow::FlowArgs),
    /// Print the trade term table.
    Terms(tradedoc_cli::terms::TermsArgs),
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Flow(args) => {
            let view = tradedoc_cli::flow::run(&args)?;
            println!("{}", serde_json::to_string_pretty(&view)?);
        }
        Commands::Terms(_args) => {
            print!("{}", tradedoc_cli::terms::render());
        }
    }

    Ok(())
}
