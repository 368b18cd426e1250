//! postgen - Generate Postman collections from OpenAPI specs and sync them to a Postman workspace

use clap::Parser;
use log::LevelFilter;

mod cli;
mod client;
mod config;
mod convert;
mod error;
mod models;
mod openapi;
mod output;
mod postman;
mod sync;

use cli::{Cli, Commands, GlobalOptions};
use error::{Error, Result};

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("Error: {}", err);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.debug);

    tokio::select! {
        result = dispatch(cli) => result,
        _ = tokio::signal::ctrl_c() => Err(Error::Interrupted),
    }
}

/// `warn` by default, `debug` with `--debug`; `RUST_LOG` overrides both
fn init_logging(debug: bool) {
    let level = if debug {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };

    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .format_timestamp(None)
        .init();
}

async fn dispatch(cli: Cli) -> Result<()> {
    let opts = GlobalOptions::from_cli(&cli);

    match cli.command {
        Commands::Convert {
            source,
            output,
            environments,
        } => cli::convert::run(&opts, &source, &output, &environments).await,
        Commands::Deploy {
            collection,
            environments,
            connection,
        } => cli::deploy::run(&opts, collection.as_deref(), &environments, &connection).await,
        Commands::Delete {
            x_api_id,
            dry_run,
            yes,
            connection,
        } => cli::delete::run(&opts, &x_api_id, dry_run, yes, &connection).await,
        Commands::Assets { connection } => cli::assets::run(&opts, &connection).await,
        Commands::Init => cli::init::run(&opts).await,
        Commands::Status => cli::status::run(&opts),
        Commands::Version => {
            println!("postgen version {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        Commands::Completion { shell } => {
            cli::completions::run(shell);
            Ok(())
        }
    }
}
