//! ANS CLI
//!
//! Command-line interface for the ANS Cloudflare and DRaaS APIs.

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use ansctl::cli::{
    build_client, generate_completion, handle_cloudflare, handle_config, handle_draas,
    output_options, Cli, Commands,
};
use ansctl::config::{CliConfig, ConfigBuilder};
use ansctl::format::Output;

/// Initialize the tracing subscriber.
///
/// `RUST_LOG` wins; otherwise warnings only, or debug when verbose.
fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Resolve configuration using priority chain: CLI args → env → file → defaults
fn resolve_config(cli: &Cli) -> Result<CliConfig> {
    let mut builder = ConfigBuilder::new();

    if let Some(ref url) = cli.api_url {
        builder = builder.with_api_url(url)?;
    }
    if let Some(ref format) = cli.output {
        let format = ansctl::format::OutputFormat::from(format);
        builder = builder.with_output_format(format.as_str())?;
    }
    if cli.verbose {
        builder = builder.with_verbose(true);
    }
    if cli.strict_properties {
        builder = builder.with_strict_properties(true);
    }

    builder
        .with_env_overrides()
        .with_config_file(!cli.no_config, cli.config.as_deref())?
        .build()
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = match resolve_config(&cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Configuration error: {:#}", e);
            std::process::exit(1);
        }
    };

    init_tracing(config.verbose);
    tracing::debug!(api_url = %config.api_url, format = %config.output_format, "configuration resolved");

    let options = output_options(&cli, &config);
    let mut stdout = std::io::stdout();
    let mut stderr = std::io::stderr();
    let mut output = Output::new(options, &mut stdout, &mut stderr);

    // Malformed --filter/--sort is reported before the client is built.
    let list_flags = cli
        .command
        .list_args()
        .map(|list| list.parameters())
        .transpose();

    let result: Result<()> = match (list_flags, cli.command) {
        (Err(e), _) => Err(e.into()),
        (Ok(_), Commands::Cloudflare { command }) => match build_client(&config) {
            Ok(client) => handle_cloudflare(&client, command, &mut output).await,
            Err(e) => Err(e),
        },
        (Ok(_), Commands::Draas { command }) => match build_client(&config) {
            Ok(client) => handle_draas(&client, command, &mut output).await,
            Err(e) => Err(e),
        },
        (Ok(_), Commands::Config { command }) => {
            handle_config(command, &config, cli.config.as_deref(), &mut output)
        }
        (Ok(_), Commands::Completion { shell }) => {
            generate_completion(shell, &mut std::io::stdout());
            Ok(())
        }
    };

    if let Err(e) = result {
        drop(output);
        eprintln!("Error: {:#}", e);
        if config.verbose {
            eprintln!("Error details: {:?}", e);
        }
        std::process::exit(1);
    }

    Ok(())
}
