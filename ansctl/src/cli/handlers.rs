//! Handlers shared by every service: configuration, completion and the
//! resolution of global output flags.

use anyhow::{bail, Result};
use std::path::{Path, PathBuf};

use crate::client::AnsClient;
use crate::config::CliConfig;
use crate::format::{Columns, Output, OutputOptions, Provider};

use super::commands::*;

const MASKED_KEY: &str = "********";

/// Turn the global column flags and the resolved config into render settings.
pub fn output_options(cli: &Cli, config: &CliConfig) -> OutputOptions {
    let columns = if cli.all_properties {
        Columns::All
    } else {
        let names: Vec<String> = cli
            .properties
            .iter()
            .map(|p| p.trim().to_string())
            .filter(|p| !p.is_empty())
            .collect();
        if names.is_empty() {
            Columns::Default
        } else {
            Columns::Named(names)
        }
    };

    OutputOptions {
        format: config.format(),
        columns,
        strict: config.strict_properties,
        currency: config.currency(),
    }
}

/// Build the HTTP client from the resolved config.
pub fn build_client(config: &CliConfig) -> Result<AnsClient> {
    if config.api_key.is_empty() {
        bail!(
            "No API key configured. Set ANS_API_KEY or run `ansctl config set api_key <key>`"
        );
    }
    AnsClient::new(&config.api_url, &config.api_key, config.timeout)
}

fn config_file(path: Option<&Path>) -> Result<PathBuf> {
    match path {
        Some(path) => Ok(path.to_path_buf()),
        None => CliConfig::config_path(),
    }
}

/// Handle config commands
///
/// `set` and `reset` act on the file contents only, so environment and flag
/// overrides of this invocation are never persisted.
pub fn handle_config(
    command: ConfigCommands,
    current_config: &CliConfig,
    path: Option<&Path>,
    output: &mut Output<'_>,
) -> Result<()> {
    match command {
        ConfigCommands::Show => {
            let mut shown = current_config.clone();
            if !shown.api_key.is_empty() {
                shown.api_key = MASKED_KEY.to_string();
            }
            output.render(&Provider::single(shown))?;
        }
        ConfigCommands::Set { key, value } => {
            let path = config_file(path)?;
            let mut config = CliConfig::load(Some(&path))?;
            config.set(&key, &value)?;
            config.save_to(&path)?;

            let shown = if key == "api_key" { MASKED_KEY } else { value.as_str() };
            output.success(&format!("Set {} = {}", key, shown))?;
        }
        ConfigCommands::Reset => {
            CliConfig::default().save_to(&config_file(path)?)?;
            output.success("Configuration reset to defaults")?;
        }
    }

    Ok(())
}

/// Generate shell completion script
pub fn generate_completion(shell: clap_complete::Shell, out: &mut dyn std::io::Write) {
    use clap::CommandFactory;
    use clap_complete::generate;

    let mut cmd = Cli::command();
    let bin_name = cmd.get_name().to_string();
    generate(shell, &mut cmd, bin_name, out);
}
