use std::{
    fs::{self, File},
    io::{self, Write},
};

use anyhow::{bail, Result};
use blockfetch_client::{FetchError, Provider};
use clap::Parser;
use log::{info, warn};

use crate::{
    cli::AppArgs,
    settings::{resolve_config, FileSettings},
};

mod cli;
mod settings;

/// Fetch one block and print it.
///
/// Settings come from flags, BLOCKFETCH_* environment variables and an optional
/// config file. Any failure ends the process with a non-zero status.
#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let args = AppArgs::parse();

    let file_settings = match &args.config {
        Some(path) => FileSettings::load(path)?,
        None => FileSettings::default(),
    };
    let config = resolve_config(&args, file_settings)?;
    info!(
        "Fetching block {} on {} via {}",
        args.block,
        config.network(),
        config.redacted_rpc_url()
    );
    let provider = Provider::new(config)?;

    let mut output = prepare_output(&args)?;
    let json = match fetch_block_json(&provider, &args).await {
        Ok(json) => json,
        Err(e) => {
            if let Some(path) = &args.out {
                drop(output);
                fs::remove_file(path)?;
            }
            return Err(e);
        }
    };
    writeln!(output, "{json}")?;
    Ok(())
}

/// Requests the block and renders it as pretty JSON.
async fn fetch_block_json(provider: &Provider, args: &AppArgs) -> Result<String> {
    let result = if args.full_transactions {
        provider
            .get_block_with_transactions(args.block)
            .await
            .map(|block| serde_json::to_string_pretty(&block))
    } else {
        provider
            .get_block(args.block)
            .await
            .map(|block| serde_json::to_string_pretty(&block))
    };
    match result {
        Ok(json) => Ok(json?),
        Err(FetchError::NotFound(block)) => match provider.block_number().await {
            Ok(head) => bail!("Block {block} not found, chain head is block {head}"),
            Err(e) => {
                warn!("Could not read chain head: {e}");
                bail!("Block {block} not found")
            }
        },
        Err(e) => Err(e.into()),
    }
}

/// Opens the output file, or stdout if none was given.
fn prepare_output(args: &AppArgs) -> Result<Box<dyn Write>> {
    let Some(path) = &args.out else {
        return Ok(Box::new(io::stdout().lock()));
    };
    if fs::metadata(path).is_ok() {
        bail!("{} file already exists", path.display());
    };
    Ok(Box::new(File::create(path)?))
}
