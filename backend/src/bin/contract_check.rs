//! Validate a JSON document against a named contract and print the envelope
//! a handler would return.

use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use sales_report::domain::{ContractError, ContractKind};
use sales_report::inbound::http::ApiError;
use sales_report::inbound::http::envelope::SuccessEnvelope;
use serde_json::Value;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

/// `contract-check` command arguments.
#[derive(Debug, Parser)]
#[command(
    name = "contract-check",
    about = "Validate a JSON document against a request contract",
    version
)]
struct CliArgs {
    /// Contract name, e.g. `create-report`.
    #[arg(required_unless_present = "list")]
    contract: Option<ContractKind>,
    /// JSON file to check; reads standard input when omitted.
    #[arg(long, value_name = "path")]
    input: Option<PathBuf>,
    /// Print the known contract names and exit.
    #[arg(long)]
    list: bool,
}

fn read_input(path: Option<&PathBuf>) -> io::Result<Value> {
    let raw = match path {
        Some(path) => fs::read_to_string(path)?,
        None => {
            let mut buffer = String::new();
            io::stdin().read_to_string(&mut buffer)?;
            buffer
        }
    };
    serde_json::from_str(&raw)
        .map_err(|error| io::Error::other(format!("input is not valid JSON: {error}")))
}

fn main() -> io::Result<ExitCode> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let args = CliArgs::try_parse().map_err(io::Error::other)?;
    if args.list {
        for kind in ContractKind::ALL {
            println!("{kind}");
        }
        return Ok(ExitCode::SUCCESS);
    }
    let Some(contract) = args.contract else {
        return Err(io::Error::other("a contract name is required"));
    };

    let input = read_input(args.input.as_ref())?;
    let (rendered, code) = match contract.check(&input) {
        Ok(data) => {
            info!(contract = %contract, "input satisfies contract");
            (serde_json::to_string_pretty(&SuccessEnvelope::new(data)), ExitCode::SUCCESS)
        }
        Err(ContractError::Invalid(errors)) => {
            info!(contract = %contract, error_count = errors.len(), "input rejected");
            let envelope = ApiError::from(errors).envelope();
            (serde_json::to_string_pretty(&envelope), ExitCode::FAILURE)
        }
        Err(error @ ContractError::Encode(_)) => return Err(io::Error::other(error)),
    };
    println!("{}", rendered.map_err(io::Error::other)?);
    Ok(code)
}
