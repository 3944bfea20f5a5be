//! Validate the start-up environment and report every problem at once.

use std::io;
use std::process::ExitCode;

use mockable::DefaultEnv;
use sales_report::settings::AppSettings;
use tracing::warn;
use tracing_subscriber::{EnvFilter, fmt};

fn main() -> io::Result<ExitCode> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    match AppSettings::from_env(&DefaultEnv::new()) {
        Ok(settings) => {
            println!(
                "configuration ok: environment={} app_url={}",
                settings.environment, settings.app_url
            );
            Ok(ExitCode::SUCCESS)
        }
        Err(error) => {
            for issue in error.issues() {
                println!("{issue}");
            }
            warn!(issue_count = error.issues().len(), "configuration rejected");
            Ok(ExitCode::FAILURE)
        }
    }
}
