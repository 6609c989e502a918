//! Discovery helper: prints Rider's recent solutions as a JSON object
//!
//! Keys are solution ids, values carry `id`, `name`, `path` and `abspath`.
//! Standard output carries nothing but the JSON; logs go to stderr.

use anyhow::Result;
use rider_search_provider::runtime::RiderConfig;
use tracing::error;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let found = RiderConfig::from_env()
        .and_then(|config| config.find_recent_solutions())
        .and_then(|solutions| solutions.to_json());

    match found {
        Ok(json) => println!("{}", json),
        Err(e) => {
            error!("Finding recent solutions failed: {:?}", e);
            eprintln!("Error: {}", e.user_message());
            std::process::exit(1);
        }
    }

    Ok(())
}
