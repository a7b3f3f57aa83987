//! `enrollment-service` CLI entry-point.
//!
//! Available sub-commands:
//! - `serve` — start the API server.
//! - `cep`   — resolve one postal code and print the address as JSON.
//!
//! Every option can also be supplied through the environment; a `.env` file
//! in the working directory is loaded first if present.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use lookup::{viacep::DEFAULT_BASE_URL, AddressLookup, LookupError, ViaCepClient};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "enrollment-service",
    about = "Enrollment and address management service",
    version
)]
struct Cli {
    #[command(flatten)]
    lookup: LookupArgs,

    #[command(subcommand)]
    command: Command,
}

#[derive(Args)]
struct LookupArgs {
    /// Base URL of the ViaCEP API.
    #[arg(long, env = "VIACEP_BASE_URL", default_value = DEFAULT_BASE_URL, global = true)]
    viacep_base_url: String,

    /// Per-request timeout for address lookups, in seconds.
    #[arg(long, env = "LOOKUP_TIMEOUT_SECS", global = true)]
    lookup_timeout_secs: Option<u64>,
}

impl LookupArgs {
    fn client(&self) -> Result<ViaCepClient, LookupError> {
        ViaCepClient::new(
            &self.viacep_base_url,
            self.lookup_timeout_secs.map(Duration::from_secs),
        )
    }
}

#[derive(Subcommand)]
enum Command {
    /// Start the REST API server.
    Serve {
        #[arg(long, env = "BIND_ADDR", default_value = "0.0.0.0:8080")]
        bind: String,

        #[arg(long, env = "DATABASE_URL")]
        database_url: String,

        #[arg(long, env = "DB_MAX_CONNECTIONS", default_value_t = 10)]
        max_connections: u32,
    },
    /// Resolve a postal code (CEP) and print the address.
    Cep {
        /// Postal code, digits only.
        cep: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();
    let lookup = cli.lookup.client().context("failed to build address lookup client")?;

    match cli.command {
        Command::Serve { bind, database_url, max_connections } => {
            info!("Starting API server on {bind}");
            let pool = db::pool::create_pool(&database_url, max_connections)
                .await
                .context("failed to connect to database")?;
            db::pool::ping(&pool).await.context("database is not answering")?;

            let service = enrollments::EnrollmentService::with_pool(pool, Arc::new(lookup));
            api::serve(&bind, api::AppState::new(service))
                .await
                .context("API server failed")?;
        }
        Command::Cep { cep } => match lookup.address_by_cep(&cep).await {
            Ok(address) => {
                println!("{}", serde_json::to_string_pretty(&address)?);
            }
            Err(LookupError::NotFound(_)) => {
                eprintln!("No address found for CEP {cep}");
                std::process::exit(1);
            }
            Err(e) => return Err(e).context("address lookup failed"),
        },
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn serve_accepts_explicit_options() {
        let cli = Cli::try_parse_from([
            "enrollment-service",
            "serve",
            "--bind",
            "127.0.0.1:9000",
            "--database-url",
            "postgres://localhost/enrollments",
            "--max-connections",
            "4",
        ])
        .expect("valid arguments");

        match cli.command {
            Command::Serve { bind, database_url, max_connections } => {
                assert_eq!(bind, "127.0.0.1:9000");
                assert_eq!(database_url, "postgres://localhost/enrollments");
                assert_eq!(max_connections, 4);
            }
            Command::Cep { .. } => panic!("expected serve"),
        }
    }

    #[test]
    fn lookup_options_are_global() {
        let cli = Cli::try_parse_from([
            "enrollment-service",
            "cep",
            "01001000",
            "--viacep-base-url",
            "http://localhost:9999/ws",
            "--lookup-timeout-secs",
            "3",
        ])
        .expect("valid arguments");

        assert_eq!(cli.lookup.viacep_base_url, "http://localhost:9999/ws");
        assert_eq!(cli.lookup.lookup_timeout_secs, Some(3));
        assert!(cli.lookup.client().is_ok());
    }
}
